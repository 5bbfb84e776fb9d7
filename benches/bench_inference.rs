use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pittlcs::{
    encoding::{Encoding, IntegerUnorderedBoundEncoding},
    indiv::Indiv,
    inference::infer_action_and_action_set,
    interval::Dimension,
    params::LcsParams,
    rng::RandomNumberGenerator,
    rule::Rule,
    Condition, DecisionCache,
};

const X_NOUGHT: f64 = 10.0;

fn make_indiv(num_rules: usize, num_dims: usize) -> Indiv<i32> {
    let obs_space = (0..num_dims).map(|_| Dimension::new(0, 99)).collect();
    let encoding = IntegerUnorderedBoundEncoding::new(obs_space).unwrap();
    let params = LcsParams::default();
    let mut rng = RandomNumberGenerator::from_seed(42);
    let rules = (0..num_rules)
        .map(|idx| {
            let alleles = encoding.init_condition_alleles(&mut rng);
            let condition = Condition::new(alleles, &encoding).unwrap();
            Rule::new(condition, idx % 4, &params, &mut rng)
        })
        .collect();
    Indiv::new(rules, vec![0, 1, 2, 3])
}

fn bench_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("inference");
    for num_rules in [10, 100, 1000].iter() {
        let indiv = make_indiv(*num_rules, 4);
        let obs = vec![50, 50, 50, 50];
        group.bench_function(&format!("infer_{}_rules", num_rules), |b| {
            b.iter(|| infer_action_and_action_set(black_box(&indiv), black_box(&obs), X_NOUGHT))
        });
    }
    group.finish();
}

fn bench_cached_inference(c: &mut Criterion) {
    let indiv = make_indiv(100, 4);
    let cache = DecisionCache::new();
    let obs = vec![50, 50, 50, 50];
    // warm the cache so the bench measures the hit path
    cache.infer(&indiv, &obs, X_NOUGHT);

    c.bench_function("infer_100_rules_cached", |b| {
        b.iter(|| cache.infer(black_box(&indiv), black_box(&obs), X_NOUGHT))
    });
}

criterion_group!(benches, bench_inference, bench_cached_inference);
criterion_main!(benches);
