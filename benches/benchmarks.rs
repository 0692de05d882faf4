use aamodel::*;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        building_uniform_tables,
        building_normal_tables,
        sweeping_value_iteration,
        extracting_policy,
        stepping_generation,
}

fn params() -> Params {
    Params::new(0.4, 0.1, 0.1, 0.2, 200, 0.8, 0.15)
        .and_then(|p| p.with_actions(1000))
        .expect("valid benchmark parameters")
}

fn building_uniform_tables(c: &mut criterion::Criterion) {
    let ref params = params();
    c.bench_function("build 201 x 1001 Uniform tables", |b| {
        b.iter(|| Tables::build(&Uniform, params))
    });
}

fn building_normal_tables(c: &mut criterion::Criterion) {
    let ref params = params();
    let normal = Normal::new(0.1).expect("positive sd");
    c.bench_function("build 201 x 1001 Normal tables", |b| {
        b.iter(|| Tables::build(&normal, params))
    });
}

fn sweeping_value_iteration(c: &mut criterion::Criterion) {
    let ref params = params();
    let tables = Tables::build(&Uniform, params).expect("uniform tables");
    let mut engine = ValueIteration::new(tables, params);
    c.bench_function("apply one Bellman sweep", |b| b.iter(|| engine.sweep()));
}

fn extracting_policy(c: &mut criterion::Criterion) {
    let ref params = params();
    let tables = Tables::build(&Uniform, params).expect("uniform tables");
    let mut engine = ValueIteration::new(tables, params);
    engine.run();
    c.bench_function("extract a converged Policy", |b| {
        b.iter(|| Policy::extract(&Uniform, params, &engine))
    });
}

fn stepping_generation(c: &mut criterion::Criterion) {
    let ref params = params();
    let mut generation = Generation::new(Ability::uniform(), params, 10_000, 5_000, 0)
        .expect("nonempty population");
    c.bench_function("step a 10k agent Generation", |b| {
        b.iter(|| generation.step(0.3, 0.35))
    });
}
