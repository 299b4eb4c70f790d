use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hello_world_service::{
    api::hello_world::hello_world_api::GreetingResponse,
    core::greeting::greeting_service::hello_world,
};

fn hello_world_benchmark(c: &mut Criterion) {
    c.bench_function("hello_world", |b| {
        b.iter(|| serde_json::to_vec(&GreetingResponse::new(black_box(hello_world()))))
    });
}

criterion_group!(benches, hello_world_benchmark);
criterion_main!(benches);
