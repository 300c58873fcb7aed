use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regrid::index_space::range3d;
use regrid::prolong::prolongate_rf2;

fn prolongate_order4(c: &mut Criterion) {
    let fine = range3d(0..64, 0..64, 0..64);
    let coarse = fine.coarsen_by(2).extend_all(3);
    let src: Vec<f64> = (0..coarse.len()).map(|n| (n % 17) as f64).collect();
    let mut dst = vec![0.0; fine.len()];

    c.bench_function("prolongate 64^3 order 4", |b| {
        b.iter(|| {
            prolongate_rf2::<f64, 4>(
                black_box(&mut dst),
                &fine,
                &fine,
                black_box(&src),
                &coarse,
                1,
                0,
                0);
        })
    });
}

criterion_group!(benches, prolongate_order4);
criterion_main!(benches);
