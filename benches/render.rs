use criterion::{black_box, criterion_group, criterion_main, Criterion};

use isocuboid::{
    CancelToken, CuboidConfig, FillStyle, IsometricCuboidEffect, RectI, Rgba8, Shape, Surface,
};

fn shaded(shape: Shape) -> CuboidConfig {
    CuboidConfig {
        shape,
        fill_style: FillStyle::Shaded,
        draw_hidden_edges: true,
        draw_footprint_dimensions: true,
        ..CuboidConfig::default()
    }
}

fn bench_layer_build(c: &mut Criterion) {
    let effect = IsometricCuboidEffect::new(RectI::new(0, 0, 800, 600));
    let cuboid = shaded(Shape::Cuboid);
    let pyramid = shaded(Shape::Pyramid);
    c.bench_function("layer_build_cuboid_800x600", |b| {
        b.iter(|| effect.set_render_info(black_box(&cuboid)))
    });
    c.bench_function("layer_build_pyramid_800x600", |b| {
        b.iter(|| effect.set_render_info(black_box(&pyramid)))
    });
}

fn bench_composite(c: &mut Criterion) {
    let effect = IsometricCuboidEffect::new(RectI::new(0, 0, 800, 600));
    effect.set_render_info(&shaded(Shape::Cuboid));
    let src = Surface::filled(800, 600, Rgba8::new_opaque(255, 255, 255));
    let mut dst = Surface::new(800, 600);
    let cancel = CancelToken::new();
    c.bench_function("composite_full_800x600", |b| {
        b.iter(|| {
            effect
                .render_tile(&src, &mut dst, RectI::new(0, 0, 800, 600), &cancel)
                .unwrap()
        })
    });
    c.bench_function("composite_tile_64x64", |b| {
        b.iter(|| {
            effect
                .render_tile(&src, &mut dst, black_box(RectI::new(368, 268, 432, 332)), &cancel)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_layer_build, bench_composite);
criterion_main!(benches);
