//! Blit and render benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use blockterm::ansi::{ColorMode, Quantizer, Sgr};
use blockterm::core::{CellDefaults, Dimensions, Glyph, Grid};
use blockterm::halfblock::{blit, Position};
use blockterm::image::ImageData;
use blockterm::renderer::Renderer;

const ROWS: usize = 24;
const COLUMNS: usize = 80;

fn gradient(width: usize, height: usize) -> ImageData {
    let mut image = ImageData::blank(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            image.set_pixel(x, y, [r, g, 128, 255]);
        }
    }
    image
}

fn half_block_grid(sgr: &Sgr) -> Grid {
    let defaults = CellDefaults::from_sgr(sgr).with_glyph(Glyph::lower_half_block());
    Grid::new(Dimensions::new(ROWS, COLUMNS), &defaults).unwrap()
}

fn bench_blit(c: &mut Criterion) {
    let mut group = c.benchmark_group("blit");
    let sgr = Sgr::new();
    let image = gradient(COLUMNS, ROWS * 2);
    group.throughput(Throughput::Elements((COLUMNS * ROWS * 2) as u64));

    for mode in [ColorMode::Cube6, ColorMode::TrueColor] {
        let quantizer = Quantizer::new(&sgr, mode);
        group.bench_function(format!("{:?}", mode), |b| {
            let mut grid = half_block_grid(&sgr);
            b.iter(|| black_box(blit(&image, &mut grid, Position::default(), &quantizer).unwrap()))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let sgr = Sgr::new();
    group.throughput(Throughput::Elements((COLUMNS * ROWS) as u64));

    let blank = half_block_grid(&sgr);
    let mut busy = half_block_grid(&sgr);
    blit(
        &gradient(COLUMNS, ROWS * 2),
        &mut busy,
        Position::default(),
        &Quantizer::new(&sgr, ColorMode::TrueColor),
    )
    .unwrap();

    let renderer = Renderer::new(&sgr);
    for (name, grid) in [("uniform", &blank), ("gradient", &busy)] {
        group.bench_function(name, |b| {
            let mut out = Vec::with_capacity(64 * 1024);
            b.iter(|| {
                out.clear();
                renderer.render_into(grid, &mut out);
                black_box(out.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_blit, bench_render);
criterion_main!(benches);
