// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{QuadTree, QuadTreeConfig, Rect};
use understory_viewer::{DocumentViewer, NoopRenderer};

const CANVAS: i64 = 100_000;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, n: i64) -> i64 {
        (self.next_u64() % n as u64) as i64
    }
}

/// A long document: four widgets per row, rows stacked down the page.
fn gen_page_widgets(count: usize, page_w: i64, row_h: i64) -> Vec<Rect<i64>> {
    let per_row = 4;
    let cell_w = page_w / per_row;
    (0..count as i64)
        .map(|i| {
            let (row, col) = (i / per_row, i % per_row);
            Rect::new(i, col * cell_w + 4, row * row_h + 4, cell_w - 8, row_h - 8)
        })
        .collect()
}

fn gen_random_widgets(rng: &mut Rng, count: usize, max_size: i64) -> Vec<Rect<i64>> {
    (0..count as i64)
        .map(|i| {
            Rect::new(
                i,
                rng.below(CANVAS),
                rng.below(CANVAS),
                1 + rng.below(max_size),
                1 + rng.below(max_size),
            )
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_insert");
    let mut rng = Rng::new(0x2545_F491_4F6C_DD1D);
    for &count in &[1_000_usize, 10_000, 100_000] {
        let rects = gen_random_widgets(&mut rng, count, 400);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("random_{count}"), |b| {
            b.iter_batched(
                || rects.clone(),
                |rects| {
                    let mut tree = QuadTree::new(CANVAS, CANVAS);
                    tree.extend(rects);
                    black_box(tree.len())
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query");
    let mut rng = Rng::new(0x9E37_79B9_7F4A_7C15);
    let rects = gen_random_widgets(&mut rng, 100_000, 400);

    for &capacity in &[4_usize, 16, 64] {
        let config = QuadTreeConfig::default().with_bucket_capacity(capacity);
        let mut tree = QuadTree::with_config(CANVAS, CANVAS, config);
        tree.extend(rects.iter().copied());
        group.bench_function(format!("visit_screen_capacity_{capacity}"), |b| {
            let mut offsets = Rng::new(7);
            b.iter(|| {
                let (x, y) = (offsets.below(CANVAS), offsets.below(CANVAS));
                let mut hits = 0_usize;
                tree.visit_viewport(x, y, 1920, 1080, |_| hits += 1);
                black_box(hits)
            });
        });
    }

    let mut tree = QuadTree::new(CANVAS, CANVAS);
    tree.extend(rects.iter().copied());
    group.bench_function("collect_screen", |b| {
        b.iter(|| black_box(tree.query(black_box(40_000), black_box(40_000), 1920, 1080)));
    });
    group.bench_function("collect_outside_canvas", |b| {
        b.iter(|| black_box(tree.query(black_box(2 * CANVAS), black_box(0), 1920, 1080)));
    });
    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewer_scroll");
    let widgets = gen_page_widgets(50_000, 1200, 60);
    let page_h = (widgets.len() as i64 / 4 + 1) * 60;
    let mut viewer = DocumentViewer::new(1200, page_h);
    viewer.load_widgets(widgets.iter().map(|r| (r.id, r.x, r.y, r.width, r.height)));

    group.bench_function("scroll_down_page", |b| {
        let mut offset = 0_i64;
        b.iter(|| {
            offset = (offset + 37) % page_h;
            black_box(viewer.on_scroll(0, offset, 1200, 900, &mut NoopRenderer))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_query, bench_scroll);
criterion_main!(benches);
