// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feeding a quadtree from kurbo layout rectangles.
//!
//! Layout code that already produces `kurbo::Rect`s can index them directly through the
//! `kurbo_adapter` feature and get `kurbo::Rect`s back for drawing.
//!
//! Run:
//! - `cargo run -p understory_demos --example kurbo_layout`

use kurbo::{Rect as KRect, Size};
use understory_quadtree::{QuadTree, QuadTreeConfig, Rect};

fn main() {
    env_logger::init();

    let page = Size::new(800.0, 2400.0);
    let config = QuadTreeConfig::default().with_bucket_capacity(4);
    let mut tree = QuadTree::with_config(page.width, page.height, config);

    // A column of paragraphs with an image floating across the column gutter.
    let mut y = 24.0;
    for id in 0..40 {
        let height = 40.0 + (id % 3) as f64 * 20.0;
        let paragraph = KRect::new(48.0, y, 752.0, y + height);
        tree.insert(Rect::from_kurbo(id, paragraph));
        y += height + 16.0;
    }
    tree.insert(Rect::from_kurbo(100, KRect::new(300.0, 500.0, 500.0, 700.0)));
    log::info!(
        "indexed {} rectangles in {} nodes (depth {})",
        tree.len(),
        tree.node_count(),
        tree.max_node_depth()
    );

    let screen = KRect::from_origin_size((0.0, 480.0), (800.0, 300.0));
    println!("screen {screen:?}:");
    tree.visit_viewport(screen.x0, screen.y0, screen.width(), screen.height(), |rect| {
        let visible = rect.to_kurbo().intersect(screen);
        println!("  #{} visible part {visible:?}", rect.id);
    });
}
