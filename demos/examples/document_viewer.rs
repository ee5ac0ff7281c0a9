// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll culling for a document viewer.
//!
//! This example loads widgets into a `DocumentViewer`, scrolls a few screens (one hanging
//! past the document corner, one entirely outside it), and prints what was rendered along
//! with the visibility delta of each scroll.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example document_viewer`

use understory_viewer::{DocumentViewer, NoopRenderer, Rect};

/// Stand-in for a real drawing backend.
fn render_widget(rect: &Rect<i64>) {
    println!(
        "  draw #{} at ({}, {}) size {}x{}",
        rect.id, rect.x, rect.y, rect.width, rect.height
    );
}

fn main() {
    env_logger::init();

    let mut viewer = DocumentViewer::<i64>::new(1000, 1000);
    viewer.load_widgets([
        (1, 10, 10, 100, 100),
        (2, 200, 50, 150, 80),
        (3, 300, 300, 400, 400),
    ]);
    println!("screen (0, 0) 256x256:");
    let mut visible = viewer.on_scroll(0, 0, 256, 256, &mut render_widget);
    visible.sort_unstable();
    println!("  visible ids: {visible:?}");

    let mut viewer = DocumentViewer::<i64>::new(5000, 5000);
    viewer.load_widgets([
        (1, 4900, 4900, 200, 200),
        (2, 1000, 1000, 500, 500),
        (3, 2500, 2500, 10, 10),
        // No area: dropped on load.
        (4, 100, 100, 0, 50),
    ]);
    println!("indexed {} widget(s)", viewer.tree().len());

    for (x, y) in [(4800, 4800), (900, 900), (5100, 0)] {
        println!("screen ({x}, {y}) 400x400:");
        let visible = viewer.on_scroll(x, y, 400, 400, &mut render_widget);
        let delta = viewer.last_delta();
        println!(
            "  visible ids: {visible:?}; entered {:?}, exited {:?}",
            delta.entered, delta.exited
        );
    }

    // Identifiers only, no drawing.
    let ids = viewer.on_scroll(0, 0, 5000, 5000, &mut NoopRenderer);
    println!("whole document: {ids:?}");
}
