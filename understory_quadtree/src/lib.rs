// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a region quadtree for viewport culling over a bounded canvas.
//!
//! Understory Quadtree stores identified, axis-aligned rectangles over a fixed
//! `width × height` canvas and answers "what intersects this viewport?" quickly enough to
//! sit inside a scroll/render loop.
//!
//! - Insert rectangles one at a time; those without area are dropped silently.
//! - Nodes split into four quadrants (NW, NE, SW, SE) once they hold more than
//!   `bucket_capacity` rectangles, down to `max_depth`.
//! - Rectangles that straddle a split stay with the node that split.
//! - Viewport queries clip to the canvas first, then prune whole subtrees whose bounds
//!   miss the viewport.
//!
//! Edges are half-open: rectangles that merely touch do not intersect, so a viewport ending
//! at `x = 100` does not report a rectangle starting at `x = 100`.
//!
//! It is generic over the scalar type `T` (`i32`, `i64`, `f32`, `f64`) and does not depend
//! on any geometry crate. The `kurbo_adapter` feature adds conversions to and from
//! `kurbo::Rect` for `f64` trees.
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{QuadTree, Rect};
//!
//! let mut tree: QuadTree<i64> = QuadTree::new(1000, 1000);
//! tree.insert(Rect::new(1, 10, 10, 100, 100));
//! tree.insert(Rect::new(2, 200, 50, 150, 80));
//! tree.insert(Rect::new(3, 300, 300, 400, 400));
//!
//! let mut visible: Vec<_> = tree.query(0, 0, 256, 256).iter().map(|r| r.id).collect();
//! visible.sort();
//! assert_eq!(visible, [1, 2]);
//!
//! // Viewports are clipped to the canvas; one that misses it finds nothing.
//! assert!(tree.query(1100, 0, 200, 200).is_empty());
//! ```
//!
//! The subdivision policy is configurable:
//!
//! ```rust
//! use understory_quadtree::{QuadTree, QuadTreeConfig, Rect};
//!
//! let config = QuadTreeConfig::default()
//!     .with_bucket_capacity(4)
//!     .with_max_depth(6);
//! let mut tree = QuadTree::<f64>::with_config(800.0, 600.0, config);
//! tree.extend((0..64).map(|i| {
//!     let i = i as f64;
//!     Rect::new(i as i64, i * 12.0, i * 9.0, 10.0, 8.0)
//! }));
//!
//! assert!(tree.max_node_depth() <= 6);
//! let mut hits = 0;
//! tree.visit_viewport(0.0, 0.0, 120.0, 90.0, |_rect| hits += 1);
//! assert_eq!(hits, 10);
//! ```
//!
//! ## Threading
//!
//! The tree is a plain owned value with no interior mutability. Mutation needs `&mut`, so
//! callers serialize inserts themselves; any number of `&QuadTree` can query concurrently.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Midpoints are truncated to
//! whole numbers for floats too, matching integer trees.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod node;
mod tree;
mod types;

pub use config::{DEFAULT_BUCKET_CAPACITY, DEFAULT_MAX_DEPTH, QuadTreeConfig};
pub use error::ConfigError;
pub use node::Iter;
pub use tree::QuadTree;
pub use types::{Rect, RectId, Scalar};
