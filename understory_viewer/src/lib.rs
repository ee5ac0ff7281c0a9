// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_viewer --heading-base-level=0

//! Understory Viewer: scroll-driven culling for documents made of rectangular widgets.
//!
//! This crate wraps an [`understory_quadtree::QuadTree`] in the controller a document
//! viewer needs on every scroll:
//!
//! - [`DocumentViewer::load_widgets`] takes `(id, x, y, width, height)` tuples and indexes
//!   them; widgets without area are dropped.
//! - [`DocumentViewer::on_scroll`] clips the screen to the document, hands each visible
//!   widget to a [`Renderer`], and returns the visible identifiers in render order.
//! - [`DocumentViewer::last_delta`] reports which identifiers entered or left the screen
//!   since the previous scroll, so hosts can create or tear down per-widget state.
//!
//! Rendering itself is the host's business: any `FnMut(&Rect<T>)` is a [`Renderer`], and
//! [`NoopRenderer`] draws nothing.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_viewer::{DocumentViewer, Rect};
//!
//! let mut viewer = DocumentViewer::new(5000, 5000);
//! viewer.load_widgets([
//!     (1, 4900, 4900, 200, 200),
//!     (2, 1000, 1000, 500, 500),
//!     (3, 2500, 2500, 10, 10),
//! ]);
//!
//! // The screen hangs past the bottom-right corner; it is clipped to the document.
//! let mut drawn = Vec::new();
//! let visible = viewer.on_scroll(4800, 4800, 400, 400, &mut |rect: &Rect<i64>| {
//!     drawn.push((rect.x, rect.y));
//! });
//! assert_eq!(visible, [1]);
//! assert_eq!(drawn, [(4900, 4900)]);
//! assert_eq!(viewer.last_delta().entered, [1]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod render;
mod viewer;

pub use render::{NoopRenderer, Renderer};
pub use understory_quadtree::{QuadTreeConfig, Rect, RectId};
pub use viewer::{DocumentViewer, VisibilityDelta, Widget};
