// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between culling and drawing.

use understory_quadtree::Rect;

/// Draws one visible rectangle.
///
/// [`DocumentViewer::on_scroll`][crate::DocumentViewer::on_scroll] calls this once per
/// visible rectangle, in query order. Any `FnMut(&Rect<T>)` is a renderer.
pub trait Renderer<T> {
    /// Draw `rect`.
    fn render(&mut self, rect: &Rect<T>);
}

impl<T, F: FnMut(&Rect<T>)> Renderer<T> for F {
    #[inline]
    fn render(&mut self, rect: &Rect<T>) {
        self(rect);
    }
}

/// A renderer that draws nothing, for callers that only want identifiers.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopRenderer;

impl<T> Renderer<T> for NoopRenderer {
    #[inline]
    fn render(&mut self, _rect: &Rect<T>) {}
}
