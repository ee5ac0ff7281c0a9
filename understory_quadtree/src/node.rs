// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive partition nodes: insertion with subdivision, and pruned region queries.

use alloc::boxed::Box;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::types::{Rect, Scalar};

/// One of the four sub-regions a node splits into, in child order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Which quadrant of `bounds` fully holds `rect`, or `None` if it straddles a midpoint.
///
/// A rectangle goes west only if it starts before the vertical midpoint *and* ends at or
/// before it; it goes east only if it starts at or after the midpoint. Anything touching
/// both sides stays with the caller. Likewise for north/south.
pub(crate) fn quadrant_of<T: Scalar>(bounds: &Rect<T>, rect: &Rect<T>) -> Option<Quadrant> {
    let mid_x = T::add(bounds.x, T::half(bounds.width));
    let mid_y = T::add(bounds.y, T::half(bounds.height));

    let north = rect.y < mid_y && rect.bottom() <= mid_y;
    let south = rect.y >= mid_y;

    if rect.x < mid_x && rect.right() <= mid_x {
        if north {
            return Some(Quadrant::NorthWest);
        }
        if south {
            return Some(Quadrant::SouthWest);
        }
    } else if rect.x >= mid_x {
        if north {
            return Some(Quadrant::NorthEast);
        }
        if south {
            return Some(Quadrant::SouthEast);
        }
    }
    None
}

/// A node of the quadtree.
///
/// A leaf holds every rectangle routed to it. Once a leaf overflows its bucket it
/// subdivides into four children (NW, NE, SW, SE) and from then on holds only the
/// rectangles that straddle its midpoints.
#[derive(Clone, Debug)]
pub(crate) struct QuadNode<T> {
    pub(crate) bounds: Rect<T>,
    pub(crate) depth: usize,
    max_depth: usize,
    capacity: usize,
    pub(crate) objects: SmallVec<[Rect<T>; 4]>,
    pub(crate) children: Option<Box<[Self; 4]>>,
}

impl<T: Scalar> QuadNode<T> {
    pub(crate) fn new(bounds: Rect<T>, depth: usize, max_depth: usize, capacity: usize) -> Self {
        debug_assert!(capacity > 0, "bucket capacity must be at least 1");
        debug_assert!(depth <= max_depth, "node created past the depth ceiling");
        Self {
            bounds,
            depth,
            max_depth,
            capacity,
            objects: SmallVec::new(),
            children: None,
        }
    }

    /// Insert a rectangle the caller has already checked with [`Rect::is_valid`].
    pub(crate) fn insert(&mut self, rect: Rect<T>) {
        debug_assert!(rect.is_valid(), "only valid rectangles reach the nodes");

        if let Some(children) = self.children.as_deref_mut()
            && let Some(quadrant) = quadrant_of(&self.bounds, &rect)
        {
            children[quadrant.index()].insert(rect);
            return;
        }

        self.objects.push(rect);

        if self.children.is_none()
            && self.objects.len() > self.capacity
            && self.depth < self.max_depth
        {
            self.subdivide();
        }
    }

    fn subdivide(&mut self) {
        debug_assert!(self.children.is_none(), "a node subdivides at most once");

        let Rect {
            x,
            y,
            width,
            height,
            ..
        } = self.bounds;
        let west_w = T::half(width);
        let north_h = T::half(height);
        // East and south children take the remainder so odd extents are fully covered.
        let east_w = T::sub(width, west_w);
        let south_h = T::sub(height, north_h);
        let mid_x = T::add(x, west_w);
        let mid_y = T::add(y, north_h);

        let depth = self.depth + 1;
        let child = |cx, cy, w, h| {
            Self::new(
                Rect::synthetic(cx, cy, w, h),
                depth,
                self.max_depth,
                self.capacity,
            )
        };
        let quads = Box::new([
            child(x, y, west_w, north_h),
            child(mid_x, y, east_w, north_h),
            child(x, mid_y, west_w, south_h),
            child(mid_x, mid_y, east_w, south_h),
        ]);

        let pending = core::mem::take(&mut self.objects);
        let children = self.children.insert(quads);
        for rect in pending {
            match quadrant_of(&self.bounds, &rect) {
                Some(quadrant) => children[quadrant.index()].insert(rect),
                None => self.objects.push(rect),
            }
        }

        log::trace!(
            "subdivided node at depth {} with bounds {:?}; {} straddler(s) retained",
            self.depth,
            self.bounds,
            self.objects.len()
        );
    }

    /// Visit every stored rectangle intersecting `viewport`, in pre-order.
    ///
    /// A node's own rectangles come before its children's; children are visited NW, NE,
    /// SW, SE. Subtrees whose bounds miss the viewport are skipped entirely.
    pub(crate) fn visit<F: FnMut(&Rect<T>)>(&self, viewport: &Rect<T>, f: &mut F) {
        if !self.bounds.intersects(viewport) {
            return;
        }

        for rect in &self.objects {
            if viewport.intersects(rect) {
                f(rect);
            }
        }

        if let Some(children) = self.children.as_deref() {
            for child in children {
                if child.bounds.intersects(viewport) {
                    child.visit(viewport, f);
                }
            }
        }
    }

    /// Append every stored rectangle intersecting `viewport` to `out`, in pre-order.
    pub(crate) fn query(&self, viewport: &Rect<T>, out: &mut Vec<Rect<T>>) {
        self.visit(viewport, &mut |rect| out.push(*rect));
    }

    pub(crate) fn node_count(&self) -> usize {
        1 + self
            .children
            .as_deref()
            .map_or(0, |children| children.iter().map(Self::node_count).sum())
    }

    pub(crate) fn max_node_depth(&self) -> usize {
        self.children.as_deref().map_or(self.depth, |children| {
            children
                .iter()
                .map(Self::max_node_depth)
                .max()
                .unwrap_or(self.depth)
        })
    }
}

/// Pre-order iterator over every rectangle stored in a [`QuadTree`][crate::QuadTree].
///
/// Created by [`QuadTree::iter`][crate::QuadTree::iter].
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a QuadNode<T>>,
    current: core::slice::Iter<'a, Rect<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a QuadNode<T>) -> Self {
        let mut stack = Vec::new();
        stack.push(root);
        Self {
            stack,
            current: core::slice::Iter::default(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Rect<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(rect) = self.current.next() {
                return Some(rect);
            }
            let node = self.stack.pop()?;
            if let Some(children) = node.children.as_deref() {
                // Reversed so NW is popped first.
                self.stack.extend(children.iter().rev());
            }
            self.current = node.objects.iter();
        }
    }
}
