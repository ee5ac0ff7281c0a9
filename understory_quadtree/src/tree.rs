// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `QuadTree` API: owns the root node and clips viewports to the canvas.

use alloc::vec::Vec;

use crate::config::QuadTreeConfig;
use crate::error::ConfigError;
use crate::node::{Iter, QuadNode};
use crate::types::{Rect, Scalar};

/// A region quadtree over a fixed `width × height` canvas anchored at the origin.
///
/// Rectangles are inserted one at a time and never removed. Queries take a viewport in
/// canvas coordinates, clip it to the canvas, and return every stored rectangle that
/// overlaps the clipped viewport with positive area.
///
/// The tree is not internally synchronized: mutate it from one place at a time. Shared
/// references can be queried from several threads at once, since queries never mutate.
#[derive(Clone, Debug)]
pub struct QuadTree<T> {
    width: T,
    height: T,
    config: QuadTreeConfig,
    root: QuadNode<T>,
    len: usize,
}

impl<T: Scalar> QuadTree<T> {
    /// Create an empty tree over a `width × height` canvas with the default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not strictly positive.
    pub fn new(width: T, height: T) -> Self {
        Self::with_config(width, height, QuadTreeConfig::default())
    }

    /// Create an empty tree with an explicit subdivision policy.
    ///
    /// # Panics
    ///
    /// Panics if the canvas has no area or `config` fails [`QuadTreeConfig::validate`].
    /// Use [`QuadTree::try_with_config`] to handle these as errors instead.
    pub fn with_config(width: T, height: T, config: QuadTreeConfig) -> Self {
        match Self::try_with_config(width, height, config) {
            Ok(tree) => tree,
            Err(err) => panic!("invalid quadtree configuration: {err}"),
        }
    }

    /// Create an empty tree, reporting a misconfiguration instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCanvas`] if `width` or `height` is not strictly positive,
    /// or the error from [`QuadTreeConfig::validate`].
    pub fn try_with_config(
        width: T,
        height: T,
        config: QuadTreeConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = Rect::synthetic(T::zero(), T::zero(), width, height);
        if !bounds.is_valid() {
            return Err(ConfigError::EmptyCanvas);
        }
        Ok(Self {
            width,
            height,
            config,
            root: QuadNode::new(bounds, 0, config.max_depth, config.bucket_capacity),
            len: 0,
        })
    }

    /// Canvas width.
    pub fn width(&self) -> T {
        self.width
    }

    /// Canvas height.
    pub fn height(&self) -> T {
        self.height
    }

    /// The subdivision policy this tree was built with.
    pub fn config(&self) -> QuadTreeConfig {
        self.config
    }

    /// The canvas as a synthetic rectangle at the origin.
    pub fn bounds(&self) -> Rect<T> {
        self.root.bounds
    }

    /// Number of rectangles stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes, including the root and every (possibly empty) child.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Depth of the deepest node. Never exceeds the configured `max_depth`.
    pub fn max_node_depth(&self) -> usize {
        self.root.max_node_depth()
    }

    /// Insert a rectangle.
    ///
    /// Rectangles with a zero or negative width or height are dropped without any signal.
    /// Rectangles reaching outside the canvas are kept; only their overlap with the
    /// canvas can ever be found by a query.
    pub fn insert(&mut self, rect: Rect<T>) {
        if !rect.is_valid() {
            log::trace!("ignoring rectangle without area: {rect:?}");
            return;
        }
        self.root.insert(rect);
        self.len += 1;
    }

    /// Clip a viewport to the canvas.
    ///
    /// The left/top edges are clamped to zero and the right/bottom edges to the canvas
    /// size. Returns `None` if nothing of the viewport remains, e.g. when it lies entirely
    /// outside the canvas or has no area to begin with.
    pub fn clip_viewport(
        &self,
        offset_x: T,
        offset_y: T,
        screen_width: T,
        screen_height: T,
    ) -> Option<Rect<T>> {
        let x = T::max(T::zero(), offset_x);
        let y = T::max(T::zero(), offset_y);
        let right = T::min(self.width, T::add(offset_x, screen_width));
        let bottom = T::min(self.height, T::add(offset_y, screen_height));

        let clipped = Rect::synthetic(x, y, T::sub(right, x), T::sub(bottom, y));
        clipped.is_valid().then_some(clipped)
    }

    /// Visit stored rectangles intersecting the clipped viewport (does not allocate).
    ///
    /// Calls `f` once per match, in pre-order: a node's own straddling rectangles first,
    /// then its children NW, NE, SW, SE. Sort externally if another order is needed.
    pub fn visit_viewport<F: FnMut(&Rect<T>)>(
        &self,
        offset_x: T,
        offset_y: T,
        screen_width: T,
        screen_height: T,
        mut f: F,
    ) {
        if let Some(viewport) =
            self.clip_viewport(offset_x, offset_y, screen_width, screen_height)
        {
            log::trace!("visiting {viewport:?}");
            self.root.visit(&viewport, &mut f);
        }
    }

    /// Collect stored rectangles intersecting the clipped viewport.
    ///
    /// The order matches [`QuadTree::visit_viewport`]. An empty result means nothing is
    /// visible, including when the viewport misses the canvas entirely.
    pub fn query(
        &self,
        offset_x: T,
        offset_y: T,
        screen_width: T,
        screen_height: T,
    ) -> Vec<Rect<T>> {
        let mut out = Vec::new();
        if let Some(viewport) =
            self.clip_viewport(offset_x, offset_y, screen_width, screen_height)
        {
            log::trace!("querying {viewport:?}");
            self.root.query(&viewport, &mut out);
        }
        out
    }

    /// Iterate over every stored rectangle in pre-order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root)
    }
}

impl<T: Scalar> Extend<Rect<T>> for QuadTree<T> {
    fn extend<I: IntoIterator<Item = Rect<T>>>(&mut self, iter: I) {
        for rect in iter {
            self.insert(rect);
        }
    }
}

impl<'a, T: Scalar> IntoIterator for &'a QuadTree<T> {
    type Item = &'a Rect<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sorted_ids(rects: &[Rect<i64>]) -> Vec<i64> {
        let mut ids: Vec<_> = rects.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids
    }

    fn tree_from(width: i64, height: i64, rects: &[(i64, i64, i64, i64, i64)]) -> QuadTree<i64> {
        let mut tree = QuadTree::new(width, height);
        tree.extend(
            rects
                .iter()
                .map(|&(id, x, y, w, h)| Rect::new(id, x, y, w, h)),
        );
        tree
    }

    /// Xorshift generator for reproducible layouts.
    struct Rng(u64);

    impl Rng {
        fn next_u64(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }

        fn below(&mut self, n: i64) -> i64 {
            i64::try_from(self.next_u64() % n.unsigned_abs()).unwrap()
        }
    }

    fn random_rects(rng: &mut Rng, count: i64, extent: i64) -> Vec<Rect<i64>> {
        (0..count)
            .map(|id| {
                // Some rectangles hang off the canvas and a few have no area.
                let x = rng.below(extent + 200) - 100;
                let y = rng.below(extent + 200) - 100;
                let w = rng.below(extent / 4) - 2;
                let h = rng.below(extent / 4) - 2;
                Rect::new(id, x, y, w, h)
            })
            .collect()
    }

    #[test]
    fn scenario_small_canvas() {
        let tree = tree_from(
            1000,
            1000,
            &[
                (1, 10, 10, 100, 100),
                (2, 200, 50, 150, 80),
                (3, 300, 300, 400, 400),
            ],
        );
        assert_eq!(sorted_ids(&tree.query(0, 0, 256, 256)), vec![1, 2]);
    }

    #[test]
    fn scenario_viewport_past_the_corner() {
        let tree = tree_from(
            5000,
            5000,
            &[
                (1, 4900, 4900, 200, 200),
                (2, 1000, 1000, 500, 500),
                (3, 2500, 2500, 10, 10),
            ],
        );
        assert_eq!(
            tree.clip_viewport(4800, 4800, 400, 400),
            Some(Rect::synthetic(4800, 4800, 200, 200))
        );
        assert_eq!(sorted_ids(&tree.query(4800, 4800, 400, 400)), vec![1]);
    }

    #[test]
    fn viewport_outside_canvas_is_empty() {
        let tree = tree_from(1000, 1000, &[(1, 0, 0, 1000, 1000)]);
        assert!(tree.query(1100, 0, 100, 100).is_empty());
        assert!(tree.query(0, -500, 100, 100).is_empty());
        assert!(tree.query(-200, 0, 200, 100).is_empty());
        assert!(tree.query(10, 10, 0, 50).is_empty());
        assert!(tree.query(10, 10, 50, -5).is_empty());
        assert_eq!(tree.clip_viewport(1000, 0, 10, 10), None);
    }

    #[test]
    fn clipping_ignores_overhang() {
        let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
        let mut tree = QuadTree::with_config(
            800,
            600,
            QuadTreeConfig::default().with_bucket_capacity(4),
        );
        tree.extend(random_rects(&mut rng, 300, 800));

        // Every viewport here touches the canvas edges, so any overhang is clipped away.
        for (x, y, w, h) in [(0, 0, 300, 200), (500, 0, 300, 600), (0, 400, 800, 200)] {
            let inside = tree.query(x, y, w, h);
            let left = if x == 0 { 10_000 } else { 0 };
            let top = if y == 0 { 10_000 } else { 0 };
            let right = if x + w == 800 { 10_000 } else { 0 };
            let bottom = if y + h == 600 { 10_000 } else { 0 };
            let extended = tree.query(x - left, y - top, w + left + right, h + top + bottom);
            assert_eq!(inside, extended);
        }
    }

    #[test]
    fn matches_brute_force() {
        let mut rng = Rng(42);
        let rects = random_rects(&mut rng, 500, 1000);
        let mut tree = QuadTree::with_config(
            1000,
            1000,
            QuadTreeConfig::default().with_bucket_capacity(3),
        );
        tree.extend(rects.iter().copied());

        let valid: Vec<_> = rects.iter().filter(|r| r.is_valid()).collect();
        assert_eq!(tree.len(), valid.len());
        assert!(tree.node_count() > 1);

        for _ in 0..200 {
            let (x, y) = (rng.below(1400) - 200, rng.below(1400) - 200);
            let (w, h) = (rng.below(600), rng.below(600));
            let mut expected: Vec<_> = match tree.clip_viewport(x, y, w, h) {
                Some(viewport) => valid
                    .iter()
                    .filter(|r| r.intersects(&viewport))
                    .map(|r| r.id)
                    .collect(),
                None => Vec::new(),
            };
            expected.sort_unstable();
            assert_eq!(sorted_ids(&tree.query(x, y, w, h)), expected);
        }
    }

    #[test]
    fn insertion_order_does_not_change_results() {
        let mut rng = Rng(7);
        let rects = random_rects(&mut rng, 200, 512);
        let config = QuadTreeConfig::default().with_bucket_capacity(2);

        let mut forward = QuadTree::with_config(512, 512, config);
        forward.extend(rects.iter().copied());
        let mut backward = QuadTree::with_config(512, 512, config);
        backward.extend(rects.iter().rev().copied());

        for (x, y, w, h) in [(0, 0, 512, 512), (100, 100, 50, 300), (255, 255, 2, 2)] {
            assert_eq!(
                sorted_ids(&forward.query(x, y, w, h)),
                sorted_ids(&backward.query(x, y, w, h))
            );
        }
    }

    #[test]
    fn odd_canvas_keeps_the_last_column_reachable() {
        // Width 5 splits at x = 2; the east child must cover [2, 5), not just [2, 4).
        let mut tree = QuadTree::with_config(
            5,
            4,
            QuadTreeConfig::default()
                .with_bucket_capacity(1)
                .with_max_depth(1),
        );
        tree.insert(Rect::new(1, 0, 0, 1, 1));
        tree.insert(Rect::new(2, 4, 0, 1, 1));
        assert_eq!(tree.node_count(), 5);
        assert_eq!(sorted_ids(&tree.query(4, 0, 1, 1)), vec![2]);
    }

    #[test]
    fn depth_never_exceeds_ceiling() {
        let mut tree = QuadTree::with_config(
            1024,
            1024,
            QuadTreeConfig::default()
                .with_bucket_capacity(1)
                .with_max_depth(3),
        );
        for id in 0..50 {
            tree.insert(Rect::new(id, 1, 1, 2, 2));
        }
        assert_eq!(tree.max_node_depth(), 3);
        assert_eq!(tree.len(), 50);
        assert_eq!(tree.query(0, 0, 4, 4).len(), 50);
    }

    #[test]
    fn invalid_rectangles_are_dropped() {
        let mut tree = QuadTree::new(100, 100);
        tree.insert(Rect::new(1, 10, 10, 0, 10));
        tree.insert(Rect::new(2, 10, 10, 10, -3));
        assert!(tree.is_empty());
        assert!(tree.query(0, 0, 100, 100).is_empty());

        tree.insert(Rect::new(3, 10, 10, 5, 5));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn float_coordinates() {
        let mut tree = QuadTree::<f64>::with_config(
            100.5,
            100.5,
            QuadTreeConfig::default().with_bucket_capacity(1),
        );
        tree.insert(Rect::new(1, 0.25, 0.25, 10.0, 10.0));
        tree.insert(Rect::new(2, 99.0, 99.0, 1.5, 1.5));
        tree.insert(Rect::new(3, 40.0, 40.0, 20.0, 20.0));

        let ids = |hits: Vec<Rect<f64>>| hits.iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids(tree.query(95.0, 95.0, 10.0, 10.0)), vec![2]);
        assert_eq!(ids(tree.query(0.0, 0.0, 50.0, 50.0)), vec![3, 1]);
    }

    #[test]
    fn misconfiguration_is_reported() {
        let zero_capacity = QuadTreeConfig::default().with_bucket_capacity(0);
        assert_eq!(
            QuadTree::try_with_config(10, 10, zero_capacity).err(),
            Some(ConfigError::ZeroBucketCapacity)
        );
        assert_eq!(
            QuadTree::try_with_config(0, 10, QuadTreeConfig::default()).err(),
            Some(ConfigError::EmptyCanvas)
        );
        assert_eq!(
            QuadTree::try_with_config(10, -1, QuadTreeConfig::default()).err(),
            Some(ConfigError::EmptyCanvas)
        );
    }

    #[test]
    #[should_panic(expected = "bucket capacity must be at least 1")]
    fn zero_capacity_panics() {
        let config = QuadTreeConfig::default().with_bucket_capacity(0);
        let _ = QuadTree::with_config(10, 10, config);
    }

    #[test]
    fn visiting_matches_collecting() {
        let mut rng = Rng(0x0BAD_5EED);
        let config = QuadTreeConfig::default().with_bucket_capacity(2);
        let mut tree = QuadTree::with_config(512, 512, config);
        tree.extend(random_rects(&mut rng, 200, 512));

        for (x, y, w, h) in [(0, 0, 512, 512), (100, 40, 200, 90), (-50, 400, 300, 300)] {
            let mut visited = Vec::new();
            tree.visit_viewport(x, y, w, h, |rect| visited.push(*rect));
            assert_eq!(visited, tree.query(x, y, w, h));
        }

        let mut calls = 0;
        tree.visit_viewport(600, 0, 100, 100, |_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn trees_are_independent() {
        let mut a = QuadTree::new(100, 100);
        let b = QuadTree::new(50, 50);
        a.insert(Rect::new(1, 60, 60, 10, 10));
        assert_eq!(a.query(0, 0, 100, 100).len(), 1);
        assert!(b.query(0, 0, 100, 100).is_empty());
        assert_eq!(b.bounds(), Rect::synthetic(0, 0, 50, 50));
    }
}
