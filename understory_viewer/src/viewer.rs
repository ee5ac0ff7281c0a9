// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small controller that owns a [`QuadTree`] and the visible set between scrolls.

use alloc::vec::Vec;

use hashbrown::HashSet;
use understory_quadtree::{ConfigError, QuadTree, QuadTreeConfig, Rect, RectId, Scalar};

use crate::render::Renderer;

/// A widget as supplied by a document loader: `(id, x, y, width, height)`.
pub type Widget<T> = (RectId, T, T, T, T);

/// How the visible set changed between two scrolls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityDelta {
    /// Identifiers visible now but not before, in query order.
    pub entered: Vec<RectId>,
    /// Identifiers visible before but not now, sorted ascending.
    pub exited: Vec<RectId>,
}

impl VisibilityDelta {
    /// Whether nothing entered or left the viewport.
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Controller for a scrollable document of rectangular widgets.
///
/// This type:
/// - loads widgets into a [`QuadTree`] sized to the document,
/// - answers scrolls by culling to the viewport and handing each visible widget to a
///   [`Renderer`],
/// - remembers which identifiers were visible so the next scroll can report a
///   [`VisibilityDelta`].
///
/// It does *not* own any drawing state; the renderer passed to
/// [`on_scroll`][Self::on_scroll] does the drawing.
#[derive(Clone, Debug)]
pub struct DocumentViewer<T> {
    tree: QuadTree<T>,
    visible: HashSet<RectId>,
    last_delta: VisibilityDelta,
}

impl<T: Scalar> DocumentViewer<T> {
    /// Creates a viewer for a `total_width × total_height` document.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not strictly positive.
    pub fn new(total_width: T, total_height: T) -> Self {
        Self::with_config(total_width, total_height, QuadTreeConfig::default())
    }

    /// Creates a viewer with an explicit subdivision policy for its index.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`QuadTree::with_config`].
    pub fn with_config(total_width: T, total_height: T, config: QuadTreeConfig) -> Self {
        Self::from_tree(QuadTree::with_config(total_width, total_height, config))
    }

    /// Creates a viewer, reporting a misconfiguration instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns the error from [`QuadTree::try_with_config`].
    pub fn try_with_config(
        total_width: T,
        total_height: T,
        config: QuadTreeConfig,
    ) -> Result<Self, ConfigError> {
        QuadTree::try_with_config(total_width, total_height, config).map(Self::from_tree)
    }

    /// Wraps an existing index, which may already hold widgets.
    pub fn from_tree(tree: QuadTree<T>) -> Self {
        Self {
            tree,
            visible: HashSet::new(),
            last_delta: VisibilityDelta::default(),
        }
    }

    /// Returns a shared reference to the underlying index.
    pub fn tree(&self) -> &QuadTree<T> {
        &self.tree
    }

    /// Loads widgets in order.
    ///
    /// Widgets without area are dropped silently. Returns how many were stored.
    pub fn load_widgets<I>(&mut self, widgets: I) -> usize
    where
        I: IntoIterator<Item = Widget<T>>,
    {
        let before = self.tree.len();
        self.tree.extend(
            widgets
                .into_iter()
                .map(|(id, x, y, width, height)| Rect::new(id, x, y, width, height)),
        );
        let stored = self.tree.len() - before;
        log::debug!("loaded {stored} widget(s); {} in total", self.tree.len());
        stored
    }

    /// Handles a scroll to `(offset_x, offset_y)` with a `screen_width × screen_height` screen.
    ///
    /// Every widget overlapping the screen (clipped to the document) is passed to `renderer`
    /// once, in query order, and its identifier is returned in the same order. A screen
    /// entirely outside the document renders nothing.
    pub fn on_scroll<R: Renderer<T> + ?Sized>(
        &mut self,
        offset_x: T,
        offset_y: T,
        screen_width: T,
        screen_height: T,
        renderer: &mut R,
    ) -> Vec<RectId> {
        let mut ids = Vec::new();
        self.tree
            .visit_viewport(offset_x, offset_y, screen_width, screen_height, |rect| {
                renderer.render(rect);
                ids.push(rect.id);
            });
        log::debug!(
            "scroll to ({offset_x:?}, {offset_y:?}) shows {} widget(s)",
            ids.len()
        );
        self.track_visibility(&ids);
        ids
    }

    /// How the visible set changed during the most recent [`on_scroll`][Self::on_scroll].
    pub fn last_delta(&self) -> &VisibilityDelta {
        &self.last_delta
    }

    /// Whether `id` was visible after the most recent scroll.
    pub fn is_visible(&self, id: RectId) -> bool {
        self.visible.contains(&id)
    }

    /// Number of distinct identifiers visible after the most recent scroll.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Identifiers visible after the most recent scroll, in no particular order.
    pub fn visible_ids(&self) -> impl Iterator<Item = RectId> + '_ {
        self.visible.iter().copied()
    }

    fn track_visibility(&mut self, ids: &[RectId]) {
        let mut current = HashSet::with_capacity(ids.len());
        let mut entered = Vec::new();
        for &id in ids {
            if current.insert(id) && !self.visible.contains(&id) {
                entered.push(id);
            }
        }
        let mut exited: Vec<_> = self.visible.difference(&current).copied().collect();
        exited.sort_unstable();

        self.visible = current;
        self.last_delta = VisibilityDelta { entered, exited };
    }
}
