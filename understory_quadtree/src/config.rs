// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs for subdivision.

use crate::error::ConfigError;

/// Default number of rectangles a node holds before it tries to subdivide.
pub const DEFAULT_BUCKET_CAPACITY: usize = 16;

/// Default depth ceiling. The root is depth 0.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Subdivision policy shared by every node of a [`QuadTree`][crate::QuadTree].
///
/// A node splits once it directly holds more than `bucket_capacity` rectangles, unless it
/// already sits at `max_depth`; the depth ceiling always wins over the capacity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadTreeConfig {
    /// Rectangles a node holds directly before subdividing. Must be at least 1.
    #[cfg_attr(feature = "serde", serde(default = "default_bucket_capacity"))]
    pub bucket_capacity: usize,
    /// Deepest level a node may be created at.
    #[cfg_attr(feature = "serde", serde(default = "default_max_depth"))]
    pub max_depth: usize,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            bucket_capacity: default_bucket_capacity(),
            max_depth: default_max_depth(),
        }
    }
}

impl QuadTreeConfig {
    /// Returns this configuration with a different bucket capacity.
    #[must_use]
    pub const fn with_bucket_capacity(mut self, bucket_capacity: usize) -> Self {
        self.bucket_capacity = bucket_capacity;
        self
    }

    /// Returns this configuration with a different depth ceiling.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check the configuration for values that make the tree meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBucketCapacity`] if `bucket_capacity` is 0.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_capacity == 0 {
            return Err(ConfigError::ZeroBucketCapacity);
        }
        Ok(())
    }
}

const fn default_bucket_capacity() -> usize {
    DEFAULT_BUCKET_CAPACITY
}

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
