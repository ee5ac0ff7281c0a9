// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

/// A quadtree was configured with values it cannot work with.
///
/// These indicate a programming mistake rather than bad input data: invalid rectangles
/// are dropped on insert and out-of-canvas viewports are clipped, but a tree with no
/// bucket capacity or no canvas area cannot be built at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `bucket_capacity` was 0, so every insert would try to subdivide.
    #[error("bucket capacity must be at least 1")]
    ZeroBucketCapacity,
    /// The canvas width or height was zero or negative.
    #[error("canvas width and height must be strictly positive")]
    EmptyCanvas,
}
