use nalgebra::point;

use crate::{
    error::{QuadTreeError, Result},
    shapes::Rect,
};

/// Deepest level a tree may be configured with. Halving an f64 interval stops
/// producing smaller cells well before this many levels.
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// Construction options for a [`QuadTree`](crate::QuadTree).
///
/// Every field is optional when deserialized; missing ones take the defaults
/// `[0, 100) x [0, 100)`, 20 points per leaf and a depth limit of 10.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeConfig {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    /// Leaves below `max_depth` split when they would exceed this many points
    pub max_points_per_leaf: usize,
    /// Leaves at this depth never split and grow without bound, at most [`MAX_DEPTH_LIMIT`]
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            xmin: 0.0,
            xmax: 100.0,
            ymin: 0.0,
            ymax: 100.0,
            max_points_per_leaf: 20,
            max_depth: 10,
        }
    }
}

impl TreeConfig {
    pub fn with_bounds(mut self, xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        self.xmin = xmin;
        self.xmax = xmax;
        self.ymin = ymin;
        self.ymax = ymax;
        self
    }

    pub fn with_max_points_per_leaf(mut self, max_points_per_leaf: usize) -> Self {
        self.max_points_per_leaf = max_points_per_leaf;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The domain covered by the tree
    pub fn boundary(&self) -> Rect {
        Rect::new(point![self.xmin, self.ymin], point![self.xmax, self.ymax])
    }

    pub fn validate(&self) -> Result<()> {
        let width = self.xmax - self.xmin;
        let height = self.ymax - self.ymin;
        if !(width.is_finite() && width > 0.0) {
            return Err(QuadTreeError::InvalidConfiguration(format!(
                "width must be positive and finite, got xmin={} xmax={}",
                self.xmin, self.xmax
            )));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(QuadTreeError::InvalidConfiguration(format!(
                "height must be positive and finite, got ymin={} ymax={}",
                self.ymin, self.ymax
            )));
        }
        if self.max_points_per_leaf == 0 {
            return Err(QuadTreeError::InvalidConfiguration(
                "max_points_per_leaf must be at least 1".to_string(),
            ));
        }
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(QuadTreeError::InvalidConfiguration(format!(
                "max_depth must be between 1 and {MAX_DEPTH_LIMIT}, got {}",
                self.max_depth
            )));
        }
        Ok(())
    }
}
