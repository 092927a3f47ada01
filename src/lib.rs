//! A region quadtree over a fixed axis-aligned domain.
//!
//! The domain is split into four half-open quadrants, and each quadrant is a leaf
//! holding up to `max_points_per_leaf` points. A full leaf splits into four children
//! and its points are redistributed, unless it already sits at `max_depth`, in which
//! case it keeps growing.
//!
//! ```
//! use nalgebra::point;
//! use region_quadtree::{QuadTree, TreeConfig};
//!
//! let config = TreeConfig::default().with_max_points_per_leaf(2);
//! let mut tree = QuadTree::new(config).unwrap();
//! tree.insert(10.0, 10.0, "a").unwrap();
//! tree.insert(90.0, 90.0, "b").unwrap();
//!
//! let found = tree.query(point![0.0, 0.0], point![50.0, 50.0]);
//! assert_eq!(found.len(), 1);
//! assert_eq!(*found[0].payload(), "a");
//! ```

use nalgebra::Point2;

mod config;
mod error;
mod node;
mod quadtree;
mod shapes;
mod util;

pub use config::{TreeConfig, MAX_DEPTH_LIMIT};
pub use error::{QuadTreeError, Result};
pub use node::{Entry, Node, NodeId};
pub use quadtree::{Iter, QuadTree};
pub use shapes::Rect;

pub type P2 = Point2<f64>;

/// Trait for getting a 2d point position of data stored in the [`QuadTree`]
pub trait Point {
    /// Get 2d point position
    fn point(&self) -> P2;
}

impl Point for P2 {
    fn point(&self) -> P2 {
        *self
    }
}
