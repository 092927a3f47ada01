use std::fmt;

use nalgebra::point;

use crate::{
    config::TreeConfig,
    error::{QuadTreeError, Result},
    node::{Entry, Node, NodeId, NodeIds},
    shapes::Rect,
    util::{determine_overlap_quadrants, determine_quadrant, probe_quadrant},
    Point, P2,
};

/// A region quadtree for spatial indexing of 2D points with attached payloads.
///
/// The tree itself never stores points: it owns four top-level nodes covering the
/// quarters of its domain, each starting out as a leaf at depth 1.
#[derive(Debug)]
pub struct QuadTree<T> {
    id: NodeId,
    boundary: Rect,
    config: TreeConfig,
    children: [Box<Node<T>>; 4],
    ids: NodeIds,
    len: usize,
}

impl<T> Default for QuadTree<T> {
    fn default() -> Self {
        Self::build(TreeConfig::default())
    }
}

impl<T> QuadTree<T> {
    /// Create a new empty quadtree
    ///
    /// Fails with [`QuadTreeError::InvalidConfiguration`] if the domain is empty or
    /// either limit is zero.
    pub fn new(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: TreeConfig) -> Self {
        let mut ids = NodeIds::new();
        let id = ids.next();
        let boundary = config.boundary();
        let children = Node::subdivide(&boundary, 1, &mut ids);
        log::debug!(
            "created quadtree over [{}, {}) x [{}, {}), {} points per leaf, depth limit {}",
            config.xmin,
            config.xmax,
            config.ymin,
            config.ymax,
            config.max_points_per_leaf,
            config.max_depth
        );
        Self {
            id,
            boundary,
            config,
            children,
            ids,
            len: 0,
        }
    }

    /// Insert a point with its payload.
    ///
    /// **Returns** the id of the leaf holding the point once the call completes. The id
    /// goes stale as soon as that leaf splits; use [`QuadTree::locate`] for a fresh one.
    pub fn insert(&mut self, x: f64, y: f64, payload: T) -> Result<NodeId> {
        let point = point![x, y];
        let Some(q) = determine_quadrant(&self.boundary, &point) else {
            log::debug!("rejecting ({x}, {y}): outside the tree domain");
            return Err(QuadTreeError::OutOfBounds { x, y });
        };

        let leaf = self.children[q].insert(point, payload, &self.config, &mut self.ids)?;
        self.len += 1;
        Ok(leaf)
    }

    /// Insert an item at the position it reports through [`Point`]
    pub fn insert_item(&mut self, item: T) -> Result<NodeId>
    where
        T: Point,
    {
        let point = item.point();
        self.insert(point.x, point.y, item)
    }

    /// Find the leaf covering `(x, y)`
    pub fn locate(&self, x: f64, y: f64) -> Result<&Node<T>> {
        let point = point![x, y];
        determine_quadrant(&self.boundary, &point)
            .and_then(|q| self.children[q].locate(&point))
            .ok_or(QuadTreeError::OutOfBounds { x, y })
    }

    /// Get the first entry stored exactly at `(x, y)`
    pub fn get(&self, x: f64, y: f64) -> Option<&Entry<T>> {
        let point = point![x, y];
        self.locate(x, y)
            .ok()?
            .entries()
            .iter()
            .find(|e| e.position() == point)
    }

    /// Queries the tree for entries inside the box spanned by two opposite corners.
    ///
    /// Only the leaves under the four corners of the box are inspected, in the order
    /// `(xmin, ymin)`, `(xmin, ymax)`, `(xmax, ymax)`, `(xmax, ymin)`, and their entries
    /// are filtered by half-open membership in the box. Consequences:
    /// - a leaf lying strictly inside the box without holding a corner is skipped, so
    ///   its entries are missing from the result;
    /// - a leaf holding several corners contributes its entries once per corner.
    ///
    /// Corners on or beyond the domain edges resolve to the nearest leaf.
    /// [`QuadTree::query_region`] gives the complete answer.
    pub fn query(&self, corner1: P2, corner2: P2) -> Vec<&Entry<T>> {
        let area = Rect::from_corners(corner1, corner2);
        let (start, end) = (area.start(), area.end());
        let probes = [start, point![start.x, end.y], end, point![end.x, start.y]];
        log::trace!("corner-probe query over {area:?}");

        probes
            .iter()
            .flat_map(|p| self.probe(p).entries())
            .filter(|e| area.contains(&e.position()))
            .collect()
    }

    /// Queries the tree for every entry inside the box spanned by two opposite
    /// corners, descending into each node that overlaps the box.
    pub fn query_region(&self, corner1: P2, corner2: P2) -> Vec<&Entry<T>> {
        let area = Rect::from_corners(corner1, corner2);
        log::trace!("region query over {area:?}");

        let mut results = Vec::new();
        for q in determine_overlap_quadrants(&self.boundary, &area) {
            self.children[q].query(&area, &mut results);
        }
        results
    }

    fn probe(&self, point: &P2) -> &Node<T> {
        self.children[probe_quadrant(&self.boundary, point)].probe(point)
    }

    /// Iterate over every entry, depth-first through the quadrants in order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: self.children.iter().rev().map(|c| c.as_ref()).collect(),
            current: Default::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn boundary(&self) -> &Rect {
        &self.boundary
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The four top-level nodes
    pub fn children(&self) -> &[Box<Node<T>>] {
        &self.children
    }

    /// Depth of the deepest leaf
    pub fn depth(&self) -> usize {
        self.children.iter().map(|c| c.max_depth()).max().unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        self.children.iter().map(|c| c.leaf_count()).sum()
    }
}

/// Renders the node hierarchy: each node as `[id]`, leaf entries as
/// `(x, y) payload`, nesting shown by indentation.
impl<T: fmt::Debug> fmt::Display for QuadTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.id)?;
        for c in &self.children {
            c.fmt_tree(f, 2)?;
        }
        Ok(())
    }
}

/// Iterator over the entries of a [`QuadTree`]
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    current: std::slice::Iter<'a, Entry<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Entry<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                return Some(entry);
            }
            match self.stack.pop()? {
                Node::Leaf { entries, .. } => self.current = entries.iter(),
                Node::Internal { children, .. } => {
                    self.stack.extend(children.iter().rev().map(|c| c.as_ref()))
                }
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a QuadTree<T> {
    type Item = &'a Entry<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
