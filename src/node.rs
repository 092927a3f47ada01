use std::{collections::VecDeque, fmt};

use crate::{
    config::TreeConfig,
    error::{QuadTreeError, Result},
    shapes::Rect,
    util::{determine_overlap_quadrants, determine_quadrant, probe_quadrant},
    P2,
};

/// Identifier of a node, unique within one tree. Only meaningful for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-tree id counter
#[derive(Debug)]
pub(crate) struct NodeIds(u32);

impl NodeIds {
    pub(crate) fn new() -> Self {
        Self(0)
    }

    pub(crate) fn next(&mut self) -> NodeId {
        self.0 += 1;
        NodeId(self.0)
    }
}

/// A point stored in the tree together with its payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<T> {
    position: P2,
    payload: T,
    leaf: NodeId,
}

impl<T> Entry<T> {
    pub fn position(&self) -> P2 {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Id of the leaf that holds this entry
    pub fn leaf(&self) -> NodeId {
        self.leaf
    }
}

/// Outcome of handing an entry to a leaf
enum Placement<T> {
    Stored(NodeId),
    Split(Vec<Entry<T>>),
}

/// QuadTree node enum
///
/// ## Variants
/// - `Internal`: Owns four children covering the quarters of its boundary.
/// - `Leaf`: Holds the entries that fall inside its boundary.
#[derive(Debug)]
pub enum Node<T> {
    Internal {
        id: NodeId,
        boundary: Rect,
        depth: usize,
        children: [Box<Self>; 4],
    },
    Leaf {
        id: NodeId,
        boundary: Rect,
        depth: usize,
        entries: Vec<Entry<T>>,
    },
}

impl<T> Node<T> {
    pub(crate) fn new_leaf(id: NodeId, boundary: Rect, depth: usize) -> Self {
        Self::Leaf {
            id,
            boundary,
            depth,
            entries: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Self::Internal { id, .. } | Self::Leaf { id, .. } => *id,
        }
    }

    pub fn boundary(&self) -> &Rect {
        match self {
            Self::Internal { boundary, .. } | Self::Leaf { boundary, .. } => boundary,
        }
    }

    /// Distance from the root; the tree's own children sit at depth 1
    pub fn depth(&self) -> usize {
        match self {
            Self::Internal { depth, .. } | Self::Leaf { depth, .. } => *depth,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Entries held by a leaf; always empty for internal nodes
    pub fn entries(&self) -> &[Entry<T>] {
        match self {
            Self::Leaf { entries, .. } => entries.as_slice(),
            Self::Internal { .. } => &[],
        }
    }

    /// Children of an internal node; always empty for leaves
    pub fn children(&self) -> &[Box<Self>] {
        match self {
            Self::Internal { children, .. } => &children[..],
            Self::Leaf { .. } => &[],
        }
    }

    /// Place an entry in the subtree, splitting full leaves on the way.
    /// Returns the id of the leaf holding the entry once every split has settled.
    pub(crate) fn insert(
        &mut self,
        position: P2,
        payload: T,
        config: &TreeConfig,
        ids: &mut NodeIds,
    ) -> Result<NodeId> {
        let mut placed = self.id();
        // entries still to be pushed down, the inserted one flagged `true`
        let mut pending = VecDeque::from([(
            Entry {
                position,
                payload,
                leaf: placed,
            },
            true,
        )]);

        while let Some((entry, inserted)) = pending.pop_front() {
            let point = entry.position;
            let mut node = &mut *self;
            let leaf = loop {
                node = match { node } {
                    Self::Internal {
                        boundary, children, ..
                    } => {
                        let q = determine_quadrant(boundary, &point).ok_or(
                            QuadTreeError::OutOfBounds {
                                x: point.x,
                                y: point.y,
                            },
                        )?;
                        children[q].as_mut()
                    }
                    leaf => break leaf,
                };
            };

            match leaf.store(entry, config, ids) {
                Placement::Stored(id) => {
                    if inserted {
                        placed = id;
                    }
                }
                Placement::Split(displaced) => {
                    // redistribute before anything queued behind, keeping arrival order
                    let last = displaced.len() - 1;
                    for (i, e) in displaced.into_iter().enumerate().rev() {
                        pending.push_front((e, inserted && i == last));
                    }
                }
            }
        }
        Ok(placed)
    }

    /// Store an entry in this leaf, or split the leaf when it is full and hand back
    /// its entries followed by the new one.
    fn store(
        &mut self,
        mut entry: Entry<T>,
        config: &TreeConfig,
        ids: &mut NodeIds,
    ) -> Placement<T> {
        match self {
            &mut Self::Leaf {
                id,
                boundary,
                depth,
                ref mut entries,
            } => {
                if entries.len() < config.max_points_per_leaf || depth >= config.max_depth {
                    log::trace!(
                        "placing ({}, {}) in leaf {id} at depth {depth}",
                        entry.position.x,
                        entry.position.y
                    );
                    entry.leaf = id;
                    entries.push(entry);
                    return Placement::Stored(id);
                }

                let mut displaced = std::mem::take(entries);
                displaced.push(entry);
                log::debug!(
                    "splitting leaf {id} at depth {depth}, redistributing {} points",
                    displaced.len()
                );

                let children = Self::subdivide(&boundary, depth + 1, ids);
                *self = Self::Internal {
                    id,
                    boundary,
                    depth,
                    children,
                };
                Placement::Split(displaced)
            }
            Self::Internal { .. } => Placement::Split(vec![entry]),
        }
    }

    /// The leaf whose half-open boundary contains `point`
    pub(crate) fn locate(&self, point: &P2) -> Option<&Self> {
        let mut node = self;
        while let Self::Internal {
            boundary, children, ..
        } = node
        {
            node = children[determine_quadrant(boundary, point)?].as_ref();
        }
        node.boundary().contains(point).then_some(node)
    }

    /// The leaf nearest to `point`, treating upper edges as closed
    pub(crate) fn probe(&self, point: &P2) -> &Self {
        let mut node = self;
        while let Self::Internal {
            boundary, children, ..
        } = node
        {
            node = children[probe_quadrant(boundary, point)].as_ref();
        }
        node
    }

    /// Collect every entry inside `area`, visiting only subtrees that overlap it
    pub(crate) fn query<'a>(&'a self, area: &Rect, results: &mut Vec<&'a Entry<T>>) {
        match self {
            Self::Leaf {
                boundary, entries, ..
            } => {
                if area.contains_rect(boundary) {
                    results.extend(entries.iter());
                } else {
                    results.extend(entries.iter().filter(|e| area.contains(&e.position)));
                }
            }
            Self::Internal {
                boundary, children, ..
            } => {
                for q in determine_overlap_quadrants(boundary, area) {
                    children[q].query(area, results);
                }
            }
        }
    }

    pub(crate) fn max_depth(&self) -> usize {
        match self {
            Self::Internal { children, .. } => {
                children.iter().map(|c| c.max_depth()).max().unwrap_or(0)
            }
            Self::Leaf { depth, .. } => *depth,
        }
    }

    pub(crate) fn leaf_count(&self) -> usize {
        match self {
            Self::Internal { children, .. } => children.iter().map(|c| c.leaf_count()).sum(),
            Self::Leaf { .. } => 1,
        }
    }

    pub(crate) fn subdivide(boundary: &Rect, depth: usize, ids: &mut NodeIds) -> [Box<Self>; 4] {
        boundary
            .quarter()
            .map(|r| Box::new(Self::new_leaf(ids.next(), r, depth)))
    }
}

impl<T: fmt::Debug> Node<T> {
    pub(crate) fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        writeln!(f, "{:indent$}[{}]", "", self.id())?;
        let indent = indent + 2;
        match self {
            Self::Leaf { entries, .. } => {
                for e in entries {
                    writeln!(f, "{:indent$}({}, {}) {:?}", "", e.x(), e.y(), e.payload)?;
                }
            }
            Self::Internal { children, .. } => {
                for c in children {
                    c.fmt_tree(f, indent)?;
                }
            }
        }
        Ok(())
    }
}
