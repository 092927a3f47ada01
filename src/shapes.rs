use crate::P2;

/// Represents an axis-aligned rectangle defined by two points: the start (`xmin`, `ymin`)
/// and the end (`xmax`, `ymax`). Membership is half-open on every side, so the four
/// quarters of a rect tile it without gaps or overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RectBounds", into = "RectBounds"))]
pub struct Rect {
    start: P2,
    center: P2,
    end: P2,
}

impl Rect {
    /// Create a new rect with a start and end point
    pub fn new(start: P2, end: P2) -> Self {
        Self {
            start,
            center: split_point(start, end),
            end,
        }
    }

    /// Create a rect from two opposite corners given in any orientation
    pub fn from_corners(a: P2, b: P2) -> Self {
        Self::new(a.inf(&b), a.sup(&b))
    }

    pub fn start(&self) -> P2 {
        self.start
    }

    pub fn end(&self) -> P2 {
        self.end
    }

    /// The point where both axes are bisected when the rect is quartered
    pub fn center(&self) -> P2 {
        self.center
    }

    pub fn xmin(&self) -> f64 {
        self.start.x
    }

    pub fn xmax(&self) -> f64 {
        self.end.x
    }

    pub fn ymin(&self) -> f64 {
        self.start.y
    }

    pub fn ymax(&self) -> f64 {
        self.end.y
    }

    pub fn width(&self) -> f64 {
        self.end.x - self.start.x
    }

    pub fn height(&self) -> f64 {
        self.end.y - self.start.y
    }

    /// Check if a point lies within `[xmin, xmax) x [ymin, ymax)`
    pub fn contains(&self, point: &P2) -> bool {
        point.x >= self.start.x
            && point.x < self.end.x
            && point.y >= self.start.y
            && point.y < self.end.y
    }

    /// Check if the rect shares any area with another rect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.start.x < other.end.x
            && other.start.x < self.end.x
            && self.start.y < other.end.y
            && other.start.y < self.end.y
    }

    /// Check if the rect fully contains a given rect
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.start.x >= self.start.x
            && other.end.x <= self.end.x
            && other.start.y >= self.start.y
            && other.end.y <= self.end.y
    }

    /// Quarter the rect to produce four smaller rects, ordered
    /// low-x/low-y, high-x/low-y, low-x/high-y, high-x/high-y
    pub fn quarter(&self) -> [Self; 4] {
        let &Rect { start, center, end } = self;

        [
            Rect::new(start, center),
            Rect::new(P2::new(center.x, start.y), P2::new(end.x, center.y)),
            Rect::new(P2::new(start.x, center.y), P2::new(center.x, end.y)),
            Rect::new(center, end),
        ]
    }
}

/// Serialized form of a [`Rect`]; the split point is always recomputed
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RectBounds {
    start: P2,
    end: P2,
}

#[cfg(feature = "serde")]
impl From<RectBounds> for Rect {
    fn from(bounds: RectBounds) -> Self {
        Rect::new(bounds.start, bounds.end)
    }
}

#[cfg(feature = "serde")]
impl From<Rect> for RectBounds {
    fn from(rect: Rect) -> Self {
        Self {
            start: rect.start,
            end: rect.end,
        }
    }
}

// Sibling quarters share this exact value as their common edge.
fn split_point(start: P2, end: P2) -> P2 {
    end - (end - start) / 2.0
}
