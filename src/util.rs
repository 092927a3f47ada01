use crate::{shapes::Rect, P2};

/// Index of the quarter of `rect` holding `point`, scanning quarters in order
pub(crate) fn determine_quadrant(rect: &Rect, point: &P2) -> Option<usize> {
    rect.quarter().iter().position(|q| q.contains(point))
}

/// Like [`determine_quadrant`] but never fails: points on or past the upper edges,
/// or outside the rect altogether, fall into the nearest quarter.
pub(crate) fn probe_quadrant(rect: &Rect, point: &P2) -> usize {
    let center = rect.center();
    usize::from(point.x >= center.x) + 2 * usize::from(point.y >= center.y)
}

pub(crate) fn determine_overlap_quadrants(outer: &Rect, inner: &Rect) -> Vec<usize> {
    outer
        .quarter()
        .iter()
        .enumerate()
        .filter_map(|(i, q)| q.intersects(inner).then_some(i))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use nalgebra::point;

    use super::*;

    pub(crate) fn make_rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Rect {
        Rect::new(point![x1, y1], point![x2, y2])
    }

    #[test]
    fn test_determine_quadrant() {
        let rect = make_rect(0.0, 0.0, 10.0, 10.0);
        let points = [
            point![2.5, 2.5],   // low x, low y
            point![7.5, 2.5],   // high x, low y
            point![2.5, 7.5],   // low x, high y
            point![7.5, 7.5],   // high x, high y
            point![5.0, 5.0],   // split point goes high on both axes
            point![10.0, 5.0],  // right edge is excluded
            point![10.5, 10.5], // outside
        ];

        let expected_quadrants = [Some(0), Some(1), Some(2), Some(3), Some(3), None, None];
        let results = points
            .iter()
            .map(|point| determine_quadrant(&rect, point))
            .collect::<Vec<_>>();

        assert_eq!(
            results, expected_quadrants,
            "Each point should match its expected quadrant"
        );
    }

    #[test]
    fn test_probe_quadrant() {
        let rect = make_rect(0.0, 0.0, 10.0, 10.0);
        let points = [
            point![2.5, 2.5],
            point![7.5, 2.5],
            point![2.5, 7.5],
            point![7.5, 7.5],
            point![10.0, 10.0],
            point![0.0, 10.0],
            point![10.0, 0.0],
            point![-3.0, 42.0],
        ];
        let results = points
            .iter()
            .map(|point| probe_quadrant(&rect, point))
            .collect::<Vec<_>>();

        assert_eq!(
            results,
            [0, 1, 2, 3, 3, 2, 1, 2],
            "Edge and outside points should snap to the nearest quadrant"
        );

        for point in &points[..4] {
            assert_eq!(
                Some(probe_quadrant(&rect, point)),
                determine_quadrant(&rect, point),
                "Probing must agree with membership for interior points"
            );
        }
    }

    #[test]
    fn test_determine_overlap_quadrants() {
        let outer = make_rect(0.0, 0.0, 100.0, 100.0);

        let inner_multiple_overlap = make_rect(25.0, 25.0, 75.0, 75.0);
        assert_eq!(
            determine_overlap_quadrants(&outer, &inner_multiple_overlap),
            &[0, 1, 2, 3],
            "Inner rectangle overlaps all quadrants."
        );

        let inner_single_overlap = make_rect(10.0, 10.0, 30.0, 30.0);
        assert_eq!(
            determine_overlap_quadrants(&outer, &inner_single_overlap),
            &[0],
            "Inner rectangle overlaps only the first quadrant."
        );

        let inner_no_overlap = make_rect(101.0, 101.0, 150.0, 150.0);
        assert_eq!(
            determine_overlap_quadrants(&outer, &inner_no_overlap),
            &[] as &[usize],
            "Inner rectangle does not overlap any quadrant."
        );

        // starts exactly on the split lines, so only the high quadrant has area in it
        let inner_boundary_overlap = make_rect(50.0, 50.0, 70.0, 70.0);
        assert_eq!(
            determine_overlap_quadrants(&outer, &inner_boundary_overlap),
            &[3],
            "Inner rectangle starting on the split point only overlaps the last quadrant."
        );
    }
}
