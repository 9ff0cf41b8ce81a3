//! Two-phase resolution of a pointer against droppable regions.
//!
//! Phase 1 checks plain containment against regions marked `exact`, the
//! small destructive targets (an archive zone) that must never be shadowed
//! by a larger overlapping region. Phase 2 falls back to a forgiving
//! closest-corners match over everything else.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A droppable region paired with a caller-supplied key.
///
/// The key is whatever the embedding layer needs to identify the drop
/// target (a column, a card, a delete zone); this crate never inspects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region<K> {
    pub key: K,
    pub bounds: Rect,
    /// Exact regions resolve by containment only, ahead of every
    /// nearest-match candidate.
    pub exact: bool,
}

impl<K> Region<K> {
    /// A region resolved by the nearest-match phase
    pub fn new(key: K, bounds: Rect) -> Self {
        Self {
            key,
            bounds,
            exact: false,
        }
    }

    /// A region resolved by containment only, short-circuiting the
    /// nearest-match phase
    pub fn exact(key: K, bounds: Rect) -> Self {
        Self {
            key,
            bounds,
            exact: true,
        }
    }
}

/// Resolve the pointer to the region it currently targets, if any.
///
/// Exact regions win by containment first. Among the rest, the region
/// with the smallest drop distance wins; a pointer inside several nested
/// regions (a card lying within its column) resolves to the smallest one,
/// the most specific target. Returns `None` when `regions` is empty or
/// contains only exact regions that miss.
pub fn resolve<K>(pointer: Point, regions: &[Region<K>]) -> Option<&K> {
    if let Some(hit) = regions
        .iter()
        .filter(|r| r.exact)
        .find(|r| r.bounds.contains(&pointer))
    {
        return Some(&hit.key);
    }

    regions
        .iter()
        .filter(|r| !r.exact)
        .min_by(|a, b| {
            let da = drop_distance(&pointer, &a.bounds);
            let db = drop_distance(&pointer, &b.bounds);
            da.partial_cmp(&db)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    a.bounds
                        .area()
                        .partial_cmp(&b.bounds.area())
                        .unwrap_or(Ordering::Equal)
                })
        })
        .map(|r| &r.key)
}

/// Distance used by the nearest-match phase: zero when the pointer is
/// inside the bounds, otherwise the distance to the closest corner.
fn drop_distance(pointer: &Point, bounds: &Rect) -> f64 {
    if bounds.contains(pointer) {
        return 0.0;
    }
    bounds
        .corners()
        .iter()
        .map(|corner| pointer.distance_to(corner))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(key: &str, x: f64) -> Region<String> {
        Region::new(key.to_string(), Rect::new(x, 0.0, 200.0, 600.0))
    }

    fn card(key: &str, x: f64, y: f64) -> Region<String> {
        Region::new(key.to_string(), Rect::new(x, y, 180.0, 80.0))
    }

    #[test]
    fn test_empty_regions_resolve_to_none() {
        let regions: Vec<Region<String>> = Vec::new();
        assert_eq!(resolve(Point::new(5.0, 5.0), &regions), None);
    }

    #[test]
    fn test_exact_region_wins_over_containing_card() {
        // The delete zone overlaps a card; the pointer is inside both.
        let regions = vec![
            card("card-1", 0.0, 0.0),
            Region::exact("trash".to_string(), Rect::new(100.0, 20.0, 60.0, 40.0)),
        ];

        let hit = resolve(Point::new(120.0, 30.0), &regions);
        assert_eq!(hit, Some(&"trash".to_string()));
    }

    #[test]
    fn test_exact_region_ignored_when_missed() {
        let regions = vec![
            Region::exact("trash".to_string(), Rect::new(500.0, 500.0, 60.0, 40.0)),
            card("card-1", 0.0, 0.0),
        ];

        // Far from the trash zone, inside the card.
        let hit = resolve(Point::new(10.0, 10.0), &regions);
        assert_eq!(hit, Some(&"card-1".to_string()));
    }

    #[test]
    fn test_exact_only_miss_resolves_to_none() {
        let regions = vec![Region::exact(
            "trash".to_string(),
            Rect::new(500.0, 500.0, 60.0, 40.0),
        )];
        assert_eq!(resolve(Point::new(0.0, 0.0), &regions), None);
    }

    #[test]
    fn test_card_inside_column_is_more_specific() {
        // Card bounds sit inside the column bounds; the pointer is over
        // both, and the smaller region must win.
        let regions = vec![column("backlog", 0.0), card("card-1", 10.0, 100.0)];

        let hit = resolve(Point::new(100.0, 140.0), &regions);
        assert_eq!(hit, Some(&"card-1".to_string()));
    }

    #[test]
    fn test_column_wins_between_cards() {
        let regions = vec![
            column("backlog", 0.0),
            card("card-1", 10.0, 100.0),
            card("card-2", 10.0, 300.0),
        ];

        // In the gap between the two cards: contained only by the column.
        let hit = resolve(Point::new(100.0, 250.0), &regions);
        assert_eq!(hit, Some(&"backlog".to_string()));
    }

    #[test]
    fn test_nearest_corner_outside_everything() {
        let regions = vec![column("backlog", 0.0), column("todo", 300.0)];

        // Below the board, closer to the second column's corner.
        let hit = resolve(Point::new(320.0, 650.0), &regions);
        assert_eq!(hit, Some(&"todo".to_string()));

        let hit = resolve(Point::new(180.0, 650.0), &regions);
        assert_eq!(hit, Some(&"backlog".to_string()));
    }

    #[test]
    fn test_full_tie_keeps_first_region() {
        // Identical bounds: the first listed region is returned.
        let regions = vec![
            Region::new("a".to_string(), Rect::new(0.0, 0.0, 10.0, 10.0)),
            Region::new("b".to_string(), Rect::new(0.0, 0.0, 10.0, 10.0)),
        ];
        assert_eq!(resolve(Point::new(5.0, 5.0), &regions), Some(&"a".to_string()));
    }
}
