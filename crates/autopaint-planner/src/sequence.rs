//! Travel sequencing
//!
//! Orders finished polylines so the pen travels as little as possible with
//! the pen up. Tools are visited in palette draw order; inside one tool the
//! next polyline is always the one with the nearest endpoint.

use autopaint_core::{Palette, Point, ToolId, VectorPath};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Greedy nearest-endpoint order for one tool group, starting at `origin`.
///
/// A polyline whose end is nearer than its start is reversed so every
/// polyline is drawn start to end.
pub fn order_group(paths: Vec<VectorPath>, origin: Point) -> Vec<VectorPath> {
    let mut remaining = paths;
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut cursor = origin;

    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        let mut best_reversed = false;
        for (i, path) in remaining.iter().enumerate() {
            let (Some(start), Some(end)) = (path.first_point(), path.last_point()) else {
                continue;
            };
            let to_start = cursor.distance_to(&start);
            let to_end = cursor.distance_to(&end);
            if to_start < best_distance {
                best = i;
                best_distance = to_start;
                best_reversed = false;
            }
            if to_end < best_distance {
                best = i;
                best_distance = to_end;
                best_reversed = true;
            }
        }

        let mut next = remaining.swap_remove(best);
        if best_reversed {
            next.reverse();
        }
        if let Some(end) = next.last_point() {
            cursor = end;
        }
        ordered.push(next);
    }
    ordered
}

/// Group `paths` by tool and order every group, tools in draw order.
///
/// Untagged and background polylines are dropped; tools missing from the
/// palette come last in id order.
pub fn sequence(paths: Vec<VectorPath>, palette: &Palette) -> Vec<VectorPath> {
    let mut groups: BTreeMap<ToolId, Vec<VectorPath>> = BTreeMap::new();
    for path in paths {
        match path.tool {
            Some(tool) if !tool.is_background() => groups.entry(tool).or_default().push(path),
            _ => warn!("Dropping untagged polyline '{}'", path.name),
        }
    }

    let mut order = palette.draw_order();
    order.extend(groups.keys().filter(|t| palette.tool(**t).is_none()).copied());

    let mut result = Vec::new();
    for tool in order {
        let Some(group) = groups.remove(&tool) else {
            continue;
        };
        debug!(
            "Sequencing {} polylines for {}",
            group.len(),
            palette.tool_name(tool)
        );
        result.extend(order_group(group, Point::ORIGIN));
    }
    result
}

/// Pen-up distance when drawing `paths` in order from `origin`.
pub fn travel_distance(paths: &[VectorPath], origin: Point) -> f64 {
    let mut cursor = origin;
    let mut total = 0.0;
    for path in paths {
        if let (Some(start), Some(end)) = (path.first_point(), path.last_point()) {
            total += cursor.distance_to(&start);
            cursor = end;
        }
    }
    total
}
