use std::cmp::Reverse;
use std::collections::HashMap;

use itertools::Itertools;
use log::debug;
use petgraph::graphmap::UnGraphMap;

use crate::grid::Grid;
use crate::location::Location;
use crate::power::bfs_depths;
use crate::side::Side;

/// The deepest location in a BFS result, preferring the lowest `(column, row)` among equals.
pub(crate) fn deepest(depths: &HashMap<Location, usize>) -> Option<(Location, usize)> {
    depths.iter()
        .max_by_key(|(location, depth)| (**depth, Reverse(**location)))
        .map(|(location, depth)| (*location, *depth))
}

/// Whether the component of `graph` spanned by `component` has no cycle, i.e. has exactly one edge fewer than nodes.
fn is_tree(graph: &UnGraphMap<Location, Side>, component: &HashMap<Location, usize>) -> bool {
    let degree_sum: usize = component.keys().map(|node| graph.neighbors(*node).count()).sum();
    degree_sum / 2 + 1 == component.len()
}

/// Diameter, in hops, of the component of `graph` containing `start`.
///
/// On a tree this is the classic two-pass search: the deepest piece seen from `start` is an end of a longest path, so a second search from it measures that path.
/// The shortcut is wrong on graphs with cycles, so a component with a cycle is measured exactly with a search from each of its pieces.
pub fn diameter(graph: &UnGraphMap<Location, Side>, start: Location) -> usize {
    let from_start = bfs_depths(graph, start);

    if is_tree(graph, &from_start) {
        let Some((far_end, _)) = deepest(&from_start) else { return 0 };
        let from_far_end = bfs_depths(graph, far_end);
        return deepest(&from_far_end).map_or(0, |(_, depth)| depth);
    }

    debug!("component of {:?} has a cycle, measuring its diameter exhaustively", start);
    from_start.keys()
        .sorted()
        .filter_map(|node| deepest(&bfs_depths(graph, *node)).map(|(_, depth)| depth))
        .max()
        .unwrap_or(0)
}

impl Grid {
    /// Size the power radius from the current links: half the diameter of the source's component, plus one.
    ///
    /// Runs once when a grid is initialized; rotations and source moves keep the radius fixed.
    pub fn estimate_radius(&mut self) -> usize {
        let diameter = diameter(&self.link_graph(), self.source);
        self.radius = diameter / 2 + 1;
        debug!("diameter {} from {:?} gives radius {}", diameter, self.source, self.radius);
        self.radius
    }
}
