use std::collections::{HashMap, HashSet, VecDeque};

use log::trace;
use petgraph::graphmap::UnGraphMap;

use crate::grid::Grid;
use crate::location::Location;
use crate::side::Side;

/// Breadth-first hop counts from `start` to every location reachable over `graph`.
///
/// Neighbors are expanded in ascending location order so the order of discovery, and with it any tie-break made on it, is reproducible.
pub(crate) fn bfs_depths(graph: &UnGraphMap<Location, Side>, start: Location) -> HashMap<Location, usize> {
    let mut depths = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let depth = depths[&current];
        let mut neighbors = graph.neighbors(current).collect::<Vec<_>>();
        neighbors.sort();
        for neighbor in neighbors {
            if depths.contains_key(&neighbor) {
                continue;
            }
            depths.insert(neighbor, depth + 1);
            queue.push_back(neighbor);
        }
    }

    depths
}

impl Grid {
    /// Flood power out from the source over live links.
    ///
    /// Every piece is powered down first. Each piece reached then gets its minimal hop count as its distance and is powered iff that distance is within the radius.
    /// Returns the powered set, which is also available from [`Self::powered`] until the next propagation.
    pub fn propagate(&mut self) -> &HashSet<Location> {
        self.reset();
        let depths = bfs_depths(&self.link_graph(), self.source);
        let radius = self.radius;

        let mut powered = HashSet::with_capacity(depths.len());
        for (location, depth) in depths {
            let Some(piece) = self.piece_mut(location) else { continue };
            piece.distance = Some(depth);
            piece.is_powered = depth <= radius;
            if piece.is_powered {
                powered.insert(location);
            }
        }

        trace!("{} of {} pieces powered within radius {}", powered.len(), self.node_count(), radius);
        self.powered = powered;
        &self.powered
    }

    /// Power down every piece: unpowered, at no distance from the source.
    pub fn reset(&mut self) {
        self.pieces.iter_mut().for_each(|piece| piece.power_down());
        self.powered.clear();
    }
}
