//! Disjoint-set table used while growing a spanning tree.

use std::collections::HashMap;

use crate::location::Location;

/// Maps every location to a representative; a location that maps to itself is the root of its component.
#[derive(Clone, Debug, Default)]
pub(crate) struct Representatives {
    parent: HashMap<Location, Location>,
}

impl Representatives {
    /// Every location starts as its own representative.
    pub(crate) fn new(locations: impl IntoIterator<Item = Location>) -> Self {
        Self {
            parent: locations.into_iter().map(|location| (location, location)).collect(),
        }
    }

    /// Follow representatives from `location` to a fixed point, then point everything on the way straight at it.
    ///
    /// Locations never registered are treated as singleton roots.
    pub(crate) fn find(&mut self, location: Location) -> Location {
        let mut root = location;
        while let Some(&parent) = self.parent.get(&root) {
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut current = location;
        while current != root {
            let Some(next) = self.parent.insert(current, root) else { break };
            current = next;
        }

        root
    }

    /// Merge the components of `a` and `b`, attaching `a`'s root under `b`'s.
    ///
    /// Returns false if they were already one component.
    pub(crate) fn union(&mut self, a: Location, b: Location) -> bool {
        let a_root = self.find(a);
        let b_root = self.find(b);
        if a_root == b_root {
            return false;
        }

        self.parent.insert(a_root, b_root);
        true
    }

    pub(crate) fn same_component(&mut self, a: Location, b: Location) -> bool {
        self.find(a) == self.find(b)
    }
}
