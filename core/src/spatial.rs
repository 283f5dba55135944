//! Neighbor index over the farm plane for separation lookups.
//!
//! Rebuilt from the pre-frame snapshot each tick via `bulk_load`. A
//! query returns every chicken inside the square envelope of side
//! `2 * radius` around a point, which covers every neighbor that can
//! push it. Candidates come back sorted by snapshot index, which keeps
//! the accumulated force bit-identical to a full scan.

use crate::math::Vec3;
use rstar::{RTree, RTreeObject, AABB};

/// Position-only entry so the tree never holds full chickens.
#[derive(Clone, Debug)]
struct ChickenLocation {
    index:    usize,
    position: [f64; 2],
}

impl RTreeObject for ChickenLocation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

pub struct SpatialIndex {
    radius: f64,
    tree:   RTree<ChickenLocation>,
}

impl SpatialIndex {
    pub fn new(radius: f64) -> Self {
        assert!(radius > 0.0, "radius must be > 0");
        Self {
            radius,
            tree: RTree::new(),
        }
    }

    /// Rebuild from a sequence of positions; indices refer into it.
    pub fn rebuild(&mut self, positions: impl IntoIterator<Item = Vec3>) {
        let locations: Vec<ChickenLocation> = positions
            .into_iter()
            .enumerate()
            .map(|(index, p)| ChickenLocation { index, position: [p.x, p.z] })
            .collect();
        self.tree = RTree::bulk_load(locations);
    }

    /// Indices of everything within `radius` of `p` along each axis,
    /// sorted ascending.
    pub fn candidates(&self, p: Vec3, out: &mut Vec<usize>) {
        out.clear();
        let envelope = AABB::from_corners(
            [p.x - self.radius, p.z - self.radius],
            [p.x + self.radius, p.z + self.radius],
        );
        out.extend(self.tree.locate_in_envelope(&envelope).map(|loc| loc.index));
        out.sort_unstable();
    }
}
