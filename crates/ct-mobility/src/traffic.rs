//! Start-of-tick traffic snapshot for collision probing.
//!
//! # Spatial index
//!
//! Back probes of every active vehicle are bulk-loaded into an R-tree (via
//! `rstar`).  A front probe then only has to look at back probes within the
//! largest possible touch distance instead of scanning every vehicle.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::Vehicle;

// ── R-tree probe entry ────────────────────────────────────────────────────────

/// Back probe of one vehicle, tagged with its owner key.
#[derive(Clone)]
struct ProbeEntry<K> {
    point:  [f32; 2],
    radius: f32,
    owner:  K,
}

impl<K> RTreeObject for ProbeEntry<K> {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl<K> PointDistance for ProbeEntry<K> {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── TrafficSnapshot ───────────────────────────────────────────────────────────

/// Immutable view of all back probes at the start of a tick.
///
/// `K` identifies a vehicle's owner so a vehicle never blocks itself.
pub struct TrafficSnapshot<K> {
    tree:       RTree<ProbeEntry<K>>,
    max_radius: f32,
}

impl<K: Copy + PartialEq> TrafficSnapshot<K> {
    pub fn build<'a>(vehicles: impl IntoIterator<Item = (K, &'a Vehicle)>) -> Self {
        let entries: Vec<ProbeEntry<K>> = vehicles
            .into_iter()
            .map(|(owner, v)| {
                let back = v.back_probe();
                ProbeEntry { point: [back.x, back.y], radius: v.touch_radius, owner }
            })
            .collect();
        let max_radius = entries.iter().map(|e| e.radius).fold(0.0, f32::max);
        Self { tree: RTree::bulk_load(entries), max_radius }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// `true` if `vehicle`'s front probe is within the combined touch radii
    /// of any other vehicle's back probe.
    pub fn is_blocked(&self, owner: K, vehicle: &Vehicle) -> bool {
        let front = vehicle.front_probe();
        let query = [front.x, front.y];
        let reach = vehicle.touch_radius + self.max_radius;
        self.tree
            .locate_within_distance(query, reach * reach)
            .any(|e| {
                let limit = vehicle.touch_radius + e.radius;
                e.owner != owner && e.distance_2(&query) < limit * limit
            })
    }
}

/// Throttle decision for every vehicle in `vehicles`, in input order.
#[cfg(not(feature = "parallel"))]
pub fn throttle_flags<K>(snapshot: &TrafficSnapshot<K>, vehicles: &[(K, &Vehicle)]) -> Vec<bool>
where
    K: Copy + PartialEq,
{
    vehicles.iter().map(|&(k, v)| snapshot.is_blocked(k, v)).collect()
}

/// Throttle decision for every vehicle in `vehicles`, in input order.
#[cfg(feature = "parallel")]
pub fn throttle_flags<K>(snapshot: &TrafficSnapshot<K>, vehicles: &[(K, &Vehicle)]) -> Vec<bool>
where
    K: Copy + PartialEq + Send + Sync,
{
    use rayon::prelude::*;

    vehicles.par_iter().map(|&(k, v)| snapshot.is_blocked(k, v)).collect()
}
