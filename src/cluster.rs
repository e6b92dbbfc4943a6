//! Merging of near-duplicate points.
//!
//! Grouping is greedy and order dependent: each unassigned point opens a
//! cluster and pulls in every later unassigned point within the radius of
//! that seed. Membership is measured against the seed, never against the
//! running centroid, which keeps the pass single and deterministic.

use tracing::debug;

use crate::geo::Coordinate;
use crate::haversine::distance;
use crate::traits::Located;

/// Default merge radius in meters.
pub const DEFAULT_CLUSTER_RADIUS_M: f64 = 4000.0;

/// A group of input points collapsed into one stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Mean of the member coordinates.
    pub centroid: Coordinate,
    /// Indices into the input slice. The first entry is the seed.
    pub members: Vec<usize>,
}

impl Cluster {
    /// Index of the point that opened the cluster.
    pub fn seed(&self) -> Option<usize> {
        self.members.first().copied()
    }
}

/// Groups points by seed distance, returning clusters in seed order.
pub fn cluster_points<P: Located>(points: &[P], radius_m: f64) -> Vec<Cluster> {
    let coordinates: Vec<Coordinate> = points.iter().map(Located::coordinate).collect();
    let mut assigned = vec![false; coordinates.len()];
    let mut clusters = Vec::new();

    for seed in 0..coordinates.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut members = vec![seed];

        for candidate in seed + 1..coordinates.len() {
            if assigned[candidate] {
                continue;
            }
            if distance(coordinates[seed], coordinates[candidate]) <= radius_m {
                assigned[candidate] = true;
                members.push(candidate);
            }
        }

        let centroid = Coordinate::mean(members.iter().map(|&i| coordinates[i]))
            .unwrap_or(coordinates[seed]);
        clusters.push(Cluster { centroid, members });
    }

    debug!(
        points = coordinates.len(),
        clusters = clusters.len(),
        radius_m,
        "clustered points"
    );

    clusters
}

/// Collapses points into cluster centroids, in first-seen order.
pub fn cluster<P: Located>(points: &[P], radius_m: f64) -> Vec<Coordinate> {
    cluster_points(points, radius_m)
        .into_iter()
        .map(|cluster| cluster.centroid)
        .collect()
}
