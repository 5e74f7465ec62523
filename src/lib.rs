// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Indoor navigation over hand-drawn campus floor plans.
//!
//! Floor plans are stored as GeoJSON feature collections, one per floor, with walkable
//! corridors drawn as `LineString`s. Campusnav converts them into one weighted undirected
//! graph per floor, joins floors with configured [stair links](crate::campus::StairLink),
//! snaps arbitrary query points (classrooms or live GPS positions) onto the graph,
//! and runs Dijkstra's algorithm to find the shortest walk between them.
//!
//! # Example
//!
//! ```no_run
//! use campusnav::campus::{ClassroomDirectory, FileStore, Options};
//! use campusnav::{Navigator, Origin};
//!
//! let navigator = Navigator::new(
//!     FileStore::new("path/to/routes"),
//!     ClassroomDirectory::campus(),
//!     Options::default(),
//! );
//!
//! let route = navigator
//!     .navigate(&Origin::Classroom("LHC-2".into()), "LHC-5")
//!     .expect("failed to find route");
//!
//! println!("Route: {:?}", route.coordinates());
//! ```

pub mod campus;
mod dijkstra;
mod distance;
mod graph;
mod navigation;
mod snap;

pub use dijkstra::{find_route, Leg, Route, RouteError, DEFAULT_STEP_LIMIT};
pub use distance::earth_distance;
pub use graph::{FloorGraphs, Graph};
pub use navigation::{NavigationError, Navigator, Origin};
pub use snap::snap;

use serde::{Deserialize, Serialize};

/// Number of [NodeKey] quantization steps per degree.
///
/// Coordinates are rounded to 1e-7°, which is about 1 cm on the ground.
pub const KEY_PRECISION: f64 = 1e7;

/// A position on Earth, in degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,

    #[serde(alias = "lng")]
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another coordinate, in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        earth_distance(self.lat, self.lon, other.lat, other.lon)
    }
}

/// A [Coordinate] on a specific floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(alias = "flr")]
    pub floor: String,

    #[serde(flatten)]
    pub at: Coordinate,
}

impl Location {
    pub fn new(floor: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            floor: floor.into(),
            at: Coordinate::new(lat, lon),
        }
    }

    /// Returns the identity of the graph node at this location.
    pub fn key(&self) -> NodeKey {
        NodeKey::new(&self.floor, self.at)
    }
}

/// Identifies an element of a [Graph].
///
/// Keys are floor-qualified, so the same position on two different floors
/// always results in two distinct nodes. Coordinates are quantized
/// to [KEY_PRECISION] steps per degree; two positions are the same node
/// if and only if they are on the same floor and round to the same steps.
///
/// Keys order by floor, then latitude, then longitude.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey {
    floor: String,
    lat: i64,
    lon: i64,
}

impl NodeKey {
    pub fn new(floor: &str, at: Coordinate) -> Self {
        Self {
            floor: floor.to_string(),
            lat: quantize(at.lat),
            lon: quantize(at.lon),
        }
    }

    /// Returns the floor label of this node.
    pub fn floor(&self) -> &str {
        &self.floor
    }

    /// Returns the quantized position of this node.
    ///
    /// This is not necessarily the exact coordinate of the node,
    /// see [Graph::get_node] for that.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat as f64 / KEY_PRECISION,
            lon: self.lon as f64 / KEY_PRECISION,
        }
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let at = self.coordinate();
        write!(f, "{}@{:.7},{:.7}", self.floor, at.lat, at.lon)
    }
}

#[inline]
fn quantize(degrees: f64) -> i64 {
    (degrees * KEY_PRECISION).round() as i64
}

/// Represents an outgoing connection from a node.
///
/// Graphs built by this crate are undirected: every [Edge]
/// has a counterpart with the same cost in the opposite direction.
///
/// `cost` must not be negative. Due to snapping and stair links,
/// `to` might not exist in a single floor's [Graph]; users must silently ignore such edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: NodeKey,
    pub cost: f64,
}
