// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::{Location, DEFAULT_STEP_LIMIT};

/// Floor assumed for positions given without a floor label.
pub const DEFAULT_FLOOR: &str = "Ground";

/// Cost of walking over a [StairLink], unless configured otherwise.
pub const DEFAULT_STAIR_COST: f64 = 2.0;

/// A fixed, bidirectional connection between two floors.
///
/// Stair links are not derived from route data. Both ends are added to their floors' graphs
/// when missing, so a stair end should lie on (or very close to) a drawn corridor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairLink {
    pub bottom: Location,
    pub top: Location,

    #[serde(default = "default_stair_cost")]
    pub cost: f64,
}

impl StairLink {
    /// Creates a vertical stair link between two floors at the same position.
    pub fn vertical(bottom_floor: &str, top_floor: &str, lat: f64, lon: f64) -> Self {
        Self {
            bottom: Location::new(bottom_floor, lat, lon),
            top: Location::new(top_floor, lat, lon),
            cost: DEFAULT_STAIR_COST,
        }
    }
}

/// Additional controls for building floor graphs and finding routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Connections between floors.
    pub stairs: Vec<StairLink>,

    /// Floor of origins given as bare coordinates.
    pub default_floor: String,

    /// See [find_route](crate::find_route).
    pub step_limit: usize,
}

impl Default for Options {
    /// Returns the options of the main campus: two staircases
    /// between the ground and the first floor.
    fn default() -> Self {
        Self {
            stairs: vec![
                StairLink::vertical("Ground", "First", 25.4929, 81.8630),
                StairLink::vertical("Ground", "First", 25.4928, 81.8632),
            ],
            default_floor: DEFAULT_FLOOR.to_string(),
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}

impl Options {
    /// Parses options from JSON. Missing fields take their [default](Options::default) values.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

fn default_stair_cost() -> f64 {
    DEFAULT_STAIR_COST
}
