// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde_json::{json, Value};

use crate::{Coordinate, NodeKey};

/// Result of a successful [find_route](crate::find_route) call:
/// a sequence of nodes from the start to the end (inclusive).
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    keys: Vec<NodeKey>,
    coordinates: Vec<Coordinate>,
    cost: f64,
}

/// Maximal part of a [Route] which stays on a single floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub floor: String,
    pub coordinates: Vec<Coordinate>,
}

impl Route {
    pub(crate) fn new(keys: Vec<NodeKey>, coordinates: Vec<Coordinate>, cost: f64) -> Self {
        debug_assert_eq!(keys.len(), coordinates.len());
        Self {
            keys,
            coordinates,
            cost,
        }
    }

    /// Returns the number of nodes on the route.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Routes returned by [find_route](crate::find_route) always contain at least their start.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[NodeKey] {
        &self.keys
    }

    /// Exact coordinates of the nodes on the route.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Total cost of the route, in meters. Stair links count with their configured cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Splits the route into [Legs](Leg), one per continuous stay on a floor.
    pub fn legs(&self) -> Vec<Leg> {
        let mut legs: Vec<Leg> = Vec::default();

        for (key, &at) in self.keys.iter().zip(&self.coordinates) {
            match legs.last_mut() {
                Some(leg) if leg.floor == key.floor() => leg.coordinates.push(at),
                _ => legs.push(Leg {
                    floor: key.floor().to_string(),
                    coordinates: vec![at],
                }),
            }
        }

        legs
    }

    /// Returns the route as `[lat, lon]` pairs.
    pub fn path(&self) -> Vec<[f64; 2]> {
        self.coordinates.iter().map(|c| [c.lat, c.lon]).collect()
    }

    /// Converts the route into a GeoJSON FeatureCollection,
    /// with one LineString feature per [Leg].
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .legs()
            .into_iter()
            .map(|leg| {
                let coordinates: Vec<[f64; 2]> =
                    leg.coordinates.iter().map(|c| [c.lon, c.lat]).collect();
                json!({
                    "type": "Feature",
                    "properties": { "floor": leg.floor },
                    "geometry": {
                        "type": "LineString",
                        "coordinates": coordinates,
                    },
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "properties": { "cost": self.cost },
            "features": features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Route {
        let at = [
            ("Ground", 25.4917, 81.8622),
            ("Ground", 25.4929, 81.8630),
            ("First", 25.4929, 81.8630),
            ("First", 25.4917, 81.8622),
        ];

        let coordinates: Vec<Coordinate> = at
            .iter()
            .map(|&(_, lat, lon)| Coordinate::new(lat, lon))
            .collect();
        let keys = at
            .iter()
            .zip(&coordinates)
            .map(|(&(floor, _, _), &c)| NodeKey::new(floor, c))
            .collect();

        Route::new(keys, coordinates, 313.46)
    }

    #[test]
    fn legs() {
        let legs = route().legs();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].floor, "Ground");
        assert_eq!(legs[0].coordinates.len(), 2);
        assert_eq!(legs[1].floor, "First");
        assert_eq!(legs[1].coordinates[1], Coordinate::new(25.4917, 81.8622));
    }

    #[test]
    fn geojson() {
        let g = route().to_geojson();
        assert_eq!(g["type"], "FeatureCollection");
        assert_eq!(g["features"].as_array().unwrap().len(), 2);
        assert_eq!(g["features"][1]["properties"]["floor"], "First");
        assert_eq!(
            g["features"][0]["geometry"]["coordinates"][0],
            json!([81.8622, 25.4917])
        );
    }

    #[test]
    fn path() {
        assert_eq!(route().path()[0], [25.4917, 81.8622]);
    }
}
