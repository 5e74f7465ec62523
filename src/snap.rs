// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Coordinate, FloorGraphs, NodeKey};

/// Makes an arbitrary position reachable within a floor's graph,
/// and returns the [NodeKey] under which it can be found.
///
/// A new node is created and connected with the closest existing node
/// on the same floor (on ties, the one with the smallest key). If the floor is unknown,
/// an empty graph is created for it and the new node stays isolated.
///
/// If the position is already a node of the floor graph, that node is returned as-is.
///
/// Snapped nodes are meant to live only as long as a single route search;
/// the graphs should be rebuilt afterwards.
pub fn snap(graphs: &mut FloorGraphs, at: Coordinate, floor: &str) -> NodeKey {
    let g = graphs.floor_mut(floor);
    let key = NodeKey::new(floor, at);

    if !g.set_node(key.clone(), at) {
        log::debug!("{key} is already part of the graph");
        return key;
    }

    match g.find_nearest_node(at, Some(&key)) {
        Some((nearest, distance)) => {
            log::debug!("snapped {key} to {nearest} ({distance:.1} m)");
            g.connect(&key, &nearest, distance);
        }
        None => log::warn!("floor {floor:?} has no nodes to snap {key} to"),
    }

    key
}
