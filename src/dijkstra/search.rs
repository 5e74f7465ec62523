// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::{Coordinate, Edge, Graph, NodeKey, Route, RouteError};

#[derive(Debug, Clone)]
struct QueueItem {
    at: NodeKey,
    position: Coordinate,
    cost: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower costs (and then lower keys) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.at.cmp(&self.at))
    }
}

fn reconstruct_route(
    came_from: &HashMap<NodeKey, (NodeKey, Coordinate)>,
    last: QueueItem,
) -> Route {
    let mut keys = vec![last.at.clone()];
    let mut coordinates = vec![last.position];

    let mut at = last.at;
    while let Some((nd, position)) = came_from.get(&at) {
        keys.push(nd.clone());
        coordinates.push(*position);
        at = nd.clone();
    }

    keys.reverse();
    coordinates.reverse();
    return Route::new(keys, coordinates, last.cost);
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the shortest route between two nodes in the provided graph.
///
/// Nodes are expanded in order of their tentative cost; nodes with equal cost
/// are expanded in [NodeKey] order. A predecessor is only replaced by a strictly
/// cheaper one, so among equally short routes the one discovered first is returned.
///
/// Returns [RouteError::NoRoute] if the end is unreachable from the start.
///
/// `step_limit` limits how many nodes may be expanded during the search
/// before returning [RouteError::StepLimitExceeded]. The recommended value is
/// [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
pub fn find_route(
    g: &Graph,
    from: &NodeKey,
    to: &NodeKey,
    step_limit: usize,
) -> Result<Route, RouteError> {
    let Some(start) = g.get_node(from) else {
        return Err(RouteError::InvalidReference(from.clone()));
    };
    if !g.contains(to) {
        return Err(RouteError::InvalidReference(to.clone()));
    }

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<NodeKey, (NodeKey, Coordinate)> = HashMap::default();
    let mut known_costs: HashMap<NodeKey, f64> = HashMap::default();
    let mut steps: usize = 0;

    queue.push(QueueItem {
        at: from.clone(),
        position: start,
        cost: 0.0,
    });
    known_costs.insert(from.clone(), 0.0);

    while let Some(item) = queue.pop() {
        // We might keep multiple items in the queue for the same node; skip the outdated ones.
        if item.cost > known_costs.get(&item.at).cloned().unwrap_or(f64::INFINITY) {
            continue;
        }

        if item.at == *to {
            return Ok(reconstruct_route(&came_from, item));
        }

        steps += 1;
        if steps > step_limit {
            return Err(RouteError::StepLimitExceeded);
        }

        for Edge {
            to: neighbor,
            cost: edge_cost,
        } in g.get_edges(&item.at)
        {
            // Edges to nodes outside of the graph are ignored
            let Some(neighbor_position) = g.get_node(neighbor) else {
                continue;
            };

            // Check if this is the cheapest way to the neighbor
            let neighbor_cost = item.cost + edge_cost;
            if neighbor_cost
                >= known_costs
                    .get(neighbor)
                    .cloned()
                    .unwrap_or(f64::INFINITY)
            {
                continue;
            }

            // Push the new item into the queue
            came_from.insert(neighbor.clone(), (item.at.clone(), item.position));
            known_costs.insert(neighbor.clone(), neighbor_cost);
            queue.push(QueueItem {
                at: neighbor.clone(),
                position: neighbor_position,
                cost: neighbor_cost,
            });
        }
    }

    return Err(RouteError::NoRoute {
        from: from.clone(),
        to: to.clone(),
    });
}
