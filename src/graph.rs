// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Coordinate, Edge, NodeKey};
use std::collections::btree_map::{BTreeMap, Entry};

/// Represents a walkable network as a set of nodes, identified by [NodeKeys](NodeKey),
/// and [Edges](Edge) between them.
///
/// Every node remembers the exact [Coordinate] it was created with.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph(BTreeMap<NodeKey, (Coordinate, Vec<Edge>)>);

impl Graph {
    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over all nodes in the graph, in [NodeKey] order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, &Coordinate)> {
        self.0.iter().map(|(key, (at, _))| (key, at))
    }

    /// Returns `true` if a node with the provided key exists.
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.0.contains_key(key)
    }

    /// Retrieves the exact coordinate of a node with the provided key.
    pub fn get_node(&self, key: &NodeKey) -> Option<Coordinate> {
        self.0.get(key).map(|&(at, _)| at)
    }

    /// Creates a node with the provided key, unless it already exists.
    ///
    /// Existing nodes keep their first coordinate and all edges.
    /// Returns `true` if a new node was created.
    pub fn set_node(&mut self, key: NodeKey, at: Coordinate) -> bool {
        match self.0.entry(key) {
            Entry::Vacant(e) => {
                e.insert((at, Vec::default()));
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Finds the closest node to the given position, together with its distance (in meters),
    /// skipping the node with the `except` key.
    ///
    /// This function requires computing the distance to every node in the graph.
    /// On ties, the node with the smallest key wins.
    pub fn find_nearest_node(
        &self,
        at: Coordinate,
        except: Option<&NodeKey>,
    ) -> Option<(NodeKey, f64)> {
        self.0
            .iter()
            .filter(|(key, _)| Some(*key) != except)
            .map(|(key, (node_at, _))| (key, at.distance_to(node_at)))
            .min_by(|(_, a_dist), (_, b_dist)| a_dist.total_cmp(b_dist))
            .map(|(key, dist)| (key.clone(), dist))
    }

    /// Gets all outgoing [Edges](Edge) from a node with a given key.
    pub fn get_edges(&self, from: &NodeKey) -> &[Edge] {
        self.0
            .get(from)
            .map(|(_, e)| e.as_slice())
            .unwrap_or_default()
    }

    /// Gets the cost of an [Edge] from one node to another.
    /// If such an edge doesn't exist, returns [f64::INFINITY].
    pub fn get_edge(&self, from: &NodeKey, to: &NodeKey) -> f64 {
        self.get_edges(from)
            .iter()
            .find_map(|edge| if edge.to == *to { Some(edge.cost) } else { None })
            .unwrap_or(f64::INFINITY)
    }

    /// Creates or updates an [Edge] from a node with a given key.
    /// Does nothing if the `from` node doesn't exist.
    pub fn set_edge(&mut self, from: &NodeKey, edge: Edge) {
        debug_assert!(edge.cost >= 0.0, "negative edge cost: {}", edge.cost);

        if let Some((_, edges)) = self.0.get_mut(from) {
            if let Some(candidate) = edges.iter_mut().find(|e| e.to == edge.to) {
                *candidate = edge;
            } else {
                edges.push(edge);
            }
        }
    }

    /// Creates or updates edges in both directions between two nodes.
    pub fn connect(&mut self, a: &NodeKey, b: &NodeKey, cost: f64) {
        self.set_edge(
            a,
            Edge {
                to: b.clone(),
                cost,
            },
        );
        self.set_edge(
            b,
            Edge {
                to: a.clone(),
                cost,
            },
        );
    }

    /// Moves all nodes from another graph into this one.
    /// Nodes which exist in both graphs are overwritten by the ones from `other`.
    pub fn extend(&mut self, other: Graph) {
        self.0.extend(other.0);
    }
}

/// Collection of per-floor [Graphs](Graph), keyed by floor label.
///
/// Edges crossing floors (stair links) are stored in both floors' graphs,
/// pointing at nodes which only exist in the other floor's graph.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FloorGraphs(BTreeMap<String, Graph>);

impl FloorGraphs {
    /// Returns the number of known floors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no known floors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over all floors and their graphs, in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Graph)> {
        self.0.iter().map(|(floor, g)| (floor.as_str(), g))
    }

    /// Retrieves the graph of a given floor.
    pub fn floor(&self, floor: &str) -> Option<&Graph> {
        self.0.get(floor)
    }

    /// Retrieves the graph of a given floor, creating an empty one if the floor is unknown.
    pub fn floor_mut(&mut self, floor: &str) -> &mut Graph {
        self.0.entry(floor.to_string()).or_default()
    }

    /// Merges all floors into a single [Graph] for cross-floor route finding.
    ///
    /// As [NodeKeys](NodeKey) are floor-qualified, no nodes are lost.
    pub fn merge(self) -> Graph {
        self.0.into_values().fold(Graph::default(), |mut acc, g| {
            acc.extend(g);
            acc
        })
    }
}
