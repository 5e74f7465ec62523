// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Coordinate, Edge, FloorGraphs, NodeKey};

use super::model::{self, RouteRecord};
use super::{Options, StairLink};

/// Helper object used for storing state related to converting [Route Records](RouteRecord)
/// into [FloorGraphs].
pub struct GraphBuilder<'a> {
    graphs: FloorGraphs,
    options: &'a Options,
    skipped_lines: usize,
}

impl<'a> GraphBuilder<'a> {
    /// Create a new, empty graph builder.
    pub fn new(options: &'a Options) -> Self {
        Self {
            graphs: FloorGraphs::default(),
            options,
            skipped_lines: 0,
        }
    }

    /// Add all lines from a [RouteRecord] to its floor's graph.
    ///
    /// The floor graph is created even if the record has no usable lines.
    pub fn add_record(&mut self, record: &RouteRecord) {
        self.graphs.floor_mut(&record.floor);

        for (idx, feature) in record.geojson.features.iter().enumerate() {
            let Some(ref geometry) = feature.geometry else {
                log::debug!("{}: feature {} has no geometry", record.floor, idx);
                continue;
            };

            if !geometry.has_type() {
                log::warn!(
                    "{}: feature {} has a geometry without a type - skipping",
                    record.floor,
                    idx,
                );
                self.skipped_lines += 1;
                continue;
            }

            for positions in geometry.lines() {
                match model::parse_positions(positions) {
                    Some(line) => self.add_line(&record.floor, &line),
                    None => {
                        log::warn!(
                            "{}: feature {} has malformed positions - skipping line",
                            record.floor,
                            idx,
                        );
                        self.skipped_lines += 1;
                    }
                }
            }
        }
    }

    /// Connects every pair of consecutive coordinates of a line
    /// with edges weighted by their distance.
    pub fn add_line(&mut self, floor: &str, line: &[Coordinate]) {
        if line.len() < 2 {
            log::debug!("{}: line with {} position(s) - skipping", floor, line.len());
            self.skipped_lines += 1;
            return;
        }

        let g = self.graphs.floor_mut(floor);
        line.windows(2).for_each(|pair| {
            let left = NodeKey::new(floor, pair[0]);
            let right = NodeKey::new(floor, pair[1]);
            if left == right {
                return;
            }

            g.set_node(left.clone(), pair[0]);
            g.set_node(right.clone(), pair[1]);

            let cost = pair[0].distance_to(&pair[1]);
            g.connect(&left, &right, cost);
        });
    }

    /// Returns how many lines were skipped so far because of malformed geometry.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    fn add_stairs(&mut self) {
        for stair in &self.options.stairs {
            self.add_stair(stair);
        }
    }

    fn add_stair(&mut self, stair: &StairLink) {
        let bottom = stair.bottom.key();
        let top = stair.top.key();

        for (end, other) in [(&stair.bottom, &top), (&stair.top, &bottom)] {
            if self.graphs.floor(&end.floor).is_none() {
                log::warn!("stair link references floor {:?} without routes", end.floor);
            }

            let g = self.graphs.floor_mut(&end.floor);
            g.set_node(end.key(), end.at);
            g.set_edge(
                &end.key(),
                Edge {
                    to: other.clone(),
                    cost: stair.cost,
                },
            );
        }
    }

    /// Applies the configured [stair links](StairLink) and returns the built graphs.
    pub fn finish(mut self) -> FloorGraphs {
        self.add_stairs();

        if self.skipped_lines > 0 {
            log::warn!("skipped {} malformed line(s)", self.skipped_lines);
        }
        for (floor, g) in self.graphs.iter() {
            log::debug!("floor {:?}: {} nodes", floor, g.len());
        }

        self.graphs
    }
}

/// Converts all [Route Records](RouteRecord) into one graph per floor,
/// with floors joined by the [stair links](StairLink) from the [Options].
///
/// Malformed geometry never results in an error; it simply contributes no edges.
pub fn build_floor_graphs(records: &[RouteRecord], options: &Options) -> FloorGraphs {
    let mut builder = GraphBuilder::new(options);
    for record in records {
        builder.add_record(record);
    }
    builder.finish()
}
