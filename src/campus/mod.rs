// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Campus data: stored floor plans, stair links and the classroom directory,
//! and conversion of floor plans into [FloorGraphs](crate::FloorGraphs).

mod builder;
mod directory;
mod model;
mod options;
mod store;

pub use builder::{build_floor_graphs, GraphBuilder};
pub use directory::{normalize, ClassroomDirectory, DirectoryError};
pub use model::{parse_positions, Feature, FeatureCollection, Geometry, RouteRecord};
pub use options::{Options, StairLink, DEFAULT_FLOOR, DEFAULT_STAIR_COST};
pub use store::{
    records_from_file, records_from_io, FileFormat, FileStore, MemoryStore, RouteStore,
    StoreError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, FloorGraphs, NodeKey};

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-4),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    const DATA: &[u8] = include_bytes!("test_fixtures/lhc.json");

    fn key(floor: &str, lat: f64, lon: f64) -> NodeKey {
        NodeKey::new(floor, Coordinate::new(lat, lon))
    }

    fn record(floor: &str, line: &[(f64, f64)]) -> RouteRecord {
        let coords: Vec<Coordinate> = line
            .iter()
            .map(|&(lat, lon)| Coordinate::new(lat, lon))
            .collect();
        RouteRecord {
            floor: floor.to_string(),
            geojson: FeatureCollection {
                features: vec![Feature {
                    geometry: Some(Geometry::line_string(&coords)),
                    ..Default::default()
                }],
                ..Default::default()
            },
        }
    }

    fn no_stairs() -> Options {
        Options {
            stairs: vec![],
            ..Default::default()
        }
    }

    fn check_lhc_graphs(graphs: &FloorGraphs) {
        //  Ground             First
        //
        //  G3 ──── stair ──── F3        (25.4929, 81.8630)
        //  │                  │
        //  G2                 F2        (25.4925, 81.8626)
        //  │                  │
        //  G1                 F1        (25.4917, 81.8622)
        //
        //  G4 ──── stair ──── F4        (25.4928, 81.8632), not drawn

        assert_eq!(graphs.len(), 2);

        let ground = graphs.floor("Ground").unwrap();
        let first = graphs.floor("First").unwrap();
        assert_eq!(ground.len(), 4);
        assert_eq!(first.len(), 4);

        let g1 = key("Ground", 25.4917, 81.8622);
        let g2 = key("Ground", 25.4925, 81.8626);
        let g3 = key("Ground", 25.4929, 81.8630);
        let g4 = key("Ground", 25.4928, 81.8632);
        let f3 = key("First", 25.4929, 81.8630);
        let f4 = key("First", 25.4928, 81.8632);

        // Check edge costs
        assert_almost_eq!(ground.get_edge(&g1, &g2), 97.5961);
        assert_eq!(ground.get_edge(&g1, &g2), ground.get_edge(&g2, &g1));
        assert_almost_eq!(ground.get_edge(&g2, &g3), 59.9176);
        assert!(ground.get_edge(&g1, &g3).is_infinite());

        // Check stair links
        assert_eq!(ground.get_edge(&g3, &f3), DEFAULT_STAIR_COST);
        assert_eq!(first.get_edge(&f3, &g3), DEFAULT_STAIR_COST);
        assert_eq!(ground.get_edges(&g4).len(), 1);
        assert_eq!(ground.get_edge(&g4, &f4), DEFAULT_STAIR_COST);
        assert_eq!(first.get_edge(&f4, &g4), DEFAULT_STAIR_COST);
    }

    #[test]
    fn test_build_graph_json() {
        let records = records_from_io(DATA, FileFormat::Json).unwrap();
        assert_eq!(records.len(), 2);

        check_lhc_graphs(&build_floor_graphs(&records, &Options::default()));
    }

    #[test]
    fn test_build_graph_gz() {
        const DATA: &[u8] = include_bytes!("test_fixtures/lhc.json.gz");
        let records = records_from_io(DATA, FileFormat::Unknown).unwrap();
        check_lhc_graphs(&build_floor_graphs(&records, &Options::default()));
    }

    #[test]
    fn test_build_graph_bz2() {
        const DATA: &[u8] = include_bytes!("test_fixtures/lhc.json.bz2");
        let records = records_from_io(DATA, FileFormat::JsonBz2).unwrap();
        check_lhc_graphs(&build_floor_graphs(&records, &Options::default()));
    }

    #[test]
    fn test_single_segment() {
        let a = Coordinate::new(25.4917, 81.8622);
        let b = Coordinate::new(25.4925, 81.8626);
        let graphs = build_floor_graphs(
            &[record("Ground", &[(a.lat, a.lon), (b.lat, b.lon)])],
            &no_stairs(),
        );

        let g = graphs.floor("Ground").unwrap();
        assert_eq!(g.len(), 2);

        let a_key = NodeKey::new("Ground", a);
        let b_key = NodeKey::new("Ground", b);
        assert_eq!(g.get_edges(&a_key).len(), 1);
        assert_eq!(g.get_edges(&b_key).len(), 1);
        assert_eq!(g.get_edge(&a_key, &b_key), a.distance_to(&b));
        assert_eq!(g.get_edge(&b_key, &a_key), a.distance_to(&b));
    }

    #[test]
    fn test_shared_nodes_across_records() {
        let graphs = build_floor_graphs(
            &[
                record("Ground", &[(0.0, 0.0), (0.0, 0.001)]),
                record("Ground", &[(0.0, 0.001), (0.001, 0.001)]),
            ],
            &no_stairs(),
        );

        let g = graphs.floor("Ground").unwrap();
        assert_eq!(g.len(), 3);
        assert_eq!(g.get_edges(&key("Ground", 0.0, 0.001)).len(), 2);
    }

    #[test]
    fn test_malformed_geometry() {
        let raw = serde_json::json!([
            {"floor": "Ground", "geojson": {"type": "FeatureCollection", "features": null}},
            {"floor": "First", "geojson": {"type": "FeatureCollection", "features": [
                {"geometry": null},
                {"geometry": {"type": "Point", "coordinates": [81.0, 25.0]}},
                {"geometry": {"type": "LineString", "coordinates": [[81.0, 25.0]]}},
                {"geometry": {"type": "LineString", "coordinates": [[81.0, 25.0], ["x", 25.1]]}},
                {"geometry": {"type": "LineString", "coordinates": "nope"}},
                null,
                {"geometry": {"coordinates": [[82.0, 26.0], [82.0, 26.001]]}},
                {"geometry": {"type": 7, "coordinates": [[82.0, 26.0], [82.0, 26.001]]}},
                {"type": "Feature", "properties": {"name": "corridor"}, "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [[[81.0, 25.0], [81.0, 25.001]], [[81.0, 25.001], [81.001, 25.001]]]
                }}
            ]}}
        ]);
        let records: Vec<RouteRecord> = serde_json::from_value(raw).unwrap();
        let options = no_stairs();
        let graphs = build_floor_graphs(&records, &options);

        assert_eq!(graphs.len(), 2);
        assert!(graphs.floor("Ground").unwrap().is_empty());

        let first = graphs.floor("First").unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first.get_edges(&key("First", 25.001, 81.0)).len(), 2);
        assert!(!first.contains(&key("First", 26.0, 82.0)));

        let mut builder = GraphBuilder::new(&options);
        records.iter().for_each(|r| builder.add_record(r));
        // short line, non-numeric position, missing type, non-string type
        assert_eq!(builder.skipped_lines(), 4);
    }

    #[test]
    fn test_bad_feature_keeps_file_usable() {
        let data = br#"{"floor": "Ground", "geojson": {"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[81.0, 25.0], [81.0, 25.001]]}},
            {"type": "Feature", "geometry": {"coordinates": [[82.0, 26.0], [82.0, 26.001]]}},
            null
        ]}}"#;
        let records = records_from_io(&data[..], FileFormat::Unknown).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].geojson.features.len(), 3);

        let graphs = build_floor_graphs(&records, &no_stairs());
        assert_eq!(graphs.floor("Ground").unwrap().len(), 2);
    }

    #[test]
    fn test_stairs_on_missing_floor() {
        let options = Options {
            stairs: vec![StairLink::vertical("First", "Second", 0.0, 0.001)],
            ..Default::default()
        };
        let graphs = build_floor_graphs(&[record("First", &[(0.0, 0.0), (0.0, 0.001)])], &options);

        let second = graphs.floor("Second").unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(
            second.get_edge(&key("Second", 0.0, 0.001), &key("First", 0.0, 0.001)),
            DEFAULT_STAIR_COST
        );
        assert_eq!(
            graphs
                .floor("First")
                .unwrap()
                .get_edges(&key("First", 0.0, 0.001))
                .len(),
            2
        );
    }
}
