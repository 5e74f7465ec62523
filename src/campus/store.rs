// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::{self, File};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::model::{FeatureCollection, RouteRecord};
use super::DEFAULT_FLOOR;

/// Format of a stored route file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    Unknown,

    /// Force uncompressed JSON
    Json,

    /// Force JSON with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    JsonGz,

    /// Force JSON with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    JsonBz2,
}

impl FileFormat {
    /// Guesses the format from the first bytes of a file.
    pub fn detect(magic: &[u8]) -> Self {
        if magic.starts_with(&[0x1f, 0x8b]) {
            Self::JsonGz
        } else if magic.starts_with(b"BZh") {
            Self::JsonBz2
        } else {
            Self::Json
        }
    }
}

/// Errors which may occur when reading or writing route files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("{0}: {1}")]
    Read(PathBuf, #[source] serde_json::Error),

    #[error("{0}: {1}")]
    Write(PathBuf, #[source] serde_json::Error),

    #[error("{0}: invalid GeoJSON: expected a FeatureCollection")]
    InvalidGeoJson(PathBuf),
}

/// Source of [Route Records](RouteRecord).
///
/// Every call should return a consistent snapshot of all stored floors.
pub trait RouteStore {
    fn routes(&self) -> Result<Vec<RouteRecord>, StoreError>;
}

impl<S: RouteStore + ?Sized> RouteStore for &S {
    fn routes(&self) -> Result<Vec<RouteRecord>, StoreError> {
        (**self).routes()
    }
}

/// [RouteStore] over records kept in memory.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryStore(pub Vec<RouteRecord>);

impl RouteStore for MemoryStore {
    fn routes(&self) -> Result<Vec<RouteRecord>, StoreError> {
        Ok(self.0.clone())
    }
}

/// Parse [Route Records](RouteRecord) from a reader in the provided [FileFormat].
/// A route file holds either a single record, or a list of them.
///
/// The provided stream will be automatically wrapped in a buffered reader when needed.
pub fn records_from_io<R: io::Read>(
    reader: R,
    format: FileFormat,
) -> Result<Vec<RouteRecord>, serde_json::Error> {
    let raw: Value = json_from_io(reader, format)?;
    match raw {
        Value::Array(records) => records.into_iter().map(serde_json::from_value).collect(),
        record => Ok(vec![serde_json::from_value(record)?]),
    }
}

fn json_from_io<T: DeserializeOwned, R: io::Read>(
    reader: R,
    format: FileFormat,
) -> Result<T, serde_json::Error> {
    match format {
        FileFormat::Unknown => {
            let mut b = io::BufReader::new(reader);
            let detected = FileFormat::detect(b.fill_buf().map_err(serde_json::Error::io)?);
            decode_from_io(b, detected)
        }
        _ => decode_from_io(reader, format),
    }
}

fn decode_from_io<T: DeserializeOwned, R: io::Read>(
    reader: R,
    format: FileFormat,
) -> Result<T, serde_json::Error> {
    match format {
        FileFormat::Unknown | FileFormat::Json => serde_json::from_reader(io::BufReader::new(reader)),

        FileFormat::JsonGz => {
            let d = flate2::read::MultiGzDecoder::new(reader);
            serde_json::from_reader(io::BufReader::new(d))
        }

        FileFormat::JsonBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(reader);
            serde_json::from_reader(io::BufReader::new(d))
        }
    }
}

/// Parse [Route Records](RouteRecord) from a file at the provided path, guessing its format.
pub fn records_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<RouteRecord>, StoreError> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| StoreError::Io(path.to_path_buf(), e))?;
    records_from_io(f, FileFormat::Unknown).map_err(|e| StoreError::Read(path.to_path_buf(), e))
}

const EXTENSIONS: &[&str] = &[
    ".json",
    ".geojson",
    ".json.gz",
    ".geojson.gz",
    ".json.bz2",
    ".geojson.bz2",
];

/// [RouteStore] over a directory of (optionally compressed) JSON route files.
///
/// Files are read in name order on every call; other files are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn files(&self) -> Result<Vec<PathBuf>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::Io(self.dir.clone(), e))?;

        let mut files = Vec::default();
        for entry in entries {
            let path = entry
                .map_err(|e| StoreError::Io(self.dir.clone(), e))?
                .path();

            let is_route_file = path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| EXTENSIONS.iter().any(|ext| n.ends_with(ext)));

            if is_route_file {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Stores a GeoJSON floor plan as a new route file, and returns the path of that file.
    ///
    /// The input may either be a bare FeatureCollection, or a `{"floor", "geojson"}` record.
    /// The floor label is taken from the `floor` argument, then from the record,
    /// falling back to [DEFAULT_FLOOR].
    pub fn import<P: AsRef<Path>>(
        &self,
        path: P,
        floor: Option<&str>,
    ) -> Result<PathBuf, StoreError> {
        let path = path.as_ref();
        let read_err = |e: serde_json::Error| StoreError::Read(path.to_path_buf(), e);

        let f = File::open(path).map_err(|e| StoreError::Io(path.to_path_buf(), e))?;
        let raw: Value = json_from_io(f, FileFormat::Unknown).map_err(read_err)?;

        let (record_floor, geojson) = match raw {
            Value::Object(mut obj) if obj.contains_key("geojson") => (
                obj.get("floor").and_then(Value::as_str).map(str::to_string),
                obj.remove("geojson").unwrap_or_default(),
            ),
            other => (None, other),
        };

        if geojson.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(StoreError::InvalidGeoJson(path.to_path_buf()));
        }

        let record = RouteRecord {
            floor: floor
                .map(str::to_string)
                .or(record_floor)
                .unwrap_or_else(|| DEFAULT_FLOOR.to_string()),
            geojson: serde_json::from_value::<FeatureCollection>(geojson).map_err(read_err)?,
        };

        let target = self.next_file_name(&record.floor);
        let write_err = |e: io::Error| StoreError::Io(target.clone(), e);

        let mut w = io::BufWriter::new(File::create(&target).map_err(write_err)?);
        serde_json::to_writer_pretty(&mut w, &record)
            .map_err(|e| StoreError::Write(target.clone(), e))?;
        w.flush().map_err(write_err)?;

        log::info!(
            "imported {} feature(s) of floor {:?} into {}",
            record.geojson.features.len(),
            record.floor,
            target.display(),
        );
        Ok(target)
    }

    fn next_file_name(&self, floor: &str) -> PathBuf {
        let stem: String = floor
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();

        (1..)
            .map(|n| self.dir.join(format!("{stem}-{n}.json")))
            .find(|p| !p.exists())
            .unwrap_or_else(|| self.dir.join(format!("{stem}.json")))
    }
}

impl RouteStore for FileStore {
    fn routes(&self) -> Result<Vec<RouteRecord>, StoreError> {
        let mut records = Vec::default();
        for file in self.files()? {
            let r = records_from_file(&file)?;
            log::debug!("{}: {} record(s)", file.display(), r.len());
            records.extend(r);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &[u8] = include_bytes!("test_fixtures/lhc.json");
    const DATA_GZ: &[u8] = include_bytes!("test_fixtures/lhc.json.gz");

    #[test]
    fn detect() {
        assert_eq!(FileFormat::detect(DATA), FileFormat::Json);
        assert_eq!(FileFormat::detect(DATA_GZ), FileFormat::JsonGz);
        assert_eq!(
            FileFormat::detect(include_bytes!("test_fixtures/lhc.json.bz2")),
            FileFormat::JsonBz2
        );
        assert_eq!(FileFormat::detect(b""), FileFormat::Json);
    }

    #[test]
    fn single_record_file() {
        let data = br#"{"floor": "Second", "geojson": {"type": "FeatureCollection", "features": []}}"#;
        let records = records_from_io(&data[..], FileFormat::Unknown).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].floor, "Second");
    }

    #[test]
    fn file_store_routes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a-ground.json"), DATA).unwrap();
        fs::write(dir.path().join("b-copy.json.gz"), DATA_GZ).unwrap();
        fs::write(dir.path().join("notes.txt"), b"not a route file").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let records = FileStore::new(dir.path()).routes().unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].floor, "Ground");
        assert_eq!(records[1].floor, "First");
        assert_eq!(records[2].floor, "Ground");
    }

    #[test]
    fn file_store_read_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), b"{\"floor\": ").unwrap();

        let err = FileStore::new(dir.path()).routes().unwrap_err();
        assert!(matches!(err, StoreError::Read(ref p, _) if p.ends_with("broken.json")));
    }

    #[test]
    fn read_error_names_field() {
        let data = br#"{"geojson": {"type": "FeatureCollection", "features": []}}"#;
        let err = records_from_io(&data[..], FileFormat::Json).unwrap_err();
        assert!(err.to_string().contains("missing field `floor`"), "{err}");

        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("routes.json"),
            br#"[
                {"floor": "Ground", "geojson": {"type": "FeatureCollection", "features": []}},
                {"floor": "First", "geojson": 42}
            ]"#,
        )
        .unwrap();

        let err = FileStore::new(dir.path()).routes().unwrap_err();
        assert!(matches!(err, StoreError::Read(ref p, _) if p.ends_with("routes.json")));
        assert!(err.to_string().contains("invalid type: integer `42`"), "{err}");
    }

    #[test]
    fn file_store_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileStore::new(dir.path().join("missing")).routes().unwrap_err();
        assert!(matches!(err, StoreError::Io(_, _)));
    }

    #[test]
    fn import_feature_collection() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("first-floor.geojson");
        fs::write(
            &input,
            br#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[81.0, 25.0], [81.0, 25.001]]}}
            ]}"#,
        )
        .unwrap();

        let routes = dir.path().join("routes");
        fs::create_dir(&routes).unwrap();
        let store = FileStore::new(&routes);

        let written = store.import(&input, Some("First")).unwrap();
        assert_eq!(written, routes.join("first-1.json"));
        let written = store.import(&input, Some("First")).unwrap();
        assert_eq!(written, routes.join("first-2.json"));

        let records = store.routes().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].floor, "First");
        assert_eq!(records[0].geojson.features.len(), 1);
    }

    #[test]
    fn import_record() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.json");
        fs::write(
            &input,
            br#"{"floor": "Lower Ground", "geojson": {"type": "FeatureCollection", "features": []}}"#,
        )
        .unwrap();

        let store = FileStore::new(dir.path());
        let written = store.import(&input, None).unwrap();
        assert_eq!(written, dir.path().join("lower_ground-1.json"));
        assert_eq!(records_from_file(&written).unwrap()[0].floor, "Lower Ground");

        let bare = dir.path().join("bare.geojson");
        fs::write(&bare, br#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        let written = store.import(&bare, None).unwrap();
        assert_eq!(records_from_file(&written).unwrap()[0].floor, DEFAULT_FLOOR);
    }

    #[test]
    fn import_bad_features() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sketch.geojson");
        fs::write(
            &input,
            br#"{"type": "FeatureCollection", "features": [
                null,
                {"type": "Feature", "geometry": {"type": 7, "coordinates": []}}
            ]}"#,
        )
        .unwrap();

        let store = FileStore::new(dir.path());
        let written = store.import(&input, Some("Ground")).unwrap();
        assert_eq!(records_from_file(&written).unwrap()[0].geojson.features.len(), 2);
    }

    #[test]
    fn import_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bare.geojson");
        fs::write(&input, br#"{"type": "FeatureCollection", "features": []}"#).unwrap();

        let missing = dir.path().join("missing");
        let err = FileStore::new(&missing).import(&input, None).unwrap_err();
        assert!(matches!(err, StoreError::Io(ref p, _) if p.starts_with(&missing)));
    }

    #[test]
    fn import_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("point.geojson");
        fs::write(
            &input,
            br#"{"floor": "Ground", "geojson": {"type": "Feature", "geometry": null}}"#,
        )
        .unwrap();

        let err = FileStore::new(dir.path()).import(&input, None).unwrap_err();
        assert!(matches!(err, StoreError::InvalidGeoJson(_)));
    }
}
