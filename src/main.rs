use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use campusnav::campus::{ClassroomDirectory, DirectoryError, FileStore, Options};
use campusnav::{Coordinate, Navigator, Origin};
use clap::{Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum ConfigLoadError {
    #[error("{0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("{0}: {1}")]
    Directory(PathBuf, #[source] DirectoryError),

    #[error("{0}: {1}")]
    Options(PathBuf, #[source] serde_json::Error),
}

#[derive(Parser)]
struct Cli {
    /// The directory with stored route files
    routes: PathBuf,

    /// JSON file with a custom classroom directory
    #[arg(long)]
    classrooms: Option<PathBuf>,

    /// JSON file with stair links and other options
    #[arg(long)]
    options: Option<PathBuf>,

    /// Log debug messages
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the shortest route to a classroom, printed as GeoJSON
    Navigate {
        /// Destination classroom
        #[arg(long)]
        to: String,

        /// Origin classroom
        #[arg(long, conflicts_with_all = ["lat", "lon"], required_unless_present = "lat")]
        from: Option<String>,

        /// Latitude of the origin
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the origin
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Floor of the origin position
        #[arg(long, requires = "lat")]
        floor: Option<String>,
    },

    /// Print the location of a classroom
    Locate { name: String },

    /// Add a GeoJSON floor plan to the route directory
    Import {
        file: PathBuf,

        /// Floor label of the plan
        #[arg(long)]
        floor: Option<String>,
    },

    /// Print the number of nodes on every floor
    Floors,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    colog::default_builder()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let directory = match cli.classrooms {
        Some(ref path) => load_directory(path)?,
        None => ClassroomDirectory::campus(),
    };
    let options = match cli.options {
        Some(ref path) => load_options(path)?,
        None => Options::default(),
    };
    let navigator = Navigator::new(FileStore::new(&cli.routes), directory, options);

    match cli.command {
        Command::Navigate {
            to,
            from,
            lat,
            lon,
            floor,
        } => {
            let origin = match (from, lat, lon) {
                (Some(name), _, _) => Origin::Classroom(name),
                (None, Some(lat), Some(lon)) => Origin::Position {
                    at: Coordinate::new(lat, lon),
                    floor,
                },
                _ => return Err("either --from or --lat and --lon must be provided".into()),
            };

            let route = navigator.navigate(&origin, &to)?;
            println!("{}", serde_json::to_string_pretty(&route.to_geojson())?);
        }

        Command::Locate { name } => {
            let location = navigator.locate(&name)?;
            println!("{}", serde_json::to_string_pretty(location)?);
        }

        Command::Import { file, floor } => {
            let written = navigator.store().import(&file, floor.as_deref())?;
            println!("{}", written.display());
        }

        Command::Floors => {
            for (floor, g) in navigator.floor_graphs()?.iter() {
                println!("{floor}\t{}", g.len());
            }
        }
    }

    Ok(())
}

fn load_directory(path: &Path) -> Result<ClassroomDirectory, ConfigLoadError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(path.to_path_buf(), e))?;
    ClassroomDirectory::from_json(&s).map_err(|e| ConfigLoadError::Directory(path.to_path_buf(), e))
}

fn load_options(path: &Path) -> Result<Options, ConfigLoadError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(path.to_path_buf(), e))?;
    Options::from_json(&s).map_err(|e| ConfigLoadError::Options(path.to_path_buf(), e))
}
