// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::campus::{
    build_floor_graphs, normalize, ClassroomDirectory, Options, RouteStore, StoreError,
};
use crate::{find_route, snap, Coordinate, FloorGraphs, Location, Route, RouteError};

/// Errors which may occur when handling a navigation request.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// The requested room is not in the [ClassroomDirectory].
    #[error("unknown classroom: {0}")]
    UnknownClassroom(String),

    /// Route data couldn't be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// There is no usable route between the two points.
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Starting point of a navigation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    /// Name of a room from the [ClassroomDirectory] (case-insensitive).
    Classroom(String),

    /// Arbitrary position, e.g. from GPS. Without a floor,
    /// the [default floor](Options::default_floor) is assumed.
    Position {
        at: Coordinate,
        floor: Option<String>,
    },
}

/// Handles navigation requests: resolves rooms, builds floor graphs from a fresh
/// snapshot of route data, snaps both ends onto the graphs and finds the shortest route.
///
/// Nothing is cached between requests, and no state is mutated, so a [Navigator]
/// may be shared between threads whenever its store can.
#[derive(Debug, Clone)]
pub struct Navigator<S> {
    store: S,
    directory: ClassroomDirectory,
    options: Options,
}

impl<S: RouteStore> Navigator<S> {
    pub fn new(store: S, directory: ClassroomDirectory, options: Options) -> Self {
        Self {
            store,
            directory,
            options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn directory(&self) -> &ClassroomDirectory {
        &self.directory
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Finds a room in the [ClassroomDirectory].
    pub fn locate(&self, name: &str) -> Result<&Location, NavigationError> {
        self.directory
            .lookup(name)
            .ok_or_else(|| NavigationError::UnknownClassroom(normalize(name)))
    }

    /// Builds [FloorGraphs] from the current contents of the store.
    pub fn floor_graphs(&self) -> Result<FloorGraphs, NavigationError> {
        let records = self.store.routes()?;
        Ok(build_floor_graphs(&records, &self.options))
    }

    /// Finds the shortest route from the origin to a room.
    pub fn navigate(&self, origin: &Origin, destination: &str) -> Result<Route, NavigationError> {
        let to = self.locate(destination)?.clone();
        let from = self.resolve(origin)?;

        let mut graphs = self.floor_graphs()?;
        let start = snap(&mut graphs, from.at, &from.floor);
        let end = snap(&mut graphs, to.at, &to.floor);

        let route = find_route(&graphs.merge(), &start, &end, self.options.step_limit)?;
        log::debug!(
            "route {} -> {}: {} nodes, {:.1} m",
            start,
            end,
            route.len(),
            route.cost(),
        );
        Ok(route)
    }

    fn resolve(&self, origin: &Origin) -> Result<Location, NavigationError> {
        match origin {
            Origin::Classroom(name) => self.locate(name).cloned(),
            Origin::Position { at, floor } => Ok(Location {
                floor: floor
                    .clone()
                    .unwrap_or_else(|| self.options.default_floor.clone()),
                at: *at,
            }),
        }
    }
}
