// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod error;
mod route;
mod search;

pub use error::{RouteError, DEFAULT_STEP_LIMIT};
pub use route::{Leg, Route};
pub use search::find_route;
