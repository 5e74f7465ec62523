// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::NodeKey;

/// Recommended number of allowed node expansions in [find_route](crate::find_route)
/// before [RouteError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Error conditions which may occur during [find_route](crate::find_route).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The start or end nodes don't exist in a graph.
    #[error("invalid node: {0}")]
    InvalidReference(NodeKey),

    /// All nodes reachable from the start were expanded without reaching the end.
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeKey, to: NodeKey },

    /// Route search has exceeded its limit of steps.
    /// Either the nodes are really far apart, or no route exists.
    #[error("step limit exceeded")]
    StepLimitExceeded,
}
