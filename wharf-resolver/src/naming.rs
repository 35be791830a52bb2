//! Location naming rules.
//!
//! Explicit names always win and are returned unchecked — collisions across
//! sibling locations are resolved later by the merger's overwrite rule.

use wharf_core::{GrpcEndpoint, LocationName, RepositoryPointers};

use crate::error::ResolveError;

/// Assign the final name for a resolved location.
///
/// Without an explicit name, a location hosting exactly one repository is
/// named after that repository; hosting more than one is an error the user
/// must resolve by supplying `location_name`.
pub fn assign_location_name(
    explicit: Option<&str>,
    repositories: &RepositoryPointers,
) -> Result<LocationName, ResolveError> {
    if let Some(name) = explicit {
        return Ok(LocationName::from(name));
    }

    let mut names = repositories.keys();
    match (names.next(), names.next()) {
        (Some(only), None) => Ok(LocationName::from(only.0.as_str())),
        _ => Err(ResolveError::AmbiguousLocationName {
            names: repositories.keys().map(|name| name.0.clone()).collect(),
        }),
    }
}

/// Synthesized name for unnamed gRPC server entries:
/// `grpc:{host}:{socket_or_port}`.
pub fn grpc_location_name(host: &str, endpoint: &GrpcEndpoint) -> LocationName {
    LocationName(format!("grpc:{host}:{endpoint}"))
}
