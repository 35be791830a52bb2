//! Discovery orchestration — local vs remote enumeration, and the
//! explicit-attribute fast path.
//!
//! Both entry points share the contract: an explicit `attribute` skips
//! enumeration entirely and yields exactly one target; without one, the
//! collaborator enumerates the origin and zero results is an error.

use std::path::Path;

use wharf_core::{Api, RepositoryName};

use crate::error::DiscoveryError;
use crate::protocol::ListTargetsRequest;
use crate::target::{LoadOrigin, LoadableTarget, LoadedSymbol, RemoteLister, TargetLoader};

/// Enumerate loadable targets in-process.
///
/// With an explicit `attribute`, exactly that definition is loaded and its
/// self-reported name becomes the target's repository name.
pub fn local_loadable_targets(
    loader: &dyn TargetLoader,
    origin: &LoadOrigin,
    attribute: Option<&str>,
    working_directory: Option<&Path>,
) -> Result<Vec<LoadableTarget>, DiscoveryError> {
    if let Some(attribute) = attribute {
        let definition = loader.load_attribute(origin, attribute, working_directory)?;
        return Ok(vec![LoadableTarget::new(
            attribute,
            definition.self_reported_name(),
        )]);
    }

    let symbols = loader.loadable_targets(origin, working_directory)?;
    if symbols.is_empty() {
        return Err(DiscoveryError::NoLoadableTargets {
            origin: origin.to_string(),
        });
    }
    tracing::debug!(origin = %origin, count = symbols.len(), "enumerated targets in-process");
    Ok(symbols.into_iter().map(LoadedSymbol::into_target).collect())
}

/// Enumerate loadable targets across a process boundary.
///
/// With an explicit `attribute`, no child is spawned: a single target is
/// synthesized whose repository name is the attribute itself, and the
/// remote side validates the resulting pointer lazily on first use.
pub fn remote_loadable_targets(
    lister: &dyn RemoteLister,
    executable_path: Option<&Path>,
    origin: &LoadOrigin,
    attribute: Option<&str>,
    working_directory: Option<&Path>,
    api: Api,
) -> Result<Vec<LoadableTarget>, DiscoveryError> {
    if let Some(attribute) = attribute {
        return Ok(vec![LoadableTarget::new(
            attribute,
            RepositoryName::from(attribute),
        )]);
    }

    let request = ListTargetsRequest::new(origin.clone(), working_directory.map(Path::to_path_buf));
    let response = lister.list_remote(executable_path, &request, api)?;
    if response.symbols.is_empty() {
        return Err(DiscoveryError::NoLoadableTargets {
            origin: origin.to_string(),
        });
    }
    tracing::debug!(
        origin = %origin,
        count = response.symbols.len(),
        api = %api,
        "enumerated targets across process boundary",
    );
    Ok(response
        .symbols
        .into_iter()
        .map(LoadableTarget::from)
        .collect())
}
