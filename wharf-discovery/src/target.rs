//! Discovery contracts — the loadable-repository capability and the
//! collaborator traits that enumerate targets at a location.
//!
//! The resolver consumes both collaborators through these traits only; the
//! mechanics of importing user code or spawning discovery children live in
//! the implementations, outside this workspace.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use wharf_core::{Api, RepositoryName};

use crate::error::{LoadError, RemoteError};
use crate::protocol::{ListTargetsRequest, ListTargetsResponse};

// ---------------------------------------------------------------------------
// Origins
// ---------------------------------------------------------------------------

/// Identity of the code to introspect at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOrigin {
    /// A Python source file (already rebased to the document directory).
    File(PathBuf),
    /// An importable module.
    Module(String),
    /// An installed package.
    Package(String),
}

impl fmt::Display for LoadOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOrigin::File(path) => write!(f, "file {}", path.display()),
            LoadOrigin::Module(module_name) => write!(f, "module {module_name}"),
            LoadOrigin::Package(package_name) => write!(f, "package {package_name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// The loadable-repository capability
// ---------------------------------------------------------------------------

/// Capability satisfied by every object the target loader can hand back:
/// a repository definition that knows its own name.
pub trait LoadableRepository: fmt::Debug {
    /// The name the definition reports about itself — not necessarily the
    /// attribute used to reach it.
    fn self_reported_name(&self) -> RepositoryName;
}

/// A definition found in-process, keyed by the attribute that reaches it.
#[derive(Debug)]
pub struct LoadedSymbol {
    pub attribute: String,
    pub definition: Box<dyn LoadableRepository>,
}

impl LoadedSymbol {
    pub fn new(attribute: impl Into<String>, definition: Box<dyn LoadableRepository>) -> Self {
        Self {
            attribute: attribute.into(),
            definition,
        }
    }

    pub fn into_target(self) -> LoadableTarget {
        LoadableTarget {
            attribute: self.attribute,
            repository_name: self.definition.self_reported_name(),
        }
    }
}

/// The `(attribute, repository_name)` pair produced by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadableTarget {
    /// Attribute used to reach the definition at its origin.
    pub attribute: String,
    /// Identity the definition reports about itself.
    pub repository_name: RepositoryName,
}

impl LoadableTarget {
    pub fn new(attribute: impl Into<String>, repository_name: RepositoryName) -> Self {
        Self {
            attribute: attribute.into(),
            repository_name,
        }
    }
}

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// In-process loader: imports the origin into the host process and
/// introspects it for loadable repository definitions.
pub trait TargetLoader {
    /// Enumerate every definition at `origin` satisfying the
    /// loadable-repository capability.
    fn loadable_targets(
        &self,
        origin: &LoadOrigin,
        working_directory: Option<&Path>,
    ) -> Result<Vec<LoadedSymbol>, LoadError>;

    /// Load exactly the definition bound to `attribute` at `origin`.
    fn load_attribute(
        &self,
        origin: &LoadOrigin,
        attribute: &str,
        working_directory: Option<&Path>,
    ) -> Result<Box<dyn LoadableRepository>, LoadError>;
}

/// Out-of-process lister: spawns the discovery child (plain subprocess or
/// ephemeral gRPC server, per `api`) and asks it for its listing.
///
/// Implementations own the child for the duration of the call only, and
/// tear it down on every exit path — success, failure, or timeout. User
/// code is never imported into the host process through this trait.
pub trait RemoteLister {
    fn list_remote(
        &self,
        executable_path: Option<&Path>,
        request: &ListTargetsRequest,
        api: Api,
    ) -> Result<ListTargetsResponse, RemoteError>;
}
