//! Domain types for wharf repository locations.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. All types are serializable/deserializable via serde.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pointer::CodePointer;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a resolved repository location.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LocationName(pub String);

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for LocationName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LocationName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The name a repository definition reports about itself.
///
/// Distinct from the attribute used to reach the definition — the two often
/// coincide but may differ.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RepositoryName(pub String);

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepositoryName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepositoryName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Transport used to reach repositories living outside the host process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Api {
    /// Spawn-and-wait subprocess invocation.
    #[default]
    Cli,
    /// Round-trip to an ephemeral gRPC server.
    Grpc,
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Api::Cli => write!(f, "cli"),
            Api::Grpc => write!(f, "grpc"),
        }
    }
}

/// Address of an already-running gRPC repository server.
///
/// Exactly one of the two forms exists per server entry; the configuration
/// layer rejects entries that set both or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrpcEndpoint {
    Port(u16),
    Socket(String),
}

impl fmt::Display for GrpcEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrpcEndpoint::Port(port) => port.fmt(f),
            GrpcEndpoint::Socket(socket) => socket.fmt(f),
        }
    }
}

// ---------------------------------------------------------------------------
// Location handles
// ---------------------------------------------------------------------------

/// Mapping from repository name to the pointer that loads it at a location.
pub type RepositoryPointers = BTreeMap<RepositoryName, CodePointer>;

/// How a resolved location is reached, with strategy-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationStrategy {
    /// Legacy single-repository documents; code loads into the host process.
    InProcess { repositories: RepositoryPointers },
    /// A bare target reached through a child process; `api` selects the
    /// CLI or gRPC transport.
    OutOfProcess {
        api: Api,
        repositories: RepositoryPointers,
    },
    /// A target evaluated inside a named Python environment, never in the
    /// host's own interpreter.
    PythonEnvironment {
        /// Absolute path to the environment's interpreter executable.
        executable_path: PathBuf,
        api: Api,
        repositories: RepositoryPointers,
    },
    /// A persistent gRPC server assumed to be already running. The
    /// repository mapping is populated by a later connection handshake.
    GrpcServer { host: String, endpoint: GrpcEndpoint },
}

impl LocationStrategy {
    /// Short tag for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            LocationStrategy::InProcess { .. } => "in_process",
            LocationStrategy::OutOfProcess { .. } => "out_of_process",
            LocationStrategy::PythonEnvironment { .. } => "python_environment",
            LocationStrategy::GrpcServer { .. } => "grpc_server",
        }
    }
}

/// A resolved repository location: a unique name plus the strategy and
/// payload needed to reach every repository hosted there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryLocationHandle {
    pub location_name: LocationName,
    pub strategy: LocationStrategy,
}

impl RepositoryLocationHandle {
    pub fn new(location_name: LocationName, strategy: LocationStrategy) -> Self {
        Self {
            location_name,
            strategy,
        }
    }

    /// The repository pointer mapping, if the strategy carries one.
    ///
    /// `GrpcServer` handles return `None` — their mapping is only known
    /// after connecting.
    pub fn repositories(&self) -> Option<&RepositoryPointers> {
        match &self.strategy {
            LocationStrategy::InProcess { repositories }
            | LocationStrategy::OutOfProcess { repositories, .. }
            | LocationStrategy::PythonEnvironment { repositories, .. } => Some(repositories),
            LocationStrategy::GrpcServer { .. } => None,
        }
    }

    /// Names of the repositories visible at this location (empty for gRPC
    /// server handles).
    pub fn repository_names(&self) -> Vec<RepositoryName> {
        self.repositories()
            .map(|repositories| repositories.keys().cloned().collect())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::CodePointer;

    #[test]
    fn newtype_display() {
        assert_eq!(LocationName::from("prod").to_string(), "prod");
        assert_eq!(RepositoryName::from("etl").to_string(), "etl");
    }

    #[test]
    fn newtype_equality() {
        let a = LocationName::from("x");
        let b = LocationName::from(String::from("x"));
        assert_eq!(a, b);
    }

    #[test]
    fn grpc_endpoint_display() {
        assert_eq!(GrpcEndpoint::Port(4000).to_string(), "4000");
        assert_eq!(
            GrpcEndpoint::Socket("/tmp/wharf.sock".to_string()).to_string(),
            "/tmp/wharf.sock"
        );
    }

    #[test]
    fn handle_repositories_by_strategy() {
        let pointer = CodePointer::from_module("pkg.repo", "make_repo").expect("pointer");
        let mut repositories = RepositoryPointers::new();
        repositories.insert(RepositoryName::from("etl"), pointer);

        let out_of_process = RepositoryLocationHandle::new(
            LocationName::from("etl"),
            LocationStrategy::OutOfProcess {
                api: Api::Cli,
                repositories: repositories.clone(),
            },
        );
        assert_eq!(
            out_of_process.repository_names(),
            vec![RepositoryName::from("etl")]
        );

        let grpc = RepositoryLocationHandle::new(
            LocationName::from("grpc:localhost:4000"),
            LocationStrategy::GrpcServer {
                host: "localhost".to_string(),
                endpoint: GrpcEndpoint::Port(4000),
            },
        );
        assert!(grpc.repositories().is_none());
        assert!(grpc.repository_names().is_empty());
    }

    #[test]
    fn strategy_kind_labels() {
        let strategy = LocationStrategy::GrpcServer {
            host: "localhost".to_string(),
            endpoint: GrpcEndpoint::Port(4000),
        };
        assert_eq!(strategy.kind(), "grpc_server");
    }
}
