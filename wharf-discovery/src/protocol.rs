//! Wire shapes for the remote-lister boundary.
//!
//! The resolver and the discovery child exchange one request and one
//! response per enumeration, serialized by the lister implementation
//! (JSON over a subprocess pipe, or the equivalent gRPC messages). Both
//! transports share these shapes so strategy selection stays a pure
//! configuration decision.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use wharf_core::RepositoryName;

use crate::target::{LoadOrigin, LoadableTarget};

/// Request: the target descriptor to enumerate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTargetsRequest {
    pub origin: LoadOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<PathBuf>,
}

impl ListTargetsRequest {
    pub fn new(origin: LoadOrigin, working_directory: Option<PathBuf>) -> Self {
        Self {
            origin,
            working_directory,
        }
    }
}

/// Response: every repository symbol visible at the requested origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTargetsResponse {
    pub symbols: Vec<TargetSymbol>,
}

/// One repository symbol reported by the remote side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSymbol {
    pub attribute: String,
    pub repository_name: RepositoryName,
}

impl From<TargetSymbol> for LoadableTarget {
    fn from(symbol: TargetSymbol) -> Self {
        LoadableTarget {
            attribute: symbol.attribute,
            repository_name: symbol.repository_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_json_shape() {
        let request = ListTargetsRequest::new(
            LoadOrigin::Module("pkg.repo".to_string()),
            None,
        );
        let encoded = serde_json::to_string(&request).expect("encode");
        assert_eq!(encoded, r#"{"origin":{"module":"pkg.repo"}}"#);
    }

    #[test]
    fn response_roundtrips_symbol_names() {
        let payload = r#"{"symbols":[{"attribute":"make_repo","repository_name":"prod"}]}"#;
        let response: ListTargetsResponse = serde_json::from_str(payload).expect("decode");
        assert_eq!(response.symbols.len(), 1);

        let target = LoadableTarget::from(response.symbols[0].clone());
        assert_eq!(target.attribute, "make_repo");
        assert_eq!(target.repository_name, RepositoryName::from("prod"));
    }

    #[test]
    fn request_includes_working_directory_when_set() {
        let request = ListTargetsRequest::new(
            LoadOrigin::File(PathBuf::from("/ws/repo.py")),
            Some(PathBuf::from("/ws")),
        );
        let encoded = serde_json::to_string(&request).expect("encode");
        assert!(encoded.contains("working_directory"));
        assert!(encoded.contains("/ws/repo.py"));
    }
}
