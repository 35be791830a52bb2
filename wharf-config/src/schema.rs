//! Semantic checks on a parsed workspace document.
//!
//! Serde handles the structural layer (tags, field names, types); this
//! module enforces the rules serde cannot express, and is called before any
//! resolution begins.

use std::path::Path;

use wharf_core::Api;

use crate::error::SchemaError;
use crate::model::WorkspaceDocument;

/// The only recognized `opt_in` flag: resolve bare target entries through
/// the gRPC strategy instead of plain subprocess CLI.
pub const GRPC_OPT_IN: &str = "grpc";

/// Validate a document's shape beyond what deserialization enforces.
///
/// A legal document declares the legacy `repository` key, or `load_from`,
/// or both (the legacy key short-circuits `load_from` at resolution time).
pub fn ensure_workspace_document(
    document: &WorkspaceDocument,
    source_path: &Path,
) -> Result<(), SchemaError> {
    if document.repository.is_none() && document.load_from.is_none() {
        return Err(invalid(
            source_path,
            "document must declare either 'repository' (legacy) or 'load_from'",
        ));
    }

    if let Some(legacy) = &document.repository {
        match (&legacy.file, &legacy.module) {
            (Some(_), Some(_)) => {
                return Err(invalid(
                    source_path,
                    "legacy 'repository' must set exactly one of 'file'/'module', not both",
                ));
            }
            (None, None) => {
                return Err(invalid(
                    source_path,
                    "legacy 'repository' must set one of 'file'/'module'",
                ));
            }
            _ => {}
        }
        if document.load_from.is_some() {
            tracing::warn!(
                document = %source_path.display(),
                "legacy 'repository' key present; ignoring 'load_from'",
            );
        }
    }

    Ok(())
}

/// Transport selected by the document's `opt_in` flags.
///
/// Unrecognized flags are tolerated and logged, matching the forgiving
/// behavior expected of feature opt-ins.
pub fn resolved_api(document: &WorkspaceDocument) -> Api {
    let mut api = Api::Cli;
    for flag in &document.opt_in {
        if flag == GRPC_OPT_IN {
            api = Api::Grpc;
        } else {
            tracing::warn!(flag = %flag, "ignoring unrecognized opt_in flag");
        }
    }
    api
}

fn invalid(source_path: &Path, reason: &str) -> SchemaError {
    SchemaError::Invalid {
        path: source_path.to_path_buf(),
        reason: reason.to_string(),
    }
}
