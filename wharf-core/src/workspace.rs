//! The merged workspace aggregate.
//!
//! A [`Workspace`] is built once per invocation from one or more resolved
//! documents and is immutable thereafter. Handles are keyed by location
//! name; folding a handle under a name already present **overwrites** the
//! earlier one (last-document-wins, not an error).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::UnknownLocationError;
use crate::types::{LocationName, RepositoryLocationHandle};

/// Mapping from location name to its resolved handle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Workspace {
    handles: BTreeMap<LocationName, RepositoryLocationHandle>,
}

impl Workspace {
    /// Fold handles into a workspace, in order. A later handle under an
    /// already-seen location name replaces the earlier one.
    pub fn from_handles(
        handles: impl IntoIterator<Item = RepositoryLocationHandle>,
    ) -> Self {
        let mut map = BTreeMap::new();
        for handle in handles {
            map.insert(handle.location_name.clone(), handle);
        }
        Self { handles: map }
    }

    /// All location names in the workspace, sorted.
    pub fn location_names(&self) -> Vec<LocationName> {
        self.handles.keys().cloned().collect()
    }

    /// Look up the handle for `name`.
    pub fn get_handle(
        &self,
        name: &LocationName,
    ) -> Result<&RepositoryLocationHandle, UnknownLocationError> {
        self.handles.get(name).ok_or_else(|| UnknownLocationError {
            name: name.0.clone(),
        })
    }

    pub fn contains(&self, name: &LocationName) -> bool {
        self.handles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
