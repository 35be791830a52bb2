//! Test doubles for the discovery collaborators.
//!
//! Each stub serves a fixed `(attribute, repository_name)` table and counts
//! invocations, so tests can assert that discovery was — or was not —
//! performed. Shared by this crate's unit tests and the resolver's
//! integration tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use wharf_core::{Api, RepositoryName};

use crate::error::{LoadError, RemoteError};
use crate::protocol::{ListTargetsRequest, ListTargetsResponse, TargetSymbol};
use crate::target::{LoadOrigin, LoadableRepository, LoadedSymbol, RemoteLister, TargetLoader};

/// A fixed repository definition with a self-reported name.
#[derive(Debug, Clone)]
pub struct StubRepository {
    name: RepositoryName,
}

impl StubRepository {
    pub fn named(name: &str) -> Self {
        Self {
            name: RepositoryName::from(name),
        }
    }
}

impl LoadableRepository for StubRepository {
    fn self_reported_name(&self) -> RepositoryName {
        self.name.clone()
    }
}

/// In-process loader double.
#[derive(Debug, Default)]
pub struct StubTargetLoader {
    symbols: Vec<(String, String)>,
    enumerations: AtomicUsize,
    attribute_loads: AtomicUsize,
}

impl StubTargetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an `(attribute, repository_name)` row to the served table.
    pub fn with_symbol(mut self, attribute: &str, repository_name: &str) -> Self {
        self.symbols
            .push((attribute.to_string(), repository_name.to_string()));
        self
    }

    /// Times `loadable_targets` was invoked.
    pub fn enumerations(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }

    /// Times `load_attribute` was invoked.
    pub fn attribute_loads(&self) -> usize {
        self.attribute_loads.load(Ordering::SeqCst)
    }
}

impl TargetLoader for StubTargetLoader {
    fn loadable_targets(
        &self,
        _origin: &LoadOrigin,
        _working_directory: Option<&Path>,
    ) -> Result<Vec<LoadedSymbol>, LoadError> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .symbols
            .iter()
            .map(|(attribute, name)| {
                LoadedSymbol::new(attribute.clone(), Box::new(StubRepository::named(name)) as _)
            })
            .collect())
    }

    fn load_attribute(
        &self,
        origin: &LoadOrigin,
        attribute: &str,
        _working_directory: Option<&Path>,
    ) -> Result<Box<dyn LoadableRepository>, LoadError> {
        self.attribute_loads.fetch_add(1, Ordering::SeqCst);
        self.symbols
            .iter()
            .find(|(known, _)| known == attribute)
            .map(|(_, name)| Box::new(StubRepository::named(name)) as Box<dyn LoadableRepository>)
            .ok_or_else(|| LoadError::AttributeNotFound {
                origin: origin.to_string(),
                attribute: attribute.to_string(),
            })
    }
}

/// One recorded `list_remote` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedListing {
    pub executable_path: Option<PathBuf>,
    pub request: ListTargetsRequest,
    pub api: Api,
}

/// Remote lister double. Never spawns anything; answers from its table and
/// records every invocation for inspection.
#[derive(Debug, Default)]
pub struct StubRemoteLister {
    symbols: Vec<TargetSymbol>,
    recorded: Mutex<Vec<RecordedListing>>,
}

impl StubRemoteLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an `(attribute, repository_name)` symbol to the served listing.
    pub fn with_symbol(mut self, attribute: &str, repository_name: &str) -> Self {
        self.symbols.push(TargetSymbol {
            attribute: attribute.to_string(),
            repository_name: RepositoryName::from(repository_name),
        });
        self
    }

    /// Times `list_remote` was invoked.
    pub fn listings(&self) -> usize {
        self.recorded.lock().expect("listing log poisoned").len()
    }

    /// Every recorded invocation, in call order.
    pub fn recorded(&self) -> Vec<RecordedListing> {
        self.recorded.lock().expect("listing log poisoned").clone()
    }
}

impl RemoteLister for StubRemoteLister {
    fn list_remote(
        &self,
        executable_path: Option<&Path>,
        request: &ListTargetsRequest,
        api: Api,
    ) -> Result<ListTargetsResponse, RemoteError> {
        self.recorded
            .lock()
            .expect("listing log poisoned")
            .push(RecordedListing {
                executable_path: executable_path.map(Path::to_path_buf),
                request: request.clone(),
                api,
            });
        Ok(ListTargetsResponse {
            symbols: self.symbols.clone(),
        })
    }
}
