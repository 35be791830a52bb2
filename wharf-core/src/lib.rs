//! Wharf core library — domain types, code pointers, workspace aggregate.
//!
//! Public API surface:
//! - [`types`] — newtypes, strategies, and [`RepositoryLocationHandle`]
//! - [`pointer`] — [`CodePointer`]
//! - [`workspace`] — [`Workspace`]
//! - [`error`] — [`PointerError`], [`UnknownLocationError`]

pub mod error;
pub mod pointer;
pub mod types;
pub mod workspace;

pub use error::{PointerError, UnknownLocationError};
pub use pointer::CodePointer;
pub use types::{
    Api, GrpcEndpoint, LocationName, LocationStrategy, RepositoryLocationHandle,
    RepositoryName, RepositoryPointers,
};
pub use workspace::Workspace;
