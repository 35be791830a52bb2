//! Wharf discovery library — enumerating loadable targets at a location.
//!
//! Public API surface:
//! - [`target`] — [`LoadableRepository`] capability, [`LoadOrigin`],
//!   [`TargetLoader`] and [`RemoteLister`] collaborator traits
//! - [`protocol`] — wire shapes for the remote-lister boundary
//! - [`discover`] — local/remote enumeration with the explicit-attribute
//!   fast path
//! - [`testing`] — stub collaborators for tests
//! - [`error`] — [`LoadError`], [`RemoteError`], [`DiscoveryError`]

pub mod discover;
pub mod error;
pub mod protocol;
pub mod target;
pub mod testing;

pub use discover::{local_loadable_targets, remote_loadable_targets};
pub use error::{DiscoveryError, LoadError, RemoteError};
pub use protocol::{ListTargetsRequest, ListTargetsResponse, TargetSymbol};
pub use target::{
    LoadOrigin, LoadableRepository, LoadableTarget, LoadedSymbol, RemoteLister, TargetLoader,
};
