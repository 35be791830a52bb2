//! Location handle builders — one per entry kind.
//!
//! Every builder follows the same pattern: extract and normalize the
//! entry's data (rebasing document-relative paths), enumerate loadable
//! targets, fold them into a repository-name → pointer mapping, assign the
//! location name, and emit the tagged handle.

use std::path::{Path, PathBuf};

use wharf_config::model::{
    FileSpec, GrpcServerSpec, LegacyRepositoryRef, ModuleSpec, PackageSpec,
    PythonEnvironmentSpec, TargetConfig,
};
use wharf_config::paths::{expand_user, rebase_path};
use wharf_core::{
    Api, CodePointer, GrpcEndpoint, LocationName, LocationStrategy, PointerError,
    RepositoryLocationHandle, RepositoryPointers,
};
use wharf_discovery::{
    local_loadable_targets, remote_loadable_targets, DiscoveryError, LoadOrigin, LoadableTarget,
    RemoteLister, TargetLoader,
};

use crate::error::{config_err, ResolveError};
use crate::naming::{assign_location_name, grpc_location_name};

// ---------------------------------------------------------------------------
// Normalized entry data
// ---------------------------------------------------------------------------

/// `python_file` data with paths rebased against the document directory.
struct FileTargetData {
    path: PathBuf,
    attribute: Option<String>,
    location_name: Option<String>,
    working_directory: Option<PathBuf>,
}

fn file_target_data(spec: &FileSpec, document_path: &Path) -> FileTargetData {
    let full = spec.to_ref();
    FileTargetData {
        path: rebase_path(&full.relative_path, document_path),
        attribute: full.attribute,
        location_name: full.location_name,
        working_directory: full
            .working_directory
            .map(|wd| rebase_path(&wd, document_path)),
    }
}

// ---------------------------------------------------------------------------
// Bare target entries (OutOfProcess)
// ---------------------------------------------------------------------------

pub(crate) fn handle_from_file_spec(
    spec: &FileSpec,
    document_path: &Path,
    api: Api,
    loader: &dyn TargetLoader,
    lister: &dyn RemoteLister,
) -> Result<RepositoryLocationHandle, ResolveError> {
    let data = file_target_data(spec, document_path);
    let origin = LoadOrigin::File(data.path.clone());
    let targets = enumerate_bare_target(
        loader,
        lister,
        &origin,
        data.attribute.as_deref(),
        data.working_directory.as_deref(),
        api,
    )?;

    let repositories = build_repositories(targets, |attribute| {
        CodePointer::from_python_file(data.path.clone(), attribute, data.working_directory.clone())
    })?;
    let location_name = assign_location_name(data.location_name.as_deref(), &repositories)?;

    Ok(RepositoryLocationHandle::new(
        location_name,
        LocationStrategy::OutOfProcess { api, repositories },
    ))
}

pub(crate) fn handle_from_module_spec(
    spec: &ModuleSpec,
    api: Api,
    loader: &dyn TargetLoader,
    lister: &dyn RemoteLister,
) -> Result<RepositoryLocationHandle, ResolveError> {
    let data = spec.to_ref();
    let origin = LoadOrigin::Module(data.module_name.clone());
    let targets =
        enumerate_bare_target(loader, lister, &origin, data.attribute.as_deref(), None, api)?;

    let repositories = build_repositories(targets, |attribute| {
        CodePointer::from_module(data.module_name.clone(), attribute)
    })?;
    let location_name = assign_location_name(data.location_name.as_deref(), &repositories)?;

    Ok(RepositoryLocationHandle::new(
        location_name,
        LocationStrategy::OutOfProcess { api, repositories },
    ))
}

pub(crate) fn handle_from_package_spec(
    spec: &PackageSpec,
    api: Api,
    loader: &dyn TargetLoader,
    lister: &dyn RemoteLister,
) -> Result<RepositoryLocationHandle, ResolveError> {
    let data = spec.to_ref();
    let origin = LoadOrigin::Package(data.package_name.clone());
    let targets =
        enumerate_bare_target(loader, lister, &origin, data.attribute.as_deref(), None, api)?;

    let repositories = build_repositories(targets, |attribute| {
        CodePointer::from_python_package(data.package_name.clone(), attribute)
    })?;
    let location_name = assign_location_name(data.location_name.as_deref(), &repositories)?;

    Ok(RepositoryLocationHandle::new(
        location_name,
        LocationStrategy::OutOfProcess { api, repositories },
    ))
}

/// Bare targets enumerate in-process unless the document opted into gRPC,
/// which routes discovery through the remote lister with no executable
/// override (the lister uses the host's own environment).
fn enumerate_bare_target(
    loader: &dyn TargetLoader,
    lister: &dyn RemoteLister,
    origin: &LoadOrigin,
    attribute: Option<&str>,
    working_directory: Option<&Path>,
    api: Api,
) -> Result<Vec<LoadableTarget>, DiscoveryError> {
    match api {
        Api::Cli => local_loadable_targets(loader, origin, attribute, working_directory),
        Api::Grpc => {
            remote_loadable_targets(lister, None, origin, attribute, working_directory, api)
        }
    }
}

// ---------------------------------------------------------------------------
// Python environment entries
// ---------------------------------------------------------------------------

/// Python-environment discovery always crosses the process boundary: the
/// host and the environment may carry incompatible dependency sets, so the
/// target is never imported here regardless of the document's `Api`.
pub(crate) fn handle_from_python_environment(
    spec: &PythonEnvironmentSpec,
    document_path: &Path,
    api: Api,
    lister: &dyn RemoteLister,
) -> Result<RepositoryLocationHandle, ResolveError> {
    let executable_path = expand_user(&spec.executable_path);

    let (origin, attribute, location_name, working_directory, pointer_for): (
        LoadOrigin,
        Option<String>,
        Option<String>,
        Option<PathBuf>,
        Box<dyn Fn(&str) -> Result<CodePointer, PointerError>>,
    ) = match &spec.target {
        TargetConfig::PythonFile(file_spec) => {
            let data = file_target_data(file_spec, document_path);
            let path = data.path.clone();
            let working_directory = data.working_directory.clone();
            (
                LoadOrigin::File(data.path),
                data.attribute,
                data.location_name,
                working_directory.clone(),
                Box::new(move |attribute| {
                    CodePointer::from_python_file(
                        path.clone(),
                        attribute,
                        working_directory.clone(),
                    )
                }),
            )
        }
        TargetConfig::PythonModule(module_spec) => {
            let data = module_spec.to_ref();
            let module_name = data.module_name.clone();
            (
                LoadOrigin::Module(data.module_name),
                data.attribute,
                data.location_name,
                None,
                Box::new(move |attribute| CodePointer::from_module(module_name.clone(), attribute)),
            )
        }
        TargetConfig::PythonPackage(package_spec) => {
            let data = package_spec.to_ref();
            let package_name = data.package_name.clone();
            (
                LoadOrigin::Package(data.package_name),
                data.attribute,
                data.location_name,
                None,
                Box::new(move |attribute| {
                    CodePointer::from_python_package(package_name.clone(), attribute)
                }),
            )
        }
    };

    let targets = remote_loadable_targets(
        lister,
        Some(&executable_path),
        &origin,
        attribute.as_deref(),
        working_directory.as_deref(),
        api,
    )?;

    let repositories = build_repositories(targets, pointer_for.as_ref())?;
    let location_name = assign_location_name(location_name.as_deref(), &repositories)?;

    Ok(RepositoryLocationHandle::new(
        location_name,
        LocationStrategy::PythonEnvironment {
            executable_path,
            api,
            repositories,
        },
    ))
}

// ---------------------------------------------------------------------------
// gRPC server entries
// ---------------------------------------------------------------------------

/// No target resolution here — the server is assumed already running and
/// its repository mapping is populated by a later connection handshake.
pub(crate) fn handle_from_grpc_server(
    spec: &GrpcServerSpec,
    document_path: &Path,
) -> Result<RepositoryLocationHandle, ResolveError> {
    let endpoint = match (spec.port, &spec.socket) {
        (Some(port), None) => GrpcEndpoint::Port(port),
        (None, Some(socket)) => GrpcEndpoint::Socket(socket.clone()),
        (Some(_), Some(_)) => {
            return Err(config_err(
                document_path,
                "grpc_server must set exactly one of 'port'/'socket', not both",
            ));
        }
        (None, None) => {
            return Err(config_err(
                document_path,
                "grpc_server must set one of 'port'/'socket'",
            ));
        }
    };

    let host = spec
        .host
        .clone()
        .unwrap_or_else(|| "localhost".to_string());
    let location_name = match &spec.location_name {
        Some(name) => LocationName::from(name.as_str()),
        None => grpc_location_name(&host, &endpoint),
    };

    Ok(RepositoryLocationHandle::new(
        location_name,
        LocationStrategy::GrpcServer { host, endpoint },
    ))
}

// ---------------------------------------------------------------------------
// Legacy documents
// ---------------------------------------------------------------------------

/// Legacy documents resolve to a single in-process handle. The definition
/// is loaded eagerly through the target loader so the handle carries the
/// repository's self-reported name.
pub(crate) fn handle_from_legacy_repository(
    legacy: &LegacyRepositoryRef,
    document_path: &Path,
    loader: &dyn TargetLoader,
) -> Result<RepositoryLocationHandle, ResolveError> {
    let (origin, pointer) = match (&legacy.file, &legacy.module) {
        (Some(file), None) => {
            let path = rebase_path(file, document_path);
            let pointer = CodePointer::from_python_file(path.clone(), &legacy.function, None)?;
            (LoadOrigin::File(path), pointer)
        }
        (None, Some(module)) => {
            let pointer = CodePointer::from_module(module.clone(), &legacy.function)?;
            (LoadOrigin::Module(module.clone()), pointer)
        }
        _ => {
            return Err(config_err(
                document_path,
                "legacy 'repository' must set exactly one of 'file'/'module'",
            ));
        }
    };

    let targets = local_loadable_targets(loader, &origin, Some(&legacy.function), None)?;
    let repositories = build_repositories(targets, |_| Ok(pointer.clone()))?;
    let location_name = assign_location_name(None, &repositories)?;

    Ok(RepositoryLocationHandle::new(
        location_name,
        LocationStrategy::InProcess { repositories },
    ))
}

// ---------------------------------------------------------------------------
// Shared fold
// ---------------------------------------------------------------------------

/// Fold discovered targets into the repository-name → pointer mapping.
///
/// Two targets reporting the same repository name silently coexist — the
/// later one wins, mirroring the merger's overwrite rule.
fn build_repositories(
    targets: Vec<LoadableTarget>,
    pointer_for: impl Fn(&str) -> Result<CodePointer, PointerError>,
) -> Result<RepositoryPointers, ResolveError> {
    let mut repositories = RepositoryPointers::new();
    for target in targets {
        let pointer = pointer_for(&target.attribute)?;
        repositories.insert(target.repository_name, pointer);
    }
    Ok(repositories)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use wharf_core::RepositoryName;
    use wharf_discovery::testing::{StubRemoteLister, StubTargetLoader};

    use super::*;

    fn grpc_spec(
        host: Option<&str>,
        port: Option<u16>,
        socket: Option<&str>,
        location_name: Option<&str>,
    ) -> GrpcServerSpec {
        GrpcServerSpec {
            host: host.map(str::to_string),
            port,
            socket: socket.map(str::to_string),
            location_name: location_name.map(str::to_string),
        }
    }

    #[test]
    fn grpc_port_defaults_host_and_name() {
        let handle =
            handle_from_grpc_server(&grpc_spec(None, Some(4000), None, None), Path::new("w.yaml"))
                .expect("handle");
        assert_eq!(handle.location_name, LocationName::from("grpc:localhost:4000"));
        match handle.strategy {
            LocationStrategy::GrpcServer { host, endpoint } => {
                assert_eq!(host, "localhost");
                assert_eq!(endpoint, GrpcEndpoint::Port(4000));
            }
            other => panic!("unexpected strategy: {other:?}"),
        }
    }

    #[test]
    fn grpc_socket_with_explicit_host_and_name() {
        let handle = handle_from_grpc_server(
            &grpc_spec(Some("10.0.0.7"), None, Some("/tmp/w.sock"), Some("remote")),
            Path::new("w.yaml"),
        )
        .expect("handle");
        assert_eq!(handle.location_name, LocationName::from("remote"));
        match handle.strategy {
            LocationStrategy::GrpcServer { host, endpoint } => {
                assert_eq!(host, "10.0.0.7");
                assert_eq!(endpoint, GrpcEndpoint::Socket("/tmp/w.sock".to_string()));
            }
            other => panic!("unexpected strategy: {other:?}"),
        }
    }

    #[rstest]
    #[case(Some(4000), Some("/tmp/w.sock"))]
    #[case(None, None)]
    fn grpc_port_socket_must_be_exclusive(
        #[case] port: Option<u16>,
        #[case] socket: Option<&str>,
    ) {
        let err = handle_from_grpc_server(
            &grpc_spec(None, port, socket, None),
            Path::new("/ws/dev.yaml"),
        )
        .unwrap_err();
        match err {
            ResolveError::Configuration { path, reason } => {
                assert_eq!(path, PathBuf::from("/ws/dev.yaml"));
                assert!(reason.contains("port"), "reason should mention port: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn file_spec_rebases_path_and_working_directory() {
        let loader = StubTargetLoader::new().with_symbol("make_repo", "prod");
        let lister = StubRemoteLister::new();
        let spec: FileSpec =
            serde_yaml::from_str("relative_path: repo.py\nworking_directory: wd\n")
                .expect("spec");

        let handle = handle_from_file_spec(
            &spec,
            Path::new("/ws/dev.yaml"),
            Api::Cli,
            &loader,
            &lister,
        )
        .expect("handle");

        let repositories = handle.repositories().expect("repositories");
        let pointer = repositories
            .get(&RepositoryName::from("prod"))
            .expect("pointer");
        match pointer {
            CodePointer::File {
                path,
                attribute,
                working_directory,
            } => {
                assert_eq!(path, &PathBuf::from("/ws/repo.py"));
                assert_eq!(attribute, "make_repo");
                assert_eq!(working_directory, &Some(PathBuf::from("/ws/wd")));
            }
            other => panic!("unexpected pointer: {other:?}"),
        }
    }

    #[test]
    fn module_spec_with_grpc_api_discovers_remotely() {
        let loader = StubTargetLoader::new();
        let lister = StubRemoteLister::new().with_symbol("make_repo", "prod");
        let spec: ModuleSpec = serde_yaml::from_str("pkg.repo").expect("spec");

        let handle = handle_from_module_spec(&spec, Api::Grpc, &loader, &lister).expect("handle");

        assert_eq!(loader.enumerations(), 0, "grpc opt-in must not load in-process");
        assert_eq!(lister.listings(), 1);
        assert!(matches!(
            handle.strategy,
            LocationStrategy::OutOfProcess { api: Api::Grpc, .. }
        ));
    }

    #[test]
    fn legacy_module_document_builds_in_process_handle() {
        let loader = StubTargetLoader::new().with_symbol("define_repo", "legacy_repo");
        let legacy = LegacyRepositoryRef {
            file: None,
            module: Some("pkg.repo".to_string()),
            function: "define_repo".to_string(),
        };

        let handle =
            handle_from_legacy_repository(&legacy, Path::new("/ws/repository.yaml"), &loader)
                .expect("handle");

        assert_eq!(handle.location_name, LocationName::from("legacy_repo"));
        match &handle.strategy {
            LocationStrategy::InProcess { repositories } => {
                let pointer = repositories
                    .get(&RepositoryName::from("legacy_repo"))
                    .expect("pointer");
                assert_eq!(
                    pointer,
                    &CodePointer::from_module("pkg.repo", "define_repo").expect("pointer")
                );
            }
            other => panic!("unexpected strategy: {other:?}"),
        }
    }

    #[test]
    fn legacy_file_is_rebased_against_document() {
        let loader = StubTargetLoader::new().with_symbol("define_repo", "legacy_repo");
        let legacy = LegacyRepositoryRef {
            file: Some(PathBuf::from("repo.py")),
            module: None,
            function: "define_repo".to_string(),
        };

        let handle =
            handle_from_legacy_repository(&legacy, Path::new("/ws/repository.yaml"), &loader)
                .expect("handle");
        let repositories = handle.repositories().expect("repositories");
        match repositories.get(&RepositoryName::from("legacy_repo")) {
            Some(CodePointer::File { path, .. }) => {
                assert_eq!(path, &PathBuf::from("/ws/repo.py"));
            }
            other => panic!("unexpected pointer: {other:?}"),
        }
    }
}
