//! Typed model of one workspace document.
//!
//! Pure data — no behavior beyond shorthand normalization. Resolution into
//! location handles lives in `wharf-resolver`.
//!
//! Every entry kind supports a bare-string shorthand:
//!
//! ```yaml
//! load_from:
//!   - python_file: repo.py
//!   - python_module:
//!       module_name: pkg.repo
//!       attribute: make_repo
//!       location_name: prod
//! ```
//!
//! The shorthand is equivalent to the struct form with all optional fields
//! empty.

use std::path::PathBuf;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Document root
// ---------------------------------------------------------------------------

/// Root of one workspace document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceDocument {
    /// Deprecated single-repository shape. When present it short-circuits
    /// `load_from` entirely.
    #[serde(default)]
    pub repository: Option<LegacyRepositoryRef>,

    /// Feature flags. The only recognized flag is [`crate::schema::GRPC_OPT_IN`],
    /// which selects the gRPC strategy for bare target entries.
    #[serde(default)]
    pub opt_in: Vec<String>,

    /// The location entries to resolve, in document order.
    #[serde(default)]
    pub load_from: Option<Vec<LocationEntry>>,
}

/// Legacy `repository:` shape. Exactly one of `file`/`module` identifies
/// the code; `fn` names the attribute that defines the repository.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyRepositoryRef {
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(rename = "fn")]
    pub function: String,
}

// ---------------------------------------------------------------------------
// Location entries
// ---------------------------------------------------------------------------

/// One entry under `load_from`, tagged by its single top-level key.
///
/// Unknown keys fail deserialization with serde's unknown-variant error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationEntry {
    PythonFile(FileSpec),
    PythonModule(ModuleSpec),
    PythonPackage(PackageSpec),
    GrpcServer(GrpcServerSpec),
    PythonEnvironment(PythonEnvironmentSpec),
}

/// A direct code target — the subset of entry kinds that is also legal
/// inside `python_environment.target`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetConfig {
    PythonFile(FileSpec),
    PythonModule(ModuleSpec),
    PythonPackage(PackageSpec),
}

// ---------------------------------------------------------------------------
// Target specs (string shorthand or full reference)
// ---------------------------------------------------------------------------

/// `python_file` — bare path string or full reference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FileSpec {
    Shorthand(PathBuf),
    Full(FileRef),
}

impl FileSpec {
    pub fn to_ref(&self) -> FileRef {
        match self {
            FileSpec::Shorthand(path) => FileRef {
                relative_path: path.clone(),
                attribute: None,
                location_name: None,
                working_directory: None,
            },
            FileSpec::Full(full) => full.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileRef {
    pub relative_path: PathBuf,
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub working_directory: Option<PathBuf>,
}

/// `python_module` — bare module name or full reference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModuleSpec {
    Shorthand(String),
    Full(ModuleRef),
}

impl ModuleSpec {
    pub fn to_ref(&self) -> ModuleRef {
        match self {
            ModuleSpec::Shorthand(module_name) => ModuleRef {
                module_name: module_name.clone(),
                attribute: None,
                location_name: None,
            },
            ModuleSpec::Full(full) => full.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleRef {
    pub module_name: String,
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
}

/// `python_package` — bare package name or full reference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PackageSpec {
    Shorthand(String),
    Full(PackageRef),
}

impl PackageSpec {
    pub fn to_ref(&self) -> PackageRef {
        match self {
            PackageSpec::Shorthand(package_name) => PackageRef {
                package_name: package_name.clone(),
                attribute: None,
                location_name: None,
            },
            PackageSpec::Full(full) => full.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageRef {
    pub package_name: String,
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Server / environment entries
// ---------------------------------------------------------------------------

/// `grpc_server` — an already-running server to connect to.
///
/// Exactly one of `port`/`socket` must be set; the resolver rejects entries
/// that set both or neither.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrpcServerSpec {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub socket: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
}

/// `python_environment` — a target evaluated by a specific interpreter,
/// never by the host process.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PythonEnvironmentSpec {
    /// Interpreter executable; a leading `~` is expanded at resolution time.
    pub executable_path: PathBuf,
    pub target: TargetConfig,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_shorthand_equals_bare_struct() {
        let shorthand: FileSpec = serde_yaml::from_str("repo.py").expect("shorthand");
        let full: FileSpec =
            serde_yaml::from_str("relative_path: repo.py").expect("full");
        assert_eq!(shorthand.to_ref(), full.to_ref());
        assert_eq!(shorthand.to_ref().relative_path, PathBuf::from("repo.py"));
        assert!(shorthand.to_ref().attribute.is_none());
    }

    #[test]
    fn module_shorthand_equals_bare_struct() {
        let shorthand: ModuleSpec = serde_yaml::from_str("pkg.repo").expect("shorthand");
        let full: ModuleSpec = serde_yaml::from_str("module_name: pkg.repo").expect("full");
        assert_eq!(shorthand.to_ref(), full.to_ref());
    }

    #[test]
    fn entry_tags_deserialize() {
        let yaml = r#"
- python_file:
    relative_path: repo.py
    attribute: make_repo
- python_module: pkg.repo
- python_package:
    package_name: my_pkg
    location_name: pkg_loc
- grpc_server:
    port: 4000
- python_environment:
    executable_path: ~/.venvs/x/bin/python
    target:
      python_file: repo.py
"#;
        let entries: Vec<LocationEntry> = serde_yaml::from_str(yaml).expect("entries");
        assert_eq!(entries.len(), 5);
        assert!(matches!(entries[0], LocationEntry::PythonFile(_)));
        assert!(matches!(entries[3], LocationEntry::GrpcServer(_)));
        match &entries[4] {
            LocationEntry::PythonEnvironment(env) => {
                assert!(matches!(env.target, TargetConfig::PythonFile(_)));
            }
            other => panic!("unexpected entry: {other:?}"),
        }
    }

    #[test]
    fn unknown_entry_key_is_rejected() {
        let yaml = "- python_script: repo.py";
        let parsed: Result<Vec<LocationEntry>, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err(), "unknown entry shapes must not parse");
    }

    #[test]
    fn legacy_fn_key_maps_to_function() {
        let yaml = "file: repo.py\nfn: define_repo\n";
        let legacy: LegacyRepositoryRef = serde_yaml::from_str(yaml).expect("legacy");
        assert_eq!(legacy.function, "define_repo");
        assert_eq!(legacy.file, Some(PathBuf::from("repo.py")));
        assert!(legacy.module.is_none());
    }
}
