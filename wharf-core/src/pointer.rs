//! Code pointers — immutable locators for a single loadable object.
//!
//! A pointer records *how to reach* a named object (by file, module, or
//! installed package) without loading it. Constructors are pure and fail
//! only on malformed input; resolving a pointer into a live definition is
//! the target loader's job.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PointerError;

/// Immutable locator of a single loadable object.
///
/// Two pointers are equal iff their variant and fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePointer {
    /// An attribute defined in a Python source file.
    File {
        path: PathBuf,
        attribute: String,
        working_directory: Option<PathBuf>,
    },
    /// An attribute defined in an importable module.
    Module {
        module_name: String,
        attribute: String,
    },
    /// An attribute defined in an installed package.
    Package {
        package_name: String,
        attribute: String,
    },
}

impl CodePointer {
    /// Pointer to `attribute` in the file at `path`.
    ///
    /// `path` is stored as given; rebasing relative paths against the
    /// workspace document directory happens in the configuration layer.
    pub fn from_python_file(
        path: impl Into<PathBuf>,
        attribute: impl Into<String>,
        working_directory: Option<PathBuf>,
    ) -> Result<Self, PointerError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(PointerError::EmptyField { field: "path" });
        }
        Ok(CodePointer::File {
            path,
            attribute: non_empty(attribute.into(), "attribute")?,
            working_directory,
        })
    }

    /// Pointer to `attribute` in the module named `module_name`.
    pub fn from_module(
        module_name: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Result<Self, PointerError> {
        Ok(CodePointer::Module {
            module_name: non_empty(module_name.into(), "module_name")?,
            attribute: non_empty(attribute.into(), "attribute")?,
        })
    }

    /// Pointer to `attribute` in the installed package named `package_name`.
    pub fn from_python_package(
        package_name: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Result<Self, PointerError> {
        Ok(CodePointer::Package {
            package_name: non_empty(package_name.into(), "package_name")?,
            attribute: non_empty(attribute.into(), "attribute")?,
        })
    }

    /// The attribute this pointer loads.
    pub fn attribute(&self) -> &str {
        match self {
            CodePointer::File { attribute, .. }
            | CodePointer::Module { attribute, .. }
            | CodePointer::Package { attribute, .. } => attribute,
        }
    }
}

impl fmt::Display for CodePointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodePointer::File {
                path, attribute, ..
            } => write!(f, "{}:{attribute}", path.display()),
            CodePointer::Module {
                module_name,
                attribute,
            } => write!(f, "{module_name}:{attribute}"),
            CodePointer::Package {
                package_name,
                attribute,
            } => write!(f, "{package_name}:{attribute}"),
        }
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, PointerError> {
    if value.trim().is_empty() {
        Err(PointerError::EmptyField { field })
    } else {
        Ok(value)
    }
}
