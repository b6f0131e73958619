//! Salesforce DX project discovery.
//!
//! Locates the nearest `sfdx-project.json` and exposes the package
//! directories that hold local metadata source.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// File name marking the root of a Salesforce DX project.
pub const PROJECT_FILE: &str = "sfdx-project.json";

/// A parsed `sfdx-project.json`.
#[derive(Debug, Clone)]
pub struct SfProject {
    /// Directory containing `sfdx-project.json`
    pub root: PathBuf,

    /// Package directories in declaration order
    pub package_directories: Vec<PackageDirectory>,

    /// `sourceApiVersion`, when declared
    pub source_api_version: Option<String>,
}

/// One entry of `packageDirectories`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageDirectory {
    /// Path relative to the project root
    pub path: PathBuf,

    /// Whether this is the default package directory
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectFile {
    #[serde(default)]
    package_directories: Vec<PackageDirectory>,
    source_api_version: Option<String>,
}

/// Walk up from `start` until a directory containing `sfdx-project.json` is found.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = if start.is_file() {
        start.parent()?.to_path_buf()
    } else {
        start.to_path_buf()
    };

    loop {
        if current.join(PROJECT_FILE).is_file() {
            return Some(current);
        }
        if !current.pop() {
            break;
        }
    }

    None
}

fn is_valid_api_version(value: &str) -> bool {
    let mut parts = value.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(major), Some(minor), None) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

impl SfProject {
    /// Load the project whose root is `root`.
    pub fn load(root: &Path) -> AppResult<Self> {
        let path = root.join(PROJECT_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            AppError::Project(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let file: ProjectFile = serde_json::from_str(&content).map_err(|e| {
            AppError::Project(format!("Invalid {}: {}", path.display(), e))
        })?;

        if let Some(version) = &file.source_api_version {
            if !is_valid_api_version(version) {
                return Err(AppError::Project(format!(
                    "Invalid sourceApiVersion '{}'. Expected format: 'x.y'",
                    version
                )));
            }
        }

        if file.package_directories.is_empty() {
            return Err(AppError::Project(format!(
                "{} declares no packageDirectories",
                path.display()
            )));
        }

        tracing::debug!(
            "Loaded project at {:?} with {} package directories",
            root,
            file.package_directories.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            package_directories: file.package_directories,
            source_api_version: file.source_api_version,
        })
    }

    /// Discover and load the project containing `start`.
    pub fn discover(start: &Path) -> AppResult<Self> {
        let root = find_project_root(start).ok_or_else(|| {
            AppError::Project(format!(
                "{} not found in {} or any parent directory. Run inside a Salesforce DX project.",
                PROJECT_FILE,
                start.display()
            ))
        })?;
        Self::load(&root)
    }

    /// Absolute paths of all package directories, in declaration order.
    pub fn package_paths(&self) -> Vec<PathBuf> {
        self.package_directories
            .iter()
            .map(|dir| self.root.join(&dir.path))
            .collect()
    }
}
