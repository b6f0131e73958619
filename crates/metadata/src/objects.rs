//! Discovery and parsing of local custom object metadata.
//!
//! Objects live in source format under a package directory as
//! `objects/<ApiName>/<ApiName>.object-meta.xml`.

use serde::Deserialize;
use sobject_core::{AppError, AppResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Suffix of object definition files in source format.
pub const OBJECT_FILE_SUFFIX: &str = ".object-meta.xml";

/// Name of the directory holding object folders.
pub const OBJECTS_DIR: &str = "objects";

/// Parsed contents of an `*.object-meta.xml` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    /// API name, taken from the object folder name
    pub api_name: String,

    /// Folder holding the object definition
    pub folder: PathBuf,

    /// Singular label
    pub label: Option<String>,

    /// Plural label
    pub plural_label: Option<String>,

    /// Description
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomObjectXml {
    label: Option<String>,
    plural_label: Option<String>,
    description: Option<String>,
}

/// An object offered as a choice when selecting a target object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCandidate {
    /// API name
    pub name: String,

    /// Folder holding the object definition
    pub folder: PathBuf,

    /// Singular label, when the definition declares one
    pub label: Option<String>,
}

impl ObjectCandidate {
    /// Human-readable label for selection lists.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) if label != &self.name => format!("{} ({})", label, self.name),
            _ => self.name.clone(),
        }
    }
}

fn folder_name(folder: &Path) -> AppResult<String> {
    folder
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| AppError::Metadata(format!("Invalid object folder: {:?}", folder)))
}

/// Read and parse the object definition stored in `folder`.
///
/// The definition file must be named after the folder, e.g.
/// `objects/Contact/Contact.object-meta.xml`.
pub fn read_object_metadata(folder: &Path) -> AppResult<ObjectMetadata> {
    let api_name = folder_name(folder)?;
    let file = folder.join(format!("{}{}", api_name, OBJECT_FILE_SUFFIX));

    tracing::debug!("Reading object metadata from {:?}", file);

    let contents = std::fs::read_to_string(&file).map_err(|e| {
        AppError::Metadata(format!("Failed to read object file {:?}: {}", file, e))
    })?;

    let parsed: CustomObjectXml = quick_xml::de::from_str(&contents).map_err(|e| {
        AppError::Metadata(format!("Failed to parse object file {:?}: {}", file, e))
    })?;

    Ok(ObjectMetadata {
        api_name,
        folder: folder.to_path_buf(),
        label: parsed.label,
        plural_label: parsed.plural_label,
        description: parsed.description,
    })
}

/// Whether `path` is `.../objects/<Name>/<Name>.object-meta.xml`.
fn object_folder_of(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?.to_str()?;
    let stem = file_name.strip_suffix(OBJECT_FILE_SUFFIX)?;
    let folder = path.parent()?;
    let objects_dir = folder.parent()?;

    if folder.file_name()?.to_str()? != stem || objects_dir.file_name()?.to_str()? != OBJECTS_DIR {
        return None;
    }

    Some(folder.to_path_buf())
}

/// Find every object defined in the given package directories.
///
/// Candidates are grouped by package directory in the order given and
/// sorted by API name within each directory. Package directories that do not
/// exist are skipped.
pub fn find_object_candidates(package_dirs: &[PathBuf]) -> AppResult<Vec<ObjectCandidate>> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for package_dir in package_dirs {
        if !package_dir.exists() {
            tracing::warn!("Package directory does not exist: {:?}", package_dir);
            continue;
        }

        let mut found = Vec::new();
        for entry in walkdir::WalkDir::new(package_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let Some(folder) = object_folder_of(entry.path()) else {
                continue;
            };
            if !seen.insert(folder.clone()) {
                continue;
            }

            let name = folder_name(&folder)?;
            let label = match read_object_metadata(&folder) {
                Ok(metadata) => metadata.label,
                Err(e) => {
                    tracing::warn!("Skipping label for {}: {}", name, e);
                    None
                }
            };

            found.push(ObjectCandidate {
                name,
                folder,
                label,
            });
        }

        found.sort_by(|a, b| a.name.cmp(&b.name));
        candidates.extend(found);
    }

    tracing::debug!("Found {} object candidates", candidates.len());

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_object(package_dir: &Path, name: &str, body: &str) -> PathBuf {
        let folder = package_dir.join("main/default/objects").join(name);
        fs::create_dir_all(&folder).unwrap();
        fs::write(
            folder.join(format!("{}{}", name, OBJECT_FILE_SUFFIX)),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata">
{}
</CustomObject>
"#,
                body
            ),
        )
        .unwrap();
        folder
    }

    #[test]
    fn test_read_object_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let folder = create_object(
            temp_dir.path(),
            "Contact",
            r#"    <label>Contact</label>
    <pluralLabel>Contacts</pluralLabel>
    <fields>
        <fullName>Email</fullName>
        <type>Email</type>
    </fields>
    <sharingModel>ReadWrite</sharingModel>"#,
        );

        let metadata = read_object_metadata(&folder).unwrap();
        assert_eq!(metadata.api_name, "Contact");
        assert_eq!(metadata.label.as_deref(), Some("Contact"));
        assert_eq!(metadata.plural_label.as_deref(), Some("Contacts"));
        assert_eq!(metadata.description, None);
    }

    #[test]
    fn test_read_object_without_plural_label() {
        let temp_dir = TempDir::new().unwrap();
        let folder = create_object(temp_dir.path(), "Account", "");

        let metadata = read_object_metadata(&folder).unwrap();
        assert_eq!(metadata.plural_label, None);
    }

    #[test]
    fn test_read_missing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_object_metadata(&temp_dir.path().join("objects/Nope"));
        assert!(matches!(result, Err(AppError::Metadata(_))));
    }

    #[test]
    fn test_read_invalid_xml() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("objects/Broken");
        fs::create_dir_all(&folder).unwrap();
        fs::write(
            folder.join("Broken.object-meta.xml"),
            "<CustomObject><label>Broken</pluralLabel>",
        )
        .unwrap();

        let result = read_object_metadata(&folder);
        assert!(matches!(result, Err(AppError::Metadata(_))));
    }

    #[test]
    fn test_find_object_candidates_sorted_per_package() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("force-app");
        let second = temp_dir.path().join("extras");
        create_object(&first, "Zeta__c", "<label>Zeta</label>");
        create_object(&first, "Account", "<label>Account</label>");
        create_object(&second, "Beta__c", "");

        let candidates =
            find_object_candidates(&[first.clone(), second.clone(), temp_dir.path().join("gone")])
                .unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Account", "Zeta__c", "Beta__c"]);
        assert_eq!(
            candidates[0].folder,
            first.join("main/default/objects/Account")
        );
        assert_eq!(candidates[1].display_label(), "Zeta (Zeta__c)");
        assert_eq!(candidates[2].display_label(), "Beta__c");
    }

    #[test]
    fn test_find_ignores_files_outside_objects_dir() {
        let temp_dir = TempDir::new().unwrap();
        let stray = temp_dir.path().join("force-app/Stray");
        fs::create_dir_all(&stray).unwrap();
        fs::write(stray.join("Stray.object-meta.xml"), "<CustomObject/>").unwrap();

        let candidates = find_object_candidates(&[temp_dir.path().join("force-app")]).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_overlapping_package_dirs_deduplicated() {
        let temp_dir = TempDir::new().unwrap();
        let package = temp_dir.path().join("force-app");
        create_object(&package, "Account", "");

        let candidates = find_object_candidates(&[package.clone(), package]).unwrap();
        assert_eq!(candidates.len(), 1);
    }
}
