//! Serialization of field and tab metadata documents.

use serde::Serialize;
use sobject_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Namespace of every Metadata API document.
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// A `CustomField` document (`*.field-meta.xml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,

    pub full_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_constraint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_to: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reparentable_master_detail: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,

    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_lines: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_requires_master_read: Option<bool>,
}

impl CustomField {
    /// Create a field with only its identity set.
    pub fn new(full_name: impl Into<String>, label: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            xmlns: METADATA_NAMESPACE,
            full_name: full_name.into(),
            default_value: None,
            delete_constraint: None,
            description: None,
            label: label.into(),
            length: None,
            precision: None,
            reference_to: None,
            relationship_label: None,
            relationship_name: None,
            reparentable_master_detail: None,
            required: None,
            scale: None,
            field_type: field_type.into(),
            visible_lines: None,
            write_requires_master_read: None,
        }
    }

    /// Render the document as XML.
    pub fn to_xml(&self) -> AppResult<String> {
        to_document("CustomField", self)
    }
}

/// A `CustomTab` document (`*.tab-meta.xml`) for a custom object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTab {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,

    pub custom_object: bool,

    pub motif: String,
}

impl CustomTab {
    /// Tab for a custom object using icon `icon` (1 to 100).
    pub fn for_object(icon: u8) -> Self {
        Self {
            xmlns: METADATA_NAMESPACE,
            custom_object: true,
            motif: format!("Custom{}", icon),
        }
    }

    /// Render the document as XML.
    pub fn to_xml(&self) -> AppResult<String> {
        to_document("CustomTab", self)
    }
}

fn to_document<T: Serialize>(root: &str, value: &T) -> AppResult<String> {
    let mut buffer = String::new();
    buffer.push_str(XML_DECLARATION);
    buffer.push('\n');

    let mut serializer = quick_xml::se::Serializer::with_root(&mut buffer, Some(root))
        .map_err(|e| AppError::Serialization(format!("Invalid root element {}: {}", root, e)))?;
    serializer.indent(' ', 4);
    value
        .serialize(serializer)
        .map_err(|e| AppError::Serialization(format!("Failed to serialize {}: {}", root, e)))?;

    buffer.push('\n');
    Ok(buffer)
}

/// Write `contents` to `path`, refusing to replace an existing file.
fn write_new_file(path: &Path, contents: &str) -> AppResult<()> {
    if path.exists() {
        return Err(AppError::Metadata(format!(
            "{} already exists",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;

    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Write `field` to `<object_folder>/fields/<fullName>.field-meta.xml`.
pub fn write_field(object_folder: &Path, field: &CustomField) -> AppResult<PathBuf> {
    let path = object_folder
        .join("fields")
        .join(format!("{}.field-meta.xml", field.full_name));
    write_new_file(&path, &field.to_xml()?)?;
    Ok(path)
}

/// Write `tab` to `<directory>/<object>.tab-meta.xml`.
pub fn write_tab(directory: &Path, object: &str, tab: &CustomTab) -> AppResult<PathBuf> {
    let path = directory.join(format!("{}.tab-meta.xml", object));
    write_new_file(&path, &tab.to_xml()?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_field_xml_omits_unset_properties() {
        let mut field = CustomField::new("Parent__c", "Parent", "Lookup");
        field.reference_to = Some("Account".to_string());
        field.delete_constraint = Some("SetNull".to_string());

        let xml = field.to_xml().unwrap();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(&format!(r#"<CustomField xmlns="{}">"#, METADATA_NAMESPACE)));
        assert!(xml.contains("<fullName>Parent__c</fullName>"));
        assert!(xml.contains("<referenceTo>Account</referenceTo>"));
        assert!(xml.contains("<deleteConstraint>SetNull</deleteConstraint>"));
        assert!(xml.contains("<type>Lookup</type>"));
        assert!(!xml.contains("reparentableMasterDetail"));
        assert!(!xml.contains("<length>"));
    }

    #[test]
    fn test_field_xml_booleans_and_numbers() {
        let mut field = CustomField::new("Amount__c", "Amount", "Number");
        field.precision = Some(18);
        field.scale = Some(2);
        field.required = Some(false);

        let xml = field.to_xml().unwrap();
        assert!(xml.contains("<precision>18</precision>"));
        assert!(xml.contains("<scale>2</scale>"));
        assert!(xml.contains("<required>false</required>"));
    }

    #[test]
    fn test_write_field_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let field = CustomField::new("Due__c", "Due", "Date");

        let path = write_field(temp_dir.path(), &field).unwrap();
        assert_eq!(path, temp_dir.path().join("fields/Due__c.field-meta.xml"));
        assert!(path.exists());

        let again = write_field(temp_dir.path(), &field);
        assert!(matches!(again, Err(AppError::Metadata(_))));
    }

    #[test]
    fn test_write_tab() {
        let temp_dir = TempDir::new().unwrap();
        let tabs = temp_dir.path().join("tabs");

        let path = write_tab(&tabs, "Widget__c", &CustomTab::for_object(7)).unwrap();
        let xml = std::fs::read_to_string(&path).unwrap();
        assert!(path.ends_with("tabs/Widget__c.tab-meta.xml"));
        assert!(xml.contains("<customObject>true</customObject>"));
        assert!(xml.contains("<motif>Custom7</motif>"));
    }
}
