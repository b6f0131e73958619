//! Local Salesforce metadata access for the sobject CLI.
//!
//! This crate provides:
//! - Discovery of custom objects in package directories
//! - Parsing of `*.object-meta.xml` files
//! - API name derivation
//! - Serialization of field and tab metadata documents

pub mod naming;
pub mod objects;
pub mod xml;

// Re-export main types
pub use naming::{custom_field_name, is_valid_api_name, make_name_api_compatible};
pub use objects::{find_object_candidates, read_object_metadata, ObjectCandidate, ObjectMetadata};
pub use xml::{write_field, write_tab, CustomField, CustomTab};
