//! Command handlers for the sobject CLI.
//!
//! `generate metadata <kind>` routes to one submodule per metadata kind.

pub mod field;
pub mod generate;
pub mod tab;

// Re-export command types for convenience
pub use field::FieldCommand;
pub use generate::GenerateCommand;
pub use tab::TabCommand;
