//! Interactive prompt system for the sobject CLI.
//!
//! This crate provides:
//! - A bundled, templated message catalog
//! - A question model with conditional visibility and lazy defaults
//! - Terminal and scripted prompters
//! - The prompt flows behind the `generate metadata` commands

pub mod field;
pub mod messages;
pub mod object;
pub mod prompter;
pub mod question;
pub mod relationship;

// Re-export main types
pub use field::{field_prompts, FieldProperties, FieldRequest, FieldType};
pub use messages::Messages;
pub use object::object_prompt;
pub use prompter::{AskedQuestion, Prompter, ScriptedPrompter, TerminalPrompter};
pub use question::{ask_all, Answer, Answers, Choice, PendingQuestion, Question, QuestionKind};
pub use relationship::{
    relationship_field_prompts, strip_reference_path, DeleteConstraint,
    LookupRelationshipAnswers, MasterDetailRelationshipAnswers, RelationshipFieldAnswers,
    RelationshipFieldRequest, RelationshipKind,
};
