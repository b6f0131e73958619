//! Prompts for lookup and master-detail relationship fields.
//!
//! The flow asks, in order: the referenced object, the relationship label,
//! the relationship name, then either the lookup delete constraint or the
//! two master-detail sharing options.

use crate::messages::{Messages, RELATIONSHIP_BUNDLE};
use crate::object::object_prompt;
use crate::prompter::Prompter;
use crate::question::{ask_all, Answer, Answers, Choice, Question};
use serde::{Deserialize, Serialize};
use sobject_core::{AppError, AppResult};
use sobject_metadata::{make_name_api_compatible, read_object_metadata, ObjectMetadata};
use std::path::PathBuf;
use std::str::FromStr;

const REFERENCE_TO: &str = "referenceTo";
const RELATIONSHIP_LABEL: &str = "relationshipLabel";
const RELATIONSHIP_NAME: &str = "relationshipName";
const DELETE_CONSTRAINT: &str = "deleteConstraint";
const REPARENTABLE_MASTER_DETAIL: &str = "reparentableMasterDetail";
const WRITE_REQUIRES_MASTER_READ: &str = "writeRequiresMasterRead";

/// Kind of relationship field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipKind {
    MasterDetail,
    Lookup,
}

impl RelationshipKind {
    /// Metadata API field type.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::MasterDetail => "MasterDetail",
            RelationshipKind::Lookup => "Lookup",
        }
    }
}

/// What happens to a lookup field when the referenced record is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteConstraint {
    #[default]
    SetNull,
    Restrict,
    Cascade,
}

impl DeleteConstraint {
    pub const ALL: [DeleteConstraint; 3] = [
        DeleteConstraint::SetNull,
        DeleteConstraint::Restrict,
        DeleteConstraint::Cascade,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteConstraint::SetNull => "SetNull",
            DeleteConstraint::Restrict => "Restrict",
            DeleteConstraint::Cascade => "Cascade",
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            DeleteConstraint::SetNull => "lookupDeleteConstraint.setNull",
            DeleteConstraint::Restrict => "lookupDeleteConstraint.restrict",
            DeleteConstraint::Cascade => "lookupDeleteConstraint.cascade",
        }
    }
}

impl FromStr for DeleteConstraint {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeleteConstraint::ALL
            .into_iter()
            .find(|constraint| constraint.as_str() == s)
            .ok_or_else(|| AppError::Prompt(format!("Unknown delete constraint: {}", s)))
    }
}

/// Input to [`relationship_field_prompts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipFieldRequest {
    pub kind: RelationshipKind,
    /// Source roots searched for objects to reference
    pub package_directories: Vec<PathBuf>,
    /// Folder of the object the field is added to
    pub child_object_folder_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRelationshipAnswers {
    pub reference_to: String,
    pub relationship_label: String,
    pub relationship_name: String,
    pub delete_constraint: DeleteConstraint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterDetailRelationshipAnswers {
    pub reference_to: String,
    pub relationship_label: String,
    pub relationship_name: String,
    pub reparentable_master_detail: bool,
    pub write_requires_master_read: bool,
}

/// Result of [`relationship_field_prompts`].
///
/// Each variant holds exactly the properties asked for its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RelationshipFieldAnswers {
    Lookup(LookupRelationshipAnswers),
    MasterDetail(MasterDetailRelationshipAnswers),
}

impl RelationshipFieldAnswers {
    pub fn kind(&self) -> RelationshipKind {
        match self {
            RelationshipFieldAnswers::Lookup(_) => RelationshipKind::Lookup,
            RelationshipFieldAnswers::MasterDetail(_) => RelationshipKind::MasterDetail,
        }
    }

    pub fn reference_to(&self) -> &str {
        match self {
            RelationshipFieldAnswers::Lookup(a) => &a.reference_to,
            RelationshipFieldAnswers::MasterDetail(a) => &a.reference_to,
        }
    }

    pub fn relationship_label(&self) -> &str {
        match self {
            RelationshipFieldAnswers::Lookup(a) => &a.relationship_label,
            RelationshipFieldAnswers::MasterDetail(a) => &a.relationship_label,
        }
    }

    pub fn relationship_name(&self) -> &str {
        match self {
            RelationshipFieldAnswers::Lookup(a) => &a.relationship_name,
            RelationshipFieldAnswers::MasterDetail(a) => &a.relationship_name,
        }
    }
}

/// Keep only the final segment of a selected object path.
///
/// Both `/` and the platform separator are treated as separators, and a
/// trailing separator is ignored: `force-app/main/default/objects/Account/`
/// becomes `Account`. A value without separators is returned unchanged.
pub fn strip_reference_path(value: &str) -> String {
    value
        .rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .find(|segment| !segment.is_empty())
        .unwrap_or(value)
        .to_string()
}

fn relationship_name_default(answers: &Answers) -> Option<Answer> {
    let label = answers.text(RELATIONSHIP_LABEL).filter(|label| !label.is_empty())?;
    let name = make_name_api_compatible(label);
    if name.is_empty() {
        None
    } else {
        Some(Answer::Text(name))
    }
}

fn relationship_questions(
    kind: RelationshipKind,
    child: &ObjectMetadata,
    package_directories: &[PathBuf],
    messages: &Messages,
) -> AppResult<Vec<Question>> {
    let is_lookup = kind == RelationshipKind::Lookup;
    let is_master_detail = kind == RelationshipKind::MasterDetail;

    let delete_constraints = DeleteConstraint::ALL
        .iter()
        .map(|constraint| -> AppResult<Choice> {
            Ok(Choice::new(
                constraint.as_str(),
                messages.get_message(constraint.message_key())?,
            ))
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(vec![
        object_prompt(
            package_directories,
            REFERENCE_TO,
            &messages.get_message("objectPrompt")?,
        )?,
        Question::input(RELATIONSHIP_LABEL, messages.get_message("relationshipLabel")?)
            .with_optional_default(child.plural_label.clone()),
        Question::input(RELATIONSHIP_NAME, messages.get_message("relationshipName")?)
            .with_default_fn(relationship_name_default),
        Question::select(
            DELETE_CONSTRAINT,
            messages.get_message("lookupDeleteConstraint")?,
            delete_constraints,
        )
        .with_default(DeleteConstraint::default().as_str())
        .when(move |_| is_lookup),
        Question::confirm(
            REPARENTABLE_MASTER_DETAIL,
            messages.get_message("reparentableMasterDetail")?,
        )
        .with_default(false)
        .when(move |_| is_master_detail),
        Question::confirm(
            WRITE_REQUIRES_MASTER_READ,
            messages.get_message("writeRequiresMasterRead")?,
        )
        .with_default(false)
        .when(move |_| is_master_detail),
    ])
}

fn shape_answers(kind: RelationshipKind, answers: &Answers) -> AppResult<RelationshipFieldAnswers> {
    let reference_to = strip_reference_path(&answers.require_text(REFERENCE_TO)?);
    let relationship_label = answers.require_text(RELATIONSHIP_LABEL)?;
    let relationship_name = answers.require_text(RELATIONSHIP_NAME)?;

    Ok(match kind {
        RelationshipKind::Lookup => RelationshipFieldAnswers::Lookup(LookupRelationshipAnswers {
            reference_to,
            relationship_label,
            relationship_name,
            delete_constraint: answers.require_text(DELETE_CONSTRAINT)?.parse()?,
        }),
        RelationshipKind::MasterDetail => {
            RelationshipFieldAnswers::MasterDetail(MasterDetailRelationshipAnswers {
                reference_to,
                relationship_label,
                relationship_name,
                reparentable_master_detail: answers.require_flag(REPARENTABLE_MASTER_DETAIL)?,
                write_requires_master_read: answers.require_flag(WRITE_REQUIRES_MASTER_READ)?,
            })
        }
    })
}

/// Ask for the properties of a relationship field.
///
/// The child object's metadata is read before anything is asked; if it
/// cannot be read or parsed the error is returned and no question is shown.
/// Nothing is written to disk.
pub fn relationship_field_prompts(
    request: &RelationshipFieldRequest,
    prompter: &mut dyn Prompter,
) -> AppResult<RelationshipFieldAnswers> {
    let child = read_object_metadata(&request.child_object_folder_path)?;
    let messages = Messages::load(RELATIONSHIP_BUNDLE)?;

    tracing::info!(
        "Prompting for {} relationship on {}",
        request.kind.as_str(),
        child.api_name
    );

    let questions =
        relationship_questions(request.kind, &child, &request.package_directories, &messages)?;
    let answers = ask_all(prompter, questions)?;

    shape_answers(request.kind, &answers)
}
