//! Prompts for a new custom field.

use crate::messages::{Messages, FIELD_BUNDLE};
use crate::prompter::Prompter;
use crate::question::{ask_all, Answer, Answers, Choice, Question};
use crate::relationship::{
    relationship_field_prompts, RelationshipFieldAnswers, RelationshipFieldRequest,
    RelationshipKind,
};
use serde::Serialize;
use sobject_core::{AppError, AppResult};
use sobject_metadata::{read_object_metadata, CustomField};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

const TYPE: &str = "type";
const DESCRIPTION: &str = "description";
const LENGTH: &str = "length";
const PRECISION: &str = "precision";
const SCALE: &str = "scale";
const VISIBLE_LINES: &str = "visibleLines";
const REQUIRED: &str = "required";
const DEFAULT_VALUE: &str = "defaultValue";

const TEXT_LENGTH: RangeInclusive<u32> = 1..=255;
const LONG_TEXT_LENGTH: RangeInclusive<u32> = 256..=131_072;
const NUMBER_PRECISION: RangeInclusive<u32> = 1..=18;
const VISIBLE_LINES_RANGE: RangeInclusive<u32> = 2..=50;
const LONG_TEXT_DEFAULT_LENGTH: u32 = 32_768;

/// Supported custom field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Checkbox,
    Date,
    LongTextArea,
    Lookup,
    MasterDetail,
    Number,
    Text,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::Checkbox,
        FieldType::Date,
        FieldType::LongTextArea,
        FieldType::Lookup,
        FieldType::MasterDetail,
        FieldType::Number,
        FieldType::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Checkbox => "Checkbox",
            FieldType::Date => "Date",
            FieldType::LongTextArea => "LongTextArea",
            FieldType::Lookup => "Lookup",
            FieldType::MasterDetail => "MasterDetail",
            FieldType::Number => "Number",
            FieldType::Text => "Text",
        }
    }

    /// Relationship kind for relationship types.
    pub fn relationship_kind(&self) -> Option<RelationshipKind> {
        match self {
            FieldType::Lookup => Some(RelationshipKind::Lookup),
            FieldType::MasterDetail => Some(RelationshipKind::MasterDetail),
            _ => None,
        }
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|field_type| field_type.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::Validation(format!("Unsupported field type: {}", s)))
    }
}

/// Input to [`field_prompts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRequest {
    /// Field label
    pub label: String,
    /// Folder of the object receiving the field
    pub object_folder: PathBuf,
    /// Source roots searched for objects to reference
    pub package_directories: Vec<PathBuf>,
}

/// Everything collected for a new field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldProperties {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_lines: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<RelationshipFieldAnswers>,
}

impl FieldProperties {
    /// Merge the collected properties into a field document.
    pub fn to_custom_field(&self, full_name: &str, label: &str) -> CustomField {
        let mut field = CustomField::new(full_name, label, self.field_type.as_str());
        field.description = self.description.clone();
        field.required = self.required;
        field.length = self.length;
        field.precision = self.precision;
        field.scale = self.scale;
        field.visible_lines = self.visible_lines;
        field.default_value = self.default_value.map(|value| value.to_string());

        match &self.relationship {
            Some(RelationshipFieldAnswers::Lookup(lookup)) => {
                field.reference_to = Some(lookup.reference_to.clone());
                field.relationship_label = Some(lookup.relationship_label.clone());
                field.relationship_name = Some(lookup.relationship_name.clone());
                field.delete_constraint = Some(lookup.delete_constraint.as_str().to_string());
            }
            Some(RelationshipFieldAnswers::MasterDetail(master_detail)) => {
                field.reference_to = Some(master_detail.reference_to.clone());
                field.relationship_label = Some(master_detail.relationship_label.clone());
                field.relationship_name = Some(master_detail.relationship_name.clone());
                field.reparentable_master_detail = Some(master_detail.reparentable_master_detail);
                field.write_requires_master_read = Some(master_detail.write_requires_master_read);
            }
            None => {}
        }

        field
    }
}

fn type_is(types: &'static [FieldType]) -> impl Fn(&Answers) -> bool {
    move |answers: &Answers| {
        answers
            .text(TYPE)
            .is_some_and(|answer| types.iter().any(|t| t.as_str() == answer))
    }
}

fn length_default(answers: &Answers) -> Option<Answer> {
    match answers.text(TYPE)? {
        "LongTextArea" => Some(Answer::Text(LONG_TEXT_DEFAULT_LENGTH.to_string())),
        _ => Some(Answer::Text(TEXT_LENGTH.end().to_string())),
    }
}

fn length_range(answers: &Answers) -> RangeInclusive<u32> {
    match answers.text(TYPE) {
        Some("LongTextArea") => LONG_TEXT_LENGTH,
        _ => TEXT_LENGTH,
    }
}

fn scale_range(answers: &Answers) -> RangeInclusive<u32> {
    let precision = answers
        .text(PRECISION)
        .and_then(|precision| precision.parse().ok())
        .unwrap_or(*NUMBER_PRECISION.end());
    0..=precision
}

fn number_in_range(
    messages: &Messages,
    name: &str,
    value: &str,
    range: RangeInclusive<u32>,
) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(number) if range.contains(&number) => Ok(number),
        _ => {
            let min = range.start().to_string();
            let max = range.end().to_string();
            Err(messages
                .get_message_with(
                    "invalidNumber",
                    &[
                        ("name", name),
                        ("min", min.as_str()),
                        ("max", max.as_str()),
                        ("value", value),
                    ],
                )
                .unwrap_or_else(|e| e.to_string()))
        }
    }
}

fn check_number<F>(
    messages: &Messages,
    name: &'static str,
    range: F,
) -> impl Fn(&str, &Answers) -> Result<(), String>
where
    F: Fn(&Answers) -> RangeInclusive<u32>,
{
    let messages = messages.clone();
    move |value: &str, answers: &Answers| {
        number_in_range(&messages, name, value, range(answers)).map(|_| ())
    }
}

fn field_questions(messages: &Messages) -> AppResult<Vec<Question>> {
    let types = FieldType::ALL
        .iter()
        .map(|t| Choice::new(t.as_str(), t.as_str()))
        .collect();

    Ok(vec![
        Question::select(TYPE, messages.get_message("typePrompt")?, types)
            .with_default(FieldType::Text.as_str()),
        Question::input(DESCRIPTION, messages.get_message("description")?)
            .with_default("")
            .optional(),
        Question::input(LENGTH, messages.get_message("length")?)
            .with_default_fn(length_default)
            .with_validate(check_number(messages, LENGTH, length_range))
            .when(type_is(&[FieldType::Text, FieldType::LongTextArea])),
        Question::input(PRECISION, messages.get_message("precision")?)
            .with_default(NUMBER_PRECISION.end().to_string())
            .with_validate(check_number(messages, PRECISION, |_: &Answers| NUMBER_PRECISION))
            .when(type_is(&[FieldType::Number])),
        Question::input(SCALE, messages.get_message("scale")?)
            .with_default("0")
            .with_validate(check_number(messages, SCALE, scale_range))
            .when(type_is(&[FieldType::Number])),
        Question::input(VISIBLE_LINES, messages.get_message("visibleLines")?)
            .with_default("3")
            .with_validate(check_number(messages, VISIBLE_LINES, |_: &Answers| {
                VISIBLE_LINES_RANGE
            }))
            .when(type_is(&[FieldType::LongTextArea])),
        Question::confirm(REQUIRED, messages.get_message("required")?)
            .with_default(false)
            .when(type_is(&[FieldType::Text, FieldType::Number, FieldType::Date])),
        Question::confirm(DEFAULT_VALUE, messages.get_message("checkboxDefault")?)
            .with_default(false)
            .when(type_is(&[FieldType::Checkbox])),
    ])
}

fn parse_number(
    messages: &Messages,
    answers: &Answers,
    name: &str,
    range: RangeInclusive<u32>,
) -> AppResult<Option<u32>> {
    answers
        .text(name)
        .map(|value| number_in_range(messages, name, value, range).map_err(AppError::Validation))
        .transpose()
}

/// Ask for the properties of a new field on `request.object_folder`.
///
/// The object folder must hold readable object metadata; nothing is asked
/// otherwise. Relationship types continue with the relationship prompts.
/// Numeric answers are checked against their allowed range as they are
/// given.
pub fn field_prompts(
    request: &FieldRequest,
    prompter: &mut dyn Prompter,
) -> AppResult<FieldProperties> {
    let object = read_object_metadata(&request.object_folder)?;
    tracing::debug!("Adding field '{}' to {}", request.label, object.api_name);

    let messages = Messages::load(FIELD_BUNDLE)?;
    let answers = ask_all(prompter, field_questions(&messages)?)?;

    let field_type: FieldType = answers.require_text(TYPE)?.parse()?;
    tracing::info!("Collecting {} field '{}'", field_type.as_str(), request.label);

    let precision = parse_number(&messages, &answers, PRECISION, NUMBER_PRECISION)?;
    let scale = match precision {
        Some(precision) => parse_number(&messages, &answers, SCALE, 0..=precision)?,
        None => None,
    };

    let relationship = match field_type.relationship_kind() {
        Some(kind) => Some(relationship_field_prompts(
            &RelationshipFieldRequest {
                kind,
                package_directories: request.package_directories.clone(),
                child_object_folder_path: request.object_folder.clone(),
            },
            prompter,
        )?),
        None => None,
    };

    Ok(FieldProperties {
        field_type,
        description: answers
            .text(DESCRIPTION)
            .filter(|description| !description.is_empty())
            .map(str::to_string),
        required: answers.flag(REQUIRED),
        length: parse_number(&messages, &answers, LENGTH, length_range(&answers))?,
        precision,
        scale,
        visible_lines: parse_number(&messages, &answers, VISIBLE_LINES, VISIBLE_LINES_RANGE)?,
        default_value: answers.flag(DEFAULT_VALUE),
        relationship,
    })
}
