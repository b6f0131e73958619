//! Question model and the sequential runner.
//!
//! A flow is an ordered list of [`Question`]s. Each question may carry a
//! visibility predicate and a default, both evaluated against the answers
//! collected so far, at the moment the question is reached.

use crate::prompter::Prompter;
use sobject_core::{AppError, AppResult};
use std::collections::BTreeMap;

/// A single answer value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Free text or the value of a selected choice
    Text(String),
    /// Yes/no
    Bool(bool),
}

impl Answer {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(text) => Some(text),
            Answer::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Answer::Bool(value) => Some(*value),
            Answer::Text(_) => None,
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Answer::Bool(value)
    }
}

/// Answers collected so far, keyed by question name.
///
/// Questions that were skipped never get a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    values: BTreeMap<String, Answer>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, answer: Answer) {
        self.values.insert(name.into(), answer);
    }

    pub fn get(&self, name: &str) -> Option<&Answer> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Text answer for `name`, if that question was answered with text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Answer::as_text)
    }

    /// Boolean answer for `name`, if that question was answered with yes/no.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Answer::as_bool)
    }

    pub fn require_text(&self, name: &str) -> AppResult<String> {
        self.text(name)
            .map(str::to_string)
            .ok_or_else(|| AppError::Prompt(format!("Missing answer for {}", name)))
    }

    pub fn require_flag(&self, name: &str) -> AppResult<bool> {
        self.flag(name)
            .ok_or_else(|| AppError::Prompt(format!("Missing answer for {}", name)))
    }
}

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Value recorded as the answer
    pub value: String,
    /// Text shown to the user
    pub name: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
        }
    }
}

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free text
    Input,
    /// Pick one of the choices
    Select(Vec<Choice>),
    /// Yes/no
    Confirm,
}

type Visibility = Box<dyn Fn(&Answers) -> bool>;
type DeriveDefault = Box<dyn Fn(&Answers) -> Option<Answer>>;
type Validate = dyn Fn(&str, &Answers) -> Result<(), String>;

/// Shown when a required input question is left blank.
pub const VALUE_REQUIRED: &str = "A value is required";

enum DefaultValue {
    None,
    Static(Answer),
    Derived(DeriveDefault),
}

/// A question in a prompt flow.
pub struct Question {
    name: String,
    message: String,
    kind: QuestionKind,
    when: Option<Visibility>,
    default: DefaultValue,
    optional: bool,
    validate: Option<Box<Validate>>,
}

impl std::fmt::Debug for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Question")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("conditional", &self.when.is_some())
            .field("optional", &self.optional)
            .finish()
    }
}

impl Question {
    fn new(name: impl Into<String>, message: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            kind,
            when: None,
            default: DefaultValue::None,
            optional: false,
            validate: None,
        }
    }

    pub fn input(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, message, QuestionKind::Input)
    }

    pub fn select(name: impl Into<String>, message: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self::new(name, message, QuestionKind::Select(choices))
    }

    pub fn confirm(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, message, QuestionKind::Confirm)
    }

    /// Offer a fixed default.
    pub fn with_default(mut self, default: impl Into<Answer>) -> Self {
        self.default = DefaultValue::Static(default.into());
        self
    }

    /// Offer `default` if present, otherwise no default.
    pub fn with_optional_default(self, default: Option<impl Into<Answer>>) -> Self {
        match default {
            Some(default) => self.with_default(default),
            None => self,
        }
    }

    /// Derive the default from earlier answers when the question is reached.
    pub fn with_default_fn<F>(mut self, derive: F) -> Self
    where
        F: Fn(&Answers) -> Option<Answer> + 'static,
    {
        self.default = DefaultValue::Derived(Box::new(derive));
        self
    }

    /// Only ask when `predicate` holds for the earlier answers.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Answers) -> bool + 'static,
    {
        self.when = Some(Box::new(predicate));
        self
    }

    /// Accept a blank answer to an input question. Input questions are
    /// required otherwise.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Check text answers against earlier answers before accepting them.
    ///
    /// The error text is shown to the user, who is asked again.
    pub fn with_validate<F>(mut self, validate: F) -> Self
    where
        F: Fn(&str, &Answers) -> Result<(), String> + 'static,
    {
        self.validate = Some(Box::new(validate));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn is_visible(&self, answers: &Answers) -> bool {
        self.when.as_ref().map_or(true, |predicate| predicate(answers))
    }

    pub fn resolve_default(&self, answers: &Answers) -> Option<Answer> {
        match &self.default {
            DefaultValue::None => None,
            DefaultValue::Static(answer) => Some(answer.clone()),
            DefaultValue::Derived(derive) => derive(answers),
        }
    }

    /// Present this question, resolving its default against `answers`.
    pub fn pending<'a>(&'a self, answers: &'a Answers) -> PendingQuestion<'a> {
        PendingQuestion {
            name: &self.name,
            message: &self.message,
            kind: &self.kind,
            default: self.resolve_default(answers),
            required: !self.optional,
            check: self
                .validate
                .as_deref()
                .map(|validate| AnswerCheck { validate, answers }),
        }
    }
}

#[derive(Clone, Copy)]
struct AnswerCheck<'a> {
    validate: &'a Validate,
    answers: &'a Answers,
}

/// A question as presented to a [`Prompter`], with its default resolved.
#[derive(Clone)]
pub struct PendingQuestion<'a> {
    pub name: &'a str,
    pub message: &'a str,
    pub kind: &'a QuestionKind,
    pub default: Option<Answer>,
    required: bool,
    check: Option<AnswerCheck<'a>>,
}

impl std::fmt::Debug for PendingQuestion<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingQuestion")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("required", &self.required)
            .finish()
    }
}

impl<'a> PendingQuestion<'a> {
    /// A required question with no answer check.
    pub fn new(
        name: &'a str,
        message: &'a str,
        kind: &'a QuestionKind,
        default: Option<Answer>,
    ) -> Self {
        Self {
            name,
            message,
            kind,
            default,
            required: true,
            check: None,
        }
    }

    /// Allow a blank answer.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Check a text answer, after any default has been substituted.
    ///
    /// Blank input is rejected for required input questions; the
    /// question's own check runs next.
    pub fn validate_text(&self, text: &str) -> Result<(), String> {
        if self.required && matches!(self.kind, QuestionKind::Input) && text.trim().is_empty() {
            return Err(VALUE_REQUIRED.to_string());
        }
        match self.check {
            Some(check) => (check.validate)(text, check.answers),
            None => Ok(()),
        }
    }
}

fn check_answer(question: &PendingQuestion<'_>, answer: &Answer) -> AppResult<()> {
    let matches = match question.kind {
        QuestionKind::Confirm => matches!(answer, Answer::Bool(_)),
        QuestionKind::Input | QuestionKind::Select(_) => matches!(answer, Answer::Text(_)),
    };

    if matches {
        Ok(())
    } else {
        Err(AppError::Prompt(format!(
            "Answer {:?} does not fit question {}",
            answer, question.name
        )))
    }
}

/// Ask `questions` in order and collect the answers.
///
/// Invisible questions are skipped and leave no key behind. Defaults,
/// visibility and answer checks only ever see answers to earlier questions.
/// Re-asking on an invalid answer is up to the prompter; any prompter
/// failure aborts the whole flow.
pub fn ask_all(prompter: &mut dyn Prompter, questions: Vec<Question>) -> AppResult<Answers> {
    let mut answers = Answers::new();

    for question in &questions {
        if !question.is_visible(&answers) {
            tracing::debug!("Skipping question {}", question.name);
            continue;
        }

        let answer = {
            let pending = question.pending(&answers);
            let answer = prompter.ask(&pending)?;
            check_answer(&pending, &answer)?;
            answer
        };

        tracing::debug!("Answered question {}", question.name);
        answers.insert(question.name.clone(), answer);
    }

    Ok(answers)
}
