//! Prompters answer one question at a time.

use crate::question::{Answer, Choice, PendingQuestion, QuestionKind};
use sobject_core::{AppError, AppResult};
use std::collections::HashMap;
use std::io::{BufRead, Write};

/// Something that can answer a [`PendingQuestion`].
pub trait Prompter {
    /// Answer `question`. Errors abort the flow the question belongs to.
    fn ask(&mut self, question: &PendingQuestion<'_>) -> AppResult<Answer>;
}

/// Line-based prompter over any reader/writer pair.
///
/// An empty line accepts the offered default. Select questions accept a
/// 1-based index or a choice value; confirm questions accept y/yes/n/no.
/// Unrecognised entries and input answers failing their check are
/// re-asked. End of input fails the question.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on stderr and read from stdin, keeping stdout for command output.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, name: &str) -> AppResult<String> {
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(AppError::Prompt(format!(
                "Input closed before {} was answered",
                name
            )));
        }
        Ok(line.trim().to_string())
    }

    fn ask_input(&mut self, question: &PendingQuestion<'_>) -> AppResult<Answer> {
        let default = question.default.as_ref().and_then(Answer::as_text);

        loop {
            match default {
                Some(default) if !default.is_empty() => {
                    write!(self.output, "? {} ({}): ", question.message, default)?
                }
                _ => write!(self.output, "? {}: ", question.message)?,
            }

            let line = self.read_answer(question.name)?;
            let text = if line.is_empty() {
                default.unwrap_or_default().to_string()
            } else {
                line
            };

            match question.validate_text(&text) {
                Ok(()) => return Ok(Answer::Text(text)),
                Err(message) => writeln!(self.output, "  {}", message)?,
            }
        }
    }

    fn ask_select(&mut self, question: &PendingQuestion<'_>, choices: &[Choice]) -> AppResult<Answer> {
        if choices.is_empty() {
            return Err(AppError::Prompt(format!(
                "No choices available for {}",
                question.name
            )));
        }

        let default = question.default.as_ref().and_then(Answer::as_text);

        writeln!(self.output, "? {}", question.message)?;
        for (index, choice) in choices.iter().enumerate() {
            let marker = if Some(choice.value.as_str()) == default {
                " (default)"
            } else {
                ""
            };
            writeln!(self.output, "  {}) {}{}", index + 1, choice.name, marker)?;
        }

        loop {
            write!(self.output, "  Answer: ")?;
            let line = self.read_answer(question.name)?;

            if line.is_empty() {
                if let Some(default) = default {
                    return Ok(Answer::Text(default.to_string()));
                }
            } else if let Some(choice) = pick_choice(choices, &line) {
                return Ok(Answer::Text(choice.value.clone()));
            }

            writeln!(
                self.output,
                "  Enter a number between 1 and {}",
                choices.len()
            )?;
        }
    }

    fn ask_confirm(&mut self, question: &PendingQuestion<'_>) -> AppResult<Answer> {
        let default = question.default.as_ref().and_then(Answer::as_bool);
        let hint = match default {
            Some(true) => "Y/n",
            Some(false) => "y/N",
            None => "y/n",
        };

        loop {
            write!(self.output, "? {} ({}) ", question.message, hint)?;
            let line = self.read_answer(question.name)?;

            match line.to_ascii_lowercase().as_str() {
                "" => {
                    if let Some(default) = default {
                        return Ok(Answer::Bool(default));
                    }
                }
                "y" | "yes" | "true" => return Ok(Answer::Bool(true)),
                "n" | "no" | "false" => return Ok(Answer::Bool(false)),
                _ => {}
            }

            writeln!(self.output, "  Answer y or n")?;
        }
    }
}

fn pick_choice<'c>(choices: &'c [Choice], entry: &str) -> Option<&'c Choice> {
    if let Ok(index) = entry.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| choices.get(i));
    }
    choices
        .iter()
        .find(|choice| choice.value.eq_ignore_ascii_case(entry))
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask(&mut self, question: &PendingQuestion<'_>) -> AppResult<Answer> {
        match question.kind {
            QuestionKind::Input => self.ask_input(question),
            QuestionKind::Select(choices) => self.ask_select(question, choices),
            QuestionKind::Confirm => self.ask_confirm(question),
        }
    }
}

/// A question as seen by a [`ScriptedPrompter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskedQuestion {
    pub name: String,
    pub message: String,
    pub default: Option<Answer>,
    /// Values of the offered choices, empty unless a select question
    pub choices: Vec<String>,
}

/// Prompter answering from a preset script.
///
/// Questions without a scripted answer take their default; a question
/// with neither fails, as does a text answer failing the question's check.
/// Every question asked is recorded.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: HashMap<String, Answer>,
    asked: Vec<AskedQuestion>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(mut self, name: impl Into<String>, answer: impl Into<Answer>) -> Self {
        self.answers.insert(name.into(), answer.into());
        self
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> &[AskedQuestion] {
        &self.asked
    }

    pub fn asked_question(&self, name: &str) -> Option<&AskedQuestion> {
        self.asked.iter().find(|question| question.name == name)
    }

    pub fn was_asked(&self, name: &str) -> bool {
        self.asked_question(name).is_some()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &PendingQuestion<'_>) -> AppResult<Answer> {
        let choices = match question.kind {
            QuestionKind::Select(choices) => choices.iter().map(|c| c.value.clone()).collect(),
            _ => Vec::new(),
        };
        self.asked.push(AskedQuestion {
            name: question.name.to_string(),
            message: question.message.to_string(),
            default: question.default.clone(),
            choices,
        });

        let answer = self
            .answers
            .get(question.name)
            .cloned()
            .or_else(|| question.default.clone())
            .ok_or_else(|| {
                AppError::Prompt(format!("No scripted answer for {}", question.name))
            })?;

        if let (QuestionKind::Input, Answer::Text(text)) = (question.kind, &answer) {
            question.validate_text(text).map_err(AppError::Validation)?;
        }
        Ok(answer)
    }
}
