//! Field command handler.
//!
//! Prompts for the properties of a new custom field and writes its
//! `*.field-meta.xml` under the object's `fields` folder.

use clap::Args;
use sobject_core::{config::AppConfig, AppError, AppResult};
use sobject_metadata::{custom_field_name, write_field};
use sobject_prompt::messages::FIELD_BUNDLE;
use sobject_prompt::{
    ask_all, field_prompts, object_prompt, FieldRequest, Messages, Prompter, TerminalPrompter,
};
use std::path::PathBuf;

const OBJECT: &str = "object";

/// Generate a custom field
#[derive(Args, Debug)]
pub struct FieldCommand {
    /// Label of the field; the API name is derived from it
    #[arg(short, long)]
    pub label: String,

    /// Folder of the object to add the field to (prompted when omitted)
    #[arg(short, long)]
    pub object: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl FieldCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing field command for '{}'", self.label);
        tracing::debug!("Field options: {:?}", self);

        let full_name = custom_field_name(&self.label).ok_or_else(|| {
            AppError::Validation(format!(
                "Label '{}' does not contain any characters usable in an API name",
                self.label
            ))
        })?;

        let project = config.load_project()?;
        let package_directories = project.package_paths();

        let mut prompter = TerminalPrompter::stdio();
        let object_folder = match &self.object {
            Some(folder) => folder.clone(),
            None => self.select_object(&package_directories, &mut prompter)?,
        };

        let request = FieldRequest {
            label: self.label.clone(),
            object_folder,
            package_directories,
        };
        let properties = field_prompts(&request, &mut prompter)?;

        let field = properties.to_custom_field(&full_name, &self.label);
        let path = write_field(&request.object_folder, &field)?;

        if self.json {
            let output = serde_json::json!({
                "path": path,
                "fullName": full_name,
                "properties": properties,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Created {}", path.display());
        }

        Ok(())
    }

    fn select_object(
        &self,
        package_directories: &[PathBuf],
        prompter: &mut dyn Prompter,
    ) -> AppResult<PathBuf> {
        let messages = Messages::load(FIELD_BUNDLE)?;
        let message =
            messages.get_message_with("objectPrompt", &[("label", self.label.as_str())])?;

        let question = object_prompt(package_directories, OBJECT, &message)?;
        let answers = ask_all(prompter, vec![question])?;

        Ok(PathBuf::from(answers.require_text(OBJECT)?))
    }
}
