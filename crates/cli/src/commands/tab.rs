//! Tab command handler.
//!
//! Writes a custom tab for a custom object into a `tabs` folder.

use clap::Args;
use sobject_core::{AppError, AppResult};
use sobject_metadata::{write_tab, CustomTab};
use std::path::{Path, PathBuf};

/// Generate a custom tab for a custom object
#[derive(Args, Debug)]
pub struct TabCommand {
    /// API name of the custom object, e.g. Widget__c
    #[arg(short, long)]
    pub object: String,

    /// Path to a folder named `tabs` that will hold the tab file
    #[arg(short, long)]
    pub directory: PathBuf,

    /// Icon number (1 to 100) setting the tab's color scheme and icon
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub icon: u8,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// The tab folder must be named `tabs`.
pub fn validate_tab_directory(directory: &Path) -> AppResult<()> {
    match directory.file_name().and_then(|name| name.to_str()) {
        Some("tabs") => Ok(()),
        _ => Err(AppError::Validation(format!(
            "The directory must be a folder named 'tabs', got {}",
            directory.display()
        ))),
    }
}

/// Tabs can only be generated for custom objects.
pub fn validate_custom_object(object: &str) -> AppResult<()> {
    let base = object.strip_suffix("__c").unwrap_or_default();
    if base.is_empty() || !sobject_metadata::is_valid_api_name(base) {
        return Err(AppError::Validation(format!(
            "'{}' is not a custom object API name (expected a name ending in __c)",
            object
        )));
    }
    Ok(())
}

impl TabCommand {
    pub async fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing tab command for '{}'", self.object);
        tracing::debug!("Tab options: {:?}", self);

        validate_tab_directory(&self.directory)?;
        validate_custom_object(&self.object)?;

        let path = write_tab(&self.directory, &self.object, &CustomTab::for_object(self.icon))?;

        if self.json {
            let output = serde_json::json!({
                "path": path,
                "object": self.object,
                "icon": self.icon,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Created {}", path.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tab_directory() {
        assert!(validate_tab_directory(Path::new("force-app/main/default/tabs")).is_ok());
        assert!(validate_tab_directory(Path::new("force-app/main/default/tabs/")).is_ok());
        assert!(validate_tab_directory(Path::new("force-app/main/default/objects")).is_err());
        assert!(validate_tab_directory(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_custom_object() {
        assert!(validate_custom_object("Widget__c").is_ok());
        assert!(validate_custom_object("My_Widget__c").is_ok());
        assert!(validate_custom_object("Account").is_err());
        assert!(validate_custom_object("__c").is_err());
        assert!(validate_custom_object("9Lives__c").is_err());
    }
}
