//! Message catalog for prompt text.
//!
//! Bundles are flat YAML maps from message key to text, compiled into the
//! binary. Text may contain Handlebars placeholders filled by
//! [`Messages::get_message_with`].

use handlebars::Handlebars;
use sobject_core::{AppError, AppResult};
use std::collections::{BTreeMap, HashMap};

/// Bundle name of the relationship field prompts.
pub const RELATIONSHIP_BUNDLE: &str = "prompts.relationship";

/// Bundle name of the custom field prompts.
pub const FIELD_BUNDLE: &str = "prompts.field";

const BUNDLES: &[(&str, &str)] = &[
    (
        RELATIONSHIP_BUNDLE,
        include_str!("../messages/prompts.relationship.yml"),
    ),
    (FIELD_BUNDLE, include_str!("../messages/prompts.field.yml")),
];

/// A loaded message bundle.
#[derive(Debug, Clone)]
pub struct Messages {
    bundle: String,
    messages: BTreeMap<String, String>,
}

impl Messages {
    /// Load a bundled catalog by name.
    ///
    /// # Example
    /// ```
    /// use sobject_prompt::Messages;
    ///
    /// let messages = Messages::load("prompts.relationship").unwrap();
    /// assert_eq!(messages.get_message("relationshipLabel").unwrap(), "Relationship label");
    /// ```
    pub fn load(bundle: &str) -> AppResult<Self> {
        let source = BUNDLES
            .iter()
            .find(|(name, _)| *name == bundle)
            .map(|(_, source)| *source)
            .ok_or_else(|| AppError::Prompt(format!("Unknown message bundle: {}", bundle)))?;

        Self::from_yaml(bundle, source)
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml(bundle: &str, source: &str) -> AppResult<Self> {
        let messages: BTreeMap<String, String> = serde_yaml::from_str(source).map_err(|e| {
            AppError::Prompt(format!("Failed to parse message bundle {}: {}", bundle, e))
        })?;

        tracing::debug!("Loaded {} messages from {}", messages.len(), bundle);

        Ok(Self {
            bundle: bundle.to_string(),
            messages,
        })
    }

    /// Name of this bundle.
    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    /// Raw message text for `key`.
    pub fn get_message(&self, key: &str) -> AppResult<String> {
        self.messages.get(key).cloned().ok_or_else(|| {
            AppError::Prompt(format!("Missing message {} in bundle {}", key, self.bundle))
        })
    }

    /// Message text for `key` with placeholders filled from `params`.
    pub fn get_message_with(&self, key: &str, params: &[(&str, &str)]) -> AppResult<String> {
        let template = self.get_message(key)?;
        let data: HashMap<&str, &str> = params.iter().copied().collect();

        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .render_template(&template, &data)
            .map_err(|e| AppError::Prompt(format!("Failed to render message {}: {}", key, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalogs_parse() {
        for (name, _) in BUNDLES {
            let messages = Messages::load(name).unwrap();
            assert_eq!(messages.bundle(), *name);
        }
    }

    #[test]
    fn test_each_bundle_has_object_prompt() {
        let names: Vec<&str> = BUNDLES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![RELATIONSHIP_BUNDLE, FIELD_BUNDLE]);

        for name in names {
            let messages = Messages::load(name).unwrap();
            assert!(messages.get_message("objectPrompt").is_ok(), "{name}");
        }
    }

    #[test]
    fn test_relationship_keys_present() {
        let messages = Messages::load(RELATIONSHIP_BUNDLE).unwrap();
        for key in [
            "objectPrompt",
            "lookupDeleteConstraint",
            "lookupDeleteConstraint.setNull",
            "lookupDeleteConstraint.restrict",
            "lookupDeleteConstraint.cascade",
            "reparentableMasterDetail",
            "writeRequiresMasterRead",
        ] {
            assert!(messages.get_message(key).is_ok(), "missing {key}");
        }
    }

    #[test]
    fn test_unknown_bundle_and_key() {
        assert!(matches!(
            Messages::load("prompts.nope"),
            Err(AppError::Prompt(_))
        ));

        let messages = Messages::load(RELATIONSHIP_BUNDLE).unwrap();
        assert!(matches!(
            messages.get_message("nope"),
            Err(AppError::Prompt(_))
        ));
    }

    #[test]
    fn test_parameters_are_not_html_escaped() {
        let messages = Messages::from_yaml("test", "greet: Hello {{name}}!").unwrap();
        let text = messages
            .get_message_with("greet", &[("name", "<Widget & Co>")])
            .unwrap();
        assert_eq!(text, "Hello <Widget & Co>!");
    }

    #[test]
    fn test_field_object_prompt_renders_label() {
        let messages = Messages::load(FIELD_BUNDLE).unwrap();
        let text = messages
            .get_message_with("objectPrompt", &[("label", "Due Date")])
            .unwrap();
        assert_eq!(text, r#"Select the object to add the "Due Date" field to"#);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(Messages::from_yaml("bad", "key: [unclosed").is_err());
    }
}
