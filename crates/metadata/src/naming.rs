//! API name derivation.

/// Suffix Salesforce appends to custom field and object API names.
pub const CUSTOM_SUFFIX: &str = "__c";

/// Turn free text (usually a label) into an API-compatible name.
///
/// Spaces and hyphens become underscores, any other character outside
/// `[A-Za-z0-9_]` is dropped, runs of underscores collapse to one, and
/// leading non-letters and trailing underscores are stripped. The result is
/// either empty or matches `[A-Za-z][A-Za-z0-9_]*`, and applying the
/// function twice gives the same result as applying it once.
pub fn make_name_api_compatible(input: &str) -> String {
    let mut collapsed = String::with_capacity(input.len());

    for c in input.chars() {
        let mapped = match c {
            c if c.is_ascii_alphanumeric() => c,
            ' ' | '-' | '_' => '_',
            _ => continue,
        };
        if mapped == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(mapped);
    }

    collapsed
        .trim_start_matches(|c: char| !c.is_ascii_alphabetic())
        .trim_end_matches('_')
        .to_string()
}

/// Whether `name` is a valid API name: a letter followed by letters, digits or underscores.
pub fn is_valid_api_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Full API name of a custom field derived from its label, e.g. `"Due Date"` -> `"Due_Date__c"`.
///
/// Returns `None` when the label contains no usable characters.
pub fn custom_field_name(label: &str) -> Option<String> {
    let base = make_name_api_compatible(label);
    if base.is_empty() {
        None
    } else {
        Some(format!("{}{}", base, CUSTOM_SUFFIX))
    }
}
