//! Selection of a local object.

use crate::question::{Choice, Question};
use sobject_core::{AppError, AppResult};
use sobject_metadata::find_object_candidates;
use std::path::PathBuf;

/// Build a select question listing the objects found in `package_dirs`.
///
/// The value of each choice is the object's folder path; the displayed name
/// is its label and API name.
pub fn object_prompt(package_dirs: &[PathBuf], name: &str, message: &str) -> AppResult<Question> {
    let candidates = find_object_candidates(package_dirs)?;
    if candidates.is_empty() {
        return Err(AppError::Metadata(format!(
            "No objects found in package directories: {:?}",
            package_dirs
        )));
    }

    let choices = candidates
        .iter()
        .map(|candidate| {
            Choice::new(
                candidate.folder.to_string_lossy(),
                candidate.display_label(),
            )
        })
        .collect();

    Ok(Question::select(name, message, choices))
}
