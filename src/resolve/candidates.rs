//! Candidate name list construction

use super::predicates::{file_name_of, non_blank};

/// Builds the ordered candidate list for a resolution call.
///
/// The override's file name (path prefix stripped) comes first, followed by
/// the fallbacks. Duplicates are dropped case-insensitively; the first
/// occurrence keeps its original casing.
pub fn build_candidate_names<S: AsRef<str>>(
    override_path: Option<&str>,
    fallbacks: &[S],
) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(fallbacks.len() + 1);

    let first = non_blank(override_path).map(file_name_of);
    let rest = fallbacks.iter().map(|s| s.as_ref().trim());

    for name in first.into_iter().chain(rest) {
        if name.is_empty() {
            continue;
        }
        let folded = name.to_lowercase();
        if names.iter().any(|existing| existing.to_lowercase() == folded) {
            continue;
        }
        names.push(name.to_string());
    }

    names
}
