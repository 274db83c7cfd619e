use std::path::PathBuf;

/// Title used for the source clip when none is given.
pub const SOURCE_TITLE: &str = "Source";

/// Work out one title per clip from what the user gave.
///
/// - titles one short of the clip count: `Source` is prepended;
/// - no titles: `Source` followed by the encodes' file stems;
/// - anything else is returned as given, even when the count does not match (the mismatch is
///   reported when the titles are applied).
pub fn resolve_titles(given: &[String], paths: &[PathBuf]) -> Vec<String> {
    if given.is_empty() {
        let mut titles = vec![SOURCE_TITLE.to_string()];
        titles.extend(paths.iter().skip(1).map(|p| {
            p.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        }));
        return titles;
    }
    if given.len() + 1 == paths.len() {
        let mut titles = Vec::with_capacity(paths.len());
        titles.push(SOURCE_TITLE.to_string());
        titles.extend_from_slice(given);
        return titles;
    }
    given.to_vec()
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/titles.rs"]
mod tests;
