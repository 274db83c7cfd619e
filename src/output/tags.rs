//! Per-rendition filename tags.
//!
//! Screenshot files are named `<frame><tag>.png`, with one ASCII letter per rendition. Tags are
//! derived from the files already in the output directory so a rerun into the same directory
//! picks letters past the previous run's.

use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{CompareError, CompareResult};

/// Image extensions considered when scanning a directory for existing tags.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Distinct tag letters used by image files in `dir`, sorted ascending.
///
/// The tag of a file is the first ASCII letter of its name. A missing directory has no tags.
pub fn existing_tags(dir: &Path) -> CompareResult<Vec<char>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("read output directory '{}'", dir.display()))
                .into());
        }
    };

    let mut tags = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("scan '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || !is_image(&path) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(c) = name.chars().find(char::is_ascii_alphabetic) {
            tags.push(c);
        }
    }
    tags.sort_unstable();
    tags.dedup();
    Ok(tags)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|i| ext.eq_ignore_ascii_case(i)))
}

/// Pick `n` tags given the tags already present.
///
/// With nothing present the tags are `a`, `b`, ... Otherwise every existing tag is shifted
/// forward by `n`; if that yields fewer than `n` candidates the list is continued past the last
/// one, then cut to `n`. Every tag must stay an ASCII letter, else
/// [`CompareError::TagSpaceExhausted`].
pub fn allocate_tags(existing: &[char], n: usize) -> CompareResult<Vec<char>> {
    let shift = u32::try_from(n).map_err(|_| CompareError::validation("too many renditions"))?;
    let codes: Vec<u32> = if existing.is_empty() {
        (0..shift).map(|i| u32::from('a') + i).collect()
    } else {
        let mut codes: Vec<u32> = existing.iter().map(|&c| u32::from(c) + shift).collect();
        while codes.len() < n {
            let next = codes[codes.len() - 1] + 1;
            codes.push(next);
        }
        codes.truncate(n);
        codes
    };

    let last = existing.last().copied().unwrap_or('a');
    codes
        .into_iter()
        .map(|code| {
            char::from_u32(code)
                .filter(char::is_ascii_alphabetic)
                .ok_or_else(|| CompareError::TagSpaceExhausted { last, shift: n })
        })
        .collect()
}

/// [`existing_tags`] followed by [`allocate_tags`].
pub fn tags_for_directory(dir: &Path, n: usize) -> CompareResult<Vec<char>> {
    let existing = existing_tags(dir)?;
    let tags = allocate_tags(&existing, n)?;
    tracing::debug!(dir = %dir.display(), ?existing, ?tags, "allocated screenshot tags");
    Ok(tags)
}

#[cfg(test)]
#[path = "../../tests/unit/output/tags.rs"]
mod tests;
