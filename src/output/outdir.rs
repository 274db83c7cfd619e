use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::CompareResult;

/// Substring marking a sibling directory as a previous screenshot run.
pub const SCREENS_MARKER: &str = "screens";

/// Pick (and create) the directory screenshots are written to.
///
/// A `requested` directory is created when missing; if that fails the source's parent
/// directory is used instead. Without a request a fresh `screens t<N>-offset_<offset>`
/// directory is made next to `source`, where `N` is one more than the number of sibling
/// directories already containing `screens` in their name.
pub fn resolve_output_dir(
    requested: Option<&Path>,
    source: &Path,
    offset: i64,
) -> CompareResult<PathBuf> {
    let parent = source_parent(source);

    if let Some(dir) = requested {
        return match std::fs::create_dir_all(dir) {
            Ok(()) => Ok(dir.to_path_buf()),
            Err(err) => {
                tracing::warn!(
                    requested = %dir.display(),
                    fallback = %parent.display(),
                    %err,
                    "could not create output directory; using the source directory"
                );
                Ok(parent)
            }
        };
    }

    let mut n = count_screen_dirs(&parent)? + 1;
    loop {
        let dir = parent.join(format!("{SCREENS_MARKER} t{n}-offset_{offset}"));
        match std::fs::create_dir(&dir) {
            Ok(()) => {
                tracing::info!(dir = %dir.display(), "created screenshot directory");
                return Ok(dir);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("create screenshot directory '{}'", dir.display()))
                    .into());
            }
        }
    }
}

fn source_parent(source: &Path) -> PathBuf {
    match source.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn count_screen_dirs(parent: &Path) -> CompareResult<usize> {
    let entries =
        std::fs::read_dir(parent).with_context(|| format!("read '{}'", parent.display()))?;
    let mut n = 0;
    for entry in entries {
        let entry = entry.with_context(|| format!("scan '{}'", parent.display()))?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir && entry.file_name().to_string_lossy().contains(SCREENS_MARKER) {
            n += 1;
        }
    }
    Ok(n)
}

#[cfg(test)]
#[path = "../../tests/unit/output/outdir.rs"]
mod tests;
