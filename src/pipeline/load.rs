use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::clip::node::Clip;
use crate::foundation::error::CompareResult;
use crate::media::decode::Decoder;
use crate::pipeline::config::ClipSources;

/// File suffixes picked up when scanning a directory for encodes.
pub const ENCODE_SUFFIXES: [&str; 4] = ["mp4", "mkv", "m2ts", "ts"];

/// Clips of one run, source first, with the files they came from.
#[derive(Clone, Debug)]
pub struct LoadedClips {
    pub paths: Vec<PathBuf>,
    pub clips: Vec<Clip>,
}

/// Paths of every rendition, source first.
///
/// Explicit encodes win over `input_directory`. A directory scan keeps video files with a
/// known suffix whose stem differs from the source's, sorted by path.
pub fn rendition_paths(sources: &ClipSources) -> CompareResult<Vec<PathBuf>> {
    let mut paths = vec![sources.source.clone()];
    if !sources.encodes.is_empty() {
        paths.extend(sources.encodes.iter().cloned());
    } else if let Some(dir) = &sources.input_directory {
        paths.extend(scan_encodes(dir, &sources.source)?);
    }
    Ok(paths)
}

/// Video files in `dir` other than `source`, sorted by path.
pub fn scan_encodes(dir: &Path, source: &Path) -> CompareResult<Vec<PathBuf>> {
    let source_stem = source.file_stem();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read input directory '{}'", dir.display()))?;

    let mut found = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("scan input directory '{}'", dir.display()))?
            .path();
        let known = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ENCODE_SUFFIXES.iter().any(|s| ext.eq_ignore_ascii_case(s)));
        if known && path.is_file() && path.file_stem() != source_stem {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Open every rendition with `decoder`.
#[tracing::instrument(skip_all, fields(source = %sources.source.display()))]
pub fn load_clips(sources: &ClipSources, decoder: &dyn Decoder) -> CompareResult<LoadedClips> {
    let paths = rendition_paths(sources)?;
    tracing::info!(source = %paths[0].display(), encodes = ?&paths[1..], "loading clips");
    let clips = paths
        .iter()
        .map(|p| decoder.open(p))
        .collect::<CompareResult<Vec<_>>>()?;
    Ok(LoadedClips { paths, clips })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/load.rs"]
mod tests;
