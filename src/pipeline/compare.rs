use crate::clip::ops;
use crate::foundation::core::{Dimensions, FrameRange};
use crate::foundation::error::{CompareError, CompareResult};
use crate::media::preview::Viewer;
use crate::pipeline::config::CompareConfig;
use crate::pipeline::load::load_clips;
use crate::pipeline::prepare::{Collaborators, align_renditions, prepare_clips};
use crate::pipeline::titles::resolve_titles;

/// What a compare run settled on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompareSummary {
    pub titles: Vec<String>,
    pub crop: Dimensions,
    /// Size the clips were shown at.
    pub view: Dimensions,
}

/// Load the source and its encodes, align and prepare them, and hand them to `viewer`.
#[tracing::instrument(skip_all, fields(source = %cfg.clips.source.display()))]
pub fn run_compare(
    cfg: &CompareConfig,
    collab: &Collaborators<'_>,
    viewer: &mut dyn Viewer,
) -> CompareResult<CompareSummary> {
    if cfg.clips.encodes.is_empty() && cfg.clips.input_directory.is_none() {
        return Err(CompareError::validation(
            "no comparison files provided; pass encodes or an input directory",
        ));
    }
    let loaded = load_clips(&cfg.clips, collab.decoder)?;
    if loaded.clips.len() < 2 {
        return Err(CompareError::validation(
            "no encodes found to compare against the source",
        ));
    }
    let titles = resolve_titles(&cfg.prepare.titles, &loaded.paths);

    let mut clips = loaded.clips;
    if let Some((start, end)) = cfg.frames {
        let range = FrameRange::inclusive(start, end)?;
        clips[0] = ops::trim(&clips[0], range)?;
    }

    let (clips, crop) = align_renditions(clips, &cfg.prepare)?;
    let clips = prepare_clips(&clips, crop, &titles, cfg.prepare.frame_info, collab)?;

    // Scale from the first encode; the source may still be at its original size.
    let view = cfg.preview_resolution.fit(clips[1].dimensions());
    tracing::info!(%view, "view dimensions");
    viewer.show(&clips, view.width, view.height)?;

    Ok(CompareSummary { titles, crop, view })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/compare.rs"]
mod tests;
