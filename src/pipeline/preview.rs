use crate::foundation::core::Dimensions;
use crate::foundation::error::{CompareError, CompareResult};
use crate::media::decode::Decoder;
use crate::media::preview::Viewer;
use crate::pipeline::config::PreviewConfig;

/// Show the first existing input at the configured resolution.
///
/// Inputs that do not exist are skipped with a warning.
#[tracing::instrument(skip_all, fields(inputs = cfg.inputs.len()))]
pub fn run_preview(
    cfg: &PreviewConfig,
    decoder: &dyn Decoder,
    viewer: &mut dyn Viewer,
) -> CompareResult<Dimensions> {
    let input = cfg
        .inputs
        .iter()
        .find(|p| {
            let exists = p.exists();
            if !exists {
                tracing::warn!(path = %p.display(), "skipping missing input");
            }
            exists
        })
        .ok_or_else(|| CompareError::validation("no existing input to preview"))?;

    let clip = decoder.open(input)?;
    let view = cfg.resolution.fit(clip.dimensions());
    tracing::info!(input = %input.display(), %view, "previewing");
    viewer.show(&[clip], view.width, view.height)?;
    Ok(view)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/preview.rs"]
mod tests;
