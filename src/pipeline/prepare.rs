use crate::clip::node::Clip;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{CompareError, CompareResult};
use crate::geometry::crop::{DEFAULT_MODULUS, crop_to};
use crate::geometry::resolve::{RenditionSet, verify_resize};
use crate::media::decode::Decoder;
use crate::media::overlay::FrameInfo;
use crate::media::tonemap::Tonemapper;
use crate::pipeline::config::PrepareOptions;

/// External pieces a run plugs in.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub decoder: &'a dyn Decoder,
    /// Applied to every clip when the source is HDR. Without one HDR clips pass through as-is.
    pub tonemapper: Option<&'a dyn Tonemapper>,
    pub frame_info: &'a dyn FrameInfo,
}

/// Line the source up with its encodes and pick the crop size.
///
/// With encodes present the source is resized to their geometry when needed, and the crop
/// defaults to the first encode's size. A lone source defaults to its own size.
pub fn align_renditions(
    clips: Vec<Clip>,
    opts: &PrepareOptions,
) -> CompareResult<(Vec<Clip>, Dimensions)> {
    match clips.len() {
        0 => Err(CompareError::validation("no clips to prepare")),
        1 => {
            let crop = match opts.crop {
                Some(crop) => crop,
                None => {
                    tracing::warn!("no crop values were provided; the source will be uncropped");
                    clips[0].dimensions()
                }
            };
            Ok((clips, crop))
        }
        _ => {
            let crop = opts.crop.unwrap_or_else(|| clips[1].dimensions());
            let mut set = RenditionSet::new(clips)?;
            let source = verify_resize(&set, opts.resize_kernel)?;
            set.replace_source(source);
            Ok((set.into_clips(), crop))
        }
    }
}

/// Crop, tonemap and annotate clips for viewing.
///
/// - every clip is cropped to `crop` (centered, modulus 2);
/// - when the source's first frame is BT.2020 every clip goes through the tonemapper;
/// - with `add_frame_info`, clips are annotated with their titles, or `Clip <i>` when the
///   titles are missing or do not match the clip count.
#[tracing::instrument(skip_all, fields(clips = clips.len(), %crop))]
pub fn prepare_clips(
    clips: &[Clip],
    crop: Dimensions,
    titles: &[String],
    add_frame_info: bool,
    collab: &Collaborators<'_>,
) -> CompareResult<Vec<Clip>> {
    let first = clips
        .first()
        .ok_or_else(|| CompareError::validation("no clips to prepare"))?;
    let hdr = first.is_hdr()?;

    let mut out = clips
        .iter()
        .map(|c| crop_to(c, crop, DEFAULT_MODULUS))
        .collect::<CompareResult<Vec<_>>>()?;

    if hdr {
        match collab.tonemapper {
            Some(tm) => {
                tracing::info!("source uses BT.2020 matrix; tonemapping all clips");
                out = out
                    .iter()
                    .map(|c| tm.tonemap(c))
                    .collect::<CompareResult<Vec<_>>>()?;
            }
            None => tracing::warn!("source uses BT.2020 matrix but no tonemapper is configured"),
        }
    }

    if !add_frame_info {
        tracing::info!("frame overlay disabled");
        return Ok(out);
    }

    let labels = if titles.is_empty() {
        None
    } else if titles.len() != out.len() {
        let err = CompareError::TitleCountMismatch {
            titles: titles.len(),
            clips: out.len(),
        };
        tracing::warn!(%err, "using generic clip labels");
        None
    } else {
        Some(titles)
    };

    out.iter()
        .enumerate()
        .map(|(i, c)| match labels {
            Some(titles) => collab.frame_info.annotate(c, &titles[i]),
            None => collab.frame_info.annotate(c, &format!("Clip {i}")),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/prepare.rs"]
mod tests;
