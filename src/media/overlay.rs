use crate::clip::node::Clip;
use crate::clip::ops;
use crate::foundation::error::CompareResult;

/// Attaches frame information (title, frame number) to every frame of a clip.
pub trait FrameInfo {
    fn annotate(&self, clip: &Clip, title: &str) -> CompareResult<Clip>;
}

/// [`FrameInfo`] that records the information in [`FrameProps`](crate::FrameProps) instead of
/// drawing it.
///
/// Sets `title` and a `label` of the form `Frame 12 of 240 | Source`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LabelFrameInfo;

impl FrameInfo for LabelFrameInfo {
    fn annotate(&self, clip: &Clip, title: &str) -> CompareResult<Clip> {
        let title = title.to_string();
        let total = clip.frame_count();
        Ok(ops::map_frames(clip, clip.dimensions(), move |mut f, idx| {
            f.props.label = Some(format!("Frame {} of {total} | {title}", idx.0));
            f.props.title = Some(title.clone());
            Ok(f)
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/overlay.rs"]
mod tests;
