use std::path::PathBuf;

use crate::clip::node::Clip;
use crate::clip::ops;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CompareError, CompareResult};
use crate::geometry::kernel::{ResizeKernel, Resizer};
use crate::media::ffmpeg::{FfmpegStream, FfmpegStreamOpts};

/// Presents prepared clips to the user.
pub trait Viewer {
    fn show(&mut self, clips: &[Clip], width: u32, height: u32) -> CompareResult<()>;
}

/// Scale every clip to `width`x`height` and interleave them frame by frame:
/// `source0, enc1_0, ..., source1, enc1_1, ...`.
pub fn interleaved_preview(
    clips: &[Clip],
    width: u32,
    height: u32,
    resizer: &dyn Resizer,
) -> CompareResult<Clip> {
    let scaled = clips
        .iter()
        .map(|c| resizer.resize(c, width, height))
        .collect::<CompareResult<Vec<_>>>()?;
    ops::interleave(&scaled)
}

/// [`Viewer`] that renders the interleaved preview to an MP4 file through `ffmpeg`.
#[derive(Clone, Debug)]
pub struct FfmpegPreview {
    opts: FfmpegStreamOpts,
    kernel: ResizeKernel,
    written: Option<PathBuf>,
}

impl FfmpegPreview {
    pub fn new(opts: FfmpegStreamOpts) -> Self {
        Self {
            opts,
            kernel: ResizeKernel::default(),
            written: None,
        }
    }

    /// Kernel used to scale clips to the preview size.
    pub fn with_kernel(mut self, kernel: ResizeKernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Path of the last preview written by [`Viewer::show`].
    pub fn written(&self) -> Option<&PathBuf> {
        self.written.as_ref()
    }
}

impl Viewer for FfmpegPreview {
    #[tracing::instrument(skip(self, clips), fields(clips = clips.len(), out = %self.opts.out_path.display()))]
    fn show(&mut self, clips: &[Clip], width: u32, height: u32) -> CompareResult<()> {
        let preview = interleaved_preview(clips, width, height, &self.kernel)?;
        if preview.frame_count() == 0 {
            return Err(CompareError::validation("nothing to preview: clips have no frames"));
        }

        let mut stream = FfmpegStream::start(self.opts.clone(), preview.dimensions(), preview.fps())?;
        for i in 0..preview.frame_count() {
            stream.push(&preview.get_frame(FrameIndex(i))?)?;
        }
        let path = stream.finish()?;
        tracing::info!(path = %path.display(), frames = preview.frame_count(), "wrote preview");
        self.written = Some(path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/preview.rs"]
mod tests;
