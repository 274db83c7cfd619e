use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::clip::frame::Frame;
use crate::clip::node::Clip;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CompareError, CompareResult};

/// Writes still images of selected frames.
pub trait ScreenshotWriter {
    /// Write `frames` of `clip` into `dir`, tagged with `tag`, returning the files written.
    fn write(
        &self,
        clip: &Clip,
        dir: &Path,
        tag: char,
        frames: &[u64],
    ) -> CompareResult<Vec<PathBuf>>;
}

/// File name used for frame `frame` of the rendition tagged `tag`.
pub fn screenshot_path(dir: &Path, frame: u64, tag: char) -> PathBuf {
    dir.join(format!("{frame}{tag}.png"))
}

/// [`ScreenshotWriter`] producing RGBA PNG files.
///
/// When a frame carries a title the PNG gets `Title` and `Frame` text chunks. Existing files
/// are never overwritten.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngScreenshotWriter;

impl ScreenshotWriter for PngScreenshotWriter {
    #[tracing::instrument(skip(self, clip, frames), fields(dir = %dir.display(), count = frames.len()))]
    fn write(
        &self,
        clip: &Clip,
        dir: &Path,
        tag: char,
        frames: &[u64],
    ) -> CompareResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(frames.len());
        for &n in frames {
            let frame = clip.get_frame(FrameIndex(n))?;
            let path = screenshot_path(dir, n, tag);
            write_png(&path, &frame, n)?;
            tracing::debug!(path = %path.display(), "wrote screenshot");
            written.push(path);
        }
        Ok(written)
    }
}

fn write_png(path: &Path, frame: &Frame, n: u64) -> CompareResult<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => CompareError::OutputCollision(path.to_path_buf()),
            _ => CompareError::media(format!("failed to create '{}': {e}", path.display())),
        })?;

    let png_err = |e: png::EncodingError| {
        CompareError::media(format!("png encode failed for '{}': {e}", path.display()))
    };
    let mut encoder = png::Encoder::new(BufWriter::new(file), frame.width, frame.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);
    if let Some(title) = &frame.props.title {
        encoder
            .add_text_chunk("Title".to_string(), title.clone())
            .map_err(png_err)?;
        encoder
            .add_text_chunk("Frame".to_string(), n.to_string())
            .map_err(png_err)?;
    }
    let mut writer = encoder.write_header().map_err(png_err)?;
    writer.write_image_data(&frame.data).map_err(png_err)?;
    writer.finish().map_err(png_err)
}

#[cfg(test)]
#[path = "../../tests/unit/media/screenshot.rs"]
mod tests;
