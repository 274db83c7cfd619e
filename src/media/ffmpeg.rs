use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::clip::frame::Frame;
use crate::foundation::core::{Dimensions, Fps};
use crate::foundation::error::{CompareError, CompareResult};

/// Options for an [`FfmpegStream`].
#[derive(Clone, Debug)]
pub struct FfmpegStreamOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Background alpha is flattened against (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
}

impl FfmpegStreamOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
        }
    }
}

/// A running `ffmpeg` process that encodes raw RGBA frames from stdin to an H.264 MP4.
pub struct FfmpegStream {
    opts: FfmpegStreamOpts,
    dimensions: Dimensions,
    child: Child,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    scratch: Vec<u8>,
}

impl FfmpegStream {
    /// Spawn `ffmpeg` for `dimensions` frames at `fps`.
    pub fn start(opts: FfmpegStreamOpts, dimensions: Dimensions, fps: Fps) -> CompareResult<Self> {
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(CompareError::validation(
                "ffmpeg stream width/height must be non-zero",
            ));
        }
        if !dimensions.width.is_multiple_of(2) || !dimensions.height.is_multiple_of(2) {
            return Err(CompareError::validation(
                "ffmpeg stream width/height must be even (required for yuv420p mp4 output)",
            ));
        }

        ensure_parent_dir(&opts.out_path)?;
        if !opts.overwrite && opts.out_path.exists() {
            return Err(CompareError::OutputCollision(opts.out_path.clone()));
        }
        if !is_ffmpeg_on_path() {
            return Err(CompareError::media(
                "ffmpeg is required for previews, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &dimensions.to_string(),
            "-r",
            &format!("{}/{}", fps.num, fps.den),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            CompareError::media(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| CompareError::media("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| CompareError::media("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        Ok(Self {
            scratch: vec![0u8; dimensions.pixel_count() * 4],
            opts,
            dimensions,
            child,
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
        })
    }

    /// Write one frame.
    pub fn push(&mut self, frame: &Frame) -> CompareResult<()> {
        if frame.dimensions() != self.dimensions {
            return Err(CompareError::validation(format!(
                "frame size mismatch: got {}, expected {}",
                frame.dimensions(),
                self.dimensions
            )));
        }
        flatten_over_bg(&mut self.scratch, &frame.data, self.opts.bg_rgba)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(CompareError::media("ffmpeg stream is already finished"));
        };
        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            CompareError::media(format!("failed to write frame to ffmpeg stdin: {e}"))
        })
    }

    /// Close stdin and wait for `ffmpeg` to finish writing the file.
    pub fn finish(mut self) -> CompareResult<PathBuf> {
        drop(self.stdin.take());
        let status = self.child.wait().map_err(|e| {
            CompareError::media(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| CompareError::media("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| CompareError::media(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        if !status.success() {
            return Err(CompareError::media(format!(
                "ffmpeg exited with status {status}: {}",
                String::from_utf8_lossy(&stderr_bytes).trim()
            )));
        }
        Ok(self.opts.out_path)
    }
}

/// Composite straight-alpha RGBA8 over an opaque background.
fn flatten_over_bg(dst: &mut [u8], src: &[u8], bg_rgba: [u8; 4]) -> CompareResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(CompareError::validation(
            "flatten_over_bg expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        for ((dc, &sc), &bc) in d[..3].iter_mut().zip(&s[..3]).zip(&bg_rgba[..3]) {
            let v = u16::from(sc) * a + u16::from(bc) * inv;
            *dc = ((v + 127) / 255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> CompareResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    tool_runs("ffmpeg")
}

/// Return `true` when `ffprobe` can be invoked from `PATH`.
pub fn is_ffprobe_on_path() -> bool {
    tool_runs("ffprobe")
}

fn tool_runs(tool: &str) -> bool {
    Command::new(tool)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/media/ffmpeg.rs"]
mod tests;
