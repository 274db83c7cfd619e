use std::path::{Path, PathBuf};

use crate::clip::frame::{Frame, FrameProps};
use crate::clip::node::{Clip, ClipInfo, FrameSource};
use crate::foundation::core::{Dimensions, Fps, FrameIndex};
use crate::foundation::error::{CompareError, CompareResult};

/// Opens a video file as a [`Clip`].
pub trait Decoder {
    fn open(&self, path: &Path) -> CompareResult<Clip>;
}

/// Stream metadata reported by `ffprobe`.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoProbe {
    /// File the metadata was read from.
    pub path: PathBuf,
    pub dimensions: Dimensions,
    pub frame_count: u64,
    pub fps: Fps,
    /// Matrix coefficients as an H.273 code point.
    pub matrix: Option<u8>,
    /// Transfer characteristics as an H.273 code point.
    pub transfer: Option<u8>,
}

impl VideoProbe {
    fn props(&self) -> FrameProps {
        FrameProps {
            matrix: self.matrix,
            transfer: self.transfer,
            ..FrameProps::default()
        }
    }
}

/// [`Decoder`] backed by the system `ffprobe`/`ffmpeg`.
///
/// Opening a file only probes it; each frame is decoded by its own `ffmpeg` run when pulled.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegDecoder;

impl Decoder for FfmpegDecoder {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    fn open(&self, path: &Path) -> CompareResult<Clip> {
        let probe = probe_video(path)?;
        tracing::debug!(
            dimensions = %probe.dimensions,
            frames = probe.frame_count,
            fps = probe.fps.as_f64(),
            matrix = ?probe.matrix,
            "probed video"
        );
        let info = ClipInfo {
            dimensions: probe.dimensions,
            frame_count: probe.frame_count,
            fps: probe.fps,
        };
        Ok(Clip::new(FfmpegSource { info, probe }))
    }
}

struct FfmpegSource {
    info: ClipInfo,
    probe: VideoProbe,
}

impl FrameSource for FfmpegSource {
    fn info(&self) -> &ClipInfo {
        &self.info
    }

    fn frame(&self, idx: FrameIndex) -> CompareResult<Frame> {
        let data = decode_frame_rgba8(&self.probe, idx)?;
        let Dimensions { width, height } = self.probe.dimensions;
        Frame::new(width, height, data, self.probe.props())
    }
}

/// Probe a video file through `ffprobe`.
#[cfg(feature = "media-ffmpeg")]
pub fn probe_video(path: &Path) -> CompareResult<VideoProbe> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        avg_frame_rate: Option<String>,
        nb_frames: Option<String>,
        duration: Option<String>,
        color_space: Option<String>,
        color_transfer: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(path)
        .output()
        .map_err(|e| CompareError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(CompareError::media(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| CompareError::media(format!("ffprobe json parse failed: {e}")))?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| CompareError::media(format!("no video stream in '{}'", path.display())))?;

    let width = stream
        .width
        .ok_or_else(|| CompareError::media("missing video width from ffprobe"))?;
    let height = stream
        .height
        .ok_or_else(|| CompareError::media("missing video height from ffprobe"))?;
    let fps = stream
        .r_frame_rate
        .as_deref()
        .and_then(parse_rate)
        .or_else(|| stream.avg_frame_rate.as_deref().and_then(parse_rate))
        .ok_or_else(|| CompareError::media("missing video frame rate from ffprobe"))?;

    // Matroska and transport streams rarely carry nb_frames; derive it from the duration then.
    let frame_count = match stream.nb_frames.as_deref().and_then(|n| n.parse::<u64>().ok()) {
        Some(n) => n,
        None => {
            let duration = stream
                .duration
                .as_deref()
                .or(parsed.format.as_ref().and_then(|f| f.duration.as_deref()))
                .and_then(|d| d.parse::<f64>().ok())
                .ok_or_else(|| CompareError::media("ffprobe reported no frame count or duration"))?;
            (duration * fps.as_f64()).round() as u64
        }
    };
    if frame_count == 0 {
        return Err(CompareError::media(format!(
            "'{}' has no video frames",
            path.display()
        )));
    }

    Ok(VideoProbe {
        path: path.to_path_buf(),
        dimensions: Dimensions::new(width, height),
        frame_count,
        fps,
        matrix: stream.color_space.as_deref().and_then(matrix_code),
        transfer: stream.color_transfer.as_deref().and_then(transfer_code),
    })
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Probe a video file through `ffprobe`.
///
/// Returns an error when `media-ffmpeg` feature is disabled.
pub fn probe_video(_path: &Path) -> CompareResult<VideoProbe> {
    Err(CompareError::media(
        "decoding video requires the 'media-ffmpeg' feature",
    ))
}

#[cfg(feature = "media-ffmpeg")]
/// Decode frame `idx` of a probed video as RGBA8.
pub fn decode_frame_rgba8(probe: &VideoProbe, idx: FrameIndex) -> CompareResult<Vec<u8>> {
    let secs = seek_secs(probe.fps, idx);
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-ss", &format!("{secs:.9}")])
        .arg("-i")
        .arg(&probe.path)
        .args([
            "-frames:v",
            "1",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "pipe:1",
        ])
        .output()
        .map_err(|e| CompareError::media(format!("failed to run ffmpeg for video decode: {e}")))?;

    if !out.status.success() {
        return Err(CompareError::media(format!(
            "ffmpeg decode of frame {} failed for '{}': {}",
            idx.0,
            probe.path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let expected_len = probe.dimensions.pixel_count() * 4;
    if expected_len == 0 {
        return Err(CompareError::media(
            "decoded video frame size is zero (invalid source dimensions)",
        ));
    }
    if out.stdout.len() < expected_len {
        return Err(CompareError::media(format!(
            "ffmpeg returned {} bytes for frame {} of '{}', expected {expected_len}",
            out.stdout.len(),
            idx.0,
            probe.path.display()
        )));
    }
    let mut data = out.stdout;
    data.truncate(expected_len);
    Ok(data)
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Decode frame `idx` of a probed video as RGBA8.
///
/// Returns an error when `media-ffmpeg` feature is disabled.
pub fn decode_frame_rgba8(_probe: &VideoProbe, _idx: FrameIndex) -> CompareResult<Vec<u8>> {
    Err(CompareError::media(
        "decoding video requires the 'media-ffmpeg' feature",
    ))
}

/// Input seek point for frame `idx`: the middle of the previous frame.
///
/// Stored timestamps are rounded to the container timebase (1 ms for Matroska) and can fall
/// just below a frame's exact start time, which an exact seek would skip.
pub fn seek_secs(fps: Fps, idx: FrameIndex) -> f64 {
    if idx.0 == 0 {
        return 0.0;
    }
    (idx.0 as f64 - 0.5) * fps.frame_duration_secs()
}

/// Parse an ffprobe rational such as `24000/1001`. `0/0` and malformed input give `None`.
pub fn parse_rate(s: &str) -> Option<Fps> {
    let (num, den) = s.trim().split_once('/')?;
    Fps::new(num.parse().ok()?, den.parse().ok()?).ok()
}

/// H.273 matrix coefficients code point for an ffprobe `color_space` name.
pub fn matrix_code(name: &str) -> Option<u8> {
    Some(match name {
        "gbr" => 0,
        "bt709" => 1,
        "fcc" => 4,
        "bt470bg" => 5,
        "smpte170m" => 6,
        "smpte240m" => 7,
        "ycgco" => 8,
        "bt2020nc" => 9,
        "bt2020c" => 10,
        "ictcp" => 14,
        _ => return None,
    })
}

/// H.273 transfer characteristics code point for an ffprobe `color_transfer` name.
pub fn transfer_code(name: &str) -> Option<u8> {
    Some(match name {
        "bt709" => 1,
        "gamma22" => 4,
        "gamma28" => 5,
        "smpte170m" => 6,
        "smpte240m" => 7,
        "linear" => 8,
        "iec61966-2-1" => 13,
        "bt2020-10" => 14,
        "bt2020-12" => 15,
        "smpte2084" => 16,
        "arib-std-b67" => 18,
        _ => return None,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/media/decode.rs"]
mod tests;
