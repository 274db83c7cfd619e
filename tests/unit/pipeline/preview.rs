use std::path::{Path, PathBuf};

use super::*;
use crate::clip::node::Clip;
use crate::foundation::core::Fps;
use crate::geometry::kernel::ResizeKernel;
use crate::geometry::preset::ResolutionPreset;

struct FixedDecoder;

impl Decoder for FixedDecoder {
    fn open(&self, _path: &Path) -> CompareResult<Clip> {
        Ok(Clip::blank(Dimensions::new(1920, 1080), 2, [0, 0, 0, 255], Fps::default()))
    }
}

#[derive(Default)]
struct CountingViewer {
    calls: Vec<(usize, u32, u32)>,
}

impl Viewer for CountingViewer {
    fn show(&mut self, clips: &[Clip], width: u32, height: u32) -> CompareResult<()> {
        self.calls.push((clips.len(), width, height));
        Ok(())
    }
}

fn config(inputs: Vec<PathBuf>) -> PreviewConfig {
    PreviewConfig {
        inputs,
        resolution: ResolutionPreset::P720,
        resize_kernel: ResizeKernel::default(),
        out: PathBuf::from("preview.mp4"),
    }
}

#[test]
fn previews_first_existing_input() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("b.mkv");
    std::fs::write(&present, b"").unwrap();
    let cfg = config(vec![dir.path().join("a.mkv"), present]);

    let mut viewer = CountingViewer::default();
    let view = run_preview(&cfg, &FixedDecoder, &mut viewer).unwrap();
    assert_eq!(view, Dimensions::new(1280, 720));
    assert_eq!(viewer.calls, vec![(1, 1280, 720)]);
}

#[test]
fn no_existing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(vec![dir.path().join("missing.mkv")]);
    let mut viewer = CountingViewer::default();
    let err = run_preview(&cfg, &FixedDecoder, &mut viewer).unwrap_err();
    assert!(matches!(err, CompareError::Validation(_)));
    assert!(viewer.calls.is_empty());
}
