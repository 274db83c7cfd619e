use super::*;

fn compare(json: &str) -> CompareConfig {
    match JobConfig::from_reader(json.as_bytes()).unwrap() {
        JobConfig::Compare(cfg) => cfg,
        other => panic!("expected a compare job, got {other:?}"),
    }
}

fn screenshots(json: &str) -> ScreenshotConfig {
    match JobConfig::from_reader(json.as_bytes()).unwrap() {
        JobConfig::Screenshots(cfg) => cfg,
        other => panic!("expected a screenshots job, got {other:?}"),
    }
}

#[test]
fn compare_config_fills_defaults() {
    let cfg = compare(
        r#"{"command": "compare", "source": "src.mkv", "encodes": ["a.mkv"], "out": "preview.mp4"}"#,
    );

    assert_eq!(cfg.clips.source, PathBuf::from("src.mkv"));
    assert_eq!(cfg.clips.encodes, vec![PathBuf::from("a.mkv")]);
    assert_eq!(cfg.clips.input_directory, None);
    assert_eq!(cfg.prepare, PrepareOptions::default());
    assert!(cfg.prepare.frame_info);
    assert_eq!(cfg.frames, None);
    assert_eq!(cfg.preview_resolution, ResolutionPreset::P1080);
}

#[test]
fn compare_config_reads_frame_range() {
    let cfg = compare(
        r#"{"command": "compare", "source": "s.mkv", "frames": [10, 20], "preview_resolution": "2160p", "out": "p.mp4"}"#,
    );
    assert_eq!(cfg.frames, Some((10, 20)));
    assert_eq!(cfg.preview_resolution, ResolutionPreset::P2160);
}

#[test]
fn screenshot_config_reads_selection_and_options() {
    let cfg = screenshots(
        r#"{
        "command": "screenshots",
        "source": "src.mkv",
        "input_directory": "encodes",
        "frames": {"random": {"start": 100, "stop": 25000, "count": 25}},
        "offset": -2,
        "crop": {"width": 1920, "height": 800},
        "titles": ["Source", "x264"],
        "resize_kernel": "lanczos",
        "frame_info": false,
        "seed": 9
    }"#,
    );

    assert_eq!(
        cfg.frames,
        FrameSelection::Random {
            start: 100,
            stop: 25000,
            count: 25
        }
    );
    assert_eq!(cfg.clips.input_directory, Some(PathBuf::from("encodes")));
    assert_eq!(cfg.offset, -2);
    assert_eq!(cfg.prepare.crop, Some(Dimensions::new(1920, 800)));
    assert_eq!(cfg.prepare.resize_kernel, ResizeKernel::Lanczos);
    assert!(!cfg.prepare.frame_info);
    assert_eq!(cfg.seed, Some(9));
    assert_eq!(cfg.output_directory, None);
}

#[test]
fn explicit_frames_parse() {
    let cfg = screenshots(
        r#"{"command": "screenshots", "source": "s.mkv", "frames": {"explicit": [5, 1]}}"#,
    );
    assert_eq!(cfg.frames, FrameSelection::Explicit(vec![5, 1]));
}

#[test]
fn preview_job_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preview.json");
    std::fs::write(
        &path,
        r#"{"command": "preview", "inputs": ["a.mkv", "b.mkv"], "resolution": "720p", "out": "p.mp4"}"#,
    )
    .unwrap();

    let JobConfig::Preview(cfg) = JobConfig::from_path(&path).unwrap() else {
        panic!("expected a preview job");
    };
    assert_eq!(cfg.inputs.len(), 2);
    assert_eq!(cfg.resolution, ResolutionPreset::P720);
    assert_eq!(cfg.resize_kernel, ResizeKernel::Spline36);
}

#[test]
fn bad_json_is_a_validation_error() {
    let err = JobConfig::from_reader("{".as_bytes()).unwrap_err();
    assert!(matches!(err, CompareError::Validation(_)));

    let err = JobConfig::from_reader(r#"{"command": "render", "out": "x"}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, CompareError::Validation(_)));

    let err = JobConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, CompareError::Validation(_)));
}
