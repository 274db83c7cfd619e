use std::cell::RefCell;

use super::*;
use crate::foundation::core::{Dimensions, Fps};
use crate::foundation::error::CompareError;

#[derive(Default)]
struct RecordingDecoder {
    opened: RefCell<Vec<PathBuf>>,
}

impl Decoder for RecordingDecoder {
    fn open(&self, path: &Path) -> CompareResult<Clip> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(Clip::blank(Dimensions::new(2, 2), 3, [0, 0, 0, 255], Fps::default()))
    }
}

fn touch(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, b"").unwrap();
    p
}

#[test]
fn explicit_encodes_win_over_directory() {
    let sources = ClipSources {
        source: PathBuf::from("src.mkv"),
        encodes: vec![PathBuf::from("b.mkv"), PathBuf::from("a.mkv")],
        input_directory: Some(PathBuf::from("/does/not/matter")),
    };
    assert_eq!(
        rendition_paths(&sources).unwrap(),
        vec![
            PathBuf::from("src.mkv"),
            PathBuf::from("b.mkv"),
            PathBuf::from("a.mkv")
        ]
    );
}

#[test]
fn directory_scan_filters_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    let source = touch(dir.path(), "movie.mkv");
    let b = touch(dir.path(), "b.MKV");
    let a = touch(dir.path(), "a.m2ts");
    let c = touch(dir.path(), "c.ts");
    touch(dir.path(), "movie.mp4");
    touch(dir.path(), "notes.txt");
    touch(dir.path(), "a.ffindex");
    std::fs::create_dir(dir.path().join("dir.mkv")).unwrap();

    assert_eq!(scan_encodes(dir.path(), &source).unwrap(), vec![a, b, c]);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = scan_encodes(&dir.path().join("gone"), Path::new("s.mkv")).unwrap_err();
    assert!(matches!(err, CompareError::Other(_)));
}

#[test]
fn load_opens_source_first() {
    let dir = tempfile::tempdir().unwrap();
    let source = touch(dir.path(), "src.mkv");
    let enc = touch(dir.path(), "enc.mp4");
    let sources = ClipSources {
        source: source.clone(),
        encodes: Vec::new(),
        input_directory: Some(dir.path().to_path_buf()),
    };

    let decoder = RecordingDecoder::default();
    let loaded = load_clips(&sources, &decoder).unwrap();
    assert_eq!(loaded.paths, vec![source.clone(), enc.clone()]);
    assert_eq!(loaded.clips.len(), 2);
    assert_eq!(*decoder.opened.borrow(), vec![source, enc]);
}
