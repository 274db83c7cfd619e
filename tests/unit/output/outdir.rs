use super::*;

#[test]
fn requested_directory_is_created() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("src.mkv");
    let wanted = tmp.path().join("out").join("nested");

    let dir = resolve_output_dir(Some(&wanted), &source, 0).unwrap();
    assert_eq!(dir, wanted);
    assert!(wanted.is_dir());
}

#[test]
fn uncreatable_directory_falls_back_to_source_parent() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("src.mkv");
    let blocker = tmp.path().join("file");
    std::fs::write(&blocker, b"x").unwrap();

    let dir = resolve_output_dir(Some(&blocker.join("sub")), &source, 0).unwrap();
    assert_eq!(dir, tmp.path());
}

#[test]
fn default_directory_is_numbered_after_previous_runs() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("src.mkv");

    let first = resolve_output_dir(None, &source, 0).unwrap();
    assert_eq!(first, tmp.path().join("screens t1-offset_0"));

    std::fs::create_dir(tmp.path().join("old screens")).unwrap();
    std::fs::create_dir(tmp.path().join("unrelated")).unwrap();
    let third = resolve_output_dir(None, &source, -2).unwrap();
    assert_eq!(third, tmp.path().join("screens t3-offset_-2"));
    assert!(third.is_dir());
}

#[test]
fn numbering_skips_taken_names() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("src.mkv");
    std::fs::write(tmp.path().join("screens t1-offset_0"), b"").unwrap();

    let dir = resolve_output_dir(None, &source, 0).unwrap();
    assert_eq!(dir, tmp.path().join("screens t2-offset_0"));
}
