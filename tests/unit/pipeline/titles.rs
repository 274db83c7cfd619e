use super::*;

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

fn strings(s: &[&str]) -> Vec<String> {
    s.iter().map(|s| s.to_string()).collect()
}

#[test]
fn source_only_is_titled_source() {
    assert_eq!(resolve_titles(&[], &paths(&["src.mkv"])), strings(&["Source"]));
}

#[test]
fn missing_titles_fall_back_to_file_stems() {
    let titles = resolve_titles(&[], &paths(&["dir/src.mkv", "dir/x264.crf18.mkv", "b.mp4"]));
    assert_eq!(titles, strings(&["Source", "x264.crf18", "b"]));
}

#[test]
fn one_short_gets_source_prepended() {
    let titles = resolve_titles(&strings(&["A", "B"]), &paths(&["s", "a", "b"]));
    assert_eq!(titles, strings(&["Source", "A", "B"]));
}

#[test]
fn full_or_mismatched_lists_are_kept() {
    let given = strings(&["Src", "A", "B"]);
    assert_eq!(resolve_titles(&given, &paths(&["s", "a", "b"])), given);

    let given = strings(&["only"]);
    assert_eq!(resolve_titles(&given, &paths(&["s", "a", "b"])), given);
}
