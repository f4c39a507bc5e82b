use iconsync_fs::NormalizedPath;
use rstest::rstest;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("icons\\arrows\\left.svg");
    assert_eq!(path.as_str(), "icons/arrows/left.svg");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("icons");
    assert_eq!(base.join("arrows/left.svg").as_str(), "icons/arrows/left.svg");
}

#[test]
fn test_join_onto_empty_base() {
    let base = NormalizedPath::new("");
    assert_eq!(base.join("left.svg").as_str(), "left.svg");
}

#[test]
fn test_parent_and_file_name() {
    let path = NormalizedPath::new("arrows/left/small.svg");
    assert_eq!(path.parent().unwrap().as_str(), "arrows/left");
    assert_eq!(path.file_name(), Some("small.svg"));
    assert_eq!(path.extension(), Some("svg"));
}

#[test]
fn test_top_level_file_has_no_parent() {
    assert!(NormalizedPath::new("logo.svg").parent().is_none());
}

#[test]
fn test_segments_skip_empty() {
    let path = NormalizedPath::new("a//b/c.svg");
    assert_eq!(path.segments().collect::<Vec<_>>(), vec!["a", "b", "c.svg"]);
}

#[rstest]
#[case("logo.svg", true)]
#[case("arrows/left.svg", true)]
#[case("../logo.svg", false)]
#[case("arrows/../../logo.svg", false)]
#[case("/etc/passwd", false)]
#[case("C:/icons/logo.svg", false)]
#[case("c:logo.svg", false)]
#[case("Size: 16.svg", true)]
#[case("icons/ratio 16:9.svg", true)]
#[case("./logo.svg", true)]
fn test_is_contained(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(NormalizedPath::new(input).is_contained(), expected);
}
