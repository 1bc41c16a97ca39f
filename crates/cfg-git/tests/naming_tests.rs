use cfg_git::naming::{WORKSPACE_SUFFIX, sanitize};
use cfg_git::workspace_dir_name;
use rstest::rstest;

#[rstest]
#[case("https://github.com/acme/widgets.git", "widgets_yaml")]
#[case("https://github.com/acme/widgets/blob/main/init.yaml", "widgets_yaml")]
#[case("git@github.com:acme/widgets.git", "widgets_yaml")]
#[case("ssh://git@git.example.com/team/infra.git", "infra_yaml")]
#[case("/srv/repos/config repo", "config_repo_yaml")]
fn test_workspace_name_from_short_name(#[case] reference: &str, #[case] expected: &str) {
    assert_eq!(workspace_dir_name(reference), expected);
}

#[test]
fn test_workspace_name_hash_fallback() {
    let name = workspace_dir_name("///");
    assert!(name.starts_with("repo-"));
    assert!(name.ends_with(WORKSPACE_SUFFIX));
    // repo- + 16 hex chars + suffix
    assert_eq!(name.len(), 5 + 16 + WORKSPACE_SUFFIX.len());
    assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || "._-".contains(c)));
}

#[test]
fn test_workspace_name_only_unsafe_chars_falls_back_to_hash() {
    assert!(workspace_dir_name("/tmp/@@@").starts_with("repo-"));
}

#[rstest]
#[case("widgets", "widgets")]
#[case("wid gets", "wid_gets")]
#[case("__weird__name!!", "weird__name")]
#[case("ünïcode", "n_code")]
fn test_sanitize(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sanitize(input), expected);
}
