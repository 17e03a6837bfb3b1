use super::*;

fn config_with(ignored: &[&str], selected: &[&str]) -> ImportConfig {
    ImportConfig {
        ignored_repos: ignored.iter().map(|s| s.to_string()).collect(),
        selected_repos: selected.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn test_no_lists_selects_everything() {
    let config = config_with(&[], &[]);

    assert!(is_in_scope("a", &config));
    assert!(is_in_scope("anything-else", &config));
}

#[test]
fn test_ignored_list_excludes_members() {
    let config = config_with(&["b"], &[]);

    assert!(is_in_scope("a", &config));
    assert!(!is_in_scope("b", &config));
}

#[test]
fn test_selected_list_includes_only_members() {
    let config = config_with(&[], &["a"]);

    assert!(is_in_scope("a", &config));
    assert!(!is_in_scope("b", &config));
}

#[test]
fn test_names_are_compared_exactly() {
    let config = config_with(&[], &["api"]);

    assert!(!is_in_scope("API", &config));
    assert!(!is_in_scope("api-gateway", &config));
}
