use std::path::PathBuf;

use docforge::config::{load_config_flags, parse_flag_tokens, ConfigFlags};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".docforgerc");
    let content = r"
# comment
--bind 127.0.0.1

--port 9000

--dot-bin=/opt/graphviz/bin/dot
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.bind.as_deref(), Some("127.0.0.1"));
    assert_eq!(flags.port, Some(9000));
    assert_eq!(flags.dot_bin, Some(PathBuf::from("/opt/graphviz/bin/dot")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".docforgerc");
    std::fs::write(&path, "--bind 0.0.0.0\n--port 8000\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec!["docforge".to_string(), "--port".to_string(), "9000".to_string()];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert_eq!(effective.bind.as_deref(), Some("0.0.0.0"));
    assert_eq!(effective.port, Some(9000));
    assert_eq!(effective.bind_addr(), "0.0.0.0:9000");
}

#[test]
fn test_missing_file_yields_defaults() {
    let flags = load_config_flags(&PathBuf::from("/nonexistent/.docforgerc")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
    assert_eq!(flags.bind_addr(), "0.0.0.0:8000");
}
