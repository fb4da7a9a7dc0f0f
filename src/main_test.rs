use super::*;
use serde_json::json;

#[test]
fn register_body_from_data() {
    let body = build_register_body(Some(r#"{"username":"ann","age":30}"#), &[]).unwrap();
    assert_eq!(body, json!({ "username": "ann", "age": 30 }));
}

#[test]
fn register_body_data_must_be_object() {
    assert!(matches!(build_register_body(Some("[1,2]"), &[]), Err(CliError::NotAnObject)));
}

#[test]
fn register_body_invalid_json() {
    assert!(matches!(build_register_body(Some("{nope"), &[]), Err(CliError::InvalidJson(_))));
}

#[test]
fn register_body_from_fields_keeps_values_as_strings() {
    let fields = vec!["username=ann".to_owned(), "zip=02134".to_owned(), "note=a=b".to_owned()];
    let body = build_register_body(None, &fields).unwrap();
    assert_eq!(body, json!({ "username": "ann", "zip": "02134", "note": "a=b" }));
}

#[test]
fn register_body_rejects_field_without_equals() {
    let fields = vec!["username".to_owned()];
    assert!(matches!(build_register_body(None, &fields), Err(CliError::InvalidField(_))));
}

#[test]
fn register_body_rejects_blank_key() {
    let fields = vec![" =x".to_owned()];
    assert!(matches!(build_register_body(None, &fields), Err(CliError::InvalidField(_))));
}

#[test]
fn register_body_empty_fields_is_empty_object() {
    assert_eq!(build_register_body(None, &[]).unwrap(), json!({}));
}

#[test]
fn cli_parses_login_with_password_flag() {
    let cli = Cli::try_parse_from(["authflow", "login", "ann", "--password", "right"]).unwrap();
    match cli.command {
        Command::Login { username, password } => {
            assert_eq!(username, "ann");
            assert_eq!(password, "right");
        }
        other => panic!("expected login, got {other:?}"),
    }
}

#[test]
fn cli_register_data_conflicts_with_field() {
    let parsed = Cli::try_parse_from(["authflow", "register", "--data", "{}", "--field", "a=b"]);
    assert!(parsed.is_err());
}

#[test]
fn api_url_flag_is_normalized() {
    let config = apply_overrides(AuthConfig::default(), Some("http://backend:8080/"), None);
    assert_eq!(config.api_url, "http://backend:8080");
}

#[test]
fn blank_api_url_flag_keeps_default_origin() {
    let config = apply_overrides(AuthConfig::default(), Some(""), None);
    assert_eq!(config.api_url, "http://localhost:3000");
}

#[test]
fn storage_dir_flag_overrides_config() {
    let config = apply_overrides(AuthConfig::default(), None, Some(PathBuf::from("/tmp/authflow-cli")));
    assert_eq!(config.storage_dir, PathBuf::from("/tmp/authflow-cli"));
}
