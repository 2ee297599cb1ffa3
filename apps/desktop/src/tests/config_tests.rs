use super::*;

#[test]
fn defaults_point_at_the_hosted_api() {
    let settings = Settings::default();
    assert!(settings.api_base_url.starts_with("https://"));
    assert!(settings.database_url.starts_with("sqlite://"));
}

#[test]
fn file_config_overrides_known_keys() {
    let mut settings = Settings::default();
    apply_file_config(
        &mut settings,
        r#"
        api_base_url = "http://localhost:4200/api/"
        database_url = "sqlite://./tmp/test.db"
        "#,
    );

    assert_eq!(settings.api_base_url, "http://localhost:4200/api/");
    assert_eq!(settings.database_url, "sqlite://./tmp/test.db");
    assert_eq!(
        settings.lookup_base_url,
        Settings::default().lookup_base_url
    );
}

#[test]
fn unreadable_file_config_is_ignored() {
    let mut settings = Settings::default();
    apply_file_config(&mut settings, "this is not toml [");
    assert_eq!(settings.api_base_url, Settings::default().api_base_url);
}
