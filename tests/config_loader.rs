use storefront::config::Config;

fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    (dir, path)
}

#[test]
fn defaults_are_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert!(config.shop.base_url.starts_with("http"));
}

#[test]
fn loads_a_full_file() {
    let (_dir, path) = write_config(
        r#"[shop]
base_url = "https://shop.example/api"
cdn_url = "https://cdn.example/content"
connect_timeout_seconds = 2
request_timeout_seconds = 10
"#,
    );

    let config = Config::load_from(&path).expect("load failed");
    assert_eq!(config.shop.base_url, "https://shop.example/api");
    assert_eq!(config.shop.request_timeout_seconds, 10);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let (_dir, path) = write_config(
        r#"[shop]
base_url = "https://shop.example/api"
"#,
    );

    let config = Config::load_from(&path).expect("load failed");
    assert_eq!(config.shop.connect_timeout_seconds, 5);
    assert_eq!(config.shop.cdn_url, "http://127.0.0.1:3000/content");
}

#[test]
fn rejects_a_non_http_base_url() {
    let (_dir, path) = write_config(
        r#"[shop]
base_url = "ftp://shop.example"
"#,
    );

    let err = Config::load_from(&path).expect_err("validation should fail");
    assert!(err.to_string().contains("base_url"));
}

#[test]
fn rejects_zero_timeouts() {
    let (_dir, path) = write_config(
        r#"[shop]
request_timeout_seconds = 0
"#,
    );

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn rejects_malformed_toml() {
    let (_dir, path) = write_config("shop = [broken");
    assert!(Config::load_from(&path).is_err());
}
