use std::io::Write;
use tempfile::NamedTempFile;
use timeline_window::{Direction, Sort, WindowConfig, WindowError};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = WindowConfig::load_from(&dir.path().join("timeline.toml"));
    assert_eq!(config, WindowConfig::default());
}

#[test]
fn loads_window_section() {
    let file = write_config(
        r#"
[window]
items-per-page = 50
items-per-page-options = [25, 50, 100]

[window.sort]
column-id = "event.severity"
direction = "asc"
"#,
    );
    let config = WindowConfig::load_from(file.path());
    assert_eq!(config.items_per_page, 50);
    assert_eq!(config.items_per_page_options, vec![25, 50, 100]);
    assert_eq!(config.sort, Sort::new("event.severity", Direction::Asc));
}

#[test]
fn partial_section_fills_in_defaults() {
    let file = write_config("[window]\nitems-per-page = 10\n");
    let config = WindowConfig::load_from(file.path());
    assert_eq!(config.items_per_page, 10);
    assert_eq!(config.items_per_page_options, vec![5, 10, 20]);
    assert_eq!(config.sort, Sort::default());
}

#[test]
fn default_page_size_outside_options_moves_to_nearest() {
    let file = write_config("[window]\nitems-per-page = 30\nitems-per-page-options = [10, 25, 50]\n");
    assert_eq!(WindowConfig::load_from(file.path()).items_per_page, 25);
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let file = write_config("[window\nitems-per-page = ");
    assert_eq!(WindowConfig::load_from(file.path()), WindowConfig::default());
}

#[test]
fn invalid_options_fall_back_to_defaults() {
    let file = write_config("[window]\nitems-per-page-options = []\n");
    assert_eq!(WindowConfig::load_from(file.path()), WindowConfig::default());
}

#[test]
fn from_toml_str_reports_validation_errors() {
    assert!(matches!(
        WindowConfig::from_toml_str("[window]\nitems-per-page-options = []\n"),
        Err(WindowError::EmptyPageSizeOptions)
    ));
    assert!(matches!(
        WindowConfig::from_toml_str("[window]\nitems-per-page-options = [0, 10]\n"),
        Err(WindowError::ZeroPageSize)
    ));
    assert!(matches!(
        WindowConfig::from_toml_str("[window]\nitems-per-page = \"lots\"\n"),
        Err(WindowError::Config(_))
    ));
}

#[test]
fn error_display() {
    assert!(format!("{}", WindowError::EmptyPageSizeOptions).contains("must not be empty"));
    assert!(format!("{}", WindowError::InvalidSort("x:y".into())).contains("x:y"));
}
