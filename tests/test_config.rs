use std::io::Write;
use std::time::Duration;

use petrel::config::ServerConfig;

#[test]
fn test_defaults() {
    let cfg = ServerConfig::default();

    assert_eq!(cfg.port, 4221);
    assert_eq!(cfg.address.to_string(), "127.0.0.1");
    assert!(cfg.directory.is_none());
    assert_eq!(cfg.read_timeout, Duration::from_secs(5));
}

#[test]
fn test_partial_file_overlays_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "port = 8080\nmax_body_size = 2048\nread_timeout = 1.5"
    )
    .unwrap();

    let cfg = ServerConfig::from_file(file.path().to_str().unwrap());

    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.max_body_size, 2048);
    assert_eq!(cfg.read_timeout, Duration::from_secs_f64(1.5));
    // Untouched fields keep their defaults.
    assert_eq!(cfg.buffer_size, 4096);
    assert!(cfg.directory.is_none());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let cfg = ServerConfig::from_file("/nonexistent/petrel.toml");

    assert_eq!(cfg.port, 4221);
}

#[test]
fn test_directory_field_parses() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "directory = \"/srv/files\"").unwrap();

    let cfg = ServerConfig::from_file(file.path().to_str().unwrap());

    assert_eq!(
        cfg.directory.as_deref(),
        Some(std::path::Path::new("/srv/files"))
    );
}
