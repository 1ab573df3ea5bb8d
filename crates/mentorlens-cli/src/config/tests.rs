#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.dataset.path, "data/dataset.json");
        assert_eq!(config.storage.io_timeout_ms, 5_000);
        assert_eq!(config.display.items_per_page, 12);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [dataset]
            url = "https://example.edu/dataset.json"

            [storage]
            path = "/var/lib/mentorlens"
            "#,
        )
        .unwrap();
        assert!(matches!(config.dataset.source(), DatasetSource::Url(_)));
        assert_eq!(config.dataset.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.storage.path, "/var/lib/mentorlens");
        assert_eq!(config.storage.io_timeout(), Duration::from_millis(5_000));
    }

    #[test]
    fn test_path_source_when_no_url() {
        let config = Config::default();
        match config.dataset.source() {
            DatasetSource::File(path) => assert_eq!(path, std::path::PathBuf::from("data/dataset.json")),
            other => panic!("expected file source, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_from("/definitely/not/here/mentorlens.toml").unwrap();
        assert_eq!(config.display.items_per_page, 12);
    }
}
