use figment::Jail;

use docrank_core::config::{Config, FlatCohortPolicy, Settings, StopWordPreset};

#[test]
fn defaults_apply_without_files() {
    Jail::expect_with(|jail| {
        jail.set_env("RUST_ENV", "test");
        let settings = Config::load().map_err(|e| e.to_string())?.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.ocr.binary, "tesseract");
        assert_eq!(settings.ranking.flat_cohort, FlatCohortPolicy::RawSimilarity);
        Ok(())
    });
}

#[test]
fn env_file_and_variables_layer_over_base() {
    Jail::expect_with(|jail| {
        jail.set_env("RUST_ENV", "test");
        jail.create_file(
            "config.toml",
            r#"
            [ocr]
            binary = "/opt/tesseract/bin/tesseract"
            languages = ["eng", "deu"]

            [ranking]
            stop_words = "none"
            "#,
        )?;
        jail.create_file(
            "config.test.toml",
            r#"
            [ranking]
            flat_cohort = "midpoint"
            "#,
        )?;
        jail.set_env("APP_EXTRACTION__CONCURRENCY", "8");

        let config = Config::load().map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.ocr.languages, vec!["eng", "deu"]);
        assert_eq!(settings.ranking.stop_words, StopWordPreset::None);
        assert_eq!(settings.ranking.flat_cohort, FlatCohortPolicy::Midpoint);
        assert_eq!(settings.extraction.concurrency, 8);
        assert_eq!(settings.ranking.min_token_chars, 2);

        let binary: String = config.get("ocr.binary").map_err(|e| e.to_string())?;
        assert_eq!(binary, "/opt/tesseract/bin/tesseract");
        Ok(())
    });
}

#[test]
fn invalid_values_are_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("RUST_ENV", "test");
        jail.set_env("APP_EXTRACTION__CONCURRENCY", "0");
        let err = Config::load().err().ok_or("zero concurrency must be rejected")?;
        assert!(err.to_string().contains("concurrency"));
        Ok(())
    });
}

#[test]
fn ocr_paths_expand_environment_variables() {
    Jail::expect_with(|jail| {
        jail.set_env("OCR_HOME", "/srv/ocr");
        let mut settings = Settings::default();
        settings.ocr.binary = "$OCR_HOME/tesseract".into();
        settings.ocr.tessdata_dir = Some("${OCR_HOME}/tessdata".into());
        assert_eq!(settings.ocr.binary_path(), std::path::PathBuf::from("/srv/ocr/tesseract"));
        assert_eq!(settings.ocr.tessdata_path(), Some(std::path::PathBuf::from("/srv/ocr/tessdata")));
        Ok(())
    });
}
