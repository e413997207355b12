use super::*;
use figment::Jail;

#[test]
fn test_config_loads_defaults() {
    Jail::expect_with(|_jail| {
        let config = DircntConfig::load(None).expect("Should load default config");

        assert_eq!(config, DircntConfig::default());
        assert_eq!(config.max_path_len, DEFAULT_MAX_PATH_LEN);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.force_metadata, cfg!(feature = "force-metadata"));
        Ok(())
    });
}

#[test]
fn test_config_file_and_env_layering() {
    Jail::expect_with(|jail| {
        jail.create_file(
            CONFIG_FILE,
            r#"
                force_metadata = true
                max_path_len = 1024
                format = "json"
            "#,
        )?;

        let config = DircntConfig::load(None).expect("Should load dircnt.toml");
        assert!(config.force_metadata);
        assert_eq!(config.max_path_len, 1024);
        assert_eq!(config.format, OutputFormat::Json);

        // environment beats the file
        jail.set_env("DIRCNT_MAX_PATH_LEN", "512");
        jail.set_env("DIRCNT_FORMAT", "text");
        let config = DircntConfig::load(None).expect("Should load with env");
        assert_eq!(config.max_path_len, 512);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.force_metadata);
        Ok(())
    });
}

#[test]
fn test_custom_config_path() {
    Jail::expect_with(|jail| {
        jail.create_file("elsewhere.toml", "max_path_len = 300")?;

        let config = DircntConfig::load(Some(Path::new("elsewhere.toml"))).expect("custom config");
        assert_eq!(config.max_path_len, 300);

        assert!(DircntConfig::load(Some(Path::new("missing.toml"))).is_err());
        Ok(())
    });
}

#[test]
fn test_zero_path_length_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(CONFIG_FILE, "max_path_len = 0")?;
        assert!(DircntConfig::load(None).is_err());
        Ok(())
    });
}

#[test]
fn test_cli_overrides() {
    let mut config = DircntConfig::default();
    config
        .apply_overrides(true, Some(2048), Some(OutputFormat::Json))
        .unwrap();

    assert!(config.force_metadata);
    assert_eq!(config.format, OutputFormat::Json);

    let options = config.walk_options();
    assert!(options.force_metadata);
    assert_eq!(options.max_path_len, 2048);

    assert!(config.apply_overrides(false, Some(0), None).is_err());
}
