//! Configuration loading tests, run inside figment jails

use std::path::Path;

use figment::Jail;
use webcalc::Rewrites;
use webcalc::config::Config;

#[test]
fn test_defaults_without_file() {
    Jail::expect_with(|_jail| {
        let config = Config::try_load_from(Some(Path::new("missing.toml")))?;
        assert_eq!(config, Config::default());
        Ok(())
    });
}

#[test]
fn test_file_values() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "webcalc.toml",
            r#"
                host = "0.0.0.0"
                port = 8080
                cors = false
                precision = 6
                rewrites = ["strip_spaces", "pi"]
            "#,
        )?;

        let config = Config::try_load_from(Some(Path::new("webcalc.toml")))?;
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(!config.cors);
        assert_eq!(config.log_level, "info");

        let rewrites = config.rewrites().unwrap();
        assert_eq!(rewrites, Rewrites::STRIP_SPACES | Rewrites::PI);

        let calculator = config.calculator().unwrap();
        assert_eq!(calculator.evaluate("π"), "3.14159");
        assert_eq!(calculator.evaluate("√9"), "Error: Invalid expression");

        let server = config.server_config().unwrap();
        assert_eq!(server.addr.to_string(), "0.0.0.0:8080");
        assert!(!server.cors);
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("webcalc.toml", "port = 8080\nlog_level = \"warn\"")?;
        jail.set_env("WEBCALC_PORT", "9000");
        jail.set_env("WEBCALC_JSON_LOGS", "true");

        let config = Config::try_load_from(Some(Path::new("webcalc.toml")))?;
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, "warn");
        assert!(config.json_logs);
        Ok(())
    });
}

#[test]
fn test_invalid_values() {
    Jail::expect_with(|jail| {
        jail.create_file("webcalc.toml", "port = \"not a port\"")?;
        assert!(Config::try_load_from(Some(Path::new("webcalc.toml"))).is_err());

        // Falls back to defaults instead of failing
        let config = Config::load_from(Some(Path::new("webcalc.toml")));
        assert_eq!(config, Config::default());
        Ok(())
    });
}

#[test]
fn test_unknown_rewrite_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("webcalc.toml", "rewrites = [\"radical\", \"euler\"]")?;
        let config = Config::try_load_from(Some(Path::new("webcalc.toml")))?;
        assert!(config.calculator().is_err());
        Ok(())
    });
}
