use crate::{AppConfig, ConfigError, DEFAULT_MISMATCH_THRESHOLD, RedisConfig};
use figment::Jail;
use secrecy::{ExposeSecret, Secret};

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_secret_password".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_secret_password"));
}

#[test]
fn test_redis_config_redaction() {
    let config = RedisConfig {
        url: Secret::new("redis://:hunter2@localhost:6379".to_string()),
        key_prefix: None,
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("hunter2"));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_load_applies_defaults() {
    Jail::expect_with(|jail| {
        jail.create_dir("config")?;
        jail.create_file(
            "config/default.toml",
            r#"
            app_name = "sms-verification"
            app_env = "development"

            [redis]
            url = "redis://127.0.0.1:6379"
            "#,
        )?;

        let config = AppConfig::load("config").expect("config should load");
        assert_eq!(config.verification.mismatch_threshold, DEFAULT_MISMATCH_THRESHOLD);
        assert_eq!(config.verification.mismatch_channel, "sms.verification.code.mismatch");
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.metrics_addr.is_none());
        assert!(!config.is_production());
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_dir("config")?;
        jail.create_file(
            "config/default.toml",
            r#"
            app_name = "sms-verification"
            app_env = "development"

            [redis]
            url = "redis://127.0.0.1:6379"

            [verification]
            mismatch_threshold = 5
            "#,
        )?;
        jail.set_env("SMSV_VERIFICATION__MISMATCH_THRESHOLD", "3");
        jail.set_env("SMSV_REDIS__URL", "redis://cache:6379");

        let config = AppConfig::load("config").expect("config should load");
        assert_eq!(config.verification.mismatch_threshold, 3);
        assert_eq!(config.redis.url.expose_secret(), "redis://cache:6379");
        Ok(())
    });
}

#[test]
fn test_zero_threshold_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_dir("config")?;
        jail.create_file(
            "config/default.toml",
            r#"
            app_name = "sms-verification"
            app_env = "development"

            [redis]
            url = "redis://127.0.0.1:6379"

            [verification]
            mismatch_threshold = 0
            "#,
        )?;

        assert!(AppConfig::load("config").is_err());
        Ok(())
    });
}

#[test]
fn test_lockout_channel_must_not_be_inbound() {
    for inbound in ["sms.verification.code.mismatch", "sms.verification.code.verified"] {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/default.toml",
                &format!(
                    r#"
                    app_name = "sms-verification"
                    app_env = "development"

                    [redis]
                    url = "redis://127.0.0.1:6379"

                    [verification]
                    lockout_channel = "{}"
                    "#,
                    inbound
                ),
            )?;

            let err = AppConfig::load("config").unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
            Ok(())
        });
    }
}
