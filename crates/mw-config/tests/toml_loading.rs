//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use mw_config::{ConfigError, MeshConfig};
use mw_core::BlockedPolicy;
use pretty_assertions::assert_eq;

fn layered(file: &str) -> Figment {
    Figment::from(Serialized::defaults(MeshConfig::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed("MESHWATCH_").split("__"))
}

#[test]
fn adds_a_profile_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[consensus.profiles.vpn]
key_column = "domain"
status_column = "blocked"
blocked = { kind = "one_of", values = ["sí", "si", "yes"] }
"#,
        )?;

        let config: MeshConfig = layered("config.toml").extract()?;

        let vpn = config.profile("vpn").expect("vpn profile");
        assert_eq!(vpn.key_column, "domain");
        assert_eq!(
            vpn.blocked,
            BlockedPolicy::OneOf {
                values: vec!["sí".into(), "si".into(), "yes".into()]
            }
        );
        assert!(config.profile("dns").is_ok(), "defaults survive the merge");
        Ok(())
    });
}

#[test]
fn classify_section_overrides() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[classify]
categories = ["gmb", "news"]
text_column = "contenido"
parallel = false
"#,
        )?;

        let config: MeshConfig = layered("config.toml").extract()?;
        assert_eq!(config.classify.categories, vec!["gmb", "news"]);
        assert_eq!(config.classify.text_column, "contenido");
        assert_eq!(config.classify.url_column, "url");
        assert!(!config.classify.parallel);
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[consensus]
sentinel = "FROM_TOML"

[report]
dns_key = "Domain"
"#,
        )?;
        jail.set_env("MESHWATCH_CONSENSUS__SENTINEL", "FROM_ENV");
        jail.set_env("MESHWATCH_REPORT__HTTP_KEY", "url");

        let config: MeshConfig = layered("config.toml").extract()?;
        assert_eq!(config.consensus.sentinel, "FROM_ENV");
        assert_eq!(config.report.dns_key, "Domain");
        assert_eq!(config.report.http_key, "url");
        assert_eq!(config.report.dns_blocked, "Bloqueado");
        Ok(())
    });
}

#[test]
fn load_reads_project_file_and_validates() {
    Jail::expect_with(|jail| {
        jail.create_dir(".meshwatch")?;
        jail.create_file(
            ".meshwatch/config.toml",
            r#"
[consensus.profiles.dns]
key_column = ""
status_column = "Bloqueado"
blocked = { kind = "equals", value = "Sí" }
"#,
        )?;

        let error = MeshConfig::load().expect_err("empty key column");
        assert!(matches!(
            error,
            ConfigError::InvalidValue { ref field, .. }
                if field == "consensus.profiles.dns.key_column"
        ));
        Ok(())
    });
}
