use crate::manifest::Format;
use crate::model::EnvVar;
use log::debug;
use serde::Deserialize;
use serde_inline_default::serde_inline_default;
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("../default.toml");

pub const DEFAULT_CONFIG_FILE: &str = "bcgen.toml";

#[derive(Error, Debug)]
pub enum Error {
    #[error("read {path}: {err}")]
    Read {
        err: std::io::Error,
        path: String,
    },

    #[error("parse: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A bcgen.toml file.
#[serde_inline_default]
#[derive(Deserialize, Debug)]
pub struct File {
    pub description: Option<String>,
    #[serde(default)]
    pub format: Format,
    /// Emit an ImageStream next to each application build configuration.
    #[serde_inline_default(true)]
    pub image_stream: bool,
    #[serde(default)]
    pub build: Build,
    #[serde(default)]
    pub integration_test: IntegrationTest,
}

impl Default for File {
    fn default() -> Self {
        // The default config is compiled into the program, so
        // make sure to test default() to catch panics compile-time.
        toml::from_str(DEFAULT_CONFIG).unwrap()
    }
}

impl File {
    /// Parses `user_config` and lays it over the built-in defaults.
    /// Tables are merged key by key; any other value, arrays included,
    /// replaces the default.
    pub fn default_with_user_config(user_config: &str) -> Result<Self, Error> {
        let mut base: toml::Table = toml::from_str(DEFAULT_CONFIG)?;
        let user: toml::Table = toml::from_str(user_config)?;
        merge(&mut base, user);
        Ok(toml::Value::Table(base).try_into()?)
    }

    pub fn default_with_user_config_file(path: &str) -> Result<Self, Error> {
        debug!("Reading configuration file {path}");
        let data = std::fs::read_to_string(path).map_err(|err| Error::Read {
            err,
            path: path.to_string(),
        })?;
        Self::default_with_user_config(&data)
    }
}

fn merge(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(table) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge(existing, table);
                continue;
            }
            base.insert(key, toml::Value::Table(table));
        } else {
            base.insert(key, value);
        }
    }
}

/// Defaults for application build configurations.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Build {
    pub output_image_tag: String,
    pub image: String,
    pub webhook_secret: String,
}

/// Defaults for integration test build configurations.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct IntegrationTest {
    pub image: String,
    /// Kept in file order; a later value may refer to an earlier one as `$(NAME)`.
    pub env: Vec<EnvVar>,
}

#[cfg(test)]
pub mod test {
    use super::*;
    use std::io::Write;

    #[test]
    pub fn load_default_configuration() {
        let cfg = File::default();
        assert_eq!(cfg.description, Some("Default configuration file".into()));
        assert_eq!(cfg.format, Format::Yaml);
        assert!(cfg.image_stream);
        assert_eq!(cfg.build.image, "");
        assert!(cfg.integration_test.env.is_empty());
    }

    #[test]
    pub fn user_config_overrides_defaults() {
        let cfg = File::default_with_user_config(
            r#"
format = "json"

[build]
image = "fabric8/java-sti"

[integration_test]
env = [
    { name = "MAVEN_OPTS", value = "-Xmx1g" },
    { name = "KUBERNETES_NAMESPACE", value = "test" },
]
"#,
        )
        .unwrap();
        assert_eq!(cfg.description, Some("Default configuration file".into()));
        assert_eq!(cfg.format, Format::Json);
        assert!(cfg.image_stream);
        assert_eq!(cfg.build.image, "fabric8/java-sti");
        assert_eq!(cfg.build.webhook_secret, "");
        assert_eq!(
            cfg.integration_test.env,
            vec![
                EnvVar::new("MAVEN_OPTS", "-Xmx1g"),
                EnvVar::new("KUBERNETES_NAMESPACE", "test"),
            ]
        );
    }

    #[test]
    pub fn env_keeps_file_order() {
        let cfg = File::default_with_user_config(
            r#"
[integration_test]
env = [
    { name = "Z_FIRST", value = "1" },
    { name = "A_SECOND", value = "$(Z_FIRST)" },
]
"#,
        )
        .unwrap();
        let names: Vec<_> = cfg
            .integration_test
            .env
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["Z_FIRST", "A_SECOND"]);
    }

    #[test]
    pub fn user_env_replaces_default_env() {
        let base = File::default_with_user_config(
            "[integration_test]\nenv = [{ name = \"A\", value = \"1\" }]\n",
        )
        .unwrap();
        assert_eq!(base.integration_test.env, vec![EnvVar::new("A", "1")]);

        let mut table: toml::Table =
            toml::from_str("[integration_test]\nenv = [{ name = \"A\", value = \"1\" }]\n")
                .unwrap();
        merge(
            &mut table,
            toml::from_str("[integration_test]\nenv = [{ name = \"B\", value = \"2\" }]\n")
                .unwrap(),
        );
        let cfg: File = toml::Value::Table(table).try_into().unwrap();
        assert_eq!(cfg.integration_test.env, vec![EnvVar::new("B", "2")]);
    }

    #[test]
    pub fn read_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"image_stream = false\n[build]\nwebhook_secret = \"sekret\"\n")
            .unwrap();
        let cfg = File::default_with_user_config_file(file.path().to_str().unwrap()).unwrap();
        assert!(!cfg.image_stream);
        assert_eq!(cfg.build.webhook_secret, "sekret");
    }

    #[test]
    pub fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = File::default_with_user_config_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    pub fn invalid_format_is_rejected() {
        let err = File::default_with_user_config("format = \"xml\"").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
