use crate::model::Resource;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("serialize yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("serialize json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Manifest output format.
#[derive(Deserialize, clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

pub fn to_yaml(resource: &Resource) -> Result<String, Error> {
    Ok(serde_yaml::to_string(resource)?)
}

pub fn to_json(resource: &Resource) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(resource)?)
}

pub fn render(resource: &Resource, format: Format) -> Result<String, Error> {
    match format {
        Format::Yaml => to_yaml(resource),
        Format::Json => to_json(resource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_configs::{create_build_config, create_build_labels, image_repository};
    use crate::model::List;

    #[test]
    fn build_config_yaml() {
        let config = create_build_config(
            "app",
            create_build_labels("app"),
            "https://example.com/app.git",
            "tag1",
            "img1",
            "sekret",
        );
        let yaml = to_yaml(&config.into()).unwrap();
        let expected = "\
kind: BuildConfig
apiVersion: v1beta1
metadata:
  name: app
  labels:
    name: app
parameters:
  source:
    type: Git
    git:
      uri: https://example.com/app.git
  output:
    tag: tag1
  strategy:
    type: STI
    stiStrategy:
      image: img1
triggers:
- type: github
  github:
    secret: sekret
- type: generic
  generic:
    secret: sekret
";
        assert_eq!(yaml, expected);
    }

    #[test]
    fn list_json_reads_back() {
        let list = Resource::from(List::new(vec![
            image_repository("app", create_build_labels("app")).into(),
            create_build_config(
                "app",
                create_build_labels("app"),
                "https://example.com/app.git",
                "",
                "",
                "",
            )
            .into(),
        ]));
        let json = render(&list, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "List");
        assert_eq!(value["items"][0]["kind"], "ImageStream");
        assert_eq!(value["items"][1]["kind"], "BuildConfig");
        assert!(value["items"][1].get("triggers").is_none());

        let parsed: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, list);
    }
}
