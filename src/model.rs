//! OpenShift build resources, shaped the way the `v1beta1` API serializes them.
//!
//! Only the fields this crate populates are modelled. Everything
//! deserializes as well, so a rendered manifest can be read back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const API_VERSION: &str = "v1beta1";

/// Labels used to tag resources. Ordered so rendered manifests are stable.
pub type Labels = BTreeMap<String, String>;

fn default_api_version() -> String {
    API_VERSION.into()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: Labels,
}

/// Named, labeled pointer to a set of container image tags.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImageStream {
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,
    pub metadata: ObjectMeta,
}

impl ImageStream {
    pub fn new(name: &str, labels: Labels) -> Self {
        Self {
            api_version: default_api_version(),
            metadata: ObjectMeta {
                name: name.into(),
                labels,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GitBuildSource {
    pub uri: String,
}

/// Where the build fetches its source from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum BuildSource {
    Git { git: GitBuildSource },
}

impl BuildSource {
    pub fn git(uri: &str) -> Self {
        BuildSource::Git {
            git: GitBuildSource { uri: uri.into() },
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            BuildSource::Git { git } => &git.uri,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
}

/// Image tag the build pushes its result to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BuildOutput {
    pub tag: String,
    /// Never populated by the assembler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<ObjectReference>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StiBuildStrategy {
    pub image: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CustomBuildStrategy {
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
}

/// How the platform turns source into an image.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum BuildStrategy {
    /// Source-to-image: a builder image assembles the source into a runnable image.
    #[serde(rename = "STI")]
    Sti {
        #[serde(rename = "stiStrategy")]
        sti_strategy: StiBuildStrategy,
    },
    /// Runs an arbitrary builder image with explicit environment variables.
    Custom {
        #[serde(rename = "customStrategy")]
        custom_strategy: CustomBuildStrategy,
    },
}

impl BuildStrategy {
    pub fn image(&self) -> &str {
        match self {
            BuildStrategy::Sti { sti_strategy } => &sti_strategy.image,
            BuildStrategy::Custom { custom_strategy } => &custom_strategy.image,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebHookTrigger {
    pub secret: String,
}

/// Starts a build when an external system calls back with the shared secret.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BuildTriggerPolicy {
    Github { github: WebHookTrigger },
    Generic { generic: WebHookTrigger },
}

impl BuildTriggerPolicy {
    pub fn github(secret: &str) -> Self {
        BuildTriggerPolicy::Github {
            github: WebHookTrigger {
                secret: secret.into(),
            },
        }
    }

    pub fn generic(secret: &str) -> Self {
        BuildTriggerPolicy::Generic {
            generic: WebHookTrigger {
                secret: secret.into(),
            },
        }
    }

    pub fn secret(&self) -> &str {
        match self {
            BuildTriggerPolicy::Github { github } => &github.secret,
            BuildTriggerPolicy::Generic { generic } => &generic.secret,
        }
    }
}

/// The `parameters` of a build configuration.
///
/// `source` is optional in the object model, and the platform rejects a
/// configuration without it. The `create_*` functions in
/// [`crate::build_configs`] always set it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BuildConfigSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<BuildSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<BuildOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<BuildStrategy>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BuildConfigSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<BuildTriggerPolicy>,
}

impl BuildConfig {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Any resource that can be rendered as a manifest, tagged by its `kind`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind")]
pub enum Resource {
    BuildConfig(BuildConfig),
    ImageStream(ImageStream),
    List(List),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct List {
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,
    pub items: Vec<Resource>,
}

impl List {
    pub fn new(items: Vec<Resource>) -> Self {
        Self {
            api_version: default_api_version(),
            items,
        }
    }
}

impl From<BuildConfig> for Resource {
    fn from(value: BuildConfig) -> Self {
        Resource::BuildConfig(value)
    }
}

impl From<ImageStream> for Resource {
    fn from(value: ImageStream) -> Self {
        Resource::ImageStream(value)
    }
}

impl From<List> for Resource {
    fn from(value: List) -> Self {
        Resource::List(value)
    }
}
