//! Mutable builders for build configurations.
//!
//! `build()` takes `&self` and returns a snapshot, so a builder can keep
//! collecting fields after a configuration has been taken from it.

use crate::model::{
    BuildConfig, BuildConfigSpec, BuildOutput, BuildSource, BuildStrategy, BuildTriggerPolicy,
    Labels, ObjectMeta, API_VERSION,
};

#[derive(Debug, Clone, Default)]
pub struct BuildConfigSpecBuilder {
    source: Option<BuildSource>,
    output: Option<BuildOutput>,
    strategy: Option<BuildStrategy>,
}

impl BuildConfigSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(&mut self, source: BuildSource) -> &mut Self {
        self.source = Some(source);
        self
    }

    pub fn with_output(&mut self, output: BuildOutput) -> &mut Self {
        self.output = Some(output);
        self
    }

    pub fn with_strategy(&mut self, strategy: BuildStrategy) -> &mut Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn build(&self) -> BuildConfigSpec {
        BuildConfigSpec {
            source: self.source.clone(),
            output: self.output.clone(),
            strategy: self.strategy.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildConfigBuilder {
    name: String,
    labels: Labels,
    parameters: Option<BuildConfigSpec>,
    triggers: Vec<BuildTriggerPolicy>,
}

impl BuildConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(&mut self, name: &str) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn with_labels(&mut self, labels: Labels) -> &mut Self {
        self.labels = labels;
        self
    }

    pub fn with_parameters(&mut self, parameters: BuildConfigSpec) -> &mut Self {
        self.parameters = Some(parameters);
        self
    }

    /// Appends a trigger. Triggers are never deduplicated.
    pub fn add_trigger(&mut self, trigger: BuildTriggerPolicy) -> &mut Self {
        self.triggers.push(trigger);
        self
    }

    pub fn triggers(&self) -> &[BuildTriggerPolicy] {
        &self.triggers
    }

    pub fn build(&self) -> BuildConfig {
        BuildConfig {
            api_version: API_VERSION.into(),
            metadata: ObjectMeta {
                name: self.name.clone(),
                labels: self.labels.clone(),
            },
            parameters: self.parameters.clone(),
            triggers: self.triggers.clone(),
        }
    }
}
