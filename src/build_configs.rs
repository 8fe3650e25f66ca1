//! Assembles build configurations from plain strings.
//!
//! Nothing here validates names, URLs or images; malformed values are passed
//! through and left for the platform to reject.

use crate::builder::{BuildConfigBuilder, BuildConfigSpecBuilder};
use crate::model::{
    BuildConfig, BuildConfigSpec, BuildOutput, BuildSource, BuildStrategy, BuildTriggerPolicy,
    CustomBuildStrategy, EnvVar, ImageStream, Labels, StiBuildStrategy,
};
use log::debug;

/// True unless the string is empty or made only of control characters and
/// spaces (`c <= ' '`). Unicode whitespace such as U+00A0 counts as content.
pub fn is_not_blank(s: &str) -> bool {
    !s.trim_matches(|c: char| c <= ' ').is_empty()
}

pub fn create_build_labels(build_name: &str) -> Labels {
    Labels::from([("name".to_string(), build_name.to_string())])
}

pub fn image_repository(build_name: &str, labels: Labels) -> ImageStream {
    ImageStream::new(build_name, labels)
}

/// Sets the output tag. The output `to` reference is left unset.
pub fn add_build_parameter_output(
    builder: &mut BuildConfigSpecBuilder,
    image_tag: &str,
) -> BuildConfigSpec {
    builder
        .with_output(BuildOutput {
            tag: image_tag.into(),
            to: None,
        })
        .build()
}

pub fn add_build_parameter_git_source(
    builder: &mut BuildConfigSpecBuilder,
    git_url: &str,
) -> BuildConfigSpec {
    builder.with_source(BuildSource::git(git_url)).build()
}

/// Source-to-image strategy. `image` doubles as the builder image.
pub fn add_build_config_sti_strategy(
    builder: &mut BuildConfigSpecBuilder,
    image: &str,
) -> BuildConfigSpec {
    builder
        .with_strategy(BuildStrategy::Sti {
            sti_strategy: StiBuildStrategy {
                image: image.into(),
            },
        })
        .build()
}

pub fn add_build_parameter_custom_strategy(
    builder: &mut BuildConfigSpecBuilder,
    image: &str,
    env_vars: Vec<EnvVar>,
) -> BuildConfigSpec {
    builder
        .with_strategy(BuildStrategy::Custom {
            custom_strategy: CustomBuildStrategy {
                image: image.into(),
                env: env_vars,
            },
        })
        .build()
}

pub fn build_config_builder(build_name: &str, labels: Labels) -> BuildConfigBuilder {
    let mut builder = BuildConfigBuilder::new();
    builder.with_labels(labels).with_name(build_name);
    builder
}

pub fn build_config_builder_with_spec(
    build_name: &str,
    labels: Labels,
    parameters: BuildConfigSpec,
) -> BuildConfigBuilder {
    let mut builder = build_config_builder(build_name, labels);
    builder.with_parameters(parameters);
    builder
}

/// Appends a github trigger followed by a generic trigger, both using `secret`.
///
/// Calling this twice yields four triggers.
pub fn add_web_hook_triggers<'a>(
    builder: &'a mut BuildConfigBuilder,
    secret: &str,
) -> &'a mut BuildConfigBuilder {
    builder
        .add_trigger(BuildTriggerPolicy::github(secret))
        .add_trigger(BuildTriggerPolicy::generic(secret))
}

/// Build configuration for an application.
///
/// The git source is always set. Output, strategy and webhook triggers are
/// only added when `output_image_tag`, `image` and `webhook_secret`
/// respectively are not blank.
pub fn create_build_config(
    build_config_name: &str,
    labels: Labels,
    git_url: &str,
    output_image_tag: &str,
    image: &str,
    webhook_secret: &str,
) -> BuildConfig {
    let mut parameters = BuildConfigSpecBuilder::new();
    add_build_parameter_git_source(&mut parameters, git_url);
    if is_not_blank(output_image_tag) {
        add_build_parameter_output(&mut parameters, output_image_tag);
    } else {
        debug!("{build_config_name}: no output image tag, leaving output unset");
    }
    if is_not_blank(image) {
        add_build_config_sti_strategy(&mut parameters, image);
    } else {
        debug!("{build_config_name}: no builder image, leaving strategy unset");
    }

    let mut builder =
        build_config_builder_with_spec(build_config_name, labels, parameters.build());
    if is_not_blank(webhook_secret) {
        add_web_hook_triggers(&mut builder, webhook_secret);
    } else {
        debug!("{build_config_name}: no webhook secret, skipping triggers");
    }
    builder.build()
}

/// Build configuration that runs integration tests with a custom builder image.
/// Never has triggers.
pub fn create_integration_test_build_config(
    build_config_name: &str,
    labels: Labels,
    git_url: &str,
    image: &str,
    env_vars: Vec<EnvVar>,
) -> BuildConfig {
    let mut parameters = BuildConfigSpecBuilder::new();
    add_build_parameter_git_source(&mut parameters, git_url);
    if is_not_blank(image) {
        add_build_parameter_custom_strategy(&mut parameters, image, env_vars);
    } else {
        debug!("{build_config_name}: no test image, leaving strategy unset");
    }
    build_config_builder_with_spec(build_config_name, labels, parameters.build()).build()
}
