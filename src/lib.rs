//! Assemble OpenShift build configurations and render them as manifests.
//!
//! The [`build_configs`] functions produce [`model::BuildConfig`] and
//! [`model::ImageStream`] values. [`manifest`] turns them into YAML or JSON
//! for whatever client submits them to the cluster.

pub mod build_configs;
pub mod builder;
pub mod config;
pub mod manifest;
pub mod model;
