/// OpenShift BuildConfig generator
use bcgen::build_configs::{
    create_build_config, create_build_labels, create_integration_test_build_config,
    image_repository,
};
use bcgen::config;
use bcgen::manifest::{self, Format};
use bcgen::model::{EnvVar, List, Resource};
use clap::{Parser, Subcommand};
use log::{debug, error, info};
use thiserror::Error;

/// Generate OpenShift build configurations and print them as manifests.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. Defaults to ./bcgen.toml if it exists.
    #[arg(long)]
    config: Option<String>,

    /// Output format. Overrides the configuration file.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Do not emit an ImageStream next to the build configuration.
    #[arg(long)]
    no_image_stream: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build configuration for an application, optionally with webhook triggers.
    BuildConfig {
        name: String,
        git_url: String,
        /// Image tag to push the result to.
        #[arg(long)]
        output_image_tag: Option<String>,
        /// Source-to-image builder image.
        #[arg(long)]
        image: Option<String>,
        /// Shared secret for the github and generic webhook triggers.
        #[arg(long)]
        webhook_secret: Option<String>,
    },
    /// Build configuration that runs integration tests with a custom builder image.
    IntegrationTest {
        name: String,
        git_url: String,
        /// Custom builder image.
        #[arg(long)]
        image: Option<String>,
        /// Environment variable for the builder, as KEY=VALUE. Repeatable.
        #[arg(long = "env")]
        env: Vec<String>,
    },
    /// Image stream for a build.
    ImageStream { name: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration file: {0}")]
    Config(#[from] config::Error),

    #[error("render manifest: {0}")]
    Manifest(#[from] manifest::Error),

    #[error("invalid environment variable '{0}', expected KEY=VALUE")]
    InvalidEnvVar(String),
}

/// Read configuration file from disk and merge it with the
/// `default.toml` built-in config.
///
/// If a configuration file name is not set explicitly, the default file
/// name is used when it exists. Otherwise only the built-in config applies.
fn read_config(args: &Cli) -> Result<config::File, Error> {
    let config_file = match &args.config {
        None => {
            if std::fs::metadata(config::DEFAULT_CONFIG_FILE)
                .map(|metadata| metadata.is_file())
                .unwrap_or(false)
            {
                Some(config::DEFAULT_CONFIG_FILE.to_string())
            } else {
                None
            }
        }
        Some(c) => Some(c.clone()),
    };

    Ok(if let Some(config_file) = config_file {
        config::File::default_with_user_config_file(&config_file)?
    } else {
        config::File::default()
    })
}

fn parse_env_var(arg: &str) -> Result<EnvVar, Error> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok(EnvVar::new(name, value)),
        _ => Err(Error::InvalidEnvVar(arg.to_string())),
    }
}

fn main() {
    match run() {
        Ok(_) => std::process::exit(0),
        Err(err) => {
            error!("fatal: {}", err);
            std::process::exit(1)
        }
    }
}

fn run() -> Result<(), Error> {
    env_logger::init();

    let args = Cli::parse();
    let cfg = read_config(&args)?;
    let format = args.format.unwrap_or(cfg.format);
    let with_image_stream = cfg.image_stream && !args.no_image_stream;

    let resource = resource(args.command, cfg, with_image_stream)?;
    print!("{}", manifest::render(&resource, format)?);
    Ok(())
}

/// Assembles the resource a subcommand asks for. Command line values
/// override the configuration file, even when they are blank.
fn resource(
    command: Commands,
    cfg: config::File,
    with_image_stream: bool,
) -> Result<Resource, Error> {
    Ok(match command {
        Commands::BuildConfig {
            name,
            git_url,
            output_image_tag,
            image,
            webhook_secret,
        } => {
            let output_image_tag = output_image_tag.unwrap_or(cfg.build.output_image_tag);
            let image = image.unwrap_or(cfg.build.image);
            let webhook_secret = webhook_secret.unwrap_or(cfg.build.webhook_secret);

            info!("Generating build configuration {name} from {git_url}");
            let labels = create_build_labels(&name);
            let build_config = create_build_config(
                &name,
                labels.clone(),
                &git_url,
                &output_image_tag,
                &image,
                &webhook_secret,
            );

            if with_image_stream {
                debug!("Adding image stream {name}");
                List::new(vec![
                    image_repository(&name, labels).into(),
                    build_config.into(),
                ])
                .into()
            } else {
                build_config.into()
            }
        }
        Commands::IntegrationTest {
            name,
            git_url,
            image,
            env,
        } => {
            let image = image.unwrap_or(cfg.integration_test.image);
            let env_vars = if env.is_empty() {
                cfg.integration_test.env
            } else {
                env.iter()
                    .map(|arg| parse_env_var(arg))
                    .collect::<Result<Vec<_>, _>>()?
            };

            info!("Generating integration test build configuration {name} from {git_url}");
            create_integration_test_build_config(
                &name,
                create_build_labels(&name),
                &git_url,
                &image,
                env_vars,
            )
            .into()
        }
        Commands::ImageStream { name } => {
            image_repository(&name, create_build_labels(&name)).into()
        }
    })
}
