use clap::Parser;
use std::process;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use ycvm::api::{self, ApiClient};
use ycvm::config::{self, DEFAULT_CONFIG_PATH, DEFAULT_POLL_INTERVAL_SECS};
use ycvm::models::{load_ssh_public_key, ProvisionConfig};
use ycvm::{provision, ProvisionError};

#[derive(Parser)]
#[command(
    name = "ycvm",
    author,
    version,
    about = "Create a Yandex Cloud compute instance from config.json",
    long_about = r#"ycvm reads a JSON provisioning config and an SSH public key, fills the
USERNAME and SSH_PUBLIC_KEY placeholders in the instance metadata, resolves the
latest image of the configured family and creates one instance, waiting for the
operation to finish.

Environment:
  IAM_TOKEN              bearer token for the Yandex Cloud API
  SSH_PUBLIC_KEY_PATH    path to the public key inserted into metadata
  YC_COMPUTE_ENDPOINT    override the compute API endpoint
  YC_OPERATION_ENDPOINT  override the operation API endpoint
"#
)]
struct Cli {
    /// Path to the provisioning config
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    /// Path to .env file
    #[arg(long)]
    env_file: Option<String>,
    /// Resolve the image and print the request without creating anything
    #[arg(long)]
    dry_run: bool,
    /// Seconds between operation status checks (at least 1)
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    poll_interval: u64,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

async fn execute(cli: Cli) -> Result<(), ProvisionError> {
    config::load_env_file(cli.env_file.as_deref());

    let provision_config = ProvisionConfig::load(&cli.config)?;
    let ssh_public_key = load_ssh_public_key(config::get_ssh_public_key_path())?;
    let client = ApiClient::from_env()?.with_poll_interval(Duration::from_secs(cli.poll_interval));

    if cli.dry_run {
        let request = provision::plan(&client, &provision_config, &ssh_public_key).await?;
        let rendered = serde_json::to_string_pretty(&request).map_err(std::io::Error::from)?;
        println!("{}", rendered);
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    let outcome = provision::run(&client, &provision_config, &ssh_public_key, &mut stdout).await?;
    tracing::info!(
        operation_id = %outcome.operation_id,
        instance_id = %outcome.instance_id,
        "provisioning finished"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    if let Err(e) = execute(cli).await {
        tracing::error!(error = %e, "provisioning failed");
        eprintln!("{}: {}", yansi::Paint::new("Error").red().bold(), e);
        process::exit(1);
    }
}
