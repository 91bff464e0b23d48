//! ddns-updater - trigger a Namecheap DDNS update when the public IP changes.

use clap::Parser;
use ddns_updater::config::{Config, ConfigLayer};
use ddns_updater::updater::{RunOutcome, Updater};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ddns-updater")]
#[command(about = "A tool to trigger a DNS update in a Namecheap DDNS entry")]
#[command(version)]
struct Cli {
    /// Config file (default is $HOME/.ddns-updater.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Filename for the ip cache file. Leave blank to not cache the local ip
    #[arg(short = 'f', long = "cacheFile", value_name = "FILE")]
    cache_file: Option<String>,

    /// Endpoint(s) that return the ip address of the calling client [default: http://icanhazip.com,http://checkip.amazonaws.com]
    #[arg(short = 'i', long = "ipResolvers", value_name = "URL", value_delimiter = ',')]
    ip_resolvers: Vec<String>,

    /// Host name for the DNS entry (normally the subdomain you are using)
    #[arg(short = 'n', long = "namecheapHost")]
    namecheap_host: Option<String>,

    /// DNS domain you are using (the domain you are paying for)
    #[arg(short = 'd', long = "namecheapDomain")]
    namecheap_domain: Option<String>,

    /// Namecheap DDNS password used to authorize the request
    #[arg(short = 't', long = "namecheapToken")]
    namecheap_token: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            host: self.namecheap_host.clone(),
            domain: self.namecheap_domain.clone(),
            token: self.namecheap_token.clone(),
            ip_resolvers: (!self.ip_resolvers.is_empty()).then(|| self.ip_resolvers.clone()),
            cache_file: self.cache_file.clone(),
            verbose: self.verbose.then_some(true),
        }
    }
}

/// Log directive used when `RUST_LOG` is unset. Only this crate's events.
fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    format!("ddns_updater={}", level)
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (message, status) = report(&execute(cli).await);
    // Fatal messages go to stdout, like every other message.
    println!("{}", message);
    ExitCode::from(status)
}

/// Final message and exit status for a finished run.
fn report(result: &anyhow::Result<RunOutcome>) -> (String, u8) {
    match result {
        Ok(RunOutcome::Unchanged { .. }) => ("IPs are the same...".to_string(), 0),
        Ok(RunOutcome::Updated { .. }) => ("Success!".to_string(), 0),
        Err(e) => (format!("{:#}", e), 1),
    }
}

async fn execute(cli: Cli) -> anyhow::Result<RunOutcome> {
    let config = Config::load(cli.config.as_deref(), cli.layer())?;

    config.validate()?;

    if config.verbose {
        println!("{}", config.summary());
    }

    let updater = Updater::from_config(&config)?;
    let outcome = updater.run().await?;

    if let RunOutcome::Updated {
        previous: Some(previous),
        current,
    } = &outcome
    {
        tracing::info!("IP changed: {} -> {}", previous, current);
    }

    Ok(outcome)
}
