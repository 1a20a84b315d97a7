use anyhow::Result;
use clap::Parser;
use cortexide_releases::{
    config::Config,
    output::{render_json, render_linux_table, render_summary},
    runtime::RealRuntime,
    services::build_resolver,
};

/// cortexide-releases - CortexIDE download link resolver
///
/// Resolves the latest CortexIDE release into Windows, macOS and Linux
/// download links, falling back to known-good links when GitHub is
/// unreachable.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for avoiding rate limits.
///
/// Examples:
///   cortexide-releases latest          # Print the latest version and its links
///   cortexide-releases latest --json   # Same, as JSON
///   cortexide-releases linux           # Table of Linux packages
#[derive(Parser, Debug)]
#[command(author, version = env!("CORTEXIDE_RELEASES_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(
        long = "api-url",
        env = "CORTEXIDE_API_URL",
        value_name = "URL",
        global = true
    )]
    pub api_url: Option<String>,

    /// Base URL of the version pointer files used when the API is unavailable
    #[arg(
        long = "versions-url",
        env = "CORTEXIDE_VERSIONS_URL",
        value_name = "URL",
        global = true
    )]
    pub versions_url: Option<String>,

    /// Per-request timeout in seconds (defaults to 10)
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the latest version and its download links
    Latest(LatestArgs),

    /// Show the Linux packages of the latest version
    Linux,
}

#[derive(clap::Args, Debug)]
pub struct LatestArgs {
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    let config = Config::load(&runtime, cli.api_url, cli.versions_url, cli.timeout);
    let resolver = build_resolver(&config, runtime)?;
    let resolved = resolver.resolve().await;

    match cli.command {
        Commands::Latest(args) if args.json => println!("{}", render_json(&resolved)?),
        Commands::Latest(_) => print!("{}", render_summary(&resolved)),
        Commands::Linux => print!("{}", render_linux_table(&resolved)),
    }
    Ok(())
}
