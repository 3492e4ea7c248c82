use anyhow::Result;
use clap::Parser;
use mongodist::commands::{ResolveArgs, resolve, rules};
use mongodist::config::Config;

/// mongodist - MongoDB distribution resolver
///
/// Find the download package of a MongoDB executable for a given platform
/// and release.
///
/// Examples:
///   mongodist resolve mongod --os-version centos-7 --version 4.2.1
///   mongodist rules mongodump --distribution ubuntu
#[derive(Parser, Debug)]
#[command(author, version = env!("MONGODIST_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Download server base URL (also via MONGODIST_BASE_URL)
    #[arg(
        long = "base-url",
        env = "MONGODIST_BASE_URL",
        value_name = "URL",
        global = true
    )]
    pub base_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve the package for a command on a platform
    Resolve(ResolveArgs),

    /// Show the rule table of a distribution
    Rules(RulesArgs),
}

#[derive(clap::Args, Debug)]
pub struct RulesArgs {
    /// The MongoDB executable
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Distribution family (centos-redhat, ubuntu)
    #[arg(long, short = 'd', value_name = "DISTRIBUTION")]
    pub distribution: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = Config::new(cli.base_url)?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Resolve(args) => resolve(&config, &args, &mut stdout)?,
        Commands::Rules(args) => rules(&args.command, &args.distribution, &mut stdout)?,
    }
    Ok(())
}
