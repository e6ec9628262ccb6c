use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use reapctl::aws::{establish_session, Ec2Fleet};
use reapctl::config::Config;
use reapctl::exit_codes::exit_code_for_anyhow;
use reapctl::reaper::reap;
use reapctl::zombie::ZombieCriteria;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reapctl")]
#[command(
    about = "Terminate zombie EC2 instances left behind by autoscaling runners",
    long_about = "reapctl scans every EC2 instance visible to a credential profile and terminates\nthose that are attached to the runner security group, carry no tags, and have\nbeen running longer than the age threshold.\n\nAll matches are terminated in a single TerminateInstances call."
)]
#[command(version)]
struct Cli {
    /// AWS profile name defined in ~/.aws/config
    #[arg(long, env = "REAPCTL_PROFILE")]
    profile: Option<String>,

    /// AWS region (defaults to the profile's region)
    #[arg(long)]
    region: Option<String>,

    /// Security group name that zombies are attached to (exact match)
    #[arg(long, value_name = "NAME")]
    security_group: Option<String>,

    /// Minimum instance age in minutes (inclusive)
    #[arg(long, value_name = "MINUTES")]
    min_age_minutes: Option<f64>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging - warnings and errors only unless --verbose
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("ERROR: {:#}", err);
        std::process::exit(exit_code_for_anyhow(&err));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    // CLI flags win over the config file
    if let Some(profile) = cli.profile {
        config.aws.profile = profile;
    }
    if let Some(region) = cli.region {
        config.aws.region = Some(region);
    }
    if let Some(group) = cli.security_group {
        config.criteria.target_group_name = group;
    }
    if let Some(minutes) = cli.min_age_minutes {
        config.criteria.min_age_minutes = minutes;
    }

    let criteria: ZombieCriteria = config
        .zombie_criteria()
        .context("Invalid zombie criteria")?;

    let sdk_config = establish_session(&config.aws.profile, config.aws.region.as_deref())
        .await
        .context("Failed to establish AWS session")?;
    let fleet = Ec2Fleet::new(&sdk_config);

    let now = Utc::now();
    let mut stdout = std::io::stdout().lock();
    reap(&fleet, &fleet, &criteria, now, &mut stdout).await?;

    Ok(())
}
