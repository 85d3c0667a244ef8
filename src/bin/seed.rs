use std::process::ExitCode;
use profile_store::config::resolve_data_dir;
use profile_store::engine::MemStore;
use profile_store::seed::{load_fixture, sample_profile, seed};
use clap::Parser;
use log::{error, info};

/// Clears the profile store and inserts a sample profile.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the profile data file [env: PROFILE_DATA_DIR]
    #[arg(short, long)]
    data_dir: Option<String>,

    /// JSON file to seed instead of the built-in sample
    #[arg(short, long)]
    fixture: Option<String>,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let data_dir = resolve_data_dir(args.data_dir, |key| std::env::var(key).ok());
    let profile = match &args.fixture {
        Some(path) => load_fixture(path)?,
        None => sample_profile(),
    };

    let store = MemStore::open(&data_dir)?;
    seed(&store, profile).await?;
    info!("Database seeded successfully!");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error seeding database: {}", e);
            ExitCode::FAILURE
        }
    }
}
