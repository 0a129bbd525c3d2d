//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `animal_core` linkage and store bootstrap from the environment.
//! - Keep output deterministic for quick local sanity checks.

use animal_core::{AnimalManager, CoreConfig, ManagerError, SqliteAnimalRepository};
use std::error::Error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("animal_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    config.init_logging()?;

    let store = config.open_store()?;
    let manager = AnimalManager::new(SqliteAnimalRepository::try_new(store)?);

    let count = match manager.get_all().await {
        Ok(animals) => animals.len(),
        Err(ManagerError::NotFound(_)) => 0,
        Err(err) => return Err(err.into()),
    };

    println!("animal_core ping={}", animal_core::ping());
    println!("animal_core version={}", animal_core::core_version());
    println!("animal_core animals={count}");
    Ok(())
}
