//! Interactive mode for the server.
//!
//! Prompts for the two source files and the listen address, then starts
//! the server once the user confirms.

use std::path::{Path, PathBuf};

use bcn_rent_dataset::paths::DataPaths;
use dialoguer::{Confirm, Input};

use crate::{ServerConfig, ServerError};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Current `RENT_CSV`, `INCOME_CSV`, `BIND_ADDR` and `PORT` values (or
/// their defaults) are offered as prompt defaults. The answers are written
/// back to the environment before delegating to [`super::run_server`].
///
/// # Errors
///
/// Returns [`ServerError`] if the datasets fail to load or the server
/// fails to start.
#[allow(clippy::future_not_send)]
pub async fn run() -> Result<(), ServerError> {
    println!("Barcelona Rent Dashboard Server");
    println!();

    let default_paths = super::data_paths()?;
    let paths = DataPaths {
        rent_csv: prompt_path("Rent CSV", &default_paths.rent_csv),
        income_csv: prompt_path("Income CSV", &default_paths.income_csv),
    };

    let defaults = ServerConfig::from_env();
    let config = ServerConfig {
        bind_addr: Input::new()
            .with_prompt("Bind address")
            .default(defaults.bind_addr.clone())
            .interact_text()
            .unwrap_or(defaults.bind_addr),
        port: Input::new()
            .with_prompt("Port")
            .default(defaults.port)
            .validate_with(|port: &u16| {
                if *port == 0 {
                    Err("port must be non-zero")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .unwrap_or(defaults.port),
    };

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("RENT_CSV", &paths.rent_csv);
        std::env::set_var("INCOME_CSV", &paths.income_csv);
        std::env::set_var("BIND_ADDR", &config.bind_addr);
        std::env::set_var("PORT", config.port.to_string());
    }

    println!();
    println!("{}", startup_summary(&config, &paths));

    if !Confirm::new()
        .with_prompt("Start server?")
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}

fn prompt_path(prompt: &str, default: &Path) -> PathBuf {
    let default = default.display().to_string();
    let answer: String = Input::new()
        .with_prompt(prompt)
        .default(default.clone())
        .interact_text()
        .unwrap_or(default);
    PathBuf::from(answer)
}

fn startup_summary(config: &ServerConfig, paths: &DataPaths) -> String {
    format!(
        "Rent data:   {}\nIncome data: {}\nListening:   http://{}:{}/api",
        paths.rent_csv.display(),
        paths.income_csv.display(),
        config.bind_addr,
        config.port,
    )
}
