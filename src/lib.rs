pub mod app;
pub mod appointment;
pub mod cli;
pub mod collection;
pub mod config;
pub mod env_manager;
pub mod error;
pub mod form;
pub mod geolocation;
pub mod messages;
pub mod parser;
pub mod state;
pub mod validation;
pub mod view;

use anyhow::Result;
use log::*;
use std::path::PathBuf;

/// Load config, build the application and run either one command or the
/// interactive session
pub async fn run(command: Option<cli::Commands>, config_path: Option<PathBuf>) -> Result<()> {
    env_manager::load_env_file();
    env_manager::check_env_vars();

    let config = match config_path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    info!("Initializing Termin application");
    let mut app = app::Application::new(config)?;
    match command {
        Some(command) => app.execute(command).await,
        None => app.run().await,
    }
}

pub fn init_logger() {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_manager::LOG_LEVEL_VAR, "warn"),
    )
    .format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        )
    })
    .init();
}

// Re-export commonly used types
pub use appointment::{Appointment, AppointmentDraft};
pub use collection::AppointmentBook;
pub use config::Config;
pub use parser::{LanguageModel, SmartParser};
