//! Employee Records - HTTP API and desktop client for employee records.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use eframe::egui;
use employee_records as app;

use app::config::{AppConfig, ConfigLoadResult, StoreBackend};
use app::service::EmployeeService;
use app::store::{EmployeeStore, MemoryStore};
use app::{api, db, logging, ui};

/// Employee records service and desktop client.
#[derive(Parser)]
#[command(name = "employee-records", version)]
struct Cli {
    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use config.toml from current directory (dev mode)
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Keep records in memory instead of PostgreSQL
        #[arg(long)]
        memory: bool,
    },
    /// Open the desktop client
    Ui,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from("config.toml"),
        (None, false) => AppConfig::default_path(),
    };

    let (mut config, config_found) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, true),
        ConfigLoadResult::Missing => (AppConfig::default(), false),
        ConfigLoadResult::Invalid(e) => bail!("Invalid config {}: {}", config_path.display(), e),
    };
    config.apply_env();
    config.validate().context("Invalid configuration after environment overrides")?;

    let _log_guard = logging::init_logging(&config.logging);

    tracing::info!("Employee Records starting...");
    if config_found {
        tracing::info!("Config loaded from {:?}", config_path);
    } else {
        tracing::info!("No config at {:?}, using defaults", config_path);
    }

    match cli.command {
        Command::Serve { memory } => run_server(config, memory),
        Command::Ui => run_ui(config),
    }
}

/// Run the HTTP API until Ctrl+C.
fn run_server(config: AppConfig, force_memory: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    rt.block_on(async {
        let store: Arc<dyn EmployeeStore> = if force_memory || config.database.backend == StoreBackend::Memory {
            tracing::info!("Using in-memory store");
            Arc::new(MemoryStore::new(config.database.collection.clone()))
        } else {
            let store = db::open_store(&config.database)
                .await
                .context("Failed to open database")?;
            Arc::new(store)
        };

        api::serve(&config.server.bind_addr(), EmployeeService::new(store)).await?;
        Ok::<_, anyhow::Error>(())
    })
}

/// Run the desktop client.
fn run_ui(config: AppConfig) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let app = ui::App::new(&config, rt)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Employee Records")
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([800.0, 550.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Employee Records",
        options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
