//! HR Desk - Desktop administration console for employees, attendance,
//! leave, and payroll.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eframe::egui;
use hrdesk as app;

use app::api::ApiClient;
use app::config::{AppConfig, ConfigLoadResult};
use app::ui::{App, SetupApp, SetupWizard};

/// Desktop administration console for an HR management server.
#[derive(Parser)]
#[command(name = "hrdesk")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,
}

/// Application launch mode.
enum LaunchMode {
    /// Normal operation with valid config.
    Normal(AppConfig),
    /// Setup wizard for first run or invalid config.
    Setup(SetupWizard, Option<String>),
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // The guard flushes buffered file log lines, so it must outlive the app.
    let _log_guard = init_logging();

    tracing::info!("HR Desk starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let launch_mode = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            LaunchMode::Normal(config)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, starting setup wizard");
            LaunchMode::Setup(SetupWizard::new(), None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            LaunchMode::Setup(SetupWizard::new(), Some(e.to_string()))
        }
    };

    match launch_mode {
        LaunchMode::Normal(config) => run_main_app(config, config_path),
        LaunchMode::Setup(wizard, error) => run_setup_wizard(wizard, error, config_path),
    }
}

/// Set up tracing with an env-filtered stderr layer plus a daily-rolling
/// file under the platform data directory.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let log_dir = directories::ProjectDirs::from("", "", "hrdesk")
        .map(|dirs| dirs.data_dir().join("logs"));

    match log_dir {
        Some(dir) if std::fs::create_dir_all(&dir).is_ok() => {
            let file_appender = tracing_appender::rolling::daily(&dir, "hrdesk.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(non_blocking_file),
                )
                .init();
            Some(guard)
        }
        _ => {
            // No writable data directory, log to stderr only
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            None
        }
    }
}

/// Run the setup wizard.
fn run_setup_wizard(
    wizard: SetupWizard,
    initial_error: Option<String>,
    config_path: PathBuf,
) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HR Desk - Setup")
            .with_inner_size([600.0, 500.0])
            .with_min_inner_size([500.0, 400.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "HR Desk - Setup",
        options,
        Box::new(|_cc| Ok(Box::new(SetupApp::new(wizard, initial_error, config_path)))),
    )
}

/// Run the main application.
fn run_main_app(config: AppConfig, config_path: PathBuf) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HR Desk")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_maximized(config.ui.start_maximized),
        ..Default::default()
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    let api = ApiClient::new(
        &config.server.base_url,
        Duration::from_secs(config.server.timeout_secs),
    );

    // Probe the server so connectivity problems show up in the log early.
    // A failed probe is not fatal, the app opens and surfaces errors in the UI.
    rt.block_on(async {
        match api.ping().await {
            Ok(true) => tracing::info!("Server reachable: {}", config.server.base_url),
            Ok(false) => tracing::warn!(
                "Server answered with an error status: {}",
                config.server.base_url
            ),
            Err(e) => tracing::warn!("Server not reachable yet: {}", e),
        }
    });

    eframe::run_native(
        "HR Desk",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(App::new(rt, api, config, config_path)))
        }),
    )
}
