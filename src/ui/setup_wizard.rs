//! First-run wizard that collects a working server configuration before the
//! main window is allowed to start.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use eframe::egui::{self, Color32, RichText};

use crate::api::ApiClient;
use crate::config::AppConfig;

/// Wizard state: the step being shown and the config under construction.
pub struct SetupWizard {
    pub step: usize,
    pub config: AppConfig,
    /// Outcome of the last reachability probe, `None` until one finished.
    pub probe_result: Option<Result<(), String>>,
    pub probe_running: bool,
    pub completed: bool,
    timeout_input: String,
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupWizard {
    const LAST_STEP: usize = 2;

    pub fn new() -> Self {
        let config = AppConfig::default();
        Self {
            step: 0,
            probe_result: None,
            probe_running: false,
            completed: false,
            timeout_input: config.server.timeout_secs.to_string(),
            config,
        }
    }

    /// The server step blocks until a probe has succeeded.
    fn can_continue(&self) -> bool {
        match self.step {
            1 => matches!(self.probe_result, Some(Ok(()))),
            _ => true,
        }
    }

    fn title(&self) -> &'static str {
        match self.step {
            0 => "Welcome",
            1 => "Server Connection",
            _ => "Review",
        }
    }
}

/// Standalone eframe app hosting the wizard; the main window is never built
/// until a valid config exists on disk.
pub struct SetupApp {
    wizard: SetupWizard,
    error: Option<String>,
    config_path: PathBuf,
    rt: tokio::runtime::Runtime,
    probe_rx: Option<mpsc::Receiver<Result<(), String>>>,
}

impl SetupApp {
    pub fn new(wizard: SetupWizard, initial_error: Option<String>, config_path: PathBuf) -> Self {
        Self {
            wizard,
            error: initial_error,
            config_path,
            rt: tokio::runtime::Runtime::new().expect("Failed to create tokio runtime"),
            probe_rx: None,
        }
    }

    fn launch_probe(&mut self) {
        let base_url = self.wizard.config.server.base_url.clone();
        let (tx, rx) = mpsc::channel();
        self.probe_rx = Some(rx);
        self.wizard.probe_running = true;
        self.wizard.probe_result = None;

        self.rt.spawn(async move {
            let _ = tx.send(probe_server(&base_url).await);
        });
    }

    fn poll_probe(&mut self) {
        if let Some(rx) = &self.probe_rx
            && let Ok(result) = rx.try_recv()
        {
            self.wizard.probe_running = false;
            self.wizard.probe_result = Some(result);
            self.probe_rx = None;
        }
    }

    fn finish(&mut self, ctx: &egui::Context) {
        match self.wizard.config.save(&self.config_path) {
            Ok(()) => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Err(e) => {
                self.error = Some(format!("Could not save the configuration: {e}"));
                self.wizard.completed = false;
            }
        }
    }
}

impl eframe::App for SetupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_probe();
        if self.wizard.probe_running {
            ctx.request_repaint();
        }

        if let Some(message) = self.error.clone() {
            egui::Window::new("Configuration Problem")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(Color32::from_rgb(255, 100, 100), &message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error = None;
                    }
                });
            return;
        }

        let mut probe_requested = false;
        let mut finish_requested = false;

        egui::TopBottomPanel::bottom("wizard_nav").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if self.wizard.step > 0 && ui.button("Back").clicked() {
                    self.wizard.step -= 1;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.wizard.step == SetupWizard::LAST_STEP {
                        if ui.button("Finish").clicked() {
                            finish_requested = true;
                        }
                    } else {
                        let enabled = self.wizard.can_continue();
                        if ui
                            .add_enabled(enabled, egui::Button::new("Continue"))
                            .clicked()
                        {
                            self.wizard.step += 1;
                        }
                    }
                });
            });
            ui.add_space(8.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(12.0);
            ui.heading(RichText::new("HR Desk Setup").size(24.0).strong());
            ui.label(
                RichText::new(format!(
                    "{} ({} of {})",
                    self.wizard.title(),
                    self.wizard.step + 1,
                    SetupWizard::LAST_STEP + 1
                ))
                .weak(),
            );
            ui.separator();
            ui.add_space(12.0);

            match self.wizard.step {
                0 => welcome_step(ui),
                1 => probe_requested = server_step(ui, &mut self.wizard),
                _ => review_step(ui, &self.wizard),
            }
        });

        if probe_requested {
            self.launch_probe();
        }
        if finish_requested {
            self.wizard.completed = true;
        }
        if self.wizard.completed {
            self.finish(ctx);
        }
    }
}

fn welcome_step(ui: &mut egui::Ui) {
    ui.label("This wizard connects HR Desk to your HR server.");
    ui.add_space(8.0);
    ui.label("Have the server's base URL ready, for example:");
    ui.monospace("    http://hr.internal.example:8000/api");
    ui.add_space(8.0);
    ui.label("Everything else can be changed later from the Settings panel.");
}

fn server_step(ui: &mut egui::Ui, wizard: &mut SetupWizard) -> bool {
    let mut probe_requested = false;

    egui::Grid::new("wizard_server_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            ui.label("Server URL:");
            let url = ui.add(
                egui::TextEdit::singleline(&mut wizard.config.server.base_url)
                    .desired_width(280.0)
                    .hint_text("http://localhost:8000/api"),
            );
            if url.changed() {
                // A new URL needs a new probe.
                wizard.probe_result = None;
            }
            ui.end_row();

            ui.label("Timeout (seconds):");
            if ui.text_edit_singleline(&mut wizard.timeout_input).changed()
                && let Ok(secs) = wizard.timeout_input.parse()
            {
                wizard.config.server.timeout_secs = secs;
            }
            ui.end_row();
        });

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!wizard.probe_running, egui::Button::new("Test Connection"))
            .clicked()
        {
            probe_requested = true;
        }
        ui.add_space(10.0);
        if wizard.probe_running {
            ui.spinner();
            ui.label("Contacting the server...");
        } else {
            match &wizard.probe_result {
                None => {
                    ui.weak("Not tested yet");
                }
                Some(Ok(())) => {
                    ui.colored_label(Color32::from_rgb(100, 200, 100), "Server is reachable");
                }
                Some(Err(e)) => {
                    ui.colored_label(Color32::from_rgb(255, 100, 100), format!("Failed: {e}"));
                }
            }
        }
    });

    ui.add_space(10.0);
    ui.label(RichText::new("A successful test is required before continuing.").italics());

    probe_requested
}

fn review_step(ui: &mut egui::Ui, wizard: &SetupWizard) {
    ui.label("About to save:");
    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.strong("Server");
        ui.label(format!("  URL: {}", wizard.config.server.base_url));
        ui.label(format!("  Timeout: {} s", wizard.config.server.timeout_secs));
    });

    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.strong("Interface");
        ui.label(format!(
            "  Start maximized: {}",
            if wizard.config.ui.start_maximized {
                "yes"
            } else {
                "no"
            }
        ));
        ui.label(format!(
            "  Rows per page: {}",
            wizard.config.ui.rows_per_page_hint
        ));
    });

    ui.add_space(16.0);
    ui.label("Finish writes the configuration and closes this window.");
    ui.label("Start HR Desk again to open the dashboard.");
}

/// Ping the health endpoint with a short fixed timeout, independent of the
/// configured request timeout.
async fn probe_server(base_url: &str) -> Result<(), String> {
    if base_url.trim().is_empty() {
        return Err("The server URL is empty".to_string());
    }

    let client = ApiClient::new(base_url, Duration::from_secs(5));
    match client.ping().await {
        Ok(true) => Ok(()),
        Ok(false) => Err("The server answered with an error status".to_string()),
        Err(e) => Err(e.to_string()),
    }
}
