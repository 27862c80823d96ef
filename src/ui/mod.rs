//! GUI panels and application state.

pub mod app;
pub mod attendance_panel;
pub mod catalog_panel;
pub mod components;
pub mod dashboard;
pub mod employees_panel;
pub mod forms;
pub mod leave_panel;
pub mod payroll_panel;
pub mod reports_panel;
pub mod settings_panel;
pub mod setup_wizard;

pub use app::App;
pub use setup_wizard::{SetupApp, SetupWizard};
