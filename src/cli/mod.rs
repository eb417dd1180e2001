//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the application session.

pub mod data;
pub mod expense;
pub mod report;
pub mod settings;

pub use data::{handle_demo, handle_export_command, handle_import, DemoArgs, ExportCommands, ImportArgs};
pub use expense::{handle_add, handle_list, handle_status, AddArgs, ListArgs, StatusArgs};
pub use report::{handle_report, ReportArgs};
pub use settings::{handle_settings_command, SettingsCommands};
