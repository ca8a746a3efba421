//! pliego-cli library
//!
//! This crate provides the core functionality for the `pliego-cli` binary.
//! Keep the crate root minimal: implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The library drives the two forms of a tender ("pliego") document generator without
//! tying them to any UI toolkit:
//!
//! - [`admin`] - Administrative form: conditional regions, request building, the
//!   weighting check and submission
//! - [`technical`] - Technical form: question rendering, the certifications follow-up,
//!   answer collection, document assembly and the form state machine
//! - [`api`] - HTTP client for the administrative and technical services
//! - [`handoff`] - Store the editor reads generated documents from
//! - [`form`] - Submitted form values
//! - [`cli`] - Command-line interface
//! - [`config`] - TOML configuration with defaults
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use pliego_cli::admin::{AdminForm, AdminFormController};
//! use pliego_cli::api::ApiClient;
//! use pliego_cli::config::ResolvedConfig;
//! use pliego_cli::errors::AppResult;
//! use pliego_cli::form::FormData;
//! use std::path::Path;
//!
//! # async fn example() -> AppResult<()> {
//! let config = ResolvedConfig::default();
//! let values = FormData::from_toml_file(Path::new("form.toml"))?;
//! let form = AdminForm::from_values(&values);
//!
//! let controller = AdminFormController::new(ApiClient::new(&config)?, config.handoff(None));
//! let outcome = controller.submit_form(&form).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod form;
pub mod handoff;
pub mod models;
pub mod technical;
pub mod ui;
pub mod utils;
