//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the three-screen client flow:
//! - Login and registration forms
//! - Clinical intake form (authenticated)
//! - Risk assessment progress and result view

mod app;
mod styles;
mod ui;
mod worker;

pub use app::{App, Screen};
pub use styles::HeartTheme;
pub use worker::{AssessmentProgress, AuthProgress, WorkerHandle};
