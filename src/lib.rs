//! # HeartCare
//!
//! Terminal client for AI-assisted cardiovascular risk assessment.
//!
//! This crate provides:
//! - A login/registration flow gating access to the clinical intake form
//! - Ten-field intake validation against a clinical range table
//! - Submission of validated vitals to an external `/predict` endpoint
//! - Risk classification rendering in a terminal UI
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (intake form, auth forms, prediction result)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (ureq HTTP client, stub auth)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, IntakeForm, PredictionRequest, PredictionResult, RiskLevel};
