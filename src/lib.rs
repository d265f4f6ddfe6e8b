//! Volley Trainer · application core
//!
//! Client-side engine of a gamified volleyball training companion:
//! onboarding wizard, tactics quiz with rewards and unlocks, AI-coach
//! transcript, and video analysis/visualization jobs against an external
//! backend. The presentation layer (out of scope here) drives the
//! controllers and renders the view data they return; all I/O goes through
//! [`client::RequestClient`] and resolves to explicit results.

pub mod telemetry;
pub mod error;
pub mod config;
pub mod domain;
pub mod catalog;
pub mod protocol;
pub mod storage;
pub mod state;
pub mod client;
pub mod onboarding;
pub mod quiz;
pub mod coach;
pub mod video;
pub mod app;
