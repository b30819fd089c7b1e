//! Pactdraft - terminal wizard for drafting contractor agreements.
//!
//! The reusable core is [`stepper`], a UI-agnostic multi-step state container
//! with async validate-and-merge transitions. Everything else is the contract
//! domain and the ratatui presentation built on top of it.

pub mod app;
pub mod config;
pub mod contract;
pub mod logging;
pub mod stepper;
pub mod ui;
