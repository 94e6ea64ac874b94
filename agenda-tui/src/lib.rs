//! Agenda TUI library exports.

pub mod api_client;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod keys;
pub mod notifications;
pub mod picker;
pub mod request;
pub mod state;
pub mod telemetry;
pub mod theme;
pub mod views;
pub mod widgets;
