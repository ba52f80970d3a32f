//! AIBrowser: tab/session core of a desktop web browser.
//!
//! Keeps an in-memory model of open tabs in sync with their content surfaces,
//! resolves address-bar input and reconciles surface lifecycle events into
//! browser chrome updates. Exposes all modules for the binaries and tests.

pub mod app;
pub mod config;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod runtime;
pub mod services;
pub mod store;
pub mod surface;
pub mod types;
pub mod ui;
