// AIBrowser shared type definitions
// Each submodule defines types used across the application.

pub mod bookmark;
pub mod download;
pub mod errors;
pub mod history;
pub mod settings;
pub mod surface;
pub mod tab;
pub mod ui;
