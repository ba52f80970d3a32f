//! AIBrowser UI projection layer.
//!
//! The browser chrome itself lives in the front-end process. This layer turns
//! registry changes and reconciler output into [`crate::types::ui::UiUpdate`]s
//! and hands them to a [`projection::Projection`] sink.

pub mod projection;

pub use projection::{project_changes, Projection, UiQueue};
