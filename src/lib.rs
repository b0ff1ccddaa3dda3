//! Terminal client for a football match outcome prediction service.

pub mod predict_fetch;
pub mod provider;
pub mod state;
pub mod ui;
