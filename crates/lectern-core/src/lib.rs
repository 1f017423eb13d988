//! Core lectern library (API clients, session, catalog state, viewer).

pub mod api;
pub mod catalog;
pub mod config;
pub mod forms;
pub mod session;
pub mod viewer;
