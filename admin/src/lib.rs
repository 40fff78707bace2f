//! Admin runtime for the hostel management platform.
//!
//! This crate is a client of the remote hostel backend API: it owns the
//! session store, the HTTP client wrapper, the booking reconciliation and
//! charge configuration services, the billing automation scheduler, the
//! notification center, and the reporting read views.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

pub use config::AppConfig;
pub use error::AppError;
