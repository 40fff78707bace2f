//! Shared types for the Hostel Administration Platform
//!
//! Wire enums, request/response DTOs, and platform constants shared between
//! the admin runtime and any other consumer of the hostel backend API.

pub mod constants;
pub mod dto;
pub mod types;

pub use constants::*;
pub use dto::*;
pub use types::*;
