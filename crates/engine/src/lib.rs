//! RepForge engine library.
//!
//! Server-side logic for the RepForge progression system.
//!
//! ## Structure
//!
//! - `use_cases/` - the four engines plus the daily tick orchestrator
//! - `infrastructure/` - ports and adapters (clock, random, persistence)
//! - `app` - application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::{App, AppError};
