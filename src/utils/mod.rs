// URL handling utilities
pub mod query_string;

// JSON utilities
pub mod json_path;

// Geography
pub mod state_codes;

// Re-export all utilities for convenient access
pub use query_string::build_query_string;
pub use json_path::{str_at, value_at};
pub use state_codes::{is_state_code, state_code, STATE_CODES};
