//! Cross-cutting HTTP middleware.
//!
//! This module provides:
//! - Request logging with latency tracking
//! - Panic capture rendered as a JSON 500
//! - JSON bodies for 405 responses

pub mod logging;
pub mod method_not_allowed;
pub mod panic;

pub use logging::request_logging;
pub use method_not_allowed::json_method_not_allowed;
pub use panic::handle_panic;
