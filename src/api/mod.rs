//! HTTP API module for the Compa-Ratio Band Engine.
//!
//! This module provides the REST API endpoints for computing salary bands
//! and compa-ratios from roster rows.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ComputeRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
