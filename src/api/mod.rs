//! HTTP API module for the settlement engine.
//!
//! This module provides the REST endpoints for computing single and batch
//! settlements.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AdjustmentsRequest, BatchRequest, EmployeeRequest, LenientNumber, SettlementRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
