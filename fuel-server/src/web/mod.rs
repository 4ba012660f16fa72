//! Web layer for the fuel price service.
//!
//! A thin JSON-over-HTTP adapter: each route parses its input, calls one
//! [`StationService`](crate::service::StationService) operation and maps the
//! result onto a status code.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
