//! API layer - HTTP endpoints driving the number services

pub mod health;
pub mod numbers;
pub mod router;
pub mod state;
pub mod types;

pub use numbers::NumberRoute;
pub use router::create_router;
pub use state::AppState;
