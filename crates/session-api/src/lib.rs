//! # Session API
//! 
//! HTTP surface: transport bindings, CORS middleware, handlers and router.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
pub mod transport;

pub use error::ApiError;
pub use middleware::CorsPolicy;
pub use routes::build_router;
pub use state::AppState;
pub use transport::TransportBinding;
