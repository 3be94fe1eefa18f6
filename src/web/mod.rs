pub mod api;
pub mod api_doc;
pub mod server;

pub use server::{build_router, run_server, AppState, ServeError};
