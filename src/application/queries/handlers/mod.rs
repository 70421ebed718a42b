//! Query Handlers 实现

mod session_query_handlers;

pub use session_query_handlers::*;
