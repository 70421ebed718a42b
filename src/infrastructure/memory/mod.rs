//! Memory Layer - In-Memory State Management
//!
//! 实现 SessionStore，会话状态只存在于内存中

mod session_store;

pub use session_store::InMemorySessionStore;
