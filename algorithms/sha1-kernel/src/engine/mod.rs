//! Execution Engine
//!
//! Build-time backend selection.

pub mod dispatcher;

pub use dispatcher::get_active_backend_name;
