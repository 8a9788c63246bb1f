//! HTTP server module.
//!
//! Plain HTTP only, bound on every interface. The server has no shutdown path:
//! once listening it serves until the process is killed.

mod server;

pub use server::{serve, start_server, ServerError};
