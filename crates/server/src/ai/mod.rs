//! Interpretation gateway: the boundary to the external NL interpreter

pub mod client;
pub mod interpret;

pub use client::{GatewayError, InterpreterClient};
