//! MCP (Model Context Protocol) module
//!
//! Client side of the Firebase MCP server: wire types, the RPC client and the
//! availability gate.

pub mod availability;
pub mod client;
pub mod types;
