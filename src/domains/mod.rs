//! Domains module containing the server's business logic.
//!
//! The only domain is `tools`: NASA APOD and Image Library lookups exposed
//! as MCP tools.

pub mod tools;
