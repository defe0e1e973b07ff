//! Outbound adapters implementing domain ports.
//!
//! - **http**: reqwest-backed backend gateways
//! - **session_store**: file and in-memory session persistence
//!
//! Adapters translate between domain types and transport representations.
//! They contain no page logic.

pub mod http;
pub mod session_store;
