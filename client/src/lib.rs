//! StudierBridge peer-tutoring client.
//!
//! Domain types and ports live in [`domain`], backend and storage adapters in
//! [`outbound`], and the page controllers plus the command-line shell in
//! [`inbound`].

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
