//! Tutoring backend HTTP adapter.
//!
//! One reqwest client implements every backend gateway port.

mod client;
mod dto;
mod error_mapping;

pub use client::{HttpApiClient, HttpApiClientError};
