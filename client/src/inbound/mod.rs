//! Inbound adapters that turn user intents into domain calls.
//!
//! Page controllers live under [`pages`]; the command-line shell in [`cli`]
//! drives them in place of a browser.

pub mod cli;
pub mod pages;
