//! Charla is a full-screen terminal chat client for a single self-hosted
//! chat backend.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation state and submit protocol
//!   ([`core::conversation`]), session runtime state ([`core::app`]), and
//!   configuration loading ([`core::config`]).
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`commands`] implements slash-command parsing used by the chat loop.
//! - [`api`] defines the chat endpoint payloads and the HTTP client.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`), which
//! resolves configuration and dispatches into [`ui::chat_loop`].

pub mod api;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
