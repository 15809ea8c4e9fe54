//! Terminal UI layer for interactive chat sessions.
//!
//! [`chat_loop`] runs the interaction loop that dispatches user input to
//! [`crate::commands`] and hands submissions to [`crate::api`];
//! [`renderer`] composes frames; [`theme`] owns color/style policy.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns the conversation and submit protocol.

pub mod chat_loop;
pub mod renderer;
pub mod theme;
