//! Host message protocol.
//!
//! Line-delimited JSON messages exchanged with the host over stdin/stdout.
//! The host pushes new source units; the surface reports rendered output or
//! a transformation error back.

use serde::{Deserialize, Serialize};

/// Messages received from the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostMessage {
    /// A new source unit supersedes whatever is currently rendered.
    UpdateComponent { code: String },
}

/// Messages sent to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceMessage {
    /// Emitted once on startup, when the surface is ready for updates.
    InitComplete,
    RenderComplete { html: String, logs: Vec<String> },
    RenderError { message: String },
}
