//! Adapters implementing the session and sink ports.

pub mod bridge;
pub mod webhook;

pub use bridge::BridgeClient;
pub use webhook::WebhookSink;
