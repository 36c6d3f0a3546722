//! # whatsapp-bridge
//!
//! Local control plane for a single WhatsApp multidevice session.
//!
//! ## Features
//!
//! - Session status classification with QR pairing codes rendered as base64 PNG
//! - One-shot image dispatch with a text-only fallback when the upload fails
//! - Session store adapters (the client's SQLite database, in-memory)
//! - A `whatsapp-rust` messaging client behind [`MessagingClient`] (feature `full`)
//!
//! ## Example
//!
//! ```ignore
//! use whatsapp_bridge::dispatch::{DispatchRequest, DispatchSettings, MediaDispatcher, SqliteSessions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let dispatcher = MediaDispatcher::new(SqliteSessions, DispatchSettings::default());
//!     let outcome = dispatcher
//!         .dispatch(&DispatchRequest {
//!             phone: "+15550109999".into(),
//!             message: "hello".into(),
//!             image_path: "photo.jpg".into(),
//!         })
//!         .await?;
//!     println!("sent {}", outcome.response().id);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod media;
pub mod status;
pub mod store;
pub mod types;

#[cfg(feature = "full")]
pub use client::Client;
pub use client::{MessagingClient, OutboundMessage, SendResponse};
pub use dispatch::{DispatchOutcome, DispatchRequest, DispatchSettings, MediaDispatcher};
pub use error::{DispatchError, Error, InternalFault, Result};
pub use status::{ConnectionStatus, StatusRecord, StatusSignals};
pub use store::{Device, DeviceStore};
pub use types::{Jid, MessageId};
