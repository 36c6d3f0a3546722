//! Messaging client.
//!
//! [`MessagingClient`] is the seam between the dispatcher and whatever actually
//! speaks to WhatsApp. With the `full` feature, [`Client`] implements it on top of
//! the `whatsapp-rust` bot, sharing the session database the store opened.

mod send;

use async_trait::async_trait;

use crate::media::{MediaType, UploadResult};

pub use send::{MediaReference, OutboundMessage, SendResponse};

#[cfg(feature = "full")]
pub use live::Client;

/// Operations the dispatcher needs from a messaging client.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Establish the connection for the bound device.
    async fn connect(&self) -> crate::Result<()>;

    /// Whether the connection is currently alive.
    fn is_connected(&self) -> bool;

    async fn disconnect(&self) -> crate::Result<()>;

    /// Encrypt and upload media, returning what a message needs to reference it.
    async fn upload(&self, data: Vec<u8>, kind: MediaType) -> crate::Result<UploadResult>;

    async fn send_message(&self, message: &OutboundMessage) -> crate::Result<SendResponse>;
}

#[cfg(feature = "full")]
mod live {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::SystemTime;

    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use tokio::task::JoinHandle;
    use wacore::types::events::Event;
    use whatsapp_rust::bot::Bot;
    use whatsapp_rust_sqlite_storage::SqliteStore as Backend;
    use whatsapp_rust_tokio_transport::TokioWebSocketTransportFactory;
    use whatsapp_rust_ureq_http_client::UreqHttpClient;

    use super::{MessagingClient, OutboundMessage, SendResponse};
    use crate::error::{ConnectionError, Error, SendError, UploadError};
    use crate::media::{MediaType, UploadResult};
    use crate::store::Device;

    struct Session {
        client: Arc<whatsapp_rust::client::Client>,
        handle: JoinHandle<()>,
    }

    /// Client bound to one linked device and its session database.
    pub struct Client {
        backend: Arc<Backend>,
        device: Device,
        alive: Arc<AtomicBool>,
        session: Mutex<Option<Session>>,
    }

    impl Client {
        /// Bind to `device`. Nothing is opened until [`MessagingClient::connect`].
        pub fn new(backend: Arc<Backend>, device: Device) -> Self {
            Self {
                backend,
                device,
                alive: Arc::new(AtomicBool::new(false)),
                session: Mutex::new(None),
            }
        }

        async fn live_client(&self) -> crate::Result<Arc<whatsapp_rust::client::Client>> {
            self.session
                .lock()
                .await
                .as_ref()
                .map(|s| Arc::clone(&s.client))
                .ok_or(Error::NotConnected)
        }
    }

    #[async_trait]
    impl MessagingClient for Client {
        async fn connect(&self) -> crate::Result<()> {
            if !self.device.is_logged_in() {
                return Err(Error::NotLoggedIn);
            }
            let mut session = self.session.lock().await;
            if session.is_some() {
                return Ok(());
            }

            let alive = Arc::clone(&self.alive);
            let mut bot = Bot::builder()
                .with_backend(Arc::clone(&self.backend))
                .with_transport_factory(TokioWebSocketTransportFactory::new())
                .with_http_client(UreqHttpClient::new())
                .on_event(move |event, _client| {
                    let alive = Arc::clone(&alive);
                    async move {
                        match event {
                            Event::Connected(_) => {
                                alive.store(true, Ordering::SeqCst);
                                tracing::debug!("session connected");
                            }
                            Event::Disconnected(_) => {
                                alive.store(false, Ordering::SeqCst);
                                tracing::debug!("session disconnected");
                            }
                            Event::LoggedOut(_) => {
                                alive.store(false, Ordering::SeqCst);
                                tracing::warn!("session logged out by the server");
                            }
                            Event::PairingQrCode { .. } => {
                                tracing::warn!("server asked for pairing; link the device first");
                            }
                            _ => {}
                        }
                    }
                })
                .build()
                .await
                .map_err(|e| ConnectionError::Setup(e.to_string()))?;

            let client = bot.client();
            let handle = bot
                .run()
                .await
                .map_err(|e| ConnectionError::Run(e.to_string()))?;
            *session = Some(Session { client, handle });
            tracing::info!(jid = ?self.device.id.as_ref().map(ToString::to_string), "client started");
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.alive.load(Ordering::SeqCst)
        }

        async fn disconnect(&self) -> crate::Result<()> {
            if let Some(session) = self.session.lock().await.take() {
                session.handle.abort();
            }
            self.alive.store(false, Ordering::SeqCst);
            Ok(())
        }

        async fn upload(&self, data: Vec<u8>, kind: MediaType) -> crate::Result<UploadResult> {
            let client = self.live_client().await?;
            let up = client
                .upload(data, kind.into())
                .await
                .map_err(|e| UploadError::Rejected(e.to_string()))?;
            Ok(UploadResult {
                url: up.url,
                direct_path: up.direct_path,
                media_key: up.media_key,
                file_sha256: up.file_sha256,
                file_enc_sha256: up.file_enc_sha256,
                file_length: up.file_length,
            })
        }

        async fn send_message(&self, message: &OutboundMessage) -> crate::Result<SendResponse> {
            let client = self.live_client().await?;
            let to = message
                .to
                .to_string()
                .parse::<wacore_binary::jid::Jid>()
                .map_err(|e| SendError::Recipient(format!("{}: {e}", message.to)))?;
            let id = client
                .send_message(to, message.to_proto())
                .await
                .map_err(|e| SendError::Rejected(e.to_string()))?;
            tracing::debug!(%id, to = %message.to, media = message.media.is_some(), "message sent");
            Ok(SendResponse {
                timestamp: SystemTime::now(),
                id,
                sender: self.device.id.clone(),
            })
        }
    }
}
