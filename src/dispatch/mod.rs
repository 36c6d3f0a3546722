//! One-shot media dispatch: validate, bootstrap the session, upload, send.
//!
//! The pipeline is strictly sequential. An upload failure is the only
//! recoverable step: it triggers a single text-only send to the same recipient.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::client::{MediaReference, MessagingClient, OutboundMessage, SendResponse};
use crate::error::{DispatchError, Error, UploadError};
use crate::media::{MediaAsset, MediaType};
use crate::store::{Device, DeviceStore, DEFAULT_DB_NAME};
use crate::types::Jid;

/// Prefix that makes the message argument a path to the caption.
pub const CAPTION_FILE_PREFIX: &str = "file:";

/// Wait between connect and the liveness check.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(2);

const NO_DEVICE: &str =
    "No WhatsApp account is connected. Please run the bridge and scan the QR code first.";

/// What to send and to whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    /// Phone number (`+`, spaces and dashes allowed) or full JID.
    pub phone: String,
    /// Caption text, or `file:<path>`.
    pub message: String,
    pub image_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    pub store_dir: PathBuf,
    pub db_name: String,
    pub settle: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("store"),
            db_name: DEFAULT_DB_NAME.to_string(),
            settle: DEFAULT_SETTLE,
        }
    }
}

/// How the message went out.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Caption and image delivered.
    Delivered(SendResponse),
    /// Image upload failed; the caption went out alone.
    TextOnly {
        response: SendResponse,
        upload_error: Error,
    },
}

impl DispatchOutcome {
    pub fn response(&self) -> &SendResponse {
        match self {
            Self::Delivered(response) | Self::TextOnly { response, .. } => response,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::TextOnly { .. })
    }
}

/// Process exit status for a dispatch result: 0 when anything was delivered,
/// caption-only included, 1 otherwise.
pub fn exit_status(result: &Result<DispatchOutcome, DispatchError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Operator-facing lines describing a dispatch result.
pub fn outcome_lines(result: &Result<DispatchOutcome, DispatchError>) -> Vec<String> {
    match result {
        Ok(DispatchOutcome::Delivered(response)) => {
            vec![format!("Image message sent successfully! (id {})", response.id)]
        }
        Ok(DispatchOutcome::TextOnly {
            response,
            upload_error,
        }) => vec![
            format!("Failed to upload image: {upload_error}"),
            format!("Sent text-only message (image upload failed) (id {})", response.id),
        ],
        Err(e) => vec![format!("Error: {e}")],
    }
}

/// Opens the session store and binds clients to stored devices.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    type Client: MessagingClient;
    type Store: DeviceStore;

    async fn open_store(&self, settings: &DispatchSettings) -> crate::Result<Self::Store>;

    fn bind(&self, store: &Self::Store, device: Device) -> Self::Client;
}

/// The client's SQLite session database plus a [`crate::client::Client`] on it.
#[cfg(feature = "full")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteSessions;

#[cfg(feature = "full")]
#[async_trait]
impl SessionProvider for SqliteSessions {
    type Client = crate::client::Client;
    type Store = crate::store::SqliteStore;

    async fn open_store(&self, settings: &DispatchSettings) -> crate::Result<Self::Store> {
        crate::store::SqliteStore::open(&settings.store_dir, &settings.db_name).await
    }

    fn bind(&self, store: &Self::Store, device: Device) -> Self::Client {
        crate::client::Client::new(store.backend(), device)
    }
}

pub struct MediaDispatcher<P> {
    provider: P,
    settings: DispatchSettings,
}

impl<P: SessionProvider> MediaDispatcher<P> {
    pub fn new(provider: P, settings: DispatchSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Run the whole pipeline. The client is disconnected on every path once
    /// it has been bound.
    pub async fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchOutcome, DispatchError> {
        let recipient = self.validate(request).await?;
        let client = self.bind_session().await?;

        let outcome = self.deliver(&client, &recipient, request).await;
        if let Err(e) = client.disconnect().await {
            tracing::warn!(error = %e, "disconnect failed");
        }
        outcome
    }

    async fn validate(&self, request: &DispatchRequest) -> Result<Jid, DispatchError> {
        let image_is_file = tokio::fs::metadata(&request.image_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !image_is_file {
            return Err(DispatchError::validation(format!(
                "Image file not found at {}",
                request.image_path.display()
            )));
        }
        if let Err(e) = tokio::fs::File::open(&request.image_path).await {
            return Err(DispatchError::validation(format!(
                "Image file is not readable at {}: {e}",
                request.image_path.display()
            )));
        }

        let store_is_dir = tokio::fs::metadata(&self.settings.store_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !store_is_dir {
            return Err(DispatchError::validation(format!(
                "Database directory not found at {}. Make sure the WhatsApp bridge has been run first",
                self.settings.store_dir.display()
            )));
        }

        Jid::from_phone(&request.phone).map_err(|e| {
            DispatchError::validation(format!("Invalid recipient {:?}: {e}", request.phone))
        })
    }

    async fn bind_session(&self) -> Result<P::Client, DispatchError> {
        let store = self
            .provider
            .open_store(&self.settings)
            .await
            .map_err(|e| DispatchError::Session(format!("Failed to open session store: {e}")))?;
        let device = store
            .get_first_device()
            .await
            .map_err(|e| DispatchError::Session(format!("Failed to get device: {e}")))?
            .filter(Device::is_logged_in)
            .ok_or_else(|| DispatchError::Session(NO_DEVICE.to_string()))?;
        tracing::info!(jid = ?device.id.as_ref().map(ToString::to_string), "session loaded");
        Ok(self.provider.bind(&store, device))
    }

    async fn deliver(
        &self,
        client: &P::Client,
        recipient: &Jid,
        request: &DispatchRequest,
    ) -> Result<DispatchOutcome, DispatchError> {
        client
            .connect()
            .await
            .map_err(|e| DispatchError::connectivity("Failed to connect to WhatsApp", e))?;
        tokio::time::sleep(self.settings.settle).await;
        if !client.is_connected() {
            return Err(DispatchError::connectivity(
                "Failed to establish WhatsApp connection",
                Error::NotConnected,
            ));
        }

        let caption = resolve_caption(&request.message).await?;

        let asset = MediaAsset::read(&request.image_path)
            .await
            .map_err(|e| DispatchError::validation(format!("Failed to read image file: {e}")))?;
        tracing::info!(
            path = %asset.path.display(),
            mimetype = asset.mimetype,
            bytes = asset.len(),
            "image loaded"
        );
        if let Some(advisory) = asset.size_advisory() {
            tracing::warn!(bytes = asset.len(), "{advisory}");
        }

        let media = match upload(client, asset).await {
            Ok(media) => media,
            Err(upload_error) => {
                tracing::warn!(error = %upload_error, "image upload failed, sending text only");
                return match client
                    .send_message(&OutboundMessage::text(recipient.clone(), caption))
                    .await
                {
                    Ok(response) => Ok(DispatchOutcome::TextOnly {
                        response,
                        upload_error,
                    }),
                    Err(send) => Err(DispatchError::FallbackFailed {
                        upload: upload_error,
                        send,
                    }),
                };
            }
        };

        let response = client
            .send_message(&OutboundMessage::image(recipient.clone(), caption, media))
            .await
            .map_err(DispatchError::Send)?;
        tracing::info!(id = %response.id, to = %recipient, "image message sent");
        Ok(DispatchOutcome::Delivered(response))
    }
}

async fn upload<C: MessagingClient>(client: &C, asset: MediaAsset) -> crate::Result<MediaReference> {
    let MediaAsset { data, mimetype, .. } = asset;
    let result = client.upload(data, MediaType::Image).await?;
    MediaReference::new(result, mimetype).map_err(|field| UploadError::Incomplete(field).into())
}

/// Expand `file:<path>` into the file's contents; anything else is the caption.
/// Invalid UTF-8 in the file is replaced, not rejected.
pub async fn resolve_caption(message: &str) -> Result<String, DispatchError> {
    let Some(path) = message.strip_prefix(CAPTION_FILE_PREFIX) else {
        return Ok(message.to_string());
    };
    let bytes = tokio::fs::read(Path::new(path))
        .await
        .map_err(|e| DispatchError::validation(format!("Error reading message file: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::UploadResult;
    use crate::error::{ConnectionError, SendError};
    use crate::media::ADVISORY_MAX_BYTES;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::SystemTime;

    #[derive(Default, Clone)]
    struct Script {
        fail_connect: bool,
        dead_after_connect: bool,
        /// `None` makes uploads fail.
        upload: Option<UploadResult>,
        fail_send: bool,
    }

    #[derive(Default)]
    struct Recorded {
        connects: usize,
        disconnects: usize,
        uploads: Vec<usize>,
        sent: Vec<OutboundMessage>,
    }

    struct MockClient {
        script: Script,
        log: Arc<Mutex<Recorded>>,
        alive: AtomicBool,
    }

    #[async_trait]
    impl MessagingClient for MockClient {
        async fn connect(&self) -> crate::Result<()> {
            self.log.lock().unwrap().connects += 1;
            if self.script.fail_connect {
                return Err(ConnectionError::Run("refused".into()).into());
            }
            self.alive.store(!self.script.dead_after_connect, Ordering::SeqCst);
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.alive.load(Ordering::SeqCst)
        }

        async fn disconnect(&self) -> crate::Result<()> {
            self.log.lock().unwrap().disconnects += 1;
            self.alive.store(false, Ordering::SeqCst);
            Ok(())
        }

        async fn upload(&self, data: Vec<u8>, _kind: MediaType) -> crate::Result<UploadResult> {
            self.log.lock().unwrap().uploads.push(data.len());
            self.script
                .upload
                .clone()
                .ok_or_else(|| UploadError::Rejected("503 Service Unavailable".into()).into())
        }

        async fn send_message(&self, message: &OutboundMessage) -> crate::Result<SendResponse> {
            if self.script.fail_send {
                return Err(SendError::Rejected("server returned error 479".into()).into());
            }
            self.log.lock().unwrap().sent.push(message.clone());
            Ok(SendResponse {
                timestamp: SystemTime::now(),
                id: "3EB0TEST".into(),
                sender: None,
            })
        }
    }

    struct FakeSessions {
        device: Option<Device>,
        script: Script,
        log: Arc<Mutex<Recorded>>,
        opens: AtomicUsize,
    }

    #[async_trait]
    impl SessionProvider for FakeSessions {
        type Client = MockClient;
        type Store = MemoryStore;

        async fn open_store(&self, _settings: &DispatchSettings) -> crate::Result<MemoryStore> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            Ok(match &self.device {
                Some(d) => MemoryStore::with_device(d.clone()),
                None => MemoryStore::new(),
            })
        }

        fn bind(&self, _store: &MemoryStore, _device: Device) -> MockClient {
            MockClient {
                script: self.script.clone(),
                log: Arc::clone(&self.log),
                alive: AtomicBool::new(false),
            }
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        dispatcher: MediaDispatcher<FakeSessions>,
        log: Arc<Mutex<Recorded>>,
        request: DispatchRequest,
    }

    fn paired() -> Device {
        Device {
            id: Some(Jid::new("15550001111", "s.whatsapp.net")),
            ..Default::default()
        }
    }

    fn complete_upload() -> UploadResult {
        UploadResult {
            url: "https://mmg.whatsapp.net/v/t62/abc".into(),
            direct_path: "/v/t62/abc".into(),
            media_key: vec![7; 32],
            file_sha256: vec![8; 32],
            file_enc_sha256: vec![9; 32],
            file_length: 4,
        }
    }

    fn fixture(device: Option<Device>, script: Script) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join("store");
        std::fs::create_dir(&store_dir).unwrap();
        let image_path = dir.path().join("photo.PNG");
        std::fs::write(&image_path, b"\x89PNG").unwrap();

        let log = Arc::new(Mutex::new(Recorded::default()));
        let provider = FakeSessions {
            device,
            script,
            log: Arc::clone(&log),
            opens: AtomicUsize::new(0),
        };
        let settings = DispatchSettings {
            store_dir,
            settle: Duration::ZERO,
            ..Default::default()
        };
        Fixture {
            _dir: dir,
            dispatcher: MediaDispatcher::new(provider, settings),
            log,
            request: DispatchRequest {
                phone: "+1 555-010-9999".into(),
                message: "hello there".into(),
                image_path,
            },
        }
    }

    #[test]
    fn default_settings() {
        let s = DispatchSettings::default();
        assert_eq!(s.store_dir, PathBuf::from("store"));
        assert_eq!(s.db_name, "whatsapp.db");
        assert_eq!(s.settle, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn missing_image_fails_before_store() {
        let mut f = fixture(Some(paired()), Script::default());
        f.request.image_path = f.request.image_path.with_file_name("nope.jpg");
        let err = f.dispatcher.dispatch(&f.request).await.unwrap_err();
        assert!(matches!(err, DispatchError::Validation(ref m) if m.starts_with("Image file not found")));
        assert_eq!(f.dispatcher.provider.opens.load(Ordering::SeqCst), 0);
        assert_eq!(f.log.lock().unwrap().connects, 0);
    }

    #[tokio::test]
    async fn directory_as_image_is_rejected() {
        let mut f = fixture(Some(paired()), Script::default());
        f.request.image_path = f.dispatcher.settings().store_dir.clone();
        let err = f.dispatcher.dispatch(&f.request).await.unwrap_err();
        assert!(matches!(err, DispatchError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_store_dir_is_validation_error() {
        let mut f = fixture(Some(paired()), Script::default());
        f.dispatcher.settings.store_dir = PathBuf::from("/nonexistent/wa-store");
        let err = f.dispatcher.dispatch(&f.request).await.unwrap_err();
        assert!(matches!(err, DispatchError::Validation(ref m) if m.contains("Database directory")));
        assert_eq!(f.dispatcher.provider.opens.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn bad_recipient_is_validation_error() {
        let mut f = fixture(Some(paired()), Script::default());
        f.request.phone = "call me".into();
        let err = f.dispatcher.dispatch(&f.request).await.unwrap_err();
        assert!(matches!(err, DispatchError::Validation(_)));
        assert_eq!(f.dispatcher.provider.opens.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_device_is_session_error() {
        let f = fixture(None, Script::default());
        let err = f.dispatcher.dispatch(&f.request).await.unwrap_err();
        assert!(matches!(err, DispatchError::Session(ref m) if m == NO_DEVICE));
        assert_eq!(f.log.lock().unwrap().connects, 0);
    }

    #[tokio::test]
    async fn unpaired_device_is_session_error() {
        let f = fixture(Some(Device::default()), Script::default());
        let err = f.dispatcher.dispatch(&f.request).await.unwrap_err();
        assert!(matches!(err, DispatchError::Session(_)));
    }

    #[tokio::test]
    async fn connect_failure_is_connectivity_error_and_disconnects() {
        let script = Script {
            fail_connect: true,
            ..Default::default()
        };
        let f = fixture(Some(paired()), script);
        let err = f.dispatcher.dispatch(&f.request).await.unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Connectivity { message: "Failed to connect to WhatsApp", .. }
        ));
        assert_eq!(f.log.lock().unwrap().disconnects, 1);
    }

    #[tokio::test]
    async fn dead_connection_after_settle_is_connectivity_error() {
        let script = Script {
            dead_after_connect: true,
            upload: Some(complete_upload()),
            ..Default::default()
        };
        let f = fixture(Some(paired()), script);
        let err = f.dispatcher.dispatch(&f.request).await.unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Connectivity { message: "Failed to establish WhatsApp connection", .. }
        ));
        let log = f.log.lock().unwrap();
        assert!(log.uploads.is_empty());
        assert!(log.sent.is_empty());
    }

    #[tokio::test]
    async fn successful_upload_sends_fully_populated_media() {
        let script = Script {
            upload: Some(complete_upload()),
            ..Default::default()
        };
        let f = fixture(Some(paired()), script);
        let outcome = f.dispatcher.dispatch(&f.request).await.unwrap();
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.response().id, "3EB0TEST");

        let log = f.log.lock().unwrap();
        assert_eq!(log.uploads, vec![4]);
        assert_eq!(log.sent.len(), 1);
        let msg = &log.sent[0];
        assert_eq!(msg.to.to_string(), "15550109999@s.whatsapp.net");
        assert_eq!(msg.caption, "hello there");
        let media = msg.media.as_ref().unwrap();
        assert_eq!(media.url, "https://mmg.whatsapp.net/v/t62/abc");
        assert_eq!(media.direct_path, "/v/t62/abc");
        assert_eq!(media.mimetype, "image/png");
        assert_eq!(media.file_length, 4);
        assert_eq!(media.media_key, vec![7; 32]);
        assert_eq!(media.file_sha256, vec![8; 32]);
        assert_eq!(media.file_enc_sha256, vec![9; 32]);
        assert_eq!(log.disconnects, 1);
    }

    #[tokio::test]
    async fn upload_failure_falls_back_to_text() {
        let f = fixture(Some(paired()), Script::default());
        let outcome = f.dispatcher.dispatch(&f.request).await.unwrap();
        let DispatchOutcome::TextOnly { upload_error, .. } = &outcome else {
            panic!("expected degraded delivery, got {outcome:?}");
        };
        assert!(matches!(upload_error, Error::Upload(UploadError::Rejected(_))));

        let log = f.log.lock().unwrap();
        assert_eq!(log.sent.len(), 1);
        assert_eq!(log.sent[0].caption, "hello there");
        assert!(log.sent[0].media.is_none());
        assert_eq!(log.disconnects, 1);
    }

    #[tokio::test]
    async fn incomplete_upload_result_falls_back_to_text() {
        let script = Script {
            upload: Some(UploadResult {
                direct_path: String::new(),
                ..complete_upload()
            }),
            ..Default::default()
        };
        let f = fixture(Some(paired()), script);
        let outcome = f.dispatcher.dispatch(&f.request).await.unwrap();
        assert!(matches!(
            outcome,
            DispatchOutcome::TextOnly {
                upload_error: Error::Upload(UploadError::Incomplete("direct_path")),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn fallback_failure_reports_both_causes() {
        let script = Script {
            fail_send: true,
            ..Default::default()
        };
        let f = fixture(Some(paired()), script);
        let err = f.dispatcher.dispatch(&f.request).await.unwrap_err();
        let DispatchError::FallbackFailed { upload, send } = &err else {
            panic!("expected fallback failure, got {err:?}");
        };
        assert!(matches!(upload, Error::Upload(_)));
        assert!(matches!(send, Error::Send(SendError::Rejected(_))));
        assert_eq!(f.log.lock().unwrap().disconnects, 1);
    }

    #[tokio::test]
    async fn send_failure_after_upload_is_fatal_without_retry() {
        let script = Script {
            upload: Some(complete_upload()),
            fail_send: true,
            ..Default::default()
        };
        let f = fixture(Some(paired()), script);
        let err = f.dispatcher.dispatch(&f.request).await.unwrap_err();
        assert!(matches!(err, DispatchError::Send(_)));
        assert_eq!(f.log.lock().unwrap().uploads.len(), 1);
    }

    #[tokio::test]
    async fn caption_file_indirection() {
        let script = Script {
            upload: Some(complete_upload()),
            ..Default::default()
        };
        let mut f = fixture(Some(paired()), script);
        let caption_path = f._dir.path().join("caption.txt");
        std::fs::write(&caption_path, "line one\nline two").unwrap();
        f.request.message = format!("file:{}", caption_path.display());

        f.dispatcher.dispatch(&f.request).await.unwrap();
        assert_eq!(f.log.lock().unwrap().sent[0].caption, "line one\nline two");
    }

    #[tokio::test]
    async fn unreadable_caption_file_is_validation_error() {
        let f_err = resolve_caption("file:/nonexistent/caption.txt").await.unwrap_err();
        assert!(matches!(f_err, DispatchError::Validation(ref m) if m.starts_with("Error reading message file")));
        assert_eq!(resolve_caption("plain").await.unwrap(), "plain");
    }

    #[tokio::test]
    async fn caption_file_with_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caption.txt");
        std::fs::write(&path, b"caf\xe9 ok\n").unwrap();
        let caption = resolve_caption(&format!("file:{}", path.display())).await.unwrap();
        assert_eq!(caption, "caf\u{FFFD} ok\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_image_fails_validation() {
        use std::os::unix::fs::PermissionsExt;

        let f = fixture(Some(paired()), Script::default());
        std::fs::set_permissions(&f.request.image_path, std::fs::Permissions::from_mode(0o000))
            .unwrap();
        if std::fs::File::open(&f.request.image_path).is_ok() {
            // Privileged users read through the mode bits.
            return;
        }
        let err = f.dispatcher.dispatch(&f.request).await.unwrap_err();
        assert!(matches!(err, DispatchError::Validation(ref m) if m.starts_with("Image file is not readable")));
        assert_eq!(f.dispatcher.provider.opens.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oversized_image_is_still_uploaded() {
        let script = Script {
            upload: Some(complete_upload()),
            ..Default::default()
        };
        let f = fixture(Some(paired()), script);
        std::fs::write(&f.request.image_path, vec![0u8; ADVISORY_MAX_BYTES + 1]).unwrap();
        let outcome = f.dispatcher.dispatch(&f.request).await.unwrap();
        assert!(!outcome.is_degraded());
        assert_eq!(f.log.lock().unwrap().uploads, vec![ADVISORY_MAX_BYTES + 1]);
    }

    fn response() -> SendResponse {
        SendResponse {
            timestamp: SystemTime::now(),
            id: "3EB0ABC".into(),
            sender: None,
        }
    }

    #[test]
    fn delivered_and_text_only_exit_zero() {
        let delivered = Ok(DispatchOutcome::Delivered(response()));
        assert_eq!(exit_status(&delivered), 0);
        assert_eq!(
            outcome_lines(&delivered),
            vec!["Image message sent successfully! (id 3EB0ABC)".to_string()]
        );

        let text_only = Ok(DispatchOutcome::TextOnly {
            response: response(),
            upload_error: UploadError::Rejected("HTTP 503".into()).into(),
        });
        assert_eq!(exit_status(&text_only), 0);
        let lines = outcome_lines(&text_only);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Failed to upload image:"));
        assert!(lines[0].contains("HTTP 503"));
        assert_eq!(lines[1], "Sent text-only message (image upload failed) (id 3EB0ABC)");
    }

    #[test]
    fn every_dispatch_error_exits_one() {
        let errors = [
            DispatchError::validation("Image file not found at x.jpg"),
            DispatchError::Session(NO_DEVICE.into()),
            DispatchError::connectivity("Failed to connect to WhatsApp", Error::NotConnected),
            DispatchError::Send(Error::NotConnected),
            DispatchError::FallbackFailed {
                upload: UploadError::Incomplete("url").into(),
                send: Error::NotConnected,
            },
        ];
        for err in errors {
            let result = Err(err);
            assert_eq!(exit_status(&result), 1);
            let lines = outcome_lines(&result);
            assert_eq!(lines.len(), 1);
            assert!(lines[0].starts_with("Error: "));
        }
    }
}
