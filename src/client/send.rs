//! Outbound message types.

use crate::media::UploadResult;
use crate::types::{Jid, MessageId};
use std::time::SystemTime;

/// Response from sending a message.
#[derive(Clone, Debug)]
pub struct SendResponse {
    pub timestamp: SystemTime,
    pub id: MessageId,
    pub sender: Option<Jid>,
}

/// A fully populated reference to uploaded media. Every field is required, so a
/// message can only carry media that the media server accepted completely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaReference {
    pub url: String,
    pub direct_path: String,
    pub mimetype: String,
    pub file_length: u64,
    pub file_sha256: Vec<u8>,
    pub file_enc_sha256: Vec<u8>,
    pub media_key: Vec<u8>,
}

impl MediaReference {
    /// Build from an upload result. Errors with the name of the first missing field.
    pub fn new(upload: UploadResult, mimetype: &str) -> Result<Self, &'static str> {
        let missing = [
            ("url", upload.url.is_empty()),
            ("direct_path", upload.direct_path.is_empty()),
            ("media_key", upload.media_key.is_empty()),
            ("file_sha256", upload.file_sha256.is_empty()),
            ("file_enc_sha256", upload.file_enc_sha256.is_empty()),
        ];
        if let Some((field, _)) = missing.iter().find(|(_, empty)| *empty) {
            return Err(field);
        }
        Ok(Self {
            url: upload.url,
            direct_path: upload.direct_path,
            mimetype: mimetype.to_string(),
            file_length: upload.file_length,
            file_sha256: upload.file_sha256,
            file_enc_sha256: upload.file_enc_sha256,
            media_key: upload.media_key,
        })
    }
}

/// One message to one recipient: a caption plus optional media.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: Jid,
    pub caption: String,
    pub media: Option<MediaReference>,
}

impl OutboundMessage {
    pub fn text(to: Jid, caption: impl Into<String>) -> Self {
        Self {
            to,
            caption: caption.into(),
            media: None,
        }
    }

    pub fn image(to: Jid, caption: impl Into<String>, media: MediaReference) -> Self {
        Self {
            to,
            caption: caption.into(),
            media: Some(media),
        }
    }

    /// Text messages are plain conversations; media carries the caption inside
    /// the image message.
    #[cfg(feature = "full")]
    pub fn to_proto(&self) -> waproto::whatsapp::Message {
        use waproto::whatsapp::{message::ImageMessage, Message};

        match &self.media {
            None => Message {
                conversation: Some(self.caption.clone()),
                ..Default::default()
            },
            Some(media) => Message {
                image_message: Some(Box::new(ImageMessage {
                    url: Some(media.url.clone()),
                    direct_path: Some(media.direct_path.clone()),
                    mimetype: Some(media.mimetype.clone()),
                    caption: Some(self.caption.clone()),
                    file_length: Some(media.file_length),
                    file_sha256: Some(media.file_sha256.clone()),
                    file_enc_sha256: Some(media.file_enc_sha256.clone()),
                    media_key: Some(media.media_key.clone()),
                    ..Default::default()
                })),
                ..Default::default()
            },
        }
    }
}
