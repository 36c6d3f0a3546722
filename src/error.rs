use std::path::PathBuf;

use thiserror::Error;

/// Library result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the session store, the messaging client and the media layer.
#[derive(Error, Debug)]
pub enum Error {
    #[error("connection: {0}")]
    Connection(#[from] ConnectionError),

    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error("upload: {0}")]
    Upload(#[from] UploadError),

    #[error("send: {0}")]
    Send(#[from] SendError),

    #[error("not connected")]
    NotConnected,

    #[error("not logged in")]
    NotLoggedIn,
}

/// Connection-related errors.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("client setup: {0}")]
    Setup(String),

    #[error("run: {0}")]
    Run(String),
}

/// Session store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store not found at {0}")]
    NotFound(PathBuf),

    #[error("open failed: {0}")]
    Open(String),

    #[error("load failed: {0}")]
    Load(String),
}

/// Media upload errors. Recoverable by the dispatcher's text-only fallback.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("rejected by media server: {0}")]
    Rejected(String),

    #[error("incomplete upload result: missing {0}")]
    Incomplete(&'static str),
}

/// Send message errors.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("invalid recipient {0}")]
    Recipient(String),

    #[error("rejected: {0}")]
    Rejected(String),
}

/// Fatal outcomes of a media dispatch. Upload failures never appear here on their
/// own: they are absorbed by the text-only fallback and only surface through
/// [`DispatchError::FallbackFailed`].
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Session(String),

    #[error("{message}: {source}")]
    Connectivity {
        message: &'static str,
        #[source]
        source: Error,
    },

    #[error("failed to send message: {0}")]
    Send(#[source] Error),

    #[error("image upload failed ({upload}) and the text-only fallback failed too: {send}")]
    FallbackFailed { upload: Error, send: Error },
}

impl DispatchError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn connectivity(message: &'static str, source: impl Into<Error>) -> Self {
        Self::Connectivity {
            message,
            source: source.into(),
        }
    }
}

/// A fault inside the status reporter's classify-and-render path. Always
/// normalized into an `error` status record, never surfaced as a crash.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalFault {
    #[error("qr encode: {0}")]
    Encode(String),

    #[error("png encode: {0}")]
    Rasterize(String),

    #[error("invalid input: {0}")]
    Input(String),
}

impl InternalFault {
    /// Operator-facing message for the status record.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Encode(_) => "Failed to generate QR code",
            Self::Rasterize(_) => "Failed to create PNG image",
            Self::Input(_) => "Internal server error generating QR code",
        }
    }
}
