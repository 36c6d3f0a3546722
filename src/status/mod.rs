//! Session status classification for the pairing UI.
//!
//! A supervisor polls the reporter with three signals and gets back exactly one
//! [`StatusRecord`]. Classification never fails from the caller's point of view:
//! rendering faults come back as [`ConnectionStatus::InternalError`].

mod render;

pub use render::{render_pairing_code, BARCODE_DIMENSION};

use serde::Serialize;

use crate::error::InternalFault;

/// Pairing-data sentinel: the bridge is waiting for a fresh QR payload.
pub const NEEDS_QR: &str = "NEEDS_QR";
/// Pairing-data sentinel: the bridge failed to reconnect.
pub const ERROR_RECONNECTING: &str = "ERROR_RECONNECTING";

/// Inputs describing the session, as observed by the supervisor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSignals {
    /// QR payload, one of the sentinels, or `None`.
    pub pairing_data: Option<String>,
    pub logged_in: bool,
    pub disconnected: bool,
}

impl StatusSignals {
    /// Build from raw values. An empty pairing string means "no pairing data" and
    /// a flag only counts when it is exactly `"true"`.
    pub fn from_raw(
        pairing_data: Option<&str>,
        logged_in: Option<&str>,
        disconnected: Option<&str>,
    ) -> Self {
        Self {
            pairing_data: pairing_data.filter(|s| !s.is_empty()).map(str::to_string),
            logged_in: logged_in == Some("true"),
            disconnected: disconnected == Some("true"),
        }
    }
}

/// Why the session counts as disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectCause {
    /// The supervisor reported the session as disconnected.
    Reported,
    /// Nothing is known: not logged in and no pairing data yet.
    NoPairingData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected(DisconnectCause),
    NeedsPairing,
    /// A QR code is ready; carries the base64 PNG.
    PairingReady(String),
    ReconnectError,
    InternalError(InternalFault),
}

/// Wire value of the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Connected,
    Disconnected,
    NeedsQr,
    Error,
    Qrcode,
}

/// The single JSON object the reporter prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRecord {
    pub success: bool,
    pub status: StatusKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qrcode: Option<String>,
}

impl StatusRecord {
    fn new(success: bool, status: StatusKind, message: &str) -> Self {
        Self {
            success,
            status,
            message: message.to_string(),
            qrcode: None,
        }
    }

    /// Serialize as one line of JSON (no trailing newline).
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!(error = %e, "status record serialization failed");
            r#"{"success":false,"status":"error","message":"Internal server error generating QR code"}"#
                .to_string()
        })
    }
}

impl From<ConnectionStatus> for StatusRecord {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::Connected => {
                Self::new(true, StatusKind::Connected, "WhatsApp is connected")
            }
            ConnectionStatus::Disconnected(DisconnectCause::Reported) => Self::new(
                false,
                StatusKind::Disconnected,
                "WhatsApp has been disconnected",
            ),
            ConnectionStatus::Disconnected(DisconnectCause::NoPairingData) => {
                Self::new(false, StatusKind::Disconnected, "No QR code available")
            }
            ConnectionStatus::NeedsPairing => {
                Self::new(false, StatusKind::NeedsQr, "Waiting for QR code...")
            }
            ConnectionStatus::ReconnectError => {
                Self::new(false, StatusKind::Error, "Error reconnecting to WhatsApp")
            }
            ConnectionStatus::PairingReady(qrcode) => Self {
                qrcode: Some(qrcode),
                ..Self::new(true, StatusKind::Qrcode, "Scan the QR code with WhatsApp")
            },
            ConnectionStatus::InternalError(fault) => {
                Self::new(false, StatusKind::Error, fault.public_message())
            }
        }
    }
}

/// Classify the signals, rendering the QR code when the pairing data is a payload.
pub fn classify(signals: &StatusSignals) -> Result<ConnectionStatus, InternalFault> {
    let Some(data) = signals.pairing_data.as_deref() else {
        return Ok(if signals.logged_in {
            ConnectionStatus::Connected
        } else if signals.disconnected {
            ConnectionStatus::Disconnected(DisconnectCause::Reported)
        } else {
            ConnectionStatus::Disconnected(DisconnectCause::NoPairingData)
        });
    };
    match data {
        NEEDS_QR => Ok(ConnectionStatus::NeedsPairing),
        ERROR_RECONNECTING => Ok(ConnectionStatus::ReconnectError),
        payload => render_pairing_code(payload).map(ConnectionStatus::PairingReady),
    }
}

/// Classify and fold any fault into [`ConnectionStatus::InternalError`].
pub fn report(signals: &StatusSignals) -> StatusRecord {
    let status = classify(signals).unwrap_or_else(|fault| {
        tracing::error!(%fault, "pairing code rendering failed");
        ConnectionStatus::InternalError(fault)
    });
    status.into()
}
