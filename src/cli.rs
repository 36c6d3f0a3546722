//! Command-line surfaces of the two binaries.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::dispatch::{DispatchRequest, DispatchSettings};
use crate::error::InternalFault;
use crate::status::{self, ConnectionStatus, StatusRecord, StatusSignals};
use crate::store::DEFAULT_DB_NAME;

#[derive(Parser, Debug)]
#[command(name = "wa-status", version, about = "Report WhatsApp session status as JSON")]
pub struct StatusArgs {
    /// QR payload, `NEEDS_QR` or `ERROR_RECONNECTING`
    #[arg(long, env = "WHATSAPP_QR_DATA")]
    pub qr_data: Option<String>,

    /// Set when exactly `true`
    #[arg(long, env = "WHATSAPP_LOGGED_IN")]
    pub logged_in: Option<String>,

    /// Set when exactly `true`
    #[arg(long, env = "WHATSAPP_DISCONNECTED")]
    pub disconnected: Option<String>,
}

impl StatusArgs {
    pub fn signals(&self) -> StatusSignals {
        StatusSignals::from_raw(
            self.qr_data.as_deref(),
            self.logged_in.as_deref(),
            self.disconnected.as_deref(),
        )
    }
}

/// Parse `args` and produce the status record. Unparseable arguments become an
/// `error` record; only help and version requests come back as `Err`.
pub fn status_record_from_args<I, T>(args: I) -> Result<StatusRecord, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match StatusArgs::try_parse_from(args) {
        Ok(args) => Ok(status::report(&args.signals())),
        Err(e) if !e.use_stderr() => Err(e),
        Err(e) => {
            tracing::error!(error = %e, "invalid arguments");
            Ok(ConnectionStatus::InternalError(InternalFault::Input(e.to_string())).into())
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "wa-send-image", version, about = "Send an image message over WhatsApp")]
pub struct SendImageArgs {
    /// Recipient phone number (`+` and separators allowed) or JID
    pub phone_number: String,

    /// Caption, or `file:<path>` to read it from a file
    pub message: String,

    pub image_path: PathBuf,

    /// Directory holding the session database
    #[arg(long, env = "WHATSAPP_STORE_DIR", default_value = "store")]
    pub store_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_DB_NAME)]
    pub db_name: String,

    /// Milliseconds to wait after connecting before checking the connection
    #[arg(long, default_value_t = 2000)]
    pub settle_ms: u64,
}

impl SendImageArgs {
    pub fn into_parts(self) -> (DispatchRequest, DispatchSettings) {
        (
            DispatchRequest {
                phone: self.phone_number,
                message: self.message,
                image_path: self.image_path,
            },
            DispatchSettings {
                store_dir: self.store_dir,
                db_name: self.db_name,
                settle: Duration::from_millis(self.settle_ms),
            },
        )
    }
}
