//! Print the session status as one JSON line.
//!
//! Inputs come from flags or the `WHATSAPP_*` environment variables set by the
//! supervising bridge. Output is always a single JSON object on stdout, even
//! when the arguments cannot be parsed.

use whatsapp_bridge::cli::status_record_from_args;
use whatsapp_bridge::logging::init_logging;

fn main() {
    init_logging("warn");

    let record = match status_record_from_args(std::env::args_os()) {
        Ok(record) => record,
        Err(e) => e.exit(),
    };
    println!("{}", record.to_json_line());
}
