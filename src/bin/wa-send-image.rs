//! Send an image with a caption to one recipient using the stored session.
//!
//! Exits 0 when the image was delivered or when only the caption could be sent,
//! 1 otherwise.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use whatsapp_bridge::cli::SendImageArgs;
use whatsapp_bridge::dispatch::{exit_status, outcome_lines, MediaDispatcher, SqliteSessions};
use whatsapp_bridge::logging::init_logging;

fn main() -> anyhow::Result<ExitCode> {
    let args = match SendImageArgs::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return Ok(ExitCode::FAILURE);
        }
    };
    init_logging("warn,whatsapp_bridge=info");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(runtime.block_on(run(args)))
}

async fn run(args: SendImageArgs) -> ExitCode {
    let (request, settings) = args.into_parts();
    println!(
        "Sending image to {} with message: {}",
        request.phone, request.message
    );
    println!("Image path: {}", request.image_path.display());

    let result = MediaDispatcher::new(SqliteSessions, settings)
        .dispatch(&request)
        .await;
    for line in outcome_lines(&result) {
        println!("{line}");
    }
    ExitCode::from(exit_status(&result))
}
