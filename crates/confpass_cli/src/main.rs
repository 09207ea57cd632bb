//! Check-in QR command-line tool.
//!
//! # Responsibility
//! - Verify `confpass_core` linkage with a deterministic ping.
//! - Decode a scanned code or mint one from the terminal for manual testing.

use clap::{Parser, Subcommand};
use confpass_core::qr::verify_checksum;
use confpass_core::{decode, encode, QrPayload};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(name = "confpass")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Without a subcommand, prints core ping and version.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Decode a scanned QR payload (long or short form)
    Decode {
        /// Raw QR text
        qr: String,
    },
    /// Print a long-form payload with checksum, stamped with the current time
    Encode {
        /// Attendee id (positive)
        #[arg(allow_negative_numbers = true)]
        attendee_id: i64,
        /// Conference id; omit for a general code
        conference_id: Option<i64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome = match cli.command {
        None => {
            println!("confpass_core ping={}", confpass_core::ping());
            println!("confpass_core version={}", confpass_core::core_version());
            Ok(())
        }
        Some(Command::Decode { qr }) => run_decode(&qr),
        Some(Command::Encode {
            attendee_id,
            conference_id,
        }) => run_encode(attendee_id, conference_id),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run_decode(raw: &str) -> Result<(), String> {
    let payload = decode(raw).map_err(|err| err.to_string())?;
    println!("attendee_id={}", payload.attendee_id);
    println!(
        "conference_id={}",
        payload
            .conference_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "general".to_string())
    );
    if let Some(registration_id) = payload.registration_id {
        println!("registration_id={registration_id}");
    }
    println!("timestamp={}", payload.timestamp);
    println!("valid_timestamp={}", payload.has_valid_timestamp());
    println!("version={}", payload.version());
    println!("checksum={:?}", verify_checksum(&payload));
    Ok(())
}

fn run_encode(attendee_id: i64, conference_id: Option<i64>) -> Result<(), String> {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| err.to_string())?
        .as_millis();
    let timestamp = i64::try_from(now_ms).map_err(|err| err.to_string())?;

    let payload = QrPayload::new(attendee_id, conference_id, timestamp)
        .map_err(|err| err.to_string())?
        .with_checksum();
    println!("{}", encode(&payload));
    Ok(())
}
