//! Challenge batch decoding and solving
//!
//! A challenge payload arrives as base64-encoded JSON:
//!
//! ```json
//! { "data": [ { "pcap": "<b64>", "myst": "<b64>", "memory_address": 50 } ] }
//! ```
//!
//! Each case yields one report line of three integers: the bitmap signal,
//! the capture marker value, and the machine result. Failures degrade
//! instead of aborting: a malformed payload produces a single `0 0 0`
//! line, a malformed case produces `0 0 0` for that case only and the
//! rest of the batch still runs.

pub use bitmap::{asset_bytes, signal, BITMAP_SIGNAL};
pub use pcap::marker_value;

mod bitmap;
mod pcap;


use crate::vm::{execute_with_config, VMConfig};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

/// Payload rejection reasons
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("malformed challenge record: {0}")]
    Json(#[from] serde_json::Error),
}

/// A decoded challenge batch
///
/// Cases are kept as raw JSON values so that one malformed case degrades
/// alone instead of rejecting the whole batch.
#[derive(Debug, Deserialize)]
pub struct Batch {
    /// Challenge cases, in delivery order
    #[serde(default)]
    pub data: Vec<Value>,
}

/// One well-formed challenge case
#[derive(Debug, Clone, Deserialize)]
pub struct Case {
    /// Capture bytes, base64-encoded
    pub pcap: String,
    /// MysticLang program bytes, base64-encoded
    pub myst: String,
    /// Memory cell to report after execution
    pub memory_address: i64,
}

/// Report line for one case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Signal recovered from the bitmap asset
    pub bitmap: u32,
    /// Marker value found in the capture
    pub capture: u32,
    /// Machine result cell
    pub machine: u8,
}

impl Report {
    /// The all-zero line emitted for anything malformed
    pub const ZERO: Report = Report {
        bitmap: 0,
        capture: 0,
        machine: 0,
    };
}

impl fmt::Display for Report {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} {} {}", self.bitmap, self.capture, self.machine)
    }
}

/// Decode a base64 payload into a batch
pub fn decode_batch(payload_b64: &str) -> Result<Batch, PayloadError> {
    let json = STANDARD.decode(payload_b64)?;
    let batch = serde_json::from_slice(&json)?;
    Ok(batch)
}

/// Solve a single case
///
/// Any per-case failure (missing field, wrong type, bad inner base64)
/// yields [`Report::ZERO`].
pub fn solve_case(
    raw: &Value,
    vm_config: &VMConfig,
) -> Report {
    let case: Case = match serde_json::from_value(raw.clone()) {
        Ok(case) => case,
        Err(err) => {
            debug!("case rejected: {}", err);
            return Report::ZERO;
        }
    };

    let (capture, program) = match (STANDARD.decode(&case.pcap), STANDARD.decode(&case.myst)) {
        (Ok(capture), Ok(program)) => (capture, program),
        _ => {
            debug!("case rejected: inner base64");
            return Report::ZERO;
        }
    };

    Report {
        bitmap: bitmap::signal(),
        capture: pcap::marker_value(&capture),
        machine: execute_with_config(&program, case.memory_address, vm_config.clone()),
    }
}

/// Solve every case in a batch, preserving delivery order
///
/// Cases share nothing (each builds its own machine), so the parallel
/// path needs no synchronization.
pub fn solve(
    batch: &Batch,
    vm_config: &VMConfig,
    parallel: bool,
) -> Vec<Report> {
    if parallel {
        batch
            .data
            .par_iter()
            .map(|case| solve_case(case, vm_config))
            .collect()
    } else {
        batch
            .data
            .iter()
            .map(|case| solve_case(case, vm_config))
            .collect()
    }
}

/// Drive the full pipeline from a reader to a writer
///
/// Reads the whole input as whitespace-separated base64, decodes the
/// batch, and writes one report line per case. A rejected payload writes
/// exactly one `0 0 0` line; only real output failures surface as errors.
pub fn solve_stream<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    vm_config: &VMConfig,
    parallel: bool,
) -> io::Result<()> {
    let mut payload = String::new();
    for line in input.lines() {
        payload.push_str(line?.trim());
    }

    match decode_batch(&payload) {
        Ok(batch) => {
            for report in solve(&batch, vm_config, parallel) {
                writeln!(output, "{}", report)?;
            }
        }
        Err(err) => {
            debug!("payload rejected: {}", err);
            writeln!(output, "{}", Report::ZERO)?;
        }
    }

    Ok(())
}
