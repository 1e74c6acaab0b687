// SPDX-License-Identifier: Apache-2.0

// Telemetry helpers for JSONL logging when the `telemetry` feature is
// enabled. Manually formats JSON to keep the core free of serde.

#[cfg(feature = "telemetry")]
fn ts_micros() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros()
}

/// Emits an entity lifecycle event (`insert`/`remove`) with the handle
/// and the live-entity count after the operation. Best-effort: I/O
/// errors are ignored and timestamps fall back to 0 on clock errors.
#[cfg(feature = "telemetry")]
pub(crate) fn entity_event(kind: &str, handle: u32, entities: usize) {
    use std::io::Write as _;
    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        r#"{{"timestamp_micros":{},"event":"{}","handle":{},"entities":{}}}"#,
        ts_micros(),
        kind,
        handle,
        entities
    );
    let _ = out.write_all(b"\n");
}

#[cfg(not(feature = "telemetry"))]
pub(crate) fn entity_event(_kind: &str, _handle: u32, _entities: usize) {}

/// Emits a query event with the number of candidate pairs reported.
#[cfg(feature = "telemetry")]
pub(crate) fn query_event(pairs: usize) {
    use std::io::Write as _;
    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        r#"{{"timestamp_micros":{},"event":"query","pairs":{}}}"#,
        ts_micros(),
        pairs
    );
    let _ = out.write_all(b"\n");
}

#[cfg(not(feature = "telemetry"))]
pub(crate) fn query_event(_pairs: usize) {}
