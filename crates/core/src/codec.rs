//! Wire codec for index and record payloads
//!
//! Both payloads are JSON so a store dump stays human-readable:
//!
//! ```json
//! ["3f0c...", "9a41..."]
//! ```
//!
//! ```json
//! {"category":"trade","magnitude":4.0,"created_at":1700000000,"owner":"0xab","payload":"b3BhcXVl"}
//! ```
//!
//! The record id is not part of the record body; it is recovered from the key
//! the body was read from. The payload travels as standard base64.

use crate::error::CodecError;
use crate::types::{Category, Record, RecordId, Timestamp};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct RecordBody {
    category: Category,
    // Older writers omitted the magnitude; treat it as zero
    #[serde(default)]
    magnitude: f64,
    created_at: Timestamp,
    owner: String,
    #[serde(default)]
    payload: String,
}

/// Encode the ordered id list stored under the index key
pub fn encode_index(ids: &[RecordId]) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(ids)?)
}

/// Decode the index payload
///
/// An empty byte string is an empty index. Empty ids are dropped, since no
/// record can live under them.
pub fn decode_index(bytes: &[u8]) -> Result<Vec<RecordId>, CodecError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<RecordId> = serde_json::from_slice(bytes)?;
    Ok(ids.into_iter().filter(|id| !id.as_str().is_empty()).collect())
}

/// Encode a record body (everything except the id)
///
/// Refuses envelopes that [`decode_record`] would reject, so nothing written
/// through this codec is unreadable afterwards.
pub fn encode_record(record: &Record) -> Result<Vec<u8>, CodecError> {
    check_magnitude(record.magnitude)?;
    let body = RecordBody {
        category: record.category.clone(),
        magnitude: record.magnitude,
        created_at: record.created_at,
        owner: record.owner.clone(),
        payload: STANDARD.encode(&record.payload),
    };
    Ok(serde_json::to_vec(&body)?)
}

/// Decode a record body read from the key belonging to `id`
pub fn decode_record(id: RecordId, bytes: &[u8]) -> Result<Record, CodecError> {
    let body: RecordBody = serde_json::from_slice(bytes)?;
    check_magnitude(body.magnitude)?;
    let payload = STANDARD.decode(body.payload.as_bytes())?;
    Ok(Record {
        id,
        category: body.category,
        magnitude: body.magnitude,
        created_at: body.created_at,
        owner: body.owner,
        payload,
    })
}

fn check_magnitude(magnitude: f64) -> Result<(), CodecError> {
    if !magnitude.is_finite() || magnitude < 0.0 {
        return Err(CodecError::Envelope(format!(
            "magnitude {} is not a non-negative number",
            magnitude
        )));
    }
    Ok(())
}
