use crate::errors::CoreError;
use crate::models::state::AppState;

/// Magic bytes identifying a Cat Island backup snapshot.
pub const MAGIC: &[u8; 4] = b"CATI";

/// Current snapshot format version.
pub const CURRENT_VERSION: u16 = 1;

/// Header size in bytes: magic(4) + version(2) + payload_len(8) = 14
pub const HEADER_SIZE: usize = 14;

/// Header read from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u16,
    pub payload_len: u64,
}

/// Serialize the whole application state into a portable snapshot.
///
/// Layout:
/// ```text
/// [CATI: 4B] [version: 2B LE] [payload_len: 8B LE] [bincode(AppState): variable]
/// ```
pub fn write_snapshot(state: &AppState) -> Result<Vec<u8>, CoreError> {
    let payload = bincode::serialize(state)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&CURRENT_VERSION.to_le_bytes());
    buf.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    buf.extend_from_slice(&payload);
    Ok(buf)
}

/// Parse the header. Returns the header and the payload slice.
pub fn read_header(data: &[u8]) -> Result<(SnapshotHeader, &[u8]), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidSnapshot(
            "Data too small to be a snapshot".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidSnapshot(
            "Invalid magic bytes, not a Cat Island snapshot".into(),
        ));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let payload_len = u64::from_le_bytes(data[6..HEADER_SIZE].try_into().map_err(|_| {
        CoreError::InvalidSnapshot("Failed to read payload length".into())
    })?);

    let available = (data.len() - HEADER_SIZE) as u64;
    if available < payload_len {
        return Err(CoreError::InvalidSnapshot(format!(
            "Snapshot truncated: expected {payload_len} payload bytes, got {available}"
        )));
    }

    let end = HEADER_SIZE + payload_len as usize;
    Ok((
        SnapshotHeader {
            version,
            payload_len,
        },
        &data[HEADER_SIZE..end],
    ))
}

/// Decode a snapshot back into application state.
pub fn read_snapshot(data: &[u8]) -> Result<AppState, CoreError> {
    let (_, payload) = read_header(data)?;
    bincode::deserialize(payload)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize snapshot: {e}")))
}

/// Write a snapshot to disk (native only).
#[cfg(not(target_arch = "wasm32"))]
pub fn save_to_file(state: &AppState, path: impl AsRef<std::path::Path>) -> Result<(), CoreError> {
    let bytes = write_snapshot(state)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Read a snapshot from disk (native only).
#[cfg(not(target_arch = "wasm32"))]
pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<AppState, CoreError> {
    let bytes = std::fs::read(path)?;
    read_snapshot(&bytes)
}
