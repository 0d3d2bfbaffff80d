//! On-disk artifact encodings.
//!
//! - `.json`: the artifact as a JSON document.
//! - `.bin`: the bincode-encoded artifact followed by a little-endian CRC32 of
//!   the payload. A checksum mismatch means the file is corrupt.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PalateError, Result};

/// Size of the trailing checksum of a `.bin` artifact.
const CHECKSUM_LEN: usize = 4;

/// Supported artifact encodings, in probing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    /// Every format, in the order a provider probes them.
    pub const ALL: [ArtifactFormat; 2] = [ArtifactFormat::Json, ArtifactFormat::Bincode];

    /// File extension of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Json => "json",
            ArtifactFormat::Bincode => "bin",
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ArtifactFormat::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }
}

/// Read an artifact, choosing the decoder from the file extension.
pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    match ArtifactFormat::from_path(path) {
        Some(ArtifactFormat::Json) => {
            let reader = BufReader::new(File::open(path)?);
            Ok(serde_json::from_reader(reader)?)
        }
        Some(ArtifactFormat::Bincode) => decode_bincode(&fs::read(path)?, path),
        None => Err(PalateError::artifact(format!(
            "unsupported artifact extension: {}",
            path.display()
        ))),
    }
}

/// Write an artifact, choosing the encoder from the file extension.
pub fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match ArtifactFormat::from_path(path) {
        Some(ArtifactFormat::Json) => serde_json::to_writer(&mut writer, value)?,
        Some(ArtifactFormat::Bincode) => writer.write_all(&encode_bincode(value)?)?,
        None => {
            return Err(PalateError::artifact(format!(
                "unsupported artifact extension: {}",
                path.display()
            )));
        }
    }
    writer.flush()?;
    Ok(())
}

/// Encode a value as a checksummed bincode payload.
pub fn encode_bincode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut bytes = bincode::serialize(value)?;
    let checksum = crc32fast::hash(&bytes);
    bytes.write_u32::<LittleEndian>(checksum)?;
    Ok(bytes)
}

/// Verify the trailing checksum and decode a bincode payload.
pub fn decode_bincode<T: DeserializeOwned>(bytes: &[u8], path: &Path) -> Result<T> {
    if bytes.len() < CHECKSUM_LEN {
        return Err(PalateError::artifact(format!(
            "{} is too short to hold a checksum",
            path.display()
        )));
    }
    let (payload, trailer) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    let stored = LittleEndian::read_u32(trailer);
    let computed = crc32fast::hash(payload);
    if stored != computed {
        return Err(PalateError::ChecksumMismatch {
            path: path.to_path_buf(),
            stored,
            computed,
        });
    }
    Ok(bincode::deserialize(payload)?)
}
