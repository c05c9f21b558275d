// Staging - scoped ownership of the bytes handed to the decoder
//
// Some deployments prefer decoding from a file on disk rather than from the
// request buffer. Either way the resource lives exactly as long as the
// DecodeStaging value: the temporary file is deleted when it is dropped,
// which covers early returns through `?` as well as panics that unwind.

use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use symphonia::core::io::MediaSource;
use tempfile::NamedTempFile;

use crate::config::StagingMode;
use crate::error::PipelineError;

/// Decode buffer resource, released on drop
pub enum DecodeStaging {
    /// Shared in-memory copy of the payload
    Memory(Arc<[u8]>),
    /// Payload written to a temporary file
    TempFile(NamedTempFile),
}

impl DecodeStaging {
    /// Stage `bytes` according to `mode`
    ///
    /// # Arguments
    /// * `mode` - Memory or temporary file staging
    /// * `bytes` - Encoded audio payload
    /// * `extension` - Suffix for the temporary file name (e.g. "mp3")
    pub fn acquire(
        mode: StagingMode,
        bytes: &[u8],
        extension: &str,
    ) -> Result<Self, PipelineError> {
        match mode {
            StagingMode::Memory => Ok(DecodeStaging::Memory(Arc::from(bytes))),
            StagingMode::TempFile => {
                let suffix = format!(".{}", extension);
                let mut file = tempfile::Builder::new()
                    .prefix("voice-upload-")
                    .suffix(&suffix)
                    .tempfile()?;
                file.write_all(bytes)?;
                file.flush()?;
                Ok(DecodeStaging::TempFile(file))
            }
        }
    }

    /// Open a fresh media source over the staged bytes
    pub fn media_source(&self) -> Result<Box<dyn MediaSource>, PipelineError> {
        match self {
            DecodeStaging::Memory(bytes) => Ok(Box::new(Cursor::new(Arc::clone(bytes)))),
            DecodeStaging::TempFile(file) => Ok(Box::new(file.reopen()?)),
        }
    }

    /// Path of the staged file, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            DecodeStaging::Memory(_) => None,
            DecodeStaging::TempFile(file) => Some(file.path()),
        }
    }
}
