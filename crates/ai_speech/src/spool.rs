//! Disk spooling for downloaded audio
//!
//! When a spool directory is configured, response bodies are streamed into a
//! scoped temporary file instead of being buffered by the HTTP client. The
//! file is removed when the spool is finished or dropped.

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::SpeechError;

/// Scoped temporary file collecting one audio download
#[derive(Debug)]
pub struct AudioSpool {
    file: NamedTempFile,
    written: usize,
}

impl AudioSpool {
    /// Create a spool file inside `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Spool` if the directory or file cannot be created.
    pub fn create_in(dir: &Path) -> Result<Self, SpeechError> {
        std::fs::create_dir_all(dir)?;
        let file = tempfile::Builder::new()
            .prefix("blogcast-")
            .suffix(".part")
            .tempfile_in(dir)?;
        debug!(path = %file.path().display(), "Opened audio spool");
        Ok(Self { file, written: 0 })
    }

    /// Append a chunk of audio
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Spool` on write failure.
    pub fn append(&mut self, chunk: &[u8]) -> Result<(), SpeechError> {
        self.file.write_all(chunk)?;
        self.written += chunk.len();
        Ok(())
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of bytes written so far
    #[must_use]
    pub const fn len(&self) -> usize {
        self.written
    }

    /// Whether nothing has been written yet
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Read the spooled audio back and remove the file
    ///
    /// A failure to remove the file is logged, not returned.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Spool` if the file cannot be read back.
    pub fn finish(self) -> Result<Vec<u8>, SpeechError> {
        let Self { mut file, written } = self;

        file.flush()?;
        let handle = file.as_file_mut();
        handle.seek(SeekFrom::Start(0))?;
        let mut audio = Vec::with_capacity(written);
        handle.read_to_end(&mut audio)?;

        let path = file.path().to_path_buf();
        if let Err(e) = file.close() {
            warn!(path = %path.display(), error = %e, "Failed to remove audio spool file");
        }

        Ok(audio)
    }
}

/// Read a successful response body, spooling through `spool_dir` when set
///
/// # Errors
///
/// Returns `SpeechError::InvalidResponse` if the body cannot be read, or
/// `SpeechError::Spool` if the spool file fails.
pub async fn collect_body(
    mut response: reqwest::Response,
    spool_dir: Option<&Path>,
) -> Result<Vec<u8>, SpeechError> {
    let Some(dir) = spool_dir else {
        return response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")));
    };

    let mut spool = AudioSpool::create_in(dir)?;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?
    {
        spool.append(&chunk)?;
    }
    spool.finish()
}
