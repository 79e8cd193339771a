//! Location-id resolution through the external decoder executable.
//!
//! The decoder is conventionally named `<program-binary>_loc` and invoked
//! as `<decoder> --brief <id>`. Traces show strong run-length locality
//! (hot loops log from one call site for thousands of records), so a
//! single-slot cache of the most recent resolution removes almost all
//! subprocess cost without growing an unbounded map.

use log::debug;
use std::path::{Path, PathBuf};

use crate::domain::{DecodeError, LocationId};
use crate::toolchain::ExternalTool;

/// External location decoder with run-length memoization.
#[derive(Debug)]
pub struct LocDecoder {
    tool: ExternalTool,
    cache: Option<(LocationId, String)>,
    invocations: usize,
}

impl LocDecoder {
    /// Resolve the decoder executable for `binary`, honoring an explicit
    /// override path.
    ///
    /// Existence is checked here, before any entries are processed: a
    /// missing decoder is a configuration error, not a per-record one.
    ///
    /// # Errors
    /// [`DecodeError::DecoderNotFound`] when the executable is absent.
    pub fn locate(binary: &Path, override_path: Option<PathBuf>) -> Result<Self, DecodeError> {
        let path = override_path.unwrap_or_else(|| default_decoder_path(binary));
        if !path.is_file() {
            return Err(DecodeError::DecoderNotFound(path));
        }
        Ok(Self { tool: ExternalTool::at(path), cache: None, invocations: 0 })
    }

    /// Resolve `id` to its display text, reusing the cached text when the
    /// id matches the previous call.
    ///
    /// The decoder's stdout is trimmed; stderr, when present, is
    /// concatenated into the returned text rather than treated as failure.
    ///
    /// # Errors
    /// Only subprocess spawn failures.
    pub fn get_or_resolve(&mut self, id: LocationId) -> Result<String, DecodeError> {
        if let Some((cached_id, ref text)) = self.cache {
            if cached_id == id {
                return Ok(text.clone());
            }
        }

        let out = self.tool.run(&["--brief", &id.to_string()])?;
        let text = format!("{}{}", out.stdout, out.stderr).trim().to_string();
        debug!("resolved loc {id} -> '{text}'");
        self.invocations += 1;
        self.cache = Some((id, text.clone()));
        Ok(text)
    }

    /// How many times the external decoder has actually been invoked.
    #[must_use]
    pub fn invocations(&self) -> usize {
        self.invocations
    }
}

/// `<program-binary>_loc`, next to the binary.
fn default_decoder_path(binary: &Path) -> PathBuf {
    let mut name = binary.file_name().map_or_else(String::new, |n| {
        n.to_string_lossy().into_owned()
    });
    name.push_str("_loc");
    binary.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_decoder_path() {
        assert_eq!(
            default_decoder_path(Path::new("/opt/app/server")),
            PathBuf::from("/opt/app/server_loc")
        );
        assert_eq!(default_decoder_path(Path::new("client")), PathBuf::from("client_loc"));
    }

    #[test]
    fn test_missing_decoder_is_config_error() {
        let err = LocDecoder::locate(Path::new("/nonexistent/app"), None).unwrap_err();
        match err {
            DecodeError::DecoderNotFound(path) => {
                assert_eq!(path, PathBuf::from("/nonexistent/app_loc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_override_path_wins() {
        let err =
            LocDecoder::locate(Path::new("/opt/app"), Some(PathBuf::from("/also/missing_loc")))
                .unwrap_err();
        match err {
            DecodeError::DecoderNotFound(path) => {
                assert_eq!(path, PathBuf::from("/also/missing_loc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
