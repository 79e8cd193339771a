//! Locating and running the external binary-inspection tools.
//!
//! Every invocation is a blocking subprocess with captured output. Results
//! come back structured (exit status, stdout, stderr) so callers can tell
//! tool failure apart from tool success with stderr noise.
//!
//! No timeout is applied; a hung tool hangs the decode. The tools here are
//! local binutils-class programs, not network services.

use log::debug;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::domain::DecodeError;
use crate::header::Platform;

/// Captured result of one external-tool invocation.
#[derive(Debug)]
pub struct ToolOutput {
    /// Exit code, if the process exited normally.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// One external executable, located up front so a missing tool fails the
/// session before any decoding begins.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    name: String,
    program: PathBuf,
}

impl ExternalTool {
    /// Find `name` on `PATH`.
    ///
    /// # Errors
    /// [`DecodeError::ToolNotFound`] when no `PATH` entry holds the tool.
    pub fn locate(name: &str) -> Result<Self, DecodeError> {
        let path = env::var_os("PATH")
            .map(|paths| {
                env::split_paths(&paths).map(|dir| dir.join(name)).find(|p| p.is_file())
            })
            .unwrap_or(None)
            .ok_or_else(|| DecodeError::ToolNotFound(name.to_string()))?;
        debug!("located {name} at {}", path.display());
        Ok(Self { name: name.to_string(), program: path })
    }

    /// Use an executable at a known path (the location decoder, whose path
    /// comes from the log's binary name rather than `PATH`).
    #[must_use]
    pub fn at(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self { name, program: path }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the tool to completion and capture both output streams.
    ///
    /// # Errors
    /// Only spawn/wait failures; a non-zero exit is reported through
    /// [`ToolOutput::status`], not as an `Err`.
    pub fn run(&self, args: &[&str]) -> io::Result<ToolOutput> {
        debug!("running {} {}", self.program.display(), args.join(" "));
        let output = Command::new(&self.program).args(args).output()?;
        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Run and insist on exit code 0, returning stdout.
    ///
    /// # Errors
    /// [`DecodeError::ToolFailed`] on a non-zero or signal exit.
    pub fn run_checked(&self, args: &[&str]) -> Result<String, DecodeError> {
        let out = self.run(args)?;
        if out.success() {
            Ok(out.stdout)
        } else {
            Err(DecodeError::ToolFailed {
                tool: self.name.clone(),
                status: out.status.map_or_else(|| "signal".to_string(), |c| format!("exit {c}")),
                stderr: out.stderr.trim().to_string(),
            })
        }
    }
}

/// The per-platform set of inspection tools and the section they inspect.
#[derive(Debug)]
pub struct Toolchain {
    dump_tool: ExternalTool,
    sizing_tool: Option<ExternalTool>,
    section: &'static str,
}

impl Toolchain {
    /// Locate the tools the given platform's layout needs.
    ///
    /// Linux reads `.rodata` with `readelf` alone; MacOS reads `__cstring`
    /// and additionally needs `size` for the section's file offset.
    ///
    /// # Errors
    /// [`DecodeError::ToolNotFound`] for the first missing tool.
    pub fn for_platform(platform: Platform) -> Result<Self, DecodeError> {
        match platform {
            Platform::Linux => Ok(Self {
                dump_tool: ExternalTool::locate("readelf")?,
                sizing_tool: None,
                section: ".rodata",
            }),
            Platform::MacOs => Ok(Self {
                dump_tool: ExternalTool::locate("readelf")?,
                sizing_tool: Some(ExternalTool::locate("size")?),
                section: "__cstring",
            }),
        }
    }

    #[must_use]
    pub fn section(&self) -> &'static str {
        self.section
    }

    /// Hex-dump of the string section (`readelf -x`).
    ///
    /// # Errors
    /// Propagates tool spawn failure or non-zero exit.
    pub fn hex_dump(&self, binary: &Path) -> Result<String, DecodeError> {
        let binary = binary.to_string_lossy();
        self.dump_tool.run_checked(&["-x", self.section, &binary])
    }

    /// String-dump of the string section (`readelf -p`).
    ///
    /// # Errors
    /// Propagates tool spawn failure or non-zero exit.
    pub fn string_dump(&self, binary: &Path) -> Result<String, DecodeError> {
        let binary = binary.to_string_lossy();
        self.dump_tool.run_checked(&["-p", self.section, &binary])
    }

    /// Sizing-tool listing (`size -m -l`), MacOS only.
    ///
    /// # Errors
    /// [`DecodeError::ToolNotFound`] if this platform carries no sizing
    /// tool; otherwise tool spawn/exit failures.
    pub fn size_listing(&self, binary: &Path) -> Result<String, DecodeError> {
        let tool = self
            .sizing_tool
            .as_ref()
            .ok_or_else(|| DecodeError::ToolNotFound("size".to_string()))?;
        let binary = binary.to_string_lossy();
        tool.run_checked(&["-m", "-l", &binary])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_missing_tool() {
        let err = ExternalTool::locate("definitely-not-a-real-tool-name").unwrap_err();
        assert!(matches!(err, DecodeError::ToolNotFound(_)));
    }

    #[test]
    fn test_tool_at_path_keeps_name() {
        let tool = ExternalTool::at(PathBuf::from("/tmp/myapp_loc"));
        assert_eq!(tool.name(), "myapp_loc");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_both_streams() {
        let tool = ExternalTool::at(PathBuf::from("/bin/sh"));
        let out = tool.run(&["-c", "echo out; echo err >&2"]).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_checked_nonzero_exit() {
        let tool = ExternalTool::at(PathBuf::from("/bin/sh"));
        let err = tool.run_checked(&["-c", "exit 3"]).unwrap_err();
        assert!(matches!(err, DecodeError::ToolFailed { .. }));
    }
}
