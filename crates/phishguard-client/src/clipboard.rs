//! Clipboard access through the platform clipboard tool
//!
//! The terminal has no clipboard API of its own, so we shell out to whichever
//! of `pbpaste`, `wl-paste`, `xclip`, `xsel`, or PowerShell is on `PATH`.

use std::process::Stdio;

use phishguard_core::prelude::*;
use tokio::process::Command;

const CAPABILITY: &str = "Clipboard";

/// A command that prints the clipboard text to stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardTool {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Candidate tools for the current platform, in preference order
    fn candidates() -> Vec<ClipboardTool> {
        let mut tools = Vec::new();

        #[cfg(target_os = "macos")]
        tools.push(ClipboardTool::new("pbpaste", &[]));

        #[cfg(target_os = "windows")]
        tools.push(ClipboardTool::new(
            "powershell",
            &["-NoProfile", "-Command", "Get-Clipboard"],
        ));

        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            tools.push(ClipboardTool::new("wl-paste", &["--no-newline"]));
        }
        tools.push(ClipboardTool::new("xclip", &["-selection", "clipboard", "-o"]));
        tools.push(ClipboardTool::new("xsel", &["--clipboard", "--output"]));

        tools
    }

    /// First candidate whose program resolves on `PATH`
    pub fn detect() -> Option<ClipboardTool> {
        Self::candidates().into_iter().find(|tool| {
            which::which(&tool.program)
                .inspect_err(|e| trace!("clipboard tool {} not found: {}", tool.program, e))
                .is_ok()
        })
    }
}

/// Clipboard reader
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    tool: Option<ClipboardTool>,
}

impl Clipboard {
    /// Use the first clipboard tool found on this system
    pub fn detect() -> Self {
        let tool = ClipboardTool::detect();
        match &tool {
            Some(t) => debug!("Using clipboard tool: {}", t.program),
            None => debug!("No clipboard tool found"),
        }
        Self { tool }
    }

    pub fn with_tool(tool: ClipboardTool) -> Self {
        Self { tool: Some(tool) }
    }

    /// A clipboard with no backing tool; every read fails
    pub fn unavailable() -> Self {
        Self { tool: None }
    }

    pub fn is_available(&self) -> bool {
        self.tool.is_some()
    }

    /// Read the clipboard as text, without the trailing newline some tools add.
    pub async fn read_text(&self) -> Result<String> {
        let tool = self.tool.as_ref().ok_or_else(|| {
            Error::capability(
                CAPABILITY,
                "no clipboard tool found (install wl-clipboard, xclip or xsel)",
            )
        })?;

        let output = Command::new(&tool.program)
            .args(&tool.args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::capability(CAPABILITY, format!("{}: {}", tool.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::capability(
                CAPABILITY,
                format!("{} exited with {}: {}", tool.program, output.status, stderr.trim()),
            ));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(text.trim_end_matches(['\r', '\n']).to_string())
    }
}
