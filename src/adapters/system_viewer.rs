//! Opens rendered charts in the platform's default viewer.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::domain::error::StockvizError;
use crate::ports::display_port::DisplayPort;

pub struct SystemViewer {
    program: String,
    args: Vec<String>,
}

impl SystemViewer {
    /// `open` on macOS, `cmd /C start` on Windows, `xdg-open` elsewhere.
    pub fn new() -> Self {
        if cfg!(target_os = "macos") {
            Self::with_command("open", &[])
        } else if cfg!(target_os = "windows") {
            Self::with_command("cmd", &["/C", "start", ""])
        } else {
            Self::with_command("xdg-open", &[])
        }
    }

    pub fn with_command(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SystemViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for SystemViewer {
    fn show(&self, path: &Path) -> Result<(), StockvizError> {
        if !path.is_file() {
            return Err(StockvizError::Display {
                reason: format!("{} does not exist", path.display()),
            });
        }

        // The viewer outlives us; it is not waited on.
        Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| StockvizError::Display {
                reason: format!("failed to launch {}: {}", self.program, e),
            })?;

        info!(viewer = %self.program, path = %path.display(), "opened chart");
        Ok(())
    }
}
