//! Linux foreground samplers for focusd
//!
//! Provides:
//! - Sway/wlroots sampling via `swaymsg -t get_tree`
//! - X11 sampling via `xdotool` and `/proc/<pid>/comm`
//! - Backend auto-detection from the session environment

mod detect;
mod sway;
mod x11;

pub use detect::*;
pub use sway::*;
pub use x11::*;

use focus_host_api::HostError;
use tokio::process::Command;

/// Run a command and return its stdout, failing on a non-zero exit
pub(crate) async fn run_command(program: &str, args: &[&str]) -> Result<String, HostError> {
    let output = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| HostError::CommandFailed {
            command: program.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(HostError::CommandFailed {
            command: program.to_string(),
            message: format!("{}: {}", output.status, stderr.trim()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
