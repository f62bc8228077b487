//! X11 foreground sampler

use async_trait::async_trait;
use focus_host_api::{ForegroundSampler, HostError, HostResult};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::run_command;

/// Samples the active X11 window via `xdotool`, then names its process
/// from `/proc/<pid>/comm`
#[derive(Debug, Clone)]
pub struct X11Sampler {
    proc_root: PathBuf,
}

impl Default for X11Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl X11Sampler {
    pub fn new() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
        }
    }

    async fn query(&self) -> HostResult<String> {
        let stdout = run_command("xdotool", &["getactivewindow", "getwindowpid"]).await?;
        let pid = parse_pid(&stdout)?;
        read_comm(&self.proc_root, pid).await
    }
}

#[async_trait]
impl ForegroundSampler for X11Sampler {
    async fn sample(&self) -> Option<String> {
        match self.query().await {
            Ok(name) => Some(name),
            Err(e) => {
                debug!(error = %e, "X11 sample unavailable");
                None
            }
        }
    }

    fn backend_name(&self) -> &str {
        "x11"
    }
}

fn parse_pid(stdout: &str) -> HostResult<u32> {
    let line = stdout.lines().next().unwrap_or("").trim();
    line.parse()
        .map_err(|_| HostError::Parse(format!("expected a pid, got '{}'", line)))
}

async fn read_comm(proc_root: &Path, pid: u32) -> HostResult<String> {
    let path = proc_root.join(pid.to_string()).join("comm");
    let comm = tokio::fs::read_to_string(&path).await?;
    let name = comm.trim();
    if name.is_empty() {
        return Err(HostError::Parse(format!("empty comm for pid {}", pid)));
    }
    Ok(name.to_string())
}
