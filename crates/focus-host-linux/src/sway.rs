//! Sway foreground sampler

use async_trait::async_trait;
use focus_host_api::{ForegroundSampler, HostError, HostResult};
use serde_json::Value;
use tracing::debug;

use crate::run_command;

/// Samples the focused window from the sway layout tree
#[derive(Debug, Clone, Default)]
pub struct SwaySampler;

impl SwaySampler {
    pub fn new() -> Self {
        Self
    }

    async fn query(&self) -> HostResult<String> {
        let stdout = run_command("swaymsg", &["-t", "get_tree"]).await?;
        let tree: Value =
            serde_json::from_str(&stdout).map_err(|e| HostError::Parse(e.to_string()))?;
        focused_app(&tree).ok_or(HostError::NoFocusedWindow)
    }
}

#[async_trait]
impl ForegroundSampler for SwaySampler {
    async fn sample(&self) -> Option<String> {
        match self.query().await {
            Ok(app) => Some(app),
            Err(e) => {
                debug!(error = %e, "Sway sample unavailable");
                None
            }
        }
    }

    fn backend_name(&self) -> &str {
        "sway"
    }
}

/// Find the focused node in a `get_tree` document and name its application.
///
/// Native Wayland clients carry `app_id`; XWayland clients only have
/// `window_properties.class`.
pub fn focused_app(tree: &Value) -> Option<String> {
    let node = find_focused(tree)?;

    let app_id = node
        .get("app_id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    let class = || {
        node.get("window_properties")
            .and_then(|p| p.get("class"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    app_id.or_else(class).map(str::to_string)
}

fn find_focused(node: &Value) -> Option<&Value> {
    if node.get("focused").and_then(Value::as_bool) == Some(true) {
        return Some(node);
    }

    ["nodes", "floating_nodes"]
        .iter()
        .filter_map(|key| node.get(*key).and_then(Value::as_array))
        .flatten()
        .find_map(find_focused)
}
