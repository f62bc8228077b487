//! Configuration validation

use crate::config::SamplerKind;
use crate::schema::{RawConfig, RawPreset};
use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Invalid listen address '{value}': {message}")]
    InvalidListenAddr { value: String, message: String },

    #[error("Unknown sampler backend '{0}' (expected auto, sway, x11 or none)")]
    UnknownSamplerBackend(String),

    #[error("Preset '{preset}': {message}")]
    PresetError { preset: String, message: String },

    #[error("Duplicate preset name: {0}")]
    DuplicatePresetName(String),

    #[error("Service config error: {0}")]
    ServiceError(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(addr) = &config.service.listen_addr {
        if let Err(e) = addr.parse::<SocketAddr>() {
            errors.push(ValidationError::InvalidListenAddr {
                value: addr.clone(),
                message: e.to_string(),
            });
        }
    }

    if config.service.default_grace_seconds == Some(0) {
        errors.push(ValidationError::ServiceError(
            "default_grace_seconds must be > 0".into(),
        ));
    }

    if config.service.store_queue_capacity == Some(0) {
        errors.push(ValidationError::ServiceError(
            "store_queue_capacity must be > 0".into(),
        ));
    }

    if let Some(backend) = &config.sampler.backend {
        if SamplerKind::parse(backend).is_none() {
            errors.push(ValidationError::UnknownSamplerBackend(backend.clone()));
        }
    }

    let mut seen_names = HashSet::new();
    for preset in &config.presets {
        let name = preset.name.trim();
        if !name.is_empty() && !seen_names.insert(name) {
            errors.push(ValidationError::DuplicatePresetName(name.to_string()));
        }
        errors.extend(validate_preset(preset));
    }

    errors
}

fn validate_preset(preset: &RawPreset) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if preset.name.trim().is_empty() {
        errors.push(ValidationError::PresetError {
            preset: preset.name.clone(),
            message: "name cannot be empty".into(),
        });
    }

    if preset.processes.iter().all(|p| p.trim().is_empty()) {
        errors.push(ValidationError::PresetError {
            preset: preset.name.clone(),
            message: "at least one process is required".into(),
        });
    }

    errors
}
