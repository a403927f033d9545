// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor configuration loaded from JSON.
//!
//! Every section is optional and falls back to its defaults; unknown keys are rejected so a
//! typo does not silently turn into a default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interaction::InteractionConfig;
use crate::layout::LayoutConfig;
use crate::ops::ValidationRules;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub validation: ValidationRules,
    pub layout: LayoutConfig,
    pub interaction: InteractionConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {field} = {value} is outside {range}")]
    OutOfRange { field: &'static str, value: f64, range: &'static str },
}

impl EditorConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.check()?;
        Ok(config)
    }

    /// Rejects simulation tunables that would make the cooling schedule diverge.
    pub fn check(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if !(layout.alpha_min > 0.0 && layout.alpha_min < 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "layout.alpha_min",
                value: layout.alpha_min,
                range: "(0, 1)",
            });
        }
        if !(0.0..=1.0).contains(&layout.velocity_decay) {
            return Err(ConfigError::OutOfRange {
                field: "layout.velocity_decay",
                value: layout.velocity_decay,
                range: "[0, 1]",
            });
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&source)
    }
}
