// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Configuration for the emotion analyzer.
//!
//! Aggregates the sub-configurations into a single `AnalyzerConfig` with
//! presets for more and less talkative assistants.

use serde::{Deserialize, Serialize};

use crate::correction::CorrectionConfig;
use crate::memory::MemoryConfig;
use crate::summary::RECENT_WINDOW;
use crate::temporal::TrendConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Conversation memory parameters
    pub memory: MemoryConfig,
    /// Trend reinforcement parameters
    pub trend: TrendConfig,
    /// Self-correction parameters
    pub correction: CorrectionConfig,
    /// Number of recent intensities averaged in the user profile.
    pub intensity_window: usize,
    /// Probability [0, 1] of asking a follow-up once the conversation is warm.
    pub curiosity_level: f32,
    /// Analysis results kept for trends, stability and the recent summary.
    /// Older results survive only in the profile's running counts.
    pub history_capacity: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            memory: MemoryConfig::default(),
            trend: TrendConfig::default(),
            correction: CorrectionConfig::default(),
            intensity_window: 10,
            curiosity_level: 0.7,
            history_capacity: 50,
        }
    }
}

impl AnalyzerConfig {
    /// Asks follow-ups almost every turn and remembers longer.
    pub fn curious() -> Self {
        Self {
            memory: MemoryConfig {
                capacity: 100,
                ..MemoryConfig::default()
            },
            curiosity_level: 0.95,
            ..Self::default()
        }
    }

    /// Rarely asks, needs stronger evidence before committing to an emotion.
    pub fn reserved() -> Self {
        Self {
            correction: CorrectionConfig {
                low_confidence: 0.4,
                ..CorrectionConfig::default()
            },
            trend: TrendConfig {
                boost: 1.1,
                ..TrendConfig::default()
            },
            curiosity_level: 0.3,
            ..Self::default()
        }
    }

    /// Validate the configuration, returning any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.memory.capacity == 0 {
            issues.push("memory.capacity must be > 0".into());
        }
        if self.memory.snippet_chars == 0 {
            issues.push("memory.snippet_chars must be > 0".into());
        }

        if self.trend.window < 2 {
            issues.push(format!("trend.window {} must be >= 2", self.trend.window));
        }
        if self.trend.min_entries > self.trend.window {
            issues.push(format!(
                "trend.min_entries {} exceeds trend.window {}",
                self.trend.min_entries, self.trend.window
            ));
        }
        if !(0.0..=1.0).contains(&self.trend.share) {
            issues.push(format!("trend.share {} out of range [0, 1]", self.trend.share));
        }
        if self.trend.boost < 1.0 {
            issues.push(format!("trend.boost {} must be >= 1.0", self.trend.boost));
        }

        for (name, value) in [
            ("correction.low_confidence", self.correction.low_confidence),
            ("correction.confidence_reset", self.correction.confidence_reset),
            ("correction.mixed_joy_damping", self.correction.mixed_joy_damping),
            ("correction.mixed_joy_ceiling", self.correction.mixed_joy_ceiling),
            ("curiosity_level", self.curiosity_level),
        ] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(format!("{name} {value} out of range [0, 1]"));
            }
        }

        if self.intensity_window == 0 {
            issues.push("intensity_window must be > 0".into());
        }
        let min_history = RECENT_WINDOW.max(self.trend.window);
        if self.history_capacity < min_history {
            issues.push(format!(
                "history_capacity {} must be >= {min_history}",
                self.history_capacity
            ));
        }

        issues
    }
}
