// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Assistant configuration: analyzer settings plus listening, questioning
//! and reply pacing.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use duygu_core::AnalyzerConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Emotion analyzer parameters
    pub analyzer: AnalyzerConfig,
    /// Seconds to wait for speech to start.
    pub listen_timeout_secs: u64,
    /// Longest accepted phrase, in seconds.
    pub phrase_limit_secs: u64,
    /// Chance [0, 1] of asking a follow-up after a conversational turn.
    pub question_probability: f32,
    /// Minimum seconds between two follow-up questions.
    pub question_cooldown_secs: u64,
    /// Minimum seconds between two emotion-aware replies.
    pub emotion_reply_cooldown_secs: u64,
    /// Emotion-aware replies need intensity above this.
    pub emotion_reply_min_intensity: f32,
    /// Emotion-aware replies need confidence above this.
    pub emotion_reply_min_confidence: f32,
    /// Pause between sleep-mode questions is drawn from this range, in seconds.
    pub sleep_interval_secs: (u64, u64),
    /// City used by the weather command.
    pub weather_city: String,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            listen_timeout_secs: 5,
            phrase_limit_secs: 7,
            question_probability: 0.4,
            question_cooldown_secs: 30,
            emotion_reply_cooldown_secs: 120,
            emotion_reply_min_intensity: 0.5,
            emotion_reply_min_confidence: 0.6,
            sleep_interval_secs: (15, 30),
            weather_city: "İskenderun".into(),
            seed: None,
        }
    }
}

impl AssistantConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        let issues = config.validate();
        if !issues.is_empty() {
            bail!("invalid config {}: {}", path.display(), issues.join("; "));
        }
        Ok(config)
    }

    /// Defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn listen_timeout(&self) -> Duration {
        Duration::from_secs(self.listen_timeout_secs)
    }

    pub fn phrase_limit(&self) -> Duration {
        Duration::from_secs(self.phrase_limit_secs)
    }

    pub fn question_cooldown(&self) -> Duration {
        Duration::from_secs(self.question_cooldown_secs)
    }

    pub fn emotion_reply_cooldown(&self) -> Duration {
        Duration::from_secs(self.emotion_reply_cooldown_secs)
    }

    pub fn sleep_interval(&self) -> (Duration, Duration) {
        let (lo, hi) = self.sleep_interval_secs;
        (Duration::from_secs(lo), Duration::from_secs(hi))
    }

    /// Validate the configuration, returning any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues: Vec<String> = self
            .analyzer
            .validate()
            .into_iter()
            .map(|i| format!("analyzer.{i}"))
            .collect();

        if self.listen_timeout_secs == 0 {
            issues.push("listen_timeout_secs must be > 0".into());
        }
        for (name, value) in [
            ("question_probability", self.question_probability),
            ("emotion_reply_min_intensity", self.emotion_reply_min_intensity),
            ("emotion_reply_min_confidence", self.emotion_reply_min_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(format!("{name} {value} out of range [0, 1]"));
            }
        }
        let (lo, hi) = self.sleep_interval_secs;
        if lo > hi {
            issues.push(format!("sleep_interval_secs ({lo}, {hi}) is not ordered"));
        }
        if self.weather_city.trim().is_empty() {
            issues.push("weather_city must not be empty".into());
        }

        issues
    }
}
