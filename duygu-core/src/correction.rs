// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Post-hoc corrections applied to every classification.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::emotion::{Emotion, EmotionalState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionConfig {
    /// Classifications below this confidence fall back to neutral.
    pub low_confidence: f32,
    /// Confidence assigned after a low-confidence fallback.
    pub confidence_reset: f32,
    /// Intensity above which joy mixed with sadness is dampened.
    pub mixed_joy_intensity: f32,
    /// Dampening factor for mixed joy.
    pub mixed_joy_damping: f32,
    /// Ceiling for dampened mixed joy.
    pub mixed_joy_ceiling: f32,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            low_confidence: 0.3,
            confidence_reset: 0.5,
            mixed_joy_intensity: 0.7,
            mixed_joy_damping: 0.8,
            mixed_joy_ceiling: 0.9,
        }
    }
}

/// Apply both correction rules, in order.
pub fn self_correct(state: &mut EmotionalState, config: &CorrectionConfig) {
    if state.confidence < config.low_confidence {
        debug!(
            from = state.primary_emotion.key(),
            confidence = state.confidence,
            "low confidence, falling back to neutral"
        );
        state.primary_emotion = Emotion::Neutral;
        state.intensity *= 0.5;
        state.confidence = config.confidence_reset;
    }

    if state.primary_emotion == Emotion::Joy
        && state.secondary_emotions.contains(&Emotion::Sadness)
        && state.intensity > config.mixed_joy_intensity
    {
        state.intensity = (state.intensity * config.mixed_joy_damping).min(config.mixed_joy_ceiling);
    }

    state.clamp();
}
