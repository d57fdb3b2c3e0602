// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Temporal integration: a primary emotion that keeps recurring across recent
//! analyses is reinforced.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::emotion::{Emotion, EmotionalState};
use crate::tally::most_common;

/// Trend detection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Number of most recent analyses inspected.
    pub window: usize,
    /// Fewer entries than this never form a trend.
    pub min_entries: usize,
    /// Share of the window the dominant emotion must hold [0, 1].
    pub share: f32,
    /// Intensity multiplier applied when the current emotion continues the trend.
    pub boost: f32,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: 5,
            min_entries: 3,
            share: 0.6,
            boost: 1.2,
        }
    }
}

/// Dominant primary emotion of the last `window` analyses, if it holds the
/// required share.
pub fn dominant_trend(history: &[EmotionalState], config: &TrendConfig) -> Option<Emotion> {
    let start = history.len().saturating_sub(config.window);
    let recent = &history[start..];
    if recent.len() < config.min_entries {
        return None;
    }
    let (emotion, count) = most_common(recent.iter().map(|s| s.primary_emotion))?;
    if count as f32 >= recent.len() as f32 * config.share {
        Some(emotion)
    } else {
        None
    }
}

/// Boost intensity when `state` continues the current trend. Never changes
/// the primary emotion. Returns whether the boost was applied.
pub fn integrate(state: &mut EmotionalState, history: &[EmotionalState], config: &TrendConfig) -> bool {
    match dominant_trend(history, config) {
        Some(trend) if trend == state.primary_emotion => {
            state.intensity = (state.intensity * config.boost).min(1.0);
            debug!(emotion = trend.key(), intensity = state.intensity, "trend reinforced");
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn state(emotion: Emotion, intensity: f32) -> EmotionalState {
        EmotionalState {
            primary_emotion: emotion,
            intensity,
            ..EmotionalState::neutral(BTreeMap::new(), Utc::now())
        }
    }

    fn history(emotions: &[Emotion]) -> Vec<EmotionalState> {
        emotions.iter().map(|e| state(*e, 0.5)).collect()
    }

    #[test]
    fn test_too_short_history_has_no_trend() {
        let h = history(&[Emotion::Joy, Emotion::Joy]);
        assert_eq!(dominant_trend(&h, &TrendConfig::default()), None);
    }

    #[test]
    fn test_trend_boosts_matching_primary() {
        let h = history(&[Emotion::Joy, Emotion::Sadness, Emotion::Joy, Emotion::Joy]);
        let mut current = state(Emotion::Joy, 0.5);
        assert!(integrate(&mut current, &h, &TrendConfig::default()));
        assert!((current.intensity - 0.6).abs() < 1e-6);
        assert_eq!(current.primary_emotion, Emotion::Joy);
    }

    #[test]
    fn test_trend_ignores_other_primary() {
        let h = history(&[Emotion::Joy, Emotion::Joy, Emotion::Joy]);
        let mut current = state(Emotion::Fear, 0.5);
        assert!(!integrate(&mut current, &h, &TrendConfig::default()));
        assert_eq!(current.intensity, 0.5);
        assert_eq!(current.primary_emotion, Emotion::Fear);
    }

    #[test]
    fn test_share_below_threshold() {
        // 2 of 5 is 40%
        let h = history(&[Emotion::Joy, Emotion::Fear, Emotion::Joy, Emotion::Anger, Emotion::Hope]);
        assert_eq!(dominant_trend(&h, &TrendConfig::default()), None);
    }

    #[test]
    fn test_only_last_window_counts() {
        let mut emotions = vec![Emotion::Sadness; 10];
        emotions.extend([Emotion::Joy; 3]);
        let h = history(&emotions);
        // last five: S S J J J
        assert_eq!(dominant_trend(&h, &TrendConfig::default()), Some(Emotion::Joy));
    }

    #[test]
    fn test_boost_is_capped() {
        let h = history(&[Emotion::Anger; 5]);
        let mut current = state(Emotion::Anger, 0.95);
        integrate(&mut current, &h, &TrendConfig::default());
        assert_eq!(current.intensity, 1.0);
    }
}
