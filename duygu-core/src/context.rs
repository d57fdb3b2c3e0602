// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Situational weights that do not depend on the lexical content of a text:
//! time of day, topical setting, and the previous analysis.

use std::collections::BTreeMap;

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;

pub const NIGHT_TIME: &str = "night_time";
pub const DAY_TIME: &str = "day_time";
pub const EMOTIONAL_VULNERABILITY: &str = "emotional_vulnerability";
pub const ENTERTAINMENT_CONTEXT: &str = "entertainment_context";
pub const PROBLEM_SOLVING_CONTEXT: &str = "problem_solving_context";
pub const RECENT_SADNESS: &str = "recent_sadness";

const ENTERTAINMENT_WORDS: &[&str] = &["video", "müzik", "şarkı", "film"];
const PROBLEM_WORDS: &[&str] = &["yardım", "problem", "sorun", "hata"];

/// Caller-supplied context for one analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisContext {
    /// Hour of day [0, 23]. Local wall-clock hour when absent.
    pub hour: Option<u32>,
    /// Free-form label of how the text arrived ("voice_command", "keyboard").
    pub interaction_type: Option<String>,
}

impl AnalysisContext {
    pub fn at_hour(hour: u32) -> Self {
        Self {
            hour: Some(hour),
            ..Self::default()
        }
    }

    pub fn with_interaction(mut self, kind: impl Into<String>) -> Self {
        self.interaction_type = Some(kind.into());
        self
    }

    pub fn resolved_hour(&self) -> u32 {
        self.hour.unwrap_or_else(|| Local::now().hour()) % 24
    }
}

/// Night covers 22:00 through 05:59.
pub fn is_night(hour: u32) -> bool {
    hour >= 22 || hour < 6
}

/// Derive context scores. Night and day are mutually exclusive.
pub fn evaluate_context(
    text: &str,
    context: &AnalysisContext,
    last_primary: Option<Emotion>,
) -> BTreeMap<String, f32> {
    let lower = text.to_lowercase();
    let mut scores = BTreeMap::new();

    if is_night(context.resolved_hour()) {
        scores.insert(NIGHT_TIME.to_string(), 0.7);
        scores.insert(EMOTIONAL_VULNERABILITY.to_string(), 0.6);
    } else {
        scores.insert(DAY_TIME.to_string(), 0.7);
    }

    if ENTERTAINMENT_WORDS.iter().any(|w| lower.contains(w)) {
        scores.insert(ENTERTAINMENT_CONTEXT.to_string(), 0.8);
    }
    if PROBLEM_WORDS.iter().any(|w| lower.contains(w)) {
        scores.insert(PROBLEM_SOLVING_CONTEXT.to_string(), 0.9);
    }

    if last_primary == Some(Emotion::Sadness) {
        scores.insert(RECENT_SADNESS.to_string(), 0.6);
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_window() {
        for hour in [22, 23, 0, 3, 5] {
            assert!(is_night(hour), "hour {hour} should be night");
        }
        for hour in [6, 12, 18, 21] {
            assert!(!is_night(hour), "hour {hour} should be day");
        }
    }

    #[test]
    fn test_night_and_day_exclusive() {
        let night = evaluate_context("", &AnalysisContext::at_hour(23), None);
        assert_eq!(night.get(NIGHT_TIME), Some(&0.7));
        assert_eq!(night.get(EMOTIONAL_VULNERABILITY), Some(&0.6));
        assert!(!night.contains_key(DAY_TIME));

        let day = evaluate_context("", &AnalysisContext::at_hour(14), None);
        assert_eq!(day.get(DAY_TIME), Some(&0.7));
        assert!(!day.contains_key(NIGHT_TIME));
        assert!(!day.contains_key(EMOTIONAL_VULNERABILITY));
    }

    #[test]
    fn test_topical_context() {
        let scores = evaluate_context("müzik çalarken hata aldım", &AnalysisContext::at_hour(10), None);
        assert_eq!(scores.get(ENTERTAINMENT_CONTEXT), Some(&0.8));
        assert_eq!(scores.get(PROBLEM_SOLVING_CONTEXT), Some(&0.9));
    }

    #[test]
    fn test_recent_sadness() {
        let ctx = AnalysisContext::at_hour(10);
        let after_sad = evaluate_context("merhaba", &ctx, Some(Emotion::Sadness));
        assert_eq!(after_sad.get(RECENT_SADNESS), Some(&0.6));
        let after_joy = evaluate_context("merhaba", &ctx, Some(Emotion::Joy));
        assert!(!after_joy.contains_key(RECENT_SADNESS));
    }

    #[test]
    fn test_resolved_hour_wraps() {
        assert_eq!(AnalysisContext::at_hour(25).resolved_hour(), 1);
        assert!(AnalysisContext::default().resolved_hour() < 24);
    }
}
