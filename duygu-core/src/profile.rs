// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Running per-user emotional profile. In-memory only.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::emotion::{Emotion, EmotionalState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// How often each emotion was the primary result.
    pub emotion_patterns: BTreeMap<Emotion, u32>,
    /// Primary emotions in the order they first appeared. Breaks count ties.
    pub first_seen: Vec<Emotion>,
    /// The last `intensity_window` intensities, oldest first.
    pub intensity_history: VecDeque<f32>,
    /// Mean of the last `intensity_window` intensities.
    pub avg_intensity: f32,
    /// Number of intensities averaged.
    pub intensity_window: usize,
}

impl UserProfile {
    pub fn new(intensity_window: usize) -> Self {
        Self {
            emotion_patterns: BTreeMap::new(),
            first_seen: Vec::new(),
            intensity_history: VecDeque::new(),
            avg_intensity: 0.0,
            intensity_window: intensity_window.max(1),
        }
    }

    pub fn update(&mut self, state: &EmotionalState) {
        *self.emotion_patterns.entry(state.primary_emotion).or_insert(0) += 1;
        if !self.first_seen.contains(&state.primary_emotion) {
            self.first_seen.push(state.primary_emotion);
        }

        if self.intensity_history.len() >= self.intensity_window.max(1) {
            self.intensity_history.pop_front();
        }
        self.intensity_history.push_back(state.intensity);
        self.avg_intensity = self.intensity_history.iter().sum::<f32>() / self.intensity_history.len() as f32;
    }

    /// Most frequent primary emotion so far; ties go to the one seen first.
    pub fn most_common(&self) -> Option<Emotion> {
        let mut best: Option<(Emotion, u32)> = None;
        for &emotion in &self.first_seen {
            let count = self.count(emotion);
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((emotion, count));
            }
        }
        best.map(|(e, _)| e)
    }

    pub fn count(&self, emotion: Emotion) -> u32 {
        self.emotion_patterns.get(&emotion).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.emotion_patterns.values().sum()
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new(10)
    }
}
