// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Read-only summaries over analysis history and conversation memory.

use std::collections::BTreeMap;

use chrono::Local;
use serde::Serialize;

use crate::emotion::{Emotion, EmotionalState};
use crate::features::Topic;
use crate::memory::ConversationMemory;
use crate::profile::UserProfile;
use crate::tally::by_frequency;

/// Entries considered by the "recent" parts of both summaries.
pub const RECENT_WINDOW: usize = 10;
const STABILITY_WINDOW: usize = 5;
const STABILITY_MIN_HISTORY: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub total_conversations: usize,
    /// Top three topics of the recent window with their counts.
    pub recent_topics: Vec<(Topic, usize)>,
    /// Top three primary emotions of the recent window with their counts.
    pub recent_emotions: Vec<(Emotion, usize)>,
    pub questions_asked: u32,
    /// One level per ten remembered turns.
    pub conversation_depth: usize,
}

impl ConversationSummary {
    /// `None` when nothing has been remembered yet.
    pub fn build(memory: &ConversationMemory, questions_asked: u32) -> Option<Self> {
        if memory.is_empty() {
            return None;
        }
        let topics = memory.recent(RECENT_WINDOW).flat_map(|e| e.topics.iter().copied());
        let emotions = memory.recent(RECENT_WINDOW).map(|e| e.emotion);

        let mut recent_topics = by_frequency(topics);
        recent_topics.truncate(3);
        let mut recent_emotions = by_frequency(emotions);
        recent_emotions.truncate(3);

        Some(Self {
            total_conversations: memory.len(),
            recent_topics,
            recent_emotions,
            questions_asked,
            conversation_depth: memory.len() / 10,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentEmotion {
    pub emotion: Emotion,
    pub intensity: f32,
    /// Local wall-clock time, `HH:MM:SS`.
    pub time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmotionSummary {
    pub total_analyses: usize,
    pub recent_emotions: Vec<RecentEmotion>,
    pub most_common_emotion: Emotion,
    pub emotion_patterns: BTreeMap<Emotion, u32>,
    pub avg_intensity: f32,
    pub stability: f32,
}

impl EmotionSummary {
    /// `None` when no analysis has been run yet. Totals and the most common
    /// emotion come from the profile, which counts every analysis; `history`
    /// only needs to cover the recent window.
    pub fn build(history: &[EmotionalState], profile: &UserProfile) -> Option<Self> {
        let most_common_emotion = profile.most_common()?;
        let start = history.len().saturating_sub(RECENT_WINDOW);
        let recent_emotions = history[start..]
            .iter()
            .map(|s| RecentEmotion {
                emotion: s.primary_emotion,
                intensity: s.intensity,
                time: s.timestamp.with_timezone(&Local).format("%H:%M:%S").to_string(),
            })
            .collect();

        Some(Self {
            total_analyses: profile.total() as usize,
            recent_emotions,
            most_common_emotion,
            emotion_patterns: profile.emotion_patterns.clone(),
            avg_intensity: profile.avg_intensity,
            stability: emotional_stability(history),
        })
    }
}

/// Share of unchanged transitions among the last five primaries.
/// Histories shorter than three score a neutral 0.5.
pub fn emotional_stability(history: &[EmotionalState]) -> f32 {
    if history.len() < STABILITY_MIN_HISTORY {
        return 0.5;
    }
    let start = history.len().saturating_sub(STABILITY_WINDOW);
    let recent = &history[start..];
    let changes = recent
        .windows(2)
        .filter(|w| w[0].primary_emotion != w[1].primary_emotion)
        .count();
    1.0 - changes as f32 / (recent.len() - 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn state(emotion: Emotion) -> EmotionalState {
        EmotionalState {
            primary_emotion: emotion,
            intensity: 0.5,
            ..EmotionalState::neutral(BTreeMap::new(), Utc::now())
        }
    }

    fn history(emotions: &[Emotion]) -> Vec<EmotionalState> {
        emotions.iter().copied().map(state).collect()
    }

    #[test]
    fn test_stability_short_history() {
        assert_eq!(emotional_stability(&[]), 0.5);
        assert_eq!(emotional_stability(&history(&[Emotion::Joy, Emotion::Fear])), 0.5);
    }

    #[test]
    fn test_stability_extremes() {
        assert_eq!(emotional_stability(&history(&[Emotion::Joy; 5])), 1.0);
        let alternating = [Emotion::Joy, Emotion::Sadness, Emotion::Joy, Emotion::Sadness, Emotion::Joy];
        assert_eq!(emotional_stability(&history(&alternating)), 0.0);
    }

    #[test]
    fn test_stability_uses_last_five() {
        let mut emotions = vec![Emotion::Fear, Emotion::Joy, Emotion::Fear];
        emotions.extend([Emotion::Hope; 5]);
        assert_eq!(emotional_stability(&history(&emotions)), 1.0);
        // three entries, one change out of two transitions
        let three = history(&[Emotion::Joy, Emotion::Joy, Emotion::Fear]);
        assert!((emotional_stability(&three) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_emotion_summary_empty_is_none() {
        assert!(EmotionSummary::build(&[], &UserProfile::default()).is_none());
    }

    #[test]
    fn test_emotion_summary() {
        let mut profile = UserProfile::default();
        let mut emotions = vec![Emotion::Fear, Emotion::Joy, Emotion::Joy];
        emotions.extend([Emotion::Hope; 9]);
        let h = history(&emotions);
        for s in &h {
            profile.update(s);
        }
        let summary = EmotionSummary::build(&h, &profile).unwrap();
        assert_eq!(summary.total_analyses, 12);
        assert_eq!(summary.recent_emotions.len(), 10);
        assert_eq!(summary.recent_emotions[0].emotion, Emotion::Joy);
        assert_eq!(summary.recent_emotions[0].time.len(), 8);
        assert_eq!(summary.most_common_emotion, Emotion::Hope);
        assert_eq!(summary.emotion_patterns.get(&Emotion::Joy), Some(&2));
        assert!((summary.avg_intensity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_most_common_tie_goes_to_first_seen() {
        let h = history(&[Emotion::Sadness, Emotion::Joy, Emotion::Joy, Emotion::Sadness]);
        let mut profile = UserProfile::default();
        for s in &h {
            profile.update(s);
        }
        let summary = EmotionSummary::build(&h, &profile).unwrap();
        assert_eq!(summary.most_common_emotion, Emotion::Sadness);
    }

    #[test]
    fn test_emotion_summary_counts_beyond_trimmed_history() {
        let mut profile = UserProfile::default();
        let mut emotions = vec![Emotion::Fear; 20];
        emotions.extend([Emotion::Joy; 10]);
        let h = history(&emotions);
        for s in &h {
            profile.update(s);
        }
        // only the recent window is still held
        let summary = EmotionSummary::build(&h[20..], &profile).unwrap();
        assert_eq!(summary.total_analyses, 30);
        assert_eq!(summary.most_common_emotion, Emotion::Fear);
        assert!(summary.recent_emotions.iter().all(|r| r.emotion == Emotion::Joy));
    }

    #[test]
    fn test_conversation_summary() {
        let mut memory = ConversationMemory::default();
        assert!(ConversationSummary::build(&memory, 0).is_none());

        for i in 0..12 {
            let topics = if i % 2 == 0 { vec![Topic::Music] } else { vec![Topic::Film, Topic::Music] };
            let emotion = if i < 4 { Emotion::Fear } else { Emotion::Joy };
            memory.record("metin", &state(emotion), topics);
        }
        let summary = ConversationSummary::build(&memory, 3).unwrap();
        assert_eq!(summary.total_conversations, 12);
        assert_eq!(summary.recent_topics, vec![(Topic::Music, 10), (Topic::Film, 5)]);
        // entries 2..12: two fear, eight joy
        assert_eq!(summary.recent_emotions, vec![(Emotion::Joy, 8), (Emotion::Fear, 2)]);
        assert_eq!(summary.questions_asked, 3);
        assert_eq!(summary.conversation_depth, 1);
    }
}
