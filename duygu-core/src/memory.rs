// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Conversation memory: a bounded FIFO of what was said, how it felt, and
//! what it was about.
//!
//! Every analysis is recorded. When the buffer is full the oldest entry is
//! evicted, so the memory always holds the most recent `capacity` turns in
//! arrival order.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::emotion::{Emotion, EmotionalState};
use crate::features::Topic;

/// Configuration for the conversation memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Maximum number of entries before the oldest is evicted.
    pub capacity: usize,
    /// Stored text is truncated to this many characters.
    pub snippet_chars: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            snippet_chars: 200,
        }
    }
}

/// One remembered turn of conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// Leading characters of the analyzed text.
    pub text: String,
    pub emotion: Emotion,
    pub intensity: f32,
    pub timestamp: DateTime<Utc>,
    /// Up to three topic categories detected in the text.
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone)]
pub struct ConversationMemory {
    entries: VecDeque<ConversationEntry>,
    config: MemoryConfig,
}

impl ConversationMemory {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(config.capacity),
            config,
        }
    }

    /// Record one analyzed turn, evicting the oldest entries past capacity.
    pub fn record(&mut self, text: &str, state: &EmotionalState, topics: Vec<Topic>) {
        let snippet: String = text.chars().take(self.config.snippet_chars).collect();
        self.entries.push_back(ConversationEntry {
            text: snippet,
            emotion: state.primary_emotion,
            intensity: state.intensity,
            timestamp: state.timestamp,
            topics,
        });
        while self.entries.len() > self.config.capacity {
            self.entries.pop_front();
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &ConversationEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ConversationEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    pub fn get(&self, index: usize) -> Option<&ConversationEntry> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&ConversationEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Entries tagged with `topic`, most recent first.
    pub fn recall_by_topic(&self, topic: Topic, top_k: usize) -> Vec<&ConversationEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.topics.contains(&topic))
            .take(top_k)
            .collect()
    }

    /// Entries whose primary emotion was `emotion`, most intense first.
    pub fn recall_by_emotion(&self, emotion: Emotion, top_k: usize) -> Vec<&ConversationEntry> {
        let mut matches: Vec<&ConversationEntry> = self.entries.iter().filter(|e| e.emotion == emotion).collect();
        matches.sort_by(|a, b| b.intensity.partial_cmp(&a.intensity).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(top_k);
        matches
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> MemoryStats {
        let count = self.entries.len();
        let average_intensity = if count > 0 {
            self.entries.iter().map(|e| e.intensity).sum::<f32>() / count as f32
        } else {
            0.0
        };
        MemoryStats {
            total_entries: count,
            capacity: self.config.capacity,
            average_intensity,
            negative_entries: self.entries.iter().filter(|e| e.emotion.is_negative()).count(),
            oldest: self.entries.front().map(|e| e.timestamp),
            newest: self.entries.back().map(|e| e.timestamp),
        }
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

/// Statistics about the conversation memory.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryStats {
    pub total_entries: usize,
    pub capacity: usize,
    pub average_intensity: f32,
    pub negative_entries: usize,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn state(emotion: Emotion, intensity: f32) -> EmotionalState {
        EmotionalState {
            primary_emotion: emotion,
            intensity,
            ..EmotionalState::neutral(BTreeMap::new(), Utc::now())
        }
    }

    #[test]
    fn test_fifo_eviction() {
        let mut mem = ConversationMemory::new(MemoryConfig {
            capacity: 3,
            ..MemoryConfig::default()
        });
        for i in 0..5 {
            mem.record(&format!("mesaj {i}"), &state(Emotion::Neutral, 0.1), vec![]);
        }
        assert_eq!(mem.len(), 3);
        let texts: Vec<&str> = mem.entries().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["mesaj 2", "mesaj 3", "mesaj 4"]);
    }

    #[test]
    fn test_snippet_truncated_by_chars() {
        let mut mem = ConversationMemory::default();
        let long = "ş".repeat(300);
        mem.record(&long, &state(Emotion::Joy, 0.5), vec![]);
        let stored = &mem.latest().unwrap().text;
        assert_eq!(stored.chars().count(), 200);
    }

    #[test]
    fn test_recent() {
        let mut mem = ConversationMemory::default();
        for i in 0..4 {
            mem.record(&i.to_string(), &state(Emotion::Joy, 0.5), vec![]);
        }
        let last_two: Vec<&str> = mem.recent(2).map(|e| e.text.as_str()).collect();
        assert_eq!(last_two, vec!["2", "3"]);
        assert_eq!(mem.recent(10).count(), 4);
    }

    #[test]
    fn test_recall_by_topic_and_emotion() {
        let mut mem = ConversationMemory::default();
        mem.record("a", &state(Emotion::Sadness, 0.3), vec![Topic::Music]);
        mem.record("b", &state(Emotion::Sadness, 0.9), vec![Topic::Film]);
        mem.record("c", &state(Emotion::Joy, 0.5), vec![Topic::Music, Topic::Film]);

        let music: Vec<&str> = mem.recall_by_topic(Topic::Music, 5).iter().map(|e| e.text.as_str()).collect();
        assert_eq!(music, vec!["c", "a"]);

        let sad = mem.recall_by_emotion(Emotion::Sadness, 1);
        assert_eq!(sad.len(), 1);
        assert_eq!(sad[0].text, "b");
    }

    #[test]
    fn test_stats() {
        let mut mem = ConversationMemory::default();
        assert_eq!(mem.stats().total_entries, 0);
        assert!(mem.stats().oldest.is_none());
        mem.record("a", &state(Emotion::Fear, 0.4), vec![]);
        mem.record("b", &state(Emotion::Joy, 0.8), vec![]);
        let stats = mem.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.capacity, 50);
        assert_eq!(stats.negative_entries, 1);
        assert!((stats.average_intensity - 0.6).abs() < 1e-6);
    }
}
