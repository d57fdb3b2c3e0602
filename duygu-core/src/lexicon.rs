// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Turkish emotion lexicon: word stems mapped to emotion weights.
//!
//! Matching is substring-based on lowercased text, so a stem like "mutlu"
//! also fires on "mutluyum" and "mutluluk". Weights are not probabilities;
//! multiple hits reinforce the same emotion additively and the sum is
//! normalized afterwards.

use serde::Serialize;
use tracing::warn;

use crate::emotion::{Emotion, EmotionScores};

/// Raw table: stem → (emotion key, weight) pairs.
const TURKISH_ENTRIES: &[(&str, &[(&str, f32)])] = &[
    // Joy
    ("mutlu", &[("joy", 0.9), ("love", 0.3)]),
    ("sevinç", &[("joy", 0.95), ("surprise", 0.2)]),
    ("neşe", &[("joy", 0.85)]),
    ("harika", &[("joy", 0.8), ("pride", 0.4)]),
    ("mükemmel", &[("joy", 0.7), ("gratitude", 0.3)]),
    ("iyi", &[("joy", 0.6)]),
    ("güzel", &[("joy", 0.5)]),
    ("süper", &[("joy", 0.7)]),
    ("gül", &[("joy", 0.8)]),
    // Sadness
    ("üzgün", &[("sadness", 0.9), ("disappointment", 0.4)]),
    ("keder", &[("sadness", 0.95), ("fear", 0.2)]),
    ("hüzün", &[("sadness", 0.85)]),
    ("kırgın", &[("sadness", 0.7), ("anger", 0.3)]),
    ("yalnız", &[("sadness", 0.8), ("fear", 0.3)]),
    ("kötü", &[("sadness", 0.6), ("disappointment", 0.3)]),
    ("berbat", &[("sadness", 0.7), ("anger", 0.4)]),
    ("ağla", &[("sadness", 0.9)]),
    // Anger
    ("kızgın", &[("anger", 0.9), ("disgust", 0.3)]),
    ("sinir", &[("anger", 0.85)]),
    ("öfke", &[("anger", 0.95)]),
    ("hırs", &[("anger", 0.6), ("pride", 0.4)]),
    ("küfür", &[("anger", 0.8)]),
    ("sinirlen", &[("anger", 0.7)]),
    // Fear
    ("korku", &[("fear", 0.95)]),
    ("endişe", &[("fear", 0.8), ("sadness", 0.3)]),
    ("panik", &[("fear", 0.9), ("surprise", 0.4)]),
    ("tedirgin", &[("fear", 0.7)]),
    ("kork", &[("fear", 0.8)]),
    // Love
    ("sevgi", &[("love", 0.95), ("joy", 0.5)]),
    ("aşk", &[("love", 0.98), ("joy", 0.6)]),
    ("değer", &[("love", 0.7), ("gratitude", 0.4)]),
    ("seviyorum", &[("love", 0.9)]),
    ("aşığım", &[("love", 0.95)]),
    // Gratitude
    ("teşekkür", &[("gratitude", 0.9), ("joy", 0.4)]),
    ("minnettar", &[("gratitude", 0.85)]),
    ("sağ ol", &[("gratitude", 0.7)]),
    ("eyvallah", &[("gratitude", 0.6)]),
    // Pride
    ("gurur", &[("pride", 0.9), ("joy", 0.4)]),
    ("başarı", &[("pride", 0.85), ("joy", 0.5)]),
    ("başardım", &[("pride", 0.8)]),
    ("kazandım", &[("pride", 0.7)]),
    // Hope
    ("umut", &[("hope", 0.9), ("joy", 0.3)]),
    ("gelecek", &[("hope", 0.7), ("fear", 0.2)]),
    ("inşallah", &[("hope", 0.6)]),
    ("beklenti", &[("hope", 0.5)]),
    // Surprise
    ("şaşkın", &[("surprise", 0.8)]),
    ("vay", &[("surprise", 0.7)]),
    ("oha", &[("surprise", 0.9)]),
    ("inanılmaz", &[("surprise", 0.6), ("joy", 0.4)]),
    // Disgust
    ("tiksin", &[("disgust", 0.8)]),
    ("iğrenç", &[("disgust", 0.9)]),
    ("pis", &[("disgust", 0.7)]),
    // Disappointment
    ("hayal kırıklığı", &[("disappointment", 0.9)]),
    ("hayalkırıklığı", &[("disappointment", 0.9)]),
    ("keşke", &[("disappointment", 0.7), ("sadness", 0.4)]),
];

/// One resolved lexicon entry.
#[derive(Debug, Clone, Serialize)]
pub struct LexiconEntry {
    pub stem: String,
    pub weights: Vec<(Emotion, f32)>,
}

/// Static word → emotion-weight table. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// The built-in Turkish lexicon.
    pub fn turkish() -> Self {
        Self::from_entries(TURKISH_ENTRIES.iter().map(|(stem, weights)| {
            (stem.to_string(), weights.iter().map(|(k, w)| (k.to_string(), *w)).collect())
        }))
    }

    /// Build from raw (stem, [(emotion key, weight)]) pairs.
    ///
    /// Weights naming an emotion outside the closed set, or outside (0, 1],
    /// are skipped with a warning; the rest of the entry is kept.
    pub fn from_entries<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<(String, f32)>)>,
    {
        let mut entries = Vec::new();
        for (stem, weights) in raw {
            let stem = stem.to_lowercase();
            let mut resolved = Vec::with_capacity(weights.len());
            for (key, weight) in weights {
                let Some(emotion) = Emotion::parse(&key) else {
                    warn!(stem = %stem, key = %key, "lexicon weight names unknown emotion, skipped");
                    continue;
                };
                if !(weight > 0.0 && weight <= 1.0) {
                    warn!(stem = %stem, weight, "lexicon weight outside (0, 1], skipped");
                    continue;
                }
                resolved.push((emotion, weight));
            }
            if stem.is_empty() || resolved.is_empty() {
                continue;
            }
            entries.push(LexiconEntry {
                stem,
                weights: resolved,
            });
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Accumulate weights of every stem found in `text`, then normalize.
    ///
    /// Returns an all-zero vector when nothing matched.
    pub fn score(&self, text: &str) -> EmotionScores {
        let lower = text.to_lowercase();
        let mut scores = EmotionScores::new();
        for entry in &self.entries {
            if lower.contains(&entry.stem) {
                for &(emotion, weight) in &entry.weights {
                    scores.add(emotion, weight);
                }
            }
        }
        scores.normalized()
    }

    /// Token-level matches: one `(token, emotion)` pair per emotion of every
    /// stem contained in a whitespace token. Not deduplicated.
    pub fn emotional_words(&self, text: &str) -> Vec<(String, Emotion)> {
        let lower = text.to_lowercase();
        let mut found = Vec::new();
        for token in lower.split_whitespace() {
            for entry in &self.entries {
                if token.contains(&entry.stem) {
                    for &(emotion, _) in &entry.weights {
                        found.push((token.to_string(), emotion));
                    }
                }
            }
        }
        found
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::turkish()
    }
}
