// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Closed emotion set, per-emotion score vectors, and the result of one
//! analysis pass.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of emotions in the closed set.
pub const EMOTION_COUNT: usize = 15;

/// The 15 emotion tags recognized by the analyzer.
///
/// Declaration order is significant: it is the iteration order of
/// [`Emotion::ALL`] and breaks exact score ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Neutral,
    Love,
    Gratitude,
    Pride,
    Shame,
    Envy,
    Hope,
    Relief,
    Disappointment,
}

impl Emotion {
    pub const ALL: [Emotion; EMOTION_COUNT] = [
        Self::Joy,
        Self::Sadness,
        Self::Anger,
        Self::Fear,
        Self::Surprise,
        Self::Disgust,
        Self::Neutral,
        Self::Love,
        Self::Gratitude,
        Self::Pride,
        Self::Shame,
        Self::Envy,
        Self::Hope,
        Self::Relief,
        Self::Disappointment,
    ];

    /// Position in [`Emotion::ALL`] and in [`EmotionScores`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical key used by lexicon entries and serialized output.
    pub fn key(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Disgust => "disgust",
            Self::Neutral => "neutral",
            Self::Love => "love",
            Self::Gratitude => "gratitude",
            Self::Pride => "pride",
            Self::Shame => "shame",
            Self::Envy => "envy",
            Self::Hope => "hope",
            Self::Relief => "relief",
            Self::Disappointment => "disappointment",
        }
    }

    /// Turkish label used in spoken replies.
    pub fn label(self) -> &'static str {
        match self {
            Self::Joy => "neşe",
            Self::Sadness => "üzüntü",
            Self::Anger => "öfke",
            Self::Fear => "korku",
            Self::Surprise => "şaşkınlık",
            Self::Disgust => "tiksinme",
            Self::Neutral => "nötr",
            Self::Love => "sevgi",
            Self::Gratitude => "minnettarlık",
            Self::Pride => "gurur",
            Self::Shame => "utanç",
            Self::Envy => "kıskançlık",
            Self::Hope => "umut",
            Self::Relief => "rahatlama",
            Self::Disappointment => "hayal kırıklığı",
        }
    }

    /// Strict lookup by canonical key or Turkish label.
    pub fn parse(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|e| e.key() == wanted || e.label() == wanted)
    }

    /// Lenient lookup: anything unrecognized degrades to `Neutral`.
    pub fn from_label(label: &str) -> Self {
        Self::parse(label).unwrap_or(Self::Neutral)
    }

    /// Emotions that negation reinforces and that trigger supportive replies.
    pub fn is_negative(self) -> bool {
        matches!(self, Self::Sadness | Self::Anger | Self::Fear)
    }
}

/// Per-emotion score vector indexed by [`Emotion::index`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionScores {
    pub values: [f32; EMOTION_COUNT],
}

impl EmotionScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, emotion: Emotion) -> f32 {
        self.values[emotion.index()]
    }

    pub fn set(&mut self, emotion: Emotion, value: f32) {
        self.values[emotion.index()] = value;
    }

    pub fn add(&mut self, emotion: Emotion, value: f32) {
        self.values[emotion.index()] += value;
    }

    pub fn total(&self) -> f32 {
        self.values.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// Divide every entry by the total. A zero vector stays zero.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total <= 0.0 {
            return Self::default();
        }
        let mut out = *self;
        for v in &mut out.values {
            *v /= total;
        }
        out
    }

    /// Nonzero entries in declaration order.
    pub fn nonzero(&self) -> impl Iterator<Item = (Emotion, f32)> + '_ {
        Emotion::ALL
            .into_iter()
            .map(|e| (e, self.get(e)))
            .filter(|(_, v)| *v != 0.0)
    }

    /// Highest-scoring emotion; exact ties go to the earlier variant.
    pub fn dominant(&self) -> Option<(Emotion, f32)> {
        let mut best: Option<(Emotion, f32)> = None;
        for (emotion, value) in self.nonzero() {
            match best {
                Some((_, b)) if value <= b => {}
                _ => best = Some((emotion, value)),
            }
        }
        best
    }

    /// Nonzero entries sorted by descending score, stable on declaration order.
    pub fn ranked(&self) -> Vec<(Emotion, f32)> {
        let mut ranked: Vec<(Emotion, f32)> = self.nonzero().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

/// Result of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    pub primary_emotion: Emotion,
    /// Up to three runner-up emotions, strongest first.
    pub secondary_emotions: Vec<Emotion>,
    /// Strength of the primary emotion [0, 1].
    pub intensity: f32,
    /// Certainty of the classification [0, 1].
    pub confidence: f32,
    /// Surface words that drove the classification (at most three).
    pub triggers: Vec<String>,
    /// Situational tags and their weights.
    pub context_score: BTreeMap<String, f32>,
    pub timestamp: DateTime<Utc>,
}

impl EmotionalState {
    /// The no-signal result: neutral, faint, middling confidence.
    pub fn neutral(context_score: BTreeMap<String, f32>, timestamp: DateTime<Utc>) -> Self {
        Self {
            primary_emotion: Emotion::Neutral,
            secondary_emotions: Vec::new(),
            intensity: 0.1,
            confidence: 0.5,
            triggers: Vec::new(),
            context_score,
            timestamp,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.primary_emotion.is_negative()
    }

    /// Clamp intensity and confidence back into [0, 1].
    pub fn clamp(&mut self) {
        self.intensity = self.intensity.clamp(0.0, 1.0);
        self.confidence = self.confidence.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_indices() {
        for (i, e) in Emotion::ALL.iter().enumerate() {
            assert_eq!(e.index(), i);
        }
    }

    #[test]
    fn test_parse_key_and_label() {
        assert_eq!(Emotion::parse("joy"), Some(Emotion::Joy));
        assert_eq!(Emotion::parse("Gratitude"), Some(Emotion::Gratitude));
        assert_eq!(Emotion::parse("hayal kırıklığı"), Some(Emotion::Disappointment));
        assert_eq!(Emotion::parse("melancholy"), None);
    }

    #[test]
    fn test_unknown_label_degrades_to_neutral() {
        assert_eq!(Emotion::from_label("ennui"), Emotion::Neutral);
        assert_eq!(Emotion::from_label(""), Emotion::Neutral);
        assert_eq!(Emotion::from_label("fear"), Emotion::Fear);
    }

    #[test]
    fn test_negative_valence_set() {
        let negatives: Vec<Emotion> = Emotion::ALL.into_iter().filter(|e| e.is_negative()).collect();
        assert_eq!(negatives, vec![Emotion::Sadness, Emotion::Anger, Emotion::Fear]);
    }

    #[test]
    fn test_serde_uses_canonical_key() {
        let json = serde_json::to_string(&Emotion::Disappointment).unwrap();
        assert_eq!(json, "\"disappointment\"");
        let back: Emotion = serde_json::from_str("\"gratitude\"").unwrap();
        assert_eq!(back, Emotion::Gratitude);
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let mut scores = EmotionScores::new();
        scores.add(Emotion::Joy, 0.9);
        scores.add(Emotion::Love, 0.3);
        scores.add(Emotion::Joy, 0.8);
        let norm = scores.normalized();
        assert!((norm.total() - 1.0).abs() < 1e-6);
        assert!((norm.get(Emotion::Joy) - 1.7 / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_zero_stays_zero() {
        let norm = EmotionScores::new().normalized();
        assert!(norm.is_zero());
    }

    #[test]
    fn test_dominant_tie_goes_to_declaration_order() {
        let mut scores = EmotionScores::new();
        scores.set(Emotion::Hope, 0.5);
        scores.set(Emotion::Fear, 0.5);
        assert_eq!(scores.dominant().map(|d| d.0), Some(Emotion::Fear));
        assert!(EmotionScores::new().dominant().is_none());
    }

    #[test]
    fn test_ranked_descending() {
        let mut scores = EmotionScores::new();
        scores.set(Emotion::Love, 0.1);
        scores.set(Emotion::Joy, 0.6);
        scores.set(Emotion::Gratitude, 0.3);
        let order: Vec<Emotion> = scores.ranked().into_iter().map(|r| r.0).collect();
        assert_eq!(order, vec![Emotion::Joy, Emotion::Gratitude, Emotion::Love]);
    }

    #[test]
    fn test_state_clamp() {
        let mut state = EmotionalState::neutral(BTreeMap::new(), Utc::now());
        state.intensity = 1.7;
        state.confidence = -0.2;
        state.clamp();
        assert_eq!(state.intensity, 1.0);
        assert_eq!(state.confidence, 0.0);
    }
}
