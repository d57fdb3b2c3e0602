// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Linguistic feature extractors. Every function here is a pure function of
//! its input text.

use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;
use crate::lexicon::Lexicon;

const NEGATION_MARKERS: &[&str] = &["değil", "yok", "hayır", "olmaz", "olmamış", "olmamalı", "değil mi"];

const INTENSIFIERS: &[&str] = &[
    "çok",
    "aşırı",
    "fazla",
    "çokça",
    "son derece",
    "feci",
    "müthiş",
    "inanılmaz",
    "harika",
];

const EMOTIONAL_OPENERS: &[&str] = &["keşke", "keşki", "ah", "vah", "off", "eyvah", "aman", "lütfen"];

/// Tokens per clause at which sentence complexity saturates.
const COMPLEXITY_CAP: f32 = 20.0;

/// Conversation topic categories, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Technology,
    Music,
    Film,
    Sports,
    Education,
    Personal,
    DailyLife,
}

impl Topic {
    pub const ALL: [Topic; 7] = [
        Self::Technology,
        Self::Music,
        Self::Film,
        Self::Sports,
        Self::Education,
        Self::Personal,
        Self::DailyLife,
    ];

    /// Turkish name used in spoken replies.
    pub fn label(self) -> &'static str {
        match self {
            Self::Technology => "teknoloji",
            Self::Music => "müzik",
            Self::Film => "film",
            Self::Sports => "spor",
            Self::Education => "eğitim",
            Self::Personal => "kişisel",
            Self::DailyLife => "günlük",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Technology => &["bilgisayar", "telefon", "yazılım", "internet", "wifi", "teknoloji"],
            Self::Music => &["şarkı", "müzik", "albüm", "sanatçı", "çal", "dinle"],
            Self::Film => &["film", "dizi", "netflix", "youtube", "izle", "video"],
            Self::Sports => &["spor", "futbol", "maç", "takım", "oyun"],
            Self::Education => &["öğren", "okul", "ders", "çalış", "kitap"],
            Self::Personal => &["aile", "arkadaş", "sevgi", "duygu", "mutlu", "üzgün"],
            Self::DailyLife => &["yemek", "uyku", "alışveriş", "plan", "program"],
        }
    }
}

/// Counts of emphasis punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PunctuationPattern {
    pub exclamation: usize,
    pub question: usize,
    pub ellipsis: usize,
    pub period: usize,
}

/// Share of shouted (all-caps) words.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CapitalizationPattern {
    pub capital_ratio: f32,
    pub has_all_caps: bool,
}

/// Every linguistic feature of one text, extracted in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinguisticFeatures {
    pub word_count: usize,
    pub sentence_complexity: f32,
    pub emotional_words: Vec<(String, Emotion)>,
    pub negations: usize,
    pub intensifiers: Vec<&'static str>,
    pub punctuation: PunctuationPattern,
    pub capitalization: CapitalizationPattern,
    pub word_order_emotionality: f32,
}

impl LinguisticFeatures {
    pub fn extract(text: &str, lexicon: &Lexicon) -> Self {
        Self {
            word_count: text.split_whitespace().count(),
            sentence_complexity: sentence_complexity(text),
            emotional_words: lexicon.emotional_words(text),
            negations: count_negations(text),
            intensifiers: find_intensifiers(text),
            punctuation: punctuation(text),
            capitalization: capitalization(text),
            word_order_emotionality: word_order_emotionality(text),
        }
    }
}

/// Total occurrences of negation markers. Overlapping markers ("değil" inside
/// "değil mi") each count.
pub fn count_negations(text: &str) -> usize {
    let lower = text.to_lowercase();
    NEGATION_MARKERS.iter().map(|m| lower.matches(m).count()).sum()
}

/// Degree adverbs present in the text, in list order. Presence only.
pub fn find_intensifiers(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    INTENSIFIERS.iter().copied().filter(|i| lower.contains(i)).collect()
}

pub fn punctuation(text: &str) -> PunctuationPattern {
    PunctuationPattern {
        exclamation: text.matches('!').count(),
        question: text.matches('?').count(),
        ellipsis: text.matches("...").count(),
        period: text.matches('.').count(),
    }
}

pub fn capitalization(text: &str) -> CapitalizationPattern {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return CapitalizationPattern::default();
    }
    let caps = words.iter().filter(|w| is_all_caps(w)).count();
    CapitalizationPattern {
        capital_ratio: caps as f32 / words.len() as f32,
        has_all_caps: caps > 0,
    }
}

/// At least one cased letter and no lowercase letters.
fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// 0.8 when the text opens with an emotionally loaded word, otherwise 0.3.
pub fn word_order_emotionality(text: &str) -> f32 {
    let lower = text.to_lowercase();
    match lower.split_whitespace().next() {
        Some(first) if EMOTIONAL_OPENERS.contains(&first) => 0.8,
        _ => 0.3,
    }
}

/// Average tokens per period-delimited clause, scaled to [0, 1].
pub fn sentence_complexity(text: &str) -> f32 {
    let clauses: Vec<&str> = text.split('.').map(str::trim).filter(|s| !s.is_empty()).collect();
    if clauses.is_empty() {
        return 0.0;
    }
    let tokens: usize = clauses.iter().map(|c| c.split_whitespace().count()).sum();
    let avg = tokens as f32 / clauses.len() as f32;
    (avg / COMPLEXITY_CAP).min(1.0)
}

/// Up to three topics whose keywords occur in the text, in category order.
pub fn extract_topics(text: &str) -> Vec<Topic> {
    let lower = text.to_lowercase();
    Topic::ALL
        .into_iter()
        .filter(|t| t.keywords().iter().any(|k| lower.contains(k)))
        .take(3)
        .collect()
}
