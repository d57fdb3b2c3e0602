// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Multi-layer classification: lexicon scores weighted by linguistic and
//! situational factors, reduced to one [`EmotionalState`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::context::NIGHT_TIME;
use crate::emotion::{Emotion, EmotionScores, EmotionalState};
use crate::features::LinguisticFeatures;
use crate::semantics::SemanticFlags;

const LONG_TEXT_WORDS: usize = 10;
const LONG_TEXT_WEIGHT: f32 = 1.2;
const NEGATION_WEIGHT: f32 = 1.3;
const NIGHT_WEIGHT: f32 = 1.4;
const SECONDARY_THRESHOLD: f32 = 0.1;
const MAX_SECONDARY: usize = 3;
const INTENSITY_GAIN: f32 = 1.5;
const MAX_TRIGGERS: usize = 3;

/// Apply linguistic and context multipliers to every nonzero lexicon score.
pub fn weighted_scores(
    features: &LinguisticFeatures,
    lexical: &EmotionScores,
    context: &BTreeMap<String, f32>,
) -> EmotionScores {
    let night = context.get(NIGHT_TIME).copied().unwrap_or(0.0) > 0.5;
    let mut weighted = EmotionScores::new();

    for (emotion, score) in lexical.nonzero() {
        let mut linguistic = 1.0;
        if features.word_count > LONG_TEXT_WORDS {
            linguistic *= LONG_TEXT_WEIGHT;
        }
        if features.negations > 0 && emotion.is_negative() {
            linguistic *= NEGATION_WEIGHT;
        }

        let mut situational = 1.0;
        if night && matches!(emotion, Emotion::Sadness | Emotion::Fear) {
            situational *= NIGHT_WEIGHT;
        }

        weighted.set(emotion, score * linguistic * situational);
    }

    weighted
}

/// Confidence from the winning score, penalized by short text and irony.
pub fn calculate_confidence(features: &LinguisticFeatures, flags: &SemanticFlags, max_score: f32) -> f32 {
    let mut confidence = max_score;
    if features.word_count >= 5 {
        confidence *= 1.1;
    } else {
        confidence *= 0.7;
    }
    if flags.is_ironic() {
        confidence *= 0.6;
    }
    confidence.clamp(0.0, 1.0)
}

/// Classify one text. `None` means no lexical signal survived weighting;
/// the caller substitutes the neutral result.
pub fn classify(
    features: &LinguisticFeatures,
    flags: &SemanticFlags,
    lexical: &EmotionScores,
    context: &BTreeMap<String, f32>,
    timestamp: DateTime<Utc>,
) -> Option<EmotionalState> {
    let weighted = weighted_scores(features, lexical, context);
    let (primary, top) = weighted.dominant()?;

    let secondary_emotions = weighted
        .ranked()
        .into_iter()
        .skip(1)
        .take(MAX_SECONDARY)
        .filter(|&(e, s)| s > SECONDARY_THRESHOLD && e != primary)
        .map(|(e, _)| e)
        .collect();

    let triggers = features
        .emotional_words
        .iter()
        .take(MAX_TRIGGERS)
        .map(|(word, _)| word.clone())
        .collect();

    Some(EmotionalState {
        primary_emotion: primary,
        secondary_emotions,
        intensity: (top * INTENSITY_GAIN).min(1.0),
        confidence: calculate_confidence(features, flags, top),
        triggers,
        context_score: context.clone(),
        timestamp,
    })
}
