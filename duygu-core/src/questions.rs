// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Follow-up questions and reflective remarks.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::emotion::EmotionalState;
use crate::features::Topic;
use crate::memory::ConversationMemory;
use crate::tally::most_common;

pub const OPENING_QUESTIONS: &[&str] = &[
    "Size nasıl yardımcı olabilirim?",
    "Bugün nasılsınız?",
    "Merak ettiğiniz bir konu var mı?",
    "Sohbet etmek istediğiniz bir şey var mı?",
    "Size ne hakkında soru sormamı istersiniz?",
];

/// Memory must hold more than this many entries before reflecting on it.
const REFLECTION_MIN_MEMORY: usize = 5;
const REFLECTION_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    DeepThinking,
    Emotional,
    Curiosity,
    Reflective,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [Self::DeepThinking, Self::Emotional, Self::Curiosity, Self::Reflective];

    pub fn templates(self) -> &'static [&'static str] {
        match self {
            Self::DeepThinking => &[
                "Bu konu hakkında ne düşünüyorsunuz?",
                "Bana bu konuda daha fazla anlatır mısınız?",
                "Bu size nasıl hissettiriyor?",
                "Bu konuda merak ettiğiniz başka bir şey var mı?",
                "Bu fikrinizi neyin etkilediğini düşünüyorsunuz?",
            ],
            Self::Emotional => &[
                "Bu konuda nasıl hissediyorsunuz?",
                "Bu duygu size ne düşündürüyor?",
                "Bu hissin arkasında ne yatıyor?",
                "Bu duyguyla nasıl başa çıkıyorsunuz?",
                "Bu konuda konuşmak size iyi gelir mi?",
            ],
            Self::Curiosity => &[
                "Bunu nasıl keşfettiniz?",
                "Bu konuda daha fazla bilgi edinmek ister misiniz?",
                "Size bunun hakkında ne ilginç geliyor?",
                "Bu konuda başka neler merak ediyorsunuz?",
                "Bana bu konuda bir şey öğretir misiniz?",
            ],
            Self::Reflective => &[
                "Daha önce buna benzer bir durum yaşadınız mı?",
                "Bu deneyim size ne öğretti?",
                "Bu konu hakkındaki görüşleriniz zamanla değişti mi?",
                "Bu size neyin önemli olduğunu hatırlattı?",
                "Bundan ne sonuç çıkarıyorsunuz?",
            ],
        }
    }

    /// Pick the kind of question that fits the analyzed text. Checked in
    /// order: negative feeling, explicit question, known topic, otherwise
    /// reflective.
    pub fn select(state: &EmotionalState, text: &str, topics: &[Topic]) -> Self {
        if state.is_negative() {
            Self::Emotional
        } else if text.contains('?') {
            Self::Curiosity
        } else if !topics.is_empty() {
            Self::DeepThinking
        } else {
            Self::Reflective
        }
    }
}

fn pick<R: Rng + ?Sized>(options: &'static [&'static str], rng: &mut R) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}

pub fn create_question<R: Rng + ?Sized>(kind: QuestionKind, rng: &mut R) -> String {
    pick(kind.templates(), rng)
}

pub fn opening_question<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(OPENING_QUESTIONS, rng)
}

/// A remark about the topic that dominated the last few turns. `None` until
/// enough has been said, or when none of it had a topic.
pub fn reflective_response<R: Rng + ?Sized>(memory: &ConversationMemory, rng: &mut R) -> Option<String> {
    if memory.len() <= REFLECTION_MIN_MEMORY {
        return None;
    }
    let topics = memory.recent(REFLECTION_WINDOW).flat_map(|e| e.topics.iter().copied());
    let (topic, _) = most_common(topics)?;
    let t = topic.label();
    let reflections = [
        format!("Son zamanlarda {t} hakkında çok konuşuyoruz."),
        format!("{t} konusu size önemli görünüyor."),
        format!("{t} hakkında konuşmak bana ilginç geliyor."),
    ];
    reflections.choose(rng).cloned()
}
