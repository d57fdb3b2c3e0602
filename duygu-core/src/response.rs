// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Spoken replies keyed by primary emotion.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::emotion::{Emotion, EmotionalState};

const FALLBACK: &str = "Anlıyorum.";
const STRONG_SUFFIX: &str = " Bu duygu çok güçlü görünüyor.";
const FAINT_SUFFIX: &str = " Bu duygu hafif görünüyor.";

/// Reply templates for `emotion`. Emotions without their own set get the
/// single fallback line.
pub fn templates(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Joy => &[
            "Neşeni hissediyorum, bu çok güzel!",
            "Mutluluğun bulaşıcı, seninle aynı enerjiyi paylaşmak harika!",
            "Bu neşe dolu anı paylaştığın için teşekkürler!",
        ],
        Emotion::Sadness => &[
            "Üzgün olduğunu hissediyorum. Yanındayım, istersen konuşabiliriz.",
            "Bu duyguyu anlıyorum. Bazen her şey zor gelebilir.",
            "Senin için buradayım. Bu duygu geçecek, birlikte atlatacağız.",
        ],
        Emotion::Anger => &[
            "Öfkeni anlıyorum. Sakin nefes al, yanındayım.",
            "Bu durumda öfkelenmek normal. Duygularını ifade etmek önemli.",
            "Öfkeni dinliyorum. Birlikte çözüm bulabiliriz.",
        ],
        Emotion::Fear => &[
            "Korkunu hissediyorum. Güvendesin, yanındayım.",
            "Endişelenme, bu duygu geçecek. Seninleyim.",
            "Korkuların normal, birlikte üstesinden geleceğiz.",
        ],
        Emotion::Love => &[
            "Sevgi dolu olduğunu hissediyorum, bu çok değerli!",
            "Sevginin enerjisi harika! Bunu paylaştığın için teşekkürler.",
            "Sevgi dolu anlar hayatın en güzel yanı.",
        ],
        Emotion::Gratitude => &[
            "Minnettarlığın çok değerli. Sen de çok değerlisin.",
            "Minnettarlık duygusu harika! Ben de sana minnettarım.",
            "Bu minnettarlık hissi çok güzel, teşekkür ederim.",
        ],
        Emotion::Neutral => &["Anlıyorum.", "Tamam.", "Peki."],
        _ => &[FALLBACK],
    }
}

/// Compose a reply: a template for the primary emotion, an intensity remark,
/// and a note on up to two secondary emotions when the feeling is strong.
pub fn generate_response<R: Rng + ?Sized>(state: &EmotionalState, rng: &mut R) -> String {
    let mut response = templates(state.primary_emotion)
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK)
        .to_string();

    if state.intensity > 0.8 {
        response.push_str(STRONG_SUFFIX);
    } else if state.intensity < 0.3 {
        response.push_str(FAINT_SUFFIX);
    }

    if !state.secondary_emotions.is_empty() && state.intensity > 0.5 {
        let labels: Vec<&str> = state.secondary_emotions.iter().take(2).map(|e| e.label()).collect();
        response.push_str(&format!(" Ayrıca {} hissettiğini de fark ettim.", labels.join(", ")));
    }

    response
}
