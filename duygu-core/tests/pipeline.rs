// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! End-to-end behavior of the analysis pipeline through the public API.

use duygu_core::lexicon::Lexicon;
use duygu_core::{AnalysisContext, AnalyzerConfig, Emotion, EmotionAnalyzer};

const JOYFUL: &str = "bugün çok mutluyum ve harika hissediyorum";
const SAD: &str = "bugün çok üzgün ve yalnız hissediyorum";

fn noon() -> AnalysisContext {
    AnalysisContext::at_hour(12)
}

#[test]
fn test_no_signal_is_neutral_every_time() {
    let mut analyzer = EmotionAnalyzer::default();
    for _ in 0..6 {
        let state = analyzer.analyze("bugün hava bulutlu", &noon());
        assert_eq!(state.primary_emotion, Emotion::Neutral);
        assert_eq!(state.intensity, 0.1);
        assert_eq!(state.confidence, 0.5);
        assert!(state.secondary_emotions.is_empty());
        assert!(state.triggers.is_empty());
    }
    assert_eq!(analyzer.history().len(), 6);
}

#[test]
fn test_empty_text() {
    let mut analyzer = EmotionAnalyzer::default();
    let state = analyzer.analyze("", &noon());
    assert_eq!(state.primary_emotion, Emotion::Neutral);
    assert_eq!(analyzer.memory().latest().map(|e| e.text.as_str()), Some(""));
}

#[test]
fn test_results_stay_in_bounds() {
    let texts = [
        "öfke öfke KIZGIN sinir berbat!!!",
        "keder korku panik endişe yalnız gece",
        "aşk sevgi seviyorum aşığım",
        "tabi canım harika ama değil",
        "keşke hiç olmasaydı, hayal kırıklığı",
        "çok mutluyum ama biraz da üzgün",
        "gurur başarı kazandım başardım",
    ];
    let mut analyzer = EmotionAnalyzer::default();
    for hour in [2, 9, 23] {
        for text in texts {
            let state = analyzer.analyze(text, &AnalysisContext::at_hour(hour));
            assert!((0.0..=1.0).contains(&state.intensity), "{text}: {}", state.intensity);
            assert!((0.0..=1.0).contains(&state.confidence), "{text}: {}", state.confidence);
            assert!(state.secondary_emotions.len() <= 3);
            assert!(!state.secondary_emotions.contains(&state.primary_emotion));
            assert!(state.triggers.len() <= 3);
        }
    }
}

#[test]
fn test_lexicon_scores_are_pure_and_normalized() {
    let lexicon = Lexicon::turkish();
    for text in [JOYFUL, SAD, "umut ve korku"] {
        let a = lexicon.score(text);
        assert_eq!(a, lexicon.score(text));
        assert!((a.total() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_memory_keeps_last_fifty() {
    let mut analyzer = EmotionAnalyzer::default();
    for i in 0..60 {
        analyzer.analyze(&format!("mesaj {i}"), &noon());
    }
    assert_eq!(analyzer.memory().len(), 50);
    let texts: Vec<String> = analyzer.memory().entries().map(|e| e.text.clone()).collect();
    let expected: Vec<String> = (10..60).map(|i| format!("mesaj {i}")).collect();
    assert_eq!(texts, expected);
    // history is capped too, the profile still counts every analysis
    assert_eq!(analyzer.history().len(), 50);
    assert_eq!(analyzer.snapshot().total_analyses, 60);
    assert_eq!(analyzer.profile().total(), 60);
}

#[test]
fn test_low_confidence_corrects_to_neutral() {
    let mut analyzer = EmotionAnalyzer::default();
    // joy share 2/3, short ironic text: 0.667 * 0.7 * 0.6 < 0.3
    let state = analyzer.analyze("harika ama değil", &noon());
    assert_eq!(state.primary_emotion, Emotion::Neutral);
    assert!((state.intensity - 0.5).abs() < 1e-6);
    assert_eq!(state.confidence, 0.5);
}

#[test]
fn test_stability_of_steady_conversation() {
    let mut analyzer = EmotionAnalyzer::default();
    for _ in 0..5 {
        assert_eq!(analyzer.analyze(JOYFUL, &noon()).primary_emotion, Emotion::Joy);
    }
    assert_eq!(analyzer.emotional_stability(), 1.0);
    assert_eq!(analyzer.emotion_summary().unwrap().stability, 1.0);
}

#[test]
fn test_stability_of_alternating_conversation() {
    let mut analyzer = EmotionAnalyzer::default();
    for i in 0..5 {
        let text = if i % 2 == 0 { JOYFUL } else { SAD };
        analyzer.analyze(text, &noon());
    }
    assert_eq!(analyzer.emotional_stability(), 0.0);
}

#[test]
fn test_happy_and_grateful() {
    let mut analyzer = EmotionAnalyzer::default();
    let state = analyzer.analyze("çok mutluyum ve sana minnettarım", &noon());
    let joy_share = 0.9 / 2.05;
    assert_eq!(state.primary_emotion, Emotion::Joy);
    assert!(state.secondary_emotions.contains(&Emotion::Gratitude));
    assert!(state.intensity > 0.5);
    assert!((state.confidence - joy_share * 1.1).abs() < 1e-5);
}

#[test]
fn test_night_sadness_outweighs_day() {
    let text = "yalnız ve mutlu";
    let mut day = EmotionAnalyzer::default();
    let mut night = EmotionAnalyzer::default();
    let by_day = day.analyze(text, &noon());
    let by_night = night.analyze(text, &AnalysisContext::at_hour(23));
    assert!(by_night.context_score.contains_key("night_time"));
    assert!(by_day.context_score.contains_key("day_time"));
    assert!(by_night.intensity >= by_day.intensity);
}

#[test]
fn test_summaries() {
    let mut analyzer = EmotionAnalyzer::new(AnalyzerConfig::default());
    assert!(analyzer.conversation_summary().is_none());
    assert!(analyzer.emotion_summary().is_none());

    analyzer.analyze("film izlerken çok korktum", &noon());
    analyzer.analyze("müzik dinleyince mutlu oldum", &noon());
    analyzer.analyze("müzik her zaman iyi gelir", &noon());

    let conversation = analyzer.conversation_summary().unwrap();
    assert_eq!(conversation.total_conversations, 3);
    assert_eq!(conversation.recent_topics[0].0, duygu_core::features::Topic::Music);
    assert_eq!(conversation.conversation_depth, 0);

    let emotions = analyzer.emotion_summary().unwrap();
    assert_eq!(emotions.total_analyses, 3);
    assert_eq!(emotions.recent_emotions.len(), 3);
    assert_eq!(emotions.most_common_emotion, Emotion::Joy);
}
