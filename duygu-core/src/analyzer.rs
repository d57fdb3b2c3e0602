// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! EmotionAnalyzer: top-level orchestrator of the analysis pipeline.
//!
//! One call to [`EmotionAnalyzer::analyze`] runs:
//!
//! 1. Feature extraction, semantic flags, lexicon scoring, context evaluation
//! 2. Weighted classification (neutral fallback when nothing matched)
//! 3. Trend reinforcement against recent history
//! 4. Self-correction
//! 5. Bookkeeping: history, user profile, conversation memory
//!
//! The analyzer owns all of its state. Callers that share it across tasks
//! wrap it in a mutex.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::classifier::classify;
use crate::config::AnalyzerConfig;
use crate::context::{evaluate_context, AnalysisContext};
use crate::correction::self_correct;
use crate::emotion::{Emotion, EmotionalState};
use crate::features::{extract_topics, LinguisticFeatures};
use crate::lexicon::Lexicon;
use crate::memory::{ConversationMemory, MemoryStats};
use crate::profile::UserProfile;
use crate::questions::{self, QuestionKind};
use crate::response;
use crate::semantics::SemanticFlags;
use crate::summary::{emotional_stability, ConversationSummary, EmotionSummary};
use crate::temporal;

/// Memory must hold at least this many turns before follow-ups replace
/// opening questions.
const WARM_CONVERSATION: usize = 3;

pub struct EmotionAnalyzer {
    lexicon: Lexicon,
    /// The last `history_capacity` analysis results, oldest first.
    history: Vec<EmotionalState>,
    memory: ConversationMemory,
    profile: UserProfile,
    /// Follow-up questions generated so far.
    question_count: u32,
    config: AnalyzerConfig,
}

impl EmotionAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_lexicon(Lexicon::turkish(), config)
    }

    pub fn with_lexicon(lexicon: Lexicon, config: AnalyzerConfig) -> Self {
        Self {
            lexicon,
            history: Vec::new(),
            memory: ConversationMemory::new(config.memory.clone()),
            profile: UserProfile::new(config.intensity_window),
            question_count: 0,
            config,
        }
    }

    /// Analyze one text and record the result. Never fails: text without
    /// any emotional signal yields the neutral state.
    pub fn analyze(&mut self, text: &str, context: &AnalysisContext) -> EmotionalState {
        let features = LinguisticFeatures::extract(text, &self.lexicon);
        let flags = SemanticFlags::analyze(text);
        let lexical = self.lexicon.score(text);
        let last_primary = self.history.last().map(|s| s.primary_emotion);
        let context_score = evaluate_context(text, context, last_primary);
        let timestamp = Utc::now();

        let mut state = match classify(&features, &flags, &lexical, &context_score, timestamp) {
            Some(mut state) => {
                temporal::integrate(&mut state, &self.history, &self.config.trend);
                state
            }
            None => EmotionalState::neutral(context_score, timestamp),
        };
        self_correct(&mut state, &self.config.correction);

        debug!(
            primary = state.primary_emotion.key(),
            intensity = state.intensity,
            confidence = state.confidence,
            words = features.word_count,
            "text analyzed"
        );

        self.history.push(state.clone());
        if self.history.len() > self.config.history_capacity {
            let excess = self.history.len() - self.config.history_capacity;
            self.history.drain(..excess);
        }
        self.profile.update(&state);
        self.memory.record(text, &state, extract_topics(text));

        state
    }

    /// Spoken reply for an analysis result.
    pub fn generate_response<R: Rng + ?Sized>(&self, state: &EmotionalState, rng: &mut R) -> String {
        response::generate_response(state, rng)
    }

    /// Analyze `text`, then maybe ask a follow-up. Early in a conversation
    /// this is always an opening question; afterwards a question is asked
    /// with probability `curiosity_level`.
    pub fn generate_intelligent_question<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        context: &AnalysisContext,
        rng: &mut R,
    ) -> Option<String> {
        let state = self.analyze(text, context);
        self.follow_up_question(&state, text, rng)
    }

    /// Question stage of [`Self::generate_intelligent_question`] for a text
    /// that has already been analyzed.
    pub fn follow_up_question<R: Rng + ?Sized>(
        &mut self,
        state: &EmotionalState,
        text: &str,
        rng: &mut R,
    ) -> Option<String> {
        if self.memory.len() < WARM_CONVERSATION {
            return Some(questions::opening_question(rng));
        }
        if rng.gen::<f32>() > self.config.curiosity_level {
            return None;
        }

        let topics = extract_topics(text);
        let kind = QuestionKind::select(state, text, &topics);
        let question = questions::create_question(kind, rng);
        self.question_count += 1;
        debug!(kind = ?kind, count = self.question_count, "follow-up question");
        Some(question)
    }

    pub fn opening_question<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        questions::opening_question(rng)
    }

    /// Remark on the dominant recent topic, if there is one.
    pub fn reflective_response<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        questions::reflective_response(&self.memory, rng)
    }

    pub fn conversation_summary(&self) -> Option<ConversationSummary> {
        ConversationSummary::build(&self.memory, self.question_count)
    }

    pub fn emotion_summary(&self) -> Option<EmotionSummary> {
        EmotionSummary::build(&self.history, &self.profile)
    }

    pub fn emotional_stability(&self) -> f32 {
        emotional_stability(&self.history)
    }

    pub fn history(&self) -> &[EmotionalState] {
        &self.history
    }

    pub fn last_emotion(&self) -> Option<Emotion> {
        self.history.last().map(|s| s.primary_emotion)
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn memory_stats(&self) -> MemoryStats {
        self.memory.stats()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Forget history, memory and profile. The lexicon and config stay.
    pub fn reset(&mut self) {
        self.history.clear();
        self.memory.clear();
        self.profile = UserProfile::new(self.config.intensity_window);
        self.question_count = 0;
    }

    pub fn snapshot(&self) -> AnalyzerSnapshot {
        AnalyzerSnapshot {
            total_analyses: self.profile.total() as usize,
            last_emotion: self.last_emotion().map(|e| e.key().to_string()),
            avg_intensity: self.profile.avg_intensity,
            stability: self.emotional_stability(),
            memory_count: self.memory.len(),
            questions_asked: self.question_count,
            lexicon_size: self.lexicon.len(),
        }
    }
}

impl Default for EmotionAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

/// Serializable snapshot of analyzer state.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzerSnapshot {
    pub total_analyses: usize,
    pub last_emotion: Option<String>,
    pub avg_intensity: f32,
    pub stability: f32,
    pub memory_count: usize,
    pub questions_asked: u32,
    pub lexicon_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn noon() -> AnalysisContext {
        AnalysisContext::at_hour(12)
    }

    #[test]
    fn test_analyzer_creation() {
        let analyzer = EmotionAnalyzer::default();
        assert!(analyzer.history().is_empty());
        assert!(analyzer.memory().is_empty());
        assert_eq!(analyzer.question_count(), 0);
        assert!(!analyzer.lexicon().is_empty());
    }

    #[test]
    fn test_analyze_records_everywhere() {
        let mut analyzer = EmotionAnalyzer::default();
        let state = analyzer.analyze("müzik dinlerken çok mutluyum", &noon());
        assert_eq!(state.primary_emotion, Emotion::Joy);
        assert_eq!(analyzer.history().len(), 1);
        assert_eq!(analyzer.profile().count(Emotion::Joy), 1);
        let entry = analyzer.memory().latest().unwrap();
        assert_eq!(entry.emotion, Emotion::Joy);
        assert!(entry.topics.contains(&crate::features::Topic::Music));
    }

    #[test]
    fn test_context_sees_previous_sadness() {
        let mut analyzer = EmotionAnalyzer::default();
        analyzer.analyze("bugün çok üzgün ve yalnız hissediyorum", &noon());
        let next = analyzer.analyze("merhaba", &noon());
        assert_eq!(next.context_score.get(crate::context::RECENT_SADNESS), Some(&0.6));
    }

    #[test]
    fn test_trend_boosts_repeated_emotion() {
        let mut analyzer = EmotionAnalyzer::default();
        let text = "çok mutluyum ve sana minnettarım";
        let first = analyzer.analyze(text, &noon());
        analyzer.analyze(text, &noon());
        analyzer.analyze(text, &noon());
        // three joyful entries in the window
        let boosted = analyzer.analyze(text, &noon());
        assert!((boosted.intensity - first.intensity * 1.2).abs() < 1e-5);
        assert_eq!(boosted.primary_emotion, Emotion::Joy);
    }

    #[test]
    fn test_opening_question_early() {
        let mut analyzer = EmotionAnalyzer::default();
        let mut rng = StdRng::seed_from_u64(5);
        let q = analyzer.generate_intelligent_question("merhaba", &noon(), &mut rng);
        assert!(q.is_some());
        assert_eq!(analyzer.question_count(), 0);
        assert_eq!(analyzer.memory().len(), 1);
    }

    #[test]
    fn test_follow_up_question_counts() {
        let mut config = AnalyzerConfig::default();
        config.curiosity_level = 1.0;
        let mut analyzer = EmotionAnalyzer::new(config);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..3 {
            analyzer.analyze("merhaba", &noon());
        }
        let q = analyzer
            .generate_intelligent_question("çok korkuyorum", &noon(), &mut rng)
            .unwrap();
        assert!(QuestionKind::Emotional.templates().iter().any(|t| *t == q));
        assert_eq!(analyzer.question_count(), 1);
        assert_eq!(analyzer.conversation_summary().unwrap().questions_asked, 1);
    }

    #[test]
    fn test_zero_curiosity_never_asks() {
        let mut config = AnalyzerConfig::default();
        config.curiosity_level = 0.0;
        let mut analyzer = EmotionAnalyzer::new(config);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..3 {
            analyzer.analyze("merhaba", &noon());
        }
        for _ in 0..10 {
            assert!(analyzer.generate_intelligent_question("film izledim", &noon(), &mut rng).is_none());
        }
        assert_eq!(analyzer.question_count(), 0);
    }

    #[test]
    fn test_history_trimmed_but_totals_kept() {
        let mut config = AnalyzerConfig::default();
        config.history_capacity = 10;
        let mut analyzer = EmotionAnalyzer::new(config);
        for _ in 0..25 {
            analyzer.analyze("çok mutluyum", &noon());
        }
        assert_eq!(analyzer.history().len(), 10);
        assert_eq!(analyzer.profile().intensity_history.len(), 10);
        assert_eq!(analyzer.snapshot().total_analyses, 25);
        let summary = analyzer.emotion_summary().unwrap();
        assert_eq!(summary.total_analyses, 25);
        assert_eq!(summary.most_common_emotion, Emotion::Joy);
    }

    #[test]
    fn test_reset() {
        let mut analyzer = EmotionAnalyzer::default();
        analyzer.analyze("çok mutluyum", &noon());
        analyzer.reset();
        assert!(analyzer.history().is_empty());
        assert!(analyzer.memory().is_empty());
        assert!(analyzer.emotion_summary().is_none());
        assert!(analyzer.conversation_summary().is_none());
    }

    #[test]
    fn test_snapshot() {
        let mut analyzer = EmotionAnalyzer::default();
        analyzer.analyze("çok mutluyum ve sana minnettarım", &noon());
        let snap = analyzer.snapshot();
        assert_eq!(snap.total_analyses, 1);
        assert_eq!(snap.last_emotion.as_deref(), Some("joy"));
        assert_eq!(snap.memory_count, 1);
        assert_eq!(snap.stability, 0.5);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"lexicon_size\""));
    }
}
