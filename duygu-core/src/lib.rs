// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

pub mod emotion;
pub mod lexicon;
pub mod features;
pub mod semantics;
pub mod context;
pub mod classifier;
pub mod temporal;
pub mod correction;
pub mod memory;
pub mod profile;
pub mod summary;
pub mod response;
pub mod questions;
pub mod tally;
pub mod config;
pub mod analyzer;

pub use analyzer::{AnalyzerSnapshot, EmotionAnalyzer};
pub use config::AnalyzerConfig;
pub use context::AnalysisContext;
pub use emotion::{Emotion, EmotionScores, EmotionalState};
pub use summary::{ConversationSummary, EmotionSummary};
