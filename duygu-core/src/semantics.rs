// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Heuristic semantic flags: irony, sarcasm, metaphor.

use serde::{Deserialize, Serialize};

const IRONY_POSITIVE: &[&str] = &["müthiş", "harika", "süper", "çok güzel"];
const IRONY_CONTRAST: &[&str] = &["değil", "yok", "ama", "fakat"];
const SARCASM_IDIOMS: &[&str] = &["tabi canım", "elbette", "ne sandın", "tabii ki"];
const METAPHOR_MARKERS: &[&str] = &["kalbim", "ruhum", "içim", "derin", "yürek"];

pub const IRONY_SCORE: f32 = 0.8;
pub const SARCASM_SCORE: f32 = 0.9;
const METAPHOR_STEP: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SemanticFlags {
    pub irony: f32,
    pub sarcasm: f32,
    pub metaphor: f32,
}

impl SemanticFlags {
    pub fn analyze(text: &str) -> Self {
        let lower = text.to_lowercase();
        let has_any = |list: &[&str]| list.iter().any(|p| lower.contains(p));

        let irony = if has_any(IRONY_POSITIVE) && has_any(IRONY_CONTRAST) {
            IRONY_SCORE
        } else {
            0.0
        };
        let sarcasm = if has_any(SARCASM_IDIOMS) { SARCASM_SCORE } else { 0.0 };
        let markers = METAPHOR_MARKERS.iter().filter(|m| lower.contains(*m)).count();

        Self {
            irony,
            sarcasm,
            metaphor: (markers as f32 * METAPHOR_STEP).min(1.0),
        }
    }

    pub fn is_ironic(&self) -> bool {
        self.irony > 0.5
    }
}
