// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Frequency counting with first-occurrence tie-breaking.

/// Distinct items with their counts, most frequent first. Equal counts keep
/// the order in which the items were first seen.
pub fn by_frequency<T, I>(items: I) -> Vec<(T, usize)>
where
    T: PartialEq + Copy,
    I: IntoIterator<Item = T>,
{
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }
    // stable sort preserves first-seen order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The most frequent item and its count.
pub fn most_common<T, I>(items: I) -> Option<(T, usize)>
where
    T: PartialEq + Copy,
    I: IntoIterator<Item = T>,
{
    by_frequency(items).into_iter().next()
}
