use std::collections::{BTreeMap, BTreeSet};

use dlg_core::{ColorToken, PASTEL_PALETTE};

use crate::rng::next_random_bounded;

/// Response id -> display color. View state only, never exported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorAssignment {
    colors: BTreeMap<String, ColorToken>,
}

impl ColorAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, response_id: &str) -> Option<ColorToken> {
        self.colors.get(response_id).copied()
    }

    pub fn contains(&self, response_id: &str) -> bool {
        self.colors.contains_key(response_id)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColorToken)> {
        self.colors
            .iter()
            .map(|(response_id, color)| (response_id.as_str(), *color))
    }

    pub(crate) fn insert(&mut self, response_id: String, color: ColorToken) {
        self.colors.insert(response_id, color);
    }

    pub(crate) fn remove(&mut self, response_id: &str) -> Option<ColorToken> {
        self.colors.remove(response_id)
    }

    pub(crate) fn used_tokens(&self) -> BTreeSet<ColorToken> {
        self.colors.values().copied().collect()
    }
}

/// Picks a palette token that no live response currently holds. Once every
/// token is taken the whole palette is eligible again.
pub(crate) fn pick_color(assignment: &ColorAssignment, rng_state: &mut u32) -> ColorToken {
    let used = assignment.used_tokens();
    let mut free = PASTEL_PALETTE
        .iter()
        .copied()
        .filter(|token| !used.contains(token))
        .collect::<Vec<_>>();
    if free.is_empty() {
        log::warn!(
            "palette exhausted by {} live responses, reusing colors",
            assignment.len()
        );
        free = PASTEL_PALETTE.to_vec();
    }
    let index = next_random_bounded(rng_state, free.len() as u32) as usize;
    free[index]
}
