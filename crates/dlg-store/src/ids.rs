use dlg_core::Dialogue;

use crate::rng::next_random_u32;

pub(crate) const RESPONSE_ID_PREFIX: &str = "resp-";

/// Draws ids until one is not already used anywhere in the dialogue.
pub(crate) fn generate_response_id(dialogue: &Dialogue, rng_state: &mut u32) -> String {
    generate_response_id_with(dialogue, rng_state, next_random_u32)
}

pub(crate) fn generate_response_id_with<F>(
    dialogue: &Dialogue,
    rng_state: &mut u32,
    mut next: F,
) -> String
where
    F: FnMut(&mut u32) -> u32,
{
    loop {
        let candidate = format!("{}{:08x}", RESPONSE_ID_PREFIX, next(rng_state));
        if !dialogue.contains_response_id(&candidate) {
            return candidate;
        }
        log::debug!("response id {} already taken, drawing again", candidate);
    }
}
