use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) fn next_random_u32(state: &mut u32) -> u32 {
    let mut next = state.wrapping_add(0x6d2b79f5);
    *state = next;
    next = (next ^ (next >> 15)).wrapping_mul(next | 1);
    next ^= next.wrapping_add((next ^ (next >> 7)).wrapping_mul(next | 61));
    next ^ (next >> 14)
}

pub(crate) fn next_random_bounded(state: &mut u32, bound: u32) -> u32 {
    next_random_bounded_with(state, bound, next_random_u32)
}

pub(crate) fn next_random_bounded_with<F>(state: &mut u32, bound: u32, mut next: F) -> u32
where
    F: FnMut(&mut u32) -> u32,
{
    let threshold = (u64::from(u32::MAX) + 1) / u64::from(bound) * u64::from(bound);
    let mut candidate = next(state);
    while u64::from(candidate) >= threshold {
        candidate = next(state);
    }
    candidate % bound
}

pub(crate) fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos() ^ (elapsed.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod rng_tests {
    use super::*;

    #[test]
    fn next_random_bounded_with_retries_above_threshold() {
        let mut state = 0u32;
        let mut values = vec![u32::MAX, 42u32].into_iter();
        let result = next_random_bounded_with(&mut state, 12, |_s| {
            values.next().expect("test values should be available")
        });
        assert_eq!(result, 42 % 12);
    }

    #[test]
    fn same_seed_yields_same_sequence() {
        let mut left = 7u32;
        let mut right = 7u32;
        let a = (0..5).map(|_| next_random_u32(&mut left)).collect::<Vec<_>>();
        let b = (0..5).map(|_| next_random_u32(&mut right)).collect::<Vec<_>>();
        assert_eq!(a, b);
    }

    #[test]
    fn bounded_values_stay_below_bound() {
        let mut state = 99u32;
        for _ in 0..200 {
            assert!(next_random_bounded(&mut state, 4) < 4);
        }
    }
}
