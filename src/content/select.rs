//! Audience selection and shuffling

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Audience, ContentItem};

/// Keep enabled items meant for `audience` (or for everyone), in random order
pub fn select_for_audience(audience: Audience, items: Vec<ContentItem>) -> Vec<ContentItem> {
    select_for_audience_with(audience, items, &mut rand::thread_rng())
}

/// Same as [`select_for_audience`] with a caller-provided RNG
pub fn select_for_audience_with<R: Rng + ?Sized>(
    audience: Audience,
    items: Vec<ContentItem>,
    rng: &mut R,
) -> Vec<ContentItem> {
    let eligible = items
        .into_iter()
        .filter(|item| item.enabled && item.applies_to(audience))
        .collect();
    shuffle_with(eligible, rng)
}

/// Uniform random permutation (Fisher-Yates)
pub fn shuffle<T>(items: Vec<T>) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

pub fn shuffle_with<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items
}
