//! Deck shuffling and hand drawing.

use rand::Rng;

/// Cards offered per turn.
pub const HAND_SIZE: usize = 3;

/// In-place Fisher-Yates shuffle.
pub fn shuffle_ids<R: Rng + ?Sized>(ids: &mut [String], rng: &mut R) {
    for i in (1..ids.len()).rev() {
        let j = rng.random_range(0..=i);
        ids.swap(i, j);
    }
}

/// Take up to `n` ids from the front of the deck.
pub fn draw_hand(deck: &mut Vec<String>, n: usize) -> Vec<String> {
    let take = n.min(deck.len());
    deck.drain(..take).collect()
}
