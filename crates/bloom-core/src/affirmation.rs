use rand::seq::SliceRandom;
use rand::Rng;

pub const AFFIRMATIONS: [&str; 5] = [
    "I am enough",
    "I radiate positivity",
    "I deserve peace",
    "I am growing every day",
    "I am proud of who I am",
];

/// Uniform pick from the fixed set. Each call is independent, so the same
/// affirmation can come up twice in a row.
pub fn pick_affirmation<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    AFFIRMATIONS.choose(rng).copied().unwrap_or(AFFIRMATIONS[0])
}
