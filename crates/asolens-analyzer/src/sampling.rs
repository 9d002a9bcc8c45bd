use rand::seq::IndexedRandom;
use rand::Rng;

/// Picks up to `count` distinct positions of `keywords` uniformly at random.
///
/// Returns every keyword when there are no more than `count`. Duplicate
/// keyword strings at different positions may both be picked.
pub fn sample_keywords<R: Rng + ?Sized>(
    keywords: &[String],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    keywords.choose_multiple(rng, count).cloned().collect()
}
