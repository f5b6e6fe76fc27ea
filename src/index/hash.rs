use crate::id::BucketId;

/// Largest prime below 20000. Keeps chains short for realistic identifier sets.
pub const DEFAULT_BUCKETS: u64 = 19997;

/// Maps an identifier onto its bucket.
///
/// Every byte is weighted by its position (starting at 1) so that
/// identifiers sharing a prefix, or made of the same letters, still spread
/// across buckets. The result only needs to be deterministic,
/// it is never persisted.
pub fn bucket_of(id: &str, modulus: u64) -> BucketId {
    debug_assert!(modulus > 0);

    let total = id
        .bytes()
        .enumerate()
        .fold(0u64, |acc, (i, b)| {
            acc.wrapping_add((i as u64 + 1).wrapping_mul(b as u64))
        });

    total % modulus
}
