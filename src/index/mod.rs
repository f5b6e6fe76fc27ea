mod hash;
pub use hash::*;

use std::collections::HashMap;

use crate::id::{BucketId, LineNumber};

/// One live declaration of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub id: String,
    pub line: LineNumber,
}

/// Container mapping identifiers to their live declarations.
///
/// Identifiers are hashed into buckets. Inside a bucket, entries are ordered
/// oldest first, so the last matching entry is the innermost declaration
/// still in scope. Entries are only ever appended or popped from the tail.
#[derive(Debug, Clone)]
pub struct DeclarationIndex {
    buckets: HashMap<BucketId, Vec<Declaration>>,
    modulus: u64,
    len: usize,
}

impl Default for DeclarationIndex {
    fn default() -> Self {
        DeclarationIndex::with_modulus(DEFAULT_BUCKETS)
    }
}

impl DeclarationIndex {
    pub fn new() -> Self {
        DeclarationIndex::default()
    }

    /// A zero modulus is bumped to 1, which puts everything into one bucket.
    pub fn with_modulus(modulus: u64) -> Self {
        DeclarationIndex {
            buckets: HashMap::new(),
            modulus: modulus.max(1),
            len: 0,
        }
    }

    pub fn bucket_of(&self, id: &str) -> BucketId {
        bucket_of(id, self.modulus)
    }

    pub fn push(&mut self, id: &str, line: LineNumber) {
        let bucket = self.bucket_of(id);
        self.buckets.entry(bucket).or_default().push(Declaration {
            id: id.to_string(),
            line,
        });
        self.len += 1;
    }

    /// Removes the tail entry of the bucket `id` hashes to.
    ///
    /// The tail belongs to `id` only if `id` was the most recent declaration
    /// in that bucket, which holds when scopes are unwound innermost first
    /// and each frame is unwound newest declaration first.
    pub fn pop(&mut self, id: &str) -> Option<Declaration> {
        let bucket = self.bucket_of(id);
        let entries = self.buckets.get_mut(&bucket)?;
        let popped = entries.pop();
        debug_assert!(popped.as_ref().map_or(true, |d| d.id == id));

        if entries.is_empty() {
            self.buckets.remove(&bucket);
        }
        if popped.is_some() {
            self.len -= 1;
        }

        popped
    }

    /// Line of the most recent live declaration of `id`.
    pub fn latest(&self, id: &str) -> Option<LineNumber> {
        self.buckets
            .get(&self.bucket_of(id))?
            .iter()
            .rfind(|d| d.id == id)
            .map(|d| d.line)
    }

    /// All live declarations of `id`, oldest first.
    pub fn declarations<'s>(&'s self, id: &'s str) -> impl Iterator<Item = &'s Declaration> + 's {
        self.buckets
            .get(&self.bucket_of(id))
            .into_iter()
            .flatten()
            .filter(move |d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }
}
