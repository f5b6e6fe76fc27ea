/// Source line an identifier was declared on.
pub type LineNumber = u32;

/// Key of a bucket inside the [crate::index::DeclarationIndex].
pub type BucketId = u64;

/// Returned by [crate::SymbolTable::find_or_sentinel]
/// when no live declaration exists.
pub const NOT_FOUND: i64 = -1;
