use log::{debug, trace};

use crate::{
    config::TableConfig,
    error::ScopeError,
    id::{LineNumber, NOT_FOUND},
    index::DeclarationIndex,
    scope::ScopeStack,
};

/// Symbol table tracking identifier declarations across nested scopes.
///
/// The scope stack records which identifiers each open scope declared,
/// the [DeclarationIndex] records their lines, most recent last.
/// Both are only ever changed together:
///
/// - declaring appends to the innermost frame and to the index
/// - exiting pops, for every identifier of the innermost frame from
///   newest to oldest, the last index entry of that identifier
///
/// so for every name, its index entries match the open frames declaring it,
/// in stack order. Lookups rely on that and never walk the scopes.
///
/// The outermost scope is never discarded once entered.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    scopes: ScopeStack,
    index: DeclarationIndex,
    /// Number of enter calls minus successful exit calls.
    depth: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    pub fn with_config(config: TableConfig) -> Self {
        SymbolTable {
            scopes: ScopeStack::new(),
            index: DeclarationIndex::with_modulus(config.buckets),
            depth: 0,
        }
    }

    /// Opens a new innermost scope.
    pub fn enter_scope(&mut self) {
        self.scopes.push();
        self.depth += 1;
        trace!("entered scope, depth {}", self.depth);
    }

    /// Closes the innermost scope, forgetting everything declared in it.
    /// Returns false and keeps all state if only the outermost scope is open.
    pub fn exit_scope(&mut self) -> bool {
        self.try_exit_scope().is_ok()
    }

    pub fn try_exit_scope(&mut self) -> Result<(), ScopeError> {
        if self.scopes.len() <= 1 || self.depth == 1 {
            debug!("refused to exit scope at depth {}", self.depth);
            return Err(ScopeError::ScopeUnderflow { depth: self.depth });
        }

        let frame = self
            .scopes
            .pop()
            .ok_or(ScopeError::ScopeUnderflow { depth: self.depth })?;

        // newest first, so every pop hits the entry of its own id
        // even when ids of this frame share a bucket
        for id in frame.ids().rev() {
            self.index.pop(id);
        }
        self.depth -= 1;

        trace!(
            "exited scope with {} declarations, depth {}",
            frame.len(),
            self.depth
        );

        Ok(())
    }

    /// Declares `id` in the innermost scope.
    /// Returns false and changes nothing if `id` was already declared there.
    ///
    /// Declaring with no open scope enters the outermost scope first.
    pub fn declare(&mut self, id: &str, line: LineNumber) -> bool {
        self.try_declare(id, line).is_ok()
    }

    pub fn try_declare(&mut self, id: &str, line: LineNumber) -> Result<(), ScopeError> {
        if self.scopes.is_empty() {
            debug!("declared {id} without an open scope, entering one");
            self.enter_scope();
        }

        if self.is_declared_in_current_scope(id) {
            // the innermost declaration of id is the one from this scope
            let previous = self.index.latest(id).unwrap_or_default();
            debug!("rejected redeclaration of {id} on line {line}, previous on line {previous}");

            return Err(ScopeError::DuplicateDeclaration {
                id: id.to_string(),
                line,
                previous,
            });
        }

        let Some(frame) = self.scopes.top_mut() else {
            return Err(ScopeError::ScopeUnderflow { depth: self.depth });
        };
        frame.push(id);
        self.index.push(id, line);

        trace!("declared {id} on line {line} at depth {}", self.depth);

        Ok(())
    }

    /// Line of the innermost visible declaration of `id`.
    pub fn find(&self, id: &str) -> Option<LineNumber> {
        if id.is_empty() {
            return None;
        }

        self.index.latest(id)
    }

    /// Like [SymbolTable::find], but returns [NOT_FOUND] instead of `None`.
    pub fn find_or_sentinel(&self, id: &str) -> i64 {
        self.find(id).map_or(NOT_FOUND, i64::from)
    }

    pub fn is_declared_in_current_scope(&self, id: &str) -> bool {
        self.scopes.top().is_some_and(|frame| frame.contains(id))
    }

    /// Number of currently open scopes.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of live declarations across all open scopes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    pub fn index(&self) -> &DeclarationIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks that every name's index entries line up with the
    /// open frames declaring it.
    fn assert_consistent(table: &SymbolTable) {
        for frame in table.scopes().frames() {
            for id in frame.ids() {
                let declaring_frames = table
                    .scopes()
                    .frames()
                    .filter(|f| f.contains(id))
                    .count();
                let entries = table.index().declarations(id).count();
                assert_eq!(declaring_frames, entries, "index out of sync for {id}");
            }
        }

        let declared: usize = table.scopes().frames().map(|f| f.len()).sum();
        assert_eq!(declared, table.len());
        assert_eq!(table.scopes().len(), table.depth());
    }

    #[test]
    fn shadowing() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        assert!(table.declare("x", 5));
        table.enter_scope();
        assert!(table.declare("x", 9));

        assert_eq!(table.find("x"), Some(9));
        assert_consistent(&table);

        assert!(table.exit_scope());
        assert_eq!(table.find("x"), Some(5));
        assert_consistent(&table);
    }

    #[test]
    fn duplicate_rejected() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        assert!(table.declare("x", 1));
        assert!(!table.declare("x", 2));
        assert_eq!(table.find("x"), Some(1));
        assert_eq!(table.len(), 1);

        assert_eq!(
            table.try_declare("x", 3),
            Err(ScopeError::DuplicateDeclaration {
                id: "x".to_string(),
                line: 3,
                previous: 1,
            })
        );
    }

    #[test]
    fn duplicate_reports_line_of_current_scope() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.declare("x", 1);
        table.enter_scope();
        table.declare("x", 4);

        let err = table.try_declare("x", 6).unwrap_err();
        assert_eq!(
            err,
            ScopeError::DuplicateDeclaration {
                id: "x".to_string(),
                line: 6,
                previous: 4,
            }
        );
    }

    #[test]
    fn outermost_scope_is_kept() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.declare("g", 3);

        assert!(!table.exit_scope());
        assert_eq!(table.find("g"), Some(3));
        assert_eq!(table.depth(), 1);
        assert_eq!(
            table.try_exit_scope(),
            Err(ScopeError::ScopeUnderflow { depth: 1 })
        );
    }

    #[test]
    fn exit_without_scope() {
        let mut table = SymbolTable::new();
        assert!(!table.exit_scope());
        assert_eq!(
            table.try_exit_scope(),
            Err(ScopeError::ScopeUnderflow { depth: 0 })
        );
        assert_eq!(table.depth(), 0);
    }

    #[test]
    fn empty_and_unknown_not_found() {
        let mut table = SymbolTable::new();
        assert_eq!(table.find(""), None);
        assert_eq!(table.find("neverDeclared"), None);

        table.enter_scope();
        table.declare("known", 1);
        assert_eq!(table.find(""), None);
        assert_eq!(table.find("neverDeclared"), None);
        assert_eq!(table.find_or_sentinel("neverDeclared"), NOT_FOUND);
        assert_eq!(table.find_or_sentinel("known"), 1);
    }

    #[test]
    fn round_trip_nesting() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.declare("a", 1);
        table.enter_scope();
        table.declare("b", 2);

        assert!(table.exit_scope());
        assert!(!table.exit_scope());
        assert_eq!(table.find("a"), Some(1));
        assert_eq!(table.find("b"), None);
        assert_consistent(&table);
    }

    #[test]
    fn declare_enters_outermost_scope() {
        let mut table = SymbolTable::new();
        assert!(table.declare("x", 2));
        assert_eq!(table.depth(), 1);
        assert_eq!(table.find("x"), Some(2));

        // the implicit scope is the outermost one
        assert!(!table.exit_scope());
        assert_eq!(table.find("x"), Some(2));
    }

    #[test]
    fn exit_unwinds_only_inner_declarations() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.declare("a", 1);
        table.declare("b", 2);
        table.enter_scope();
        table.declare("c", 3);
        table.declare("a", 4);
        table.enter_scope();
        table.declare("b", 5);
        table.declare("d", 6);
        assert_consistent(&table);

        assert!(table.exit_scope());
        assert_eq!(table.find("a"), Some(4));
        assert_eq!(table.find("b"), Some(2));
        assert_eq!(table.find("c"), Some(3));
        assert_eq!(table.find("d"), None);
        assert_consistent(&table);

        assert!(table.exit_scope());
        assert_eq!(table.find("a"), Some(1));
        assert_eq!(table.find("b"), Some(2));
        assert_eq!(table.find("c"), None);
        assert_consistent(&table);
    }

    #[test]
    fn colliding_buckets_unwind_correctly() {
        let mut table = SymbolTable::with_config(TableConfig { buckets: 1 });
        table.enter_scope();
        table.declare("x", 1);
        table.declare("y", 2);
        table.enter_scope();
        table.declare("y", 3);
        table.declare("z", 4);
        table.declare("x", 5);

        assert_eq!(table.find("x"), Some(5));
        assert!(table.exit_scope());
        assert_eq!(table.find("x"), Some(1));
        assert_eq!(table.find("y"), Some(2));
        assert_eq!(table.find("z"), None);
        assert_consistent(&table);
    }

    #[test]
    fn exit_with_colliding_ids_in_one_scope() {
        // "ab" and "ca" both hash to 293
        assert_eq!(table_bucket("ab"), table_bucket("ca"));

        let mut table = SymbolTable::new();
        table.enter_scope();
        table.declare("ca", 7);
        table.enter_scope();
        assert!(table.declare("ab", 1));
        assert!(table.declare("ca", 2));
        assert_consistent(&table);

        assert!(table.exit_scope());
        assert_eq!(table.find("ab"), None);
        assert_eq!(table.find("ca"), Some(7));
        assert_eq!(table.len(), 1);
        assert_consistent(&table);
    }

    fn table_bucket(id: &str) -> u64 {
        SymbolTable::new().index().bucket_of(id)
    }

    #[test]
    fn same_name_in_sibling_scopes() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.enter_scope();
        assert!(table.declare("i", 10));
        assert!(table.exit_scope());
        table.enter_scope();
        assert!(table.declare("i", 20));
        assert_eq!(table.find("i"), Some(20));
        assert!(table.exit_scope());
        assert_eq!(table.find("i"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn instances_do_not_share_depth() {
        let mut first = SymbolTable::new();
        let mut second = SymbolTable::new();
        first.enter_scope();
        first.enter_scope();
        second.enter_scope();

        assert!(!second.exit_scope());
        assert!(first.exit_scope());
        assert!(!first.exit_scope());
    }
}
