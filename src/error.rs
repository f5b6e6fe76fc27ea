use crate::id::LineNumber;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// The identifier is already declared in the innermost scope.
    /// Shadowing a declaration of an enclosing scope is fine.
    DuplicateDeclaration {
        id: String,
        line: LineNumber,
        previous: LineNumber,
    },
    /// Tried to leave the outermost scope, or no scope was ever entered.
    ScopeUnderflow { depth: usize },
}

impl std::fmt::Display for ScopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDeclaration { id, line, previous } => {
                write!(f, "{id} on line {line} is already declared in this scope on line {previous}")
            }

            Self::ScopeUnderflow { depth: 0 } => {
                write!(f, "tried to exit a scope, but no scope has been entered")
            }

            Self::ScopeUnderflow { depth } => {
                write!(f, "tried to exit the outermost scope (depth {depth}). The outermost scope is never discarded.")
            }
        }
    }
}
