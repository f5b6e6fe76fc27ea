use serde::{Deserialize, Serialize};

use crate::{id::LineNumber, SymbolTable};

/// One operation of a scenario.
///
/// `expect` is optional for `declare` and `exit`, unchecked if left out.
/// For `find`, leaving it out means the identifier must not be found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase", deny_unknown_fields)]
pub enum Step {
    Enter,
    Exit {
        #[serde(default)]
        expect: Option<bool>,
    },
    Declare {
        id: String,
        line: LineNumber,
        #[serde(default)]
        expect: Option<bool>,
    },
    Find {
        id: String,
        #[serde(default)]
        expect: Option<LineNumber>,
    },
}

/// What applying a [Step] returned, next to what was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Entered,
    Succeeded { got: bool, expected: Option<bool> },
    Found {
        got: Option<LineNumber>,
        expected: Option<LineNumber>,
    },
}

impl Step {
    pub fn apply(&self, table: &mut SymbolTable) -> Outcome {
        match self {
            Step::Enter => {
                table.enter_scope();
                Outcome::Entered
            }
            Step::Exit { expect } => Outcome::Succeeded {
                got: table.exit_scope(),
                expected: *expect,
            },
            Step::Declare { id, line, expect } => Outcome::Succeeded {
                got: table.declare(id, *line),
                expected: *expect,
            },
            Step::Find { id, expect } => Outcome::Found {
                got: table.find(id),
                expected: *expect,
            },
        }
    }
}

fn describe_line(line: Option<LineNumber>) -> String {
    match line {
        Some(line) => format!("line {line}"),
        None => "not found".to_string(),
    }
}

impl Outcome {
    /// Expected and actual result, rendered, if they differ.
    pub fn mismatch(&self) -> Option<(String, String)> {
        match *self {
            Outcome::Entered => None,
            Outcome::Succeeded {
                got,
                expected: Some(expected),
            } if got != expected => Some((expected.to_string(), got.to_string())),
            Outcome::Succeeded { .. } => None,
            Outcome::Found { got, expected } if got != expected => {
                Some((describe_line(expected), describe_line(got)))
            }
            Outcome::Found { .. } => None,
        }
    }
}
