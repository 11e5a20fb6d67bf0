use std::fmt;

use serde::Serialize;

use super::position::Position;

/// Index of a directive in the scan result.
///
/// The registry stores node indices instead of ownership handles; the
/// scanned sequence stays alive for the whole run, so an index is always
/// valid once execution starts.
pub type NodeId = usize;

pub const PATH_DELIMITER: &str = "::";

/// One parsed statement of the language. The variant set is closed: the
/// language has exactly four directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "directive", rename_all = "UPPERCASE")]
pub enum Directive {
    Scope(ScopeDirective),
    Declare(DeclareDirective),
    Using(UsingDirective),
    Access(AccessDirective),
}

/// `SCOPE <name> {` — opens a nested scope and registers the scope itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeDirective {
    pub name: String,
    /// Qualified path of the scope itself, not of its children.
    pub path: String,
    pub position: Position,
}

/// `DECLARE <name>;` — registers an accessible entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclareDirective {
    pub name: String,
    pub path: String,
    pub position: Position,
}

/// `USING <name>;` — the alias acted at scan time; the node is kept so the
/// executed sequence mirrors the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsingDirective {
    pub name: String,
    pub position: Position,
}

/// `ACCESS <name>;` — carries its resolution candidates, computed at scan
/// time against the scope stack and the alias current at that point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDirective {
    pub name: String,
    /// One qualified candidate per enclosing scope level, outer to inner.
    /// A single entry when the name was an absolute path.
    pub direct_candidates: Vec<String>,
    /// `prefix + alias + :: + name` per level; empty when no alias was set.
    pub aliased_candidates: Vec<String>,
    pub position: Position,
}

impl Directive {
    pub fn position(&self) -> Position {
        match self {
            Directive::Scope(d) => d.position,
            Directive::Declare(d) => d.position,
            Directive::Using(d) => d.position,
            Directive::Access(d) => d.position,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Directive::Scope(_) => "SCOPE",
            Directive::Declare(_) => "DECLARE",
            Directive::Using(_) => "USING",
            Directive::Access(_) => "ACCESS",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Scope(d) => write!(f, "SCOPE {} ({})", d.name, d.path),
            Directive::Declare(d) => write!(f, "DECLARE {} ({})", d.name, d.path),
            Directive::Using(d) => write!(f, "USING {}", d.name),
            Directive::Access(d) => {
                write!(f, "ACCESS {} (direct: {}", d.name, d.direct_candidates.join(", "))?;
                if !d.aliased_candidates.is_empty() {
                    write!(f, "; aliased: {}", d.aliased_candidates.join(", "))?;
                }
                write!(f, ")")
            }
        }
    }
}
