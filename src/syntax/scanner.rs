//! Character-level scanner that turns raw source into directive nodes.
//!
//! Scanning is all-or-nothing: the first structural error aborts the whole
//! scan, no directive sequence is produced and nothing executes. Qualified
//! paths and ACCESS resolution candidates are computed here, at scan time,
//! against the scope stack and alias current at that point in the source.

use crate::diagnostics::{ScanError, error_codes};

use super::directive::{
    AccessDirective, DeclareDirective, Directive, PATH_DELIMITER, ScopeDirective, UsingDirective,
};
use super::position::Position;

const USING_KEYWORD: &str = "USING";
const SCOPE_KEYWORD: &str = "SCOPE";
const DECLARE_KEYWORD: &str = "DECLARE";
const ACCESS_KEYWORD: &str = "ACCESS";

fn is_newline(ch: char) -> bool {
    ch == '\r' || ch == '\n'
}

fn is_comment_start(ch: char) -> bool {
    ch == '/'
}

fn is_scope_begin(ch: char) -> bool {
    ch == '{'
}

fn is_scope_end(ch: char) -> bool {
    ch == '}'
}

fn is_terminator(ch: char) -> bool {
    ch == ';'
}

/// The scanning state machine. Consumes the whole input once and builds
/// the ordered directive sequence.
#[derive(Debug)]
pub struct Scanner {
    input: Vec<char>,
    position: Position,
    /// Directive keyword being accumulated. Stays set until the directive
    /// completes, so it also marks "mid-directive" for newline and comment
    /// checks.
    keyword: String,
    args: Vec<String>,
    /// Scope prefix stack; index 0 is the implicit root and is never
    /// popped. Each entry ends in the path delimiter.
    scope: Vec<String>,
    /// Alias set by the most recent USING. Purely textual: it is not
    /// restored on scope exit.
    alias: Option<String>,
    pending_slashes: u8,
    /// Line on which an active `//` comment started. The comment is over
    /// once the scanner moves past that line.
    comment_line: Option<usize>,
    directives: Vec<Directive>,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: Position::default(),
            keyword: String::new(),
            args: Vec::new(),
            scope: vec![PATH_DELIMITER.to_string()],
            alias: None,
            pending_slashes: 0,
            comment_line: None,
            directives: Vec::new(),
        }
    }

    /// Consume the input and produce the directive sequence, or fail on
    /// the first structural error.
    pub fn scan(mut self) -> Result<Vec<Directive>, ScanError> {
        for index in 0..self.input.len() {
            let ch = self.input[index];
            self.position.advance();
            if self.check_newline(ch)? {
                continue;
            }
            if self.in_comment() {
                continue;
            }
            if self.check_comment_start(ch)? {
                continue;
            }
            self.check_directive(ch)?;
        }

        if self.scope.len() > 1 {
            return Err(ScanError::new(
                &error_codes::UNBALANCED_SCOPE,
                "scope is not closed before end of input",
                self.position,
            ));
        }

        Ok(self.directives)
    }

    fn in_comment(&self) -> bool {
        self.comment_line == Some(self.position.line)
    }

    fn check_newline(&mut self, ch: char) -> Result<bool, ScanError> {
        if !is_newline(ch) {
            return Ok(false);
        }
        if !self.in_comment() && !self.keyword.is_empty() {
            return Err(ScanError::new(
                &error_codes::UNFINISHED_DIRECTIVE,
                "directive is not finished",
                self.position,
            ));
        }
        self.position.newline();
        Ok(true)
    }

    fn check_comment_start(&mut self, ch: char) -> Result<bool, ScanError> {
        if !is_comment_start(ch) {
            if self.pending_slashes > 0 {
                // there is no division in this language, so a lone slash
                // can only be a botched comment
                return Err(ScanError::new(
                    &error_codes::UNEXPECTED_SYMBOL,
                    format!("unexpected symbol '{}'", ch),
                    self.position,
                ));
            }
            return Ok(false);
        }
        if !self.keyword.is_empty() {
            return Err(ScanError::new(
                &error_codes::COMMENT_IN_DIRECTIVE,
                "directive is not finished, but a comment started",
                self.position,
            ));
        }
        self.pending_slashes += 1;
        if self.pending_slashes == 2 {
            self.comment_line = Some(self.position.line);
            self.pending_slashes = 0;
        }
        Ok(true)
    }

    fn check_directive(&mut self, ch: char) -> Result<(), ScanError> {
        if ch.is_whitespace() {
            if self.keyword.is_empty() {
                // spaces before any directive
                return Ok(());
            }
            if let Some(last) = self.args.last()
                && last.is_empty()
            {
                // collapse runs of separators
                return Ok(());
            }
            self.args.push(String::new());
            return Ok(());
        }

        if is_terminator(ch) || is_scope_begin(ch) {
            return self.build_directive(ch);
        }

        if is_scope_end(ch) {
            if self.scope.len() < 2 {
                return Err(ScanError::new(
                    &error_codes::UNBALANCED_SCOPE,
                    "more scope ends than scope starts",
                    self.position,
                ));
            }
            self.scope.pop();
            return Ok(());
        }

        match self.args.last_mut() {
            Some(arg) => arg.push(ch),
            None => self.keyword.push(ch),
        }
        Ok(())
    }

    fn build_directive(&mut self, terminator: char) -> Result<(), ScanError> {
        match self.keyword.as_str() {
            USING_KEYWORD => self.build_using(terminator)?,
            SCOPE_KEYWORD => self.build_scope(terminator)?,
            DECLARE_KEYWORD => self.build_declare(terminator)?,
            ACCESS_KEYWORD => self.build_access(terminator)?,
            unknown => {
                return Err(ScanError::new(
                    &error_codes::UNKNOWN_DIRECTIVE,
                    format!("unknown directive \"{}\"", unknown),
                    self.position,
                ));
            }
        }
        self.keyword.clear();
        self.args.clear();
        Ok(())
    }

    fn build_using(&mut self, terminator: char) -> Result<(), ScanError> {
        let name = self.take_single_arg(terminator, false)?;
        // a new USING replaces the previous alias outright
        self.alias = Some(name.clone());
        self.directives.push(Directive::Using(UsingDirective {
            name,
            position: self.position,
        }));
        Ok(())
    }

    fn build_scope(&mut self, terminator: char) -> Result<(), ScanError> {
        let name = self.take_single_arg(terminator, true)?;
        // the scope's own path; its children hang off path + delimiter
        let path = format!("{}{}", self.innermost_prefix(), name);
        self.scope.push(format!("{}{}", path, PATH_DELIMITER));
        self.directives.push(Directive::Scope(ScopeDirective {
            name,
            path,
            position: self.position,
        }));
        Ok(())
    }

    fn build_declare(&mut self, terminator: char) -> Result<(), ScanError> {
        let name = self.take_single_arg(terminator, false)?;
        let path = format!("{}{}", self.innermost_prefix(), name);
        self.directives.push(Directive::Declare(DeclareDirective {
            name,
            path,
            position: self.position,
        }));
        Ok(())
    }

    fn build_access(&mut self, terminator: char) -> Result<(), ScanError> {
        let name = self.take_single_arg(terminator, false)?;

        if name.starts_with(PATH_DELIMITER) {
            // absolute path: exactly one candidate, ambiguity impossible
            self.directives.push(Directive::Access(AccessDirective {
                direct_candidates: vec![name.clone()],
                aliased_candidates: Vec::new(),
                name,
                position: self.position,
            }));
            return Ok(());
        }

        let direct_candidates = self
            .scope
            .iter()
            .map(|prefix| format!("{}{}", prefix, name))
            .collect();
        let aliased_candidates = match &self.alias {
            Some(alias) => self
                .scope
                .iter()
                .map(|prefix| format!("{}{}{}{}", prefix, alias, PATH_DELIMITER, name))
                .collect(),
            None => Vec::new(),
        };
        self.directives.push(Directive::Access(AccessDirective {
            name,
            direct_candidates,
            aliased_candidates,
            position: self.position,
        }));
        Ok(())
    }

    /// Takes the single expected argument, checking the argument count and
    /// the terminator character. A trailing separator leaves one empty
    /// argument behind, which does not count.
    fn take_single_arg(&mut self, terminator: char, wants_scope_begin: bool) -> Result<String, ScanError> {
        let mut count = self.args.len();
        if let Some(last) = self.args.last()
            && last.is_empty()
        {
            count -= 1;
        }
        if count != 1 {
            return Err(ScanError::new(
                &error_codes::WRONG_ARGUMENT_COUNT,
                format!("expected exactly 1 argument, found {}", count),
                self.position,
            ));
        }
        let expected = if wants_scope_begin {
            is_scope_begin(terminator)
        } else {
            is_terminator(terminator)
        };
        if !expected {
            return Err(ScanError::new(
                &error_codes::UNEXPECTED_TERMINATOR,
                format!("unexpected end of directive '{}'", terminator),
                self.position,
            ));
        }
        Ok(std::mem::take(&mut self.args[0]))
    }

    fn innermost_prefix(&self) -> &str {
        // the stack never shrinks below the implicit root entry
        self.scope.last().map(String::as_str).unwrap_or(PATH_DELIMITER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Result<Vec<Directive>, ScanError> {
        Scanner::new(input).scan()
    }

    #[test]
    fn empty_input_scans_to_nothing() {
        assert_eq!(scan("").unwrap(), Vec::new());
        assert_eq!(scan("   \n\n  ").unwrap(), Vec::new());
    }

    #[test]
    fn declare_gets_root_qualified_path() {
        let directives = scan("DECLARE x;").unwrap();
        assert_eq!(directives.len(), 1);
        match &directives[0] {
            Directive::Declare(decl) => {
                assert_eq!(decl.name, "x");
                assert_eq!(decl.path, "::x");
                assert_eq!(decl.position, Position::new(1, 10));
            }
            other => panic!("expected DECLARE, got {}", other),
        }
    }

    #[test]
    fn nested_scopes_nest_their_paths() {
        let directives = scan("SCOPE a { SCOPE b { DECLARE c; } }").unwrap();
        let paths: Vec<&str> = directives
            .iter()
            .map(|d| match d {
                Directive::Scope(s) => s.path.as_str(),
                Directive::Declare(decl) => decl.path.as_str(),
                other => panic!("unexpected {}", other),
            })
            .collect();
        assert_eq!(paths, vec!["::a", "::a::b", "::a::b::c"]);
    }

    #[test]
    fn separator_runs_collapse() {
        let directives = scan("DECLARE    x   ;").unwrap();
        match &directives[0] {
            Directive::Declare(decl) => assert_eq!(decl.name, "x"),
            other => panic!("unexpected {}", other),
        }
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        let directives = scan("// DECLARE ignored; } {\nDECLARE x;").unwrap();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].keyword(), "DECLARE");
    }

    #[test]
    fn newline_inside_directive_is_structural() {
        let err = scan("DECLARE x\n;").unwrap_err();
        assert_eq!(err.diagnostic().code, "E001");
        assert_eq!(err.diagnostic().position.line, 1);
    }

    #[test]
    fn comment_inside_directive_is_structural() {
        let err = scan("DECLARE // x;").unwrap_err();
        assert_eq!(err.diagnostic().code, "E002");
    }

    #[test]
    fn lone_slash_is_structural() {
        let err = scan("/ DECLARE x;").unwrap_err();
        assert_eq!(err.diagnostic().code, "E003");
    }

    #[test]
    fn extra_scope_end_is_structural() {
        let err = scan("SCOPE a { } }").unwrap_err();
        assert_eq!(err.diagnostic().code, "E004");
    }

    #[test]
    fn unclosed_scope_is_structural() {
        let err = scan("SCOPE a { DECLARE b;").unwrap_err();
        assert_eq!(err.diagnostic().code, "E004");
    }

    #[test]
    fn wrong_argument_count_is_structural() {
        assert_eq!(scan("DECLARE;").unwrap_err().diagnostic().code, "E005");
        assert_eq!(scan("DECLARE x y;").unwrap_err().diagnostic().code, "E005");
    }

    #[test]
    fn scope_requires_brace_and_others_require_semicolon() {
        assert_eq!(scan("SCOPE a;").unwrap_err().diagnostic().code, "E006");
        assert_eq!(scan("DECLARE x {").unwrap_err().diagnostic().code, "E006");
    }

    #[test]
    fn unknown_directive_aborts_the_scan() {
        let err = scan("DEFINE x;").unwrap_err();
        assert_eq!(err.diagnostic().code, "E101");
    }

    #[test]
    fn absolute_access_has_one_candidate() {
        let directives = scan("ACCESS ::a::b;").unwrap();
        match &directives[0] {
            Directive::Access(access) => {
                assert_eq!(access.direct_candidates, vec!["::a::b"]);
                assert!(access.aliased_candidates.is_empty());
            }
            other => panic!("unexpected {}", other),
        }
    }

    #[test]
    fn access_builds_candidates_per_scope_level() {
        let source = "SCOPE a { DECLARE b; } USING a; SCOPE c { ACCESS b; }";
        let directives = scan(source).unwrap();
        let access = directives
            .iter()
            .find_map(|d| match d {
                Directive::Access(access) => Some(access),
                _ => None,
            })
            .unwrap();
        assert_eq!(access.direct_candidates, vec!["::b", "::c::b"]);
        assert_eq!(access.aliased_candidates, vec!["::a::b", "::c::a::b"]);
    }

    #[test]
    fn new_using_replaces_previous_alias() {
        let directives = scan("USING a; USING b; ACCESS x;").unwrap();
        let access = directives
            .iter()
            .find_map(|d| match d {
                Directive::Access(access) => Some(access),
                _ => None,
            })
            .unwrap();
        assert_eq!(access.aliased_candidates, vec!["::b::x"]);
    }
}
