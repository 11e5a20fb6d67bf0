/// Static specification of one diagnostic: a stable code plus the short
/// user-facing tag printed for it.
#[derive(Debug, Clone, Copy)]
pub struct ErrorCode {
    pub code: &'static str,
    pub title: &'static str,
}

// Structural errors. Any of these invalidates the whole parse.

pub const UNFINISHED_DIRECTIVE: ErrorCode = ErrorCode {
    code: "E001",
    title: "UNFINISHED DIRECTIVE",
};
pub const COMMENT_IN_DIRECTIVE: ErrorCode = ErrorCode {
    code: "E002",
    title: "COMMENT IN DIRECTIVE",
};
pub const UNEXPECTED_SYMBOL: ErrorCode = ErrorCode {
    code: "E003",
    title: "UNEXPECTED SYMBOL",
};
pub const UNBALANCED_SCOPE: ErrorCode = ErrorCode {
    code: "E004",
    title: "UNBALANCED SCOPE",
};
pub const WRONG_ARGUMENT_COUNT: ErrorCode = ErrorCode {
    code: "E005",
    title: "WRONG ARGUMENT COUNT",
};
pub const UNEXPECTED_TERMINATOR: ErrorCode = ErrorCode {
    code: "E006",
    title: "UNEXPECTED TERMINATOR",
};

// Semantic errors. UNKNOWN_DIRECTIVE still aborts the parse; the rest
// surface during execution and skip a single directive.

pub const UNKNOWN_DIRECTIVE: ErrorCode = ErrorCode {
    code: "E101",
    title: "UNKNOWN DIRECTIVE",
};
pub const INVALID_NAME: ErrorCode = ErrorCode {
    code: "E102",
    title: "INVALID NAME",
};
pub const DUPLICATE_DECLARATION: ErrorCode = ErrorCode {
    code: "E103",
    title: "DUPLICATE DECLARATION",
};
pub const UNRESOLVED_NAME: ErrorCode = ErrorCode {
    code: "E104",
    title: "UNRESOLVED NAME",
};
pub const AMBIGUOUS_NAME: ErrorCode = ErrorCode {
    code: "E105",
    title: "AMBIGUOUS NAME",
};
pub const INACCESSIBLE_ENTITY: ErrorCode = ErrorCode {
    code: "E106",
    title: "INACCESSIBLE ENTITY",
};
