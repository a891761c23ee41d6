/// Whether a kind carries token text, a child list, or both.
///
/// Exactly one kind (`CONTEXTUALIZER`) is `Dual`; everything else commits to
/// `Leaf` or `Branch` at the type level.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Arity {
    Leaf,
    Branch,
    Dual,
}

/// The closed set of element kinds.
///
/// Grouped by family: structural tokens, operators, numbers, strings,
/// regexes, names, variables (sigil x twigil), and containers.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ElementKind {
    SEMICOLON,
    WHITESPACE,
    COMMENT,
    ENTER_DELIMITER,
    EXIT_DELIMITER,
    UNPARSED,
    HERE_DOC_BODY,

    PREFIX_OPERATOR,
    INFIX_OPERATOR,
    POSTFIX_OPERATOR,
    HYPER_OPERATOR,
    CIRCUMFIX,
    POST_CIRCUMFIX,

    BINARY_NUMBER,
    OCTAL_NUMBER,
    DECIMAL_NUMBER,
    HEX_NUMBER,
    RADIX_NUMBER,
    FLOATING_POINT_NUMBER,
    IMAGINARY_NUMBER,
    NOT_A_NUMBER,
    INFINITY,

    STRING_LITERAL,
    STRING_INTERPOLATED,
    STRING_SHELL,
    STRING_WORD_LIST,

    REGEX,
    REGEX_BODY,

    BAREWORD,
    PACKAGE_NAME,
    COLON_BAREWORD,
    ADVERB,

    SCALAR,
    DYNAMIC_SCALAR,
    ATTRIBUTE_SCALAR,
    COMPILE_TIME_SCALAR,
    MATCH_INDEX_SCALAR,
    POSITIONAL_SCALAR,
    NAMED_SCALAR,
    POD_SCALAR,
    SUBLANGUAGE_SCALAR,

    ARRAY,
    DYNAMIC_ARRAY,
    ATTRIBUTE_ARRAY,
    COMPILE_TIME_ARRAY,
    MATCH_INDEX_ARRAY,
    POSITIONAL_ARRAY,
    NAMED_ARRAY,
    POD_ARRAY,
    SUBLANGUAGE_ARRAY,

    HASH,
    DYNAMIC_HASH,
    ATTRIBUTE_HASH,
    COMPILE_TIME_HASH,
    MATCH_INDEX_HASH,
    POSITIONAL_HASH,
    NAMED_HASH,
    POD_HASH,
    SUBLANGUAGE_HASH,

    CALLABLE,
    DYNAMIC_CALLABLE,
    ATTRIBUTE_CALLABLE,
    COMPILE_TIME_CALLABLE,
    MATCH_INDEX_CALLABLE,
    POSITIONAL_CALLABLE,
    NAMED_CALLABLE,
    POD_CALLABLE,
    SUBLANGUAGE_CALLABLE,

    CONTEXTUALIZER,

    DOCUMENT,
    STATEMENT,
    BLOCK,
    SCOPE_DECLARATION,
    ROUTINE_DECLARATION,
    PACKAGE_DECLARATION,
    REGEX_DECLARATION,
    SIGNATURE,
    PARAMETER,
}

impl ElementKind {
    /// Leaf/Branch/Dual classification, fixed per kind.
    pub fn arity(self) -> Arity {
        use ElementKind::*;

        match self {
            CIRCUMFIX | POST_CIRCUMFIX | REGEX | DOCUMENT | STATEMENT | BLOCK
            | SCOPE_DECLARATION | ROUTINE_DECLARATION | PACKAGE_DECLARATION
            | REGEX_DECLARATION | SIGNATURE | PARAMETER => Arity::Branch,
            CONTEXTUALIZER => Arity::Dual,
            _ => Arity::Leaf,
        }
    }

    pub fn is_leaf(self) -> bool {
        self.arity() == Arity::Leaf
    }

    pub fn is_branch(self) -> bool {
        self.arity() == Arity::Branch
    }

    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Everything except the here-doc ghost participates in statement-level
    /// traversal.
    pub fn is_semantic(self) -> bool {
        self != Self::HERE_DOC_BODY
    }
}
