use core::fmt;

/// Where a construct was found: the compilation unit's path and a 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub unit: String,
    pub line: u32,
}

impl SourceLocation {
    #[must_use]
    pub fn new(unit: impl Into<String>, line: u32) -> Self {
        Self { unit: unit.into(), line }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.unit, self.line)
    }
}

/// An expression as far as the discovery engine needs to understand it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A string literal, quotes removed.
    Str(String),
    Bool(bool),
    /// A numeric literal, as written.
    Number(String),
    /// A reference to a named item (constant, variable, path).
    Ident(String),
    /// An array/slice/vector literal.
    List(Vec<Self>),
    /// Anything else.
    Opaque,
}

/// A comment token or group, with the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub text: String,
    pub line: u32,
}

/// A struct (composite) literal.
#[derive(Debug, Clone, PartialEq)]
pub struct StructLiteral {
    /// The statically resolved type of the literal, when known.
    pub resolved_type: Option<String>,
    pub fields: Vec<(String, Expr)>,
    pub line: u32,
}

impl StructLiteral {
    /// Look up a field by any of its accepted spellings.
    #[must_use]
    pub fn field(&self, names: &[&str]) -> Option<&Expr> {
        self.fields
            .iter()
            .find(|(name, _)| names.contains(&name.as_str()))
            .map(|(_, value)| value)
    }
}

/// A method call on some receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    /// The statically resolved type of the receiver, when known.
    pub receiver_type: Option<String>,

    /// Method name in the instrumentation API's vocabulary (e.g. `CounterWithLabel`).
    pub method: String,
    pub args: Vec<Expr>,
    pub line: u32,
}

/// The node categories the discovery traversal dispatches on.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Comment(CommentBlock),
    StructLiteral(StructLiteral),
    Call(CallSite),
}
