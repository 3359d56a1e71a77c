use super::{CallSite, CommentBlock, Expr, Node, StructLiteral};
use crate::HashMap;

/// A parsed, type-resolved compilation unit.
///
/// This is the capability the discovery engine consumes from a language front end: a
/// preorder list of the nodes it cares about, each annotated with statically resolved types,
/// plus constant resolution for identifiers.
pub trait CompilationUnit {
    /// Stable identifier for the unit, used in source locations.
    fn path(&self) -> &str;

    /// The unit's nodes, in preorder.
    fn nodes(&self) -> &[Node];

    /// The compile-time constant value of `name`, if it is statically known.
    fn constant_value(&self, name: &str) -> Option<&Expr>;
}

/// Resolve an expression to text, folding identifiers through the unit's constants.
///
/// Returns `None` when the expression is not a literal and is not a known constant.
#[must_use]
pub fn resolve_text<U: CompilationUnit + ?Sized>(expr: &Expr, unit: &U) -> Option<String> {
    match expr {
        Expr::Str(s) | Expr::Number(s) => Some(s.clone()),
        Expr::Bool(b) => Some(b.to_string()),
        Expr::Ident(name) => match unit.constant_value(name)? {
            Expr::Ident(_) => None,
            value => resolve_text(value, unit),
        },
        Expr::List(_) | Expr::Opaque => None,
    }
}

/// Resolve an expression to a boolean, folding identifiers through the unit's constants.
#[must_use]
pub fn resolve_bool<U: CompilationUnit + ?Sized>(expr: &Expr, unit: &U) -> Option<bool> {
    match expr {
        Expr::Bool(b) => Some(*b),
        Expr::Ident(name) => match unit.constant_value(name)? {
            Expr::Bool(b) => Some(*b),
            _ => None,
        },
        _ => None,
    }
}

/// An in-memory compilation unit.
///
/// Produced by the Rust source front end; also convenient for building units by hand.
#[derive(Debug, Clone, Default)]
pub struct ParsedUnit {
    path: String,
    nodes: Vec<Node>,
    constants: HashMap<String, Expr>,
}

impl ParsedUnit {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            nodes: Vec::new(),
            constants: HashMap::default(),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn define_constant(&mut self, name: impl Into<String>, value: Expr) {
        let _ = self.constants.insert(name.into(), value);
    }

    #[must_use]
    pub fn with_comment(mut self, line: u32, text: impl Into<String>) -> Self {
        self.push(Node::Comment(CommentBlock { text: text.into(), line }));
        self
    }

    #[must_use]
    pub fn with_struct_literal(mut self, line: u32, resolved_type: &str, fields: Vec<(&str, Expr)>) -> Self {
        self.push(Node::StructLiteral(StructLiteral {
            resolved_type: Some(resolved_type.to_string()),
            fields: fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            line,
        }));
        self
    }

    #[must_use]
    pub fn with_call(mut self, line: u32, receiver_type: &str, method: &str, args: Vec<Expr>) -> Self {
        self.push(Node::Call(CallSite {
            receiver_type: Some(receiver_type.to_string()),
            method: method.to_string(),
            args,
            line,
        }));
        self
    }

    #[must_use]
    pub fn with_constant(mut self, name: &str, value: Expr) -> Self {
        self.define_constant(name, value);
        self
    }
}

impl CompilationUnit for ParsedUnit {
    fn path(&self) -> &str {
        &self.path
    }

    fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn constant_value(&self, name: &str) -> Option<&Expr> {
        self.constants.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_literal() {
        let unit = ParsedUnit::new("a.rs");
        assert_eq!(resolve_text(&Expr::Str("city".into()), &unit), Some("city".into()));
        assert_eq!(resolve_text(&Expr::Number("1.5".into()), &unit), Some("1.5".into()));
        assert_eq!(resolve_text(&Expr::Bool(true), &unit), Some("true".into()));
    }

    #[test]
    fn test_resolve_constant() {
        let unit = ParsedUnit::new("a.rs").with_constant("CITY_LABEL", Expr::Str("city".into()));
        assert_eq!(resolve_text(&Expr::Ident("CITY_LABEL".into()), &unit), Some("city".into()));
    }

    #[test]
    fn test_resolve_chained_constant() {
        let unit = ParsedUnit::new("a.rs")
            .with_constant("A", Expr::Ident("B".into()))
            .with_constant("B", Expr::Str("b".into()));

        // Only one level of folding: a constant must have a literal body
        assert_eq!(resolve_text(&Expr::Ident("A".into()), &unit), None);
        assert_eq!(resolve_text(&Expr::Ident("B".into()), &unit), Some("b".into()));
    }

    #[test]
    fn test_unresolvable() {
        let unit = ParsedUnit::new("a.rs");
        assert_eq!(resolve_text(&Expr::Ident("missing".into()), &unit), None);
        assert_eq!(resolve_text(&Expr::Opaque, &unit), None);
        assert_eq!(resolve_text(&Expr::List(vec![]), &unit), None);
    }

    #[test]
    fn test_resolve_bool() {
        let unit = ParsedUnit::new("a.rs").with_constant("SENSITIVE", Expr::Bool(true));
        assert_eq!(resolve_bool(&Expr::Bool(false), &unit), Some(false));
        assert_eq!(resolve_bool(&Expr::Ident("SENSITIVE".into()), &unit), Some(true));
        assert_eq!(resolve_bool(&Expr::Str("true".into()), &unit), None);
    }
}
