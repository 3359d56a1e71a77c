//! Front end for Rust sources, built on `ra_ap_syntax`.
//!
//! Type resolution here is syntactic: a receiver's type is taken from the `let` binding,
//! function parameter or struct field that introduced it (explicit type annotation, or the
//! type of a `Type::constructor(..)` / `Type { .. }` initializer), or from the declared type of
//! a `static` such as `static METRICS: LazyLock<PrometheusMetrics>`. Constants are the
//! `const`/`static` items of the same file whose bodies are literals. Bindings are
//! file-scoped, so shadowing across functions is not modeled.

use super::{CallSite, CommentBlock, Expr, Node, ParsedUnit, StructLiteral};
use crate::HashMap;
use ra_ap_syntax::ast::{self, HasArgList, HasName};
use ra_ap_syntax::{AstNode, Edition, NodeOrToken, SourceFile, SyntaxKind, SyntaxNode};

const LOG_TARGET: &str = "    syntax";

struct RustFrontEnd {
    line_starts: Vec<usize>,
    bindings: HashMap<String, String>,
    fields: HashMap<String, String>,
    unit: ParsedUnit,
}

impl RustFrontEnd {
    fn new(path: &str, source: &str) -> Self {
        let line_starts: Vec<usize> = core::iter::once(0)
            .chain(source.char_indices().filter_map(|(i, c)| (c == '\n').then_some(i + 1)))
            .collect();

        Self {
            line_starts,
            bindings: HashMap::default(),
            fields: HashMap::default(),
            unit: ParsedUnit::new(path),
        }
    }

    /// Gather constants and the types of named bindings before the ordered walk.
    fn collect_declarations(&mut self, root: &SyntaxNode) {
        for node in root.descendants() {
            if let Some(item) = ast::Const::cast(node.clone()) {
                self.define_item(item.name(), item.ty(), item.body());
            } else if let Some(item) = ast::Static::cast(node.clone()) {
                self.define_item(item.name(), item.ty(), item.body());
            } else if let Some(stmt) = ast::LetStmt::cast(node.clone()) {
                let Some(ast::Pat::IdentPat(pat)) = stmt.pat() else { continue };
                let Some(name) = pat.name() else { continue };

                let ty = stmt
                    .ty()
                    .map(|ty| ty.syntax().text().to_string())
                    .or_else(|| stmt.initializer().and_then(|init| infer_type(&init)));

                if let Some(ty) = ty {
                    let _ = self.bindings.insert(name.syntax().text().to_string(), ty);
                }
            } else if let Some(param) = ast::Param::cast(node.clone()) {
                if let (Some(ast::Pat::IdentPat(pat)), Some(ty)) = (param.pat(), param.ty())
                    && let Some(name) = pat.name()
                {
                    let _ = self.bindings.insert(name.syntax().text().to_string(), ty.syntax().text().to_string());
                }
            } else if let Some(field) = ast::RecordField::cast(node)
                && let (Some(name), Some(ty)) = (field.name(), field.ty())
            {
                let _ = self.fields.insert(name.syntax().text().to_string(), ty.syntax().text().to_string());
            }
        }
    }

    /// A `const`/`static` item is both a potential constant and a typed global binding.
    fn define_item(&mut self, name: Option<ast::Name>, ty: Option<ast::Type>, body: Option<ast::Expr>) {
        let Some(name) = name else { return };
        let name = name.syntax().text().to_string();

        if let Some(ty) = ty {
            let _ = self.bindings.insert(name.clone(), ty.syntax().text().to_string());
        }

        if let Some(body) = body {
            self.define_constant(name, &body);
        }
    }

    fn define_constant(&mut self, name: String, body: &ast::Expr) {
        match convert_expr(body) {
            Expr::Opaque => log::trace!(target: LOG_TARGET, "Constant '{name}' has no literal value"),
            value => self.unit.define_constant(name, value),
        }
    }

    /// Preorder walk emitting comments, struct literals and method calls.
    fn walk(&mut self, root: &SyntaxNode) {
        for element in root.descendants_with_tokens() {
            match element {
                NodeOrToken::Token(token) if token.kind() == SyntaxKind::COMMENT => {
                    let line = self.offset_to_line(usize::from(token.text_range().start()));
                    self.unit.push(Node::Comment(CommentBlock {
                        text: token.text().to_string(),
                        line,
                    }));
                }
                NodeOrToken::Node(node) => {
                    let line = self.offset_to_line(usize::from(node.text_range().start()));

                    if let Some(record) = ast::RecordExpr::cast(node.clone()) {
                        self.unit.push(Node::StructLiteral(struct_literal(&record, line)));
                    } else if let Some(call) = ast::MethodCallExpr::cast(node)
                        && let Some(name_ref) = call.name_ref()
                    {
                        let receiver_type = call.receiver().and_then(|receiver| self.receiver_type(&receiver));
                        let args = call
                            .arg_list()
                            .map(|list| list.args().map(|arg| convert_expr(&arg)).collect())
                            .unwrap_or_default();

                        self.unit.push(Node::Call(CallSite {
                            receiver_type,
                            method: to_upper_camel(&name_ref.syntax().text().to_string()),
                            args,
                            line,
                        }));
                    }
                }
                NodeOrToken::Token(_) => {}
            }
        }
    }

    fn receiver_type(&self, receiver: &ast::Expr) -> Option<String> {
        match receiver {
            ast::Expr::PathExpr(path) => {
                let text = path.syntax().text().to_string();
                self.bindings.get(last_segment(&text)).cloned()
            }
            ast::Expr::FieldExpr(field) => {
                let name = field.name_ref()?.syntax().text().to_string();
                self.fields.get(&name).cloned()
            }
            ast::Expr::RefExpr(inner) => self.receiver_type(&inner.expr()?),
            ast::Expr::ParenExpr(inner) => self.receiver_type(&inner.expr()?),
            ast::Expr::TryExpr(inner) => self.receiver_type(&inner.expr()?),
            other => infer_type(other),
        }
    }

    /// Convert a byte offset to a 1-based line number
    fn offset_to_line(&self, offset: usize) -> u32 {
        let line = self.line_starts.binary_search(&offset).unwrap_or_else(|line| line.saturating_sub(1));
        u32::try_from(line + 1).unwrap_or(u32::MAX)
    }
}

fn struct_literal(record: &ast::RecordExpr, line: u32) -> StructLiteral {
    let fields = record
        .record_expr_field_list()
        .map(|list| {
            list.fields()
                .filter_map(|field| {
                    let value = field.expr();
                    let name = match field.name_ref() {
                        Some(name_ref) => name_ref.syntax().text().to_string(),
                        // Shorthand `Opts { prefix }`
                        None => value.as_ref()?.syntax().text().to_string(),
                    };

                    let value = value.map_or_else(|| Expr::Ident(name.clone()), |expr| convert_expr(&expr));
                    Some((name, value))
                })
                .collect()
        })
        .unwrap_or_default();

    StructLiteral {
        resolved_type: record.path().map(|path| path.syntax().text().to_string()),
        fields,
        line,
    }
}

/// The type produced by an initializer, when it is evident from the syntax alone.
fn infer_type(expr: &ast::Expr) -> Option<String> {
    match expr {
        ast::Expr::CallExpr(call) => {
            let ast::Expr::PathExpr(path) = call.expr()? else { return None };
            let text = path.syntax().text().to_string();
            let (ty, _constructor) = text.rsplit_once("::")?;
            Some(ty.to_string())
        }
        ast::Expr::RecordExpr(record) => record.path().map(|path| path.syntax().text().to_string()),
        ast::Expr::RefExpr(inner) => infer_type(&inner.expr()?),
        ast::Expr::ParenExpr(inner) => infer_type(&inner.expr()?),
        ast::Expr::TryExpr(inner) => infer_type(&inner.expr()?),
        _ => None,
    }
}

fn convert_expr(expr: &ast::Expr) -> Expr {
    match expr {
        ast::Expr::Literal(literal) => convert_literal(&literal.syntax().text().to_string()),
        ast::Expr::PathExpr(path) => Expr::Ident(last_segment(&path.syntax().text().to_string()).to_string()),
        ast::Expr::ArrayExpr(array) => Expr::List(
            array
                .syntax()
                .children()
                .filter_map(ast::Expr::cast)
                .map(|element| convert_expr(&element))
                .collect(),
        ),
        ast::Expr::RefExpr(inner) => inner.expr().map_or(Expr::Opaque, |e| convert_expr(&e)),
        ast::Expr::ParenExpr(inner) => inner.expr().map_or(Expr::Opaque, |e| convert_expr(&e)),
        ast::Expr::MacroExpr(mac) => mac.macro_call().map_or(Expr::Opaque, |call| convert_vec_macro(&call)),
        _ => Expr::Opaque,
    }
}

/// `vec![..]` is kept as an unparsed token tree, so pick the elements out of the tokens.
fn convert_vec_macro(call: &ast::MacroCall) -> Expr {
    let is_vec = call.path().is_some_and(|path| path.syntax().text() == "vec");
    let Some(tree) = call.token_tree() else { return Expr::Opaque };
    if !is_vec {
        return Expr::Opaque;
    }

    let elements = tree
        .syntax()
        .descendants_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .filter_map(|token| match token.kind() {
            SyntaxKind::STRING => Some(convert_literal(token.text())),
            SyntaxKind::IDENT => Some(Expr::Ident(token.text().to_string())),
            _ => None,
        })
        .collect();

    Expr::List(elements)
}

fn convert_literal(text: &str) -> Expr {
    match text {
        "true" => Expr::Bool(true),
        "false" => Expr::Bool(false),
        _ => {
            if let Some(value) = string_literal_value(text) {
                Expr::Str(value)
            } else if text.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
                Expr::Number(text.to_string())
            } else {
                Expr::Opaque
            }
        }
    }
}

fn string_literal_value(text: &str) -> Option<String> {
    if let Some(raw) = text.strip_prefix('r') {
        let inner = raw.trim_matches('#');
        return inner.strip_prefix('"')?.strip_suffix('"').map(str::to_string);
    }

    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.replace("\\\"", "\"").replace("\\\\", "\\"))
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path).trim()
}

/// `counter_with_label` becomes `CounterWithLabel`.
fn to_upper_camel(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect()
}

/// Parse a Rust source file into a compilation unit.
///
/// The parser is error tolerant: syntax errors are logged and whatever could be parsed is
/// still reported.
#[must_use]
pub fn parse_rust_source(path: &str, source: &str) -> ParsedUnit {
    let parse = SourceFile::parse(source, Edition::CURRENT);
    if !parse.errors().is_empty() {
        log::debug!(target: LOG_TARGET, "'{path}' has {} syntax error(s), continuing with a partial tree", parse.errors().len());
    }

    let root = parse.tree().syntax().clone();

    let mut front_end = RustFrontEnd::new(path, source);
    front_end.collect_declarations(&root);
    front_end.walk(&root);
    front_end.unit
}
