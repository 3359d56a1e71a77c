//! The `@Marker(key = value, ...)` directive grammar.

use crate::discovery::naming::strip_quotes;
use crate::error::GenerationError;
use crate::syntax::SourceLocation;
use regex::Regex;
use std::sync::LazyLock;

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(ZeroToleranceErrorAlertRule|ElevatedErrorRateAlertRule|AlertDefaults)\b").expect("invalid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    ZeroTolerance,
    ElevatedRate,
    Defaults,
}

impl DirectiveKind {
    fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "ZeroToleranceErrorAlertRule" => Some(Self::ZeroTolerance),
            "ElevatedErrorRateAlertRule" => Some(Self::ElevatedRate),
            "AlertDefaults" => Some(Self::Defaults),
            _ => None,
        }
    }
}

/// A directive found on one comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,

    /// Properties in the order written.
    pub properties: Vec<(String, String)>,
    pub location: SourceLocation,
}

/// Look for a directive on a single line.
///
/// Returns `Ok(None)` when the line carries no marker.
pub fn parse_directive(line: &str, location: &SourceLocation) -> Result<Option<Directive>, GenerationError> {
    let Some(captures) = MARKER.captures(line) else {
        return Ok(None);
    };

    let (Some(whole), Some(marker)) = (captures.get(0), captures.get(1)) else {
        return Ok(None);
    };

    let Some(kind) = DirectiveKind::from_marker(marker.as_str()) else {
        return Ok(None);
    };

    let malformed = |reason: &'static str| GenerationError::MalformedDirective {
        location: location.clone(),
        line: line.trim().to_string(),
        reason,
    };

    let rest = &line[whole.end()..];
    let open = rest.find('(').ok_or_else(|| malformed("missing opening parenthesis"))?;
    let payload = enclosed_payload(&rest[open + 1..]).ok_or_else(|| malformed("unmatched parenthesis"))?;

    let mut properties = Vec::new();
    for segment in split_top_level(payload) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let (key, value) = segment.split_once('=').ok_or_else(|| malformed("property without `=`"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed("property without a name"));
        }

        properties.push((key.to_string(), strip_quotes(value.trim()).to_string()));
    }

    Ok(Some(Directive {
        kind,
        properties,
        location: location.clone(),
    }))
}

/// The text up to the parenthesis that closes an already-opened one.
fn enclosed_payload(text: &str) -> Option<&str> {
    let mut depth = 0_usize;
    let mut in_quotes = false;

    for (i, c) in text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => {
                if depth == 0 {
                    return Some(&text[..i]);
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    None
}

/// Split on commas outside quotes and nested parentheses.
fn split_top_level(payload: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0_usize;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in payload.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => depth = depth.saturating_sub(1),
            ',' if !in_quotes && depth == 0 => {
                segments.push(&payload[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    segments.push(&payload[start..]);
    segments
}
