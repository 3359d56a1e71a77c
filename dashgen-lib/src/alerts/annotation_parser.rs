use super::directive::{DirectiveKind, parse_directive};
use super::{AlertDefaults, AlertRuleRequest};
use crate::error::GenerationError;
use crate::syntax::SourceLocation;

const LOG_TARGET: &str = "annotation";

/// Collects alert directives from comment blocks over a whole run.
#[derive(Debug, Default)]
pub struct AnnotationParser {
    requests: Vec<AlertRuleRequest>,
    defaults: Option<AlertDefaults>,
}

impl AnnotationParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan each line of a comment block for directives.
    ///
    /// `location` is where the block starts; each line is reported at its own line number.
    pub fn parse(&mut self, comment: &str, location: &SourceLocation) -> Result<(), GenerationError> {
        for (offset, line) in comment.lines().enumerate() {
            let line_number = location.line.saturating_add(u32::try_from(offset).unwrap_or(u32::MAX));
            let line_location = SourceLocation::new(location.unit.clone(), line_number);

            let Some(directive) = parse_directive(line, &line_location)? else {
                continue;
            };

            log::debug!(target: LOG_TARGET, "Found {:?} directive at {line_location}", directive.kind);

            match directive.kind {
                DirectiveKind::ZeroTolerance => {
                    self.requests.push(AlertRuleRequest::zero_tolerance(directive.properties, directive.location));
                }

                DirectiveKind::ElevatedRate => {
                    self.requests.push(AlertRuleRequest::elevated_rate(directive.properties, directive.location));
                }

                DirectiveKind::Defaults => {
                    if let Some(first) = &self.defaults {
                        return Err(GenerationError::DuplicateDefaults {
                            first: first.location.clone(),
                            second: directive.location,
                        });
                    }

                    self.defaults = Some(AlertDefaults::from_properties(&directive.properties, directive.location));
                }
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn requests(&self) -> &[AlertRuleRequest] {
        &self.requests
    }

    #[must_use]
    pub const fn defaults(&self) -> Option<&AlertDefaults> {
        self.defaults.as_ref()
    }

    /// Hand over everything collected.
    #[must_use]
    pub fn finish(self) -> (Vec<AlertRuleRequest>, Option<AlertDefaults>) {
        (self.requests, self.defaults)
    }
}
