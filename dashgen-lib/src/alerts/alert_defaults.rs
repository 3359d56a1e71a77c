use crate::syntax::SourceLocation;

/// Project-wide values applied to every alert rule that does not set them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDefaults {
    pub display_prefix: Option<String>,
    pub team: Option<String>,
    pub severity: Option<String>,
    pub location: SourceLocation,
}

impl AlertDefaults {
    /// Build from directive properties. Unknown keys are ignored and empty values count as absent.
    #[must_use]
    pub fn from_properties(properties: &[(String, String)], location: SourceLocation) -> Self {
        let lookup = |key: &str| {
            properties
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .filter(|v| !v.is_empty())
        };

        Self {
            display_prefix: lookup("displayPrefix"),
            team: lookup("team"),
            severity: lookup("severity"),
            location,
        }
    }
}
