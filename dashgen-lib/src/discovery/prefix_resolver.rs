use super::naming::normalize_name;

const LOG_TARGET: &str = "    prefix";

/// Separator appended to a prefix when the configuration does not name one.
pub const DEFAULT_SEPARATOR: &str = "_";

/// One metrics configuration as written in the analyzed code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceConfig {
    pub raw_prefix: String,
    pub separator: String,
    pub case_sensitive: bool,

    /// Whether the code gave the prefix explicitly. When it did not, the external default applies.
    pub explicitly_set: bool,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            raw_prefix: String::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
            case_sensitive: false,
            explicitly_set: false,
        }
    }
}

impl NamespaceConfig {
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            raw_prefix: prefix.into(),
            explicitly_set: true,
            ..Self::default()
        }
    }
}

/// Tracks the active namespace prefix as traversal proceeds.
#[derive(Debug, Clone, Default)]
pub struct PrefixResolver {
    default_prefix: Option<String>,
    active_prefix: String,
    raw_prefix: String,
    case_sensitive: bool,
    distinct_prefixes: usize,
    configured: bool,
}

impl PrefixResolver {
    #[must_use]
    pub fn new(default_prefix: Option<String>) -> Self {
        let default_prefix = default_prefix.filter(|p| !p.is_empty());

        Self {
            raw_prefix: default_prefix.clone().unwrap_or_default(),
            default_prefix,
            ..Self::default()
        }
    }

    /// Apply a configuration encountered in the code.
    ///
    /// Returns `true` when the active prefix changed.
    pub fn configure(&mut self, config: &NamespaceConfig) -> bool {
        let raw = if config.explicitly_set {
            config.raw_prefix.as_str()
        } else {
            self.default_prefix.as_deref().unwrap_or_default()
        };

        let mut prefix = normalize_name(raw, config.case_sensitive);
        if !prefix.is_empty() && !prefix.ends_with(&config.separator) {
            prefix.push_str(&config.separator);
        }

        self.configured = true;
        self.case_sensitive = config.case_sensitive;
        self.raw_prefix = raw.to_string();

        if prefix == self.active_prefix {
            return false;
        }

        log::debug!(target: LOG_TARGET, "Metrics prefix changed from '{}' to '{prefix}'", self.active_prefix);
        self.active_prefix = prefix;
        self.distinct_prefixes += 1;
        true
    }

    /// The normalized prefix, separator included, that new metrics are stamped with.
    #[must_use]
    pub fn active_prefix(&self) -> &str {
        &self.active_prefix
    }

    /// The prefix as written (or the default), for display purposes.
    #[must_use]
    pub fn raw_prefix(&self) -> &str {
        &self.raw_prefix
    }

    /// Case sensitivity of the active namespace.
    #[must_use]
    pub const fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// How many times the active prefix changed over the run.
    #[must_use]
    pub const fn distinct_prefixes(&self) -> usize {
        self.distinct_prefixes
    }

    /// Whether any metrics configuration was seen.
    #[must_use]
    pub const fn found_configuration(&self) -> bool {
        self.configured
    }
}
