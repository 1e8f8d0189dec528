//! Options shared by parsers that may accept macros in place of values.

/// Which macro kinds a parser accepts where a plain value is expected.
///
/// # Examples
/// ```
/// use monconf_parsers::ParserOptions;
/// let options = ParserOptions::default().with_lld_macros(true);
/// assert!(options.user_macros);
/// assert!(options.lld_macros);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParserOptions {
    /// Accept `{$NAME}` user macros.
    pub user_macros: bool,
    /// Accept `{#NAME}` low-level discovery macros.
    pub lld_macros: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            user_macros: true,
            lld_macros: false,
        }
    }
}

impl ParserOptions {
    /// Options rejecting every macro kind.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            user_macros: false,
            lld_macros: false,
        }
    }

    /// Set whether user macros are accepted.
    #[must_use]
    pub const fn with_user_macros(mut self, enabled: bool) -> Self {
        self.user_macros = enabled;
        self
    }

    /// Set whether LLD macros are accepted.
    #[must_use]
    pub const fn with_lld_macros(mut self, enabled: bool) -> Self {
        self.lld_macros = enabled;
        self
    }
}
