//! Code generation settings.

use arbor_syntax::PrettyConfig;

/// Settings for [`crate::generate_with_config`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Run the minifying pass before printing.
    pub minify: bool,
    /// Printer layout.
    pub pretty: PrettyConfig,
}

impl GenerateConfig {
    /// Compact output, no minifying pass.
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            minify: false,
            pretty: PrettyConfig::compact(),
        }
    }

    /// Indented output, no minifying pass.
    #[must_use]
    pub const fn beautified() -> Self {
        Self {
            minify: false,
            pretty: PrettyConfig::beautified(),
        }
    }

    /// Minified compact output.
    #[must_use]
    pub const fn minified() -> Self {
        Self {
            minify: true,
            pretty: PrettyConfig::compact(),
        }
    }

    /// Maps the two flags taken by [`crate::generate`].
    #[must_use]
    pub const fn from_flags(minify: bool, beautify: bool) -> Self {
        let pretty = if beautify {
            PrettyConfig::beautified()
        } else {
            PrettyConfig::compact()
        };
        Self { minify, pretty }
    }

    /// Builder method to toggle the minifying pass.
    #[must_use]
    pub const fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Builder method to set the printer layout.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: PrettyConfig) -> Self {
        self.pretty = pretty;
        self
    }
}
