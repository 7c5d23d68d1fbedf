//! Ready-made configurations and the environment reader.

use super::{Config, DisplayConfig, Format};

impl Config {
    /// Defaults overridden by `FORMKIT_LOG` (or `RUST_LOG`),
    /// `FORMKIT_LOG_FORMAT` and `NO_COLOR`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`Config::from_env`] over any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("FORMKIT_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("FORMKIT_LOG_FORMAT") {
            config.format = format.parse().unwrap_or_default();
            if config.format == Format::Json {
                config.display.colors = false;
            }
        }

        if let Some(colors) = lookup("NO_COLOR") {
            config.display.colors = colors.is_empty();
        }

        config
    }

    /// Pretty output at `debug`, with call sites. For running the demos.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::with("debug", Format::Pretty);
        config.display.source = true;
        config
    }

    /// JSON lines at `info`, fields flattened, no ANSI codes.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::with("info", Format::Json);
        config.display = DisplayConfig {
            colors: false,
            flatten: true,
            ..config.display
        };
        config
    }

    /// Everything at `trace`, compact and without timestamps, so captured
    /// test output stays stable.
    #[must_use]
    pub fn test() -> Self {
        let mut config = Self::with("trace", Format::Compact);
        config.display.colors = false;
        config.display.time = false;
        config
    }

    fn with(level: &str, format: Format) -> Self {
        Self {
            level: level.to_string(),
            format,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn formkit_log_takes_precedence() {
        let config = Config::from_lookup(lookup(&[
            ("FORMKIT_LOG", "formkit_form=trace"),
            ("RUST_LOG", "warn"),
        ]));
        assert_eq!(config.level, "formkit_form=trace");
    }

    #[test]
    fn rust_log_is_fallback() {
        let config = Config::from_lookup(lookup(&[("RUST_LOG", "warn")]));
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn json_format_disables_colors() {
        let config = Config::from_lookup(lookup(&[("FORMKIT_LOG_FORMAT", "json")]));
        assert_eq!(config.format, Format::Json);
        assert!(!config.display.colors);
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn presets_differ_in_format() {
        assert_eq!(Config::development().format, Format::Pretty);
        assert_eq!(Config::production().format, Format::Json);
        assert!(!Config::test().display.time);
    }
}
