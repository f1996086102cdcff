//! Parsing options and configuration.

/// Options for parsing document containers.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum accepted input size in bytes (0 = unlimited)
    pub max_bytes: usize,

    /// Whether to read the container's core-properties part
    pub extract_metadata: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum accepted input size in bytes.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Enable or disable metadata extraction.
    pub fn with_metadata(mut self, extract: bool) -> Self {
        self.extract_metadata = extract;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_bytes: 0,
            extract_metadata: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .with_max_bytes(20 * 1024 * 1024)
            .with_metadata(false);

        assert_eq!(options.max_bytes, 20 * 1024 * 1024);
        assert!(!options.extract_metadata);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.max_bytes, 0);
        assert!(options.extract_metadata);
    }
}
