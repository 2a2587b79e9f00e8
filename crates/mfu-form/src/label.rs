//! Max-file-size label template.

/// A label template containing a `{filesize}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitTemplate(String);

impl LimitTemplate {
    /// Token replaced with the formatted size limit.
    pub const PLACEHOLDER: &'static str = "{filesize}";

    /// Template used when the host does not configure one.
    pub const DEFAULT: &'static str = "(Max file size: {filesize})";

    /// Wrap a template string.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// The raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute the first placeholder with `filesize`.
    ///
    /// A template without a placeholder renders unchanged.
    #[must_use]
    pub fn render(&self, filesize: &str) -> String {
        self.0.replacen(Self::PLACEHOLDER, filesize, 1)
    }
}

impl Default for LimitTemplate {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}
