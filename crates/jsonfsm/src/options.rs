/// Decode options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Reject tokens remaining after the document root closes.
    ///
    /// Off by default: trailing input is tokenized but ignored, and the
    /// first complete document is returned.
    pub strict: bool,
}
