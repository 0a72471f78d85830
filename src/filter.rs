//! Filetype filtering module.
//!
//! This module lets callers leave chosen filetypes out of the aggregated
//! totals, for example generated `lock` files or vendored `min.js` bundles.
//! Commit records keep every file regardless of the filter.

/// A filter that decides which filetypes are aggregated.
///
/// The default filter accepts every filetype.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiletypeFilter {
    /// Filetypes to leave out, compared case-insensitively.
    excluded: Vec<String>,
}

impl FiletypeFilter {
    /// Creates a filter that accepts everything.
    ///
    /// # Example
    ///
    /// ```
    /// use authorstat::filter::FiletypeFilter;
    ///
    /// let filter = FiletypeFilter::new();
    /// assert!(filter.accepts("rs"));
    /// assert!(filter.accepts("md"));
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filetype to the exclusion list.
    ///
    /// # Arguments
    ///
    /// * `filetype` - The extension to exclude, with or without a leading dot.
    ///
    /// # Example
    ///
    /// ```
    /// use authorstat::filter::FiletypeFilter;
    ///
    /// let filter = FiletypeFilter::new().exclude("lock").exclude(".svg");
    /// assert!(!filter.accepts("lock"));
    /// assert!(!filter.accepts("SVG"));
    /// assert!(filter.accepts("rs"));
    /// ```
    pub fn exclude(mut self, filetype: impl AsRef<str>) -> Self {
        let filetype = filetype.as_ref().trim_start_matches('.');
        self.excluded.push(filetype.to_lowercase());
        self
    }

    /// Determines if additions for `filetype` should be aggregated.
    pub fn accepts(&self, filetype: &str) -> bool {
        let filetype = filetype.to_lowercase();
        !self.excluded.iter().any(|e| *e == filetype)
    }

    /// Returns `true` if nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }

    /// The excluded filetypes, lowercased.
    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }
}
