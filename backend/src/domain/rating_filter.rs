//! Optional minimum-rating filter for category listings.

use super::Ebook;

/// Minimum rating parsed permissively from a query value.
///
/// Values that do not parse as a finite number disable the filter instead of
/// failing the request.
///
/// # Examples
/// ```
/// use ebooks::domain::MinimumRating;
///
/// assert_eq!(MinimumRating::parse(Some("4.0")).threshold(), Some(4.0));
/// assert_eq!(MinimumRating::parse(Some("abc")).threshold(), None);
/// assert_eq!(MinimumRating::parse(None).threshold(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MinimumRating(Option<f64>);

impl MinimumRating {
    /// Parse a raw query value; surrounding whitespace is ignored.
    pub fn parse(raw: Option<&str>) -> Self {
        let threshold = raw
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite());
        Self(threshold)
    }

    /// The active threshold, if any.
    pub fn threshold(&self) -> Option<f64> {
        self.0
    }

    /// Whether `ebook` passes the filter.
    pub fn admits(&self, ebook: &Ebook) -> bool {
        self.0.is_none_or(|min| ebook.rating >= min)
    }

    /// Retain the ebooks that pass the filter, preserving order.
    pub fn apply(&self, ebooks: Vec<Ebook>) -> Vec<Ebook> {
        ebooks.into_iter().filter(|ebook| self.admits(ebook)).collect()
    }
}
