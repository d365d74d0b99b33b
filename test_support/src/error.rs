//! Error formatting helpers for stable test assertions.

use std::error::Error;

/// Join an error with its sources, outermost first, separated by `": "`.
///
/// # Examples
///
/// ```
/// use test_support::display_error_chain;
///
/// let err = std::io::Error::other("disk on fire");
/// assert_eq!(display_error_chain(&err), "disk on fire");
/// ```
#[must_use]
pub fn display_error_chain(err: &(dyn Error + 'static)) -> String {
    let mut messages = Vec::new();
    let mut current = Some(err);
    while let Some(layer) = current {
        messages.push(layer.to_string());
        current = layer.source();
    }
    messages.join(": ")
}
