//! Data URI sanitization.
//!
//! Other applications can wrap a target URL in a reader-mode URL
//! (`about:reader?url=<target>`) to get it opened in a privileged view. The
//! wrapper is stripped once, at construction, and the remainder reparsed.
//!
//! Stripping repeats while any configured prefix still leads, so the result
//! is a fixed point: sanitizing it again changes nothing.

use safeintent_model::{AccessError, DataUri, RawIntent};
use tracing::debug;

/// What the sanitization pass did to the data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizeOutcome {
    /// No data URI, or no configured prefix at its start.
    Unchanged,
    /// The data URI was replaced.
    Stripped {
        /// Data URI as received.
        from: DataUri,
        /// Data URI after stripping.
        to: DataUri,
    },
}

impl SanitizeOutcome {
    /// Returns true if the data URI was replaced.
    pub fn is_stripped(&self) -> bool {
        matches!(self, Self::Stripped { .. })
    }
}

/// Remove every leading occurrence of the given prefixes.
///
/// Returns `None` when `text` does not start with any of them. Empty
/// prefixes are ignored.
pub fn strip_reader_prefix<'a, S: AsRef<str>>(text: &'a str, prefixes: &[S]) -> Option<&'a str> {
    let mut current = text;
    loop {
        let next = prefixes
            .iter()
            .map(|prefix| AsRef::<str>::as_ref(prefix))
            .filter(|prefix| !prefix.is_empty())
            .find_map(move |prefix| current.strip_prefix(prefix));
        match next {
            Some(rest) => current = rest,
            None => break,
        }
    }
    (current.len() != text.len()).then_some(current)
}

/// Strip configured prefixes from the intent's data URI in place.
///
/// # Errors
///
/// Propagates a failure to read the data URI. The intent is left untouched
/// in that case.
pub fn sanitize_data_uri<I, S>(intent: &mut I, prefixes: &[S]) -> Result<SanitizeOutcome, AccessError>
where
    I: RawIntent + ?Sized,
    S: AsRef<str>,
{
    let Some(data) = intent.data()? else {
        return Ok(SanitizeOutcome::Unchanged);
    };
    let Some(stripped) = strip_reader_prefix(data.as_str(), prefixes) else {
        return Ok(SanitizeOutcome::Unchanged);
    };

    let to = DataUri::parse(stripped);
    debug!(from = %data, to = %to, "stripped prefix from data uri");
    intent.set_data(Some(to.clone()));

    Ok(SanitizeOutcome::Stripped { from: data, to })
}
