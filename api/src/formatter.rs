//! Interfaces of the RDF serializers.

use crate::model::Triple;

/// A formatter for [`Triple`](../model/struct.Triple.html)s.
///
/// Implementations buffer or write each formatted triple; how the output is
/// finished (flushed, wrapped in a document envelope...) is left to the
/// implementation's own `finish` method, which usually consumes it.
pub trait TriplesFormatter {
    type Error;

    /// Formats one triple.
    fn format(&mut self, triple: &Triple<'_>) -> Result<(), Self::Error>;
}
