//! Abbreviating [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/)
//! serializer, with the Adobe XMP profile variant.
//!
//! Unlike a streaming formatter, [`RdfXmlaFormatter`] buffers the whole
//! graph: which subjects can be typed elements, which blank nodes can be
//! nested anonymously and which need an `rdf:nodeID` all depend on counts
//! over the complete input. Statements go in through
//! [`RdfXmlaFormatter::format`]; the document comes out of
//! [`RdfXmlaFormatter::finish`].

mod avltree;
mod error;
mod qname;
mod serializer;
mod subject;
mod term;
mod uri;
mod utils;

pub use crate::error::RdfXmlaError;
pub use crate::serializer::{RdfXmlaConfig, RdfXmlaFormatter, XmlVersion};
pub use crate::utils::unique_blank_id;
