use std::error::Error;
use std::{fmt, io};

/// Error raised while serializing RDF/XML.
#[derive(Debug)]
pub struct RdfXmlaError {
    kind: RdfXmlaErrorKind,
}

#[derive(Debug)]
enum RdfXmlaErrorKind {
    Io(io::Error),
    Xml(quick_xml::Error),
    InvalidIri(oxiri::IriParseError),
    InvalidLanguageTag(oxilangtag::LanguageTagParseError),
    UnsplittableIri(String),
    Msg(String),
}

impl RdfXmlaError {
    pub(crate) fn msg(msg: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlaErrorKind::Msg(msg.into()),
        }
    }

    pub(crate) fn unsplittable(iri: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlaErrorKind::UnsplittableIri(iri.into()),
        }
    }
}

impl fmt::Display for RdfXmlaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RdfXmlaErrorKind::Io(error) => error.fmt(f),
            RdfXmlaErrorKind::Xml(error) => error.fmt(f),
            RdfXmlaErrorKind::InvalidIri(error) => error.fmt(f),
            RdfXmlaErrorKind::InvalidLanguageTag(error) => error.fmt(f),
            RdfXmlaErrorKind::UnsplittableIri(iri) => {
                write!(f, "Cannot split URI '{}' into an XML qname", iri)
            }
            RdfXmlaErrorKind::Msg(msg) => f.write_str(msg),
        }
    }
}

impl Error for RdfXmlaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            RdfXmlaErrorKind::Io(error) => Some(error),
            RdfXmlaErrorKind::Xml(error) => Some(error),
            RdfXmlaErrorKind::InvalidIri(error) => Some(error),
            RdfXmlaErrorKind::InvalidLanguageTag(error) => Some(error),
            RdfXmlaErrorKind::UnsplittableIri(_) | RdfXmlaErrorKind::Msg(_) => None,
        }
    }
}

impl From<io::Error> for RdfXmlaError {
    fn from(error: io::Error) -> Self {
        Self {
            kind: RdfXmlaErrorKind::Io(error),
        }
    }
}

impl From<quick_xml::Error> for RdfXmlaError {
    fn from(error: quick_xml::Error) -> Self {
        Self {
            kind: match error {
                quick_xml::Error::Io(error) => RdfXmlaErrorKind::Io(error),
                error => RdfXmlaErrorKind::Xml(error),
            },
        }
    }
}

impl From<oxiri::IriParseError> for RdfXmlaError {
    fn from(error: oxiri::IriParseError) -> Self {
        Self {
            kind: RdfXmlaErrorKind::InvalidIri(error),
        }
    }
}

impl From<oxilangtag::LanguageTagParseError> for RdfXmlaError {
    fn from(error: oxilangtag::LanguageTagParseError) -> Self {
        Self {
            kind: RdfXmlaErrorKind::InvalidLanguageTag(error),
        }
    }
}

impl From<RdfXmlaError> for io::Error {
    fn from(error: RdfXmlaError) -> Self {
        match error.kind {
            RdfXmlaErrorKind::Io(error) => error,
            RdfXmlaErrorKind::Xml(quick_xml::Error::Io(error)) => error,
            kind => io::Error::new(
                io::ErrorKind::InvalidData,
                RdfXmlaError { kind }.to_string(),
            ),
        }
    }
}
