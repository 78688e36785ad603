//! The abbreviating RDF/XML serializer.
//!
//! Statements are not written as they arrive: abbreviation decisions
//! (inlining single-use blank nodes, the typed-node shortcut, `rdf:li`
//! collapsing) depend on reference counts over the whole input, so intake
//! only builds the term store and per-subject records. Everything is
//! planned and written when [`RdfXmlaFormatter::finish`] runs: the body is
//! laid out first into an event buffer, then the header is written with
//! every namespace the body needed, then the buffer is flushed.

use std::io::Write;

use oxilangtag::LanguageTag;
use oxiri::Iri;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rdfxmla_api::formatter::TriplesFormatter;
use rdfxmla_api::model;
use rdfxmla_api::model::Triple;

use crate::error::RdfXmlaError;
use crate::qname::Namespaces;
use crate::subject::{Subject, SubjectList};
use crate::term::{Term, TermId, TermProbe, TermStore, RDF_NAMESPACE, RDF_TYPE, RDF_XML_LITERAL};
use crate::uri;

const XMP_BEGIN: &str =
    "<?xpacket begin='\u{feff}' id='W5M0MpCehiHzreSzNTczkc9d'?>\n<x:xmpmeta xmlns:x='adobe:ns:meta/'>";
const XMP_END: &str = "</x:xmpmeta>\n<?xpacket end='r'?>\n";

/// XML version written into the declaration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum XmlVersion {
    V1_0,
    V1_1,
}

impl XmlVersion {
    fn as_bytes(self) -> &'static [u8] {
        match self {
            XmlVersion::V1_0 => b"1.0",
            XmlVersion::V1_1 => b"1.1",
        }
    }
}

/// Configuration of a [`RdfXmlaFormatter`].
#[derive(Clone, Debug)]
pub struct RdfXmlaConfig {
    /// Write the Adobe XMP profile: the output is wrapped in an `xpacket`
    /// envelope, the XML declaration is suppressed, IRI subjects get an
    /// empty `rdf:about`, and repeated properties are deduplicated.
    pub xmp: bool,
    /// Write IRIs relative to `base_iri` where possible.
    pub relative_iris: bool,
    /// Write the `<?xml ...?>` declaration. Ignored in XMP mode.
    pub write_xml_declaration: bool,
    pub xml_version: XmlVersion,
    /// Declared as `xml:base` on the root element and used as the origin
    /// for `relative_iris`.
    pub base_iri: Option<Iri<String>>,
    /// Indent width of the XML writer.
    pub indentation: usize,
}

impl RdfXmlaConfig {
    pub fn new() -> Self {
        Self {
            xmp: false,
            relative_iris: false,
            write_xml_declaration: true,
            xml_version: XmlVersion::V1_0,
            base_iri: None,
            indentation: 2,
        }
    }

    /// Configuration for a serializer factory name; names starting with
    /// `rdfxml-xmp` select the XMP profile.
    pub fn for_name(name: &str) -> Self {
        let mut config = Self::new();
        config.xmp = name.starts_with("rdfxml-xmp");
        config
    }
}

impl Default for RdfXmlaConfig {
    fn default() -> Self {
        Self::new()
    }
}

enum BodyEvent {
    Start(BytesStart<'static>),
    Empty(BytesStart<'static>),
    End(BytesEnd<'static>),
    Text(String),
    Raw(String),
}

/// Planned body events, recorded before the header exists. A started
/// element is held back until the next event so that an immediate close
/// turns it into an empty element.
struct EventBuffer {
    events: Vec<BodyEvent>,
    open_elements: Vec<Vec<u8>>,
    maybe_empty_open: Option<BytesStart<'static>>,
}

impl EventBuffer {
    fn new() -> Self {
        Self {
            events: Vec::new(),
            open_elements: Vec::new(),
            maybe_empty_open: None,
        }
    }

    fn flush_open(&mut self) {
        if let Some(element) = self.maybe_empty_open.take() {
            self.events.push(BodyEvent::Start(element));
        }
    }

    fn start(&mut self, element: BytesStart<'static>) {
        self.flush_open();
        self.open_elements.push(element.name().to_vec());
        self.maybe_empty_open = Some(element);
    }

    fn end(&mut self) -> Result<(), RdfXmlaError> {
        let name = self
            .open_elements
            .pop()
            .ok_or_else(|| RdfXmlaError::msg("close when no element is open"))?;
        if let Some(element) = self.maybe_empty_open.take() {
            self.events.push(BodyEvent::Empty(element));
        } else {
            self.events.push(BodyEvent::End(BytesEnd::owned(name)));
        }
        Ok(())
    }

    fn text(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        self.flush_open();
        self.events.push(BodyEvent::Text(value.to_string()));
    }

    fn raw(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        self.flush_open();
        self.events.push(BodyEvent::Raw(value.to_string()));
    }

    fn into_events(mut self) -> Vec<BodyEvent> {
        self.flush_open();
        self.events
    }
}

/// An abbreviating [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/)
/// formatter.
///
/// It buffers the whole graph and serializes it on
/// [`finish`](RdfXmlaFormatter::finish), hoisting shared subjects, inlining
/// single-use blank nodes and using the `rdf:type` and `rdf:li` shortcuts:
///
/// ```
/// use rdfxmla::{RdfXmlaConfig, RdfXmlaFormatter};
/// use rdfxmla_api::model::{NamedNode, Triple};
///
/// let mut formatter = RdfXmlaFormatter::new(Vec::new(), RdfXmlaConfig::new());
/// formatter.format(&Triple {
///     subject: NamedNode { iri: "http://example.com/foo" }.into(),
///     predicate: NamedNode { iri: "http://www.w3.org/1999/02/22-rdf-syntax-ns#type" },
///     object: NamedNode { iri: "http://schema.org/Person" }.into(),
/// })?;
/// let xml = String::from_utf8(formatter.finish()?)?;
/// assert!(xml.contains("xmlns:ns1=\"http://schema.org/\""));
/// assert!(xml.contains("<ns1:Person rdf:about=\"http://example.com/foo\"/>"));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub struct RdfXmlaFormatter<W: Write> {
    writer: Writer<W>,
    config: RdfXmlaConfig,
    store: TermStore,
    subjects: SubjectList,
    blanks: SubjectList,
    namespaces: Namespaces,
    body: EventBuffer,
    rdf_type: TermId,
    on_error: Option<Box<dyn FnMut(RdfXmlaError)>>,
}

impl<W: Write> RdfXmlaFormatter<W> {
    /// Builds a formatter writing to `write`. Nothing is written before
    /// [`finish`](RdfXmlaFormatter::finish).
    pub fn new(write: W, config: RdfXmlaConfig) -> Self {
        let mut store = TermStore::new();
        let rdf_type = store.intern(Term::Iri(RDF_TYPE.to_string()));
        Self {
            writer: Writer::new_with_indent(write, b' ', config.indentation),
            store,
            subjects: SubjectList::new(),
            blanks: SubjectList::new(),
            namespaces: Namespaces::new(RDF_NAMESPACE),
            body: EventBuffer::new(),
            rdf_type,
            on_error: None,
            config,
        }
    }

    /// Registers a user namespace, declared on the root element. A
    /// declaration whose prefix is already taken, or whose IRI is already
    /// bound, succeeds without effect.
    pub fn declare_namespace(&mut self, iri: &str, prefix: &str) -> Result<(), RdfXmlaError> {
        Iri::parse(iri)?;
        self.namespaces.declare(iri, prefix);
        Ok(())
    }

    /// Registers a handler for the recoverable diagnostics raised while
    /// emitting (a property whose IRI cannot become a qualified name is
    /// reported there and dropped; serialization goes on).
    pub fn set_error_handler(&mut self, handler: impl FnMut(RdfXmlaError) + 'static) {
        self.on_error = Some(Box::new(handler));
    }

    fn report(&mut self, error: RdfXmlaError) {
        if let Some(handler) = self.on_error.as_mut() {
            handler(error);
        }
    }

    /// Takes one statement in. A statement rejected here (currently: a
    /// malformed literal language tag) leaves the formatter usable for the
    /// statements after it.
    pub fn format(&mut self, triple: &Triple<'_>) -> Result<(), RdfXmlaError> {
        let subject_probe = match &triple.subject {
            model::NamedOrBlankNode::NamedNode(node) => match ordinal_iri(node.iri) {
                Some(ordinal) => TermProbe::Ordinal(ordinal),
                None => TermProbe::Iri(node.iri),
            },
            model::NamedOrBlankNode::BlankNode(node) => TermProbe::Blank(node.id),
        };
        let (in_blanks, subject_index) = self.find_or_create_subject(&subject_probe);

        let object = object_term(&triple.object)?;
        let object_is_iri = matches!(object, Term::Iri(_));
        let object_is_blank = matches!(object, Term::Blank(_));
        let object_id = self.store.intern(object);
        if object_is_iri || object_is_blank {
            self.store.get_mut(object_id).count_as_object += 1;
        }

        if let Some(ordinal) = ordinal_iri(triple.predicate.iri) {
            let (subject, store) = self.subject_pair(in_blanks, subject_index);
            if !subject.add_list_element(store, ordinal, object_id) {
                // the slot was taken by an earlier statement; keep this one
                // as an ordinary property under an ordinal predicate
                let predicate_id = store.intern(Term::Ordinal(ordinal));
                subject.add_property(store, predicate_id, object_id);
            }
            return Ok(());
        }

        let predicate_id = self
            .store
            .intern(Term::Predicate(triple.predicate.iri.to_string()));

        // the first rdf:type with an IRI object names the subject element
        if object_is_iri
            && predicate_id == self.rdf_type
            && self.subject_ref(in_blanks, subject_index).node_type.is_none()
        {
            let (subject, store) = self.subject_pair(in_blanks, subject_index);
            subject.node_type = Some(object_id);
            store.get_mut(object_id).ref_count += 1;
            return Ok(());
        }

        // XMP allows a property at most once per subject; ids compare like
        // the interned terms they stand for
        if self.config.xmp
            && self.store.get(predicate_id).ref_count > 1
            && self
                .subject_ref(in_blanks, subject_index)
                .properties
                .contains(&predicate_id)
        {
            if object_is_blank {
                if let Some(index) = self.blanks.find_by_id(object_id) {
                    self.blanks.clear(index);
                }
            }
            return Ok(());
        }

        let (subject, store) = self.subject_pair(in_blanks, subject_index);
        subject.add_property(store, predicate_id, object_id);
        Ok(())
    }

    /// Serializes everything taken in and returns the underlying writer.
    pub fn finish(mut self) -> Result<W, RdfXmlaError> {
        for index in 0..self.subjects.len() {
            self.emit_subject_at(false, index, 0)?;
        }
        for index in 0..self.blanks.len() {
            self.emit_subject_at(true, index, 0)?;
        }
        self.write_document()
    }

    fn find_or_create_subject(&mut self, probe: &TermProbe<'_>) -> (bool, usize) {
        let in_blanks = matches!(probe, TermProbe::Blank(_));
        let Self {
            subjects,
            blanks,
            store,
            ..
        } = self;
        let list = if in_blanks { blanks } else { subjects };
        if let Some(index) = list.find(store, probe) {
            return (in_blanks, index);
        }
        let term = store.intern(probe.to_term());
        let subject = Subject::new(store, term);
        (in_blanks, list.push(subject))
    }

    fn subject_ref(&self, in_blanks: bool, index: usize) -> &Subject {
        let list = if in_blanks { &self.blanks } else { &self.subjects };
        list.get(index).expect("subject present during intake")
    }

    fn subject_pair(&mut self, in_blanks: bool, index: usize) -> (&mut Subject, &mut TermStore) {
        let Self {
            subjects,
            blanks,
            store,
            ..
        } = self;
        let list = if in_blanks { blanks } else { subjects };
        (list.get_mut(index), store)
    }

    /// Emits the subject held in the given slot, nulling the slot out. A
    /// blank used exactly once as subject and once as object is skipped at
    /// the top level: it appears inline at its single use site.
    fn emit_subject_at(
        &mut self,
        in_blanks: bool,
        index: usize,
        depth: usize,
    ) -> Result<(), RdfXmlaError> {
        let list = if in_blanks { &self.blanks } else { &self.subjects };
        match list.get(index) {
            None => return Ok(()),
            Some(subject) => {
                if depth == 0 {
                    let entry = self.store.get(subject.term);
                    if matches!(entry.term, Term::Blank(_))
                        && entry.count_as_subject == 1
                        && entry.count_as_object == 1
                    {
                        return Ok(());
                    }
                }
            }
        }
        let taken = if in_blanks {
            self.blanks.take(index)
        } else {
            self.subjects.take(index)
        };
        match taken {
            Some(subject) => self.emit_subject(&subject, depth),
            None => Ok(()),
        }
    }

    fn emit_subject(&mut self, subject: &Subject, depth: usize) -> Result<(), RdfXmlaError> {
        let name = match subject.node_type {
            Some(type_id) => {
                let type_iri = match &self.store.get(type_id).term {
                    Term::Iri(iri) | Term::Predicate(iri) => iri.clone(),
                    _ => unreachable!("the type shortcut only stores IRIs"),
                };
                match self.namespaces.qname_for(&type_iri) {
                    Some(name) => name,
                    None => {
                        // the whole subject is dropped, as its element
                        // cannot be named
                        self.report(RdfXmlaError::unsplittable(type_iri));
                        return Ok(());
                    }
                }
            }
            None => "rdf:Description".to_string(),
        };

        let mut element = BytesStart::owned_name(name.into_bytes());
        let entry = self.store.get(subject.term);
        match &entry.term {
            Term::Iri(iri) => {
                let about = if self.config.xmp {
                    String::new()
                } else {
                    self.written_iri(iri)
                };
                element.push_attribute(("rdf:about", about.as_str()));
            }
            Term::Blank(label) => {
                if entry.count_as_subject > 1 || entry.count_as_object > 1 {
                    element.push_attribute(("rdf:nodeID", label.as_str()));
                }
            }
            Term::Ordinal(ordinal) => {
                let about = format!("{}_{}", RDF_NAMESPACE, ordinal);
                element.push_attribute(("rdf:about", about.as_str()));
            }
            _ => unreachable!("subjects are resources, blanks, or ordinals"),
        }

        self.body.start(element);
        self.emit_properties(subject, depth + 1)?;
        self.body.end()
    }

    fn emit_properties(&mut self, subject: &Subject, depth: usize) -> Result<(), RdfXmlaError> {
        // rdf:_n slots first, in ascending ordinal order
        for object_id in subject.list_items.iter().flatten() {
            self.emit_object(BytesStart::borrowed_name(b"rdf:li"), *object_id, depth + 1)?;
        }

        for pair in subject.properties.chunks_exact(2) {
            let (predicate_id, object_id) = (pair[0], pair[1]);
            let name = match self.store.get(predicate_id).term.clone() {
                // only reached when the same ordinal occurred twice
                Term::Ordinal(ordinal) => format!("rdf:_{}", ordinal),
                Term::Iri(iri) | Term::Predicate(iri) => match self.namespaces.qname_for(&iri) {
                    Some(name) => name,
                    None => {
                        self.report(RdfXmlaError::unsplittable(iri));
                        continue;
                    }
                },
                _ => unreachable!("predicates are IRIs or ordinals"),
            };
            self.emit_object(BytesStart::owned_name(name.into_bytes()), object_id, depth + 1)?;
        }
        Ok(())
    }

    fn emit_object(
        &mut self,
        mut element: BytesStart<'static>,
        object_id: TermId,
        depth: usize,
    ) -> Result<(), RdfXmlaError> {
        let entry = self.store.get(object_id);
        let single_use = entry.count_as_subject == 1 && entry.count_as_object == 1;
        match entry.term.clone() {
            Term::Iri(iri) => {
                let resource = self.written_iri(&iri);
                element.push_attribute(("rdf:resource", resource.as_str()));
                self.body.start(element);
                self.body.end()
            }
            Term::Literal {
                lexical,
                datatype,
                language,
                xml_literal,
            } => {
                if xml_literal {
                    element.push_attribute(("rdf:parseType", "Literal"));
                    self.body.start(element);
                    self.body.raw(&lexical);
                } else {
                    if let Some(language) = &language {
                        element.push_attribute(("xml:lang", language.as_str()));
                    }
                    if let Some(datatype) = &datatype {
                        element.push_attribute(("rdf:datatype", datatype.as_str()));
                    }
                    self.body.start(element);
                    self.body.text(&lexical);
                }
                self.body.end()
            }
            Term::Blank(label) => {
                if single_use {
                    // absorbed into this property element; taking it nulls
                    // its top-level slot
                    self.body.start(element);
                    if let Some(index) = self.blanks.find_by_id(object_id) {
                        self.emit_subject_at(true, index, depth + 1)?;
                    }
                    self.body.end()
                } else {
                    element.push_attribute(("rdf:nodeID", label.as_str()));
                    self.body.start(element);
                    self.body.end()
                }
            }
            Term::Ordinal(_) | Term::Predicate(_) => {
                unreachable!("ordinals and predicates never reach the object position")
            }
        }
    }

    fn written_iri(&self, iri: &str) -> String {
        if self.config.relative_iris {
            if let Some(base) = &self.config.base_iri {
                return uri::relativize(base.as_str(), iri);
            }
        }
        iri.to_string()
    }

    fn write_document(mut self) -> Result<W, RdfXmlaError> {
        if self.config.write_xml_declaration && !self.config.xmp {
            self.writer.write_event(Event::Decl(BytesDecl::new(
                self.config.xml_version.as_bytes(),
                Some(b"UTF-8"),
                None,
            )))?;
        }
        if self.config.xmp {
            self.writer
                .write_event(Event::Text(BytesText::from_escaped_str(XMP_BEGIN)))?;
        }

        let mut rdf_open = BytesStart::borrowed_name(b"rdf:RDF");
        rdf_open.push_attribute(("xmlns:rdf", RDF_NAMESPACE));
        for namespace in self.namespaces.declared() {
            let attribute = if namespace.prefix.is_empty() {
                "xmlns".to_string()
            } else {
                format!("xmlns:{}", namespace.prefix)
            };
            rdf_open.push_attribute((attribute.as_str(), namespace.iri.as_str()));
        }
        if let Some(base) = &self.config.base_iri {
            rdf_open.push_attribute(("xml:base", base.as_str()));
        }
        self.writer.write_event(Event::Start(rdf_open))?;

        let body = std::mem::replace(&mut self.body, EventBuffer::new());
        for event in body.into_events() {
            match event {
                BodyEvent::Start(element) => self.writer.write_event(Event::Start(element))?,
                BodyEvent::Empty(element) => self.writer.write_event(Event::Empty(element))?,
                BodyEvent::End(end) => self.writer.write_event(Event::End(end))?,
                BodyEvent::Text(text) => self
                    .writer
                    .write_event(Event::Text(BytesText::from_plain_str(&text)))?,
                BodyEvent::Raw(raw) => self
                    .writer
                    .write_event(Event::Text(BytesText::from_escaped_str(raw.as_str())))?,
            }
        }

        self.writer
            .write_event(Event::End(BytesEnd::borrowed(b"rdf:RDF")))?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped_str("\n")))?;
        if self.config.xmp {
            self.writer
                .write_event(Event::Text(BytesText::from_escaped_str(XMP_END)))?;
        }
        Ok(self.writer.into_inner())
    }
}

impl<W: Write> TriplesFormatter for RdfXmlaFormatter<W> {
    type Error = RdfXmlaError;

    fn format(&mut self, triple: &Triple<'_>) -> Result<(), RdfXmlaError> {
        RdfXmlaFormatter::format(self, triple)
    }
}

fn object_term(object: &model::Term<'_>) -> Result<Term, RdfXmlaError> {
    Ok(match object {
        model::Term::NamedNode(node) => Term::Iri(node.iri.to_string()),
        model::Term::BlankNode(node) => Term::Blank(node.id.to_string()),
        model::Term::Literal(model::Literal::Simple { value }) => Term::Literal {
            lexical: (*value).to_string(),
            datatype: None,
            language: None,
            xml_literal: false,
        },
        model::Term::Literal(model::Literal::LanguageTaggedString { value, language }) => {
            LanguageTag::parse(*language)?;
            Term::Literal {
                lexical: (*value).to_string(),
                datatype: None,
                language: Some((*language).to_string()),
                xml_literal: false,
            }
        }
        model::Term::Literal(model::Literal::Typed { value, datatype }) => Term::Literal {
            lexical: (*value).to_string(),
            datatype: Some(datatype.iri.to_string()),
            language: None,
            // the XML-literal datatype re-tags the term at intake time
            xml_literal: datatype.iri == RDF_XML_LITERAL,
        },
    })
}

fn ordinal_iri(iri: &str) -> Option<u32> {
    let digits = iri.strip_prefix(RDF_NAMESPACE)?.strip_prefix('_')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|ordinal| *ordinal > 0)
}

#[cfg(test)]
mod test {
    use super::*;
    use rdfxmla_api::model::{BlankNode, Literal, NamedNode};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn named(iri: &str) -> NamedNode<'_> {
        NamedNode { iri }
    }

    fn triple<'a>(
        subject: impl Into<model::NamedOrBlankNode<'a>>,
        predicate: &'a str,
        object: impl Into<model::Term<'a>>,
    ) -> Triple<'a> {
        Triple {
            subject: subject.into(),
            predicate: named(predicate),
            object: object.into(),
        }
    }

    fn formatter() -> RdfXmlaFormatter<Vec<u8>> {
        RdfXmlaFormatter::new(Vec::new(), RdfXmlaConfig::new())
    }

    #[test]
    fn ordinal_iris() {
        assert_eq!(
            Some(7),
            ordinal_iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#_7")
        );
        assert_eq!(
            None,
            ordinal_iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#_0")
        );
        assert_eq!(
            None,
            ordinal_iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#_x")
        );
        assert_eq!(
            None,
            ordinal_iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#_+3")
        );
        assert_eq!(None, ordinal_iri("http://example.com/_7"));
    }

    #[test]
    fn occurrence_counting() {
        let mut f = formatter();
        f.format(&triple(named("http://e.com/s"), "http://e.com/p", named("http://e.com/o")))
            .unwrap();
        f.format(&triple(named("http://e.com/s"), "http://e.com/p", BlankNode { id: "b" }))
            .unwrap();
        f.format(&triple(
            BlankNode { id: "b" },
            "http://e.com/q",
            Literal::Simple { value: "x" },
        ))
        .unwrap();

        let o = f.store.intern(Term::Iri("http://e.com/o".to_string()));
        assert_eq!(0, f.store.get(o).count_as_subject);
        assert_eq!(1, f.store.get(o).count_as_object);

        let b = f.store.intern(Term::Blank("b".to_string()));
        assert_eq!(1, f.store.get(b).count_as_subject);
        assert_eq!(1, f.store.get(b).count_as_object);

        let s = f.store.intern(Term::Iri("http://e.com/s".to_string()));
        assert_eq!(1, f.store.get(s).count_as_subject);
        assert_eq!(0, f.store.get(s).count_as_object);
    }

    #[test]
    fn type_shortcut_takes_the_first_type_only() {
        let mut f = formatter();
        let rdf_type = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
        f.format(&triple(named("http://e.com/s"), rdf_type, named("http://e.com/T")))
            .unwrap();
        f.format(&triple(named("http://e.com/s"), rdf_type, named("http://e.com/U")))
            .unwrap();

        let subject = f.subject_ref(false, 0);
        let type_id = subject.node_type.expect("type recorded");
        assert!(matches!(
            &f.store.get(type_id).term,
            Term::Iri(iri) if iri == "http://e.com/T"
        ));
        // the second type statement went to the property list
        assert_eq!(2, subject.properties.len());
    }

    #[test]
    fn type_shortcut_ignores_blank_objects() {
        let mut f = formatter();
        let rdf_type = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
        f.format(&triple(named("http://e.com/s"), rdf_type, BlankNode { id: "t" }))
            .unwrap();
        let subject = f.subject_ref(false, 0);
        assert_eq!(None, subject.node_type);
        assert_eq!(2, subject.properties.len());
    }

    #[test]
    fn duplicate_ordinals_fall_back_to_properties() {
        let mut f = formatter();
        let rdf_1 = "http://www.w3.org/1999/02/22-rdf-syntax-ns#_1";
        f.format(&triple(named("http://e.com/s"), rdf_1, named("http://e.com/x")))
            .unwrap();
        f.format(&triple(named("http://e.com/s"), rdf_1, named("http://e.com/y")))
            .unwrap();

        let subject = f.subject_ref(false, 0);
        assert!(subject.list_items[1].is_some());
        assert_eq!(2, subject.properties.len());
        assert!(matches!(
            f.store.get(subject.properties[0]).term,
            Term::Ordinal(1)
        ));
    }

    #[test]
    fn bad_language_tags_are_rejected_without_poisoning() {
        let mut f = formatter();
        assert!(f
            .format(&triple(
                named("http://e.com/s"),
                "http://e.com/p",
                Literal::LanguageTaggedString {
                    value: "v",
                    language: "not a tag",
                },
            ))
            .is_err());
        // the subject record exists but carries nothing
        assert_eq!(0, f.subject_ref(false, 0).properties.len());
        assert!(f
            .format(&triple(
                named("http://e.com/s"),
                "http://e.com/p",
                Literal::Simple { value: "v" },
            ))
            .is_ok());
        assert_eq!(2, f.subject_ref(false, 0).properties.len());
    }

    #[test]
    fn xmp_deduplicates_shared_predicates() {
        let mut f = RdfXmlaFormatter::new(Vec::new(), RdfXmlaConfig::for_name("rdfxml-xmp"));
        f.format(&triple(named("http://e.com/s"), "http://e.com/p", named("http://e.com/o")))
            .unwrap();
        f.format(&triple(named("http://e.com/t"), "http://e.com/p", named("http://e.com/o")))
            .unwrap();
        // the same predicate again on the first subject is dropped
        f.format(&triple(named("http://e.com/s"), "http://e.com/p", named("http://e.com/o2")))
            .unwrap();
        assert_eq!(2, f.subject_ref(false, 0).properties.len());
        assert_eq!(2, f.subject_ref(false, 1).properties.len());
    }

    #[test]
    fn xmp_dedup_suppresses_the_dropped_blank() {
        let mut f = RdfXmlaFormatter::new(Vec::new(), RdfXmlaConfig::for_name("rdfxml-xmp"));
        f.format(&triple(
            BlankNode { id: "b" },
            "http://e.com/q",
            Literal::Simple { value: "v" },
        ))
        .unwrap();
        f.format(&triple(named("http://e.com/s"), "http://e.com/p", named("http://e.com/o")))
            .unwrap();
        f.format(&triple(named("http://e.com/t"), "http://e.com/p", named("http://e.com/o")))
            .unwrap();
        f.format(&triple(named("http://e.com/s"), "http://e.com/p", BlankNode { id: "b" }))
            .unwrap();
        // the blank's top-level slot was nulled out along with the property
        assert!(f.blanks.get(0).is_none());
    }

    #[test]
    fn unsplittable_predicates_are_reported_and_dropped() {
        let mut f = formatter();
        let messages = Rc::new(RefCell::new(Vec::new()));
        let sink = messages.clone();
        f.set_error_handler(move |error| sink.borrow_mut().push(error.to_string()));
        f.format(&triple(
            named("http://e.com/s"),
            "http://e.com/",
            Literal::Simple { value: "v" },
        ))
        .unwrap();
        f.format(&triple(
            named("http://e.com/s"),
            "http://e.com/p",
            Literal::Simple { value: "w" },
        ))
        .unwrap();
        let xml = String::from_utf8(f.finish().unwrap()).unwrap();
        assert!(xml.contains("<ns1:p>w</ns1:p>"));
        assert!(!xml.contains("v</"));
        assert_eq!(
            vec!["Cannot split URI 'http://e.com/' into an XML qname".to_string()],
            *messages.borrow()
        );
    }
}
