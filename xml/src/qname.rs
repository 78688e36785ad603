//! Qualified-name manufacture: turning arbitrary IRIs into legal XML
//! element names, declaring `ns<k>` prefixes on demand.

use crate::utils::is_local_name;

#[derive(Debug, Clone)]
pub struct Namespace {
    pub prefix: String,
    pub iri: String,
}

/// The serializer's namespace list. Slot 0 is always the RDF namespace
/// itself, which the root element declares implicitly; everything after it
/// (user declarations, then minted `ns<k>` entries) is declared on the
/// root when the header is written.
#[derive(Debug)]
pub struct Namespaces {
    list: Vec<Namespace>,
    minted: u32,
}

impl Namespaces {
    pub fn new(rdf_namespace: &str) -> Self {
        Self {
            list: vec![Namespace {
                prefix: "rdf".to_string(),
                iri: rdf_namespace.to_string(),
            }],
            minted: 0,
        }
    }

    /// Registers a user namespace. A declaration whose prefix is already in
    /// use, or whose IRI equals an existing entry's IRI, is ignored.
    pub fn declare(&mut self, iri: &str, prefix: &str) {
        if self
            .list
            .iter()
            .any(|ns| ns.prefix == prefix || ns.iri == iri)
        {
            return;
        }
        self.list.push(Namespace {
            prefix: prefix.to_string(),
            iri: iri.to_string(),
        });
    }

    /// The namespaces the root element must declare (everything but rdf).
    pub fn declared(&self) -> impl Iterator<Item = &Namespace> {
        self.list.iter().skip(1)
    }

    /// Makes a qualified element name for an IRI, minting and registering a
    /// fresh `ns<k>` prefix when no declared namespace covers it. Returns
    /// `None` when the IRI has no legal split point.
    pub fn qname_for(&mut self, iri: &str) -> Option<String> {
        // a declared namespace whose IRI leads this one wins
        for ns in &self.list {
            if let Some(local) = iri.strip_prefix(ns.iri.as_str()) {
                if is_local_name(local) {
                    return Some(qualify(&ns.prefix, local));
                }
            }
        }

        let split = leftmost_name_split(iri)?;
        let (ns_iri, local) = iri.split_at(split);
        let prefix = match self.list.iter().find(|ns| ns.iri == ns_iri) {
            Some(ns) => ns.prefix.clone(),
            None => {
                self.minted += 1;
                let prefix = format!("ns{}", self.minted);
                self.list.push(Namespace {
                    prefix: prefix.clone(),
                    iri: ns_iri.to_string(),
                });
                prefix
            }
        };
        Some(qualify(&prefix, local))
    }
}

fn qualify(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{}:{}", prefix, local)
    }
}

/// Leftmost byte offset such that everything from it on is a legal local
/// name. An offset of zero would leave no namespace part, so it fails.
fn leftmost_name_split(iri: &str) -> Option<usize> {
    for (offset, _) in iri.char_indices() {
        if is_local_name(&iri[offset..]) {
            return if offset == 0 { None } else { Some(offset) };
        }
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::term::RDF_NAMESPACE;

    #[test]
    fn split_points() {
        assert_eq!(Some(18), leftmost_name_split("http://schema.org/Person"));
        assert_eq!(None, leftmost_name_split("http://schema.org/"));
        assert_eq!(
            Some("http://schema.org#".len()),
            leftmost_name_split("http://schema.org#foo")
        );
        // the whole IRI being a name leaves no namespace part
        assert_eq!(None, leftmost_name_split("Person"));
    }

    #[test]
    fn reuses_declared_namespaces() {
        let mut namespaces = Namespaces::new(RDF_NAMESPACE);
        namespaces.declare("http://schema.org/", "schema");
        assert_eq!(
            Some("schema:Person".to_string()),
            namespaces.qname_for("http://schema.org/Person")
        );
        assert_eq!(
            Some("rdf:type".to_string()),
            namespaces.qname_for(&format!("{}type", RDF_NAMESPACE))
        );
        assert_eq!(0, namespaces.minted);
    }

    #[test]
    fn mints_monotonic_prefixes() {
        let mut namespaces = Namespaces::new(RDF_NAMESPACE);
        assert_eq!(
            Some("ns1:Person".to_string()),
            namespaces.qname_for("http://schema.org/Person")
        );
        // same namespace again: no second minting
        assert_eq!(
            Some("ns1:name".to_string()),
            namespaces.qname_for("http://schema.org/name")
        );
        assert_eq!(
            Some("ns2:title".to_string()),
            namespaces.qname_for("http://purl.org/dc/elements/1.1/title")
        );
        let declared: Vec<_> = namespaces.declared().map(|ns| ns.prefix.clone()).collect();
        assert_eq!(vec!["ns1", "ns2"], declared);
    }

    #[test]
    fn unsplittable_iris_fail() {
        let mut namespaces = Namespaces::new(RDF_NAMESPACE);
        assert_eq!(None, namespaces.qname_for("http://example.com/"));
        assert_eq!(None, namespaces.qname_for(""));
    }

    #[test]
    fn duplicate_declarations_are_ignored() {
        let mut namespaces = Namespaces::new(RDF_NAMESPACE);
        namespaces.declare("http://schema.org/", "schema");
        namespaces.declare("http://schema.org/", "other");
        namespaces.declare("http://example.com/", "schema");
        assert_eq!(1, namespaces.declared().count());
    }

    #[test]
    fn empty_prefix_gives_bare_names() {
        let mut namespaces = Namespaces::new(RDF_NAMESPACE);
        namespaces.declare("http://schema.org/", "");
        assert_eq!(
            Some("Person".to_string()),
            namespaces.qname_for("http://schema.org/Person")
        );
    }
}
