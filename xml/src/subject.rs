//! Per-subject aggregation of statements.

use crate::term::{Term, TermId, TermProbe, TermStore};

/// Everything known about one subject: its term, the first `rdf:type`
/// object (kept aside for the typed-node shortcut), the ordinary
/// (predicate, object) pairs in intake order, and the `rdf:_n` slots.
#[derive(Debug, PartialEq)]
pub struct Subject {
    pub term: TermId,
    /// First `rdf:type` IRI object seen for this subject, if any.
    pub node_type: Option<TermId>,
    /// Alternating predicate/object ids; the length is always even.
    pub properties: Vec<TermId>,
    /// Sparse `rdf:li` slots indexed by ordinal; slot 0 stays empty.
    pub list_items: Vec<Option<TermId>>,
}

impl Subject {
    pub fn new(store: &mut TermStore, term: TermId) -> Self {
        debug_assert!(
            matches!(
                store.get(term).term,
                Term::Iri(_) | Term::Blank(_) | Term::Ordinal(_)
            ),
            "subject must be a resource, blank, or ordinal"
        );
        let entry = store.get_mut(term);
        entry.ref_count += 1;
        entry.count_as_subject += 1;
        Self {
            term,
            node_type: None,
            properties: Vec::new(),
            list_items: Vec::new(),
        }
    }

    pub fn add_property(&mut self, store: &mut TermStore, predicate: TermId, object: TermId) {
        self.properties.push(predicate);
        self.properties.push(object);
        store.get_mut(predicate).ref_count += 1;
        store.get_mut(object).ref_count += 1;
    }

    /// Fills the `rdf:_n` slot for `ordinal`; returns `false` when the slot
    /// is already taken, leaving it untouched.
    pub fn add_list_element(&mut self, store: &mut TermStore, ordinal: u32, object: TermId) -> bool {
        let index = ordinal as usize;
        if self.list_items.len() <= index {
            self.list_items.resize(index + 1, None);
        }
        if self.list_items[index].is_some() {
            return false;
        }
        self.list_items[index] = Some(object);
        store.get_mut(object).ref_count += 1;
        true
    }
}

/// One of the two top-level subject sequences (named and blank). Entries
/// are nulled rather than removed so indices stay stable; the emission
/// planner takes entries out as it absorbs or emits them.
#[derive(Debug, Default)]
pub struct SubjectList {
    entries: Vec<Option<Subject>>,
}

impl SubjectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&Subject> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> &mut Subject {
        self.entries[index]
            .as_mut()
            .expect("subject slot is filled")
    }

    pub fn push(&mut self, subject: Subject) -> usize {
        self.entries.push(Some(subject));
        self.entries.len() - 1
    }

    /// Removes and returns the entry, leaving the slot null.
    pub fn take(&mut self, index: usize) -> Option<Subject> {
        self.entries.get_mut(index).and_then(Option::take)
    }

    /// Nulls the slot, dropping the record.
    pub fn clear(&mut self, index: usize) {
        self.entries[index] = None;
    }

    /// Index of the subject whose term matches the probe.
    pub fn find(&self, store: &TermStore, probe: &TermProbe<'_>) -> Option<usize> {
        self.entries.iter().position(|slot| {
            slot.as_ref()
                .map_or(false, |subject| store.get(subject.term).term.matches(probe))
        })
    }

    /// Index of the subject holding exactly this interned term.
    pub fn find_by_id(&self, id: TermId) -> Option<usize> {
        self.entries.iter().position(|slot| {
            slot.as_ref().map_or(false, |subject| subject.term == id)
        })
    }
}
