//! Relative-IRI computation for `rdf:about` and `rdf:resource` values.

/// Scheme, authority, path, and query-or-fragment tail of an IRI. Only as
/// much structure as relativization needs; full validation is the base
/// IRI's parser's job.
#[derive(Debug, PartialEq)]
struct IriParts<'a> {
    scheme: &'a str,
    authority: Option<&'a str>,
    path: &'a str,
    tail: &'a str,
}

fn split_parts(iri: &str) -> Option<IriParts<'_>> {
    let scheme_end = iri.find(':')?;
    let scheme = &iri[..scheme_end];
    let mut rest = &iri[scheme_end + 1..];
    let authority = if rest.starts_with("//") {
        rest = &rest[2..];
        let end = rest
            .find(|c| c == '/' || c == '?' || c == '#')
            .unwrap_or_else(|| rest.len());
        let authority = &rest[..end];
        rest = &rest[end..];
        Some(authority)
    } else {
        None
    };
    let path_end = rest.find(|c| c == '?' || c == '#').unwrap_or_else(|| rest.len());
    Some(IriParts {
        scheme,
        authority,
        path: &rest[..path_end],
        tail: &rest[path_end..],
    })
}

/// Writes `iri` relative to `base` when the two share a scheme and
/// authority, falling back to the absolute form otherwise. Resolving the
/// result against `base` yields `iri` back.
pub fn relativize(base: &str, iri: &str) -> String {
    let (base_parts, iri_parts) = match (split_parts(base), split_parts(iri)) {
        (Some(base_parts), Some(iri_parts)) => (base_parts, iri_parts),
        _ => return iri.to_string(),
    };
    if base_parts.scheme != iri_parts.scheme || base_parts.authority != iri_parts.authority {
        return iri.to_string();
    }

    if base_parts.path == iri_parts.path {
        if !iri_parts.tail.is_empty() {
            return iri_parts.tail.to_string();
        }
        // same document: refer to it by its last path segment
        let segment = &iri_parts.path[iri_parts.path.rfind('/').map_or(0, |i| i + 1)..];
        if segment.is_empty() {
            return ".".to_string();
        }
        return segment.to_string();
    }

    // longest shared prefix ending on a slash
    let shared = base_parts
        .path
        .as_bytes()
        .iter()
        .zip(iri_parts.path.as_bytes())
        .take_while(|(a, b)| a == b)
        .count();
    let shared = match base_parts.path[..shared].rfind('/') {
        Some(i) => i + 1,
        None => return iri.to_string(),
    };

    let climbs = base_parts.path[shared..].matches('/').count();
    let mut relative = "../".repeat(climbs);
    relative.push_str(&iri_parts.path[shared..]);
    relative.push_str(iri_parts.tail);
    // a bare segment with a colon would parse as a scheme
    let first_segment_end = relative.find('/').unwrap_or_else(|| relative.len());
    if relative[..first_segment_end].contains(':') {
        return iri.to_string();
    }
    relative
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sibling_documents() {
        assert_eq!(
            "e",
            relativize("http://example.com/b/c/d", "http://example.com/b/c/e")
        );
        assert_eq!(
            "d",
            relativize("http://example.com/b/c/", "http://example.com/b/c/d")
        );
    }

    #[test]
    fn climbing() {
        assert_eq!(
            "../x/y",
            relativize("http://example.com/b/c/d", "http://example.com/b/x/y")
        );
        assert_eq!(
            "../../x",
            relativize("http://example.com/a/b/c", "http://example.com/x")
        );
    }

    #[test]
    fn same_document() {
        assert_eq!(
            "#frag",
            relativize("http://example.com/doc", "http://example.com/doc#frag")
        );
        assert_eq!(
            "doc",
            relativize("http://example.com/doc", "http://example.com/doc")
        );
        assert_eq!(
            ".",
            relativize("http://example.com/dir/", "http://example.com/dir/")
        );
    }

    #[test]
    fn foreign_iris_stay_absolute() {
        assert_eq!(
            "https://example.com/a",
            relativize("http://example.com/a", "https://example.com/a")
        );
        assert_eq!(
            "http://other.org/a",
            relativize("http://example.com/a", "http://other.org/a")
        );
        assert_eq!(
            "urn:isbn:123",
            relativize("http://example.com/a", "urn:isbn:123")
        );
    }

    #[test]
    fn colon_in_leading_segment_stays_absolute() {
        assert_eq!(
            "urn:isbn:2",
            relativize("urn:isbn:1", "urn:isbn:2")
        );
    }
}
