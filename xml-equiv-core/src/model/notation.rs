use crate::model::ModelError;
use crate::tree::{NodeKind, NotationDecl, XmlNode};

/// Identifier accessors for a `<!NOTATION ...>` declaration.
///
/// The declaration keeps its identifiers as raw text; they are split each time
/// an accessor is called. Accepted shapes, with either quote style:
///
/// * `PUBLIC "public"` or `PUBLIC "public" "system"`
/// * `SYSTEM "system"`
///
/// Any other keyword is an error from both accessors.
#[derive(Debug, Clone, Copy)]
pub struct NotationView<'a> {
    decl: &'a NotationDecl,
}

enum Identifiers<'a> {
    One(&'a str),
    Two(&'a str, &'a str),
}

impl<'a> NotationView<'a> {
    pub fn new(decl: &'a NotationDecl) -> Self {
        Self { decl }
    }

    /// Wrap a node if it is a notation declaration.
    pub fn from_node(node: &'a XmlNode) -> Option<Self> {
        match &node.kind {
            NodeKind::NotationDecl(decl) => Some(Self::new(decl)),
            _ => None,
        }
    }

    pub fn decl(&self) -> &'a NotationDecl {
        self.decl
    }

    pub fn name(&self) -> &'a str {
        &self.decl.name
    }

    /// The public identifier. Only `PUBLIC` notations carry one.
    pub fn public(&self) -> Result<Option<&'a str>, ModelError> {
        self.split().map(|(public, _)| public)
    }

    /// The system identifier.
    pub fn system(&self) -> Result<Option<&'a str>, ModelError> {
        self.split().map(|(_, system)| system)
    }

    fn split(&self) -> Result<(Option<&'a str>, Option<&'a str>), ModelError> {
        let keyword = self.decl.middle.as_str();
        if keyword != "PUBLIC" && keyword != "SYSTEM" {
            return Err(ModelError::UnknownNotationKeyword {
                name: self.decl.name.clone(),
                keyword: keyword.to_string(),
            });
        }

        let syntax_error = || ModelError::NotationSyntax {
            name: self.decl.name.clone(),
            rest: self.decl.rest.clone(),
        };
        match (keyword, parse_identifiers(&self.decl.rest)) {
            ("PUBLIC", Some(Identifiers::One(public))) => Ok((Some(public), None)),
            ("PUBLIC", Some(Identifiers::Two(public, system))) => Ok((Some(public), Some(system))),
            ("SYSTEM", Some(Identifiers::One(system))) => Ok((None, Some(system))),
            // SYSTEM takes exactly one literal.
            _ => Err(syntax_error()),
        }
    }
}

fn parse_identifiers(rest: &str) -> Option<Identifiers<'_>> {
    let (first, remaining) = quoted(rest.trim())?;
    if remaining.is_empty() {
        return Some(Identifiers::One(first));
    }

    let separated = remaining.trim_start();
    if separated.len() == remaining.len() {
        return None;
    }
    let (second, remaining) = quoted(separated)?;
    remaining
        .is_empty()
        .then_some(Identifiers::Two(first, second))
}

/// Split a leading non-empty quoted literal from `input`.
fn quoted(input: &str) -> Option<(&str, &str)> {
    let quote = input.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &input[1..];
    let end = body.find(quote)?;
    if end == 0 {
        return None;
    }
    Some((&body[..end], &body[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::NotationView;
    use crate::model::ModelError;
    use crate::tree::NotationDecl;

    fn notation(middle: &str, rest: &str) -> NotationDecl {
        NotationDecl {
            name: "n".to_string(),
            middle: middle.to_string(),
            rest: rest.to_string(),
        }
    }

    #[test]
    fn single_public_identifier_has_no_system_id() {
        let decl = notation("PUBLIC", "'TEST3'");
        let view = NotationView::new(&decl);
        assert_eq!(view.public(), Ok(Some("TEST3")));
        assert_eq!(view.system(), Ok(None));
    }

    #[test]
    fn mixed_quotes_split_into_two_identifiers() {
        let decl = notation("PUBLIC", r#""TEST5"   'urn:test5'"#);
        let view = NotationView::new(&decl);
        assert_eq!(view.public(), Ok(Some("TEST5")));
        assert_eq!(view.system(), Ok(Some("urn:test5")));
    }

    #[test]
    fn identifiers_must_be_separated_by_whitespace() {
        let decl = notation("PUBLIC", r#""a""b""#);
        assert!(matches!(
            NotationView::new(&decl).system(),
            Err(ModelError::NotationSyntax { .. })
        ));
    }

    #[test]
    fn empty_identifier_is_rejected() {
        let decl = notation("SYSTEM", r#""""#);
        assert!(NotationView::new(&decl).system().is_err());
    }

    #[test]
    fn unknown_keyword_is_an_error_from_both_accessors() {
        let expected = Err(ModelError::UnknownNotationKeyword {
            name: "n".to_string(),
            keyword: "LOCAL".to_string(),
        });

        let single = notation("LOCAL", r#""x""#);
        let view = NotationView::new(&single);
        assert_eq!(view.system(), expected);
        assert_eq!(view.public(), expected);

        let pair = notation("LOCAL", r#""a" "b""#);
        let view = NotationView::new(&pair);
        assert_eq!(view.system(), expected);
        assert_eq!(view.public(), expected);
    }

    #[test]
    fn system_keyword_takes_one_literal() {
        let decl = notation("SYSTEM", r#""a" "b""#);
        assert!(matches!(
            NotationView::new(&decl).public(),
            Err(ModelError::NotationSyntax { .. })
        ));
    }
}
