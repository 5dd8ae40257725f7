//! Scanner for the body of a `<!DOCTYPE ...>` declaration.
//!
//! quick-xml reports a DOCTYPE as one opaque run of text. This module splits
//! that text into the root name, the external identifier and the internal
//! subset. Only entity declarations, notation declarations and comments are
//! modeled; element and attribute-list declarations, processing instructions
//! and parameter-entity references are recognised and skipped.

use thiserror::Error;

use crate::tree::{DocTypeDecl, EntityDecl, ExternalIdKeyword, NodeKind, NotationDecl, XmlNode};

/// A syntax error inside a DOCTYPE declaration.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed DOCTYPE at byte {offset}: {message}")]
pub struct DtdError {
    pub offset: usize,
    pub message: String,
}

/// Parse the text between `<!DOCTYPE` and the closing `>`.
pub fn parse_doctype(input: &str) -> Result<DocTypeDecl, DtdError> {
    DoctypeScanner::new(input).parse()
}

struct DoctypeScanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> DoctypeScanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(&mut self) -> Result<DocTypeDecl, DtdError> {
        self.skip_whitespace();
        let name = self.parse_name()?;
        let mut doctype = DocTypeDecl {
            name,
            ..DocTypeDecl::default()
        };

        self.skip_whitespace();
        if self.looking_at("SYSTEM") {
            self.advance("SYSTEM".len());
            self.skip_whitespace_required()?;
            doctype.external_id = Some(ExternalIdKeyword::System);
            doctype.long_name = Some(self.parse_quoted_raw()?.to_string());
        } else if self.looking_at("PUBLIC") {
            self.advance("PUBLIC".len());
            self.skip_whitespace_required()?;
            doctype.external_id = Some(ExternalIdKeyword::Public);
            doctype.long_name = Some(self.parse_quoted_raw()?.to_string());
            self.skip_whitespace();
            if matches!(self.peek(), Some('"' | '\'')) {
                doctype.uri = Some(self.parse_quoted_raw()?.to_string());
            }
        }

        self.skip_whitespace();
        if self.peek() == Some('[') {
            self.advance(1);
            doctype.internal_subset = self.parse_internal_subset()?;
            self.skip_whitespace();
        }

        if !self.at_end() {
            return Err(self.fatal(format!(
                "unexpected trailing content '{}'",
                &self.input[self.pos..]
            )));
        }
        Ok(doctype)
    }

    fn parse_internal_subset(&mut self) -> Result<Vec<XmlNode>, DtdError> {
        let mut nodes = Vec::new();
        loop {
            self.skip_whitespace();
            if self.at_end() {
                return Err(self.fatal("unterminated internal subset"));
            }

            if self.peek() == Some(']') {
                self.advance(1);
                return Ok(nodes);
            } else if self.looking_at("<!--") {
                nodes.push(self.parse_comment()?);
            } else if self.looking_at("<!ENTITY") {
                nodes.push(self.parse_entity_decl()?);
            } else if self.looking_at("<!NOTATION") {
                nodes.push(self.parse_notation_decl()?);
            } else if self.looking_at("<!ELEMENT") || self.looking_at("<!ATTLIST") {
                self.skip_markup_decl()?;
            } else if self.looking_at("<?") {
                self.skip_until("?>")?;
            } else if self.peek() == Some('%') {
                self.skip_until(";")?;
            } else {
                return Err(self.fatal(format!(
                    "unexpected character '{}' in internal subset",
                    self.peek().unwrap_or('?')
                )));
            }
        }
    }

    fn parse_comment(&mut self) -> Result<XmlNode, DtdError> {
        self.advance("<!--".len());
        let start = self.pos;
        let end = self.input[start..]
            .find("-->")
            .ok_or_else(|| self.fatal("unterminated comment"))?;
        self.pos = start + end + "-->".len();
        Ok(XmlNode::comment(&self.input[start..start + end]))
    }

    fn parse_entity_decl(&mut self) -> Result<XmlNode, DtdError> {
        self.advance("<!ENTITY".len());
        self.skip_whitespace_required()?;

        let mut entity = EntityDecl::default();
        if self.peek() == Some('%') {
            self.advance(1);
            self.skip_whitespace_required()?;
            entity.parameter = true;
        }
        entity.name = self.parse_name()?;
        self.skip_whitespace_required()?;

        if matches!(self.peek(), Some('"' | '\'')) {
            entity.value = Some(self.parse_quoted()?.to_string());
        } else if self.looking_at("SYSTEM") {
            self.advance("SYSTEM".len());
            self.skip_whitespace_required()?;
            entity.system_id = Some(self.parse_quoted()?.to_string());
        } else if self.looking_at("PUBLIC") {
            self.advance("PUBLIC".len());
            self.skip_whitespace_required()?;
            entity.public_id = Some(self.parse_quoted()?.to_string());
            self.skip_whitespace_required()?;
            entity.system_id = Some(self.parse_quoted()?.to_string());
        } else {
            return Err(self.fatal(format!(
                "expected value or external id for entity '{}'",
                entity.name
            )));
        }

        self.skip_whitespace();
        if self.looking_at("NDATA") {
            if entity.value.is_some() {
                return Err(self.fatal(format!(
                    "NDATA is not allowed on internal entity '{}'",
                    entity.name
                )));
            }
            self.advance("NDATA".len());
            self.skip_whitespace_required()?;
            entity.ndata = Some(self.parse_name()?);
            self.skip_whitespace();
        }

        self.expect('>')?;
        Ok(XmlNode::new(NodeKind::EntityDecl(entity)))
    }

    fn parse_notation_decl(&mut self) -> Result<XmlNode, DtdError> {
        self.advance("<!NOTATION".len());
        self.skip_whitespace_required()?;
        let name = self.parse_name()?;
        self.skip_whitespace_required()?;
        let middle = self.parse_name()?;

        // The identifiers stay unparsed; NotationView interprets them.
        let start = self.pos;
        self.skip_quoted_until('>')?;
        let rest = self.input[start..self.pos].trim().to_string();
        self.advance(1);

        Ok(XmlNode::new(NodeKind::NotationDecl(NotationDecl {
            name,
            middle,
            rest,
        })))
    }

    fn skip_markup_decl(&mut self) -> Result<(), DtdError> {
        self.skip_quoted_until('>')?;
        self.advance(1);
        Ok(())
    }

    /// Move to the next `stop` that is not inside a quoted literal.
    fn skip_quoted_until(&mut self, stop: char) -> Result<(), DtdError> {
        let mut quote = None;
        while let Some(c) = self.peek() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None if c == stop => return Ok(()),
                None if c == '"' || c == '\'' => quote = Some(c),
                None => {}
            }
            self.advance(c.len_utf8());
        }
        Err(self.fatal(format!("expected '{stop}' before end of DOCTYPE")))
    }

    fn skip_until(&mut self, terminator: &str) -> Result<(), DtdError> {
        let end = self.input[self.pos..]
            .find(terminator)
            .ok_or_else(|| self.fatal(format!("expected '{terminator}' before end of DOCTYPE")))?;
        self.pos += end + terminator.len();
        Ok(())
    }

    fn parse_name(&mut self) -> Result<String, DtdError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, '>' | '[' | ']' | '"' | '\'' | '%' | ';') {
                break;
            }
            self.advance(c.len_utf8());
        }
        if self.pos == start {
            return Err(self.fatal("expected name"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// Parse a quoted literal and return it with its quotes.
    fn parse_quoted_raw(&mut self) -> Result<&'a str, DtdError> {
        let start = self.pos;
        self.parse_quoted()?;
        Ok(&self.input[start..self.pos])
    }

    /// Parse a quoted literal and return its content.
    fn parse_quoted(&mut self) -> Result<&'a str, DtdError> {
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.fatal("expected quoted literal")),
        };
        self.advance(1);
        let start = self.pos;
        let len = self.input[start..]
            .find(quote)
            .ok_or_else(|| self.fatal("unterminated quoted literal"))?;
        self.pos = start + len + 1;
        Ok(&self.input[start..start + len])
    }

    fn expect(&mut self, c: char) -> Result<(), DtdError> {
        if self.peek() == Some(c) {
            self.advance(1);
            Ok(())
        } else {
            Err(self.fatal(format!("expected '{c}'")))
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !c.is_ascii_whitespace() {
                break;
            }
            self.advance(1);
        }
        self.pos > start
    }

    fn skip_whitespace_required(&mut self) -> Result<(), DtdError> {
        if self.skip_whitespace() {
            Ok(())
        } else {
            Err(self.fatal("expected whitespace"))
        }
    }

    fn looking_at(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.input.len());
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn fatal(&self, message: impl Into<String>) -> DtdError {
        DtdError {
            offset: self.pos,
            message: message.into(),
        }
    }
}
