//! Assertions for test suites.
//!
//! ```
//! use xml_equiv_core::assert_xml_eq;
//!
//! assert_xml_eq!(r#"<e a="1" b="2"/>"#, r#"<e b="2" a="1"></e>"#);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::io::BufRead;

use crate::equiv::compare;
use crate::format::format_text;
use crate::parser::{parse, parse_reader, ParseError};
use crate::tree::XmlNode;

/// Anything an assertion can compare: a parsed tree, XML text or a stream.
pub enum XmlSource<'a> {
    Tree(&'a XmlNode),
    Text(&'a str),
    Bytes(&'a [u8]),
    Reader(Box<dyn BufRead + 'a>),
}

impl<'a> XmlSource<'a> {
    /// Read the document from a stream when the assertion runs.
    ///
    /// `&[u8]` is itself a reader, so streams are wrapped explicitly rather
    /// than through `From`.
    pub fn from_reader(reader: impl BufRead + 'a) -> Self {
        XmlSource::Reader(Box::new(reader))
    }

    /// Parse the source if needed.
    pub fn load(self) -> Result<Cow<'a, XmlNode>, ParseError> {
        match self {
            XmlSource::Tree(node) => Ok(Cow::Borrowed(node)),
            XmlSource::Text(text) => parse(text.as_bytes()).map(Cow::Owned),
            XmlSource::Bytes(bytes) => parse(bytes).map(Cow::Owned),
            XmlSource::Reader(reader) => parse_reader(reader).map(Cow::Owned),
        }
    }
}

impl fmt::Debug for XmlSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlSource::Tree(node) => f.debug_tuple("Tree").field(node).finish(),
            XmlSource::Text(text) => f.debug_tuple("Text").field(text).finish(),
            XmlSource::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            XmlSource::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl<'a> From<&'a XmlNode> for XmlSource<'a> {
    fn from(node: &'a XmlNode) -> Self {
        XmlSource::Tree(node)
    }
}

impl<'a> From<&'a str> for XmlSource<'a> {
    fn from(text: &'a str) -> Self {
        XmlSource::Text(text)
    }
}

impl<'a> From<&'a String> for XmlSource<'a> {
    fn from(text: &'a String) -> Self {
        XmlSource::Text(text)
    }
}

impl<'a> From<&'a [u8]> for XmlSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        XmlSource::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for XmlSource<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        XmlSource::Bytes(bytes)
    }
}

/// Panic unless the two documents are equivalent.
///
/// The panic message holds the first difference and both documents.
#[track_caller]
pub fn assert_xml_equal<'e, 'a>(
    expected: impl Into<XmlSource<'e>>,
    actual: impl Into<XmlSource<'a>>,
    message: Option<&str>,
) {
    check(expected.into(), actual.into(), message, true);
}

/// Panic if the two documents are equivalent.
#[track_caller]
pub fn assert_xml_not_equal<'e, 'a>(
    expected: impl Into<XmlSource<'e>>,
    actual: impl Into<XmlSource<'a>>,
    message: Option<&str>,
) {
    check(expected.into(), actual.into(), message, false);
}

#[track_caller]
fn check(expected: XmlSource<'_>, actual: XmlSource<'_>, message: Option<&str>, want_equal: bool) {
    let expected = match expected.load() {
        Ok(tree) => tree,
        Err(err) => panic!("expected document could not be parsed: {err}"),
    };
    let actual = match actual.load() {
        Ok(tree) => tree,
        Err(err) => panic!("actual document could not be parsed: {err}"),
    };
    let comparison = match compare(&expected, &actual) {
        Ok(comparison) => comparison,
        Err(err) => panic!("documents could not be compared: {err}"),
    };

    if comparison.is_equivalent() == want_equal {
        return;
    }

    let headline = if want_equal {
        "documents expected to be equivalent, but were not"
    } else {
        "documents expected to differ, but were equivalent"
    };
    let mut report = String::new();
    if let Some(message) = message {
        report.push_str(message);
        report.push('\n');
    }
    report.push_str(headline);
    if want_equal {
        report.push('\n');
        report.push_str(&format_text(&comparison));
    }
    panic!(
        "{report}\n\nexpected:\n{}\n\nactual:\n{}\n",
        expected.as_ref(),
        actual.as_ref()
    );
}

/// Assert that two XML documents are equivalent.
///
/// Accepts anything convertible into [`XmlSource`](crate::assert::XmlSource)
/// and an optional format string for a custom message.
#[macro_export]
macro_rules! assert_xml_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::assert::assert_xml_equal($expected, $actual, None)
    };
    ($expected:expr, $actual:expr, $($arg:tt)+) => {
        $crate::assert::assert_xml_equal($expected, $actual, Some(format!($($arg)+).as_str()))
    };
}

/// Assert that two XML documents are not equivalent.
#[macro_export]
macro_rules! assert_xml_ne {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::assert::assert_xml_not_equal($expected, $actual, None)
    };
    ($expected:expr, $actual:expr, $($arg:tt)+) => {
        $crate::assert::assert_xml_not_equal($expected, $actual, Some(format!($($arg)+).as_str()))
    };
}
