use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::PathBuf;

use xml_equiv_core::{
    assert_xml_eq, assert_xml_equal, assert_xml_ne, assert_xml_not_equal, parse_str, XmlSource,
};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn equal_documents_pass() {
    assert_xml_eq!("<a><b x='1'/></a>", "<a>\n  <b x=\"1\"></b>\n</a>");
    assert_xml_equal("<r/>", "<r></r>", None);
}

#[test]
fn trees_strings_and_bytes_can_be_mixed() {
    let tree = parse_str("<a>1</a>").expect("parse");
    let text = String::from("<a>1</a>");
    assert_xml_eq!(&tree, &text);
    assert_xml_eq!(b"<a>1</a>", &tree);
    assert_xml_eq!(&text, "<a>1</a>".as_bytes());
}

#[test]
fn readers_are_accepted_as_sources() {
    let expected = File::open(fixture("fixtures/soap_expected_decl.xml")).expect("open fixture");
    let actual = File::open(fixture("fixtures/soap_reprefixed.xml")).expect("open fixture");
    assert_xml_eq!(
        XmlSource::from_reader(BufReader::new(expected)),
        XmlSource::from_reader(BufReader::new(actual)),
    );

    let tree = parse_str("<a>1</a>").expect("parse");
    assert_xml_ne!(&tree, XmlSource::from_reader(Cursor::new("<a>2</a>")));
}

#[test]
#[should_panic(expected = "actual document could not be parsed")]
fn unreadable_stream_is_reported() {
    assert_xml_eq!("<a/>", XmlSource::from_reader(Cursor::new("<a>")));
}

#[test]
fn different_documents_pass_the_negative_assertion() {
    assert_xml_ne!("<a>1</a>", "<a>2</a>");
    assert_xml_not_equal("<a/>", "<b/>", Some("elements are renamed"));
}

#[test]
#[should_panic(expected = "documents expected to be equivalent, but were not")]
fn differing_documents_panic() {
    assert_xml_eq!("<a>1</a>", "<a>2</a>");
}

#[test]
#[should_panic(expected = "checking order 7")]
fn custom_message_is_included() {
    assert_xml_eq!("<a>1</a>", "<a>2</a>", "checking order {}", 7);
}

#[test]
#[should_panic(expected = "text differs")]
fn panic_message_names_the_difference() {
    assert_xml_eq!("<a>1</a>", "<a>2</a>");
}

#[test]
#[should_panic(expected = "documents expected to differ, but were equivalent")]
fn equivalent_documents_fail_the_negative_assertion() {
    assert_xml_ne!("<a/>", "<a></a>");
}

#[test]
#[should_panic(expected = "actual document could not be parsed")]
fn unparseable_input_panics() {
    assert_xml_eq!("<a/>", "<a>");
}
