#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

mod common;

use common::SAMPLE;
use rs_html_query::{Error, HtmlDocument, Options};

#[test]
fn full_documents_gain_scaffolding() {
    let doc = HtmlDocument::parse(SAMPLE);
    assert!(doc.body().is_some());
    assert_eq!(doc.find("html").expect("valid").len(), 1);
    assert!(doc.outer_html().contains("<body>"));
}

#[test]
fn fragment_mode_keeps_markup_as_is() {
    let doc = HtmlDocument::parse_with_options(SAMPLE, &Options::fragment());
    assert!(doc.options().fragment);
    assert_eq!(doc.outer_html().to_string(), SAMPLE);
    assert!(doc.find("body").expect("valid").is_empty());
}

#[test]
fn empty_document_accepts_content() {
    let doc = HtmlDocument::new();
    let body = doc.find("body").expect("valid");
    body.append("<p>hi</p>").expect("content");
    assert_eq!(doc.find("p").expect("valid").text().as_ref(), "hi");
}

#[test]
fn bytes_are_decoded_by_declared_charset() {
    let mut bytes = b"<html><head><meta charset=\"windows-1252\"></head><body><p>".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b"t\xE9</p></body></html>");
    let doc = HtmlDocument::from_bytes(&bytes);
    assert_eq!(doc.find("p").expect("valid").text().as_ref(), "\u{e9}t\u{e9}");
}

#[test]
fn files_are_read_and_missing_files_fail() {
    let path = std::env::temp_dir().join(format!("rs-html-query-{}.html", std::process::id()));
    std::fs::write(&path, SAMPLE).expect("write temp file");
    let doc = HtmlDocument::from_file(&path).expect("readable");
    std::fs::remove_file(&path).expect("remove temp file");
    assert_eq!(doc.find("p").expect("valid").len(), 2);

    let err = HtmlDocument::from_file(path.with_extension("missing")).expect_err("absent");
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn selector_cache_is_bounded_and_optional() {
    let doc = HtmlDocument::parse(SAMPLE);
    doc.find("p").expect("valid");
    doc.find("p").expect("valid");
    assert_eq!(doc.compiler().cached(), 1);

    let options = Options {
        selector_cache_size: 0,
        ..Options::default()
    };
    let uncached = HtmlDocument::parse_with_options(SAMPLE, &options);
    assert_eq!(uncached.find("p").expect("valid").len(), 2);
    assert_eq!(uncached.compiler().cached(), 0);
}

#[test]
fn errors_render_readable_messages() {
    assert_eq!(
        Error::OwnershipError.to_string(),
        "The DOM node does not belong to the document"
    );
    let doc = HtmlDocument::parse(SAMPLE);
    let err = doc.find("::nope").expect_err("bad selector");
    assert!(err.to_string().starts_with("Invalid selector"));
}
