use std::io::{BufReader, Cursor};

use super::*;
use crate::spl::models::SponsorType;

const MINIMAL_SPL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<document xmlns="urn:hl7-org:v3">
  <id root="917046f1-4ab9-4ec3-9327-d8ec82f672f1"/>
  <code code="34391-3"/>
  <effectiveTime value="20130213"/>
  <setId root="3abb85b1-2a3f-4106-ae5f-50af72a74723"/>
  <author>
    <assignedEntity>
      <representedOrganization>
        <name>Acme Pharmaceuticals</name>
      </representedOrganization>
    </assignedEntity>
  </author>
  <legalAuthenticator>
    <assignedEntity>
      <representedOrganization>
        <name>Acme Holdings Inc</name>
      </representedOrganization>
    </assignedEntity>
  </legalAuthenticator>
  <component>
    <structuredBody>
      <component>
        <section>
          <subject>
            <manufacturedProduct>
              <manufacturedProduct>
                <code code="0000-0001"/>
                <name>Examplol 500 MG</name>
                <formCode code="C42998"/>
              </manufacturedProduct>
              <subjectOf>
                <marketingAct>
                  <statusCode code="active"/>
                </marketingAct>
              </subjectOf>
            </manufacturedProduct>
          </subject>
        </section>
      </component>
    </structuredBody>
  </component>
</document>"#;

fn streamer_for(xml: &str) -> SplStreamer<BufReader<Cursor<Vec<u8>>>> {
    let reader = Cursor::new(xml.as_bytes().to_vec());
    SplStreamer::new(BufReader::new(reader)).unwrap()
}

#[test]
fn test_header_fields() {
    let mut streamer = streamer_for(MINIMAL_SPL);
    streamer.read_header().unwrap();

    let header = streamer.header();
    assert_eq!(
        header.document_id.as_deref(),
        Some("917046f1-4ab9-4ec3-9327-d8ec82f672f1")
    );
    assert_eq!(
        header.set_id.as_deref(),
        Some("3abb85b1-2a3f-4106-ae5f-50af72a74723")
    );
    assert_eq!(header.effective_time.as_deref(), Some("20130213"));
    assert_eq!(header.document_type.as_deref(), Some("34391-3"));
}

#[test]
fn test_legal_authenticator_wins_over_author() {
    let mut streamer = streamer_for(MINIMAL_SPL);
    streamer.read_header().unwrap();

    let sponsor = streamer.sponsor().expect("sponsor present");
    assert_eq!(sponsor.name, "Acme Holdings Inc");
    assert_eq!(sponsor.sponsor_type, SponsorType::Legal);
}

#[test]
fn test_author_only_sponsor_is_labeler() {
    let xml = MINIMAL_SPL.replace(
        "legalAuthenticator>",
        // rename both tags so the section no longer matches
        "somethingElse>",
    );
    let mut streamer = streamer_for(&xml);
    streamer.read_header().unwrap();

    let sponsor = streamer.sponsor().expect("sponsor present");
    assert_eq!(sponsor.name, "Acme Pharmaceuticals");
    assert_eq!(sponsor.sponsor_type, SponsorType::Labeler);
}

#[test]
fn test_missing_sponsor_sections() {
    let xml = r#"<document xmlns="urn:hl7-org:v3">
  <id root="R1"/>
  <component/>
</document>"#;
    let mut streamer = streamer_for(xml);
    streamer.read_header().unwrap();
    assert!(streamer.sponsor().is_none());
}

#[test]
fn test_nested_wrapper_yields_one_unit() {
    let mut streamer = streamer_for(MINIMAL_SPL);

    let unit = streamer.next_product().unwrap().expect("one product unit");
    assert_eq!(unit.name(), "manufacturedProduct");
    // the coded inner product is a child of the captured wrapper
    let inner = unit
        .first_child("manufacturedProduct")
        .expect("inner product");
    assert_eq!(
        inner.first_child("code").and_then(|c| c.attr("code")),
        Some("0000-0001")
    );
    assert_eq!(
        inner.first_child("name").map(|n| n.text()),
        Some("Examplol 500 MG")
    );
    // subjectOf siblings stay on the wrapper
    assert_eq!(unit.children("subjectOf").count(), 1);

    assert!(streamer.next_product().unwrap().is_none());
}

#[test]
fn test_medicine_variant_is_matched() {
    let xml = MINIMAL_SPL
        .replacen("<manufacturedProduct>\n                <code", "<manufacturedMedicine>\n                <code", 1)
        .replacen("</manufacturedProduct>\n              <subjectOf>", "</manufacturedMedicine>\n              <subjectOf>", 1);
    let mut streamer = streamer_for(&xml);

    let unit = streamer.next_product().unwrap().expect("one product unit");
    let inner = unit
        .first_child("manufacturedMedicine")
        .expect("medicine body");
    assert_eq!(
        inner.first_child("code").and_then(|c| c.attr("code")),
        Some("0000-0001")
    );
}

#[test]
fn test_header_read_is_implicit_and_idempotent() {
    let mut streamer = streamer_for(MINIMAL_SPL);
    // next_product without an explicit read_header call
    let unit = streamer.next_product().unwrap();
    assert!(unit.is_some());
    assert!(streamer.header().document_id.is_some());
    // a second read_header is a no-op
    streamer.read_header().unwrap();
    assert!(streamer.header().document_id.is_some());
}

#[test]
fn test_document_without_body_yields_nothing() {
    let xml = r#"<document xmlns="urn:hl7-org:v3"><id root="R1"/></document>"#;
    let mut streamer = streamer_for(xml);
    assert!(streamer.next_product().unwrap().is_none());
    assert_eq!(streamer.header().document_id.as_deref(), Some("R1"));
}

#[test]
fn test_malformed_markup_is_a_parse_error() {
    let xml = r#"<document xmlns="urn:hl7-org:v3">
  <component><structuredBody>
    <manufacturedProduct><code code="P1"/>
  </structuredBody></component>
</document>"#;
    let mut streamer = streamer_for(xml);
    let result = streamer.next_product();
    assert!(matches!(
        result,
        Err(SplError::Xml(_)) | Err(SplError::InvalidStructure(_))
    ));
}

#[test]
fn test_products_iterator() {
    let streamer = streamer_for(MINIMAL_SPL);
    let units: Result<Vec<_>, _> = streamer.products().collect();
    assert_eq!(units.unwrap().len(), 1);
}
