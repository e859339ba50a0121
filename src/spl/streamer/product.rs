use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};

use super::helpers::node_from_start;
use super::{SplError, SplStreamer};
use crate::spl::node::XmlNode;

/// Tag-equivalence rule for the product unit: full products and the
/// lighter-weight medicine variant denote the same logical unit.
fn is_product_unit(local_name: &[u8]) -> bool {
    matches!(local_name, b"manufacturedProduct" | b"manufacturedMedicine")
}

impl<R: BufRead> SplStreamer<R> {
    /// Read the next product unit from the stream
    ///
    /// Yields one owned subtree per top-level match of the product-unit
    /// tag set. SPL wraps the coded product in an outer element of the
    /// same name; the wrapper is captured as a single subtree with the
    /// inner product as a child, never yielded twice. Returns `None` once
    /// the document is exhausted.
    pub fn next_product(&mut self) -> Result<Option<XmlNode>, SplError> {
        if !self.header_read {
            self.read_header()?;
        }
        if !self.in_body {
            return Ok(None);
        }

        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if is_product_unit(e.local_name().as_ref()) {
                        let unit = self.capture_element(&e)?;
                        return Ok(Some(unit));
                    }
                }
                Ok(Event::Empty(e)) => {
                    if is_product_unit(e.local_name().as_ref()) {
                        return Ok(Some(node_from_start(&e)?));
                    }
                }
                Ok(Event::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
                _ => {}
            }
            buf.clear();
        }
    }

    /// Capture the subtree of an element whose start tag was just read
    ///
    /// The parse buffer is released after every event; only the captured
    /// subtree is retained.
    pub(super) fn capture_element(&mut self, start: &BytesStart) -> Result<XmlNode, SplError> {
        let mut root = node_from_start(start)?;
        let mut open: Vec<XmlNode> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    open.push(node_from_start(&e)?);
                }
                Ok(Event::Empty(e)) => {
                    let node = node_from_start(&e)?;
                    attach(&mut root, &mut open, node);
                }
                Ok(Event::Text(t)) => {
                    let text = t.unescape()?;
                    match open.last_mut() {
                        Some(top) => top.push_text(&text),
                        None => root.push_text(&text),
                    }
                }
                Ok(Event::CData(t)) => {
                    let raw = t.into_inner();
                    let text = std::str::from_utf8(&raw)?;
                    match open.last_mut() {
                        Some(top) => top.push_text(text),
                        None => root.push_text(text),
                    }
                }
                Ok(Event::End(_)) => match open.pop() {
                    Some(node) => attach(&mut root, &mut open, node),
                    None => return Ok(root),
                },
                Ok(Event::Eof) => {
                    return Err(SplError::InvalidStructure(format!(
                        "unexpected EOF inside <{}>",
                        root.name()
                    )));
                }
                Err(e) => return Err(e.into()),
                _ => {}
            }
            buf.clear();
        }
    }
}

fn attach(root: &mut XmlNode, open: &mut [XmlNode], node: XmlNode) {
    match open.last_mut() {
        Some(parent) => parent.push_child(node),
        None => root.push_child(node),
    }
}
