use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};

use super::helpers::get_attribute;
use super::{SplError, SplStreamer};
use crate::spl::node::XmlNode;

impl<R: BufRead> SplStreamer<R> {
    /// Read the document prologue: header fields and sponsor sections
    ///
    /// Consumes events up to the first `component` child of the document
    /// root (where the structured body begins). Header values are read
    /// from direct children of the root only; a `code` or `id` nested
    /// deeper in the document never overwrites them. Idempotent, and
    /// invoked implicitly by the first
    /// [`next_product`](Self::next_product) call.
    pub fn read_header(&mut self) -> Result<(), SplError> {
        if self.header_read {
            return Ok(());
        }

        let mut depth = 0usize;
        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if depth == 1 {
                        match e.local_name().as_ref() {
                            b"id" | b"setId" | b"effectiveTime" | b"code" => {
                                self.apply_header_field(&e)?;
                                depth += 1;
                            }
                            b"author" => {
                                let node = self.capture_element(&e)?;
                                self.author_org = organization_name(&node).or(self.author_org.take());
                            }
                            b"legalAuthenticator" => {
                                let node = self.capture_element(&e)?;
                                self.legal_org = organization_name(&node).or(self.legal_org.take());
                            }
                            b"component" => {
                                self.in_body = true;
                                self.header_read = true;
                                return Ok(());
                            }
                            _ => depth += 1,
                        }
                    } else {
                        depth += 1;
                    }
                }
                Ok(Event::Empty(e)) => {
                    if depth == 1 {
                        self.apply_header_field(&e)?;
                    }
                }
                Ok(Event::End(_)) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        // document root closed without a structured body
                        break;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(e.into()),
                _ => {}
            }
            buf.clear();
        }

        self.header_read = true;
        Ok(())
    }

    /// Record one header field from a direct child of the document root
    ///
    /// Repeated siblings overwrite, so the last occurrence wins.
    fn apply_header_field(&mut self, e: &BytesStart) -> Result<(), SplError> {
        match e.local_name().as_ref() {
            b"id" => self.header.document_id = get_attribute(e, "root")?,
            b"setId" => self.header.set_id = get_attribute(e, "root")?,
            b"effectiveTime" => self.header.effective_time = get_attribute(e, "value")?,
            b"code" => self.header.document_type = get_attribute(e, "code")?,
            _ => {}
        }
        Ok(())
    }
}

/// Find the organization name inside an author or legalAuthenticator
/// subtree
///
/// Drills every `representedOrganization` descendant; the last `name`
/// child found wins, matching how nested assignedEntity chains resolve.
fn organization_name(node: &XmlNode) -> Option<String> {
    let mut name = None;
    for org in node.descendants("representedOrganization") {
        for n in org.children("name") {
            name = Some(n.text().to_string());
        }
    }
    name
}
