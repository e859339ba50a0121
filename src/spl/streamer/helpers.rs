use quick_xml::events::BytesStart;

use super::SplError;
use crate::spl::node::XmlNode;

/// Helper function to get an attribute value from a BytesStart
///
/// Attribute keys are matched by local name so prefixed attributes
/// (e.g. `xsi:type`) resolve the same way as unprefixed ones.
pub(super) fn get_attribute(e: &BytesStart, name: &str) -> Result<Option<String>, SplError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| SplError::Xml(quick_xml::Error::from(e)))?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            let value = std::str::from_utf8(&attr.value)?.to_string();
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Build an [`XmlNode`] from a start (or empty) tag, attributes included
pub(super) fn node_from_start(e: &BytesStart) -> Result<XmlNode, SplError> {
    let name = std::str::from_utf8(e.local_name().as_ref())?.to_string();
    let mut node = XmlNode::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|e| SplError::Xml(quick_xml::Error::from(e)))?;
        let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
        let value = std::str::from_utf8(&attr.value)?.to_string();
        node.push_attribute(key, value);
    }
    Ok(node)
}
