//! Product characteristics nested under subjectOf sections
//!
//! Covers approval status, marketing status, DEA schedule policy entries,
//! and the typed SPL characteristics (color, shape, imprint, ...). Typed
//! characteristics are located by the inner `code@code` type label; the
//! value is a literal text node for the imprint, a `reference@value` for
//! the image, and a coded or numeric `value` attribute for the rest.

use crate::spl::models::ProductData;
use crate::spl::node::XmlNode;

/// Apply every subjectOf attribute of one product unit to its record
///
/// The wrapper element and the coded body can each carry subjectOf
/// sections, depending on the document variant; both are scanned.
pub(super) fn apply(unit: &XmlNode, body: &XmlNode, data: &mut ProductData) {
    collect(unit, data);
    if !std::ptr::eq(unit, body) {
        collect(body, data);
    }
}

fn collect(node: &XmlNode, data: &mut ProductData) {
    for subject in node.children("subjectOf") {
        for approval in subject.children("approval") {
            if data.approval_code.is_empty() {
                data.approval_code = approval
                    .first_child("code")
                    .and_then(|c| c.attr("code"))
                    .unwrap_or_default()
                    .to_string();
            }
        }
        for act in subject.children("marketingAct") {
            if data.marketing_act_code.is_empty() {
                data.marketing_act_code = act
                    .first_child("statusCode")
                    .and_then(|c| c.attr("code"))
                    .unwrap_or_default()
                    .to_string();
            }
        }
        for policy in subject.children("policy") {
            // a product can carry several schedule entries; keep them all
            for code in policy.children("code") {
                data.dea_schedule_codes
                    .push(code.attr("code").unwrap_or_default().to_string());
                data.dea_schedule_names
                    .push(code.attr("displayName").unwrap_or_default().to_string());
            }
        }
        for characteristic in subject.children("characteristic") {
            for code in characteristic.children("code") {
                if let Some(kind) = code.attr("code") {
                    apply_characteristic(kind, characteristic, data);
                }
            }
        }
    }
}

/// Dispatch one typed characteristic into its record slot
///
/// The first occurrence of a type wins; unknown type labels are ignored.
fn apply_characteristic(kind: &str, characteristic: &XmlNode, data: &mut ProductData) {
    let slot = match kind {
        "SPLCOLOR" => &mut data.color,
        "SPLSHAPE" => &mut data.shape,
        "SPLSIZE" => &mut data.size,
        "SPLIMPRINT" => &mut data.imprint,
        "SPLSCORE" => &mut data.score,
        "SPLCOATING" => &mut data.coating,
        "SPLSYMBOL" => &mut data.symbol,
        "SPLFLAVOR" => &mut data.flavor,
        "SPLIMAGE" => &mut data.image,
        _ => return,
    };
    if !slot.is_empty() {
        return;
    }

    let value = characteristic.first_child("value");
    *slot = match kind {
        "SPLIMPRINT" => value.map(|v| v.text().to_string()).unwrap_or_default(),
        "SPLIMAGE" => characteristic
            .first_descendant("reference")
            .and_then(|r| r.attr("value"))
            .unwrap_or_default()
            .to_string(),
        _ => value
            .and_then(|v| {
                v.attr("code")
                    .filter(|code| !code.is_empty())
                    .or_else(|| v.attr("value"))
            })
            .unwrap_or_default()
            .to_string(),
    };
}
