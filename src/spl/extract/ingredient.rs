//! Ingredient classification and extraction
//!
//! Ingredients are classified by the `classCode` attribute: ACTIB and
//! ACTIM are active, IACT is inactive, anything else produces no record.
//! A missing quantity block or substance field degrades to empty values.

use crate::spl::models::{Ingredient, IngredientType};
use crate::spl::node::XmlNode;

/// Extract one ingredient from its element, or `None` for unclassified
/// class codes
pub(super) fn extract_ingredient(node: &XmlNode) -> Option<Ingredient> {
    let ingredient_type = match node.attr("classCode") {
        Some("ACTIB") | Some("ACTIM") => IngredientType::Active,
        Some("IACT") => IngredientType::Inactive,
        _ => return None,
    };

    let mut substance_name = String::new();
    let mut substance_code = String::new();
    let mut moiety_names = Vec::new();

    if let Some(substance) = node.first_child("ingredientSubstance") {
        for child in substance.child_nodes() {
            match child.name() {
                "name" => substance_name = child.text().to_string(),
                "code" => {
                    substance_code = child.attr("code").unwrap_or_default().to_string();
                }
                "activeMoiety" => {
                    // display name sits one nesting level down
                    if let Some(name) = child.first_descendant("name") {
                        moiety_names.push(name.text().to_string());
                    }
                }
                _ => {}
            }
        }
    }

    let quantity = node.first_child("quantity");
    let numerator = quantity.and_then(|q| q.first_child("numerator"));
    let denominator = quantity.and_then(|q| q.first_child("denominator"));

    Some(Ingredient {
        ingredient_type,
        substance_name,
        substance_code,
        active_moiety_names: match ingredient_type {
            IngredientType::Active => Some(moiety_names),
            IngredientType::Inactive => None,
        },
        numerator_value: attr_or_empty(numerator, "value"),
        numerator_unit: attr_or_empty(numerator, "unit"),
        denominator_value: attr_or_empty(denominator, "value"),
        denominator_unit: attr_or_empty(denominator, "unit"),
    })
}

fn attr_or_empty(node: Option<&XmlNode>, name: &str) -> String {
    node.and_then(|n| n.attr(name)).unwrap_or_default().to_string()
}
