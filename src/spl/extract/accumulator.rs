//! Per-product record assembly
//!
//! Each matched product unit becomes one explicit record, built
//! field-by-field while the unit's subtree is in hand. Absent optional
//! values are recorded as empty strings on the finished record, so record
//! count and field alignment hold by construction.

use std::collections::HashSet;
use std::sync::Arc;

use crate::dosage_forms::is_recognized_form;
use crate::spl::models::{
    DocumentHeader, Ingredient, IngredientType, ProductData, ProductRecord, Sponsor,
};
use crate::spl::node::XmlNode;

use super::characteristics;
use super::ingredient::extract_ingredient;
use super::{ExtractError, Extraction};

/// Document-scoped accumulator state
///
/// Freshly constructed per document; holds the product drafts, the
/// deduplicated ingredient list, and the set of substance codes already
/// seen anywhere in the document.
#[derive(Debug, Default)]
pub(super) struct DocumentAccumulator {
    drafts: Vec<ProductData>,
    ingredients: Vec<Ingredient>,
    seen_substance_codes: HashSet<String>,
}

impl DocumentAccumulator {
    /// Process one matched product unit
    ///
    /// SPL wraps the coded product in an outer element of the same name
    /// with `subjectOf` siblings; the coded body is resolved first and
    /// characteristics are read from both levels. A unit whose body has
    /// no product code yields no record.
    pub(super) fn add_unit(&mut self, unit: &XmlNode) -> Result<(), ExtractError> {
        let body = unit
            .first_child("manufacturedProduct")
            .or_else(|| unit.first_child("manufacturedMedicine"))
            .unwrap_or(unit);

        let Some(code) = body.first_child("code").and_then(|c| c.attr("code")) else {
            return Ok(());
        };

        let form_code = body
            .first_child("formCode")
            .and_then(|f| f.attr("code"))
            .unwrap_or_default();
        // Admission gate: a present form code outside the allow-list
        // rejects the whole document. An absent form code passes.
        if !form_code.is_empty() && !is_recognized_form(form_code) {
            return Err(ExtractError::UnrecognizedForm {
                code: form_code.to_string(),
            });
        }

        let mut data = ProductData {
            product_code: code.to_string(),
            product_name: body
                .first_child("name")
                .map(|n| n.text().to_string())
                .unwrap_or_default(),
            form_code: form_code.to_string(),
            equal_product_code: equal_product_code(body),
            ndc_codes: packaging_codes(body),
            ..Default::default()
        };

        for node in body.children("ingredient") {
            self.add_ingredient(node, &mut data);
        }

        characteristics::apply(unit, body, &mut data);

        self.drafts.push(data);
        Ok(())
    }

    /// Classify, extract, and dedup one ingredient element
    ///
    /// The per-product name lists always record the ingredient; the
    /// document-level list only gains it when its substance code is new.
    fn add_ingredient(&mut self, node: &XmlNode, data: &mut ProductData) {
        let Some(ingredient) = extract_ingredient(node) else {
            return;
        };
        match ingredient.ingredient_type {
            IngredientType::Active => data
                .active_ingredient_names
                .push(ingredient.substance_name.clone()),
            IngredientType::Inactive => data
                .inactive_ingredient_names
                .push(ingredient.substance_name.clone()),
        }
        if self
            .seen_substance_codes
            .insert(ingredient.substance_code.clone())
        {
            self.ingredients.push(ingredient);
        }
    }

    /// Join the drafts with header and sponsor into finished records
    pub(super) fn finish(
        self,
        header: DocumentHeader,
        sponsor: Option<Sponsor>,
    ) -> Extraction {
        let DocumentAccumulator {
            drafts,
            ingredients,
            ..
        } = self;
        let ingredients = Arc::new(ingredients);
        let document_id = header.document_id.clone().unwrap_or_default();
        let sponsor_name = sponsor
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_default();

        let products = drafts
            .into_iter()
            .map(|mut data| {
                data.file_name = header.file_name.clone();
                data.date_created = header.date_created.clone();
                data.document_id = document_id.clone();
                data.set_id = header.set_id.clone().unwrap_or_default();
                data.effective_time = header.effective_time.clone().unwrap_or_default();
                data.document_type = header.document_type.clone().unwrap_or_default();
                data.name = sponsor_name.clone();
                ProductRecord {
                    setid_product: format!("{}-{}", document_id, data.product_code),
                    ndc_codes: data.ndc_codes.clone(),
                    ingredients: Arc::clone(&ingredients),
                    data,
                }
            })
            .collect();

        Extraction {
            header,
            sponsor,
            products,
            ingredients,
        }
    }
}

/// Code linking the product to its equivalence class, from the first
/// `definingMaterialKind` descendant
fn equal_product_code(body: &XmlNode) -> String {
    body.first_descendant("definingMaterialKind")
        .and_then(|kind| kind.child_nodes().iter().find_map(|c| c.attr("code")))
        .unwrap_or_default()
        .to_string()
}

/// Packaging (NDC) codes, walking asContent -> contained package
///
/// When the immediate container lacks a coded `code` child, the codes
/// live one or more packaging levels deeper: descend through the nested
/// `asContent` and collect every coded descendant.
fn packaging_codes(body: &XmlNode) -> Vec<String> {
    let mut codes = Vec::new();
    for content in body.children("asContent") {
        let container = content
            .first_child("containerPackagedProduct")
            .or_else(|| content.first_child("containerPackagedMedicine"));
        let Some(container) = container else {
            continue;
        };
        match container.first_child("code").and_then(|c| c.attr("code")) {
            Some(code) => codes.push(code.to_string()),
            None => {
                if let Some(nested) = container.first_descendant("asContent") {
                    for code in nested.descendants("code") {
                        if let Some(value) = code.attr("code") {
                            codes.push(value.to_string());
                        }
                    }
                }
            }
        }
    }
    codes
}
