//! Data models for extracted SPL records
//!
//! These models represent the flattened output of a labeling document.
//! Serialized field names reproduce the column names of the downstream
//! loader (`SPLCOLOR`, `SPL_INGREDIENTS`, `NDC`, ...), so the JSON output
//! can be consumed by existing tooling unchanged.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One-shot metadata from the document header.
///
/// The four coded fields are optional: a header may omit any of them and
/// extraction carries the absence through. Empty-string substitution
/// happens only when product records are assembled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentHeader {
    /// Source file name or label supplied by the caller
    pub file_name: String,

    /// Local date the extraction ran, formatted `%d/%m/%Y`
    pub date_created: String,

    /// Document id (`id@root`)
    pub document_id: Option<String>,

    /// Set id shared across document versions (`setId@root`)
    pub set_id: Option<String>,

    /// Effective date (`effectiveTime@value`)
    pub effective_time: Option<String>,

    /// Document type code (`code@code`)
    pub document_type: Option<String>,
}

/// Which section of the document named the sponsor organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SponsorType {
    /// Organization under `legalAuthenticator`; wins when both are present
    Legal,
    /// Organization under `author`
    Labeler,
}

/// The organization responsible for the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    /// Organization display name
    pub name: String,

    /// Section the name was taken from
    pub sponsor_type: SponsorType,
}

/// Active/inactive classification of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientType {
    /// Class code ACTIB or ACTIM
    Active,
    /// Class code IACT
    Inactive,
}

/// One deduplicated ingredient.
///
/// Quantity fields keep the source strings; a missing quantity block leaves
/// them empty. `active_moiety_names` is only populated for active
/// ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Active or inactive classification
    pub ingredient_type: IngredientType,

    /// Substance display name
    pub substance_name: String,

    /// Substance code, the document-wide dedup key
    pub substance_code: String,

    /// Active moiety display names (active ingredients only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_moiety_names: Option<Vec<String>>,

    /// Dose numerator value
    pub numerator_value: String,

    /// Dose numerator unit
    pub numerator_unit: String,

    /// Dose denominator value
    pub denominator_value: String,

    /// Dose denominator unit
    pub denominator_unit: String,
}

/// Flat per-product data, merged with header and sponsor fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    /// Product code from the product element
    pub product_code: String,

    /// Product display name
    pub product_name: String,

    /// Dosage form code (always in the recognized set, or empty)
    pub form_code: String,

    /// Code linking the product to an equivalence class of
    /// interchangeable products, empty when absent
    pub equal_product_code: String,

    /// Color characteristic code
    #[serde(rename = "SPLCOLOR")]
    pub color: String,

    /// Shape characteristic code
    #[serde(rename = "SPLSHAPE")]
    pub shape: String,

    /// Size characteristic value (typically millimeters)
    #[serde(rename = "SPLSIZE")]
    pub size: String,

    /// Imprint text pressed into the product
    #[serde(rename = "SPLIMPRINT")]
    pub imprint: String,

    /// Score characteristic code, empty when the value node is absent
    #[serde(rename = "SPLSCORE")]
    pub score: String,

    /// Coating characteristic code
    #[serde(rename = "SPLCOATING")]
    pub coating: String,

    /// Symbol characteristic code
    #[serde(rename = "SPLSYMBOL")]
    pub symbol: String,

    /// Flavor characteristic code
    #[serde(rename = "SPLFLAVOR")]
    pub flavor: String,

    /// Image reference file name
    #[serde(rename = "SPLIMAGE")]
    pub image: String,

    /// Active ingredient names observed on this product
    #[serde(rename = "SPL_INGREDIENTS")]
    pub active_ingredient_names: Vec<String>,

    /// Inactive ingredient names observed on this product
    #[serde(rename = "SPL_INACTIVE_ING")]
    pub inactive_ingredient_names: Vec<String>,

    /// Approval status code, empty when the lookup fails
    #[serde(rename = "APPROVAL_CODE")]
    pub approval_code: String,

    /// Marketing status code
    #[serde(rename = "MARKETING_ACT_CODE")]
    pub marketing_act_code: String,

    /// DEA schedule codes, one per policy entry, order preserved
    #[serde(rename = "DEA_SCHEDULE_CODE")]
    pub dea_schedule_codes: Vec<String>,

    /// DEA schedule display names, paired with the codes
    #[serde(rename = "DEA_SCHEDULE_NAME")]
    pub dea_schedule_names: Vec<String>,

    /// Packaging (NDC) codes for this product
    #[serde(rename = "NDC")]
    pub ndc_codes: Vec<String>,

    /// Source file name, copied from the header
    pub file_name: String,

    /// Effective date, copied from the header
    pub effective_time: String,

    /// Document id, copied from the header
    pub document_id: String,

    /// Extraction date, copied from the header
    pub date_created: String,

    /// Set id, copied from the header
    pub set_id: String,

    /// Document type code, copied from the header
    pub document_type: String,

    /// Sponsor organization name, empty when no sponsor was found
    pub name: String,
}

/// One finished product record, the unit of output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Unique key: `document_id + "-" + product_code`
    pub setid_product: String,

    /// Packaging (NDC) codes for this product
    pub ndc_codes: Vec<String>,

    /// All scalar and characteristic fields plus header and sponsor
    pub data: ProductData,

    /// The document-wide deduplicated ingredient list, shared by every
    /// record of the document
    pub ingredients: Arc<Vec<Ingredient>>,
}
