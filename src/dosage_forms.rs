//! # Recognized Dosage Form Codes
//!
//! SPL documents describe every marketed form of a drug, but this pipeline
//! only admits oral solid dosage forms (tablets, capsules, and their
//! variants). A document whose product carries a form code outside this
//! list is out of scope and rejected whole.
//!
//! Codes are NCI Thesaurus concept codes as used by the SPL `formCode`
//! element (code system 2.16.840.1.113883.3.26.1.1).

/// NCI Thesaurus codes for the admitted oral solid dosage forms.
pub const OSDF_FORM_CODES: &[&str] = &[
    "C25158", "C42895", "C42896",
    "C42917", "C42902", "C42904",
    "C42916", "C42928", "C42936",
    "C42954", "C42998", "C42893",
    "C42897", "C60997", "C42905",
    "C42997", "C42910", "C42927",
    "C42931", "C42930", "C61004",
    "C61005", "C42964", "C42963",
    "C42999", "C61006", "C42985",
    "C42992",
];

/// Whether a `formCode` value belongs to the admitted dosage-form set.
pub fn is_recognized_form(code: &str) -> bool {
    OSDF_FORM_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tablet_code_is_recognized() {
        // C42998: TABLET
        assert!(is_recognized_form("C42998"));
    }

    #[test]
    fn injection_code_is_rejected() {
        // C42946: INJECTION is not an oral solid form
        assert!(!is_recognized_form("C42946"));
    }

    #[test]
    fn empty_code_is_rejected() {
        assert!(!is_recognized_form(""));
    }
}
