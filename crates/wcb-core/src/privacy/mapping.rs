//! Metadata field mapping
//!
//! Both record types store payee details under the same suffixes; only the
//! key prefix differs. Table order is the export field order.

/// `(key suffix, label)` pairs in export order
pub const FIELD_MAPPING: &[(&str, &str)] = &[
    ("name_of_payer", "Payer Name"),
    ("currency", "Currency"),
    ("payment_method", "Payment Method"),
    // Direct deposit
    ("ach_bank_name", "Bank Name"),
    ("ach_account_type", "Account Type"),
    ("ach_routing_number", "Routing Number"),
    ("ach_account_number", "Account Number"),
    ("ach_account_holder_name", "Account Holder Name"),
    // Check
    ("payable_to", "Payable To"),
    ("check_street_address", "Street Address"),
    ("check_city", "City"),
    ("check_state", "State / Province"),
    ("check_zip_code", "ZIP / Postal Code"),
    ("check_country", "Country"),
    // Wire
    ("bank_name", "Beneficiary’s Bank Name"),
    ("bank_street_address", "Beneficiary’s Bank Street Address"),
    ("bank_city", "Beneficiary’s Bank City"),
    ("bank_state", "Beneficiary’s Bank State / Province"),
    ("bank_zip_code", "Beneficiary’s Bank ZIP / Postal Code"),
    ("bank_country_iso3166", "Beneficiary’s Bank Country"),
    ("bank_bic", "Beneficiary’s Bank SWIFT BIC"),
    ("beneficiary_account_number", "Beneficiary’s Account Number or IBAN"),
    // Intermediary bank
    ("interm_bank_name", "Intermediary Bank Name"),
    ("interm_bank_street_address", "Intermediary Bank Street Address"),
    ("interm_bank_city", "Intermediary Bank City"),
    ("interm_bank_state", "Intermediary Bank State / Province"),
    ("interm_bank_zip_code", "Intermediary Bank ZIP / Postal Code"),
    ("interm_bank_country_iso3166", "Intermediary Bank Country"),
    ("interm_bank_swift", "Intermediary Bank SWIFT BIC"),
    ("interm_bank_account", "Intermediary Bank Account"),
    // Beneficiary
    ("beneficiary_name", "Beneficiary’s Name"),
    ("beneficiary_street_address", "Beneficiary’s Street Address"),
    ("beneficiary_city", "Beneficiary’s City"),
    ("beneficiary_state", "Beneficiary’s State / Province"),
    ("beneficiary_zip_code", "Beneficiary’s ZIP / Postal Code"),
    ("beneficiary_country_iso3166", "Beneficiary’s Country"),
    // Free text
    ("description", "Description"),
    ("general_notes", "Notes"),
];

/// Full metadata keys and their labels for a prefix, in export order
pub fn meta_mapping(prefix: &str) -> Vec<(String, &'static str)> {
    FIELD_MAPPING
        .iter()
        .map(|(suffix, label)| (format!("{}{}", prefix, suffix), *label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_mapping_size() {
        assert_eq!(FIELD_MAPPING.len(), 38);
        let suffixes: HashSet<_> = FIELD_MAPPING.iter().map(|(s, _)| *s).collect();
        assert_eq!(suffixes.len(), 38);
    }

    #[test]
    fn test_mapping_prefix() {
        let mapping = meta_mapping("_wcbrr_");
        assert_eq!(mapping[0], ("_wcbrr_name_of_payer".to_string(), "Payer Name"));
        assert_eq!(mapping[37], ("_wcbrr_general_notes".to_string(), "Notes"));
        assert!(mapping.iter().all(|(key, _)| key.starts_with("_wcbrr_")));
    }

    #[test]
    fn test_mapping_shape_is_shared() {
        let reimbursements = meta_mapping("_wcbrr_");
        let vendors = meta_mapping("_camppayments_");
        assert_eq!(reimbursements.len(), vendors.len());
        for ((rk, rl), (vk, vl)) in reimbursements.iter().zip(vendors.iter()) {
            assert_eq!(rl, vl);
            assert_eq!(
                rk.trim_start_matches("_wcbrr_"),
                vk.trim_start_matches("_camppayments_")
            );
        }
    }

    #[test]
    fn test_group_order() {
        let labels: Vec<_> = FIELD_MAPPING.iter().map(|(_, l)| *l).collect();
        let pos = |label: &str| labels.iter().position(|l| *l == label).unwrap();
        assert!(pos("Payment Method") < pos("Bank Name"));
        assert!(pos("Account Holder Name") < pos("Payable To"));
        assert!(pos("Country") < pos("Beneficiary’s Bank Name"));
        assert!(pos("Beneficiary’s Account Number or IBAN") < pos("Intermediary Bank Name"));
        assert!(pos("Intermediary Bank Account") < pos("Beneficiary’s Name"));
        assert!(pos("Beneficiary’s Country") < pos("Description"));
    }
}
