use std::collections::HashSet;

use crate::error::{RepairError, Result};

use super::types::Catalog;

/// Catalog compiled into the binary from `core/config/catalog.toml`.
const DEFAULT_CATALOG: &str = include_str!("../../config/catalog.toml");

/// Parse a catalog from TOML and check its internal references.
///
/// # Returns
/// * `Ok(Catalog)` - A catalog whose diagnosis issue exists and whose ids are unique
/// * `Err(RepairError::Config)` - If the TOML is invalid or inconsistent
pub fn catalog_from_str(content: &str) -> Result<Catalog> {
    let catalog: Catalog =
        toml::from_str(content).map_err(|e| RepairError::Config(e.to_string()))?;
    check(&catalog)?;
    Ok(catalog)
}

/// The embedded catalog.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_catalog() -> Catalog {
    catalog_from_str(DEFAULT_CATALOG).expect("embedded catalog.toml must be valid")
}

fn check(catalog: &Catalog) -> Result<()> {
    if catalog.discount_percent > 100 {
        return Err(RepairError::Config(format!(
            "discount_percent {} exceeds 100",
            catalog.discount_percent
        )));
    }
    if catalog.issue(&catalog.diagnosis_issue).is_none() {
        return Err(RepairError::Config(format!(
            "diagnosis issue '{}' is not in the issue list",
            catalog.diagnosis_issue
        )));
    }

    let mut seen = HashSet::new();
    for issue in &catalog.issues {
        if !seen.insert(issue.id.as_str()) {
            return Err(RepairError::Config(format!("duplicate issue id '{}'", issue.id)));
        }
    }
    let mut seen = HashSet::new();
    for device in &catalog.devices {
        if !seen.insert(device.id.as_str()) {
            return Err(RepairError::Config(format!("duplicate device id '{}'", device.id)));
        }
        if device.brands.is_empty() {
            return Err(RepairError::Config(format!("device '{}' has no brands", device.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_loads() {
        let catalog = default_catalog();
        assert!(!catalog.devices.is_empty(), "Should have device types");
        assert!(!catalog.issues.is_empty(), "Should have issues");
        assert_eq!(catalog.discount_percent, 20);
    }

    #[test]
    fn test_laptop_brands() {
        let catalog = default_catalog();
        let brands = catalog.brands_for("laptop");
        assert!(brands.iter().any(|b| b == "Dell"));
        assert!(catalog.brands_for("toaster").is_empty());
    }

    #[test]
    fn test_diagnosis_issue_label() {
        let catalog = default_catalog();
        let issue = catalog.issue(&catalog.diagnosis_issue).unwrap();
        assert_eq!(issue.label, "Not Sure / Need Diagnosis");
    }

    #[test]
    fn test_estimate_sums_known_issues() {
        let catalog = default_catalog();
        let ids = vec!["battery".to_string(), "motherboard".to_string(), "bogus".to_string()];
        assert_eq!(catalog.estimate(&ids), 3499 + 5999);
        assert_eq!(catalog.discount_for(catalog.estimate(&ids)), 1900);
    }

    #[test]
    fn test_plans_present() {
        let catalog = default_catalog();
        assert_eq!(catalog.plans.len(), 3);
        assert!(catalog.plan("premium").unwrap().highlighted);
    }

    #[test]
    fn test_rejects_missing_diagnosis_issue() {
        let toml = r#"
            discount_percent = 10
            diagnosis_issue = "nope"

            [[devices]]
            id = "laptop"
            label = "Laptop"
            brands = ["Dell"]

            [[issues]]
            id = "battery"
            label = "Battery Problem"
            price = 100
        "#;
        let err = catalog_from_str(toml).unwrap_err();
        assert!(err.to_string().contains("diagnosis issue"));
    }

    #[test]
    fn test_rejects_duplicate_issue() {
        let toml = r#"
            discount_percent = 10
            diagnosis_issue = "a"

            [[devices]]
            id = "laptop"
            label = "Laptop"
            brands = ["Dell"]

            [[issues]]
            id = "a"
            label = "A"
            price = 1

            [[issues]]
            id = "a"
            label = "A again"
            price = 2
        "#;
        assert!(matches!(catalog_from_str(toml), Err(RepairError::Config(_))));
    }

    #[test]
    fn test_rejects_invalid_toml() {
        assert!(matches!(catalog_from_str("discount_percent = "), Err(RepairError::Config(_))));
    }
}
