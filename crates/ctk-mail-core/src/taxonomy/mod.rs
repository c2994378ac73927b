//! Closed code tables for subject-line segments.
//!
//! A [`Taxonomy`] holds the department, product, action, urgency and
//! external-party codes a draft may use. Tables are loaded once at process
//! start (or taken from [`Taxonomy::standard`]) and never mutated afterwards.
//! Membership tests are case-sensitive exact matches.

mod standard;

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One code with its display label and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    /// Code as it appears in the subject line.
    pub code: String,
    /// Human-readable label.
    pub name: String,
    /// Longer description shown next to the label.
    #[serde(default)]
    pub description: String,
}

impl TaxonomyEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Grouping of external parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyCategory {
    /// Regulators and government bodies.
    Regulatory,
    /// Banks and other financial institutions.
    Financial,
    /// Technology and network partners.
    Technology,
    /// Generic counterparties (customer, merchant, ...). Drafts addressed to
    /// these usually carry a custom party name.
    Common,
}

impl PartyCategory {
    /// Get display name for the category.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Regulatory => "Regulatory Bodies",
            Self::Financial => "Financial Institutions",
            Self::Technology => "Technology Partners",
            Self::Common => "Common External Parties",
        }
    }
}

/// External parties belonging to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyGroup {
    /// Category of every entry in this group.
    pub category: PartyCategory,
    /// Party codes in this category.
    pub entries: Vec<TaxonomyEntry>,
}

/// The full set of code tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    /// Sending department codes.
    pub departments: Vec<TaxonomyEntry>,
    /// Product line codes.
    pub products: Vec<TaxonomyEntry>,
    /// Action type codes.
    pub actions: Vec<TaxonomyEntry>,
    /// Urgency codes. Absence of an urgency means "normal".
    pub urgencies: Vec<TaxonomyEntry>,
    /// External party codes grouped by category.
    pub external_parties: Vec<PartyGroup>,
}

static STANDARD: LazyLock<Taxonomy> = LazyLock::new(standard::centrika);

impl Taxonomy {
    /// The built-in Centrika tables, built once per process.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Parses a table set from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a table is empty, or a table
    /// lists the same code twice.
    pub fn from_json(json: &str) -> Result<Self> {
        let taxonomy: Self = serde_json::from_str(json)?;
        taxonomy.check()?;
        Ok(taxonomy)
    }

    /// Loads a table set from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails [`Taxonomy::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let taxonomy = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            departments = taxonomy.departments.len(),
            products = taxonomy.products.len(),
            parties = taxonomy.party_entries().count(),
            "Loaded taxonomy"
        );
        Ok(taxonomy)
    }

    fn check(&self) -> Result<()> {
        let tables: [(&str, Vec<&TaxonomyEntry>); 5] = [
            ("departments", self.departments.iter().collect()),
            ("products", self.products.iter().collect()),
            ("actions", self.actions.iter().collect()),
            ("urgencies", self.urgencies.iter().collect()),
            ("externalParties", self.party_entries().collect()),
        ];

        for (name, entries) in tables {
            if entries.is_empty() {
                return Err(Error::Config(format!("taxonomy table `{name}` is empty")));
            }
            let mut seen = HashSet::new();
            for entry in entries {
                if entry.code.is_empty() {
                    return Err(Error::Config(format!(
                        "taxonomy table `{name}` contains an empty code"
                    )));
                }
                if !seen.insert(entry.code.as_str()) {
                    return Err(Error::Config(format!(
                        "taxonomy table `{name}` lists `{}` twice",
                        entry.code
                    )));
                }
            }
        }
        Ok(())
    }

    /// Iterates over every external party entry regardless of category.
    pub fn party_entries(&self) -> impl Iterator<Item = &TaxonomyEntry> {
        self.external_parties.iter().flat_map(|g| g.entries.iter())
    }

    /// Returns true if `code` is a department code.
    #[must_use]
    pub fn is_department(&self, code: &str) -> bool {
        self.department(code).is_some()
    }

    /// Returns true if `code` is a product code.
    #[must_use]
    pub fn is_product(&self, code: &str) -> bool {
        self.product(code).is_some()
    }

    /// Returns true if `code` is an action code.
    #[must_use]
    pub fn is_action(&self, code: &str) -> bool {
        self.action(code).is_some()
    }

    /// Returns true if `code` is an urgency code.
    #[must_use]
    pub fn is_urgency(&self, code: &str) -> bool {
        self.urgency(code).is_some()
    }

    /// Returns true if `code` appears in any external party category.
    #[must_use]
    pub fn is_external_party(&self, code: &str) -> bool {
        self.external_party(code).is_some()
    }

    /// Looks up a department entry.
    #[must_use]
    pub fn department(&self, code: &str) -> Option<&TaxonomyEntry> {
        find(&self.departments, code)
    }

    /// Looks up a product entry.
    #[must_use]
    pub fn product(&self, code: &str) -> Option<&TaxonomyEntry> {
        find(&self.products, code)
    }

    /// Looks up an action entry.
    #[must_use]
    pub fn action(&self, code: &str) -> Option<&TaxonomyEntry> {
        find(&self.actions, code)
    }

    /// Looks up an urgency entry.
    #[must_use]
    pub fn urgency(&self, code: &str) -> Option<&TaxonomyEntry> {
        find(&self.urgencies, code)
    }

    /// Looks up an external party entry in any category.
    #[must_use]
    pub fn external_party(&self, code: &str) -> Option<&TaxonomyEntry> {
        self.party_entries().find(|e| e.code == code)
    }

    /// Returns the category an external party code belongs to.
    #[must_use]
    pub fn party_category(&self, code: &str) -> Option<PartyCategory> {
        self.external_parties
            .iter()
            .find(|g| g.entries.iter().any(|e| e.code == code))
            .map(|g| g.category)
    }
}

fn find<'a>(entries: &'a [TaxonomyEntry], code: &str) -> Option<&'a TaxonomyEntry> {
    entries.iter().find(|e| e.code == code)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect
)]
mod tests {
    use super::*;

    mod standard_tests {
        use super::*;

        #[test]
        fn department_membership_is_exact() {
            let t = Taxonomy::standard();
            assert!(t.is_department("CTK-TECH"));
            assert!(!t.is_department("TECH"));
            assert!(!t.is_department("ctk-tech"));
            assert!(!t.is_department(""));
        }

        #[test]
        fn urgency_excludes_normal() {
            let t = Taxonomy::standard();
            assert!(t.is_urgency("URGENT"));
            assert!(t.is_urgency("HIGH"));
            assert!(t.is_urgency("LOW"));
            assert!(!t.is_urgency("NORMAL"));
        }

        #[test]
        fn party_lookup_spans_categories() {
            let t = Taxonomy::standard();
            assert_eq!(t.party_category("BNR"), Some(PartyCategory::Regulatory));
            assert_eq!(t.party_category("EquityBank"), Some(PartyCategory::Financial));
            assert_eq!(t.party_category("AWS"), Some(PartyCategory::Technology));
            assert_eq!(t.party_category("Customer"), Some(PartyCategory::Common));
            assert_eq!(t.party_category("customer"), None);
        }

        #[test]
        fn labels() {
            let t = Taxonomy::standard();
            assert_eq!(t.product("GWAY").unwrap().name, "Payment Gateway");
            assert_eq!(t.action("INFO").unwrap().name, "Information Only");
            assert_eq!(
                t.external_party("BNR").unwrap().name,
                "Central Bank of Rwanda"
            );
        }

        #[test]
        fn table_sizes() {
            let t = Taxonomy::standard();
            assert_eq!(t.departments.len(), 16);
            assert_eq!(t.products.len(), 12);
            assert_eq!(t.actions.len(), 6);
            assert_eq!(t.urgencies.len(), 3);
            assert_eq!(t.party_entries().count(), 23);
        }

        #[test]
        fn standard_passes_own_checks() {
            assert!(Taxonomy::standard().check().is_ok());
        }
    }

    mod loading_tests {
        use super::*;

        #[test]
        fn json_round_trip_of_standard() {
            let json = serde_json::to_string(Taxonomy::standard()).unwrap();
            let loaded = Taxonomy::from_json(&json).unwrap();
            assert_eq!(&loaded, Taxonomy::standard());
        }

        #[test]
        fn rejects_empty_table() {
            let mut t = Taxonomy::standard().clone();
            t.actions.clear();
            let json = serde_json::to_string(&t).unwrap();
            let err = Taxonomy::from_json(&json).unwrap_err();
            assert!(err.to_string().contains("actions"));
        }

        #[test]
        fn rejects_duplicate_code() {
            let mut t = Taxonomy::standard().clone();
            t.products.push(TaxonomyEntry::new("GWAY", "Again", ""));
            let json = serde_json::to_string(&t).unwrap();
            let err = Taxonomy::from_json(&json).unwrap_err();
            assert!(err.to_string().contains("GWAY"));
        }

        #[test]
        fn rejects_malformed_json() {
            assert!(matches!(
                Taxonomy::from_json("{\"departments\": 3}"),
                Err(Error::Serde(_))
            ));
        }

        #[test]
        fn missing_file_is_io_error() {
            assert!(matches!(
                Taxonomy::load("/nonexistent/ctk-taxonomy.json"),
                Err(Error::Io(_))
            ));
        }
    }
}
