//! Cross-checks between the categories and layout documents.
//!
//! Each check walks its whole input and records every problem; the results
//! are merged into a [`ValidationReport`] and only then turned into an error.

use crate::domain::model::Mapping;
use crate::utils::error::{LayoutError, Result};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Case-insensitive sort key: full Unicode case folding, so `ß` sorts as
/// `ss` and `ς` as `σ`.
pub fn casefold(value: &str) -> String {
    caseless::default_case_fold_str(value)
}

fn sort_casefold(values: &mut [String]) {
    values.sort_by(|a, b| casefold(a).cmp(&casefold(b)));
}

/// Category names present in only one of the two documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMismatch {
    pub only_in_categories: Vec<String>,
    pub only_in_layout: Vec<String>,
}

impl CategoryMismatch {
    pub fn is_empty(&self) -> bool {
        self.only_in_categories.is_empty() && self.only_in_layout.is_empty()
    }
}

/// Bins listed twice under one category, and bins claimed by several.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinConflicts {
    /// (category, repeated bins), sorted by category.
    pub within_category: Vec<(String, Vec<String>)>,
    /// (bin, claiming categories), sorted by bin.
    pub across_categories: Vec<(String, Vec<String>)>,
}

impl BinConflicts {
    pub fn is_empty(&self) -> bool {
        self.within_category.is_empty() && self.across_categories.is_empty()
    }
}

/// Everything both checks found, plus the document names used when
/// rendering it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub categories_name: String,
    pub layout_name: String,
    pub mismatch: CategoryMismatch,
    pub conflicts: BinConflicts,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.mismatch.is_empty() && self.conflicts.is_empty()
    }

    /// A category mismatch takes precedence over bin conflicts for the
    /// error kind; the report carries both either way.
    pub fn into_result(self) -> Result<()> {
        if !self.mismatch.is_empty() {
            Err(LayoutError::CategoryMismatch { report: self })
        } else if !self.conflicts.is_empty() {
            Err(LayoutError::BinConflict { report: self })
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mismatch.is_empty() {
            writeln!(f, "[ERROR] Category mismatch between JSON files.")?;
            writeln!(f)?;
            if !self.mismatch.only_in_categories.is_empty() {
                writeln!(
                    f,
                    "Present in {} but missing in {}:",
                    self.categories_name, self.layout_name
                )?;
                for name in &self.mismatch.only_in_categories {
                    writeln!(f, "  - {}", name)?;
                }
                writeln!(f)?;
            }
            if !self.mismatch.only_in_layout.is_empty() {
                writeln!(
                    f,
                    "Present in {} but missing in {}:",
                    self.layout_name, self.categories_name
                )?;
                for name in &self.mismatch.only_in_layout {
                    writeln!(f, "  - {}", name)?;
                }
                writeln!(f)?;
            }
        }

        if !self.conflicts.is_empty() {
            writeln!(f, "[ERROR] Invalid bin assignments in {}.", self.layout_name)?;
            writeln!(f)?;
            if !self.conflicts.within_category.is_empty() {
                writeln!(f, "Duplicate bins listed within the same category:")?;
                for (category, bins) in &self.conflicts.within_category {
                    writeln!(f, "  - {}: {}", category, bins.join(", "))?;
                }
                writeln!(f)?;
            }
            if !self.conflicts.across_categories.is_empty() {
                writeln!(f, "Bins assigned to multiple categories:")?;
                for (bin, categories) in &self.conflicts.across_categories {
                    writeln!(f, "  - {}: {}", bin, categories.join(", "))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

pub fn check_category_parity(categories: &Mapping, layout: &Mapping) -> CategoryMismatch {
    let category_names: HashSet<&str> = categories.keys().collect();
    let layout_names: HashSet<&str> = layout.keys().collect();

    let mut only_in_categories: Vec<String> = category_names
        .difference(&layout_names)
        .map(|name| name.to_string())
        .collect();
    let mut only_in_layout: Vec<String> = layout_names
        .difference(&category_names)
        .map(|name| name.to_string())
        .collect();
    // tie-break on the raw name so HashSet iteration order never leaks out
    only_in_categories.sort();
    only_in_layout.sort();
    sort_casefold(&mut only_in_categories);
    sort_casefold(&mut only_in_layout);

    CategoryMismatch {
        only_in_categories,
        only_in_layout,
    }
}

pub fn check_bin_uniqueness(layout: &Mapping) -> BinConflicts {
    let mut within_category = Vec::new();
    for (category, bins) in layout.iter() {
        let mut seen = HashSet::new();
        let mut dupes: Vec<String> = Vec::new();
        for bin in bins {
            if !seen.insert(bin.as_str()) && !dupes.contains(bin) {
                dupes.push(bin.clone());
            }
        }
        if !dupes.is_empty() {
            sort_casefold(&mut dupes);
            within_category.push((category.to_string(), dupes));
        }
    }
    within_category.sort_by(|(a, _), (b, _)| casefold(a).cmp(&casefold(b)));

    // bin -> every category listing it, one entry per category
    let mut owners: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (category, bins) in layout.iter() {
        let unique: HashSet<&str> = bins.iter().map(String::as_str).collect();
        for bin in unique {
            owners.entry(bin).or_default().push(category.to_string());
        }
    }
    let mut across_categories: Vec<(String, Vec<String>)> = owners
        .into_iter()
        .filter(|(_, categories)| categories.len() > 1)
        .map(|(bin, mut categories)| {
            sort_casefold(&mut categories);
            (bin.to_string(), categories)
        })
        .collect();
    across_categories.sort_by(|(a, _), (b, _)| casefold(a).cmp(&casefold(b)));

    BinConflicts {
        within_category,
        across_categories,
    }
}

/// Runs both checks to completion and merges what they found.
pub fn validate_inputs(
    categories: &Mapping,
    layout: &Mapping,
    categories_name: &str,
    layout_name: &str,
) -> ValidationReport {
    let mismatch = check_category_parity(categories, layout);
    let conflicts = check_bin_uniqueness(layout);

    tracing::debug!(
        "Validation: {} categories-only, {} layout-only, {} repeated in a category, {} shared bins",
        mismatch.only_in_categories.len(),
        mismatch.only_in_layout.len(),
        conflicts.within_category.len(),
        conflicts.across_categories.len()
    );

    ValidationReport {
        categories_name: categories_name.to_string(),
        layout_name: layout_name.to_string(),
        mismatch,
        conflicts,
    }
}
