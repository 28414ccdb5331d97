//! Entry and alias aggregation
//!
//! Both sections are unions keyed by name where a name may be contributed by
//! exactly one bundle. A second contribution is a conflict even when it
//! carries the same value.

use std::collections::BTreeMap;

use super::ConflictRecord;
use crate::bundle::Bundle;
use crate::error::{self, Result};

#[derive(Debug, Clone, Copy)]
enum Section {
    Entries,
    Aliases,
}

impl Section {
    fn of(self, bundle: &Bundle) -> &BTreeMap<String, String> {
        match self {
            Section::Entries => &bundle.entry,
            Section::Aliases => &bundle.aliases,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Section::Entries => "entry",
            Section::Aliases => "alias",
        }
    }
}

/// Union the entry maps of all bundles, in bundle order
pub fn merge_entries(bundles: &[Bundle]) -> Result<BTreeMap<String, String>> {
    aggregate(bundles, Section::Entries).map_err(error::merge::duplicate_entry)
}

/// Union the alias maps of all bundles, in bundle order
pub fn merge_aliases(bundles: &[Bundle]) -> Result<BTreeMap<String, String>> {
    aggregate(bundles, Section::Aliases).map_err(error::merge::duplicate_alias)
}

fn aggregate(
    bundles: &[Bundle],
    section: Section,
) -> std::result::Result<BTreeMap<String, String>, ConflictRecord> {
    let owned = bundles.iter().try_fold(
        BTreeMap::<&str, (&str, &str)>::new(),
        |mut owned, bundle| {
            for (key, value) in section.of(bundle) {
                if let Some((first_value, first_owner)) = owned.get(key.as_str()) {
                    return Err(ConflictRecord {
                        key: key.clone(),
                        first_owner: first_owner.to_string(),
                        first_value: first_value.to_string(),
                        second_owner: bundle.path.clone(),
                        second_value: value.clone(),
                    });
                }
                tracing::debug!(
                    bundle = %bundle.path,
                    key = %key,
                    value = %value,
                    "adding {}",
                    section.name()
                );
                owned.insert(key.as_str(), (value.as_str(), bundle.path.as_str()));
            }
            Ok(owned)
        },
    )?;

    Ok(owned
        .into_iter()
        .map(|(key, (value, _))| (key.to_string(), value.to_string()))
        .collect())
}
