//! Implementation of `schemeport list`.

use serde::Serialize;

use crate::sources::{Candidate, SourceSet};

/// Manifest candidates for one scheme, in lookup order.
#[derive(Debug, Clone, Serialize)]
pub struct SchemeListing {
    pub scheme: String,
    pub candidates: Vec<Candidate>,
}

/// List manifest candidates for `scheme`, or for every scheme with a
/// manifest in any source. Sources that cannot be read are skipped.
pub fn list(sources: &SourceSet, scheme: Option<&str>) -> Vec<SchemeListing> {
    let schemes = match scheme {
        Some(scheme) => vec![scheme.to_ascii_lowercase()],
        None => sources.schemes(),
    };

    schemes
        .into_iter()
        .map(|scheme| SchemeListing {
            candidates: sources.candidates(&scheme),
            scheme,
        })
        .collect()
}

/// Render listings as plain text.
pub fn format_listings(listings: &[SchemeListing]) -> String {
    let mut output = String::new();
    for listing in listings {
        output.push_str(&format!("{}\n", listing.scheme));
        if listing.candidates.is_empty() {
            output.push_str("  (no manifest entries)\n");
        }
        for (i, candidate) in listing.candidates.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} ({})\n",
                i + 1,
                candidate.entry,
                candidate.source
            ));
        }
    }
    output
}
