//! Name normalization for Biolink term names
//!
//! The Biolink Model writes term names in plain English ("small molecule",
//! "has phenotype"). Category graph nodes use the CamelCase form
//! ("SmallMolecule"); predicate graph nodes use the snake_case form
//! ("has_phenotype").

/// Convert a human-readable term name to the CamelCase form used for
/// category node identifiers.
///
/// Each space-separated word has its first character upper-cased and the
/// rest of the word is left untouched, so acronyms survive intact
/// ("RNA product" becomes "RNAProduct").
pub fn to_category_name(term: &str) -> String {
    term.split(' ')
        .filter(|word| !word.is_empty())
        .map(capitalize_first)
        .collect()
}

/// Convert a human-readable term name to the snake_case form used for
/// predicate node identifiers.
pub fn to_predicate_name(term: &str) -> String {
    term.replace(' ', "_")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
