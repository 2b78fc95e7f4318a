//! Column name folding.
//!
//! Header labels typed by people drift in case and accents ("Coluná A",
//! "COLUNA a"). Names are compared on a folded form: canonical decomposition,
//! combining marks removed, lower-cased.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Folds a column name for case- and diacritic-insensitive comparison.
///
/// # Examples
///
/// ```
/// use tabula_model::fold_name;
///
/// assert_eq!(fold_name("Coluná A"), "coluna a");
/// assert_eq!(fold_name("NÃO"), "nao");
/// ```
pub fn fold_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns true when both names are equal after folding.
pub fn names_match(left: &str, right: &str) -> bool {
    fold_name(left) == fold_name(right)
}
