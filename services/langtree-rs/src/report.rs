//! Plain-text "universal numbers" report.

use crate::types::{Digit, LanguageSet, UniversalNumber};

/// Every language's ten surface forms, then the most central form per digit.
///
/// ```text
///
/// Dutch
///   nul
///   ...
///
/// Universal
///   uno (Italian)
/// ```
pub fn render_report(languages: &LanguageSet, universal: &[UniversalNumber]) -> String {
    let mut out = String::new();
    for entry in languages.entries() {
        out.push_str(&format!("\n{}\n", entry.name()));
        for digit in Digit::all() {
            out.push_str(&format!("  {}\n", entry.surface(digit)));
        }
    }
    out.push_str("\nUniversal\n");
    for number in universal {
        out.push_str(&format!("  {} ({})\n", number.surface, number.language));
    }
    out
}
