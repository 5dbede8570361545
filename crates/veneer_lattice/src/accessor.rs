//! Accessor naming for cast targets.
//!
//! Every cast target can be addressed by a snake-case accessor derived from
//! its simple type name (`LoadedBearingResults` -> `loaded_bearing_results`).
//! When an accessor does not resolve, the error reports the class name rebuilt
//! from the accessor by capitalizing each `_`-separated word.

/// Converts a `PascalCase` type name into its snake-case accessor.
///
/// Acronym runs are kept together, so `FEAnalysis` becomes `fe_analysis` and
/// `ModalAnalysisAtASpeed` becomes `modal_analysis_at_a_speed`.
///
/// # Example
///
/// ```
/// use veneer_lattice::accessor_name;
///
/// assert_eq!(accessor_name("LoadedBearingResults"), "loaded_bearing_results");
/// assert_eq!(accessor_name("FEAnalysis"), "fe_analysis");
/// ```
#[must_use]
pub fn accessor_name(type_name: &str) -> String {
    let chars: Vec<char> = type_name.chars().collect();
    let mut out = String::with_capacity(type_name.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                let boundary = prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower);
                if boundary && !out.ends_with('_') {
                    out.push('_');
                }
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Rebuilds a class name from a snake-case accessor.
///
/// Each word is capitalized and the rest lowercased, so the result is not
/// always the original type name (`fe_analysis` becomes `FeAnalysis`).
#[must_use]
pub fn class_name_from_accessor(accessor: &str) -> String {
    accessor
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
