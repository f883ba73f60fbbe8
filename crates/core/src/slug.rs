//! URL slug generation for projects.
//!
//! A slug is derived from the project name exactly once, at creation
//! time, and is immutable afterwards -- renaming a project never touches
//! its slug. Uniqueness is resolved by probing numbered candidates
//! (`base`, `base-1`, `base-2`, ...) against the store; the first free
//! suffix wins.

/// Fold common Latin-1 diacritics to their ASCII base letter.
///
/// Covers the accented characters that actually show up in project
/// names (Spanish and Portuguese). Anything else passes through and is
/// handled by the hyphen mapping below.
fn fold_ascii(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Normalize a project name into a URL-safe slug.
///
/// Lowercases, folds diacritics, maps every remaining non-alphanumeric
/// character to a hyphen, collapses hyphen runs, and trims leading and
/// trailing hyphens.
pub fn generate_slug(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(fold_ascii)
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c
            } else {
                '-'
            }
        })
        .collect();

    // Collapse consecutive hyphens.
    let mut result = String::with_capacity(slug.len());
    let mut prev_hyphen = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_hyphen {
                result.push('-');
            }
            prev_hyphen = true;
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    result.trim_matches('-').to_string()
}

/// Produce the `n`-th uniqueness candidate for a base slug.
///
/// Candidate 0 is the base itself; candidate `n > 0` appends `-n`.
pub fn slug_candidate(base: &str, n: u32) -> String {
    if n == 0 {
        base.to_string()
    } else {
        format!("{base}-{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_slug() {
        assert_eq!(generate_slug("Torre Norte"), "torre-norte");
    }

    #[test]
    fn punctuation_collapses_to_single_hyphen() {
        assert_eq!(
            generate_slug("Edificio Central (Fase 2)"),
            "edificio-central-fase-2"
        );
    }

    #[test]
    fn leading_and_trailing_hyphens_trimmed() {
        assert_eq!(generate_slug("--Plaza Mayor--"), "plaza-mayor");
    }

    #[test]
    fn diacritics_fold_to_ascii() {
        assert_eq!(generate_slug("Almacén Río"), "almacen-rio");
        assert_eq!(generate_slug("Ampliación Cañería"), "ampliacion-caneria");
    }

    #[test]
    fn candidates_number_from_one() {
        assert_eq!(slug_candidate("torre-norte", 0), "torre-norte");
        assert_eq!(slug_candidate("torre-norte", 1), "torre-norte-1");
        assert_eq!(slug_candidate("torre-norte", 7), "torre-norte-7");
    }
}
