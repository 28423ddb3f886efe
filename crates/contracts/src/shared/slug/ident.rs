//! Normalization of operator-typed labels into machine identifiers and
//! URL-safe slugs. Both transforms are pure and idempotent: they run on every
//! keystroke while a field is in auto-identifier mode.

/// Fold a lowercase character with a diacritic to its ASCII base.
///
/// Covers the Latin accents that show up in operator content; anything else
/// non-ASCII is dropped by the callers.
fn fold_diacritic(c: char) -> Option<char> {
    let folded = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(folded)
}

/// Split a label into lowercase ASCII-alphanumeric words
fn words(label: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in label.to_lowercase().chars() {
        let c = fold_diacritic(c).unwrap_or(c);
        if c.is_ascii_alphanumeric() {
            current.push(c);
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Derive a camel-case api identifier from a human label.
///
/// "New Field" → "newField", "Título Principal" → "tituloPrincipal".
/// Returns an empty string when the label has no usable characters; the
/// schema validation flags that as an empty-label problem.
pub fn api_identifier_from_label(label: &str) -> String {
    let mut out = String::new();
    for (i, word) in words(label).into_iter().enumerate() {
        if i == 0 {
            out.push_str(&word);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
                out.extend(chars);
            }
        }
    }
    out
}

/// Turn a value into a URL path segment.
///
/// Lowercase, diacritics folded, anything non-alphanumeric collapsed into a
/// single dash: "Playa Blanca" → "playa-blanca".
pub fn slugify(value: &str) -> String {
    let mut out = String::new();
    let mut pending_dash = false;
    for c in value.to_lowercase().chars() {
        let c = fold_diacritic(c).unwrap_or(c);
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_from_plain_label() {
        assert_eq!(api_identifier_from_label("New Field"), "newField");
    }

    #[test]
    fn test_identifier_strips_diacritics() {
        assert_eq!(
            api_identifier_from_label("Título Principal"),
            "tituloPrincipal"
        );
    }

    #[test]
    fn test_identifier_handles_symbols_and_digits() {
        assert_eq!(api_identifier_from_label("Price (USD) #2"), "priceUsd2");
    }

    #[test]
    fn test_identifier_derivation_is_deterministic() {
        let label = "Días de viaje";
        assert_eq!(
            api_identifier_from_label(label),
            api_identifier_from_label(label)
        );
        assert_eq!(api_identifier_from_label(label), "diasDeViaje");
    }

    #[test]
    fn test_identifier_of_empty_label_is_empty() {
        assert_eq!(api_identifier_from_label("  ¡¡¡  "), "");
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Playa Blanca"), "playa-blanca");
        assert_eq!(slugify("Caribe"), "caribe");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  San -- Andrés  "), "san-andres");
    }

    #[test]
    fn test_slugify_drops_non_latin() {
        assert_eq!(slugify("tour №5"), "tour-5");
    }
}
