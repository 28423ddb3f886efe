//! Route template syntax: `[identifier]` for a single named segment,
//! `[...identifier]` for a trailing catch-all. Identifiers match
//! `[A-Za-z][A-Za-z0-9]*`.

/// One parsed placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Named(String),
    CatchAll(String),
}

impl Placeholder {
    pub fn name(&self) -> &str {
        match self {
            Self::Named(n) | Self::CatchAll(n) => n,
        }
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Self::CatchAll(_))
    }

    /// The literal text this placeholder occupies in the template
    pub fn literal(&self) -> String {
        match self {
            Self::Named(n) => format!("[{}]", n),
            Self::CatchAll(n) => format!("[...{}]", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// `[` without a matching `]`
    UnclosedBracket,
    /// Placeholder content is not a valid identifier
    InvalidIdentifier(String),
    /// More than one `[...name]` in the template
    MultipleCatchAll,
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnclosedBracket => write!(f, "route template has an unclosed '['"),
            Self::InvalidIdentifier(s) => {
                write!(f, "'{}' is not a valid placeholder identifier", s)
            }
            Self::MultipleCatchAll => {
                write!(f, "route template may contain at most one [...param]")
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// A parsed route template
///
/// Keeps the raw text (the preview substitutes into it) plus the ordered,
/// de-duplicated placeholder list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    raw: String,
    placeholders: Vec<Placeholder>,
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric())
}

impl RouteTemplate {
    /// Parse a template string. A template with zero placeholders is legal.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let mut placeholders: Vec<Placeholder> = Vec::new();
        let mut catch_all_seen = false;
        let mut rest = raw;

        while let Some(open) = rest.find('[') {
            let after = &rest[open + 1..];
            let close = after.find(']').ok_or(TemplateError::UnclosedBracket)?;
            let inner = &after[..close];

            let placeholder = if let Some(name) = inner.strip_prefix("...") {
                if !is_identifier(name) {
                    return Err(TemplateError::InvalidIdentifier(inner.to_string()));
                }
                if catch_all_seen {
                    return Err(TemplateError::MultipleCatchAll);
                }
                catch_all_seen = true;
                Placeholder::CatchAll(name.to_string())
            } else {
                if !is_identifier(inner) {
                    return Err(TemplateError::InvalidIdentifier(inner.to_string()));
                }
                Placeholder::Named(inner.to_string())
            };

            if !placeholders.iter().any(|p| p.name() == placeholder.name()) {
                placeholders.push(placeholder);
            }
            rest = &after[close + 1..];
        }

        Ok(Self {
            raw: raw.to_string(),
            placeholders,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Ordered set of placeholders (first occurrence wins)
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn references(&self, name: &str) -> bool {
        self.placeholders.iter().any(|p| p.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_placeholders_in_order() {
        let t = RouteTemplate::parse("/[region]/[zone]/[slug]").unwrap();
        let names: Vec<&str> = t.placeholders().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["region", "zone", "slug"]);
    }

    #[test]
    fn test_parse_catch_all() {
        let t = RouteTemplate::parse("/blog/[...path]").unwrap();
        assert_eq!(
            t.placeholders(),
            &[Placeholder::CatchAll("path".to_string())]
        );
    }

    #[test]
    fn test_parse_deduplicates_repeated_names() {
        let t = RouteTemplate::parse("/[a]/x/[a]").unwrap();
        assert_eq!(t.placeholders().len(), 1);
    }

    #[test]
    fn test_zero_placeholders_is_legal() {
        let t = RouteTemplate::parse("/planes/caribe").unwrap();
        assert!(t.placeholders().is_empty());
    }

    #[test]
    fn test_unclosed_bracket_is_an_error() {
        assert_eq!(
            RouteTemplate::parse("/[region"),
            Err(TemplateError::UnclosedBracket)
        );
    }

    #[test]
    fn test_identifier_must_start_with_a_letter() {
        assert!(matches!(
            RouteTemplate::parse("/[1up]"),
            Err(TemplateError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            RouteTemplate::parse("/[]"),
            Err(TemplateError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_second_catch_all_is_an_error() {
        assert_eq!(
            RouteTemplate::parse("/[...a]/[...b]"),
            Err(TemplateError::MultipleCatchAll)
        );
    }
}
