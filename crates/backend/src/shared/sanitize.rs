//! Rich-text sanitization at the persistence boundary.
//!
//! Long-text values arrive as operator-authored HTML; everything outside the
//! allowed tag set is stripped before the value bag is stored.

use ammonia::Builder;
use std::collections::HashSet;

/// Clean one rich-text value
pub fn clean_rich_text(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "br", "strong", "em", "u", "s", "a", "ul", "ol", "li", "h2", "h3", "h4",
        "blockquote", "code", "pre",
    ]
    .into_iter()
    .collect();

    Builder::default()
        .tags(tags)
        .link_rel(Some("noopener noreferrer"))
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_tags_are_stripped() {
        let dirty = "<p>hola</p><script>alert(1)</script>";
        assert_eq!(clean_rich_text(dirty), "<p>hola</p>");
    }

    #[test]
    fn test_allowed_markup_survives() {
        let html = "<p><strong>Playa</strong> Blanca</p>";
        assert_eq!(clean_rich_text(html), html);
    }

    #[test]
    fn test_event_handlers_are_dropped() {
        let dirty = "<p onclick=\"x()\">hola</p>";
        assert_eq!(clean_rich_text(dirty), "<p>hola</p>");
    }
}
