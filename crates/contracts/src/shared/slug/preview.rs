//! Placeholder partitioning and preview building for slug fields.
//!
//! The data flow is one-directional: the caller hands in a snapshot of the
//! current values and gets a preview string back. Nothing here writes into
//! the value bag.

use super::ident::slugify;
use super::template::{Placeholder, RouteTemplate};

/// How a template placeholder gets its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// Resolved through the hierarchical wizard; index into the configured
    /// step list
    WizardStep(usize),
    /// Read from a sibling field with a matching api identifier
    SiblingField,
    /// The slug field's own editable value
    OwnSlug,
    /// Matches neither the wizard, a sibling, nor the field itself;
    /// stays bracketed in the preview and is flagged as a schema warning
    Unbound,
}

/// One template placeholder with its resolved source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugParam {
    pub placeholder: Placeholder,
    pub source: ParamSource,
}

impl SlugParam {
    pub fn name(&self) -> &str {
        self.placeholder.name()
    }
}

/// Partition template placeholders into wizard / sibling / own parameters.
///
/// `wizard_steps` is the ordered list of step parameter names; passing an
/// empty slice turns the wizard off and every step name falls back to
/// ordinary sibling-field resolution.
pub fn plan_params(
    template: &RouteTemplate,
    own_identifier: &str,
    wizard_steps: &[&str],
    sibling_identifiers: &[&str],
) -> Vec<SlugParam> {
    template
        .placeholders()
        .iter()
        .map(|placeholder| {
            let name = placeholder.name();
            let source = if name == own_identifier || name == "slug" {
                ParamSource::OwnSlug
            } else if let Some(step) = wizard_steps.iter().position(|s| *s == name) {
                ParamSource::WizardStep(step)
            } else if sibling_identifiers.contains(&name) {
                ParamSource::SiblingField
            } else {
                ParamSource::Unbound
            };
            SlugParam {
                placeholder: placeholder.clone(),
                source,
            }
        })
        .collect()
}

/// Names that resolve to nothing; surfaced inline next to the field
pub fn unbound_names(params: &[SlugParam]) -> Vec<String> {
    params
        .iter()
        .filter(|p| p.source == ParamSource::Unbound)
        .map(|p| p.name().to_string())
        .collect()
}

fn substitute_value(placeholder: &Placeholder, raw_value: &str) -> String {
    if placeholder.is_catch_all() {
        // Catch-all values are paths; slugify per segment, keep the slashes
        raw_value
            .split('/')
            .map(slugify)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    } else {
        slugify(raw_value)
    }
}

/// Build the live preview URL.
///
/// Resolved placeholders are substituted with their slugified values,
/// unresolved ones stay visibly bracketed. When the template never
/// references the field itself, the own value is appended as the terminal
/// path segment so every entry keeps a unique tail.
pub fn build_preview<F>(
    template: &RouteTemplate,
    params: &[SlugParam],
    own_identifier: &str,
    own_value: &str,
    resolve: F,
) -> String
where
    F: Fn(&SlugParam) -> Option<String>,
{
    let mut preview = template.raw().to_string();

    for param in params {
        let raw_value = match param.source {
            ParamSource::OwnSlug => Some(own_value.to_string()),
            ParamSource::Unbound => None,
            _ => resolve(param),
        };
        let Some(raw_value) = raw_value else { continue };
        let substituted = substitute_value(&param.placeholder, &raw_value);
        if substituted.is_empty() {
            continue;
        }
        preview = preview.replace(&param.placeholder.literal(), &substituted);
    }

    let owns_a_segment = params.iter().any(|p| p.source == ParamSource::OwnSlug);
    if !owns_a_segment {
        let own_slug = slugify(own_value);
        while preview.ends_with('/') {
            preview.pop();
        }
        preview.push('/');
        if own_slug.is_empty() {
            preview.push('[');
            preview.push_str(own_identifier);
            preview.push(']');
        } else {
            preview.push_str(&own_slug);
        }
    }

    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIZARD: [&str; 3] = ["region", "subregion", "zone"];

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&SlugParam) -> Option<String> + 'a {
        move |param: &SlugParam| {
            pairs
                .iter()
                .find(|(name, _)| *name == param.name())
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_partition_wizard_sibling_and_own() {
        let t = RouteTemplate::parse("/[region]/[title]/[slug]").unwrap();
        let params = plan_params(&t, "slug", &WIZARD, &["title"]);
        assert_eq!(params[0].source, ParamSource::WizardStep(0));
        assert_eq!(params[1].source, ParamSource::SiblingField);
        assert_eq!(params[2].source, ParamSource::OwnSlug);
    }

    #[test]
    fn test_no_wizard_falls_back_to_siblings() {
        let t = RouteTemplate::parse("/[region]/[slug]").unwrap();
        let params = plan_params(&t, "slug", &[], &["region"]);
        assert_eq!(params[0].source, ParamSource::SiblingField);
    }

    #[test]
    fn test_unbound_names_are_reported() {
        let t = RouteTemplate::parse("/[region]/[mystery]/[slug]").unwrap();
        let params = plan_params(&t, "slug", &WIZARD, &[]);
        assert_eq!(unbound_names(&params), vec!["mystery".to_string()]);
    }

    #[test]
    fn test_preview_with_all_values_resolved() {
        let t = RouteTemplate::parse("/[region]/[zone]/[slug]").unwrap();
        let params = plan_params(&t, "slug", &WIZARD, &[]);
        let resolve = lookup(&[("region", "Caribe"), ("zone", "Cartagena")]);
        let preview = build_preview(&t, &params, "slug", "playa-blanca", resolve);
        assert_eq!(preview, "/caribe/cartagena/playa-blanca");
    }

    #[test]
    fn test_preview_keeps_missing_params_bracketed() {
        let t = RouteTemplate::parse("/[region]/[zone]/[slug]").unwrap();
        let params = plan_params(&t, "slug", &WIZARD, &[]);
        let resolve = lookup(&[("region", "Caribe")]);
        let preview = build_preview(&t, &params, "slug", "playa-blanca", resolve);
        assert_eq!(preview, "/caribe/[zone]/playa-blanca");
    }

    #[test]
    fn test_own_value_is_appended_when_not_referenced() {
        let t = RouteTemplate::parse("/planes/[region]").unwrap();
        let params = plan_params(&t, "slug", &WIZARD, &[]);
        let resolve = lookup(&[("region", "Caribe")]);
        let preview = build_preview(&t, &params, "slug", "Playa Blanca", resolve);
        assert_eq!(preview, "/planes/caribe/playa-blanca");
    }

    #[test]
    fn test_empty_own_value_shows_bracketed_tail() {
        let t = RouteTemplate::parse("/planes").unwrap();
        let params = plan_params(&t, "slug", &WIZARD, &[]);
        let preview = build_preview(&t, &params, "slug", "", |_| None);
        assert_eq!(preview, "/planes/[slug]");
    }

    #[test]
    fn test_zero_placeholder_template_degenerates_to_literal() {
        let t = RouteTemplate::parse("/promos/verano").unwrap();
        let params = plan_params(&t, "slug", &WIZARD, &[]);
        let preview = build_preview(&t, &params, "slug", "oferta", |_| None);
        assert_eq!(preview, "/promos/verano/oferta");
    }

    #[test]
    fn test_catch_all_keeps_path_separators() {
        let t = RouteTemplate::parse("/docs/[...path]").unwrap();
        let params = plan_params(&t, "slug", &[], &["path"]);
        let resolve = lookup(&[("path", "Guías/De Viaje")]);
        let preview = build_preview(&t, &params, "slug", "intro", resolve);
        assert_eq!(preview, "/docs/guias/de-viaje/intro");
    }
}
