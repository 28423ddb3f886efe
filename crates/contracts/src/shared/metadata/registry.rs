use super::FieldKind;

/// Display metadata for one field kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKindInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub category: FieldCategory,
    pub renders_as: RendersAs,
    /// Icon name resolved by the frontend icon set
    pub icon: &'static str,
}

/// Palette grouping for a field kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Text,
    Data,
    Media,
    Special,
}

impl FieldCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Data => "Data",
            Self::Media => "Media",
            Self::Special => "Special",
        }
    }
}

/// The control the dynamic renderer produces for a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendersAs {
    TextInput,
    TextArea,
    NumberInput,
    Checkbox,
    DatePicker,
    UploadButton,
    SlugComposer,
    Dropdown,
}

/// Тег не входит в закрытый набор видов полей
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldKind(pub String);

impl std::fmt::Display for UnknownFieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown field kind tag: {}", self.0)
    }
}

impl std::error::Error for UnknownFieldKind {}

/// Describe a field kind for the palette and the renderer.
///
/// Errors for `Unknown` tags; callers render an "unsupported field type"
/// placeholder instead of failing the whole form.
pub fn describe(kind: &FieldKind) -> Result<FieldKindInfo, UnknownFieldKind> {
    let info = match kind {
        FieldKind::Text => FieldKindInfo {
            label: "Short text",
            description: "Single line of plain text",
            category: FieldCategory::Text,
            renders_as: RendersAs::TextInput,
            icon: "field-text",
        },
        FieldKind::LongText => FieldKindInfo {
            label: "Long text",
            description: "Multi-line rich text",
            category: FieldCategory::Text,
            renders_as: RendersAs::TextArea,
            icon: "field-long-text",
        },
        FieldKind::Number => FieldKindInfo {
            label: "Number",
            description: "Integer or decimal value",
            category: FieldCategory::Data,
            renders_as: RendersAs::NumberInput,
            icon: "field-number",
        },
        FieldKind::Boolean => FieldKindInfo {
            label: "Boolean",
            description: "Yes / no flag",
            category: FieldCategory::Data,
            renders_as: RendersAs::Checkbox,
            icon: "field-boolean",
        },
        FieldKind::Date => FieldKindInfo {
            label: "Date",
            description: "Calendar date, stored as ISO-8601",
            category: FieldCategory::Data,
            renders_as: RendersAs::DatePicker,
            icon: "field-date",
        },
        FieldKind::Media => FieldKindInfo {
            label: "Media",
            description: "Uploaded file descriptor",
            category: FieldCategory::Media,
            renders_as: RendersAs::UploadButton,
            icon: "field-media",
        },
        FieldKind::Slug => FieldKindInfo {
            label: "Slug",
            description: "URL segment composed from a route template",
            category: FieldCategory::Special,
            renders_as: RendersAs::SlugComposer,
            icon: "field-slug",
        },
        FieldKind::Select => FieldKindInfo {
            label: "Single select",
            description: "One choice from a configured list",
            category: FieldCategory::Data,
            renders_as: RendersAs::Dropdown,
            icon: "field-select",
        },
        FieldKind::Unknown(tag) => return Err(UnknownFieldKind(tag.clone())),
    };
    Ok(info)
}

/// Kinds offered by the composer palette, in display order
pub fn palette() -> &'static [FieldKind] {
    &FieldKind::KNOWN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_is_total_over_known_kinds() {
        for kind in palette() {
            assert!(describe(kind).is_ok(), "no info for {:?}", kind);
        }
    }

    #[test]
    fn test_describe_rejects_unknown_tag() {
        let err = describe(&FieldKind::Unknown("geo_point".into())).unwrap_err();
        assert_eq!(err.0, "geo_point");
    }
}
