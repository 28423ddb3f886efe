use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Вид поля в схеме типа контента
///
/// Serialized as the plain string tag (`"text"`, `"slug"`, …) so schema
/// documents stay readable. A tag from a newer or older registry version
/// hydrates into `Unknown` and round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Short single-line text
    Text,
    /// Long / rich text
    LongText,
    Number,
    Boolean,
    Date,
    /// Upload descriptor from the media collaborator
    Media,
    /// URL segment composed from a route template
    Slug,
    /// Single choice from configured options
    Select,
    /// Tag not present in this registry build; kept verbatim
    Unknown(String),
}

impl FieldKind {
    /// All kinds the registry knows, in palette order
    pub const KNOWN: [FieldKind; 8] = [
        FieldKind::Text,
        FieldKind::LongText,
        FieldKind::Number,
        FieldKind::Boolean,
        FieldKind::Date,
        FieldKind::Media,
        FieldKind::Slug,
        FieldKind::Select,
    ];

    pub fn tag(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::LongText => "long_text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Media => "media",
            Self::Slug => "slug",
            Self::Select => "select",
            Self::Unknown(tag) => tag,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "long_text" => Self::LongText,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "media" => Self::Media,
            "slug" => Self::Slug,
            "select" => Self::Select,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(FieldKind::from_tag(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_round_trip() {
        for kind in FieldKind::KNOWN {
            assert_eq!(FieldKind::from_tag(kind.tag()), kind);
        }
    }

    #[test]
    fn test_unknown_tag_survives_round_trip() {
        let json = "\"geo_point\"";
        let kind: FieldKind = serde_json::from_str(json).unwrap();
        assert_eq!(kind, FieldKind::Unknown("geo_point".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), json);
    }
}
