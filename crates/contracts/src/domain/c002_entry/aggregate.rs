use crate::domain::c001_content_type::aggregate::FieldDefinition;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор записи контента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for EntryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(EntryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Value bag
// ============================================================================

/// Значения одной записи, ключ — api identifier поля.
///
/// The renderer mutates this field by field; the composer never touches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ValueBag(pub serde_json::Map<String, Value>);

impl ValueBag {
    pub fn new() -> Self {
        Self(serde_json::Map::new())
    }

    pub fn get(&self, api_identifier: &str) -> Option<&Value> {
        self.0.get(api_identifier)
    }

    /// Current value as display text, for previews and text inputs
    pub fn get_str(&self, api_identifier: &str) -> Option<String> {
        match self.0.get(api_identifier)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, api_identifier: impl Into<String>, value: Value) {
        self.0.insert(api_identifier.into(), value);
    }

    pub fn remove(&mut self, api_identifier: &str) {
        self.0.remove(api_identifier);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Обязательные поля без значения (для inline-валидации формы)
    pub fn missing_required(&self, fields: &[FieldDefinition]) -> Vec<String> {
        fields
            .iter()
            .filter(|f| f.is_required)
            .filter(|f| match self.get(&f.api_identifier) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(Value::Array(items)) => items.is_empty(),
                Some(_) => false,
            })
            .map(|f| f.api_identifier.clone())
            .collect()
    }
}

// ============================================================================
// Media descriptor
// ============================================================================

/// Результат загрузки файла — значение MEDIA-поля.
///
/// The renderer never owns upload transport; it stores this descriptor and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadDescriptor {
    pub url: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Статус записи
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Draft,
    Published,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    pub fn from_tag(s: &str) -> Self {
        match s {
            "published" => Self::Published,
            _ => Self::Draft,
        }
    }
}

/// Запись контента: значения одной сущности по схеме типа контента
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    #[serde(flatten)]
    pub base: BaseAggregate<EntryId>,

    /// Тип контента, по схеме которого заполнена запись
    #[serde(rename = "contentTypeRef")]
    pub content_type_ref: String,

    pub data: ValueBag,
    pub status: EntryStatus,
}

impl Entry {
    /// Создать новую запись для вставки в БД
    pub fn new_for_insert(content_type_ref: String, title: String) -> Self {
        let code = format!("ENT-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            base: BaseAggregate::new(EntryId::new_v4(), code, title),
            content_type_ref,
            data: ValueBag::new(),
            status: EntryStatus::Draft,
        }
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &EntryDto) {
        self.base.description = dto.title.clone();
        self.content_type_ref = dto.content_type_ref.clone();
        self.data = dto.data.clone();
        self.status = dto.status;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.content_type_ref.trim().is_empty() {
            return Err("Entry must reference a content type".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Entry {
    type Id = EntryId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "c002"
    }

    fn collection_name() -> &'static str {
        "entry"
    }

    fn element_name() -> &'static str {
        "Entry"
    }

    fn list_name() -> &'static str {
        "Entries"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления записи
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EntryDto {
    pub id: Option<String>,
    pub title: String,
    #[serde(rename = "contentTypeRef")]
    pub content_type_ref: String,
    #[serde(default)]
    pub data: ValueBag,
    #[serde(default)]
    pub status: EntryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::metadata::FieldKind;
    use serde_json::json;

    #[test]
    fn test_value_bag_round_trips_as_a_plain_object() {
        let mut bag = ValueBag::new();
        bag.set("titulo", json!("Playa Blanca"));
        bag.set("dias", json!(4));
        let value = serde_json::to_value(&bag).unwrap();
        assert_eq!(value, json!({"titulo": "Playa Blanca", "dias": 4}));
        let back: ValueBag = serde_json::from_value(value).unwrap();
        assert_eq!(back, bag);
    }

    #[test]
    fn test_missing_required_flags_empty_values_only() {
        let mut title = FieldDefinition::with_label(FieldKind::Text, "Titulo");
        title.is_required = true;
        let mut days = FieldDefinition::with_label(FieldKind::Number, "Dias");
        days.is_required = true;
        let optional = FieldDefinition::with_label(FieldKind::Text, "Nota");
        let fields = vec![title, days, optional];

        let mut bag = ValueBag::new();
        bag.set("titulo", json!("  "));
        bag.set("dias", json!(3));
        assert_eq!(bag.missing_required(&fields), vec!["titulo".to_string()]);
    }

    #[test]
    fn test_upload_descriptor_wire_names() {
        let descriptor = UploadDescriptor {
            url: "/media/playa.jpg".into(),
            file_name: "playa.jpg".into(),
            size: 1024,
            content_type: "image/jpeg".into(),
        };
        let v = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(v["fileName"], "playa.jpg");
        assert_eq!(v["type"], "image/jpeg");
    }
}
