use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::metadata::FieldKind;
use crate::shared::slug::api_identifier_from_label;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label given to a freshly dropped palette field before the operator
/// renames it
pub const DEFAULT_FIELD_LABEL: &str = "New Field";

// ============================================================================
// ID Types
// ============================================================================

/// Уникальный идентификатор типа контента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentTypeId(pub Uuid);

impl ContentTypeId {
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

impl AggregateId for ContentTypeId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ContentTypeId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Идентификатор поля внутри схемы.
///
/// Assigned at creation, never reused, survives every reorder and edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId(pub Uuid);

impl FieldId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

// ============================================================================
// Field definition
// ============================================================================

/// Type-specific configuration bag for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FieldConfig {
    /// Route template for slug fields: "/[region]/[zone]/[slug]"
    #[serde(rename = "slugRoute", skip_serializing_if = "Option::is_none")]
    pub slug_route: Option<String>,
    /// Choices for single-select fields
    #[serde(rename = "selectOptions", skip_serializing_if = "Option::is_none")]
    pub select_options: Option<Vec<String>>,
    /// Placeholder text for text inputs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Одно поле схемы типа контента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: FieldId,
    pub label: String,
    #[serde(rename = "apiIdentifier")]
    pub api_identifier: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(rename = "isRequired", default)]
    pub is_required: bool,
    #[serde(rename = "isList", default)]
    pub is_list: bool,
    /// true while the identifier follows the label; cleared when the operator
    /// overrides the identifier by hand
    #[serde(rename = "autoIdentifier", default = "default_auto")]
    pub auto_identifier: bool,
    #[serde(default)]
    pub metadata: FieldConfig,
}

fn default_auto() -> bool {
    true
}

impl FieldDefinition {
    /// Новое поле с меткой по умолчанию (для вставки из палитры)
    pub fn new(kind: FieldKind) -> Self {
        Self::with_label(kind, DEFAULT_FIELD_LABEL)
    }

    pub fn with_label(kind: FieldKind, label: &str) -> Self {
        Self {
            id: FieldId::new_v4(),
            label: label.to_string(),
            api_identifier: api_identifier_from_label(label),
            kind,
            is_required: false,
            is_list: false,
            auto_identifier: true,
            metadata: FieldConfig::default(),
        }
    }
}

/// Частичное обновление одного поля (shallow merge)
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    pub label: Option<String>,
    /// `Some("")` clears the manual override and re-enables auto derivation
    pub api_identifier: Option<String>,
    pub kind: Option<FieldKind>,
    pub is_required: Option<bool>,
    pub is_list: Option<bool>,
    pub metadata: Option<FieldConfig>,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Тип контента: упорядоченная схема полей
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentType {
    #[serde(flatten)]
    pub base: BaseAggregate<ContentTypeId>,

    #[serde(rename = "apiIdentifier")]
    pub api_identifier: String,

    /// Ordering is significant: the array position is the field order
    pub fields: Vec<FieldDefinition>,
}

impl ContentType {
    /// Создать новый тип контента для вставки в БД
    pub fn new_for_insert(name: String, api_identifier: Option<String>) -> Self {
        let api_identifier =
            api_identifier.unwrap_or_else(|| api_identifier_from_label(&name));
        let code = format!("CT-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            base: BaseAggregate::new(ContentTypeId::new_v4(), code, name),
            api_identifier,
            fields: Vec::new(),
        }
    }

    /// Гидратация документа схемы из JSON (например, из БД или API).
    ///
    /// Fails fast on structurally corrupt input — the composer must not
    /// mount on a document whose fields are not a list or miss their `id`.
    pub fn hydrate(doc: serde_json::Value) -> anyhow::Result<Self> {
        let fields = doc
            .get("fields")
            .ok_or_else(|| anyhow::anyhow!("schema document has no 'fields'"))?;
        let fields = fields
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("'fields' is not a list"))?;
        for (i, field) in fields.iter().enumerate() {
            if field.get("id").and_then(|v| v.as_str()).is_none() {
                anyhow::bail!("field #{} has no id", i);
            }
        }
        serde_json::from_value(doc).map_err(|e| anyhow::anyhow!("corrupt schema document: {}", e))
    }

    // ------------------------------------------------------------------
    // Schema operations (the composer's only way to mutate the field list)
    // ------------------------------------------------------------------

    /// Вставить поле. Без индекса — в конец.
    ///
    /// Derives the api identifier from the label when the definition comes
    /// in without one.
    pub fn add_field(&mut self, mut def: FieldDefinition, at_index: Option<usize>) {
        if def.api_identifier.is_empty() {
            def.api_identifier = api_identifier_from_label(&def.label);
            def.auto_identifier = true;
        }
        match at_index {
            Some(i) if i < self.fields.len() => self.fields.insert(i, def),
            _ => self.fields.push(def),
        }
    }

    /// Удалить поле по идентификатору. Отсутствие поля — не ошибка:
    /// удаление может гоняться с перерисовкой.
    pub fn remove_field(&mut self, id: FieldId) {
        self.fields.retain(|f| f.id != id);
    }

    /// Переместить поле между позициями. `to` считается в координатах
    /// списка после изъятия элемента.
    pub fn move_field(&mut self, from: usize, to: usize) {
        if from == to || from >= self.fields.len() {
            return;
        }
        let def = self.fields.remove(from);
        let to = to.min(self.fields.len());
        self.fields.insert(to, def);
    }

    /// Частичное обновление поля.
    ///
    /// While the field is in auto-identifier mode a label change recomputes
    /// the identifier on the spot — this runs on every keystroke, so it is
    /// a pure string transform. An explicit identifier in the patch turns
    /// auto mode off; an explicit empty string turns it back on.
    pub fn update_field(&mut self, id: FieldId, patch: FieldPatch) {
        let Some(def) = self.fields.iter_mut().find(|f| f.id == id) else {
            return;
        };
        if let Some(label) = patch.label {
            def.label = label;
            if def.auto_identifier {
                def.api_identifier = api_identifier_from_label(&def.label);
            }
        }
        if let Some(api_identifier) = patch.api_identifier {
            if api_identifier.is_empty() {
                def.auto_identifier = true;
                def.api_identifier = api_identifier_from_label(&def.label);
            } else {
                def.auto_identifier = false;
                def.api_identifier = api_identifier;
            }
        }
        if let Some(kind) = patch.kind {
            def.kind = kind;
        }
        if let Some(is_required) = patch.is_required {
            def.is_required = is_required;
        }
        if let Some(is_list) = patch.is_list {
            def.is_list = is_list;
        }
        if let Some(metadata) = patch.metadata {
            def.metadata = metadata;
        }
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn field_index(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Api identifiers used by more than one field.
    ///
    /// The model never rejects duplicates — blocking inline would trap the
    /// operator mid-typing. The composer shows them as warnings and the save
    /// path refuses to persist them.
    pub fn duplicate_identifiers(&self) -> Vec<String> {
        let mut seen: Vec<&str> = Vec::new();
        let mut dupes: Vec<String> = Vec::new();
        for f in &self.fields {
            if f.api_identifier.is_empty() {
                continue;
            }
            if seen.contains(&f.api_identifier.as_str()) {
                if !dupes.contains(&f.api_identifier) {
                    dupes.push(f.api_identifier.clone());
                }
            } else {
                seen.push(&f.api_identifier);
            }
        }
        dupes
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &ContentTypeDto) {
        self.base.description = dto.name.clone();
        if let Some(api_identifier) = &dto.api_identifier {
            self.api_identifier = api_identifier.clone();
        }
        self.base.comment = dto.description.clone();
        self.fields = dto.fields.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Name must not be empty".into());
        }
        if self.api_identifier.trim().is_empty() {
            return Err("Api identifier must not be empty".into());
        }
        let dupes = self.duplicate_identifiers();
        if !dupes.is_empty() {
            return Err(format!(
                "Duplicate field identifiers: {}",
                dupes.join(", ")
            ));
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for ContentType {
    type Id = ContentTypeId;

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
        "c001"
    }

    fn collection_name() -> &'static str {
        "content_type"
    }

    fn element_name() -> &'static str {
        "Content type"
    }

    fn list_name() -> &'static str {
        "Content types"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления типа контента
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContentTypeDto {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "apiIdentifier")]
    pub api_identifier: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(label: &str) -> FieldDefinition {
        FieldDefinition::with_label(FieldKind::Text, label)
    }

    fn schema_with(labels: &[&str]) -> ContentType {
        let mut ct = ContentType::new_for_insert("Plan".into(), None);
        for label in labels {
            ct.add_field(text_field(label), None);
        }
        ct
    }

    fn order(ct: &ContentType) -> Vec<String> {
        ct.fields.iter().map(|f| f.label.clone()).collect()
    }

    #[test]
    fn test_add_field_appends_and_derives_identifier() {
        let mut ct = ContentType::new_for_insert("Plan".into(), None);
        ct.add_field(FieldDefinition::new(FieldKind::Text), None);
        assert_eq!(ct.fields.len(), 1);
        assert_eq!(ct.fields[0].api_identifier, "newField");
    }

    #[test]
    fn test_add_field_at_index_inserts() {
        let mut ct = schema_with(&["A", "C"]);
        ct.add_field(text_field("B"), Some(1));
        assert_eq!(order(&ct), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_add_field_with_out_of_range_index_appends() {
        let mut ct = schema_with(&["A"]);
        ct.add_field(text_field("B"), Some(99));
        assert_eq!(order(&ct), vec!["A", "B"]);
    }

    #[test]
    fn test_remove_absent_field_is_a_noop() {
        let mut ct = schema_with(&["A"]);
        ct.remove_field(FieldId::new_v4());
        assert_eq!(ct.fields.len(), 1);
    }

    #[test]
    fn test_move_field_to_same_index_is_a_noop() {
        let mut ct = schema_with(&["A", "B"]);
        let before = ct.fields.clone();
        ct.move_field(1, 1);
        assert_eq!(ct.fields, before);
    }

    // Oracle test: every op sequence must match a plain reference Vec
    #[test]
    fn test_field_order_matches_reference_model() {
        #[derive(Clone, Copy)]
        enum Op {
            Add(&'static str, Option<usize>),
            Move(usize, usize),
            Remove(&'static str),
        }
        let script = [
            Op::Add("title", None),
            Op::Add("intro", None),
            Op::Add("price", Some(1)),
            Op::Move(0, 2),
            Op::Add("photo", Some(0)),
            Op::Remove("intro"),
            Op::Move(2, 0),
            Op::Move(1, 1),
        ];

        let mut ct = ContentType::new_for_insert("Plan".into(), None);
        let mut oracle: Vec<&str> = Vec::new();
        for op in script {
            match op {
                Op::Add(label, at) => {
                    ct.add_field(text_field(label), at);
                    match at {
                        Some(i) if i < oracle.len() => oracle.insert(i, label),
                        _ => oracle.push(label),
                    }
                }
                Op::Move(from, to) => {
                    ct.move_field(from, to);
                    if from != to && from < oracle.len() {
                        let item = oracle.remove(from);
                        oracle.insert(to.min(oracle.len()), item);
                    }
                }
                Op::Remove(label) => {
                    let id = ct.fields.iter().find(|f| f.label == label).unwrap().id;
                    ct.remove_field(id);
                    oracle.retain(|l| *l != label);
                }
            }
            assert_eq!(order(&ct), oracle, "divergence after an operation");
        }
    }

    #[test]
    fn test_field_id_is_stable_across_update_and_move() {
        let mut ct = schema_with(&["A", "B"]);
        let id = ct.fields[0].id;
        ct.update_field(
            id,
            FieldPatch {
                label: Some("Renamed".into()),
                ..Default::default()
            },
        );
        ct.move_field(0, 1);
        assert_eq!(ct.fields[1].id, id);
    }

    #[test]
    fn test_auto_identifier_follows_label_edits() {
        let mut ct = schema_with(&["Titulo"]);
        let id = ct.fields[0].id;
        assert_eq!(ct.fields[0].api_identifier, "titulo");
        ct.update_field(
            id,
            FieldPatch {
                label: Some("Título Principal".into()),
                ..Default::default()
            },
        );
        assert_eq!(ct.fields[0].api_identifier, "tituloPrincipal");
    }

    #[test]
    fn test_manual_identifier_stops_following_the_label() {
        let mut ct = schema_with(&["Titulo"]);
        let id = ct.fields[0].id;
        ct.update_field(
            id,
            FieldPatch {
                api_identifier: Some("customKey".into()),
                ..Default::default()
            },
        );
        ct.update_field(
            id,
            FieldPatch {
                label: Some("Renamed".into()),
                ..Default::default()
            },
        );
        assert_eq!(ct.fields[0].api_identifier, "customKey");
    }

    #[test]
    fn test_clearing_the_identifier_reenables_auto_mode() {
        let mut ct = schema_with(&["Titulo"]);
        let id = ct.fields[0].id;
        ct.update_field(
            id,
            FieldPatch {
                api_identifier: Some("customKey".into()),
                ..Default::default()
            },
        );
        ct.update_field(
            id,
            FieldPatch {
                api_identifier: Some(String::new()),
                ..Default::default()
            },
        );
        assert_eq!(ct.fields[0].api_identifier, "titulo");
        assert!(ct.fields[0].auto_identifier);
    }

    #[test]
    fn test_label_edit_does_not_touch_other_fields() {
        let mut ct = schema_with(&["Uno", "Dos"]);
        let second = ct.fields[1].clone();
        let id = ct.fields[0].id;
        ct.update_field(
            id,
            FieldPatch {
                label: Some("Otro".into()),
                ..Default::default()
            },
        );
        assert_eq!(ct.fields[1], second);
    }

    #[test]
    fn test_duplicate_identifiers_are_reported_not_rejected() {
        let mut ct = schema_with(&["Precio", "Precio"]);
        assert_eq!(ct.fields.len(), 2);
        assert_eq!(ct.duplicate_identifiers(), vec!["precio".to_string()]);
        assert!(ct.validate().is_err());
        let id = ct.fields[1].id;
        ct.update_field(
            id,
            FieldPatch {
                label: Some("Precio Final".into()),
                ..Default::default()
            },
        );
        assert!(ct.duplicate_identifiers().is_empty());
    }

    #[test]
    fn test_schema_document_round_trip() {
        let mut ct = schema_with(&["Titulo", "Precio"]);
        ct.fields[1].metadata.slug_route = Some("/[region]/[slug]".into());
        let doc = serde_json::to_value(&ct).unwrap();
        let back = ContentType::hydrate(doc).unwrap();
        assert_eq!(back.fields, ct.fields);
        assert_eq!(back.api_identifier, ct.api_identifier);
    }

    #[test]
    fn test_hydrate_rejects_fields_that_are_not_a_list() {
        let mut doc = serde_json::to_value(schema_with(&[])).unwrap();
        doc["fields"] = serde_json::json!({"not": "a list"});
        assert!(ContentType::hydrate(doc).is_err());
    }

    #[test]
    fn test_hydrate_rejects_fields_without_id() {
        let mut doc = serde_json::to_value(schema_with(&["A"])).unwrap();
        doc["fields"][0].as_object_mut().unwrap().remove("id");
        assert!(ContentType::hydrate(doc).is_err());
    }
}
