use super::repository;
use crate::domain::c001_content_type;
use crate::shared::sanitize::clean_rich_text;
use contracts::domain::c002_entry::aggregate::{Entry, EntryDto, ValueBag};
use contracts::domain::c001_content_type::aggregate::FieldDefinition;
use contracts::shared::metadata::FieldKind;
use serde_json::Value;
use uuid::Uuid;

/// Прогнать длинные тексты через санитайзер перед записью.
///
/// Only long-text values are touched; the rest of the bag passes through
/// untouched so a remote failure never corrupts what the operator typed.
fn sanitize_values(data: &mut ValueBag, fields: &[FieldDefinition]) {
    for field in fields {
        if field.kind != FieldKind::LongText {
            continue;
        }
        let Some(current) = data.get(&field.api_identifier).cloned() else {
            continue;
        };
        match current {
            Value::String(s) => {
                data.set(field.api_identifier.clone(), Value::String(clean_rich_text(&s)));
            }
            // Список длинных текстов: чистим каждый элемент
            Value::Array(items) => {
                let cleaned = items
                    .into_iter()
                    .map(|v| match v {
                        Value::String(s) => Value::String(clean_rich_text(&s)),
                        other => other,
                    })
                    .collect();
                data.set(field.api_identifier.clone(), Value::Array(cleaned));
            }
            _ => {}
        }
    }
}

async fn schema_fields(content_type_ref: &str) -> anyhow::Result<Vec<FieldDefinition>> {
    let Ok(uuid) = Uuid::parse_str(content_type_ref) else {
        return Ok(Vec::new());
    };
    Ok(c001_content_type::service::get_by_id(uuid)
        .await?
        .map(|ct| ct.fields)
        .unwrap_or_default())
}

/// Создание новой записи
pub async fn create(dto: EntryDto) -> anyhow::Result<Uuid> {
    let mut aggregate = Entry::new_for_insert(dto.content_type_ref.clone(), dto.title.clone());
    aggregate.data = dto.data;
    aggregate.status = dto.status;

    let fields = schema_fields(&aggregate.content_type_ref).await?;
    sanitize_values(&mut aggregate.data, &fields);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновление существующей записи
pub async fn update(dto: EntryDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    let fields = schema_fields(&aggregate.content_type_ref).await?;
    sanitize_values(&mut aggregate.data, &fields);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Мягкое удаление записи
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение записи по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Entry>> {
    repository::get_by_id(id).await
}

/// Список записей, опционально по типу контента
pub async fn list(content_type_ref: Option<&str>) -> anyhow::Result<Vec<Entry>> {
    repository::list_by_content_type(content_type_ref).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_touches_only_long_text_fields() {
        let mut long = FieldDefinition::with_label(FieldKind::LongText, "Cuerpo");
        long.api_identifier = "cuerpo".into();
        let title = FieldDefinition::with_label(FieldKind::Text, "Titulo");
        let fields = vec![long, title];

        let mut bag = ValueBag::new();
        bag.set("cuerpo", json!("<p>ok</p><script>x()</script>"));
        bag.set("titulo", json!("<script>kept verbatim</script>"));

        sanitize_values(&mut bag, &fields);

        assert_eq!(bag.get("cuerpo").unwrap(), &json!("<p>ok</p>"));
        assert_eq!(
            bag.get("titulo").unwrap(),
            &json!("<script>kept verbatim</script>")
        );
    }

    #[test]
    fn test_sanitize_cleans_each_item_of_a_list_field() {
        let mut long = FieldDefinition::with_label(FieldKind::LongText, "Bloques");
        long.api_identifier = "bloques".into();
        long.is_list = true;

        let mut bag = ValueBag::new();
        bag.set("bloques", json!(["<p>uno</p>", "<img src=x onerror=y()>"]));

        sanitize_values(&mut bag, &[long]);

        let cleaned = bag.get("bloques").unwrap();
        assert_eq!(cleaned[0], json!("<p>uno</p>"));
        assert!(!cleaned[1].as_str().unwrap().contains("onerror"));
    }
}
