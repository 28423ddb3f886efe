use super::repository;
use contracts::domain::c001_content_type::aggregate::{ContentType, ContentTypeDto};
use uuid::Uuid;

/// Создание нового типа контента
pub async fn create(dto: ContentTypeDto) -> anyhow::Result<Uuid> {
    let mut aggregate = ContentType::new_for_insert(dto.name.clone(), dto.api_identifier.clone());
    aggregate.base.comment = dto.description.clone();
    aggregate.fields = dto.fields;

    // Валидация (повторы идентификаторов блокируются только на сохранении)
    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновление существующего типа контента
pub async fn update(dto: ContentTypeDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::update(&aggregate).await
}

/// Мягкое удаление типа контента
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Получение типа контента по ID
pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ContentType>> {
    repository::get_by_id(id).await
}

/// Получение списка всех типов контента
pub async fn list_all() -> anyhow::Result<Vec<ContentType>> {
    repository::list_all().await
}
