use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::c003_destination;
use contracts::domain::c003_destination::aggregate::{DestinationCreateDto, DestinationNode};

/// GET /api/destination — полное дерево направлений
pub async fn tree() -> Result<Json<Vec<DestinationNode>>, axum::http::StatusCode> {
    match c003_destination::service::tree().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/destination — создание узлов (bulk по разделителям в names)
pub async fn create(
    Json(dto): Json<DestinationCreateDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match c003_destination::service::create_bulk(dto).await {
        Ok(created) => {
            use contracts::domain::common::AggregateId;
            let ids: Vec<String> = created.iter().map(|d| d.base.id.as_string()).collect();
            Ok(Json(json!({"ids": ids})))
        }
        Err(e) => {
            tracing::warn!("destination create rejected: {}", e);
            Err(axum::http::StatusCode::BAD_REQUEST)
        }
    }
}

/// DELETE /api/destination/:id — каскадное удаление поддерева
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match c003_destination::service::delete_cascade(uuid).await {
        Ok(0) => Err(axum::http::StatusCode::NOT_FOUND),
        Ok(removed) => Ok(Json(json!({"removed": removed}))),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/destination/testdata
pub async fn insert_test_data() -> Result<(), axum::http::StatusCode> {
    match c003_destination::service::insert_test_data().await {
        Ok(()) => Ok(()),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}
