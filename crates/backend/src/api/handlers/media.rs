use axum::extract::Multipart;
use axum::Json;
use contracts::domain::c002_entry::aggregate::UploadDescriptor;
use contracts::shared::slug::slugify;
use once_cell::sync::OnceCell;
use std::path::PathBuf;

static MEDIA_DIR: OnceCell<PathBuf> = OnceCell::new();

/// Запомнить каталог для загрузок (вызывается один раз из main)
pub fn initialize_media_store(dir: PathBuf) -> anyhow::Result<()> {
    std::fs::create_dir_all(&dir)?;
    MEDIA_DIR
        .set(dir)
        .map_err(|_| anyhow::anyhow!("media store already initialized"))
}

/// Имя файла на диске: слаг от основы + исходное расширение,
/// с коротким uuid-префиксом против коллизий
fn stored_file_name(original: &str) -> String {
    let path = std::path::Path::new(original);
    let stem = path
        .file_stem()
        .map(|s| slugify(&s.to_string_lossy()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "file".to_string());
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();
    let prefix = &uuid::Uuid::new_v4().to_string()[..8];
    format!("{}-{}{}", prefix, stem, ext)
}

/// POST /api/media — приём одного файла, ответ — дескриптор загрузки.
///
/// The field value in the entry form is exactly this descriptor; transport
/// errors leave the previous value untouched on the client.
pub async fn upload(
    mut multipart: Multipart,
) -> Result<Json<UploadDescriptor>, axum::http::StatusCode> {
    let Some(dir) = MEDIA_DIR.get() else {
        return Err(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| axum::http::StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "file".to_string());
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|_| axum::http::StatusCode::BAD_REQUEST)?;

        let stored = stored_file_name(&original_name);
        let target = dir.join(&stored);
        if let Err(e) = std::fs::write(&target, &bytes) {
            tracing::error!("media write failed at {}: {}", target.display(), e);
            return Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        }

        tracing::info!("media stored: {} ({} bytes)", stored, bytes.len());
        return Ok(Json(UploadDescriptor {
            url: format!("/media/{}", urlencoding::encode(&stored)),
            file_name: original_name,
            size: bytes.len() as u64,
            content_type,
        }));
    }

    Err(axum::http::StatusCode::BAD_REQUEST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_name_keeps_extension_and_slugs_the_stem() {
        let name = stored_file_name("Playa Blanca (1).JPG");
        assert!(name.ends_with(".jpg"));
        assert!(name.contains("playa-blanca-1"));
    }

    #[test]
    fn test_stored_name_handles_missing_stem() {
        let name = stored_file_name(".env");
        assert!(!name.is_empty());
    }
}
