// src/common/uploads.rs

use std::path::Path;

use uuid::Uuid;

use crate::common::error::AppError;

// Limite de corpo das rotas com upload (mesmo teto da aplicação original)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

// Apenas imagens são aceitas como logo/foto de produto
const ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];

/// Extrai a extensão do nome original, minúscula, se for de imagem permitida.
pub fn allowed_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Persiste os bytes no diretório de uploads sob um nome novo (UUID + extensão
/// original) e devolve o caminho público servido pela API.
/// O nome enviado pelo cliente nunca influencia o caminho além da extensão.
pub async fn store_image(
    uploads_dir: &Path,
    original_name: &str,
    data: &[u8],
) -> Result<String, AppError> {
    let ext = allowed_extension(original_name).ok_or(AppError::InvalidUploadType)?;
    let file_name = format!("{}.{}", Uuid::new_v4(), ext);

    tokio::fs::create_dir_all(uploads_dir)
        .await
        .map_err(anyhow::Error::from)?;
    tokio::fs::write(uploads_dir.join(&file_name), data)
        .await
        .map_err(anyhow::Error::from)?;

    Ok(format!("/uploads/{file_name}"))
}

/// Um nome de arquivo só pode ser servido se não escapar do diretório de
/// uploads: sem separadores de caminho e sem "..".
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..") && name != "."
}

pub fn content_type_for(name: &str) -> &'static str {
    match Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpeg") | Some("jpg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_image_extensions_case_insensitively() {
        assert_eq!(allowed_extension("logo.PNG").as_deref(), Some("png"));
        assert_eq!(allowed_extension("photo.jpeg").as_deref(), Some("jpeg"));
        assert!(allowed_extension("malware.exe").is_none());
        assert!(allowed_extension("sem_extensao").is_none());
    }

    #[test]
    fn rejects_traversal_names() {
        assert!(is_safe_file_name("abc.png"));
        assert!(!is_safe_file_name("../secret"));
        assert!(!is_safe_file_name("a/b.png"));
        assert!(!is_safe_file_name("a\\b.png"));
        assert!(!is_safe_file_name(""));
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }

    #[tokio::test]
    async fn stores_under_a_fresh_name() {
        let dir = std::env::temp_dir().join(format!("uploads-test-{}", Uuid::new_v4()));

        let a = store_image(&dir, "logo.png", b"abc").await.unwrap();
        let b = store_image(&dir, "logo.png", b"abc").await.unwrap();

        assert!(a.starts_with("/uploads/"));
        assert_ne!(a, b); // mesmo nome de origem, arquivos distintos

        let rejected = store_image(&dir, "script.sh", b"#!/bin/sh").await;
        assert!(matches!(rejected, Err(AppError::InvalidUploadType)));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
