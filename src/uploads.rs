//! Photo upload persistence.
//!
//! Stored names are `<uuid>-<sanitized original name>` so concurrent
//! uploads of the same filename never collide. Records carry the relative
//! `uploads/...` path, which the router serves statically.

use std::path::Path;

use uuid::Uuid;

/// Strip path separators and oddball characters from a client filename.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .filter(|&c| c != '/' && c != '\\' && c != '\0')
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Remove consecutive dots (path traversal prevention)
    let sanitized = sanitized.replace("..", "");

    let sanitized: String = sanitized.chars().take(100).collect();

    if sanitized.is_empty() {
        "foto".into()
    } else {
        sanitized
    }
}

/// Write an uploaded photo to disk and return the relative path that the
/// record stores.
pub fn store_photo(
    uploads_dir: &Path,
    original_name: &str,
    bytes: &[u8],
) -> std::io::Result<String> {
    std::fs::create_dir_all(uploads_dir)?;

    let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_filename(original_name));
    std::fs::write(uploads_dir.join(&file_name), bytes)?;

    Ok(format!("uploads/{file_name}"))
}
