//! Object key and URL construction.

use uuid::Uuid;

/// Bucket holding record attachments.
pub const DEFAULT_BUCKET: &str = "expedientes";

/// Key prefix for record attachments.
pub const RECORDS_PREFIX: &str = "records";

/// Build a unique object key for an uploaded file, keeping the original
/// extension: `records/<uuid>.<ext>`. Files without an extension get a
/// bare `records/<uuid>`.
pub fn object_key(original_name: &str) -> String {
    let id = Uuid::new_v4();
    match extension(original_name) {
        Some(ext) => format!("{}/{}.{}", RECORDS_PREFIX, id, ext),
        None => format!("{}/{}", RECORDS_PREFIX, id),
    }
}

/// Public URL for an object key.
pub fn public_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        key
    )
}

/// Upload endpoint for an object key.
pub fn upload_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/storage/v1/object/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        key
    )
}

fn extension(name: &str) -> Option<&str> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext)
}
