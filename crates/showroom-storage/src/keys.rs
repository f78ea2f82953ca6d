//! Shared object-name generation for storage backends.
//!
//! Names are `{folder}/{uuid}.{ext}`: unique per call, so concurrent stores
//! never reuse an existing name.

use uuid::Uuid;

/// Generate a collision-resistant object key under `folder`, keeping the
/// original file extension (lowercased, defaulting to `jpg`).
pub fn generate_object_key(folder: &str, original_name: &str) -> String {
    let ext = original_name
        .rsplit('.')
        .next()
        .filter(|e| !e.is_empty() && e.len() <= 5 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "jpg".to_string());
    format!("{}/{}.{}", folder.trim_matches('/'), Uuid::new_v4(), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_extension_and_folder() {
        let key = generate_object_key("cars", "photo.PNG");
        assert!(key.starts_with("cars/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn defaults_missing_or_bogus_extension() {
        assert!(generate_object_key("news", "noext").ends_with(".jpg"));
        assert!(generate_object_key("news", "weird.<script>").ends_with(".jpg"));
    }

    #[test]
    fn successive_keys_are_unique() {
        let a = generate_object_key("cars", "a.jpg");
        let b = generate_object_key("cars", "a.jpg");
        assert_ne!(a, b);
    }
}
