//! Stored image references and the main-image reconciliation rules.
//!
//! A [`StoredImage`] is an opaque storage URL plus a main-image flag. Within a
//! car's image collection, exactly one element is main whenever the collection
//! is non-empty. Reconciliation is pure so it can be asserted independently of
//! the upload pipeline.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::locales::Message;

/// A durable reference to one stored image, owned by exactly one entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub url: String,
    #[serde(rename = "isMain", alias = "main", default)]
    pub is_main: bool,
}

impl StoredImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_main: false,
        }
    }
}

/// How newly stored URLs combine with an entity's existing collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageMergeMode {
    /// Create: the new URLs become the whole collection.
    Assign,
    /// Update with `replaceImages=true`: previous images are superseded.
    Replace,
    /// Update with `replaceImages=false`: new URLs go after the existing ones.
    Append,
}

/// Merge newly stored URLs into an existing collection. Ordinal order of the
/// new URLs is preserved; main flags are left for [`reconcile_main`].
pub fn merge_images(
    existing: &[StoredImage],
    new_urls: Vec<String>,
    mode: ImageMergeMode,
) -> Vec<StoredImage> {
    let new_images = new_urls.into_iter().map(StoredImage::new);
    match mode {
        ImageMergeMode::Assign | ImageMergeMode::Replace => new_images.collect(),
        ImageMergeMode::Append => existing.iter().cloned().chain(new_images).collect(),
    }
}

/// Re-derive main flags after a merge.
///
/// Priority: an explicitly designated URL wins; otherwise the previously main
/// image keeps its flag if it survived the merge; otherwise index 0. Ends by
/// asserting the exactly-one invariant — a violation here is a bug in the
/// association logic, not user input.
pub fn reconcile_main(
    images: &mut [StoredImage],
    explicit_main: Option<&str>,
) -> Result<(), AppError> {
    if images.is_empty() {
        return Ok(());
    }

    let main_index = match explicit_main {
        Some(url) => match images.iter().position(|img| img.url == url) {
            Some(idx) => idx,
            None => {
                return Err(AppError::Validation(Message::new(
                    "mainImage does not match any image of this car.",
                    "الصورة الرئيسية المحددة غير موجودة ضمن صور السيارة.",
                )))
            }
        },
        None => images.iter().position(|img| img.is_main).unwrap_or(0),
    };

    for (idx, img) in images.iter_mut().enumerate() {
        img.is_main = idx == main_index;
    }

    let main_count = images.iter().filter(|img| img.is_main).count();
    if main_count != 1 {
        return Err(AppError::ImageInvariant(format!(
            "expected exactly one main image, found {}",
            main_count
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(images: &[StoredImage]) -> Vec<&str> {
        images.iter().map(|i| i.url.as_str()).collect()
    }

    #[test]
    fn assign_makes_first_image_main() {
        let mut images = merge_images(
            &[],
            vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()],
            ImageMergeMode::Assign,
        );
        reconcile_main(&mut images, None).unwrap();
        assert!(images[0].is_main);
        assert!(!images[1].is_main);
        assert!(!images[2].is_main);
    }

    #[test]
    fn replace_discards_previous_collection() {
        let existing = vec![
            StoredImage {
                url: "old1.jpg".into(),
                is_main: true,
            },
            StoredImage::new("old2.jpg"),
        ];
        let mut images = merge_images(
            &existing,
            vec!["new1.jpg".into(), "new2.jpg".into()],
            ImageMergeMode::Replace,
        );
        reconcile_main(&mut images, None).unwrap();
        assert_eq!(urls(&images), vec!["new1.jpg", "new2.jpg"]);
        assert!(images[0].is_main);
    }

    #[test]
    fn append_preserves_order_and_existing_main() {
        let existing = vec![
            StoredImage {
                url: "a.jpg".into(),
                is_main: true,
            },
            StoredImage::new("b.jpg"),
            StoredImage::new("c.jpg"),
        ];
        let mut images = merge_images(&existing, vec!["d.jpg".into()], ImageMergeMode::Append);
        reconcile_main(&mut images, None).unwrap();
        assert_eq!(urls(&images), vec!["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);
        assert!(images[0].is_main);
        assert_eq!(images.iter().filter(|i| i.is_main).count(), 1);
    }

    #[test]
    fn append_keeps_non_zero_main_if_it_survives() {
        let existing = vec![
            StoredImage::new("a.jpg"),
            StoredImage {
                url: "b.jpg".into(),
                is_main: true,
            },
        ];
        let mut images = merge_images(&existing, vec!["c.jpg".into()], ImageMergeMode::Append);
        reconcile_main(&mut images, None).unwrap();
        assert!(images[1].is_main);
        assert_eq!(images.iter().filter(|i| i.is_main).count(), 1);
    }

    #[test]
    fn explicit_main_overrides_position() {
        let mut images = merge_images(
            &[],
            vec!["a.jpg".into(), "b.jpg".into()],
            ImageMergeMode::Assign,
        );
        reconcile_main(&mut images, Some("b.jpg")).unwrap();
        assert!(!images[0].is_main);
        assert!(images[1].is_main);
    }

    #[test]
    fn explicit_main_must_reference_an_existing_url() {
        let mut images = merge_images(&[], vec!["a.jpg".into()], ImageMergeMode::Assign);
        let err = reconcile_main(&mut images, Some("missing.jpg")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn empty_collection_has_no_invariant() {
        let mut images: Vec<StoredImage> = Vec::new();
        assert!(reconcile_main(&mut images, None).is_ok());
    }

    #[test]
    fn duplicate_main_flags_are_repaired() {
        // Corrupted input (two mains) must come out with exactly one.
        let mut images = vec![
            StoredImage {
                url: "a.jpg".into(),
                is_main: true,
            },
            StoredImage {
                url: "b.jpg".into(),
                is_main: true,
            },
        ];
        reconcile_main(&mut images, None).unwrap();
        assert_eq!(images.iter().filter(|i| i.is_main).count(), 1);
        assert!(images[0].is_main);
    }
}
