//! Bilingual (English/Arabic) message catalog.
//!
//! Every user-visible message travels as a [`Message`] pair so the HTTP layer
//! can render the `{ "en": ..., "ar": ... }` shape without knowing which error
//! produced it. Catalog entries live in [`messages`].

use serde::{Deserialize, Serialize};

/// An English/Arabic message pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub en: String,
    pub ar: String,
}

impl Message {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Replace `{placeholder}` in both languages.
    pub fn with(mut self, placeholder: &str, value: &str) -> Self {
        let token = format!("{{{placeholder}}}");
        self.en = self.en.replace(&token, value);
        self.ar = self.ar.replace(&token, value);
        self
    }
}

/// Catalog of canned bilingual messages.
pub mod messages {
    use super::Message;

    pub fn not_found() -> Message {
        Message::new("Resource not found.", "المورد غير موجود.")
    }

    pub fn not_found_with_id(id: &str) -> Message {
        Message::new(
            "Resource not found with id {id}.",
            "لم يتم العثور على المورد بالمعرف {id}.",
        )
        .with("id", id)
    }

    pub fn server_error() -> Message {
        Message::new("Internal server error.", "خطأ داخلي في الخادم.")
    }

    pub fn invalid_input() -> Message {
        Message::new("Invalid input provided.", "إدخال غير صالح.")
    }

    pub fn invalid_id(id: &str) -> Message {
        Message::new(
            "Invalid ID format: {id}.",
            "تنسيق معرف غير صالح: {id}.",
        )
        .with("id", id)
    }

    pub fn image_only() -> Message {
        Message::new("Only image files are allowed.", "مسموح بالصور فقط")
    }

    pub fn image_too_large(max_mb: &str) -> Message {
        Message::new(
            "Image is too large. Maximum allowed size is {max} MB.",
            "الصورة كبيرة جدًا. الحد الأقصى المسموح به هو {max} ميغابايت.",
        )
        .with("max", max_mb)
    }

    pub fn image_required() -> Message {
        Message::new("Please upload an image", "يرجى تحميل صورة")
    }

    pub fn too_many_images(max: &str) -> Message {
        Message::new(
            "Too many images. Maximum allowed is {max}.",
            "عدد الصور كبير جدًا. الحد الأقصى المسموح به هو {max}.",
        )
        .with("max", max)
    }

    pub fn no_auth_token() -> Message {
        Message::new(
            "No authorization token provided.",
            "لم يتم توفير رمز المصادقة.",
        )
    }

    pub fn invalid_token() -> Message {
        Message::new(
            "Invalid token. Please log in again.",
            "رمز غير صالح. الرجاء تسجيل الدخول مرة أخرى.",
        )
    }

    pub fn provide_email_password() -> Message {
        Message::new(
            "Please provide an email and password",
            "يرجى تقديم البريد الإلكتروني وكلمة المرور",
        )
    }

    pub fn invalid_credentials() -> Message {
        Message::new("Invalid credentials", "بيانات الاعتماد غير صالحة")
    }

    pub fn deleted() -> Message {
        Message::new("item deleted successfully.", "تم الحذف بنجاح.")
    }

    pub fn duplicate_key(field: &str) -> Message {
        Message::new(
            "The {field} is already in use.",
            "الحقل {field} مستخدم بالفعل.",
        )
        .with("field", field)
    }

    pub fn invalid_email() -> Message {
        Message::new(
            "Please provide a valid email",
            "يرجى تقديم بريد إلكتروني صحيح",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_substitution_applies_to_both_languages() {
        let msg = messages::not_found_with_id("abc-123");
        assert!(msg.en.contains("abc-123"));
        assert!(msg.ar.contains("abc-123"));
        assert!(!msg.en.contains("{id}"));
    }

    #[test]
    fn message_serializes_as_en_ar_pair() {
        let json = serde_json::to_value(messages::image_only()).unwrap();
        assert!(json.get("en").is_some());
        assert!(json.get("ar").is_some());
    }
}
