//! User-facing text for the Termin terminal.
//!
//! The reference deployment is Arabic-speaking, so every message a user can
//! see lives here in one place.

pub const APP_TITLE: &str = "مدير المواعيد الاحترافي";
pub const APP_SUBTITLE: &str = "هامبورغ";

/// Fallback location used when a description does not name one.
pub const DEFAULT_LOCATION: &str = "هامبورغ";

pub const EMPTY_SMART_INPUT: &str = "الرجاء إدخال وصف للموعد.";
pub const SMART_PARSE_FAILED: &str =
    "فشل التحليل الذكي. الرجاء المحاولة مرة أخرى أو إدخال التفاصيل يدويًا.";
pub const SMART_PARSE_IN_PROGRESS: &str = "جاري التحليل...";

pub const REQUIRED_FIELDS: &str =
    "الرجاء تعبئة جميع الحقول المطلوبة (العنوان, التاريخ, الوقت, المكان).";
pub const INVALID_DATE: &str = "صيغة التاريخ غير صحيحة. استخدم YYYY-MM-DD.";
pub const INVALID_TIME: &str = "صيغة الوقت غير صحيحة. استخدم HH:MM.";

pub const GEOLOCATION_UNSUPPORTED: &str = "المتصفح لا يدعم تحديد الموقع الجغرافي.";
pub const GEOLOCATION_UNAVAILABLE: &str = "لم نتمكن من الوصول إلى موقعك.";

pub const LIST_HEADING: &str = "مواعيدي القادمة";
pub const LIST_EMPTY: &str = "لا توجد مواعيد قادمة.";
pub const LIST_EMPTY_HINT: &str = "أضف موعدًا جديدًا للبدء!";

pub const FORM_HEADING: &str = "إضافة موعد جديد";
pub const FORM_HINT: &str = "استخدم التحليل الذكي أو املأ الحقول يدويًا.";

/// Location text for a resolved position, coordinates rounded to 4 places.
pub fn current_location(latitude: f64, longitude: f64) -> String {
    format!("الموقع الحالي (خط عرض: {:.4}, خط طول: {:.4})", latitude, longitude)
}
