pub mod email;
pub mod field;
pub mod ids;
pub mod phone;
pub mod values;

pub use email::is_email_shape;
pub use field::{ConditionTag, FieldId, FieldKind};
pub use ids::SubmissionId;
pub use phone::{count_phone_digits, has_only_phone_characters, phone_digits};
pub use values::{FieldValue, FormValues};
