//! Custom request extractors.

mod resource_id;
mod validated_json;

pub use resource_id::ResourceId;
pub use validated_json::{collect_field_errors, ValidatedJson};
