mod hash;
mod source;

pub use hash::{fold96, hash128, hash96, object_key, Hash128, ObjectId};
pub use source::Language;
