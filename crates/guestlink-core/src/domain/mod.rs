pub mod candidate;
pub mod name;
pub mod phone;
pub mod resolution;

pub use candidate::{Candidate, Match};
pub use name::normalize_name;
pub use phone::{
    normalize_phone, phone_digits, PhoneNormalizer, DEFAULT_COUNTRY_CODE, DEFAULT_COUNTRY_CODES,
};
pub use resolution::{Resolution, ResolvedContact, ResolvedGroup, SkipReason, SkipRecord};
