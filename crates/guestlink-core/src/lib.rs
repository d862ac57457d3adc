pub mod domain;
pub mod error;
pub mod matching;
pub mod resolve;

pub use domain::*;
pub use error::CoreError;
pub use matching::NameMatcher;
pub use resolve::{
    Decision, DeclineAmbiguous, Disambiguator, GroupResolver, PhoneChoice, PickTopMatch,
    ResolveError, Separators,
};
