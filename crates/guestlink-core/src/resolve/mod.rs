pub mod disambiguate;
pub mod resolver;
pub mod separators;

pub use disambiguate::{DeclineAmbiguous, Decision, Disambiguator, PhoneChoice, PickTopMatch};
pub use resolver::{GroupResolver, ResolveError};
pub use separators::{strip_annotation, Separators, DEFAULT_SEPARATORS};
