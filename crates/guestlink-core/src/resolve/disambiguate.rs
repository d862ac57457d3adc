use crate::domain::Match;
use std::convert::Infallible;

/// One chosen phone of one offered match, addressed by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneChoice {
    pub match_index: usize,
    pub phone: String,
}

impl PhoneChoice {
    pub fn new(match_index: usize, phone: impl Into<String>) -> Self {
        Self {
            match_index,
            phone: phone.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Must not be empty; use [`Decision::Decline`] to skip.
    Select(Vec<PhoneChoice>),
    Decline,
}

/// Chooses among several plausible matches for one name.
///
/// Called at most once at a time, in guest-list order. Implementations may
/// block on a human; a timeout, if wanted, should surface as `Decline`.
pub trait Disambiguator {
    type Error: std::error::Error + Send + Sync + 'static;

    fn disambiguate(&mut self, name: &str, matches: &[Match]) -> Result<Decision, Self::Error>;
}

impl<D: Disambiguator + ?Sized> Disambiguator for &mut D {
    type Error = D::Error;

    fn disambiguate(&mut self, name: &str, matches: &[Match]) -> Result<Decision, Self::Error> {
        (**self).disambiguate(name, matches)
    }
}

/// Declines every ambiguous name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAmbiguous;

impl Disambiguator for DeclineAmbiguous {
    type Error = Infallible;

    fn disambiguate(&mut self, _name: &str, _matches: &[Match]) -> Result<Decision, Infallible> {
        Ok(Decision::Decline)
    }
}

/// Takes the default phone of the best-ranked match.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickTopMatch;

impl Disambiguator for PickTopMatch {
    type Error = Infallible;

    fn disambiguate(&mut self, _name: &str, matches: &[Match]) -> Result<Decision, Infallible> {
        let choice = matches
            .iter()
            .enumerate()
            .find_map(|(index, item)| item.default_phone().map(|phone| PhoneChoice::new(index, phone)));
        Ok(match choice {
            Some(choice) => Decision::Select(vec![choice]),
            None => Decision::Decline,
        })
    }
}
