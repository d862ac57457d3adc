use crate::domain::{
    normalize_name, Match, Resolution, ResolvedContact, ResolvedGroup, SkipReason, SkipRecord,
};
use crate::error::CoreError;
use crate::matching::similarity::contains_either;
use crate::matching::NameMatcher;
use crate::resolve::disambiguate::{Decision, Disambiguator, PhoneChoice};
use crate::resolve::separators::{strip_annotation, Separators};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ResolveError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Disambiguator(E),
    #[error("invalid selection for {name:?}: {detail}")]
    InvalidSelection { name: String, detail: String },
}

/// Turns guest-list entries into confirmed contact and phone pairs.
#[derive(Debug, Clone, Default)]
pub struct GroupResolver {
    separators: Separators,
}

impl GroupResolver {
    pub fn new(separators: Separators) -> Self {
        Self { separators }
    }

    pub fn with_separators(items: Vec<String>) -> Result<Self, CoreError> {
        Ok(Self::new(Separators::new(items)?))
    }

    pub fn separators(&self) -> &Separators {
        &self.separators
    }

    /// Resolves entries strictly in input order.
    ///
    /// Unmatched or declined names become [`SkipRecord`]s; only a failing
    /// disambiguator or a malformed selection returns an error.
    pub fn resolve<I, D>(
        &self,
        entries: I,
        matcher: &NameMatcher,
        disambiguator: &mut D,
    ) -> Result<Resolution, ResolveError<D::Error>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        D: Disambiguator + ?Sized,
    {
        let mut resolution = Resolution::default();

        for entry in entries {
            let entry = entry.as_ref();
            let (is_group, names) = self.separators.split_entry(entry);
            let mut contacts = Vec::new();

            for raw in names {
                let name = strip_annotation(&raw);
                resolve_name(
                    &name,
                    matcher,
                    disambiguator,
                    &mut contacts,
                    &mut resolution.skipped,
                )?;
            }

            if contacts.is_empty() {
                debug!(entry, "entry produced no contacts");
                continue;
            }

            resolution.resolved.push(ResolvedGroup {
                original_entry: entry.to_string(),
                is_group,
                contacts,
            });
        }

        Ok(resolution)
    }
}

fn resolve_name<D>(
    name: &str,
    matcher: &NameMatcher,
    disambiguator: &mut D,
    contacts: &mut Vec<ResolvedContact>,
    skipped: &mut Vec<SkipRecord>,
) -> Result<(), ResolveError<D::Error>>
where
    D: Disambiguator + ?Sized,
{
    let mut matches = matcher.find_matches(name);

    if matches.is_empty() {
        debug!(name, "no matches found");
        skipped.push(SkipRecord::new(name, SkipReason::NoMatches));
        return Ok(());
    }

    if matches.len() == 1 {
        accept_default(name, matches.swap_remove(0), contacts, skipped);
        return Ok(());
    }

    if let Some(index) = unique_name_match(name, &matches) {
        debug!(name, candidate = %matches[index].name, "picked the only matching name");
        accept_default(name, matches.swap_remove(index), contacts, skipped);
        return Ok(());
    }

    match disambiguator
        .disambiguate(name, &matches)
        .map_err(ResolveError::Disambiguator)?
    {
        Decision::Decline => {
            debug!(name, "disambiguation declined");
            skipped.push(SkipRecord::new(name, SkipReason::UserSkipped));
        }
        Decision::Select(choices) => {
            let selected = validate_selection(name, &matches, &choices)?;
            contacts.extend(selected);
        }
    }

    Ok(())
}

fn accept_default(
    name: &str,
    matched: Match,
    contacts: &mut Vec<ResolvedContact>,
    skipped: &mut Vec<SkipRecord>,
) {
    match matched.default_phone().map(str::to_string) {
        Some(phone) => contacts.push(ResolvedContact { matched, phone }),
        None => {
            warn!(name, candidate = %matched.name, "matched contact has no phone number");
            skipped.push(SkipRecord::new(name, SkipReason::NoPhone));
        }
    }
}

/// Index of the only match whose name equals, contains, or is contained by
/// `name`, if there is exactly one.
fn unique_name_match(name: &str, matches: &[Match]) -> Option<usize> {
    let query = normalize_name(name);
    let mut hits = matches
        .iter()
        .enumerate()
        .filter(|(_, item)| contains_either(&query, &normalize_name(&item.name)))
        .map(|(index, _)| index);

    let first = hits.next()?;
    if hits.next().is_some() {
        return None;
    }
    Some(first)
}

fn validate_selection<E: std::error::Error + 'static>(
    name: &str,
    matches: &[Match],
    choices: &[PhoneChoice],
) -> Result<Vec<ResolvedContact>, ResolveError<E>> {
    let invalid = |detail: String| ResolveError::InvalidSelection {
        name: name.to_string(),
        detail,
    };

    if choices.is_empty() {
        return Err(invalid("empty selection".to_string()));
    }

    let mut selected = Vec::with_capacity(choices.len());
    for choice in choices {
        let matched = matches.get(choice.match_index).ok_or_else(|| {
            invalid(format!(
                "match index {} out of range ({} offered)",
                choice.match_index,
                matches.len()
            ))
        })?;
        if !matched.phones.iter().any(|phone| *phone == choice.phone) {
            return Err(invalid(format!(
                "phone {} does not belong to {}",
                choice.phone, matched.name
            )));
        }
        selected.push(ResolvedContact {
            matched: matched.clone(),
            phone: choice.phone.clone(),
        });
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::{GroupResolver, ResolveError};
    use crate::domain::{Candidate, Match, SkipReason};
    use crate::matching::NameMatcher;
    use crate::resolve::disambiguate::{
        DeclineAmbiguous, Decision, Disambiguator, PhoneChoice, PickTopMatch,
    };
    use std::collections::VecDeque;
    use std::convert::Infallible;
    use std::io;

    #[derive(Default)]
    struct Scripted {
        answers: VecDeque<Decision>,
        asked: Vec<(String, Vec<String>)>,
    }

    impl Scripted {
        fn new(answers: Vec<Decision>) -> Self {
            Self {
                answers: answers.into(),
                asked: Vec::new(),
            }
        }
    }

    impl Disambiguator for Scripted {
        type Error = Infallible;

        fn disambiguate(&mut self, name: &str, matches: &[Match]) -> Result<Decision, Infallible> {
            self.asked.push((
                name.to_string(),
                matches.iter().map(|m| m.name.clone()).collect(),
            ));
            Ok(self.answers.pop_front().unwrap_or(Decision::Decline))
        }
    }

    struct Failing;

    impl Disambiguator for Failing {
        type Error = io::Error;

        fn disambiguate(&mut self, _name: &str, _matches: &[Match]) -> Result<Decision, io::Error> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
        }
    }

    fn candidate(name: &str, phones: &[&str]) -> Candidate {
        Candidate::new(name, phones.iter().map(|p| p.to_string()).collect())
    }

    fn matcher() -> NameMatcher {
        NameMatcher::new(vec![
            candidate("John", &["+551100000001"]),
            candidate("Mary", &["+551100000002", "+551100000022"]),
            candidate("Jane", &["+551100000003"]),
            candidate("Bob", &["+551100000004"]),
            candidate("Ana Costa", &["+551100000005"]),
            candidate("Ana Lima", &["+551100000006", "+551100000066"]),
        ])
    }

    #[test]
    fn groups_resolve_in_left_to_right_order() {
        let mut prompt = Scripted::default();
        let resolution = GroupResolver::default()
            .resolve(["John e Mary", "Jane, Bob"], &matcher(), &mut prompt)
            .expect("resolve");

        assert!(resolution.skipped.is_empty());
        assert_eq!(resolution.resolved.len(), 2);
        let first = &resolution.resolved[0];
        assert_eq!(first.original_entry, "John e Mary");
        assert!(first.is_group);
        let names: Vec<&str> = first.contacts.iter().map(|c| c.matched.name.as_str()).collect();
        assert_eq!(names, vec!["John", "Mary"]);
        assert_eq!(first.contacts[1].phone, "+551100000002");

        let second = &resolution.resolved[1];
        assert!(second.is_group);
        let names: Vec<&str> = second.contacts.iter().map(|c| c.matched.name.as_str()).collect();
        assert_eq!(names, vec!["Jane", "Bob"]);
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn unmatched_entry_becomes_skip_record() {
        let resolution = GroupResolver::default()
            .resolve(["Xyz"], &matcher(), &mut DeclineAmbiguous)
            .expect("resolve");
        assert!(resolution.resolved.is_empty());
        assert_eq!(resolution.skipped.len(), 1);
        assert_eq!(resolution.skipped[0].name, "Xyz");
        assert_eq!(resolution.skipped[0].reason, SkipReason::NoMatches);
    }

    #[test]
    fn partially_matched_group_keeps_found_contacts() {
        let resolution = GroupResolver::default()
            .resolve(["John e Xyz"], &matcher(), &mut DeclineAmbiguous)
            .expect("resolve");
        assert_eq!(resolution.resolved.len(), 1);
        assert_eq!(resolution.resolved[0].contacts.len(), 1);
        assert_eq!(resolution.skipped[0].name, "Xyz");
    }

    #[test]
    fn annotations_are_stripped_before_matching() {
        let resolution = GroupResolver::default()
            .resolve(["John (bring a gift)"], &matcher(), &mut DeclineAmbiguous)
            .expect("resolve");
        assert_eq!(resolution.resolved[0].original_entry, "John (bring a gift)");
        assert!(!resolution.resolved[0].is_group);
        assert_eq!(resolution.resolved[0].contacts[0].matched.name, "John");
    }

    #[test]
    fn unique_containing_name_is_picked_without_asking() {
        let matcher = NameMatcher::new(vec![
            candidate("Carlos Lima", &["+551100000007"]),
            candidate("Carla Lima", &["+551100000008"]),
        ]);
        assert_eq!(matcher.find_matches("Carla").len(), 2);

        let mut prompt = Scripted::default();
        let resolution = GroupResolver::default()
            .resolve(["Carla"], &matcher, &mut prompt)
            .expect("resolve");
        assert!(prompt.asked.is_empty());
        assert_eq!(resolution.resolved[0].contacts[0].matched.name, "Carla Lima");
    }

    #[test]
    fn ambiguous_name_is_delegated_and_may_select_several_phones() {
        let mut prompt = Scripted::new(vec![Decision::Select(vec![
            PhoneChoice::new(1, "+551100000006"),
            PhoneChoice::new(1, "+551100000066"),
        ])]);
        let resolution = GroupResolver::default()
            .resolve(["Ana"], &matcher(), &mut prompt)
            .expect("resolve");

        assert_eq!(prompt.asked.len(), 1);
        assert_eq!(prompt.asked[0].0, "Ana");
        assert_eq!(prompt.asked[0].1, vec!["Ana Costa", "Ana Lima", "Jane"]);
        let contacts = &resolution.resolved[0].contacts;
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().all(|c| c.matched.name == "Ana Lima"));
        assert_eq!(contacts[1].phone, "+551100000066");
    }

    #[test]
    fn declined_disambiguation_is_recorded() {
        let mut prompt = Scripted::new(vec![Decision::Decline]);
        let resolution = GroupResolver::default()
            .resolve(["Ana", "Bob"], &matcher(), &mut prompt)
            .expect("resolve");
        assert_eq!(resolution.resolved.len(), 1);
        assert_eq!(resolution.resolved[0].original_entry, "Bob");
        assert_eq!(resolution.skipped.len(), 1);
        assert_eq!(resolution.skipped[0].reason, SkipReason::UserSkipped);
    }

    #[test]
    fn prompts_follow_guest_list_order() {
        let mut prompt = Scripted::default();
        GroupResolver::default()
            .resolve(["Ana e John", "Ana"], &matcher(), &mut prompt)
            .expect("resolve");
        let asked: Vec<&str> = prompt.asked.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(asked, vec!["Ana", "Ana"]);
    }

    #[test]
    fn top_match_policy_selects_first_phone() {
        let resolution = GroupResolver::default()
            .resolve(["Ana"], &matcher(), &mut PickTopMatch)
            .expect("resolve");
        let contact = &resolution.resolved[0].contacts[0];
        assert_eq!(contact.matched.name, "Ana Costa");
        assert_eq!(contact.phone, "+551100000005");
    }

    #[test]
    fn empty_selection_is_rejected() {
        let mut prompt = Scripted::new(vec![Decision::Select(Vec::new())]);
        let err = GroupResolver::default()
            .resolve(["Ana"], &matcher(), &mut prompt)
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidSelection { .. }));
    }

    #[test]
    fn foreign_phone_is_rejected() {
        let mut prompt = Scripted::new(vec![Decision::Select(vec![PhoneChoice::new(
            0,
            "+559999999999",
        )])]);
        let err = GroupResolver::default()
            .resolve(["Ana"], &matcher(), &mut prompt)
            .unwrap_err();
        assert!(err.to_string().contains("does not belong"));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut prompt = Scripted::new(vec![Decision::Select(vec![PhoneChoice::new(
            7,
            "+551100000005",
        )])]);
        let err = GroupResolver::default()
            .resolve(["Ana"], &matcher(), &mut prompt)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn disambiguator_failure_propagates() {
        let err = GroupResolver::default()
            .resolve(["Ana"], &matcher(), &mut Failing)
            .unwrap_err();
        match err {
            ResolveError::Disambiguator(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::UnexpectedEof)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn contact_without_phone_is_skipped() {
        let matcher = NameMatcher::new(vec![candidate("Zed", &[])]);
        let resolution = GroupResolver::default()
            .resolve(["Zed"], &matcher, &mut DeclineAmbiguous)
            .expect("resolve");
        assert!(resolution.resolved.is_empty());
        assert_eq!(resolution.skipped[0].reason, SkipReason::NoPhone);
    }

    #[test]
    fn custom_separators_are_used() {
        let resolver = GroupResolver::with_separators(vec![" & ".to_string()]).expect("resolver");
        let resolution = resolver
            .resolve(["John & Bob", "Jane, Mary"], &matcher(), &mut DeclineAmbiguous)
            .expect("resolve");
        assert_eq!(resolution.resolved.len(), 1);
        assert!(resolution.resolved[0].is_group);
        assert_eq!(resolution.resolved[0].contacts.len(), 2);
        // The comma is no longer a separator, so "Jane, Mary" is one ambiguous name.
        assert_eq!(resolution.skipped[0].name, "Jane, Mary");
        assert_eq!(resolution.skipped[0].reason, SkipReason::UserSkipped);
    }

    #[test]
    fn empty_separator_fails_before_resolving() {
        assert!(GroupResolver::with_separators(vec![String::new()]).is_err());
    }
}
