use guestlink_core::matching::{BROAD_LIMIT, CONFIDENT_LIMIT, HIGH_CONFIDENCE};
use guestlink_core::{normalize_name, normalize_phone, Candidate, NameMatcher};

const NAMES: [&str; 10] = [
    "João Silva",
    "Maria Santos",
    "José Oliveira",
    "Ana Costa",
    "Pedro Alves",
    "Carla Lima",
    "Jon",
    "Mari",
    "Tiina Mägi",
    "Matti Virtanen",
];

fn directory() -> Vec<Candidate> {
    NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| Candidate::new(*name, vec![format!("+5511900000{index:03}")]))
        .collect()
}

#[test]
fn every_directory_name_matches_itself_first() {
    let matcher = NameMatcher::new(directory());
    for name in NAMES {
        let matches = matcher.find_matches(name);
        assert_eq!(matches[0].name, name, "query {name}");
        assert_eq!(matches[0].confidence, 1.0, "query {name}");
    }
}

#[test]
fn contained_queries_score_exactly_point_nine() {
    let matcher = NameMatcher::new(directory());
    for (query, expected) in [("Silva", "João Silva"), ("virtanen", "Matti Virtanen"), ("Mägi", "Tiina Mägi")] {
        let matches = matcher.find_matches(query);
        let hit = matches
            .iter()
            .find(|m| m.name == expected)
            .unwrap_or_else(|| panic!("{expected} missing for {query}"));
        assert_eq!(hit.confidence, 0.9);
    }
}

#[test]
fn result_lists_respect_order_and_limits() {
    let matcher = NameMatcher::new(directory());
    for query in ["a", "jo", "maria", "tiina", "costa lima", "zz", "Pedro", "q"] {
        let matches = matcher.find_matches(query);
        assert!(matches.len() <= BROAD_LIMIT);
        if matches.iter().any(|m| m.confidence >= HIGH_CONFIDENCE) {
            assert!(matches.len() <= CONFIDENT_LIMIT);
        }
        for pair in matches.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        assert!(matches.iter().all(|m| m.confidence > 0.0));
    }
}

#[test]
fn lookups_do_not_mutate_the_directory() {
    let matcher = NameMatcher::new(directory());
    let before = matcher.candidates().to_vec();
    let first = matcher.find_matches("Maria");
    let second = matcher.find_matches("Maria");
    assert_eq!(first, second);
    assert_eq!(matcher.candidates(), before.as_slice());
}

#[test]
fn normalization_helpers_are_idempotent() {
    assert_eq!(normalize_name("  John DOE  "), "john doe");
    for raw in NAMES {
        let once = normalize_name(raw);
        assert_eq!(normalize_name(&once), once);
    }
    assert_eq!(normalize_phone("1234567890"), "+551234567890");
    assert_eq!(normalize_phone("3721234567"), "+3721234567");
    assert_eq!(normalize_phone("+358401234567"), "+358401234567");
}
