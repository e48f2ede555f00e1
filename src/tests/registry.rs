use super::Registry;
use crate::error::RegistryError;
use crate::section::SectionEntry;
use proptest::prelude::*;
use std::collections::HashSet;

fn sample() -> Registry {
    Registry::new(vec![
        SectionEntry::new("intro", "Intro"),
        SectionEntry::with_subsections(
            "mechanics",
            "Mechanics",
            vec![SectionEntry::new("mechanics-sub", "Deep Dive")],
        ),
    ])
    .unwrap()
}

#[test]
fn test_flatten_orders_subsections_after_parent() {
    let registry = sample();
    assert_eq!(registry.flatten(), vec!["intro", "mechanics", "mechanics-sub"]);
}

#[test]
fn test_find_top_level_and_nested() {
    let registry = sample();
    assert_eq!(registry.find("intro").unwrap().title, "Intro");
    assert_eq!(registry.find("mechanics-sub").unwrap().title, "Deep Dive");
    assert!(registry.find("gone").is_none(), "stale ids are not found");
}

#[test]
fn test_depth_and_numbering() {
    let registry = sample();
    assert_eq!(registry.depth("intro"), Some(0));
    assert_eq!(registry.depth("mechanics-sub"), Some(1));
    assert_eq!(registry.depth("gone"), None);

    let numbers: Vec<Option<usize>> = registry.entries().map(|e| e.number).collect();
    assert_eq!(numbers, vec![Some(1), Some(2), None]);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.position("mechanics-sub"), Some(2));
}

#[test]
fn test_duplicate_across_levels_rejected() {
    let result = Registry::new(vec![
        SectionEntry::new("intro", "Intro"),
        SectionEntry::with_subsections(
            "mechanics",
            "Mechanics",
            vec![SectionEntry::new("intro", "Intro again")],
        ),
    ]);
    assert_eq!(
        result,
        Err(RegistryError::DuplicateId {
            id: "intro".to_string()
        })
    );
}

#[test]
fn test_empty_title_and_id_rejected() {
    assert!(matches!(
        Registry::new(vec![SectionEntry::new("intro", "  ")]),
        Err(RegistryError::EmptyTitle { .. })
    ));
    assert!(matches!(
        Registry::new(vec![SectionEntry::new("", "Intro")]),
        Err(RegistryError::EmptyId { .. })
    ));
}

#[test]
fn test_second_nesting_level_rejected() {
    let result = Registry::new(vec![SectionEntry::with_subsections(
        "a",
        "A",
        vec![SectionEntry::with_subsections(
            "b",
            "B",
            vec![SectionEntry::new("c", "C")],
        )],
    )]);
    assert_eq!(result, Err(RegistryError::TooDeep { id: "b".to_string() }));
}

fn arb_sections() -> impl Strategy<Value = Vec<SectionEntry>> {
    prop::collection::vec(0usize..5, 0..8).prop_map(|shape| {
        shape
            .iter()
            .enumerate()
            .map(|(i, subs)| {
                SectionEntry::with_subsections(
                    format!("s{i}"),
                    format!("Section {i}"),
                    (0..*subs)
                        .map(|j| SectionEntry::new(format!("s{i}-{j}"), format!("Sub {i}.{j}")))
                        .collect(),
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn flatten_never_repeats_an_id(sections in arb_sections()) {
        let registry = Registry::new(sections).unwrap();
        let ids = registry.flatten();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        prop_assert_eq!(unique.len(), ids.len());
        prop_assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn injected_duplicate_is_always_rejected(
        sections in arb_sections(),
        pick in any::<prop::sample::Index>(),
    ) {
        let registry = Registry::new(sections.clone()).unwrap();
        let ids: Vec<String> = registry.flatten().iter().map(|s| (*s).to_string()).collect();
        prop_assume!(!ids.is_empty());
        let duplicate = ids[pick.index(ids.len())].clone();

        let mut tampered = sections;
        tampered.push(SectionEntry::new(duplicate.clone(), "Copy"));
        prop_assert_eq!(
            Registry::new(tampered),
            Err(RegistryError::DuplicateId { id: duplicate })
        );
    }
}
