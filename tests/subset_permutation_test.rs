//! Tests for the duplicate-suppressing insertion tree

use itertools::Itertools;
use rstest::rstest;

use combtree::domain::{build, Choice, Order, Variant};
use combtree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[test]
fn given_two_letters_when_building_then_five_results_in_construction_order() {
    // Act
    let tree = build(Variant::SubsetPermutations, vec!["A", "B"]).unwrap();

    // Assert
    assert_eq!(tree.leaves(), ["{}", "{B}", "{A}", "{B, A}", "{A, B}"]);
    assert_eq!(tree.expected_count(), Some(5));
}

#[rstest]
#[case(1, 2)]
#[case(2, 5)]
#[case(3, 16)]
#[case(4, 65)]
fn given_distinct_elements_when_building_then_all_ordered_selections(
    #[case] n: u32,
    #[case] expected: usize,
) {
    // Arrange
    let universe: Vec<u32> = (1..=n).collect();

    // Act
    let tree = build(Variant::SubsetPermutations, universe.clone()).unwrap();

    // Assert: every k-permutation for k = 0..=n, nothing else
    assert_eq!(tree.count(), expected);
    let mut selections: Vec<Vec<u32>> = (0..=n as usize)
        .flat_map(|k| universe.iter().copied().permutations(k))
        .collect();
    selections.sort();
    let mut values: Vec<Vec<u32>> = tree.values().map(<[u32]>::to_vec).collect();
    values.sort();
    assert_eq!(values, selections);
    assert_eq!(tree.stats().duplicates_pruned, 0);
}

#[test]
fn given_repeated_element_when_building_then_duplicates_never_become_leaves() {
    // Act
    let tree = build(Variant::SubsetPermutations, vec!["A", "A", "B"]).unwrap();

    // Assert
    assert!(tree.leaves().iter().all_unique());
    assert!(tree.stats().duplicates_pruned > 0);
    assert!((tree.count() as u128) < tree.expected_count().unwrap());
    // {}, {A}, {B}, {A, A}, {A, B}, {B, A}, {A, A, B}, {A, B, A}, {B, A, A}
    assert_eq!(tree.count(), 9);
}

#[test]
fn given_pruned_duplicates_when_walking_then_no_branch_is_childless() {
    // Arrange
    let tree = build(Variant::SubsetPermutations, vec![1, 1, 1]).unwrap();

    // Act
    let childless = tree
        .walk(Order::Pre)
        .unwrap()
        .filter(|(_, node)| !node.is_leaf() && node.children().is_empty())
        .count();

    // Assert
    assert_eq!(childless, 0);
    assert_eq!(tree.leaves(), ["{}", "{1}", "{1, 1}", "{1, 1, 1}"]);
}

#[test]
fn given_include_branch_when_inspecting_then_children_are_insert_positions() {
    // Arrange
    let tree = build(Variant::SubsetPermutations, vec!['x', 'y']).unwrap();
    let arena = tree.arena();
    let root = arena.get_node(tree.root().unwrap()).unwrap();

    // Act: include x, then include y at each position of [x]
    let (choice, include_x) = &root.children()[1];
    let include_x = arena.get_node(*include_x).unwrap();
    let (_, after_x) = include_x.children()[0];
    let after_x = arena.get_node(after_x).unwrap();
    let (_, include_y) = after_x.children()[1];
    let positions: Vec<_> = arena
        .get_node(include_y)
        .unwrap()
        .children()
        .iter()
        .map(|(choice, _)| choice.clone())
        .collect();

    // Assert
    assert_eq!(choice, &Choice::Include('x'));
    assert_eq!(
        positions,
        [
            Choice::Insert { element: 'y', position: 0 },
            Choice::Insert { element: 'y', position: 1 },
        ]
    );
}
