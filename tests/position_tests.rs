//! Tests for the position calculator
//!
//! These cover the directional scan over real tab descriptors with a
//! blocking predicate built from filter tokens:
//!
//! - The active tab never moves when it is blocking itself
//! - Without a blocker the tab travels to the edge of the strip
//! - With a blocker it stops right next to it
//! - Padding shortens the trip but never goes negative

use std::path::PathBuf;
use tabshift::position::compute_position;
use tabshift_config::{MoveDirection, TabDescriptor};
use tabshift_filters::{BlockingPredicate, FilterEnv, NoDocuments, VariableContext};

/// `[A, B(pinned), C, D(active), E]`
fn scenario_tabs() -> Vec<TabDescriptor> {
    vec![
        TabDescriptor::new("A"),
        TabDescriptor::new("B").pinned(),
        TabDescriptor::new("C"),
        TabDescriptor::new("D").active(),
        TabDescriptor::new("E"),
    ]
}

fn position(
    tabs: &[TabDescriptor],
    active: usize,
    filters: &[&str],
    direction: MoveDirection,
    padding: usize,
) -> Option<usize> {
    let predicate = BlockingPredicate::from_filters(filters).with_path_style(false);
    let vars = VariableContext::default();
    let env = FilterEnv::new(&NoDocuments, &vars);
    compute_position(active, tabs, |tab| predicate.is_blocking(tab, &env), direction, padding)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_left_stops_next_to_pinned_tab() {
    let tabs = scenario_tabs();
    assert_eq!(position(&tabs, 3, &["pinned"], MoveDirection::Left, 0), Some(1));
}

#[test]
fn test_right_without_blocker_moves_to_end() {
    let tabs = scenario_tabs();
    assert_eq!(position(&tabs, 3, &["pinned"], MoveDirection::Right, 0), Some(1));
}

#[test]
fn test_padding_larger_than_distance_yields_zero() {
    let tabs = scenario_tabs();
    assert_eq!(position(&tabs, 3, &["pinned"], MoveDirection::Left, 2), Some(0));
}

#[test]
fn test_blocking_active_tab_stays() {
    let mut tabs = scenario_tabs();
    tabs[3].is_dirty = true;
    assert_eq!(position(&tabs, 3, &["pinned", "dirty"], MoveDirection::Left, 0), None);
    assert_eq!(position(&tabs, 3, &["pinned"], MoveDirection::Left, 0), Some(1));
}

// ============================================================================
// Properties over generated strips
// ============================================================================

/// Every strip of `len` tabs whose pinned flags follow the bits of `mask`
fn strips(len: usize) -> impl Iterator<Item = Vec<TabDescriptor>> {
    (0u32..(1 << len)).map(move |mask| {
        (0..len)
            .map(|i| {
                let tab = TabDescriptor::new(format!("t{i}"));
                if mask & (1 << i) != 0 { tab.pinned() } else { tab }
            })
            .collect()
    })
}

#[test]
fn test_properties_hold_for_all_small_strips() {
    for len in 1..=6 {
        for tabs in strips(len) {
            for active in 0..len {
                for padding in 0..3 {
                    let left = position(&tabs, active, &["pinned"], MoveDirection::Left, padding);
                    let right = position(&tabs, active, &["pinned"], MoveDirection::Right, padding);

                    if tabs[active].is_pinned {
                        assert_eq!(left, None);
                        assert_eq!(right, None);
                        continue;
                    }

                    let raw_left = match (0..active).rev().find(|&i| tabs[i].is_pinned) {
                        Some(i) => active - i - 1,
                        None => active,
                    };
                    let raw_right = match (active + 1..len).find(|&i| tabs[i].is_pinned) {
                        Some(i) => i - active - 1,
                        None => len - active - 1,
                    };
                    assert_eq!(left, Some(raw_left.saturating_sub(padding)));
                    assert_eq!(right, Some(raw_right.saturating_sub(padding)));
                }
            }
        }
    }
}

#[test]
fn test_out_of_range_index_is_no_move() {
    let tabs = scenario_tabs();
    assert_eq!(position(&tabs, 5, &["pinned"], MoveDirection::Left, 0), None);
    assert_eq!(position(&[], 0, &["pinned"], MoveDirection::Right, 0), None);
}

// ============================================================================
// Pattern filters
// ============================================================================

#[test]
fn test_path_filter_as_boundary() {
    let tabs = vec![
        TabDescriptor::new("spec.ts").with_resource("/p/test/spec.ts"),
        TabDescriptor::new("a.ts").with_resource("/p/src/a.ts"),
        TabDescriptor::new("b.ts").with_resource("/p/src/b.ts"),
        TabDescriptor::new("c.ts").with_resource("/p/src/c.ts").active(),
    ];
    let predicate = BlockingPredicate::from_filters(&["pinned", "path:**/test/*.ts"])
        .with_path_style(false);
    let vars = VariableContext::new(Some(PathBuf::from("/p/src/c.ts")), vec![PathBuf::from("/p")]);
    let env = FilterEnv::new(&NoDocuments, &vars);

    let distance = compute_position(
        3,
        &tabs,
        |tab| predicate.is_blocking(tab, &env),
        MoveDirection::Left,
        0,
    );
    assert_eq!(distance, Some(2));
}
