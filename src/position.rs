//! Position calculation for the active tab.
//!
//! The active tab slides toward the configured side until it sits next to the
//! nearest blocking tab, or reaches the end of the strip when nothing blocks.
//! Padding keeps that many slots free in front of the boundary.

use tabshift_config::MoveDirection;

/// How far the active tab should move toward `direction`.
///
/// Returns `None` when `active_index` is out of range or the active tab is
/// itself blocking. `Some(0)` means the tab is already where it belongs.
///
/// `is_blocking` is only called on tabs between the active tab and the
/// boundary it stops at.
///
/// # Examples
///
/// ```
/// use tabshift::position::compute_position;
/// use tabshift_config::MoveDirection;
///
/// // A, B(pinned), C, D(active), E
/// let pinned = [false, true, false, false, false];
/// assert_eq!(compute_position(3, &pinned, |p| *p, MoveDirection::Left, 0), Some(1));
/// assert_eq!(compute_position(3, &pinned, |p| *p, MoveDirection::Right, 0), Some(1));
/// assert_eq!(compute_position(1, &pinned, |p| *p, MoveDirection::Left, 0), None);
/// ```
pub fn compute_position<T, F>(
    active_index: usize,
    tabs: &[T],
    mut is_blocking: F,
    direction: MoveDirection,
    padding: usize,
) -> Option<usize>
where
    F: FnMut(&T) -> bool,
{
    let active = tabs.get(active_index)?;
    if is_blocking(active) {
        return None;
    }

    let raw = match direction {
        MoveDirection::Left => match tabs[..active_index].iter().rposition(&mut is_blocking) {
            Some(blocker) => active_index - blocker - 1,
            None => active_index,
        },
        MoveDirection::Right => {
            let after = &tabs[active_index + 1..];
            match after.iter().position(&mut is_blocking) {
                Some(offset) => offset,
                None => after.len(),
            }
        }
    };

    Some(raw.saturating_sub(padding))
}

/// Index the active tab lands on after moving `distance` slots.
pub fn target_index(active_index: usize, direction: MoveDirection, distance: usize) -> usize {
    match direction {
        MoveDirection::Left => active_index.saturating_sub(distance),
        MoveDirection::Right => active_index.saturating_add(distance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(pattern: &str) -> Vec<bool> {
        pattern.chars().map(|c| c == 'x').collect()
    }

    fn left(active: usize, pattern: &str, padding: usize) -> Option<usize> {
        compute_position(active, &flags(pattern), |b| *b, MoveDirection::Left, padding)
    }

    fn right(active: usize, pattern: &str, padding: usize) -> Option<usize> {
        compute_position(active, &flags(pattern), |b| *b, MoveDirection::Right, padding)
    }

    #[test]
    fn test_nearest_blocker_to_the_left() {
        assert_eq!(left(3, ".x...", 0), Some(1));
        assert_eq!(left(5, "x.x...", 0), Some(2));
        assert_eq!(left(2, ".x.", 0), Some(0));
    }

    #[test]
    fn test_nearest_blocker_to_the_right() {
        assert_eq!(right(0, "...x.", 0), Some(2));
        assert_eq!(right(1, "..x.x", 0), Some(0));
    }

    #[test]
    fn test_edge_fallback() {
        assert_eq!(left(3, ".....", 0), Some(3));
        assert_eq!(right(3, ".x...", 0), Some(1));
        assert_eq!(left(0, "...", 0), Some(0));
        assert_eq!(right(2, "...", 0), Some(0));
    }

    #[test]
    fn test_padding_reduces_distance() {
        assert_eq!(left(5, "x.....", 2), Some(2));
        assert_eq!(left(3, ".....", 1), Some(2));
        assert_eq!(right(0, ".....", 10), Some(0));
        assert_eq!(left(3, ".x...", 2), Some(0));
    }

    #[test]
    fn test_blocking_active_tab_never_moves() {
        assert_eq!(left(1, ".x.", 0), None);
        assert_eq!(right(0, "x..", 0), None);
    }

    #[test]
    fn test_out_of_range_active_index() {
        assert_eq!(left(3, "...", 0), None);
        assert_eq!(right(0, "", 0), None);
    }

    #[test]
    fn test_single_tab() {
        assert_eq!(left(0, ".", 0), Some(0));
        assert_eq!(right(0, ".", 0), Some(0));
    }

    #[test]
    fn test_target_index() {
        assert_eq!(target_index(3, MoveDirection::Left, 1), 2);
        assert_eq!(target_index(3, MoveDirection::Right, 1), 4);
        assert_eq!(target_index(1, MoveDirection::Left, 5), 0);
    }
}
