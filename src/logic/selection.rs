//! List selection logic
//!
//! Pure functions for moving and repairing a list selection.

/// Move a selection by `delta` rows, clamped to the list bounds
///
/// Starting from no selection, any movement selects the first item.
///
/// # Examples
/// ```
/// use imgtui::logic::selection::move_selection;
///
/// assert_eq!(move_selection(None, 0, 1), None);
/// assert_eq!(move_selection(None, 3, 1), Some(0));
/// assert_eq!(move_selection(Some(0), 3, 1), Some(1));
/// assert_eq!(move_selection(Some(2), 3, 1), Some(2));
/// assert_eq!(move_selection(Some(1), 3, -5), Some(0));
/// assert_eq!(move_selection(Some(0), 30, 10), Some(10));
/// ```
pub fn move_selection(current: Option<usize>, list_len: usize, delta: isize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    let Some(current) = current else {
        return Some(0);
    };

    let last = list_len - 1;
    let target = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    Some(target.min(last))
}

/// Keep a selection valid after the list was replaced
///
/// # Examples
/// ```
/// use imgtui::logic::selection::clamp_selection;
///
/// assert_eq!(clamp_selection(Some(4), 0), None);
/// assert_eq!(clamp_selection(None, 2), Some(0));
/// assert_eq!(clamp_selection(Some(4), 2), Some(1));
/// assert_eq!(clamp_selection(Some(1), 2), Some(1));
/// ```
pub fn clamp_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }
    Some(current.unwrap_or(0).min(list_len - 1))
}
