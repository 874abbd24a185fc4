//! Selection policies: what "activating an item" means.
//!
//! A checkbox list toggles each item independently; a radio list keeps
//! exactly one item checked at a time. The surface is agnostic — it
//! routes every activation (click, space bar, selecting arrow key)
//! through its [`SelectionPolicy`] and repaints whatever the policy says
//! it touched.

use crate::items::{CheckState, ItemList};

/// Result of routing an activation through a policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Activation {
    /// Item indices whose check state changed.
    pub affected: Vec<usize>,
    /// Whether the logical selection changed (always true when `affected`
    /// is non-empty for exclusive policies; per-item for independent).
    pub selection_changed: bool,
    /// The exclusive selection after the activation, if the policy has
    /// one. Independent policies always report `None`.
    pub selection: Option<usize>,
}

impl Activation {
    /// An activation that changed nothing.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Strategy deciding how activations mutate check states.
pub trait SelectionPolicy {
    /// The user activated the item at `index` (guaranteed in-bounds and
    /// enabled).
    fn activate(&mut self, items: &mut ItemList, index: usize) -> Activation;

    /// The item at `index` had its check state set directly by the
    /// application; reconcile any policy invariant around it.
    fn item_mutated(&mut self, items: &mut ItemList, index: usize) -> Activation;

    /// An item was inserted at `inserted`; fix up any stored indices.
    fn item_inserted(&mut self, inserted: usize) -> Activation {
        let _ = inserted;
        Activation::none()
    }

    /// The item at `removed` was deleted; fix up any stored indices.
    fn item_removed(&mut self, removed: usize) -> Activation {
        let _ = removed;
        Activation::none()
    }

    /// The collection was cleared or rebuilt.
    fn reset(&mut self) -> Activation {
        Activation::none()
    }

    /// Whether moving keyboard focus also activates the focused item
    /// (radio semantics) rather than requiring an explicit space press.
    fn keyboard_selects(&self) -> bool;
}

/// Each item toggles on its own: checkbox-list semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndependentPolicy {
    three_state: bool,
}

impl IndependentPolicy {
    pub fn new(three_state: bool) -> Self {
        Self { three_state }
    }

    #[inline]
    pub fn is_three_state(&self) -> bool {
        self.three_state
    }

    pub fn set_three_state(&mut self, three_state: bool) {
        self.three_state = three_state;
    }
}

impl SelectionPolicy for IndependentPolicy {
    fn activate(&mut self, items: &mut ItemList, index: usize) -> Activation {
        let Some(item) = items.get(index) else {
            return Activation::none();
        };
        let next = match item.check_state() {
            CheckState::Unchecked => CheckState::Checked,
            CheckState::Checked if self.three_state => CheckState::Indeterminate,
            CheckState::Checked | CheckState::Indeterminate => CheckState::Unchecked,
        };
        // In-bounds by the check above.
        let _ = items.set_check_state(index, next);
        Activation {
            affected: vec![index],
            selection_changed: true,
            selection: None,
        }
    }

    fn item_mutated(&mut self, _items: &mut ItemList, _index: usize) -> Activation {
        Activation::none()
    }

    fn keyboard_selects(&self) -> bool {
        false
    }
}

/// At most one item checked at a time: radio-list semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExclusivePolicy {
    selected: Option<usize>,
}

impl ExclusivePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected index, if any.
    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Make `index` the sole checked item, unchecking all others.
    fn select(&mut self, items: &mut ItemList, index: usize) -> Activation {
        let mut affected = Vec::new();
        for i in 0..items.len() {
            let want = if i == index {
                CheckState::Checked
            } else {
                CheckState::Unchecked
            };
            if items.get(i).map(|item| item.check_state()) != Some(want) {
                let _ = items.set_check_state(i, want);
                affected.push(i);
            }
        }
        self.selected = Some(index);
        Activation {
            affected,
            selection_changed: true,
            selection: self.selected,
        }
    }
}

impl SelectionPolicy for ExclusivePolicy {
    fn activate(&mut self, items: &mut ItemList, index: usize) -> Activation {
        // Re-activating the current selection is a no-op; a radio group
        // cannot be deselected by clicking.
        if self.selected == Some(index) {
            return Activation::none();
        }
        self.select(items, index)
    }

    fn item_mutated(&mut self, items: &mut ItemList, index: usize) -> Activation {
        let checked = items
            .get(index)
            .map(|item| item.check_state().is_checked())
            .unwrap_or(false);
        if checked {
            if self.selected == Some(index) {
                return Activation::none();
            }
            self.select(items, index)
        } else if self.selected == Some(index) {
            self.selected = None;
            Activation {
                affected: Vec::new(),
                selection_changed: true,
                selection: None,
            }
        } else {
            Activation::none()
        }
    }

    fn item_inserted(&mut self, inserted: usize) -> Activation {
        // The checked item slid one slot down; the selection follows it.
        if let Some(s) = self.selected {
            if s >= inserted {
                self.selected = Some(s + 1);
            }
        }
        Activation::none()
    }

    fn item_removed(&mut self, removed: usize) -> Activation {
        match self.selected {
            Some(s) if s == removed => {
                self.selected = None;
                Activation {
                    affected: Vec::new(),
                    selection_changed: true,
                    selection: None,
                }
            }
            Some(s) if s > removed => {
                self.selected = Some(s - 1);
                Activation::none()
            }
            _ => Activation::none(),
        }
    }

    fn reset(&mut self) -> Activation {
        let had_selection = self.selected.take().is_some();
        Activation {
            affected: Vec::new(),
            selection_changed: had_selection,
            selection: None,
        }
    }

    fn keyboard_selects(&self) -> bool {
        true
    }
}

/// Pointer-derived overlay the renderer draws an item with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Normal,
    /// The pointer is over the item.
    Hot,
    /// The item is held down.
    Pressed,
    Disabled,
}

/// Complete per-item visual state handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisualState {
    pub overlay: OverlayState,
    pub check: CheckState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ListItem;

    fn three_items() -> ItemList {
        let mut items = ItemList::new();
        items.add(ListItem::new("a"));
        items.add(ListItem::new("b"));
        items.add(ListItem::new("c"));
        items
    }

    fn states(items: &ItemList) -> Vec<CheckState> {
        items.iter().map(|i| i.check_state()).collect()
    }

    #[test]
    fn test_independent_two_state_toggles() {
        let mut items = three_items();
        let mut policy = IndependentPolicy::new(false);

        let act = policy.activate(&mut items, 1);
        assert_eq!(act.affected, vec![1]);
        assert_eq!(items.get(1).unwrap().check_state(), CheckState::Checked);

        policy.activate(&mut items, 1);
        assert_eq!(items.get(1).unwrap().check_state(), CheckState::Unchecked);
        // Neighbors untouched.
        assert_eq!(items.get(0).unwrap().check_state(), CheckState::Unchecked);
    }

    #[test]
    fn test_independent_three_state_cycle() {
        let mut items = three_items();
        let mut policy = IndependentPolicy::new(true);

        let cycle: Vec<CheckState> = (0..4)
            .map(|_| {
                policy.activate(&mut items, 0);
                items.get(0).unwrap().check_state()
            })
            .collect();
        assert_eq!(
            cycle,
            vec![
                CheckState::Checked,
                CheckState::Indeterminate,
                CheckState::Unchecked,
                CheckState::Checked,
            ]
        );
    }

    #[test]
    fn test_exclusive_keeps_single_selection() {
        let mut items = three_items();
        let mut policy = ExclusivePolicy::new();

        let act = policy.activate(&mut items, 2);
        assert_eq!(act.selection, Some(2));
        assert_eq!(
            states(&items),
            vec![
                CheckState::Unchecked,
                CheckState::Unchecked,
                CheckState::Checked
            ]
        );

        let act = policy.activate(&mut items, 0);
        assert!(act.selection_changed);
        assert_eq!(act.selection, Some(0));
        // Exactly one item checked.
        let checked: Vec<usize> = (0..3)
            .filter(|&i| items.get(i).unwrap().check_state().is_checked())
            .collect();
        assert_eq!(checked, vec![0]);
    }

    #[test]
    fn test_exclusive_reactivation_is_noop() {
        let mut items = three_items();
        let mut policy = ExclusivePolicy::new();
        policy.activate(&mut items, 1);

        let act = policy.activate(&mut items, 1);
        assert_eq!(act, Activation::none());
        assert_eq!(policy.selected(), Some(1));
    }

    #[test]
    fn test_exclusive_rederives_after_direct_mutation() {
        let mut items = three_items();
        let mut policy = ExclusivePolicy::new();
        policy.activate(&mut items, 0);

        // The application checks item 2 behind the policy's back.
        items.set_check_state(2, CheckState::Checked).unwrap();
        let act = policy.item_mutated(&mut items, 2);
        assert_eq!(act.selection, Some(2));
        assert_eq!(
            states(&items),
            vec![
                CheckState::Unchecked,
                CheckState::Unchecked,
                CheckState::Checked
            ]
        );

        // Unchecking the selection leaves the group empty.
        items.set_check_state(2, CheckState::Unchecked).unwrap();
        let act = policy.item_mutated(&mut items, 2);
        assert!(act.selection_changed);
        assert_eq!(policy.selected(), None);
    }

    #[test]
    fn test_exclusive_tracks_insertions() {
        let mut items = three_items();
        let mut policy = ExclusivePolicy::new();
        policy.activate(&mut items, 1);

        // Inserting at or before the selection shifts it along with the
        // checked item.
        items.insert(0, ListItem::new("z"));
        let act = policy.item_inserted(0);
        assert!(!act.selection_changed);
        assert_eq!(policy.selected(), Some(2));
        assert!(items.get(2).unwrap().check_state().is_checked());

        // Inserting after it leaves it alone.
        items.insert(4, ListItem::new("y"));
        policy.item_inserted(4);
        assert_eq!(policy.selected(), Some(2));
    }

    #[test]
    fn test_exclusive_tracks_removals() {
        let mut items = three_items();
        let mut policy = ExclusivePolicy::new();
        policy.activate(&mut items, 2);

        // Removing an earlier item shifts the stored index.
        items.remove(0).unwrap();
        let act = policy.item_removed(0);
        assert!(!act.selection_changed);
        assert_eq!(policy.selected(), Some(1));

        // Removing the selection clears it.
        items.remove(1).unwrap();
        let act = policy.item_removed(1);
        assert!(act.selection_changed);
        assert_eq!(policy.selected(), None);
    }

    #[test]
    fn test_keyboard_selects_flags() {
        assert!(!IndependentPolicy::new(false).keyboard_selects());
        assert!(ExclusivePolicy::new().keyboard_selects());
    }
}
