//! Checkbox-flavored list: independent toggling plus the packed
//! checked-bits view.

use slat_core::Signal;

use crate::error::{ListError, ListResult};
use crate::host::HostServices;
use crate::items::{CheckState, ItemList, ListItem};
use crate::policy::IndependentPolicy;
use crate::surface::ListSurface;

/// A list of independently checkable items.
///
/// Thin wrapper over [`ListSurface`] with an [`IndependentPolicy`]; the
/// full surface API (events, layout configuration, geometry) is reachable
/// through [`surface`](Self::surface) / [`surface_mut`](Self::surface_mut).
pub struct CheckBoxList<H: HostServices> {
    surface: ListSurface<H, IndependentPolicy>,
}

impl<H: HostServices> CheckBoxList<H> {
    pub fn new(host: H) -> Self {
        Self {
            surface: ListSurface::new(host, IndependentPolicy::new(false)),
        }
    }

    /// Whether activation cycles through the indeterminate state.
    pub fn is_three_state(&self) -> bool {
        self.surface.policy().is_three_state()
    }

    pub fn set_three_state(&mut self, three_state: bool) {
        self.surface.policy_mut().set_three_state(three_state);
    }

    // ==== items ====

    pub fn items(&self) -> &ItemList {
        self.surface.items()
    }

    pub fn add_item(&mut self, item: ListItem) -> usize {
        self.surface.add_item(item)
    }

    pub fn remove_item(&mut self, index: usize) -> ListResult<ListItem> {
        self.surface.remove_item(index)
    }

    pub fn clear_items(&mut self) {
        self.surface.clear_items();
    }

    /// Whether the item at `index` is checked (or indeterminate).
    pub fn is_checked(&self, index: usize) -> ListResult<bool> {
        self.surface
            .items()
            .get(index)
            .map(|item| item.check_state().is_checked())
            .ok_or(ListError::IndexOutOfBounds {
                index,
                len: self.surface.items().len(),
            })
    }

    pub fn set_check_state(&mut self, index: usize, check: CheckState) -> ListResult<()> {
        self.surface.set_check_state(index, check)
    }

    /// Indices of all checked (or indeterminate) items, ascending.
    pub fn checked_indices(&self) -> Vec<usize> {
        self.surface
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.check_state().is_checked())
            .map(|(i, _)| i)
            .collect()
    }

    // ==== packed bits ====

    /// The check states packed into a `u64`, bit `i` for item `i`.
    ///
    /// Only available for lists of at most 64 items; indeterminate counts
    /// as checked.
    pub fn checked_bits(&self) -> ListResult<u64> {
        let len = self.surface.items().len();
        if len > 64 {
            return Err(ListError::BitSetOverflow { len });
        }
        let mut bits = 0u64;
        for (i, item) in self.surface.items().iter().enumerate() {
            if item.check_state().is_checked() {
                bits |= 1 << i;
            }
        }
        Ok(bits)
    }

    /// Set every item's check state from a packed `u64`. Bits beyond the
    /// item count are ignored.
    pub fn set_checked_bits(&mut self, bits: u64) -> ListResult<()> {
        let len = self.surface.items().len();
        if len > 64 {
            return Err(ListError::BitSetOverflow { len });
        }
        for i in 0..len {
            let check = CheckState::from(bits & (1 << i) != 0);
            self.surface.set_check_state(i, check)?;
        }
        Ok(())
    }

    // ==== signals ====

    pub fn check_state_changed(&self) -> &Signal<usize> {
        self.surface.check_state_changed()
    }

    pub fn item_activated(&self) -> &Signal<usize> {
        self.surface.item_activated()
    }

    // ==== escape hatch ====

    pub fn surface(&self) -> &ListSurface<H, IndependentPolicy> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut ListSurface<H, IndependentPolicy> {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockHost;

    fn list_of(n: usize) -> CheckBoxList<MockHost> {
        let mut list = CheckBoxList::new(MockHost::new());
        list.surface_mut().suspend_layout();
        for i in 0..n {
            list.add_item(ListItem::new(format!("item {i}")));
        }
        list.surface_mut().resume_layout();
        list
    }

    #[test]
    fn test_checked_bits_round_trip() {
        let mut list = list_of(5);
        for i in [0, 2, 4] {
            list.set_check_state(i, CheckState::Checked).unwrap();
        }
        // Pattern 10101 reads as 21.
        assert_eq!(list.checked_bits().unwrap(), 0b10101);
        assert_eq!(list.checked_indices(), vec![0, 2, 4]);

        list.set_checked_bits(0b00110).unwrap();
        assert_eq!(list.checked_indices(), vec![1, 2]);
        assert!(!list.is_checked(0).unwrap());
    }

    #[test]
    fn test_checked_bits_overflow() {
        let list = list_of(65);
        assert!(matches!(
            list.checked_bits(),
            Err(ListError::BitSetOverflow { len: 65 })
        ));
    }

    #[test]
    fn test_indeterminate_counts_as_checked() {
        let mut list = list_of(2);
        list.set_three_state(true);
        list.set_check_state(1, CheckState::Indeterminate).unwrap();
        assert_eq!(list.checked_bits().unwrap(), 0b10);
        assert!(list.is_checked(1).unwrap());
    }
}
