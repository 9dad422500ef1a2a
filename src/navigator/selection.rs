// SelectionList - fixed list of items with exactly one selected

use serde::Serialize;

/// Number of items in the list
pub const ITEM_COUNT: usize = 3;

/// One list entry and its selection flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionList {
    items: [ListItem; ITEM_COUNT],
}

impl SelectionList {
    /// List with the first item selected
    pub fn new() -> Self {
        let mut items = [ListItem { selected: false }; ITEM_COUNT];
        items[0].selected = true;
        Self { items }
    }

    pub fn items(&self) -> &[ListItem; ITEM_COUNT] {
        &self.items
    }

    /// Index of the single selected item
    pub fn selected(&self) -> usize {
        self.items.iter().position(|item| item.selected).unwrap_or(0)
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|item| item.selected).count()
    }

    /// Move the selection to `index` (mod ITEM_COUNT) in one step
    pub fn select(&mut self, index: usize) {
        let index = index % ITEM_COUNT;
        for (i, item) in self.items.iter_mut().enumerate() {
            item.selected = i == index;
        }
    }

    /// Select the previous item, wrapping to the last
    pub fn select_previous(&mut self) -> usize {
        let next = (self.selected() + ITEM_COUNT - 1) % ITEM_COUNT;
        self.select(next);
        next
    }

    /// Select the next item, wrapping to the first
    pub fn select_next(&mut self) -> usize {
        let next = (self.selected() + 1) % ITEM_COUNT;
        self.select(next);
        next
    }
}

impl Default for SelectionList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_item_selected_initially() {
        let list = SelectionList::new();
        assert_eq!(list.selected(), 0);
        assert_eq!(list.selected_count(), 1);
        let flags: Vec<bool> = list.items().iter().map(|item| item.selected).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn test_wraparound_both_ways() {
        let mut list = SelectionList::new();
        assert_eq!(list.select_previous(), 2);
        assert_eq!(list.select_next(), 0);
        assert_eq!(list.select_next(), 1);
        assert_eq!(list.select_next(), 2);
        assert_eq!(list.select_next(), 0);
    }

    #[test]
    fn test_exactly_one_selected_after_every_move() {
        let mut list = SelectionList::new();
        for step in 0..20 {
            if step % 3 == 0 {
                list.select_previous();
            } else {
                list.select_next();
            }
            assert_eq!(list.selected_count(), 1);
        }
    }
}
