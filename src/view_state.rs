//! View State
//!
//! List/detail mode, page cursor and category filter of one screen, plus a
//! generation counter so a superseded response never overwrites newer state.

use crate::pagination::{check_page, paginate, PageCheck};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Detail(u32),
}

/// Issued by `begin_fetch`; only the most recent ticket may apply results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Outcome of handing a fetched list to the view
#[derive(Debug, Clone, PartialEq)]
pub enum Applied<T> {
    /// A newer fetch was started; the response was dropped
    Stale,
    /// The current page vanished; page is now 1 and the caller must refetch
    Reset,
    /// Items to render for the current page
    Show(Vec<T>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub mode: Mode,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub category: Option<u32>,
    generation: u64,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            mode: Mode::List,
            page: 1,
            page_size,
            total_pages: 0,
            category: None,
            generation: 0,
        }
    }

    pub fn selected(&self) -> Option<u32> {
        match self.mode {
            Mode::Detail(id) => Some(id),
            Mode::List => None,
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket(self.generation)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Paginate a freshly fetched list into the current page.
    pub fn apply_results<T: Clone>(&mut self, ticket: FetchTicket, items: &[T]) -> Applied<T> {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }
        let page = paginate(items, self.page, self.page_size);
        self.total_pages = page.total_pages;
        match check_page(self.page, self.total_pages) {
            PageCheck::ResetToFirst => {
                self.page = 1;
                Applied::Reset
            }
            PageCheck::InRange => Applied::Show(page.visible),
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// List -> Detail
    pub fn select(&mut self, id: u32) {
        self.mode = Mode::Detail(id);
    }

    /// Detail -> List
    pub fn back(&mut self) {
        self.mode = Mode::List;
    }

    /// The article `id` could not be loaded. Returns true if the view fell
    /// back to the list.
    pub fn resolve_failed(&mut self, id: u32) -> bool {
        if self.mode == Mode::Detail(id) {
            self.mode = Mode::List;
            true
        } else {
            false
        }
    }

    /// Filter change: page 1, and a detail view returns to the list.
    pub fn choose_category(&mut self, category: Option<u32>) {
        self.category = category;
        self.page = 1;
        self.mode = Mode::List;
    }

    /// "Go home": no selection, no filter, first page.
    pub fn reset(&mut self) {
        self.mode = Mode::List;
        self.category = None;
        self.page = 1;
    }

    /// Re-derive the mode from a URL's content id (back/forward).
    pub fn sync_from_path(&mut self, selected: Option<u32>) {
        self.mode = match selected {
            Some(id) => Mode::Detail(id),
            None => Mode::List,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: u32) -> Vec<u32> {
        (1..=n).collect()
    }

    #[test]
    fn test_show_current_page() {
        let mut state = ViewState::new(12);
        let ticket = state.begin_fetch();
        assert_eq!(state.apply_results(ticket, &items(20)), Applied::Show((1..=12).collect()));
        assert_eq!(state.total_pages, 2);

        state.set_page(2);
        let ticket = state.begin_fetch();
        assert_eq!(state.apply_results(ticket, &items(20)), Applied::Show((13..=20).collect()));
    }

    #[test]
    fn test_out_of_range_resets_exactly_once() {
        let mut state = ViewState::new(12);
        state.set_page(3);

        // Filter shrinks the list to a single page
        let ticket = state.begin_fetch();
        assert_eq!(state.apply_results(ticket, &items(5)), Applied::Reset);
        assert_eq!(state.page, 1);

        let ticket = state.begin_fetch();
        assert_eq!(state.apply_results(ticket, &items(5)), Applied::Show(items(5)));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_empty_list_is_not_a_reset() {
        let mut state = ViewState::new(12);
        state.set_page(4);
        let ticket = state.begin_fetch();
        assert_eq!(state.apply_results::<u32>(ticket, &[]), Applied::Show(vec![]));
        assert_eq!(state.total_pages, 0);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = ViewState::new(10);
        let old = state.begin_fetch();
        let new = state.begin_fetch();
        assert_eq!(state.apply_results(old, &items(3)), Applied::Stale);
        assert_eq!(state.total_pages, 0);
        assert_eq!(state.apply_results(new, &items(3)), Applied::Show(items(3)));
    }

    #[test]
    fn test_category_change_from_detail_returns_to_list() {
        let mut state = ViewState::new(12);
        state.set_page(2);
        state.select(9);
        state.choose_category(Some(4));
        assert_eq!(state.mode, Mode::List);
        assert_eq!(state.page, 1);
        assert_eq!(state.category, Some(4));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = ViewState::new(12);
        state.choose_category(Some(2));
        state.set_page(3);
        state.select(5);
        state.reset();
        assert_eq!(state.selected(), None);
        assert_eq!(state.category, None);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_resolve_failed_only_for_selected_item() {
        let mut state = ViewState::new(12);
        state.select(5);
        assert!(!state.resolve_failed(6));
        assert_eq!(state.mode, Mode::Detail(5));
        assert!(state.resolve_failed(5));
        assert_eq!(state.mode, Mode::List);
    }

    #[test]
    fn test_sync_from_path() {
        let mut state = ViewState::new(12);
        state.sync_from_path(Some(42));
        assert_eq!(state.selected(), Some(42));
        state.sync_from_path(None);
        assert_eq!(state.mode, Mode::List);
    }
}
