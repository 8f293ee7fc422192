//! Fixed-size pages over the flat question list, used by the marker strip.

use std::ops::Range;

pub const NAV_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

pub fn total_pages(question_count: usize) -> usize {
    question_count.div_ceil(NAV_PAGE_SIZE)
}

pub fn page_of(index: usize) -> usize {
    index / NAV_PAGE_SIZE
}

/// Question indices shown on `page`. Empty when the page is past the end.
pub fn page_range(page: usize, question_count: usize) -> Range<usize> {
    let start = page.saturating_mul(NAV_PAGE_SIZE).min(question_count);
    let end = (start + NAV_PAGE_SIZE).min(question_count);
    start..end
}

pub fn has_previous_page(page: usize) -> bool {
    page > 0
}

pub fn has_next_page(page: usize, question_count: usize) -> bool {
    page + 1 < total_pages(question_count)
}

/// The page reached by moving one step in `direction`, if it exists.
pub fn step(page: usize, direction: PageDirection, question_count: usize) -> Option<usize> {
    match direction {
        PageDirection::Previous => page.checked_sub(1),
        PageDirection::Next if has_next_page(page, question_count) => Some(page + 1),
        PageDirection::Next => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_questions_fit_one_page() {
        assert_eq!(total_pages(20), 1);
        assert_eq!(page_range(0, 20), 0..20);
        assert!(!has_next_page(0, 20));
    }

    #[test]
    fn twenty_first_question_spills_onto_second_page() {
        assert_eq!(total_pages(21), 2);
        assert_eq!(page_range(1, 21).len(), 1);
        assert_eq!(page_range(1, 21), 20..21);
        assert!(has_next_page(0, 21));
    }

    #[test]
    fn page_of_index_boundaries() {
        assert_eq!(page_of(0), 0);
        assert_eq!(page_of(19), 0);
        assert_eq!(page_of(20), 1);
        assert_eq!(page_of(45), 2);
    }

    #[test]
    fn step_stays_inside_bounds() {
        assert_eq!(step(0, PageDirection::Previous, 50), None);
        assert_eq!(step(0, PageDirection::Next, 50), Some(1));
        assert_eq!(step(2, PageDirection::Next, 50), None);
        assert_eq!(step(2, PageDirection::Previous, 50), Some(1));
    }

    #[test]
    fn range_past_the_end_is_empty() {
        assert!(page_range(3, 21).is_empty());
        assert_eq!(total_pages(0), 0);
    }
}
