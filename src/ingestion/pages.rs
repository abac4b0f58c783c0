//! Splits raw document text into pages.

use crate::types::PageText;

/// Splits `text` into pages on form-feed characters, numbering from 1.
///
/// Extractors that flatten a paginated document into one string mark page
/// boundaries with `\x0c`. A document without form feeds is a single page.
/// Empty pages keep their number so later pages stay correctly attributed.
pub fn paginate(text: &str) -> Vec<PageText> {
    text.split('\x0c')
        .enumerate()
        .map(|(index, page)| PageText::from_text(index as u32 + 1, page))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_form_feeds_is_one_page() {
        let pages = paginate("1. Theft\nStealing is bad.");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].lines, vec!["1. Theft", "Stealing is bad."]);
    }

    #[test]
    fn form_feeds_split_and_number_pages() {
        let pages = paginate("first\x0csecond\x0cthird");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[2].lines, vec!["third"]);
    }

    #[test]
    fn empty_pages_keep_their_position() {
        let pages = paginate("a\x0c\x0cc");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].lines, vec![""]);
        assert_eq!(pages[2].number, 3);
    }

    #[test]
    fn empty_input_is_one_empty_page() {
        let pages = paginate("");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines, vec![""]);
    }
}
