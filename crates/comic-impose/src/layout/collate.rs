//! Collation of the front, main and back page streams
//!
//! ```text
//! [front...] [blank if front is even] [main...] [padding blanks] [back...]
//! ```
//!
//! The blank after the front matter puts the main content on an odd
//! position; the padding makes the whole sequence a multiple of four, since
//! every folded sheet carries four page faces.

use crate::constants::PAGES_PER_SHEET;
use crate::types::*;

/// Why a blank page was inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankKind {
    /// Closes an even-length front matter
    AfterFront,
    /// Pads the sequence to a multiple of four before the back matter
    Padding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceEntry<T> {
    Page(T),
    Blank(BlankKind),
}

/// The single ordered page list handed to the imposer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollatedSequence<T> {
    entries: Vec<SequenceEntry<T>>,
}

impl<T> CollatedSequence<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SequenceEntry<T>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SequenceEntry<T>> {
        self.entries
    }

    pub fn blank_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, SequenceEntry::Blank(_)))
            .count()
    }
}

/// Number of padding blanks needed so that `count` becomes a multiple of four
pub fn padding_for(count: usize) -> usize {
    (PAGES_PER_SHEET - count % PAGES_PER_SHEET) % PAGES_PER_SHEET
}

/// Merge the three streams, each sorted first, into one padded sequence.
pub fn collate<T: Ord>(
    mut front: Vec<T>,
    mut main: Vec<T>,
    mut back: Vec<T>,
) -> Result<CollatedSequence<T>> {
    front.sort();
    main.sort();
    back.sort();

    let mut entries = Vec::with_capacity(front.len() + main.len() + back.len() + 4);

    let front_even = front.len() % 2 == 0;
    entries.extend(front.into_iter().map(SequenceEntry::Page));
    if front_even {
        entries.push(SequenceEntry::Blank(BlankKind::AfterFront));
    }

    entries.extend(main.into_iter().map(SequenceEntry::Page));

    let padding = padding_for(entries.len() + back.len());
    entries.extend((0..padding).map(|_| SequenceEntry::Blank(BlankKind::Padding)));

    entries.extend(back.into_iter().map(SequenceEntry::Page));

    if entries.len() % PAGES_PER_SHEET != 0 {
        return Err(ImposeError::Invariant(format!(
            "collated sequence of {} pages is not a multiple of {PAGES_PER_SHEET}",
            entries.len()
        )));
    }

    Ok(CollatedSequence { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(prefix: char, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i:02}")).collect()
    }

    #[test]
    fn test_padding_for() {
        assert_eq!(padding_for(0), 0);
        assert_eq!(padding_for(1), 3);
        assert_eq!(padding_for(2), 2);
        assert_eq!(padding_for(3), 1);
        assert_eq!(padding_for(8), 0);
    }

    #[test]
    fn test_empty_streams_get_one_sheet() {
        // No front matter is even: one blank, then three padding blanks
        let seq = collate::<String>(vec![], vec![], vec![]).unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.entries()[0], SequenceEntry::Blank(BlankKind::AfterFront));
        assert_eq!(seq.blank_count(), 4);
    }

    #[test]
    fn test_streams_are_sorted() {
        let seq = collate(
            vec!["f2".to_string(), "f1".to_string()],
            vec!["m2".to_string(), "m1".to_string()],
            vec![],
        )
        .unwrap();
        assert_eq!(seq.entries()[0], SequenceEntry::Page("f1".to_string()));
        assert_eq!(seq.entries()[1], SequenceEntry::Page("f2".to_string()));
        assert_eq!(seq.entries()[3], SequenceEntry::Page("m1".to_string()));
    }

    #[test]
    fn test_back_matter_closes_the_sequence() {
        let seq = collate(pages('f', 1), pages('m', 1), pages('b', 1)).unwrap();
        // 1 front (odd, no blank) + 1 main + 1 back = 3 -> one padding blank
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.entries()[2], SequenceEntry::Blank(BlankKind::Padding));
        assert_eq!(seq.entries()[3], SequenceEntry::Page("b00".to_string()));
    }
}
