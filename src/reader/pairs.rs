//! Dual mode: spread view-models and pair page numbering.
//!
//! The server precomputes `page_pairs`: ordered groups of one or two
//! image ids, two-element groups pre-ordered right-page-first (spreads
//! always read right-to-left). Singleton groups are covers, double-page
//! spreads, or filler pages and render centered. This module turns a
//! pair into a [`Spread`] layout and computes the 1-indexed page number
//! a pair starts at.

/// How one spread renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spread {
    /// A lone page, centered (cover, double-page spread, filler).
    Centered(String),
    /// Two facing pages. The server sends the right page first.
    Facing {
        right: String,
        left: String,
    },
}

impl Spread {
    /// Builds a spread from one server pair group.
    ///
    /// Returns `None` for empty groups, which the server never produces.
    pub fn from_pair(pair: &[String]) -> Option<Spread> {
        match pair {
            [single] => Some(Spread::Centered(single.clone())),
            [right, left, ..] => Some(Spread::Facing {
                right: right.clone(),
                left: left.clone(),
            }),
            [] => None,
        }
    }

    /// Number of pages in this spread.
    pub fn page_span(&self) -> usize {
        match self {
            Spread::Centered(_) => 1,
            Spread::Facing { .. } => 2,
        }
    }
}

/// 1-indexed page number of the first page in the pair at `index`: one
/// plus the lengths of every preceding pair.
///
/// # Examples
///
/// ```rust
/// use yomu::reader::pairs::pair_start_page;
///
/// let pairs: Vec<Vec<String>> = vec![
///     vec!["cover".into()],
///     vec!["p2".into(), "p1".into()],
///     vec!["p4".into(), "p3".into()],
/// ];
/// assert_eq!(pair_start_page(&pairs, 0), 1);
/// assert_eq!(pair_start_page(&pairs, 1), 2);
/// assert_eq!(pair_start_page(&pairs, 2), 4);
/// ```
pub fn pair_start_page(pairs: &[Vec<String>], index: usize) -> usize {
    1 + pairs.iter().take(index).map(Vec::len).sum::<usize>()
}

/// Index of the pair containing the 1-indexed `page`, for restoring the
/// position after an offset-toggle reload.
pub fn pair_for_page(pairs: &[Vec<String>], page: usize) -> Option<usize> {
    let mut first = 1;
    for (index, pair) in pairs.iter().enumerate() {
        let next = first + pair.len();
        if page >= first && page < next {
            return Some(index);
        }
        first = next;
    }
    None
}
