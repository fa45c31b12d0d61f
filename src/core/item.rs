//! Selectable items and their ordering
//!
//! Anything shown in the picker implements [`Item`]: a short key used to align
//! descriptions, a rendered line, and a strict weak order. Meta-actions the
//! navigator injects into a list are [`Sentinel`]s, carried alongside real
//! entries by [`Choice`].

use std::borrow::Cow;
use std::cmp::Ordering;

/// An entity that can be presented as one line of a single-selection list.
///
/// The intended rendering is
///
/// ```text
/// key     longer description of the item
/// ```
///
/// where every key is padded to the widest key of the list so descriptions
/// line up.
pub trait Item {
    /// Short identifier, used for width computation. May be empty.
    fn key(&self) -> Cow<'_, str>;

    /// Render the line for this item given the widest key in its list.
    ///
    /// Must be deterministic for the same item and width.
    fn menu_line(&self, key_width: usize) -> Vec<u8>;

    /// Strict weak order: irreflexive and transitive.
    fn sorts_before(&self, other: &Self) -> bool;
}

/// Total ordering derived from [`Item::sorts_before`]; incomparable items are equal.
pub fn item_order<T: Item>(a: &T, b: &T) -> Ordering {
    if a.sorts_before(b) {
        Ordering::Less
    } else if b.sorts_before(a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Stable sort by [`Item::sorts_before`].
pub fn sort_items<T: Item>(items: &mut [T]) {
    items.sort_by(item_order);
}

/// Width of `key` in characters, as used for padding.
pub fn key_len(key: &str) -> usize {
    key.chars().count()
}

/// Meta-actions offered above the real entries of a level.
///
/// Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sentinel {
    /// Choose the container currently being displayed
    SelectCurrent,
    /// Flip visibility of hidden entries
    ToggleHidden,
}

/// One line of a navigator list: either a meta-action or a real node.
#[derive(Debug, Clone, PartialEq)]
pub enum Choice<N> {
    Meta { sentinel: Sentinel, line: String },
    Node(N),
}

impl<N> Choice<N> {
    pub fn meta(sentinel: Sentinel, line: impl Into<String>) -> Self {
        Self::Meta {
            sentinel,
            line: line.into(),
        }
    }

    pub fn is_meta(&self) -> bool {
        matches!(self, Self::Meta { .. })
    }
}

impl<N: Item> Item for Choice<N> {
    fn key(&self) -> Cow<'_, str> {
        match self {
            Self::Meta { .. } => Cow::Borrowed(""),
            Self::Node(node) => node.key(),
        }
    }

    fn menu_line(&self, key_width: usize) -> Vec<u8> {
        match self {
            Self::Meta { line, .. } => line.as_bytes().to_vec(),
            Self::Node(node) => node.menu_line(key_width),
        }
    }

    fn sorts_before(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Meta { sentinel: a, .. }, Self::Meta { sentinel: b, .. }) => a < b,
            (Self::Meta { .. }, Self::Node(_)) => true,
            (Self::Node(_), Self::Meta { .. }) => false,
            (Self::Node(a), Self::Node(b)) => a.sorts_before(b),
        }
    }
}
