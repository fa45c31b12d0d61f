//! In-memory menu hierarchy
//!
//! Categories own ordered lists of entries and sub-categories. The whole tree
//! is loaded at startup (see [`super::store`]), walked by the navigator, and
//! mutated in place.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::navigator::{Frame, Hierarchy, Node};
use crate::core::{collapse_whitespace, Item, Sentinel};
use crate::error::{DmxError, Result};

/// A leaf: something that can be chosen and output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "key")]
    pub token: String,
    pub desc: String,
    #[serde(rename = "val")]
    pub value: String,
}

impl Entry {
    pub fn new(token: impl Into<String>, desc: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            desc: desc.into(),
            value: value.into(),
        }
    }
}

/// A named group of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "key")]
    pub token: String,
    pub desc: String,
    #[serde(rename = "stuff")]
    children: Vec<MenuItem>,
}

/// Either kind of menu item. A record carrying `val` is an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuItem {
    Entry(Entry),
    Category(Category),
}

impl MenuItem {
    pub fn token(&self) -> &str {
        match self {
            Self::Entry(e) => &e.token,
            Self::Category(c) => &c.token,
        }
    }

    pub fn desc(&self) -> &str {
        match self {
            Self::Entry(e) => &e.desc,
            Self::Category(c) => &c.desc,
        }
    }

    pub fn is_category(&self) -> bool {
        matches!(self, Self::Category(_))
    }
}

/// Categories first, then by token
fn kind_then_token(a_category: bool, a_token: &str, b_category: bool, b_token: &str) -> Ordering {
    b_category
        .cmp(&a_category)
        .then_with(|| a_token.cmp(b_token))
}

impl Category {
    pub fn new(token: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            desc: desc.into(),
            children: Vec::new(),
        }
    }

    /// The implicit category holding a document's top-level items
    pub fn base(children: Vec<MenuItem>) -> Self {
        Self {
            token: String::new(),
            desc: "Base Category".to_string(),
            children,
        }
    }

    pub fn children(&self) -> &[MenuItem] {
        &self.children
    }

    /// Append without checking for duplicates
    pub fn push(&mut self, item: MenuItem) {
        self.children.push(item);
    }

    /// Add a child, refusing a token already used at this level
    pub fn insert(&mut self, item: MenuItem) -> Result<()> {
        if self.children.iter().any(|c| c.token() == item.token()) {
            return Err(DmxError::invalid(format!(
                "'{}' already exists in '{}'",
                item.token(),
                self.token
            )));
        }
        self.children.push(item);
        Ok(())
    }

    /// Category at `path` (child indices from here); empty path is `self`
    pub fn get(&self, path: &[usize]) -> Option<&Category> {
        path.iter().try_fold(self, |cat, &index| match cat.children.get(index) {
            Some(MenuItem::Category(child)) => Some(child),
            _ => None,
        })
    }

    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut Category> {
        path.iter()
            .try_fold(self, |cat, &index| match cat.children.get_mut(index) {
                Some(MenuItem::Category(child)) => Some(child),
                _ => None,
            })
    }

    /// Remove child `index` of the category at `parent`
    pub fn remove(&mut self, parent: &[usize], index: usize) -> Option<MenuItem> {
        let cat = self.get_mut(parent)?;
        if index < cat.children.len() {
            Some(cat.children.remove(index))
        } else {
            None
        }
    }

    /// Sort every level: categories first, then by token
    pub fn sort_recursive(&mut self) {
        self.children.sort_by(|a, b| {
            kind_then_token(a.is_category(), a.token(), b.is_category(), b.token())
        });
        for child in &mut self.children {
            if let MenuItem::Category(cat) = child {
                cat.sort_recursive();
            }
        }
    }

    /// Number of entries in the whole subtree
    pub fn entry_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| match c {
                MenuItem::Entry(_) => 1,
                MenuItem::Category(cat) => cat.entry_count(),
            })
            .sum()
    }
}

/// A menu item as listed by the navigator: position plus display data
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    index: usize,
    category: bool,
    token: String,
    desc: String,
    key: String,
}

impl MenuNode {
    /// Key and description are flattened to one line; the token stays raw.
    fn new(index: usize, item: &MenuItem, separator: &str) -> Self {
        let mut key = collapse_whitespace(item.token());
        if item.is_category() {
            key.push_str(separator);
        }
        Self {
            index,
            category: item.is_category(),
            token: item.token().to_string(),
            desc: collapse_whitespace(item.desc()),
            key,
        }
    }

    /// Position within the parent's children
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Item for MenuNode {
    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.key)
    }

    fn menu_line(&self, key_width: usize) -> Vec<u8> {
        format!("{:<key_width$}    {}\n", self.key, self.desc).into_bytes()
    }

    fn sorts_before(&self, other: &Self) -> bool {
        kind_then_token(self.category, &self.token, other.category, &other.token) == Ordering::Less
    }
}

impl Node for MenuNode {
    fn name(&self) -> &str {
        &self.token
    }

    fn is_container(&self) -> bool {
        self.category
    }
}

/// Navigator view over a category tree. Locations are child-index paths.
pub struct MenuHierarchy<'a> {
    root: &'a Category,
    separator: String,
    hidden_marker: char,
}

impl<'a> MenuHierarchy<'a> {
    pub fn new(root: &'a Category, separator: impl Into<String>) -> Self {
        Self {
            root,
            separator: separator.into(),
            hidden_marker: '.',
        }
    }

    pub fn hidden_marker(mut self, marker: char) -> Self {
        self.hidden_marker = marker;
        self
    }
}

impl Hierarchy for MenuHierarchy<'_> {
    type Node = MenuNode;
    type Location = Vec<usize>;

    fn start(&self, prompt: &str) -> Vec<Frame<Vec<usize>>> {
        vec![Frame::new(Vec::new(), prompt)]
    }

    fn children(&self, at: &Vec<usize>) -> Result<Vec<MenuNode>> {
        let cat = self
            .root
            .get(at)
            .ok_or_else(|| DmxError::invalid(format!("no category at {:?}", at)))?;
        Ok(cat
            .children
            .iter()
            .enumerate()
            .map(|(index, item)| MenuNode::new(index, item, &self.separator))
            .collect())
    }

    fn descend(&self, at: &Vec<usize>, child: &MenuNode) -> Vec<usize> {
        let mut location = at.clone();
        location.push(child.index);
        location
    }

    fn child_prompt(&self, prompt: &str, child: &MenuNode, _location: &Vec<usize>) -> String {
        format!("{}{}", prompt, child.key)
    }

    fn sentinel_line(&self, sentinel: Sentinel, show_hidden: bool) -> String {
        match sentinel {
            Sentinel::SelectCurrent => format!("{} [ choose current category ]", self.separator),
            Sentinel::ToggleHidden if show_hidden => {
                format!("{} [ hide hidden entries ]", self.hidden_marker)
            }
            Sentinel::ToggleHidden => format!("{} [ show hidden entries ]", self.hidden_marker),
        }
    }
}
