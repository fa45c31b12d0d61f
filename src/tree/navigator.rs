//! Hierarchy navigator - turns the single-shot picker into a tree browser
//!
//! Each round lists the current container (sentinels first, then its sorted,
//! possibly filtered children) and interprets the pick:
//!
//! - cancel steps up one level; cancelling at the outermost level ends with
//!   [`Outcome::NoSelection`]
//! - a container descends into it
//! - a leaf, or the "select current" sentinel, ends navigation
//! - the "toggle hidden" sentinel redisplays the same level
//!
//! Levels are kept on an explicit stack, so depth is bounded only by memory.

use std::fmt;

use tracing::debug;

use crate::core::{select, sort_items, Choice, Item, Picker, Selection, Sentinel};
use crate::error::Result;

/// A real entry of a hierarchy level
pub trait Node: Item + Clone {
    /// Name checked against the hidden marker
    fn name(&self) -> &str;

    /// Whether choosing this node descends into it
    fn is_container(&self) -> bool;
}

/// A tree the navigator can walk
pub trait Hierarchy {
    type Node: Node;
    type Location: Clone + fmt::Debug;

    /// Levels to start from, outermost first.
    ///
    /// The navigator opens the innermost one; cancelling climbs back through
    /// the rest.
    fn start(&self, prompt: &str) -> Vec<Frame<Self::Location>>;

    /// Enumerate a container's children. Called on every visit.
    fn children(&self, at: &Self::Location) -> Result<Vec<Self::Node>>;

    /// Location of `child`, a container inside `at`
    fn descend(&self, at: &Self::Location, child: &Self::Node) -> Self::Location;

    /// Prompt shown inside `child`
    fn child_prompt(&self, prompt: &str, child: &Self::Node, location: &Self::Location) -> String;

    /// Line text for a sentinel, given current hidden-entry visibility
    fn sentinel_line(&self, sentinel: Sentinel, show_hidden: bool) -> String;
}

/// One level of the navigation stack
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<L> {
    pub location: L,
    pub prompt: String,
}

impl<L> Frame<L> {
    pub fn new(location: L, prompt: impl Into<String>) -> Self {
        Self {
            location,
            prompt: prompt.into(),
        }
    }
}

/// What the user may end navigation on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    /// Leaves only
    #[default]
    Leaves,
    /// Leaves or containers
    Any,
    /// Containers only; leaves are not listed
    Containers,
}

impl SelectMode {
    /// Whether the "select current" sentinel is offered
    pub fn can_choose_container(self) -> bool {
        matches!(self, Self::Any | Self::Containers)
    }

    /// Whether leaf entries are listed
    pub fn lists_leaves(self) -> bool {
        matches!(self, Self::Leaves | Self::Any)
    }
}

/// How navigation ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<L, N> {
    /// A leaf, with the container it was listed in
    Leaf { parent: L, node: N },
    /// A container, via the "select current" sentinel
    Container(L),
    /// Cancelled at the outermost level
    NoSelection,
}

/// Interactive tree walk over a [`Hierarchy`]
pub struct Navigator<'h, H: Hierarchy> {
    hierarchy: &'h H,
    mode: SelectMode,
    show_hidden: bool,
    hidden_marker: char,
}

impl<'h, H: Hierarchy> Navigator<'h, H> {
    pub fn new(hierarchy: &'h H, mode: SelectMode) -> Self {
        Self {
            hierarchy,
            mode,
            show_hidden: false,
            hidden_marker: '.',
        }
    }

    /// Initial visibility of hidden entries
    pub fn show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = show;
        self
    }

    /// Names starting with this character are hidden
    pub fn hidden_marker(mut self, marker: char) -> Self {
        self.hidden_marker = marker;
        self
    }

    pub fn is_showing_hidden(&self) -> bool {
        self.show_hidden
    }

    fn is_hidden(&self, node: &H::Node) -> bool {
        node.name().starts_with(self.hidden_marker)
    }

    /// The list displayed for the container at `at`
    pub fn choices(&self, at: &H::Location) -> Result<Vec<Choice<H::Node>>> {
        let mut list = Vec::new();
        if self.mode.can_choose_container() {
            list.push(Choice::meta(
                Sentinel::SelectCurrent,
                self.hierarchy
                    .sentinel_line(Sentinel::SelectCurrent, self.show_hidden),
            ));
        }
        list.push(Choice::meta(
            Sentinel::ToggleHidden,
            self.hierarchy
                .sentinel_line(Sentinel::ToggleHidden, self.show_hidden),
        ));

        list.extend(
            self.hierarchy
                .children(at)?
                .into_iter()
                .filter(|node| self.show_hidden || !self.is_hidden(node))
                .filter(|node| node.is_container() || self.mode.lists_leaves())
                .map(Choice::Node),
        );

        sort_items(&mut list);
        Ok(list)
    }

    /// Walk the hierarchy until the user chooses something or cancels out.
    pub fn run<P: Picker + ?Sized>(
        &mut self,
        picker: &P,
        prompt: &str,
    ) -> Result<Outcome<H::Location, H::Node>> {
        let mut stack = self.hierarchy.start(prompt);

        while let Some(frame) = stack.last().cloned() {
            let list = self.choices(&frame.location)?;

            match select(picker, &frame.prompt, &list)? {
                Selection::NoSelection => {
                    debug!(location = ?frame.location, "cancelled, stepping up");
                    stack.pop();
                }
                Selection::Selected(Choice::Meta { sentinel, .. }) => match sentinel {
                    Sentinel::SelectCurrent => {
                        debug!(location = ?frame.location, "container chosen");
                        return Ok(Outcome::Container(frame.location));
                    }
                    Sentinel::ToggleHidden => {
                        self.show_hidden = !self.show_hidden;
                        debug!(show_hidden = self.show_hidden, "toggled hidden entries");
                    }
                },
                Selection::Selected(Choice::Node(node)) if node.is_container() => {
                    let location = self.hierarchy.descend(&frame.location, node);
                    let prompt = self.hierarchy.child_prompt(&frame.prompt, node, &location);
                    debug!(location = ?location, "descending");
                    stack.push(Frame::new(location, prompt));
                }
                Selection::Selected(Choice::Node(node)) => {
                    debug!(key = %node.key(), "leaf chosen");
                    return Ok(Outcome::Leaf {
                        parent: frame.location,
                        node: node.clone(),
                    });
                }
            }
        }

        Ok(Outcome::NoSelection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Answer, ScriptedPicker};
    use crate::tree::menu::{Category, Entry, MenuHierarchy, MenuItem};

    fn sample() -> Category {
        let mut root = Category::new("", "Base Category");
        let mut fruit = Category::new("fruit", "things that grow");
        fruit.push(MenuItem::Entry(Entry::new("apple", "red", "APPLE")));
        fruit.push(MenuItem::Entry(Entry::new(".secret", "hidden fruit", "SECRET")));
        root.push(MenuItem::Category(fruit));
        root.push(MenuItem::Category(Category::new("empty", "nothing here")));
        root.push(MenuItem::Entry(Entry::new("1", "one", "ONE")));
        root.push(MenuItem::Entry(Entry::new("2", "two", "TWO")));
        root.push(MenuItem::Entry(Entry::new("3", "three", "THREE")));
        root
    }

    fn leaf_value(outcome: Outcome<Vec<usize>, crate::tree::menu::MenuNode>) -> String {
        match outcome {
            Outcome::Leaf { node, .. } => node.token().to_string(),
            other => panic!("expected leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_sentinels_lead_every_list() {
        let root = sample();
        let hierarchy = MenuHierarchy::new(&root, "/");
        let navigator = Navigator::new(&hierarchy, SelectMode::Any);
        let list = navigator.choices(&vec![]).unwrap();
        assert!(list[0].is_meta());
        assert!(list[1].is_meta());
        assert!(list[2..].iter().all(|c| !c.is_meta()));
    }

    #[test]
    fn test_cancel_at_root_is_no_selection() {
        let root = sample();
        let hierarchy = MenuHierarchy::new(&root, "/");
        let picker = ScriptedPicker::new([Answer::Cancel]);
        let outcome = Navigator::new(&hierarchy, SelectMode::Leaves)
            .run(&picker, "")
            .unwrap();
        assert_eq!(outcome, Outcome::NoSelection);
        assert_eq!(picker.calls().len(), 1);
    }

    #[test]
    fn test_cancel_in_child_returns_to_parent() {
        let root = sample();
        let hierarchy = MenuHierarchy::new(&root, "/");
        let picker = ScriptedPicker::new([
            Answer::containing("fruit/"),
            Answer::Cancel,
            Answer::containing("two"),
        ]);
        let outcome = Navigator::new(&hierarchy, SelectMode::Leaves)
            .run(&picker, "menu:")
            .unwrap();
        assert_eq!(leaf_value(outcome), "2");

        let prompts: Vec<String> = picker.calls().into_iter().map(|c| c.prompt).collect();
        assert_eq!(prompts, vec!["menu:", "menu:fruit/", "menu:"]);
    }

    #[test]
    fn test_toggle_hidden_reveals_entries() {
        let root = sample();
        let hierarchy = MenuHierarchy::new(&root, "/");
        let picker = ScriptedPicker::new([
            Answer::containing("fruit/"),
            Answer::containing("show hidden"),
            Answer::containing("hidden fruit"),
        ]);
        let mut navigator = Navigator::new(&hierarchy, SelectMode::Leaves);
        let outcome = navigator.run(&picker, "").unwrap();
        assert_eq!(leaf_value(outcome), ".secret");
        assert!(navigator.is_showing_hidden());

        let calls = picker.calls();
        assert!(!calls[1].lines.iter().any(|l| l.contains(".secret")));
        assert!(calls[2].lines.iter().any(|l| l.contains(".secret")));
        assert!(calls[2].lines.iter().any(|l| l.contains("hide hidden")));
    }

    #[test]
    fn test_empty_container_shows_only_sentinels() {
        let root = sample();
        let hierarchy = MenuHierarchy::new(&root, "/");
        let picker = ScriptedPicker::new([
            Answer::containing("empty/"),
            Answer::containing("show hidden"),
            Answer::Cancel,
            Answer::Cancel,
        ]);
        let outcome = Navigator::new(&hierarchy, SelectMode::Leaves)
            .run(&picker, "")
            .unwrap();
        assert_eq!(outcome, Outcome::NoSelection);

        let calls = picker.calls();
        assert_eq!(calls[1].lines, vec![". [ show hidden entries ]\n"]);
        assert_eq!(calls[2].lines, vec![". [ hide hidden entries ]\n"]);
    }

    #[test]
    fn test_container_mode_lists_no_leaves() {
        let root = sample();
        let hierarchy = MenuHierarchy::new(&root, "/");
        let picker = ScriptedPicker::new([
            Answer::containing("fruit/"),
            Answer::containing("choose current category"),
        ]);
        let outcome = Navigator::new(&hierarchy, SelectMode::Containers)
            .run(&picker, "")
            .unwrap();
        assert_eq!(outcome, Outcome::Container(vec![0]));

        let calls = picker.calls();
        assert_eq!(calls[0].lines.len(), 4);
        assert!(!calls[1].lines.iter().any(|l| l.contains("apple")));
    }

    #[test]
    fn test_leaf_mode_offers_no_select_current() {
        let root = sample();
        let hierarchy = MenuHierarchy::new(&root, "/");
        let navigator = Navigator::new(&hierarchy, SelectMode::Leaves);
        let list = navigator.choices(&vec![]).unwrap();
        assert!(!list.iter().any(|c| matches!(
            c,
            Choice::Meta {
                sentinel: Sentinel::SelectCurrent,
                ..
            }
        )));
    }
}
