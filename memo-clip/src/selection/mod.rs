//! Selections over a parsed page
//!
//! Mirrors the shape of a browser selection closely enough for capture to
//! work the same way: a [`Selection`] holds zero or more [`Range`]s, each made
//! of two [`BoundaryPoint`]s. A boundary point sits inside a container node at
//! an offset, counted in chars for text containers and in children for element
//! containers.
//!
//! Outside a browser a selection is usually described by [`TextOffsets`] into
//! the body's text, and resolved against a [`Page`] into tight boundary points
//! (start at the beginning of the next text run, end at the end of the
//! previous one, like a find-in-page highlight).

mod clone;
pub mod page;
pub mod snapshot;

pub use page::{Page, TextRun};
pub use snapshot::{CommonAncestor, SelectionSnapshot};

use crate::dom::{Fragment, Node, NodePath};
use crate::error::ClipError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A position in the document: a container node and an offset inside it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    pub container: NodePath,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(container: NodePath, offset: usize) -> Self {
        BoundaryPoint { container, offset }
    }

    /// Document-order key: before child `k` sorts below anything inside child `k`
    fn order_key(&self) -> Vec<usize> {
        let mut key = self.container.indices().to_vec();
        key.push(self.offset);
        key
    }
}

impl PartialOrd for BoundaryPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BoundaryPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

/// A contiguous stretch of the document between two boundary points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    start: BoundaryPoint,
    end: BoundaryPoint,
}

impl Range {
    /// Build a range checked against `page`: both points must resolve and be in order
    pub fn new(page: &Page, start: BoundaryPoint, end: BoundaryPoint) -> Result<Self, ClipError> {
        for point in [&start, &end] {
            let node = page.resolve(&point.container).ok_or_else(|| {
                ClipError::InvalidSelection(format!("no node at {}", point.container))
            })?;
            if point.offset > node.len() {
                return Err(ClipError::InvalidSelection(format!(
                    "offset {} past the end of {} (length {})",
                    point.offset,
                    point.container,
                    node.len()
                )));
            }
        }
        if start > end {
            return Err(ClipError::InvalidSelection(
                "range start comes after its end".to_string(),
            ));
        }
        Ok(Range { start, end })
    }

    pub fn start(&self) -> &BoundaryPoint {
        &self.start
    }

    pub fn end(&self) -> &BoundaryPoint {
        &self.end
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Deepest node containing both boundary containers
    pub fn common_ancestor_container(&self) -> NodePath {
        self.start.container.common_ancestor(&self.end.container)
    }

    /// Whether the range starts and ends in different container nodes
    pub fn crosses_containers(&self) -> bool {
        self.start.container != self.end.container
    }

    /// Deep copy of everything inside the range; partially selected
    /// elements are copied shallow, holding only their selected part
    pub fn clone_contents(&self, page: &Page) -> Fragment {
        Fragment::new(clone::contents_between(
            page.nodes(),
            &self.common_ancestor_container(),
            &self.start,
            &self.end,
        ))
    }
}

/// Char offsets into the concatenated text of the page body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextOffsets {
    pub start: usize,
    pub end: usize,
}

impl TextOffsets {
    pub fn new(start: usize, end: usize) -> Self {
        TextOffsets { start, end }
    }
}

/// The user's current selection: usually zero or one range
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<Range>,
}

impl Selection {
    /// A selection with no ranges (nothing selected)
    pub fn empty() -> Self {
        Selection::default()
    }

    pub fn from_range(range: Range) -> Self {
        Selection {
            ranges: vec![range],
        }
    }

    /// Select the characters between two body-text offsets
    pub fn from_offsets(page: &Page, offsets: TextOffsets) -> Result<Self, ClipError> {
        let runs = page.text_runs();
        let total = runs.last().map_or(0, TextRun::end);
        if offsets.start > offsets.end || offsets.end > total {
            return Err(ClipError::InvalidSelection(format!(
                "offsets {}..{} do not fit a body text of {} chars",
                offsets.start, offsets.end, total
            )));
        }
        if runs.is_empty() {
            let body = page.body_path().clone();
            let point = BoundaryPoint::new(body, 0);
            return Ok(Self::from_range(Range::new(page, point.clone(), point)?));
        }

        let start = runs
            .iter()
            .find(|run| offsets.start < run.end())
            .or_else(|| runs.last())
            .map(|run| BoundaryPoint::new(run.path.clone(), offsets.start.min(run.end()) - run.start));
        let end = runs
            .iter()
            .find(|run| offsets.end <= run.end())
            .map(|run| BoundaryPoint::new(run.path.clone(), offsets.end.max(run.start) - run.start));

        match (start, end) {
            // A caret between two runs must not straddle them backwards.
            (Some(_), Some(end)) if offsets.start == offsets.end => {
                Ok(Self::from_range(Range::new(page, end.clone(), end)?))
            }
            (Some(start), Some(end)) => Ok(Self::from_range(Range::new(page, start, end)?)),
            _ => Err(ClipError::InvalidSelection(
                "offsets do not land in any text run".to_string(),
            )),
        }
    }

    /// Select the first occurrence of `needle` in the body text
    pub fn find(page: &Page, needle: &str) -> Result<Self, ClipError> {
        let text: String = page
            .text_runs()
            .iter()
            .filter_map(|run| page.resolve(&run.path))
            .map(Node::text_content)
            .collect();
        let byte_start = text
            .find(needle)
            .ok_or_else(|| ClipError::InvalidSelection(format!("text '{needle}' not found")))?;
        let start = text[..byte_start].chars().count();
        let end = start + needle.chars().count();
        Self::from_offsets(page, TextOffsets::new(start, end))
    }

    /// Select the whole body
    pub fn all(page: &Page) -> Result<Self, ClipError> {
        let body = page.body_path().clone();
        let len = page.body().map_or(0, Node::len);
        let range = Range::new(
            page,
            BoundaryPoint::new(body.clone(), 0),
            BoundaryPoint::new(body, len),
        )?;
        Ok(Self::from_range(range))
    }

    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn range_at(&self, index: usize) -> Option<&Range> {
        self.ranges.get(index)
    }
}

/// The live context capture reads the current selection from
pub trait SelectionSource {
    /// Number of ranges in the current selection
    fn range_count(&self) -> usize;

    /// Freeze the range at `index`: clone its contents and record the
    /// structural facts the formatting detector needs
    fn snapshot(&self, index: usize) -> Option<SelectionSnapshot>;
}

/// A page together with the selection made on it
#[derive(Debug, Clone, Copy)]
pub struct PageSelection<'a> {
    pub page: &'a Page,
    pub selection: &'a Selection,
}

impl<'a> PageSelection<'a> {
    pub fn new(page: &'a Page, selection: &'a Selection) -> Self {
        PageSelection { page, selection }
    }
}

impl SelectionSource for PageSelection<'_> {
    fn range_count(&self) -> usize {
        self.selection.range_count()
    }

    fn snapshot(&self, index: usize) -> Option<SelectionSnapshot> {
        let range = self.selection.range_at(index)?;
        Some(SelectionSnapshot::from_range(self.page, range))
    }
}
