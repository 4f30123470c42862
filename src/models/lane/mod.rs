// Lane module
// Lanes and the per-tab calendar structure

use serde::{Deserialize, Serialize};

use super::timed_item::TimedItem;

/// A named track of intervals. All items share the same `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lane {
    pub items: Vec<TimedItem>,
}

impl Lane {
    pub fn new(items: Vec<TimedItem>) -> Self {
        Self { items }
    }

    /// The lane is identified by its first item's id.
    pub fn id(&self) -> Option<&str> {
        self.items.first().map(|item| item.id.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.items.first().map(|item| item.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_patient(&self) -> bool {
        self.items.first().is_some_and(TimedItem::is_patient)
    }
}

impl From<Vec<TimedItem>> for Lane {
    fn from(items: Vec<TimedItem>) -> Self {
        Self::new(items)
    }
}

/// Every lane of one scheduling tab, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarStructure {
    pub lanes: Vec<Lane>,
}

impl CalendarStructure {
    pub fn new(lanes: Vec<Lane>) -> Self {
        Self { lanes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// All items across lanes, in lane order.
    pub fn items(&self) -> impl Iterator<Item = &TimedItem> {
        self.lanes.iter().flat_map(|lane| lane.items.iter())
    }

    /// Owned flat copy of every item.
    pub fn flatten(&self) -> Vec<TimedItem> {
        self.items().cloned().collect()
    }

    pub fn find_item(&self, id: &str) -> Option<&TimedItem> {
        self.items().find(|item| item.id == id)
    }

    pub fn lane_by_id(&self, id: &str) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.id() == Some(id))
    }

    pub fn lane_by_name(&self, name: &str) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.name() == Some(name))
    }
}

impl From<Vec<Vec<TimedItem>>> for CalendarStructure {
    fn from(lanes: Vec<Vec<TimedItem>>) -> Self {
        Self::new(lanes.into_iter().map(Lane::from).collect())
    }
}
