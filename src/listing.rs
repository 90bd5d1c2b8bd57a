//! Filtering and ordering for the Projects and Photos grids.
//!
//! The browser side snapshots each grid item into one of the structs below
//! (lowercased text, `data-date` parsed to epoch milliseconds) and applies
//! the results back to the DOM: a visibility flag per item and an order in
//! which to re-append items to their grid.

use std::cmp::Ordering;

pub const ALL_FILTER: &str = "all";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectCard {
    pub tags: String,
    pub title: String,
    pub text: String,
    pub date_ms: Option<f64>,
}

impl ProjectCard {
    pub fn new(tags: &str, title: &str, text: &str, date_ms: Option<f64>) -> Self {
        Self {
            tags: tags.to_lowercase(),
            title: title.to_lowercase(),
            text: text.to_lowercase(),
            date_ms: date_ms.filter(|value| value.is_finite()),
        }
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.split_whitespace().any(|candidate| candidate == tag)
    }

    fn matches(&self, active: &str, query: &str) -> bool {
        let matches_filter = active == ALL_FILTER || self.has_tag(active);
        let matches_query = query.is_empty()
            || self.title.contains(query)
            || self.text.contains(query)
            || self.tags.contains(query);
        matches_filter && matches_query
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectSort {
    #[default]
    Featured,
    Alpha,
    Recent,
}

impl ProjectSort {
    pub fn from_str(value: &str) -> Self {
        match value {
            "alpha" => Self::Alpha,
            "recent" => Self::Recent,
            _ => Self::Featured,
        }
    }
}

/// Visibility flag per card for the active tag chip and search text.
pub fn filter_projects(cards: &[ProjectCard], active: &str, query: &str) -> Vec<bool> {
    let active = active.trim().to_lowercase();
    let query = query.trim().to_lowercase();
    cards.iter().map(|card| card.matches(&active, &query)).collect()
}

/// Indices of the visible cards in display order. Hidden cards are left out
/// and stay where they are.
pub fn project_order(cards: &[ProjectCard], visible: &[bool], mode: ProjectSort) -> Vec<usize> {
    let mut order: Vec<usize> = (0..cards.len())
        .filter(|&index| visible.get(index).copied().unwrap_or(false))
        .collect();

    match mode {
        ProjectSort::Featured => {}
        ProjectSort::Alpha => order.sort_by(|&a, &b| cards[a].title.cmp(&cards[b].title)),
        ProjectSort::Recent => {
            order.sort_by(|&a, &b| compare_dates(cards[a].date_ms, cards[b].date_ms, true))
        }
    }

    order
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhotoItem {
    pub title: String,
    pub tags: String,
    pub category: String,
    pub date_ms: Option<f64>,
}

impl PhotoItem {
    pub fn new(title: &str, tags: &str, category: &str, date_ms: Option<f64>) -> Self {
        Self {
            title: title.to_lowercase(),
            tags: tags.to_lowercase(),
            category: category.to_lowercase(),
            date_ms: date_ms.filter(|value| value.is_finite()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PhotoSort {
    #[default]
    Featured,
    Newest,
    Oldest,
}

impl PhotoSort {
    pub fn from_str(value: &str) -> Self {
        match value {
            "new" => Self::Newest,
            "old" => Self::Oldest,
            _ => Self::Featured,
        }
    }
}

/// Category chips: `all` shows everything, otherwise an exact
/// case-insensitive match on `data-category`.
pub fn filter_photos_by_category(items: &[PhotoItem], filter: &str) -> Vec<bool> {
    let filter = filter.trim().to_lowercase();
    items
        .iter()
        .map(|item| filter == ALL_FILTER || item.category == filter)
        .collect()
}

pub fn filter_photos_by_query(items: &[PhotoItem], query: &str) -> Vec<bool> {
    let query = query.to_lowercase();
    items
        .iter()
        .map(|item| query.is_empty() || item.title.contains(&query) || item.tags.contains(&query))
        .collect()
}

/// Order for all photos. `Featured` is document order; the date
/// orders are stable and put undated photos last.
pub fn photo_order(items: &[PhotoItem], mode: PhotoSort) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();

    match mode {
        PhotoSort::Featured => {}
        PhotoSort::Newest => {
            order.sort_by(|&a, &b| compare_dates(items[a].date_ms, items[b].date_ms, true))
        }
        PhotoSort::Oldest => {
            order.sort_by(|&a, &b| compare_dates(items[a].date_ms, items[b].date_ms, false))
        }
    }

    order
}

fn compare_dates(a: Option<f64>, b: Option<f64>, newest_first: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if newest_first => b.total_cmp(&a),
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
