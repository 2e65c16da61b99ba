//! Filtering, sorting and pagination of already-loaded petitioners.

use crate::petition::Petitioner;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which text fields a filter query searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// Public supporter list: name and position.
    Public,
    /// Admin table: name, position and address.
    Admin,
}

/// Case-insensitive substring match. An empty query matches everything.
pub fn matches_query(p: &Petitioner, query: &str, scope: FilterScope) -> bool {
    if query.is_empty() {
        return true;
    }
    let q = query.to_lowercase();
    let hit = |field: &str| field.to_lowercase().contains(&q);
    hit(&p.name) || hit(&p.position) || (scope == FilterScope::Admin && hit(&p.address))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Id,
    Name,
    Position,
    Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: SortKey::Id,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortConfig {
    /// Header click: same key flips ascending → descending, anything else
    /// sorts ascending by the clicked key.
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self { key, direction }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Stable sort ascending by key; descending reverses the ascending order.
pub fn sort_petitioners(items: &mut [Petitioner], config: SortConfig) {
    items.sort_by(|a, b| match config.key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => compare_text(&a.name, &b.name),
        SortKey::Position => compare_text(&a.position, &b.position),
        SortKey::Address => compare_text(&a.address, &b.address),
    });
    if config.direction == SortDirection::Descending {
        items.reverse();
    }
}

/// One page of a listing. Pages are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub total_pages: usize,
}

pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 { 0 } else { len.div_ceil(per_page) }
}

/// Slice out page `number`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], number: usize, per_page: usize) -> Page<'_, T> {
    let start = number.saturating_sub(1).saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    Page {
        items: &items[start..end],
        number,
        total_pages: total_pages(items.len(), per_page),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    pub items_per_page: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { items_per_page: 20 }
    }
}

/// Admin table state: filter → sort → paginate.
///
/// Changing the filter or the sort jumps back to page 1.
#[derive(Debug, Clone)]
pub struct AdminView {
    records: Vec<Petitioner>,
    query: String,
    sort: SortConfig,
    page: usize,
    config: ListingConfig,
}

impl AdminView {
    pub fn new(records: Vec<Petitioner>, config: ListingConfig) -> Self {
        Self {
            records,
            query: String::new(),
            sort: SortConfig::default(),
            page: 1,
            config,
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 1;
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.sort = self.sort.toggle(key);
        self.page = 1;
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    /// Jump to `page`, clamped to the available range.
    pub fn go_to(&mut self, page: usize) {
        let last = self.total_pages().max(1);
        self.page = page.clamp(1, last);
    }

    pub fn page_number(&self) -> usize {
        self.page
    }

    /// Records matching the query, in sort order.
    pub fn processed(&self) -> Vec<Petitioner> {
        let mut items: Vec<Petitioner> = self
            .records
            .iter()
            .filter(|p| matches_query(p, &self.query, FilterScope::Admin))
            .cloned()
            .collect();
        sort_petitioners(&mut items, self.sort);
        items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.processed().len(), self.config.items_per_page)
    }

    /// Rows on the current page.
    pub fn current_page(&self) -> Vec<Petitioner> {
        let items = self.processed();
        paginate(&items, self.page, self.config.items_per_page)
            .items
            .to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: i64, name: &str, position: &str, address: &str) -> Petitioner {
        Petitioner {
            id,
            created_at: None,
            name: name.into(),
            position: position.into(),
            address: address.into(),
            signature: String::new(),
        }
    }

    fn ids(items: &[Petitioner]) -> Vec<i64> {
        items.iter().map(|p| p.id).collect()
    }

    #[test]
    fn public_filter_ignores_address() {
        let p = record(1, "Budi", "Kepala Desa", "Kab. Bogor");
        assert!(matches_query(&p, "BUDI", FilterScope::Public));
        assert!(matches_query(&p, "kepala", FilterScope::Public));
        assert!(!matches_query(&p, "bogor", FilterScope::Public));
        assert!(matches_query(&p, "bogor", FilterScope::Admin));
        assert!(matches_query(&p, "", FilterScope::Public));
    }

    #[test]
    fn toggle_flips_only_same_key() {
        let s = SortConfig::default().toggle(SortKey::Id);
        assert_eq!(s.direction, SortDirection::Descending);
        let s = s.toggle(SortKey::Id);
        assert_eq!(s.direction, SortDirection::Ascending);
        let s = s.toggle(SortKey::Name);
        assert_eq!((s.key, s.direction), (SortKey::Name, SortDirection::Ascending));
    }

    #[test]
    fn sort_by_name_case_insensitive_and_descending() {
        let mut items = vec![
            record(1, "citra", "", ""),
            record(2, "Agus", "", ""),
            record(3, "budi", "", ""),
        ];
        sort_petitioners(
            &mut items,
            SortConfig {
                key: SortKey::Name,
                direction: SortDirection::Ascending,
            },
        );
        assert_eq!(ids(&items), vec![2, 3, 1]);
        sort_petitioners(
            &mut items,
            SortConfig {
                key: SortKey::Name,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(ids(&items), vec![1, 3, 2]);
    }

    #[test]
    fn paginate_is_one_based_and_bounded() {
        let items: Vec<u32> = (0..45).collect();
        let page = paginate(&items, 3, 20);
        assert_eq!(page.items, &[40, 41, 42, 43, 44]);
        assert_eq!(page.total_pages, 3);
        assert!(paginate(&items, 4, 20).items.is_empty());
        assert_eq!(paginate(&items, 0, 20).items.len(), 20);
    }

    #[test]
    fn admin_view_resets_page_on_filter_and_sort() {
        let records: Vec<Petitioner> = (1..=45)
            .map(|i| record(i, &format!("Orang {i}"), "Staf Desa", "Kab. Garut"))
            .collect();
        let mut view = AdminView::new(records, ListingConfig::default());
        assert_eq!(view.total_pages(), 3);

        view.go_to(3);
        assert_eq!(ids(&view.current_page()), (41..=45).collect::<Vec<_>>());

        view.sort_by(SortKey::Id);
        assert_eq!(view.page_number(), 1);
        assert_eq!(view.current_page()[0].id, 45);

        view.go_to(99);
        assert_eq!(view.page_number(), 3);
        view.set_query("orang 4");
        assert_eq!(view.page_number(), 1);
        assert_eq!(ids(&view.current_page()), vec![45, 44, 43, 42, 41, 40, 4]);
    }
}
