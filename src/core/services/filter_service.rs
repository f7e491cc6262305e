//! Time-window and text filtering over ledger entries. Filters only select
//! which entries are listed; they never change summary totals.

use crate::domain::{SearchField, Searchable, TimeWindow, Timestamped};

pub struct FilterService;

impl FilterService {
    /// Keeps entries whose age relative to `now_millis` fits inside `window`.
    /// Order is preserved and the boundary is inclusive.
    pub fn by_time<T: Timestamped>(items: &[T], window: TimeWindow, now_millis: i64) -> Vec<&T> {
        items
            .iter()
            .filter(|item| window.contains(item.timestamp(), now_millis))
            .collect()
    }

    /// Case-insensitive substring match against any of `fields`. A blank
    /// query keeps everything.
    pub fn by_text<'a, T, I>(items: I, query: &str, fields: &[SearchField]) -> Vec<&'a T>
    where
        T: Searchable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return items.into_iter().collect();
        }
        items
            .into_iter()
            .filter(|item| {
                fields.iter().any(|field| {
                    item.field_text(*field)
                        .map(|text| text.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
            })
            .collect()
    }
}
