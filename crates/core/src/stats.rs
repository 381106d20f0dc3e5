//! Aggregation over nomination records.
//!
//! Everything here is a pure function over an in-memory slice of records.
//! Stats are recomputed on demand - at this scale a full pass is cheaper than
//! any cache invalidation scheme, so nothing is memoized.

use std::collections::HashMap;

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::types::{Nomination, Status};

/// Entries shown per grouping on the public results page.
pub const RESULTS_TOP_N: usize = 10;
/// Entries shown on the live city leaderboard.
pub const CITY_LEADERBOARD_TOP_N: usize = 3;
/// Entries shown on the admin dashboard city chart.
pub const DASHBOARD_CHART_TOP_N: usize = 5;

/// Normalize a dish name for grouping: trim, lowercase, then title-case each
/// whitespace-separated token.
///
/// This keys `"PAMONHA "` and `"pamonha"` to the same bucket while producing a
/// display-ready string. Normalizing an already-normalized name yields the same
/// name (idempotent), which keeps grouping deterministic.
#[must_use]
pub fn normalize_dish_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A single grouped count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub name: String,
    pub count: u64,
}

/// Counts grouped by a string key, preserving first-encounter order.
///
/// Encounter order is what makes [`GroupCounts::top_n`] deterministic: the sort
/// is stable, so ties keep the order in which keys first appeared in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupCounts {
    entries: Vec<CountEntry>,
    index: HashMap<String, usize>,
}

impl GroupCounts {
    /// Count one occurrence of `key`.
    pub fn add(&mut self, key: &str) {
        if let Some(&pos) = self.index.get(key) {
            if let Some(entry) = self.entries.get_mut(pos) {
                entry.count += 1;
            }
        } else {
            self.index.insert(key.to_owned(), self.entries.len());
            self.entries.push(CountEntry {
                name: key.to_owned(),
                count: 1,
            });
        }
    }

    /// Count for a key, if it was ever seen.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<u64> {
        self.index
            .get(key)
            .and_then(|&pos| self.entries.get(pos))
            .map(|entry| entry.count)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &CountEntry> {
        self.entries.iter()
    }

    /// The `n` highest counts, sorted descending.
    ///
    /// The sort is stable: entries with equal counts keep their encounter order.
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<CountEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted.truncate(n);
        sorted
    }
}

impl Serialize for GroupCounts {
    /// Serializes as a JSON object `{key: count, ...}`, matching the persisted
    /// stats layout.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.count)?;
        }
        map.end()
    }
}

/// Derived statistics over the full record set.
///
/// The grouping maps intentionally count ALL statuses - the moderation dashboard
/// wants visibility into pending and rejected volume too.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NominationStats {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub rejected: u64,
    pub by_city: GroupCounts,
    pub by_dish: GroupCounts,
    pub by_restaurant: GroupCounts,
}

/// Compute statistics in a single pass over `records`.
#[must_use]
pub fn compute_stats(records: &[Nomination]) -> NominationStats {
    let mut stats = NominationStats {
        total: records.len() as u64,
        ..NominationStats::default()
    };

    for nomination in records {
        match nomination.status {
            Status::Approved => stats.approved += 1,
            Status::Pending => stats.pending += 1,
            Status::Rejected => stats.rejected += 1,
        }

        stats.by_city.add(&nomination.city);
        stats.by_dish.add(&normalize_dish_name(&nomination.dish_name));
        stats.by_restaurant.add(nomination.restaurant_name.trim());
    }

    stats
}

/// Pre-filter applied to the public results view before grouping.
#[derive(Debug, Clone, Default)]
pub struct ResultsFilter {
    /// Exact city match.
    pub city: Option<String>,
    /// Case-insensitive substring match against dish OR restaurant name.
    pub search: Option<String>,
}

impl ResultsFilter {
    fn matches(&self, nomination: &Nomination) -> bool {
        if let Some(city) = &self.city
            && nomination.city != *city
        {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_dish = nomination.dish_name.to_lowercase().contains(&needle);
            let in_restaurant = nomination.restaurant_name.to_lowercase().contains(&needle);
            if !in_dish && !in_restaurant {
                return false;
            }
        }
        true
    }
}

/// A ranked restaurant entry; carries the city of the first record encountered
/// for that restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRestaurant {
    pub name: String,
    pub city: String,
    pub count: u64,
}

/// Public results rankings: top dishes and top restaurants.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Rankings {
    pub dishes: Vec<CountEntry>,
    pub restaurants: Vec<RankedRestaurant>,
}

/// Rank APPROVED records after applying `filter`, top [`RESULTS_TOP_N`] each.
///
/// Dish grouping uses [`normalize_dish_name`]; restaurant grouping keys on the
/// exact trimmed name with no case normalization.
#[must_use]
pub fn approved_rankings(records: &[Nomination], filter: &ResultsFilter) -> Rankings {
    let mut dishes = GroupCounts::default();
    let mut restaurants: Vec<RankedRestaurant> = Vec::new();
    let mut restaurant_index: HashMap<String, usize> = HashMap::new();

    for nomination in records
        .iter()
        .filter(|n| n.status == Status::Approved && filter.matches(n))
    {
        dishes.add(&normalize_dish_name(&nomination.dish_name));

        let key = nomination.restaurant_name.trim().to_owned();
        if let Some(&pos) = restaurant_index.get(&key) {
            if let Some(entry) = restaurants.get_mut(pos) {
                entry.count += 1;
            }
        } else {
            restaurant_index.insert(key.clone(), restaurants.len());
            restaurants.push(RankedRestaurant {
                name: key,
                city: nomination.city.clone(),
                count: 1,
            });
        }
    }

    restaurants.sort_by(|a, b| b.count.cmp(&a.count));
    restaurants.truncate(RESULTS_TOP_N);

    Rankings {
        dishes: dishes.top_n(RESULTS_TOP_N),
        restaurants,
    }
}

/// Top [`CITY_LEADERBOARD_TOP_N`] cities by approved-nomination volume.
#[must_use]
pub fn city_leaderboard(records: &[Nomination]) -> Vec<CountEntry> {
    let mut cities = GroupCounts::default();
    for nomination in records.iter().filter(|n| n.status == Status::Approved) {
        cities.add(&nomination.city);
    }
    cities.top_n(CITY_LEADERBOARD_TOP_N)
}
