//! In-memory history and favorites for callers that keep reports around.
//! Both are plain serializable values; persisting them is up to the caller.

use crate::report::AnalysisReport;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const HISTORY_LIMIT: usize = 50;

/// Recently analyzed reports, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    limit: usize,
    entries: VecDeque<AnalysisReport>,
}

impl Default for History {
    fn default() -> Self {
        History::with_limit(HISTORY_LIMIT)
    }
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        History {
            limit,
            entries: VecDeque::new(),
        }
    }

    /// Add a report at the front, evicting the oldest beyond the limit.
    pub fn record(&mut self, report: AnalysisReport) {
        self.entries.push_front(report);
        self.entries.truncate(self.limit);
    }

    pub fn latest(&self) -> Option<&AnalysisReport> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisReport> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Favorited reports, unique by product name and brand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: Vec<AnalysisReport>,
}

impl Favorites {
    pub fn new() -> Self {
        Favorites::default()
    }

    pub fn contains(&self, name: &str, brand: &str) -> bool {
        self.position(name, brand).is_some()
    }

    /// Add the report, or remove the existing favorite for the same product.
    /// Returns whether the product is a favorite afterwards.
    pub fn toggle(&mut self, report: AnalysisReport) -> bool {
        match self.position(&report.product.name, &report.product.brand) {
            Some(i) => {
                self.entries.remove(i);
                false
            }
            None => {
                self.entries.push(report);
                true
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisReport> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str, brand: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|r| r.product.name == name && r.product.brand == brand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alternatives::StaticCatalog;
    use crate::model::{NovaGroup, NutritionFacts, ProductRecord, UserProfile};
    use crate::tables::builtin::load_preset;
    use crate::{analyze_at, AnalyzeOptions};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn report(name: &str, brand: &str) -> AnalysisReport {
        let product = ProductRecord {
            name: name.into(),
            brand: brand.into(),
            category: "İçecek".into(),
            serving_size: None,
            nutrition: NutritionFacts {
                energy: Some(dec!(40)),
                protein: Some(dec!(0)),
                carbohydrates: Some(dec!(10)),
                sugar: Some(dec!(10)),
                fat: Some(dec!(0)),
                saturated_fat: Some(dec!(0)),
                fiber: None,
                salt: Some(dec!(0)),
            },
            ingredients_text: "su, şeker".into(),
            additives: vec![],
            nova_group: NovaGroup::new(3).unwrap(),
            nutri_score: None,
            confidence: None,
        };
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        analyze_at(
            &product,
            &UserProfile::default(),
            &load_preset("tr").unwrap(),
            &StaticCatalog::default(),
            &AnalyzeOptions::default(),
            at,
        )
        .unwrap()
    }

    #[test]
    fn test_history_most_recent_first() {
        let mut history = History::new();
        history.record(report("Birinci", "A"));
        history.record(report("İkinci", "A"));
        assert_eq!(history.latest().unwrap().product.name, "İkinci");
        let names: Vec<&str> = history.iter().map(|r| r.product.name.as_str()).collect();
        assert_eq!(names, vec!["İkinci", "Birinci"]);
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = History::with_limit(3);
        for i in 0..5 {
            history.record(report(&format!("Ürün {i}"), "A"));
        }
        assert_eq!(history.len(), 3);
        let names: Vec<&str> = history.iter().map(|r| r.product.name.as_str()).collect();
        assert_eq!(names, vec!["Ürün 4", "Ürün 3", "Ürün 2"]);
    }

    #[test]
    fn test_default_limit() {
        let mut history = History::default();
        for i in 0..(HISTORY_LIMIT + 5) {
            history.record(report(&format!("Ürün {i}"), "A"));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
    }

    #[test]
    fn test_favorites_toggle_by_name_and_brand() {
        let mut favorites = Favorites::new();
        assert!(favorites.toggle(report("Gazoz", "Uludağ")));
        assert!(favorites.toggle(report("Gazoz", "Başka")));
        assert_eq!(favorites.len(), 2);
        assert!(favorites.contains("Gazoz", "Uludağ"));

        assert!(!favorites.toggle(report("Gazoz", "Uludağ")));
        assert!(!favorites.contains("Gazoz", "Uludağ"));
        assert_eq!(favorites.len(), 1);
    }
}
