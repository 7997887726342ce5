use crate::error::GidaxError;
use crate::model::Allergy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Case-fold for keyword matching. Dotted and dotless i fold together so
/// "PINAR", "Pınar" and "pinar" compare equal.
pub fn fold(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| *c != '\u{307}')
        .map(|c| if c == 'ı' { 'i' } else { c })
        .collect()
}

/// A static keyword list, stored folded.
///
/// Matching is a plain substring search: a keyword matches anywhere in the
/// text, including inside longer words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordList(Vec<String>);

impl KeywordList {
    pub fn new<I, S>(keywords: I) -> Result<Self, GidaxError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut folded = Vec::new();
        for kw in keywords {
            let kw = fold(kw.as_ref().trim());
            if kw.is_empty() {
                return Err(GidaxError::TablesInvalid("empty keyword in list".into()));
            }
            folded.push(kw);
        }
        Ok(Self(folded))
    }

    /// Keywords found in already-folded `text`, in list order.
    pub fn matches<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.0
            .iter()
            .filter(|kw| text.contains(kw.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn contains_any(&self, text: &str) -> bool {
        self.0.iter().any(|kw| text.contains(kw.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for KeywordList {
    type Error = GidaxError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        KeywordList::new(value)
    }
}

impl From<KeywordList> for Vec<String> {
    fn from(value: KeywordList) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTables {
    /// Ingredients that make a product non-compliant regardless of additives.
    pub haram_ingredients: KeywordList,
    pub boycott_brands: KeywordList,
    pub domestic_brands: KeywordList,
    /// Animal-derived ingredients (vegan check).
    pub animal_ingredients: KeywordList,
    /// Meat and slaughter-derived ingredients (vegetarian check).
    pub meat_ingredients: KeywordList,
    pub gluten: KeywordList,
    pub lactose: KeywordList,
    #[serde(default)]
    pub allergens: BTreeMap<Allergy, KeywordList>,
}
