use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        };
        write!(f, "{s}")
    }
}

/// Which rule produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    #[serde(rename = "helal")]
    Halal,
    #[serde(rename = "boykot")]
    Boycott,
    #[serde(rename = "yerli")]
    Domestic,
    #[serde(rename = "vegan")]
    Vegan,
    #[serde(rename = "vejetaryen")]
    Vegetarian,
    #[serde(rename = "alerjen")]
    Allergen,
    #[serde(rename = "diyabet")]
    Diabetes,
    #[serde(rename = "hipertansiyon")]
    Hypertension,
    #[serde(rename = "kolesterol")]
    Cholesterol,
    #[serde(rename = "gluten")]
    Gluten,
    #[serde(rename = "laktoz")]
    Lactose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub icon: String,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(
        kind: AlertKind,
        severity: Severity,
        icon: &str,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Alert {
        Alert {
            kind,
            severity,
            icon: icon.to_string(),
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_danger(&self) -> bool {
        self.severity == Severity::Danger
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}
