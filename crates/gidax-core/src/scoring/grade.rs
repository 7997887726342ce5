use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeInfo {
    pub grade: Grade,
    pub color: String,
    pub label: String,
}

/// Letter grade for a health score. Breakpoints are 80/65/50/30.
pub fn grade(score: u8) -> GradeInfo {
    let (grade, color, label) = if score >= 80 {
        (Grade::A, "#22C55E", "Çok Sağlıklı")
    } else if score >= 65 {
        (Grade::B, "#84CC16", "Sağlıklı")
    } else if score >= 50 {
        (Grade::C, "#F59E0B", "Orta")
    } else if score >= 30 {
        (Grade::D, "#F97316", "Dikkatli Tüket")
    } else {
        (Grade::E, "#EF4444", "Kaçın")
    };

    GradeInfo {
        grade,
        color: color.to_string(),
        label: label.to_string(),
    }
}
