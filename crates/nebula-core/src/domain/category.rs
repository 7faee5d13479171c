use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Fixed set of post categories, serialized by their display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "技术")]
    Tech,
    #[serde(rename = "生活")]
    Life,
    #[serde(rename = "设计")]
    Design,
    #[serde(rename = "随笔")]
    Essay,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Tech,
        Category::Life,
        Category::Design,
        Category::Essay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tech => "技术",
            Category::Life => "生活",
            Category::Design => "设计",
            Category::Essay => "随笔",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == label)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "Unknown category '{}', expected one of: {}",
                    label,
                    Self::ALL.map(|c| c.as_str()).join(", ")
                ))
            })
    }
}
