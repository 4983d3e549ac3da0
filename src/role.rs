use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of roles a group can be staffed with, in cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Senior Developer")]
    SeniorDeveloper,
    #[serde(rename = "Junior Developer")]
    JuniorDeveloper,
    #[serde(rename = "Designer")]
    Designer,
    #[serde(rename = "Product Manager")]
    ProductManager,
    #[serde(rename = "QA Engineer")]
    QaEngineer,
    #[serde(rename = "DevOps Engineer")]
    DevOpsEngineer,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::SeniorDeveloper,
        Role::JuniorDeveloper,
        Role::Designer,
        Role::ProductManager,
        Role::QaEngineer,
        Role::DevOpsEngineer,
    ];

    pub fn first() -> Role {
        Self::ALL[0]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SeniorDeveloper => "Senior Developer",
            Role::JuniorDeveloper => "Junior Developer",
            Role::Designer => "Designer",
            Role::ProductManager => "Product Manager",
            Role::QaEngineer => "QA Engineer",
            Role::DevOpsEngineer => "DevOps Engineer",
        }
    }

    /// Display color as a `#rrggbb` hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Role::SeniorDeveloper => "#3b82f6",
            Role::JuniorDeveloper => "#8b5cf6",
            Role::Designer => "#ec4899",
            Role::ProductManager => "#f59e0b",
            Role::QaEngineer => "#10b981",
            Role::DevOpsEngineer => "#06b6d4",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|role| role == self)
            .unwrap_or_default()
    }

    /// Steps `direction` places through the role list, wrapping at both ends.
    pub fn cycle(&self, direction: i32) -> Role {
        let len = Self::ALL.len() as i64;
        let next = (self.index() as i64 + i64::from(direction)).rem_euclid(len);
        Self::ALL[next as usize]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleParseError {
    input: String,
}

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.input)
    }
}

impl std::error::Error for RoleParseError {}

impl FromStr for Role {
    type Err = RoleParseError;

    /// Accepts the display name in any case, with spaces, dashes or
    /// underscores between words.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .iter()
            .copied()
            .find(|role| normalize(role.as_str()) == wanted)
            .ok_or_else(|| RoleParseError {
                input: s.to_string(),
            })
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
