use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SCORE: u8 = 60;

/// Energy status of a single chakra. Values outside the four known states are
/// carried as `Unrecognized` so a stale or hand-edited payload still renders.
/// A missing or null status is `Unrecognized("")` and scores [`DEFAULT_SCORE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Status {
    Balanced,
    SlightlyWeak,
    Blocked,
    Overactive,
    Unrecognized(String),
}

impl Status {
    pub const KNOWN: [Status; 4] = [
        Status::Balanced,
        Status::SlightlyWeak,
        Status::Blocked,
        Status::Overactive,
    ];

    pub fn label(&self) -> &str {
        match self {
            Status::Balanced => "Balanced",
            Status::SlightlyWeak => "Slightly Weak",
            Status::Blocked => "Blocked / Underactive",
            Status::Overactive => "Overactive",
            Status::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Matches the four labels ignoring case and whitespace; anything else
    /// is kept verbatim as `Unrecognized`.
    pub fn parse(raw: &str) -> Status {
        let fold = |text: &str| -> String {
            text.chars()
                .filter(|ch| !ch.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect()
        };
        let folded = fold(raw);
        Status::KNOWN
            .into_iter()
            .find(|status| fold(status.label()) == folded)
            .unwrap_or_else(|| Status::Unrecognized(raw.to_string()))
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Status::Unrecognized(_))
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Unrecognized(String::new())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        Status::parse(&value)
    }
}

impl From<Option<String>> for Status {
    fn from(value: Option<String>) -> Self {
        value.map(Status::from).unwrap_or_default()
    }
}

impl From<&str> for Status {
    fn from(value: &str) -> Self {
        Status::parse(value)
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        value.label().to_string()
    }
}

/// Bar-chart percentage for a status.
pub fn score_for(status: &Status) -> u8 {
    match status {
        Status::Balanced => 100,
        Status::SlightlyWeak => 75,
        Status::Blocked => 40,
        Status::Overactive => 55,
        Status::Unrecognized(_) => DEFAULT_SCORE,
    }
}
