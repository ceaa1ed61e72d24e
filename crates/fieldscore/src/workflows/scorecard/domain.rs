use chrono::{Datelike, Local};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Company identity as it appears in the station roster.
///
/// Construction strips invisible-character noise (BOM, zero-width spaces)
/// and collapses interior whitespace so journal keys and roster entries
/// compare by the visible name. Case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompanyName(String);

impl CompanyName {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let cleaned = raw.replace(['\u{feff}', '\u{200b}'], "");
        let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return Err(DomainError::BlankCompanyName);
        }
        Ok(Self(collapsed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CompanyName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CompanyName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        CompanyName::new(&raw).map_err(de::Error::custom)
    }
}

/// Calendar month a report covers, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// The month the local clock currently falls in.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u32 {
        self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidPeriod(value.to_string());
        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Journal addressing: one report per company per calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportKey {
    pub company: CompanyName,
    pub period: Period,
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.company, self.period)
    }
}

/// Inputs to one scoring pass over a month of visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInput {
    /// Contracted number of stations for the month (`N`).
    pub station_quota: u32,
    /// Agreed number of visits the quota is spread across (`K`).
    pub planned_visits: u32,
    /// Stations actually inspected on each completed visit, in order.
    pub facts: Vec<u32>,
}

/// Why a visit received its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitStatus {
    /// Under half of the redistributed target and behind the monthly pace.
    Poor,
    /// Between 50% and 90% of the redistributed target.
    Acceptable,
    /// At or above 90% of the redistributed target.
    Good,
    /// Cumulative progress meets the monthly schedule; the visit's own
    /// attainment is not consulted.
    OnPaceOverall,
}

impl VisitStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Acceptable => "Acceptable",
            Self::Good => "Good",
            Self::OnPaceOverall => "On Pace (overall)",
        }
    }
}

#[derive(Debug)]
pub enum DomainError {
    BlankCompanyName,
    MonthOutOfRange(u32),
    InvalidPeriod(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BlankCompanyName => {
                write!(f, "company name is empty once whitespace is removed")
            }
            DomainError::MonthOutOfRange(month) => {
                write!(f, "month {} is outside 1..=12", month)
            }
            DomainError::InvalidPeriod(raw) => {
                write!(f, "period '{}' must look like YYYY-MM", raw)
            }
        }
    }
}

impl std::error::Error for DomainError {}
