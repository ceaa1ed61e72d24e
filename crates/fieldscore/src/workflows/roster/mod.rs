mod directory;
mod parser;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::workflows::scorecard::CompanyName;

pub use directory::CachedRosterDirectory;

/// Mapping from company name to the station quota contracted for a month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyRoster {
    quotas: BTreeMap<CompanyName, u32>,
}

impl CompanyRoster {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RosterImportError> {
        let mut quotas = BTreeMap::new();
        // Later rows overwrite earlier ones, dictionary style.
        for entry in parser::parse_entries(reader)? {
            quotas.insert(entry.company, entry.stations);
        }

        Ok(Self { quotas })
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CompanyName, u32)>,
    {
        Self {
            quotas: entries.into_iter().collect(),
        }
    }

    pub fn quota(&self, company: &CompanyName) -> Option<u32> {
        self.quotas.get(company).copied()
    }

    /// Companies in name order with their quotas.
    pub fn entries(&self) -> impl Iterator<Item = (&CompanyName, u32)> + '_ {
        self.quotas.iter().map(|(company, quota)| (company, *quota))
    }

    pub fn len(&self) -> usize {
        self.quotas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotas.is_empty()
    }
}

/// Where a fresh roster snapshot comes from.
pub trait RosterSource: Send + Sync {
    fn load(&self) -> Result<CompanyRoster, RosterImportError>;
}

/// Re-reads the roster CSV from disk on every load.
#[derive(Debug, Clone)]
pub struct FileRosterSource {
    path: PathBuf,
}

impl FileRosterSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl RosterSource for FileRosterSource {
    fn load(&self) -> Result<CompanyRoster, RosterImportError> {
        CompanyRoster::from_path(&self.path)
    }
}

/// A fixed roster is its own source; each load hands out a copy.
impl RosterSource for CompanyRoster {
    fn load(&self) -> Result<CompanyRoster, RosterImportError> {
        Ok(self.clone())
    }
}

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read station roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid station roster CSV data: {}", err),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
