use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::{
    pkg::internal::jobs::{SeenEntry, SeenMap, PENDING_STATUS},
    prelude::Result,
};

const FIELD_SEPARATOR: &str = "|||";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Where the cross-run record lives. The reconciler only ever sees a
/// [`SeenMap`], so the backing format can change without touching it.
pub trait RecordStore {
    fn load(&self) -> Result<SeenMap>;
    fn save(&self, record: &SeenMap) -> Result<()>;
}

/// Plain-text record file, one `key|||url|||date|||status` line per
/// entry. Saves are full rewrites with no atomicity guarantee.
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FlatFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FlatFileStore {
    fn load(&self) -> Result<SeenMap> {
        let mut seen = SeenMap::new();
        if !self.path.exists() {
            return Ok(seen);
        }
        for line in fs::read_to_string(&self.path)?.lines() {
            if let Some((key, entry)) = parse_line(line) {
                seen.insert(key, entry);
            }
        }
        Ok(seen)
    }

    fn save(&self, record: &SeenMap) -> Result<()> {
        let mut contents = String::new();
        for (key, entry) in record {
            contents.push_str(&format!(
                "{key}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}\n",
                entry.url,
                entry.posted_date.format(DATE_FORMAT),
                entry.status
            ));
        }
        fs::write(&self.path, contents)?;
        tracing::debug!("saved {} record entries to {:?}", record.len(), self.path);
        Ok(())
    }
}

/// Legacy three-field lines get a default status; anything else
/// malformed is dropped without comment.
fn parse_line(line: &str) -> Option<(String, SeenEntry)> {
    let parts: Vec<&str> = line.trim().split(FIELD_SEPARATOR).collect();
    let (key, url, date, status) = match parts.as_slice() {
        [key, url, date, status] => (*key, *url, *date, *status),
        [key, url, date] => (*key, *url, *date, PENDING_STATUS),
        _ => return None,
    };
    let posted_date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    Some((
        key.to_string(),
        SeenEntry {
            url: url.to_string(),
            posted_date,
            status: status.to_string(),
        },
    ))
}
