use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Status a posting enters the record with. Edited by humans in the
/// record file, only ever copied forward by the watcher.
pub const PENDING_STATUS: &str = "Pending";

/// One job listing as observed in a single fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub title: String,
    pub location: String,
    pub posted_date: NaiveDate,
    pub url: String,
}

impl Posting {
    /// Composite identity used to match postings across runs. Two
    /// postings with the same key are the same job regardless of date.
    pub fn key(&self) -> String {
        format!("{} | {} | {}", self.title, self.location, self.url)
    }
}

/// What the record remembers about a posting it has seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenEntry {
    pub url: String,
    pub posted_date: NaiveDate,
    pub status: String,
}

/// The cross-run record, one entry per key ever seen.
pub type SeenMap = BTreeMap<String, SeenEntry>;

/// Output of a reconciliation pass.
#[derive(Debug)]
pub struct Reconciled {
    /// Postings that are new or whose posted date moved, in fetch order.
    pub changed: Vec<Posting>,
    /// The full record to persist, covering this fetch plus every entry
    /// carried over from the previous record.
    pub record: SeenMap,
}

/// Diff the current fetch against the previous record.
///
/// A posting counts as changed when its key was never seen, or when the
/// stored posted date differs from the fetched one. Every current posting
/// lands in the returned record with its fetched url/date; `status` is
/// carried over from the previous entry when one exists, else
/// [`PENDING_STATUS`]. Keys absent from the current fetch are retained
/// unchanged, never deleted.
pub fn reconcile(current: &[Posting], previous: &SeenMap) -> Reconciled {
    let mut changed = Vec::new();
    let mut record = previous.clone();

    for posting in current {
        let key = posting.key();
        let status = match previous.get(&key) {
            None => {
                changed.push(posting.clone());
                PENDING_STATUS.to_string()
            }
            Some(entry) => {
                if entry.posted_date != posting.posted_date {
                    changed.push(posting.clone());
                }
                entry.status.clone()
            }
        };
        record.insert(
            key,
            SeenEntry {
                url: posting.url.clone(),
                posted_date: posting.posted_date,
                status,
            },
        );
    }

    Reconciled { changed, record }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(title: &str, location: &str, date: &str, url: &str) -> Posting {
        Posting {
            title: title.into(),
            location: location.into(),
            posted_date: date.parse().unwrap(),
            url: url.into(),
        }
    }

    fn entry(url: &str, date: &str, status: &str) -> SeenEntry {
        SeenEntry {
            url: url.into(),
            posted_date: date.parse().unwrap(),
            status: status.into(),
        }
    }

    #[test]
    fn never_seen_posting_is_changed_and_enters_pending() {
        let current = vec![posting("SWE Intern", "NY", "2024-01-10", "U")];

        let out = reconcile(&current, &SeenMap::new());

        assert_eq!(out.changed, current);
        assert_eq!(
            out.record.get("SWE Intern | NY | U"),
            Some(&entry("U", "2024-01-10", "Pending"))
        );
        assert_eq!(out.record.len(), 1);
    }

    #[test]
    fn same_key_same_date_is_not_changed() {
        let current = vec![posting("SWE Intern", "NY", "2024-01-10", "U")];
        let mut previous = SeenMap::new();
        previous.insert("SWE Intern | NY | U".into(), entry("U", "2024-01-10", "Pending"));

        let out = reconcile(&current, &previous);

        assert!(out.changed.is_empty());
        assert_eq!(out.record, previous);
    }

    #[test]
    fn moved_date_is_changed_and_keeps_edited_status() {
        let current = vec![posting("SWE Intern", "NY", "2024-01-15", "U")];
        let mut previous = SeenMap::new();
        previous.insert(
            "SWE Intern | NY | U".into(),
            entry("U", "2024-01-10", "Interviewing"),
        );

        let out = reconcile(&current, &previous);

        assert_eq!(out.changed, current);
        assert_eq!(
            out.record.get("SWE Intern | NY | U"),
            Some(&entry("U", "2024-01-15", "Interviewing"))
        );
    }

    #[test]
    fn reverted_date_is_also_flagged() {
        let current = vec![posting("SWE Intern", "NY", "2024-01-05", "U")];
        let mut previous = SeenMap::new();
        previous.insert("SWE Intern | NY | U".into(), entry("U", "2024-01-10", "Pending"));

        let out = reconcile(&current, &previous);

        assert_eq!(out.changed.len(), 1);
        assert_eq!(
            out.record.get("SWE Intern | NY | U").unwrap().posted_date,
            "2024-01-05".parse::<NaiveDate>().unwrap()
        );
    }

    #[test]
    fn entries_missing_from_the_fetch_are_retained() {
        let current = vec![posting("Data Engineer", "TX", "2024-02-01", "V")];
        let mut previous = SeenMap::new();
        previous.insert(
            "SWE Intern | NY | U".into(),
            entry("U", "2024-01-10", "Rejected"),
        );

        let out = reconcile(&current, &previous);

        assert_eq!(out.record.len(), 2);
        assert_eq!(
            out.record.get("SWE Intern | NY | U"),
            Some(&entry("U", "2024-01-10", "Rejected"))
        );
    }

    #[test]
    fn changed_follows_fetch_order() {
        let current = vec![
            posting("A", "NY", "2024-01-10", "U1"),
            posting("B", "NY", "2024-01-12", "U2"),
            posting("C", "NY", "2024-01-11", "U3"),
        ];

        let out = reconcile(&current, &SeenMap::new());

        let titles: Vec<&str> = out.changed.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[test]
    fn key_joins_title_location_and_url() {
        let p = posting("SWE Intern", "NY", "2024-01-10", "https://x/1");
        assert_eq!(p.key(), "SWE Intern | NY | https://x/1");
    }
}
