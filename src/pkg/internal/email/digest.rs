use std::fmt::{self, Display};

use crate::{conf::Settings, pkg::internal::jobs::Posting, prelude::Result};

use super::send_email;

/// The single outbound notification for one run: every new-or-changed
/// posting, newest first.
#[derive(Debug)]
pub struct JobDigest {
    source: String,
    lookback_days: i64,
    jobs: Vec<Posting>,
}

impl JobDigest {
    /// Sorts by posted date descending; the sort is stable, so postings
    /// sharing a date keep their fetch order.
    pub fn new(source: &str, lookback_days: i64, mut jobs: Vec<Posting>) -> Self {
        jobs.sort_by(|a, b| b.posted_date.cmp(&a.posted_date));
        JobDigest {
            source: source.to_string(),
            lookback_days,
            jobs,
        }
    }

    pub fn subject(&self) -> String {
        format!(
            "🆕 {} Jobs - Posted in Last {} Days",
            self.source, self.lookback_days
        )
    }

    pub async fn send(&self, settings: &Settings) -> Result<()> {
        send_email(settings, &settings.to_email, &self.subject(), &self.to_string()).await
    }
}

impl Display for JobDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "New {} jobs posted within the last {} days:",
            self.source, self.lookback_days
        )?;
        writeln!(f)?;
        for job in &self.jobs {
            writeln!(
                f,
                "- {} | {} | {}",
                job.title,
                job.location,
                job.posted_date.format("%Y-%m-%d")
            )?;
            writeln!(f, "  {}", job.url)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use tracing_test::traced_test;

    use super::*;

    fn posting(title: &str, date: &str, url: &str) -> Posting {
        Posting {
            title: title.into(),
            location: "NY".into(),
            posted_date: date.parse().unwrap(),
            url: url.into(),
        }
    }

    #[test]
    fn digest_orders_newest_first() {
        let digest = JobDigest::new(
            "JP Morgan",
            7,
            vec![
                posting("Old", "2024-01-08", "U1"),
                posting("New", "2024-01-12", "U2"),
                posting("Mid", "2024-01-10", "U3"),
            ],
        );

        let titles: Vec<&str> = digest.jobs.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["New", "Mid", "Old"]);
    }

    #[test]
    fn equal_dates_keep_fetch_order() {
        let digest = JobDigest::new(
            "JP Morgan",
            7,
            vec![
                posting("First", "2024-01-10", "U1"),
                posting("Second", "2024-01-10", "U2"),
                posting("Newer", "2024-01-11", "U3"),
            ],
        );

        let titles: Vec<&str> = digest.jobs.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Newer", "First", "Second"]);
    }

    #[test]
    fn subject_names_the_source_and_window() {
        let digest = JobDigest::new("JP Morgan", 7, vec![]);
        assert_eq!(digest.subject(), "🆕 JP Morgan Jobs - Posted in Last 7 Days");
    }

    #[test]
    #[traced_test]
    fn body_lists_one_job_per_block() {
        let digest = JobDigest::new(
            "JP Morgan",
            7,
            vec![posting("SWE Intern", "2024-01-10", "https://x/1")],
        );

        let body = digest.to_string();
        assert!(body.starts_with("New JP Morgan jobs posted within the last 7 days:\n\n"));
        assert!(body.contains("- SWE Intern | NY | 2024-01-10\n  https://x/1\n"));
    }
}
