use crate::{
    conf::Settings,
    pkg::internal::{
        email::digest::JobDigest,
        fetch::JobFetcher,
        jobs::reconcile,
        store::{FlatFileStore, RecordStore},
    },
    prelude::Result,
};

/// One full watch cycle: fetch the recent postings, diff them against the
/// seen-jobs record, and only when something is new or changed, email the
/// digest and rewrite the record. The send happens before the save, so a
/// failed delivery leaves the record as-is and the same digest goes out
/// on the next run.
pub async fn run() -> Result<()> {
    let settings = Settings::new()?;

    tracing::info!("fetching {} job listings", settings.source_name);
    let postings = JobFetcher::new(&settings)?.fetch_recent().await?;

    let store = FlatFileStore::new(&settings.seen_jobs_file);
    let seen = store.load()?;
    tracing::debug!("{} previously seen job(s) in {:?}", seen.len(), store.path());
    let outcome = reconcile(&postings, &seen);

    if outcome.changed.is_empty() {
        tracing::info!(
            "no new or updated {} jobs found in the last {} days",
            settings.source_name,
            settings.lookback_days
        );
        return Ok(());
    }

    tracing::info!("sending {} new or updated job(s)", outcome.changed.len());
    JobDigest::new(&settings.source_name, settings.lookback_days, outcome.changed)
        .send(&settings)
        .await?;
    store.save(&outcome.record)?;
    Ok(())
}
