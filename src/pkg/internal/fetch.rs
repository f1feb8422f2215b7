use chrono::{Duration, Local, NaiveDate};
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::{
    conf::Settings,
    pkg::internal::jobs::Posting,
    prelude::{Error, Result},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One page of the requisition search endpoint.
#[derive(Deserialize, Debug)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchItem>,
    #[serde(rename = "hasMore", default)]
    pub has_more: bool,
}

#[derive(Deserialize, Debug)]
pub struct SearchItem {
    #[serde(rename = "requisitionList", default)]
    pub requisition_list: Vec<Requisition>,
}

#[derive(Deserialize, Debug)]
pub struct Requisition {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "PrimaryLocation")]
    pub primary_location: Option<String>,
    #[serde(rename = "PostedDate")]
    pub posted_date: Option<String>,
}

/// Pulls postings out of the recruiting API, page by page.
pub struct JobFetcher<'a> {
    client: reqwest::Client,
    settings: &'a Settings,
}

impl<'a> JobFetcher<'a> {
    pub fn new(settings: &'a Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
            .build()?;
        Ok(JobFetcher { client, settings })
    }

    /// Every posting within the configured lookback window.
    pub async fn fetch_recent(&self) -> Result<Vec<Posting>> {
        let cutoff = Local::now().date_naive() - Duration::days(self.settings.lookback_days);
        self.fetch_since(cutoff).await
    }

    /// Walks the paginated search results until the source reports no
    /// more pages, collecting postings posted on or after `cutoff`.
    /// Bails out with an error once `max_pages` requests have been made
    /// and the source still claims more.
    pub async fn fetch_since(&self, cutoff: NaiveDate) -> Result<Vec<Posting>> {
        let mut postings = Vec::new();
        let mut offset = 0;

        for _ in 0..self.settings.max_pages {
            let url = self.page_url(offset);
            tracing::debug!("requesting page at offset {}", offset);
            let page: SearchPage = self
                .client
                .get(&url)
                .header(ACCEPT, "application/json")
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            for item in page.items {
                for req in item.requisition_list {
                    if let Some(p) = self.to_posting(req, cutoff) {
                        postings.push(p);
                    }
                }
            }

            if !page.has_more {
                tracing::debug!("{} postings within the window", postings.len());
                return Ok(postings);
            }
            offset += self.settings.page_size;
        }

        Err(Error::PaginationOverrun {
            pages: self.settings.max_pages,
        })
    }

    /// Requisitions without a parseable posted date, or posted before the
    /// cutoff, are dropped here.
    fn to_posting(&self, req: Requisition, cutoff: NaiveDate) -> Option<Posting> {
        let raw = req.posted_date?;
        let posted_date = match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => {
                tracing::debug!("skipping {:?}: unparseable posted date {:?}", req.title, raw);
                return None;
            }
        };
        if posted_date < cutoff {
            return None;
        }
        Some(Posting {
            url: self.preview_url(&req.id),
            title: req.title,
            location: req.primary_location.unwrap_or_else(|| "N/A".to_string()),
            posted_date,
        })
    }

    fn page_url(&self, offset: u32) -> String {
        let s = self.settings;
        let mut url = format!(
            "{}?onlyData=true&expand=requisitionList.workLocation,\
             requisitionList.otherWorkLocations,requisitionList.secondaryLocations,\
             flexFieldsFacet.values,requisitionList.requisitionFlexFields&\
             finder=findReqs;siteNumber={},facetsList=LOCATIONS%3BWORK_LOCATIONS%3B\
             WORKPLACE_TYPES%3BTITLES%3BCATEGORIES%3BORGANIZATIONS%3BPOSTING_DATES%3BFLEX_FIELDS,\
             limit={},keyword=%22{}%22,locationId={},sortBy=RELEVANCY",
            s.base_api, s.site_number, s.page_size, s.keyword, s.location_id
        );
        if offset > 0 {
            url.push_str(&format!(",offset={}", offset));
        }
        url
    }

    /// Candidate-facing link for a requisition id, with the same fixed
    /// query parameters the board itself uses.
    fn preview_url(&self, id: &str) -> String {
        let s = self.settings;
        format!(
            "{}/{}/jobs/preview/{}/?keyword={}&location={}&locationId={}&locationLevel=country&mode=location",
            s.candidate_base,
            s.site_number,
            id,
            s.keyword,
            s.location_label.replace(' ', "+"),
            s.location_id
        )
    }
}
