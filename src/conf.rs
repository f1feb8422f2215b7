use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Runtime settings, sourced from the process environment. Everything but
/// the SMTP credentials and addresses falls back to the deployed defaults.
#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    #[serde(default = "default_source_name")]
    pub source_name: String,
    #[serde(default = "default_base_api")]
    pub base_api: String,
    #[serde(default = "default_candidate_base")]
    pub candidate_base: String,
    #[serde(default = "default_site_number")]
    pub site_number: String,
    #[serde(default = "default_keyword")]
    pub keyword: String,
    #[serde(default = "default_location_id")]
    pub location_id: String,
    #[serde(default = "default_location_label")]
    pub location_label: String,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_seen_jobs_file")]
    pub seen_jobs_file: String,
    //email
    pub from_email: String,
    pub to_email: String,
    pub smtp_user: String,
    pub smtp_pass: String,
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        conf.try_deserialize()
    }
}

fn default_source_name() -> String {
    "JP Morgan".into()
}

fn default_base_api() -> String {
    "https://jpmc.fa.oraclecloud.com/hcmRestApi/resources/latest/recruitingCEJobRequisitions".into()
}

fn default_candidate_base() -> String {
    "https://jpmc.fa.oraclecloud.com/hcmUI/CandidateExperience/en/sites".into()
}

fn default_site_number() -> String {
    "CX_1001".into()
}

fn default_keyword() -> String {
    "Software".into()
}

fn default_location_id() -> String {
    "300000000289738".into()
}

fn default_location_label() -> String {
    "United States".into()
}

fn default_lookback_days() -> i64 {
    7
}

fn default_page_size() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    50
}

fn default_seen_jobs_file() -> String {
    "seen_jobs.txt".into()
}

fn default_smtp_server() -> String {
    "smtp.gmail.com".into()
}

fn default_smtp_port() -> u16 {
    465
}

#[cfg(test)]
impl Settings {
    pub fn for_tests() -> Self {
        Settings {
            source_name: default_source_name(),
            base_api: default_base_api(),
            candidate_base: default_candidate_base(),
            site_number: default_site_number(),
            keyword: default_keyword(),
            location_id: default_location_id(),
            location_label: default_location_label(),
            lookback_days: default_lookback_days(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            seen_jobs_file: default_seen_jobs_file(),
            from_email: "watcher@example.com".into(),
            to_email: "inbox@example.com".into(),
            smtp_user: "watcher@example.com".into(),
            smtp_pass: "hunter2".into(),
            smtp_server: default_smtp_server(),
            smtp_port: default_smtp_port(),
        }
    }
}
