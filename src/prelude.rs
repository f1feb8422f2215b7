pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("improperly configured: {0}")]
    Config(#[from] config::ConfigError),
    #[error("job source request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("gave up after {pages} pages with the source still reporting more")]
    PaginationOverrun { pages: u32 },
    #[error("seen-jobs file: {0}")]
    Io(#[from] std::io::Error),
    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("could not compose email: {0}")]
    Email(#[from] lettre::error::Error),
    #[error("bad mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
