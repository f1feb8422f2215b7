pub mod email;
pub mod fetch;
pub mod jobs;
pub mod store;
