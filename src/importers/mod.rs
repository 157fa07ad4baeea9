//! Data transfer objects for external systems that feed work reports.

pub mod jira;

pub use jira::{WorkLogAuthor, WorkLogItem, WorkLogPage};
