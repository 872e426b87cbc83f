pub mod query;
pub mod record_service;
