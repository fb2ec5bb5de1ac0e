pub mod build_queue;
pub(crate) mod crumb;
pub mod job_config;
pub mod job_status;
pub mod jobs_listing;
pub mod xml_document;
