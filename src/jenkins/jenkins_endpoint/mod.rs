pub mod build_queue;
pub mod create_item;
pub mod get_crumb;
pub mod job_action;
pub mod job_build;
pub mod job_config;
pub mod job_info;
pub mod jobs_listing;

/// A server-relative resource and the HTTP method used on it.
pub trait Endpoint {
    fn method(&self) -> &str;

    fn endpoint(&self) -> String;
}

/// `job/<name>`, with the name percent-encoded.
pub(crate) fn job_path(job_name: &str) -> String {
    format!("job/{}", urlencoding::encode(job_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_path_encodes_name() {
        assert_eq!(job_path("nightly"), "job/nightly");
        assert_eq!(job_path("my job"), "job/my%20job");
    }
}
