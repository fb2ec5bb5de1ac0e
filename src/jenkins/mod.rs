pub mod build;
pub mod client;
pub mod jenkins_endpoint;
pub mod jenkins_http_client;
pub mod jenkins_model;
pub mod job;
pub mod query;
#[cfg(test)]
pub(crate) mod test_support;
pub mod watch;
