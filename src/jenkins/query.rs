use crate::jenkins::client::{JenkinsTransport, RawResponse, RequestBody};
use crate::jenkins::jenkins_endpoint::build_queue::BuildQueue as BuildQueueEndpoint;
use crate::jenkins::jenkins_endpoint::jobs_listing::JobsListing as JobsListingEndpoint;
use crate::jenkins::jenkins_endpoint::Endpoint;
use crate::jenkins::jenkins_model::build_queue::BuildQueue;
use crate::jenkins::jenkins_model::jobs_listing::JobsListing;
use crate::job_error::{JobResult, TransportError};

/// # fetch xml
///
/// GET an xml document. Anything but a 2xx answer is a transport failure.
pub async fn fetch_xml<C, E>(client: &C, endpoint: &E) -> Result<String, TransportError>
where
    C: JenkinsTransport + ?Sized,
    E: Endpoint + Sync,
{
    let path = endpoint.endpoint();
    let response = client
        .request(endpoint.method(), &path, RequestBody::Empty)
        .await?;

    if response.status / 100 != 2 {
        return Err(TransportError::HttpStatus {
            endpoint: path,
            status: response.status,
            body: response.body,
        });
    }

    Ok(response.body)
}

/// # send post
///
/// POST to `endpoint`. The answer is returned whatever its status, only
/// network failures are errors.
pub async fn send_post<C, E>(
    client: &C,
    endpoint: &E,
    body: RequestBody<'_>,
) -> Result<RawResponse, TransportError>
where
    C: JenkinsTransport + ?Sized,
    E: Endpoint + Sync,
{
    client
        .request(endpoint.method(), &endpoint.endpoint(), body)
        .await
}

pub async fn query_jobs_listing<C>(client: &C) -> JobResult<JobsListing>
where
    C: JenkinsTransport + ?Sized,
{
    let content = fetch_xml(client, &JobsListingEndpoint).await?;
    Ok(JobsListing::parse(&content)?)
}

/// Names of every job on the server.
pub async fn list_jobs<C>(client: &C) -> JobResult<Vec<String>>
where
    C: JenkinsTransport + ?Sized,
{
    Ok(query_jobs_listing(client).await?.names())
}

/// Names of the jobs whose color token carries the activity marker.
pub async fn list_active_jobs<C>(client: &C) -> JobResult<Vec<String>>
where
    C: JenkinsTransport + ?Sized,
{
    Ok(query_jobs_listing(client).await?.active_names())
}

pub async fn query_build_queue<C>(client: &C) -> JobResult<BuildQueue>
where
    C: JenkinsTransport + ?Sized,
{
    let content = fetch_xml(client, &BuildQueueEndpoint).await?;
    Ok(BuildQueue::parse(&content)?)
}

/// Names of the jobs currently waiting in the build queue.
pub async fn list_queued_jobs<C>(client: &C) -> JobResult<Vec<String>>
where
    C: JenkinsTransport + ?Sized,
{
    Ok(query_build_queue(client).await?.job_names())
}
