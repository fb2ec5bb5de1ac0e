use crate::constant::log::*;
use crate::jenkins::client::JenkinsTransport;
use crate::jenkins::job::Job;
use crate::jenkins::query::{list_active_jobs, query_build_queue};
use crate::job_error::JobResult;
use chrono::Local;
use formatx::formatx;
use std::time::Duration;
use tokio::sync::watch;

/// Suspends the poller between two ticks.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sending half of a wait cancellation.
pub struct WaitCancelHandle {
    tx: watch::Sender<bool>,
}

impl WaitCancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Receiving half of a wait cancellation, handed to `WaitOptions`.
#[derive(Clone)]
pub struct WaitCancel {
    rx: watch::Receiver<bool>,
}

impl WaitCancel {
    pub fn pair() -> (WaitCancelHandle, WaitCancel) {
        let (tx, rx) = watch::channel(false);
        (WaitCancelHandle { tx }, WaitCancel { rx })
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancelled. Never resolves if the handle is dropped first.
    async fn cancelled(&mut self) {
        while !*self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

pub struct WaitOptions {
    pub poll_interval: Duration,
    /// Bound on the accumulated sleep. No tick starts once it is reached.
    pub deadline: Option<Duration>,
    pub cancel: Option<WaitCancel>,
}

impl WaitOptions {
    pub fn every(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            deadline: None,
            cancel: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancel(mut self, cancel: WaitCancel) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The job was neither building nor queued at the last tick.
    Finished { ticks: u32 },
    DeadlineReached { ticks: u32 },
    Cancelled { ticks: u32 },
}

impl WaitOutcome {
    pub fn ticks(&self) -> u32 {
        match self {
            WaitOutcome::Finished { ticks }
            | WaitOutcome::DeadlineReached { ticks }
            | WaitOutcome::Cancelled { ticks } => *ticks,
        }
    }
}

/// One tick of the poller: the build queue is read first, then the jobs
/// listing. A job is busy when it is building or queued.
pub async fn is_building_or_queued<C>(client: &C, job_name: &str) -> JobResult<bool>
where
    C: JenkinsTransport + ?Sized,
{
    let queued = query_build_queue(client).await?.contains(job_name);
    let active = list_active_jobs(client)
        .await?
        .iter()
        .any(|name| name == job_name);

    Ok(active || queued)
}

impl<C: JenkinsTransport> Job<C> {
    /// # wait for build to finish
    ///
    /// Sleep one interval, then check whether the job is still building or
    /// queued, until it is neither.
    pub async fn wait_for_build_to_finish(&self, options: WaitOptions) -> JobResult<WaitOutcome> {
        self.wait_for_build_to_finish_with(options, &TokioSleeper)
            .await
    }

    pub async fn wait_for_build_to_finish_with(
        &self,
        options: WaitOptions,
        sleeper: &dyn Sleeper,
    ) -> JobResult<WaitOutcome> {
        let WaitOptions {
            poll_interval,
            deadline,
            mut cancel,
        } = options;

        let mut ticks: u32 = 0;
        let mut slept = Duration::ZERO;

        loop {
            if cancel.as_ref().is_some_and(WaitCancel::is_cancelled) {
                return Ok(self.log_outcome(WaitOutcome::Cancelled { ticks }));
            }
            if deadline.is_some_and(|deadline| slept >= deadline) {
                return Ok(self.log_outcome(WaitOutcome::DeadlineReached { ticks }));
            }

            match cancel.as_mut() {
                Some(cancel) => {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            return Ok(self.log_outcome(WaitOutcome::Cancelled { ticks }));
                        }
                        _ = sleeper.sleep(poll_interval) => {}
                    }
                }
                None => sleeper.sleep(poll_interval).await,
            }

            slept += poll_interval;
            ticks += 1;

            if !is_building_or_queued(self.client.as_ref(), self.name()).await? {
                return Ok(self.log_outcome(WaitOutcome::Finished { ticks }));
            }

            tracing::info!(
                "{}",
                formatx!(
                    WAITING_FOR_BUILD,
                    self.name(),
                    ticks,
                    Local::now().format("%Y-%m-%d %H:%M:%S")
                )
                .unwrap_or_default()
            );
        }
    }

    fn log_outcome(&self, outcome: WaitOutcome) -> WaitOutcome {
        let template = match outcome {
            WaitOutcome::Finished { .. } => WAIT_FINISHED,
            WaitOutcome::DeadlineReached { .. } => WAIT_DEADLINE_REACHED,
            WaitOutcome::Cancelled { .. } => WAIT_CANCELLED,
        };
        tracing::info!(
            "{}",
            formatx!(template, self.name(), outcome.ticks()).unwrap_or_default()
        );
        outcome
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::jenkins::job::tests::{
        scripted, CONFIG, LISTING_ACTIVE, LISTING_IDLE, EMPTY_QUEUE_XML, STATUS,
    };
    use std::sync::Mutex;

    const QUEUE_WITH_NIGHTLY: &str =
        "<queue><item><id>7</id><task><name>nightly</name></task></item></queue>";

    #[derive(Default)]
    pub(crate) struct RecordingSleeper {
        pub slept: Mutex<Vec<Duration>>,
        cancel_on: Option<(usize, WaitCancelHandle)>,
    }

    #[async_trait::async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            let mut slept = self.slept.lock().unwrap();
            slept.push(duration);
            if let Some((at, handle)) = &self.cancel_on {
                if slept.len() == *at {
                    handle.cancel();
                }
            }
        }
    }

    #[tokio::test]
    async fn test_finishes_when_neither_active_nor_queued() {
        let transport = scripted(STATUS, CONFIG);
        transport.respond("GET", "queue/api/xml", 200, QUEUE_WITH_NIGHTLY);
        transport.respond("GET", "queue/api/xml", 200, QUEUE_WITH_NIGHTLY);
        transport.respond("GET", "queue/api/xml", 200, EMPTY_QUEUE_XML);
        transport.respond("GET", "api/xml", 200, LISTING_ACTIVE);
        transport.respond("GET", "api/xml", 200, LISTING_IDLE);
        let job = Job::load(transport.clone(), "nightly").await.unwrap();
        let sleeper = RecordingSleeper::default();

        let outcome = job
            .wait_for_build_to_finish_with(WaitOptions::every(Duration::from_secs(10)), &sleeper)
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::Finished { ticks: 3 });
        assert_eq!(*sleeper.slept.lock().unwrap(), vec![Duration::from_secs(10); 3]);
        assert_eq!(transport.requests_to("GET", "queue/api/xml").len(), 3);
        assert_eq!(transport.requests_to("GET", "api/xml").len(), 3);
    }

    #[tokio::test]
    async fn test_sleeps_before_first_check() {
        let transport = scripted(STATUS, CONFIG);
        transport.respond("GET", "queue/api/xml", 200, EMPTY_QUEUE_XML);
        transport.respond("GET", "api/xml", 200, LISTING_IDLE);
        let job = Job::load(transport, "nightly").await.unwrap();
        let sleeper = RecordingSleeper::default();

        let outcome = job
            .wait_for_build_to_finish_with(WaitOptions::every(Duration::from_secs(10)), &sleeper)
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::Finished { ticks: 1 });
        assert_eq!(sleeper.slept.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deadline_bounds_the_wait() {
        let transport = scripted(STATUS, CONFIG);
        transport.respond("GET", "queue/api/xml", 200, EMPTY_QUEUE_XML);
        transport.respond("GET", "api/xml", 200, LISTING_ACTIVE);
        let job = Job::load(transport, "nightly").await.unwrap();
        let sleeper = RecordingSleeper::default();

        let options = WaitOptions::every(Duration::from_secs(10))
            .with_deadline(Duration::from_secs(30));
        let outcome = job
            .wait_for_build_to_finish_with(options, &sleeper)
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::DeadlineReached { ticks: 3 });
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let transport = scripted(STATUS, CONFIG);
        let job = Job::load(transport.clone(), "nightly").await.unwrap();
        transport.clear_requests();
        let (handle, cancel) = WaitCancel::pair();
        handle.cancel();

        let outcome = job
            .wait_for_build_to_finish_with(
                WaitOptions::every(Duration::from_secs(10)).with_cancel(cancel),
                &RecordingSleeper::default(),
            )
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::Cancelled { ticks: 0 });
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_between_ticks() {
        let transport = scripted(STATUS, CONFIG);
        transport.respond("GET", "queue/api/xml", 200, EMPTY_QUEUE_XML);
        transport.respond("GET", "api/xml", 200, LISTING_ACTIVE);
        let job = Job::load(transport, "nightly").await.unwrap();
        let (handle, cancel) = WaitCancel::pair();
        let sleeper = RecordingSleeper {
            cancel_on: Some((2, handle)),
            ..RecordingSleeper::default()
        };

        let outcome = job
            .wait_for_build_to_finish_with(
                WaitOptions::every(Duration::from_secs(10)).with_cancel(cancel),
                &sleeper,
            )
            .await
            .unwrap();

        assert_eq!(outcome, WaitOutcome::Cancelled { ticks: 2 });
    }

    #[tokio::test]
    async fn test_transport_failure_aborts_wait() {
        let transport = scripted(STATUS, CONFIG);
        transport.respond("GET", "queue/api/xml", 503, "unavailable");
        let job = Job::load(transport, "nightly").await.unwrap();

        let result = job
            .wait_for_build_to_finish_with(
                WaitOptions::every(Duration::from_secs(10)),
                &RecordingSleeper::default(),
            )
            .await;

        assert!(result.is_err());
    }
}
