//! Network path monitoring
//!
//! Process-wide connectivity state read by [`NetworkClient`](crate::NetworkClient)
//! before every request. The state is pushed in from outside: either by a
//! platform network-change subscription calling [`ConnectivityMonitor::report`],
//! or by the built-in TCP probe task.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Last known state of the network path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    /// Nothing reported yet. Requests are allowed through.
    Unknown,
    Satisfied,
    Unsatisfied,
}

/// Shared, cheaply clonable connectivity state.
#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
    tx: Arc<watch::Sender<PathStatus>>,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        Self::with_status(PathStatus::Unknown)
    }

    pub fn with_status(status: PathStatus) -> Self {
        let (tx, _rx) = watch::channel(status);
        Self { tx: Arc::new(tx) }
    }

    pub fn status(&self) -> PathStatus {
        *self.tx.borrow()
    }

    /// Only an explicit `Unsatisfied` report blocks requests.
    pub fn is_connected(&self) -> bool {
        self.status() != PathStatus::Unsatisfied
    }

    /// Record a path change coming from the network subscription.
    pub fn report(&self, status: PathStatus) {
        let previous = self.tx.send_replace(status);
        if previous != status {
            log::info!("Network path changed: {previous:?} -> {status:?}");
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PathStatus> {
        self.tx.subscribe()
    }

    /// Start a background task that periodically opens a TCP connection to
    /// `target` and reports the outcome.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_probe(&self, target: ProbeTarget) -> ProbeHandle {
        let monitor = self.clone();
        let handle = tokio::spawn(async move {
            log::debug!(
                "Connectivity probe started: {}:{} every {:?}",
                target.host,
                target.port,
                target.interval
            );
            loop {
                let status = probe_once(&target).await;
                monitor.report(status);
                tokio::time::sleep(target.interval).await;
            }
        });
        ProbeHandle(handle)
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Where and how often the probe checks reachability.
#[derive(Debug, Clone)]
pub struct ProbeTarget {
    pub host: String,
    pub port: u16,
    pub interval: Duration,
    pub timeout: Duration,
}

impl ProbeTarget {
    pub fn new(host: impl Into<String>, port: u16, interval: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            interval,
            timeout: Duration::from_secs(5),
        }
    }
}

async fn probe_once(target: &ProbeTarget) -> PathStatus {
    let connect = TcpStream::connect((target.host.as_str(), target.port));
    match tokio::time::timeout(target.timeout, connect).await {
        Ok(Ok(_)) => PathStatus::Satisfied,
        Ok(Err(e)) => {
            log::debug!("Connectivity probe failed: {e}");
            PathStatus::Unsatisfied
        }
        Err(_) => {
            log::debug!("Connectivity probe timed out after {:?}", target.timeout);
            PathStatus::Unsatisfied
        }
    }
}

/// Owns the probe task; dropping it stops probing.
#[derive(Debug)]
pub struct ProbeHandle(JoinHandle<()>);

impl ProbeHandle {
    pub fn abort(&self) {
        self.0.abort();
    }
}

impl Drop for ProbeHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}
