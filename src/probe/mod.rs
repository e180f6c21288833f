//! Reachability probing.
//!
//! Each server is probed by running an external command (by default a single
//! `ping`) against its IP and reading the round-trip time from its output.
//! Probes run concurrently up to a fixed limit. A failed probe only affects
//! its own record.

mod rtt;

use std::process::Stdio;
use std::time::Duration;

use futures::future::join_all;
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::catalog::ServerRecord;
use crate::config::{
    Config, DEFAULT_PROBE_COMMAND, PROBE_TARGET_PLACEHOLDER, PROBE_TIMEOUT_GRACE_SECS,
};
use crate::error_handling::ProbeError;

pub use rtt::parse_rtt;

/// A probe that did not yield a round-trip time.
#[derive(Debug)]
pub struct ProbeFailure {
    /// Hostname of the server, or its IP when it has none
    pub server: String,
    pub error: ProbeError,
}

/// Outcome of probing a batch of servers.
#[derive(Debug, Default)]
pub struct ProbeReport {
    /// Number of servers probed
    pub probed: usize,
    /// Failed probes, in input order
    pub failures: Vec<ProbeFailure>,
}

impl ProbeReport {
    pub fn succeeded(&self) -> usize {
        self.probed - self.failures.len()
    }
}

/// Runs the probe command against server IPs.
#[derive(Debug, Clone)]
pub struct Prober {
    program: String,
    args: Vec<String>,
    timeout_secs: u64,
    concurrency: usize,
}

impl Prober {
    /// `args` may contain `{ip}`, replaced by each server's address.
    ///
    /// `timeout_secs` is the probe's own reply timeout; the process is killed
    /// if it has not exited a short grace period after that.
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        timeout_secs: u64,
        concurrency: usize,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            timeout_secs,
            concurrency: concurrency.max(1),
        }
    }

    /// One `ping -c 1 -W <timeout> {ip}` per server.
    pub fn from_config(config: &Config) -> Self {
        let args = vec![
            "-c".to_string(),
            "1".to_string(),
            "-W".to_string(),
            config.probe_timeout_secs.to_string(),
            PROBE_TARGET_PLACEHOLDER.to_string(),
        ];
        Self::new(
            DEFAULT_PROBE_COMMAND,
            args,
            config.probe_timeout_secs,
            config.probe_concurrency,
        )
    }

    fn deadline(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.saturating_add(PROBE_TIMEOUT_GRACE_SECS))
    }

    /// Probes one address and returns its round-trip time in milliseconds.
    pub async fn probe(&self, ip: &str) -> Result<f64, ProbeError> {
        let args = self
            .args
            .iter()
            .map(|arg| arg.replace(PROBE_TARGET_PLACEHOLDER, ip));
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let deadline = self.deadline();
        let output = match tokio::time::timeout(deadline, output).await {
            Ok(result) => result.map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?,
            Err(_) => return Err(ProbeError::Timeout(deadline.as_secs())),
        };

        if !output.status.success() {
            return Err(ProbeError::Exit {
                status: output.status,
            });
        }
        parse_rtt(&String::from_utf8_lossy(&output.stdout)).ok_or(ProbeError::Unparsable)
    }

    /// Probes every server and records its round-trip time.
    ///
    /// Servers whose probe fails keep `rtt` unset. The slice keeps its
    /// length and order.
    pub async fn ping(&self, servers: &mut [ServerRecord]) -> ProbeReport {
        let semaphore = Semaphore::new(self.concurrency);
        let semaphore = &semaphore;

        let probes = servers.iter().map(|server| {
            let ip = server.ip.clone();
            async move {
                // The semaphore is never closed, so acquiring cannot fail
                let _permit = semaphore.acquire().await;
                self.probe(&ip).await
            }
        });
        let results = join_all(probes).await;

        let mut report = ProbeReport {
            probed: servers.len(),
            failures: Vec::new(),
        };
        for (server, result) in servers.iter_mut().zip(results) {
            match result {
                Ok(rtt) => server.rtt = Some(rtt),
                Err(error) => {
                    let name = if server.hostname.is_empty() {
                        server.ip.clone()
                    } else {
                        server.hostname.clone()
                    };
                    log::warn!("Probe of {} failed: {}", name, error);
                    server.rtt = None;
                    report.failures.push(ProbeFailure {
                        server: name,
                        error,
                    });
                }
            }
        }
        log::debug!(
            "Probed {} servers, {} answered",
            report.probed,
            report.succeeded()
        );
        report
    }
}
