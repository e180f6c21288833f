//! VPN client launch.
//!
//! Runs the OpenVPN client in the foreground with the selected profile and
//! CA certificate, and waits until it exits or the user interrupts it.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use tokio::process::Command;

use crate::config::{Config, CONNECT_SHUTDOWN_GRACE_SECS};

/// How a connection attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The client exited successfully
    Completed,
    /// The user interrupted the session; the client was stopped
    Disconnected,
    /// The client could not be started or exited with an error
    Failed {
        /// The full command line that was run
        command: String,
        /// Exit code, if the client ran and exited normally
        status: Option<i32>,
    },
}

/// Launches the VPN client.
#[derive(Debug, Clone)]
pub struct Connector {
    program: String,
    shutdown_grace: Duration,
}

impl Connector {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            shutdown_grace: Duration::from_secs(CONNECT_SHUTDOWN_GRACE_SECS),
        }
    }

    /// How long the client may take to exit after Ctrl-C before it is killed.
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.openvpn_command.clone())
    }

    /// Renders `<client> --config <profile> --ca <ca> [extra...]`.
    pub fn command_line(&self, profile: &Path, ca: &Path, extra: &[String]) -> String {
        let mut parts = vec![
            self.program.clone(),
            "--config".to_string(),
            profile.display().to_string(),
            "--ca".to_string(),
            ca.display().to_string(),
        ];
        parts.extend(extra.iter().cloned());
        parts.join(" ")
    }

    /// Runs the client until it exits or Ctrl-C is pressed.
    ///
    /// Failures are logged and reported in the outcome, never raised.
    pub async fn connect(&self, profile: &Path, ca: &Path, extra: &[String]) -> ConnectOutcome {
        let interrupt = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };
        self.run_until(profile, ca, extra, interrupt).await
    }

    async fn run_until<F>(
        &self,
        profile: &Path,
        ca: &Path,
        extra: &[String],
        interrupt: F,
    ) -> ConnectOutcome
    where
        F: Future<Output = ()>,
    {
        let command = self.command_line(profile, ca, extra);
        log::info!("Running {}", command);

        let mut child = match Command::new(&self.program)
            .arg("--config")
            .arg(profile)
            .arg("--ca")
            .arg(ca)
            .args(extra)
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                log::error!("Failed to start {}: {}", command, e);
                return ConnectOutcome::Failed {
                    command,
                    status: None,
                };
            }
        };

        // The terminal delivers SIGINT to the client as well, so its exit may
        // race the interrupt; checking the interrupt first keeps that a disconnect
        let waited = tokio::select! {
            biased;
            _ = interrupt => None,
            status = child.wait() => Some(status),
        };

        match waited {
            Some(Ok(status)) if status.success() => ConnectOutcome::Completed,
            Some(Ok(status)) => {
                log::error!("{} exited with {}", command, status);
                ConnectOutcome::Failed {
                    command,
                    status: status.code(),
                }
            }
            Some(Err(e)) => {
                log::error!("Lost track of {}: {}", command, e);
                ConnectOutcome::Failed {
                    command,
                    status: None,
                }
            }
            None => {
                log::info!("Interrupted, waiting for {} to shut down", self.program);
                match tokio::time::timeout(self.shutdown_grace, child.wait()).await {
                    Ok(Ok(status)) => log::debug!("{} exited with {}", self.program, status),
                    Ok(Err(e)) => log::warn!("Lost track of {}: {}", self.program, e),
                    Err(_) => {
                        log::warn!(
                            "{} still running after {:?}, killing it",
                            self.program,
                            self.shutdown_grace
                        );
                        // kill() also reaps the child
                        if let Err(e) = child.kill().await {
                            log::warn!("Failed to stop {}: {}", self.program, e);
                        }
                    }
                }
                ConnectOutcome::Disconnected
            }
        }
    }
}
