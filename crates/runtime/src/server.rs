//! Chromedriver process management
//!
//! Handles launching the chromedriver process, waiting for it to accept
//! sessions, and terminating it.

use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::debug;

use vizshot_protocol::webdriver::{StatusValue, ValueEnvelope};

use crate::driver::get_driver_executable;
use crate::error::{Error, Result};

/// How long to wait for chromedriver to report ready after spawning.
const READY_TIMEOUT: Duration = Duration::from_secs(10);
/// Delay between readiness probes.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Manages the chromedriver process lifecycle
///
/// The DriverServer wraps a chromedriver child process listening on a
/// loopback port. The WebDriver client talks to it over HTTP; this type only
/// owns the process and its port.
#[derive(Debug)]
pub struct DriverServer {
    process: Child,
    port: u16,
}

impl DriverServer {
    /// Launch the chromedriver process
    ///
    /// This will:
    /// 1. Locate the chromedriver binary
    /// 2. Pick a free loopback port and spawn `chromedriver --port=N`
    /// 3. Poll `GET /status` until the driver reports ready
    ///
    /// # Errors
    ///
    /// Returns `Error::DriverNotFound` if the binary cannot be located.
    /// Returns `Error::LaunchFailed` if the process fails to start or exits
    /// immediately.
    /// Returns `Error::ConnectionFailed` if the driver never reports ready.
    pub async fn launch() -> Result<Self> {
        let exe = get_driver_executable()?;
        let port = free_loopback_port()?;

        debug!(target = "vizshot", exe = %exe.display(), port, "launching chromedriver");

        let mut child = Command::new(&exe)
            .arg(format!("--port={port}"))
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| Error::LaunchFailed(format!("Failed to spawn process: {}", e)))?;

        // Check if process started successfully
        tokio::time::sleep(Duration::from_millis(100)).await;

        match child.try_wait() {
            Ok(Some(status)) => {
                return Err(Error::LaunchFailed(format!(
                    "chromedriver exited immediately with status: {}",
                    status
                )));
            }
            Ok(None) => {
                // Process is still running, good!
            }
            Err(e) => {
                return Err(Error::LaunchFailed(format!(
                    "Failed to check process status: {}",
                    e
                )));
            }
        }

        let server = Self {
            process: child,
            port,
        };

        if let Err(e) = server.wait_until_ready().await {
            // Do not leak the half-started process on a failed launch.
            let mut server = server;
            server.start_kill();
            return Err(e);
        }

        Ok(server)
    }

    /// Base URL of the driver's HTTP endpoint.
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// The loopback port the driver listens on.
    pub fn port(&self) -> u16 {
        self.port
    }

    async fn wait_until_ready(&self) -> Result<()> {
        let status_url = format!("{}/status", self.base_url());
        let deadline = tokio::time::Instant::now() + READY_TIMEOUT;

        loop {
            if let Ok(response) = reqwest::get(&status_url).await {
                if let Ok(body) = response.json::<ValueEnvelope<StatusValue>>().await {
                    if body.value.ready {
                        debug!(target = "vizshot", port = self.port, "chromedriver ready");
                        return Ok(());
                    }
                }
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(Error::ConnectionFailed(format!(
                    "chromedriver did not report ready within {}s",
                    READY_TIMEOUT.as_secs()
                )));
            }

            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }

    /// Shut down the driver process gracefully
    ///
    /// Kills the process and waits for it to exit with a bounded wait.
    pub async fn shutdown(mut self) -> Result<()> {
        self.process
            .kill()
            .await
            .map_err(|e| Error::LaunchFailed(format!("Failed to kill process: {}", e)))?;

        let _ = tokio::time::timeout(Duration::from_secs(5), self.process.wait()).await;

        Ok(())
    }

    /// Begin force-killing the driver process without waiting.
    ///
    /// Used on teardown paths that cannot await (Drop, failed launches).
    pub fn start_kill(&mut self) {
        if let Err(e) = self.process.start_kill() {
            tracing::warn!(target = "vizshot", error = %e, "failed to kill chromedriver");
        }
    }
}

/// Ask the OS for a free loopback port.
///
/// The listener is dropped before chromedriver binds the port, which leaves
/// a small race window; chromedriver fails loudly on a taken port, so the
/// launch error surfaces rather than a silent misbind.
fn free_loopback_port() -> Result<u16> {
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0))?;
    let port = listener.local_addr()?.port();
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_port_is_nonzero() {
        let port = free_loopback_port().unwrap();
        assert_ne!(port, 0);
    }

    #[tokio::test]
    async fn test_server_launch_and_shutdown() {
        let result = DriverServer::launch().await;

        match result {
            Ok(server) => {
                println!("chromedriver launched on port {}", server.port());
                let shutdown_result = server.shutdown().await;
                assert!(
                    shutdown_result.is_ok(),
                    "Shutdown failed: {:?}",
                    shutdown_result
                );
            }
            Err(Error::DriverNotFound) => {
                eprintln!("chromedriver not installed; skipping launch test");
            }
            Err(Error::LaunchFailed(msg)) | Err(Error::ConnectionFailed(msg)) => {
                eprintln!("chromedriver present but unlaunchable here: {}", msg);
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }
}
