//! The capture controller.
//!
//! Owns one headless browser pointed at the visualizer's page, applies the
//! presentation fixes (lighting, UI removal) at construction, and exposes
//! `look_at` / `grab` until disposed.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use vizshot_protocol::{Pose, PropertyValue, Vector3, Viewport};
use vizshot_runtime::{BrowserControl, Error, HeadlessBrowser, Result};

use crate::js;
use crate::nodes;
use crate::options::CaptureOptions;
use crate::session::Session;

/// Spot light offset from the point of interest.
const SPOT_LIGHT_OFFSET: Vector3 = Vector3::new(0.0, -5.0, 1.0);
/// Positive-X point light offset from the point of interest.
const POINT_LIGHT_POSITIVE_X_OFFSET: Vector3 = Vector3::new(2.0, 0.0, 2.0);
/// Negative-X point light offset from the point of interest.
const POINT_LIGHT_NEGATIVE_X_OFFSET: Vector3 = Vector3::new(-2.0, 0.0, 2.0);

/// Captures clean screenshots of a running scene visualizer.
///
/// Construction launches a headless browser, navigates it to the session's
/// page, applies the lighting defaults, and strips the on-screen UI. After
/// that the controller is `Ready`: position the view with [`look_at`], save
/// frames with [`grab`], and dispose with [`close`].
///
/// Disposal is explicit and idempotent; if the controller is dropped while
/// still open, the browser process is force-terminated as a backstop.
///
/// # Example
///
/// ```ignore
/// let mut capture = Capture::launch(session, Viewport::new(1080, 720),
///     CaptureOptions::default()).await?;
///
/// // set up the scene here
///
/// capture.grab("filename.png").await?;
/// capture.close().await?;
/// ```
///
/// [`look_at`]: Capture::look_at
/// [`grab`]: Capture::grab
/// [`close`]: Capture::close
pub struct Capture {
    session: Arc<dyn Session>,
    browser: Box<dyn BrowserControl>,
    options: CaptureOptions,
    closed: bool,
}

impl Capture {
    /// Launch a headless browser against the session's page and prepare it
    /// for capturing.
    ///
    /// # Errors
    ///
    /// Fails if the browser cannot launch, navigation does not complete,
    /// the navigated URL does not match the session's base URL, or the
    /// stats panel never appears within the configured wait. A failed
    /// construction terminates the browser; no partial controller survives.
    pub async fn launch(
        session: Arc<dyn Session>,
        viewport: Viewport,
        options: CaptureOptions,
    ) -> Result<Self> {
        let browser = HeadlessBrowser::launch(viewport, &options.chrome_args).await?;
        Self::with_browser(session, Box::new(browser), options).await
    }

    /// Prepare a capture controller on top of an already-launched browser.
    ///
    /// The browser is expected to have its window size fixed already; this
    /// constructor performs the same navigation, lighting, and UI-removal
    /// steps as [`Capture::launch`]. Tests use it to substitute a mock
    /// [`BrowserControl`] implementation.
    pub async fn with_browser(
        session: Arc<dyn Session>,
        mut browser: Box<dyn BrowserControl>,
        options: CaptureOptions,
    ) -> Result<Self> {
        match Self::prepare(session.as_ref(), browser.as_mut(), &options).await {
            Ok(()) => Ok(Self {
                session,
                browser,
                options,
                closed: false,
            }),
            Err(e) => {
                browser.force_terminate();
                Err(e)
            }
        }
    }

    async fn prepare(
        session: &dyn Session,
        browser: &mut dyn BrowserControl,
        options: &CaptureOptions,
    ) -> Result<()> {
        let url = session.web_url();
        debug!(target = "vizshot", %url, "navigating to visualizer");
        browser.navigate(&url).await?;

        // The page under manipulation must be the session's page. Checked
        // once, after the first navigation.
        let current = browser.current_url().await?;
        if current != url {
            return Err(Error::UrlMismatch {
                expected: url,
                actual: current,
            });
        }

        Self::set_default_lighting(session, options).await?;
        Self::remove_panels(browser, options).await?;

        Ok(())
    }

    /// Enable shadows and apply the configured intensities to the two
    /// construction-time lights.
    async fn set_default_lighting(session: &dyn Session, options: &CaptureOptions) -> Result<()> {
        session
            .set_property(
                nodes::POINT_LIGHT_POSITIVE_X,
                "castShadow",
                PropertyValue::Bool(true),
            )
            .await?;
        session
            .set_property(nodes::SPOT_LIGHT, "castShadow", PropertyValue::Bool(true))
            .await?;
        session
            .set_property(
                nodes::POINT_LIGHT_POSITIVE_X,
                "intensity",
                PropertyValue::Number(options.point_light_intensity),
            )
            .await?;
        session
            .set_property(
                nodes::SPOT_LIGHT,
                "intensity",
                PropertyValue::Number(options.spot_light_intensity),
            )
            .await?;
        Ok(())
    }

    /// Strip the stats plot and the settings control panel from the page.
    ///
    /// The wait pins down the page's initial render before either removal
    /// script runs; the scripts then run in a fixed order.
    async fn remove_panels(
        browser: &mut dyn BrowserControl,
        options: &CaptureOptions,
    ) -> Result<()> {
        browser
            .wait_for_element(js::STATS_PANEL_SELECTOR, options.panel_wait_timeout)
            .await?;

        browser.execute(js::remove_stats_panel_js()).await?;
        browser.execute(js::remove_control_panels_js()).await?;

        debug!(target = "vizshot", "ui panels removed");
        Ok(())
    }

    fn ensure_ready(&self, operation: &str) -> Result<()> {
        if self.closed {
            return Err(Error::TargetClosed {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    /// Aim the camera and lighting rig at a point of interest.
    ///
    /// Places the camera at `point_of_interest + cam_pos_local` targeting
    /// `point_of_interest`, then moves the three lights to fixed offsets
    /// around the point, each with identity orientation. Idempotent; no
    /// validation of the camera geometry is performed.
    pub async fn look_at(&mut self, point_of_interest: Vector3, cam_pos_local: Vector3) -> Result<()> {
        self.ensure_ready("look_at")?;

        self.session
            .set_camera_pose(point_of_interest + cam_pos_local, point_of_interest)
            .await?;

        self.session
            .set_transform(
                nodes::SPOT_LIGHT,
                Pose::at(point_of_interest + SPOT_LIGHT_OFFSET),
            )
            .await?;
        self.session
            .set_transform(
                nodes::POINT_LIGHT_POSITIVE_X,
                Pose::at(point_of_interest + POINT_LIGHT_POSITIVE_X_OFFSET),
            )
            .await?;
        self.session
            .set_transform(
                nodes::POINT_LIGHT_NEGATIVE_X,
                Pose::at(point_of_interest + POINT_LIGHT_NEGATIVE_X_OFFSET),
            )
            .await?;

        Ok(())
    }

    /// Capture the current frame and return the PNG bytes.
    pub async fn grab_bytes(&mut self) -> Result<Vec<u8>> {
        self.ensure_ready("grab")?;
        self.browser.screenshot().await
    }

    /// Capture the current frame and write it to `path`.
    ///
    /// Creates the parent directory if it does not exist. Unless the
    /// silence flag was set, logs a confirmation naming the saved path.
    pub async fn grab(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.grab_bytes().await?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| Error::Screenshot {
                path: path.to_path_buf(),
                source: e,
            })?;

        if !self.options.silent {
            info!(target = "vizshot", path = %path.display(), "saved page screenshot");
        }

        Ok(())
    }

    /// Dispose of the controller, terminating the browser process.
    ///
    /// Idempotent: the first call shuts the browser down, subsequent calls
    /// are no-ops. All other operations fail with `Error::TargetClosed`
    /// after this returns.
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.browser.shutdown().await
    }

    /// Whether this controller has been disposed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for Capture {
    /// Backstop for controllers dropped without [`Capture::close`]: the
    /// browser process is force-terminated so it cannot outlive its owner.
    fn drop(&mut self) {
        if !self.closed {
            debug!(target = "vizshot", "capture dropped while open; force-terminating browser");
            self.browser.force_terminate();
        }
    }
}
