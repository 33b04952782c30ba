//! Capture configuration.

use std::time::Duration;

/// Options for constructing a [`crate::Capture`].
///
/// The defaults reproduce the visualizer's presentation tuning; all of them
/// are overridable because none is a hard invariant of the capture flow.
///
/// # Example
///
/// ```ignore
/// let options = CaptureOptions::default()
///     .silent(true)
///     .panel_wait_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Suppress the save-confirmation log line from `grab`.
    pub silent: bool,
    /// How long to wait for the stats panel to appear before UI removal.
    pub panel_wait_timeout: Duration,
    /// Intensity applied to the positive-X point light at construction.
    pub point_light_intensity: f64,
    /// Intensity applied to the spot light at construction.
    pub spot_light_intensity: f64,
    /// Extra command-line arguments for the browser process.
    pub chrome_args: Vec<String>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            silent: false,
            panel_wait_timeout: Duration::from_secs(10),
            point_light_intensity: 100.0,
            spot_light_intensity: 40.0,
            chrome_args: Vec::new(),
        }
    }
}

impl CaptureOptions {
    /// Suppress the save-confirmation log line.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Bound the wait for the stats panel during construction.
    pub fn panel_wait_timeout(mut self, timeout: Duration) -> Self {
        self.panel_wait_timeout = timeout;
        self
    }

    /// Override the point-light intensity default.
    pub fn point_light_intensity(mut self, intensity: f64) -> Self {
        self.point_light_intensity = intensity;
        self
    }

    /// Override the spot-light intensity default.
    pub fn spot_light_intensity(mut self, intensity: f64) -> Self {
        self.spot_light_intensity = intensity;
        self
    }

    /// Append extra command-line arguments for the browser process.
    pub fn chrome_args(mut self, args: Vec<String>) -> Self {
        self.chrome_args = args;
        self
    }
}
