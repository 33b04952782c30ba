//! DOM-mutation scripts for stripping the visualizer's on-screen UI.
//!
//! Two scripts run in a fixed order during construction, after a bounded
//! wait locates the stats panel: the first removes the stats plot, the
//! second clears the settings control panel. The second script is layered
//! (remove by class, remove the named container, hide stragglers) because
//! the control panel's DOM shape varies across visualizer versions.

/// Element id of the performance-stats plot.
pub const STATS_PANEL_ID: &str = "stats-plot";

/// CSS selector that locates the stats plot.
pub const STATS_PANEL_SELECTOR: &str = "#stats-plot";

/// Removes the stats plot if present.
pub fn remove_stats_panel_js() -> &'static str {
    r#"
        var element = document.getElementById('stats-plot');
        if (element) {
            element.remove();
        }
    "#
}

/// Removes the settings control panel.
///
/// The panel may have zero, one, or multiple matching elements depending on
/// the visualizer's UI-toolkit version, so removal happens in three layers:
/// delete all `.dg.main` roots, delete the named container, then hide any
/// remaining `.dg` elements via a style override.
pub fn remove_control_panels_js() -> &'static str {
    r#"
        var panels = document.getElementsByClassName('dg main');
        while (panels.length > 0) {
            panels[0].remove();
        }

        var container = document.getElementById('dat-gui-container');
        if (container) {
            container.remove();
        }

        document.querySelectorAll('.dg').forEach(function(element) {
            element.style.display = 'none';
        });
    "#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_removal_targets_the_stats_id() {
        assert!(remove_stats_panel_js().contains(STATS_PANEL_ID));
    }

    #[test]
    fn control_removal_covers_all_three_layers() {
        let script = remove_control_panels_js();
        assert!(script.contains("dg main"));
        assert!(script.contains("dat-gui-container"));
        assert!(script.contains("display = 'none'"));
    }
}
