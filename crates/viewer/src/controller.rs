use chrono::NaiveDate;
use coverage::{CoverageError, CoverageQuery, CoverageTicket, CoverageTracker};
use foundation::{CaptureDate, LatLng, LatLngBounds};
use layers::{ImageryStack, Layer, LayerId, tile_url_template};
use tracing::{debug, error, warn};

use crate::config::ViewerConfig;
use crate::cursor::CursorRect;
use crate::dates::{CoverageChange, DateSelection, Nav, NavState};
use crate::download::{DownloadLink, DownloadRequest, screenshot_filename};
use crate::resolution::{Resolution, ResolutionError};
use crate::surface::{Controls, MapSurface, PopupId};

/// All viewer state plus the event handlers that mutate it.
///
/// Every handler runs to completion before the next one starts; the only
/// asynchronous pieces (coverage responses, tile loading) re-enter through
/// [`Viewer::apply_coverage`] and [`Viewer::on_layer_loaded`].
#[derive(Debug)]
pub struct Viewer<M, C> {
    config: ViewerConfig,
    map: M,
    controls: C,

    resolution: Resolution,
    cursor: CursorRect,
    selection: Option<(PopupId, LatLngBounds)>,
    next_popup: u64,

    dates: DateSelection,
    imagery: ImageryStack,
    coverage: CoverageTracker,
}

impl<M: MapSurface, C: Controls> Viewer<M, C> {
    pub fn new(config: ViewerConfig, map: M, controls: C) -> Self {
        Self {
            config,
            map,
            controls,
            resolution: Resolution::default(),
            cursor: CursorRect::default(),
            selection: None,
            next_popup: 0,
            dates: DateSelection::new(),
            imagery: ImageryStack::new(),
            coverage: CoverageTracker::new(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn cursor_bounds(&self) -> LatLngBounds {
        self.cursor.bounds()
    }

    pub fn selection_bounds(&self) -> Option<LatLngBounds> {
        self.selection.map(|(_, b)| b)
    }

    pub fn dates(&self) -> &DateSelection {
        &self.dates
    }

    pub fn selected_date(&self) -> Option<CaptureDate> {
        self.dates.selected()
    }

    pub fn imagery(&self) -> &ImageryStack {
        &self.imagery
    }

    // ── Resolution / cursor ─────────────────────────────────────────────

    /// Re-reads both selector values. On bad input the previous resolution
    /// stays in effect.
    pub fn set_resolution(
        &mut self,
        resolution: &str,
        multiplier: &str,
    ) -> Result<Resolution, ResolutionError> {
        let parsed = Resolution::parse(resolution, multiplier).inspect_err(|err| {
            warn!(%err, resolution, multiplier, "ignoring resolution change");
        })?;
        self.resolution = parsed;
        debug!(
            xres = parsed.xres(),
            yres = parsed.yres(),
            downsample = parsed.downsample(),
            "resolution changed"
        );

        let center = self.cursor.center();
        self.update_cursor_rect(center);
        Ok(parsed)
    }

    pub fn update_cursor_rect(&mut self, center: LatLng) {
        let bounds = self
            .cursor
            .move_to(center, &self.resolution, self.config.display_zoom_f64());
        self.map.set_cursor_rect(bounds);
    }

    // ── Coverage / dates ────────────────────────────────────────────────

    /// Starts a coverage lookup for the current viewport.
    pub fn begin_coverage_update(&mut self) -> CoverageQuery {
        let query = CoverageQuery::new(self.coverage.issue(), self.map.viewport());
        debug!(ticket = ?query.ticket, bounds = ?query.bounds, "coverage requested");
        query
    }

    pub fn coverage_url(&self, query: &CoverageQuery) -> String {
        query.url(&self.config.coverage_path)
    }

    /// Applies the answer to a coverage lookup.
    ///
    /// Returns `false` if the result was discarded: either a newer lookup
    /// already completed or it failed (the current dates and imagery stay
    /// up). A failure still counts as completed, so older lookups landing
    /// after it are dropped.
    pub fn apply_coverage(
        &mut self,
        ticket: CoverageTicket,
        result: Result<Vec<CaptureDate>, CoverageError>,
    ) -> bool {
        if !self.coverage.accept(ticket) {
            return false;
        }
        let dates = match result {
            Ok(dates) => dates,
            Err(err) => {
                error!(%err, ?ticket, "coverage update failed, keeping current dates");
                return false;
            }
        };

        debug!(?ticket, count = dates.len(), "coverage updated");
        match self.dates.replace(dates) {
            CoverageChange::NoCoverage => self.clear_date(),
            CoverageChange::Pick(date) if self.dates.selected() == Some(date) => {
                // Same imagery, but its position in the new list may differ.
                self.controls.set_nav_state(self.dates.nav_state());
            }
            CoverageChange::Pick(date) => self.pick_date(date),
        }
        true
    }

    /// Shows imagery for `date`. Does nothing if it is already selected.
    pub fn pick_date(&mut self, date: CaptureDate) {
        let Some(nav) = self.dates.select(date) else {
            return;
        };
        self.controls.set_nav_state(nav);
        self.controls.set_date_label(&date.to_string());

        let url = tile_url_template(&self.config.tiles_path, date);
        let id = self.imagery.push(date, url.clone()).id();
        debug!(%date, %id, pending = self.imagery.len(), "imagery layer added");
        self.map
            .add_imagery_layer(id, &url, &self.config.imagery_layer_options());
    }

    pub fn clear_date(&mut self) {
        if !self.dates.clear() {
            return;
        }
        self.controls.set_nav_state(NavState::disabled());
        self.controls.set_date_label(&self.config.no_imagery_label);
    }

    /// Handles a navigation button. Stepping past either end of the list is
    /// ignored.
    pub fn navigate(&mut self, nav: Nav) {
        match self.dates.target(nav) {
            Some(date) => self.pick_date(date),
            None => warn!(
                nav = nav.as_str(),
                selected = ?self.dates.selected(),
                "no date in that direction"
            ),
        }
    }

    // ── Imagery layers ──────────────────────────────────────────────────

    /// A layer finished fetching its tiles; drop everything older.
    pub fn on_layer_loaded(&mut self, id: LayerId) {
        match self.imagery.mark_loaded(id) {
            Ok(released) => {
                for layer in released {
                    debug!(id = %layer.id(), date = %layer.date, "imagery layer released");
                    self.map.remove_imagery_layer(layer.id());
                }
            }
            Err(err) => debug!(%err, "ignoring load signal"),
        }
    }

    // ── Download ────────────────────────────────────────────────────────

    /// Freezes the cursor rectangle as the selection and opens a download
    /// popup for it. `today` names the file.
    pub fn on_click(&mut self, today: NaiveDate) -> DownloadLink {
        let bounds = self.cursor.bounds();
        self.next_popup += 1;
        let popup = PopupId(self.next_popup);
        self.selection = Some((popup, bounds));
        self.map.show_selection(bounds);

        let request = DownloadRequest::for_selection(
            bounds,
            &self.resolution,
            self.config.display_zoom,
            self.dates.selected(),
        );
        if request.date.is_none() {
            warn!("download link built without an imagery date");
        }

        let center = bounds.center();
        let link = DownloadLink {
            filename: screenshot_filename(today, &self.resolution, center),
            url: request.url(&self.config.download_path),
        };
        self.map.open_download_popup(popup, center, &link);
        link
    }

    /// Hides the selection if `popup` is the one currently shown.
    pub fn on_popup_closed(&mut self, popup: PopupId) {
        match self.selection {
            Some((current, _)) if current == popup => {
                self.selection = None;
                self.map.hide_selection();
            }
            _ => debug!(?popup, "stale popup closed"),
        }
    }
}
