use chrono::NaiveDate;
use foundation::math::project;
use foundation::{CaptureDate, LatLng, LatLngBounds};

use crate::resolution::Resolution;

/// Parameters for the backend render endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Crop origin in pixels at `zoom`.
    pub x: i64,
    pub y: i64,
    pub xres: u32,
    pub yres: u32,
    pub zoom: u8,
    pub date: Option<CaptureDate>,
    pub downsample: u32,
}

impl DownloadRequest {
    /// Crop anchored at the north-west corner of `selection`.
    pub fn for_selection(
        selection: LatLngBounds,
        resolution: &Resolution,
        zoom: u8,
        date: Option<CaptureDate>,
    ) -> Self {
        let origin = project(selection.north_west(), f64::from(zoom)).round();
        Self {
            x: origin.x as i64,
            y: origin.y as i64,
            xres: resolution.xres(),
            yres: resolution.yres(),
            zoom,
            date,
            downsample: resolution.downsample(),
        }
    }

    /// `{path}?x=&y=&xres=&yres=&zoom=&date=&downsample=`; an unset date is sent empty.
    pub fn url(&self, path: &str) -> String {
        let date = self.date.map(|d| d.to_string()).unwrap_or_default();
        format!(
            "{path}?x={}&y={}&xres={}&yres={}&zoom={}&date={date}&downsample={}",
            self.x, self.y, self.xres, self.yres, self.zoom, self.downsample
        )
    }
}

/// `{today}_{W}x{H}_{lat}_{lng}_screenshot.jpg`, coordinates to 5 decimals.
pub fn screenshot_filename(today: NaiveDate, resolution: &Resolution, center: LatLng) -> String {
    format!(
        "{}_{}x{}_{:.5}_{:.5}_screenshot.jpg",
        today.format("%Y-%m-%d"),
        resolution.output_width(),
        resolution.output_height(),
        center.lat,
        center.lng
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub filename: String,
    pub url: String,
}

impl DownloadLink {
    pub fn anchor_html(&self) -> String {
        format!(
            "<a download=\"{}\" href=\"{}\">Download</a>",
            self.filename,
            self.url.replace('&', "&amp;")
        )
    }
}
