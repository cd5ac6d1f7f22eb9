//! Browser front end: Leaflet map, DOM controls and HTTP, driving a
//! [`viewer::Viewer`].

use console_error_panic_hook::set_once;
use std::cell::RefCell;
use tracing::{error, info};
use viewer::{Nav, Viewer, ViewerConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

mod dom;
mod fetch;
mod leaflet;
mod logging;

use dom::{DomControls, MULTIPLIER_ID, RESOLUTION_ID, element, selector_values};
use leaflet::{LeafletSurface, MouseEvent};

pub const MAP_CONTAINER_ID: &str = "map";

type WebViewer = Viewer<LeafletSurface, DomControls>;

thread_local! {
    static VIEWER: RefCell<Option<WebViewer>> = const { RefCell::new(None) };
}

/// Runs `f` against the viewer, if it has been launched and is not already
/// borrowed further up the stack.
fn with_viewer<R>(f: impl FnOnce(&mut WebViewer) -> R) -> Option<R> {
    VIEWER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.as_mut().map(f),
        Err(_) => {
            error!("viewer re-entered while busy");
            None
        }
    })
}

/// Queues `f` to run against the viewer once the current JS callback (and any
/// viewer borrow it holds) has returned.
pub(crate) fn dispatch(f: impl FnOnce(&mut WebViewer) + 'static) {
    spawn_local(async move {
        with_viewer(f);
    });
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    logging::init();
    Ok(())
}

/// Builds the viewer inside `#map` and wires every page event to it.
///
/// `config_json` overrides [`ViewerConfig`] fields; `None` or blank keeps the
/// defaults.
#[wasm_bindgen]
pub fn launch(config_json: Option<String>) -> Result<(), JsValue> {
    let config = ViewerConfig::from_json(config_json.as_deref().unwrap_or_default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let doc = document()?;

    let surface = LeafletSurface::new(MAP_CONTAINER_ID, &config)?;
    let controls = DomControls::from_document(&doc)?;
    wire_map(surface.map());
    wire_nav(&controls);
    wire_selectors(&doc)?;

    VIEWER.with(|cell| {
        *cell.borrow_mut() = Some(Viewer::new(config, surface, controls));
    });
    info!("viewer launched");

    refresh_coverage();
    apply_selectors();
    Ok(())
}

fn wire_map(map: &leaflet::Map) {
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(|e: MouseEvent| {
        let at = e.position();
        with_viewer(|v| v.update_cursor_rect(at));
    });
    map.on("mousemove", on_move.as_ref().unchecked_ref());
    on_move.forget();

    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(|_e: MouseEvent| {
        let today = chrono::Local::now().date_naive();
        with_viewer(|v| v.on_click(today));
    });
    map.on("click", on_click.as_ref().unchecked_ref());
    on_click.forget();

    // Popups may pan the map while the viewer is borrowed.
    let on_moveend = Closure::<dyn FnMut()>::new(|| spawn_local(async { refresh_coverage() }));
    map.on("moveend", on_moveend.as_ref().unchecked_ref());
    on_moveend.forget();
}

fn wire_nav(controls: &DomControls) {
    for (nav, button) in controls.buttons() {
        let nav: Nav = *nav;
        let on_click = Closure::<dyn FnMut()>::new(move || {
            with_viewer(|v| v.navigate(nav));
        });
        if let Err(err) =
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        {
            error!(?err, nav = nav.as_str(), "cannot listen on nav button");
        }
        on_click.forget();
    }
}

fn wire_selectors(doc: &Document) -> Result<(), JsValue> {
    for id in [RESOLUTION_ID, MULTIPLIER_ID] {
        let select: web_sys::HtmlSelectElement = element(doc, id)?;
        let on_input = Closure::<dyn FnMut()>::new(apply_selectors);
        select.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();
    }
    Ok(())
}

/// Pushes the selector values into the viewer; bad values are logged there
/// and the previous resolution kept.
fn apply_selectors() {
    let values = document().and_then(|doc| selector_values(&doc));
    match values {
        Ok((resolution, multiplier)) => {
            with_viewer(|v| {
                let _ = v.set_resolution(&resolution, &multiplier);
            });
        }
        Err(err) => error!(?err, "cannot read resolution selectors"),
    }
}

/// Fetches coverage for the current viewport and applies it when it lands.
fn refresh_coverage() {
    let Some((ticket, url)) = with_viewer(|v| {
        let query = v.begin_coverage_update();
        (query.ticket, v.coverage_url(&query))
    }) else {
        return;
    };
    spawn_local(async move {
        let result = fetch::fetch_coverage(&url).await;
        with_viewer(|v| v.apply_coverage(ticket, result));
    });
}
