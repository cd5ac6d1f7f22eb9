//! Leaflet bindings and the [`MapSurface`] implementation over them.

use std::collections::BTreeMap;

use foundation::{LatLng, LatLngBounds};
use layers::LayerId;
use layers::symbology::{RectangleStyle, TileLayerOptions};
use serde::Serialize;
use tracing::error;
use viewer::{DownloadLink, MapSurface, PopupId, ViewerConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn new_map(id: &str, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;

    #[wasm_bindgen(method, js_name = getBounds)]
    fn get_bounds(this: &Map) -> JsBounds;

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &Map, layer: &Layer) -> Map;

    #[wasm_bindgen(method, js_name = on)]
    pub fn on(this: &Map, event: &str, handler: &js_sys::Function) -> Map;

    #[wasm_bindgen(method, getter, js_name = doubleClickZoom)]
    fn double_click_zoom(this: &Map) -> Handler;

    #[derive(Debug, Clone)]
    type Handler;

    #[wasm_bindgen(method)]
    fn disable(this: &Handler);

    #[derive(Debug, Clone)]
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &Map) -> Layer;

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &Layer, event: &str, handler: &js_sys::Function) -> Layer;

    #[wasm_bindgen(method, js_name = off)]
    fn off(this: &Layer, event: &str, handler: &js_sys::Function) -> Layer;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn new_tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    type Rectangle;

    #[wasm_bindgen(js_namespace = L, js_name = rectangle)]
    fn new_rectangle(bounds: &JsValue, options: &JsValue) -> Rectangle;

    #[wasm_bindgen(method, js_name = setBounds)]
    fn set_bounds(this: &Rectangle, bounds: &JsValue) -> Rectangle;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    type Popup;

    #[wasm_bindgen(js_namespace = L, js_name = popup)]
    fn new_popup(latlng: &JsValue, options: &JsValue) -> Popup;

    #[wasm_bindgen(method, js_name = openOn)]
    fn open_on(this: &Popup, map: &Map) -> Popup;

    #[derive(Debug, Clone)]
    type JsBounds;

    #[wasm_bindgen(method, js_name = getWest)]
    fn get_west(this: &JsBounds) -> f64;

    #[wasm_bindgen(method, js_name = getSouth)]
    fn get_south(this: &JsBounds) -> f64;

    #[wasm_bindgen(method, js_name = getEast)]
    fn get_east(this: &JsBounds) -> f64;

    #[wasm_bindgen(method, js_name = getNorth)]
    fn get_north(this: &JsBounds) -> f64;

    /// Leaflet mouse event (`click`, `mousemove`).
    #[derive(Debug, Clone)]
    pub type MouseEvent;

    #[wasm_bindgen(method, getter)]
    fn latlng(this: &MouseEvent) -> JsLatLng;

    #[derive(Debug, Clone)]
    type JsLatLng;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &JsLatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &JsLatLng) -> f64;
}

impl MouseEvent {
    pub fn position(&self) -> LatLng {
        let p = self.latlng();
        LatLng::new(p.lat(), p.lng())
    }
}

/// Serialises `value` into a plain JS options object.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

fn latlng_to_js(p: LatLng) -> JsValue {
    js_sys::Array::of2(&JsValue::from_f64(p.lat), &JsValue::from_f64(p.lng)).into()
}

fn bounds_to_js(b: LatLngBounds) -> JsValue {
    js_sys::Array::of2(&latlng_to_js(b.south_west()), &latlng_to_js(b.north_east())).into()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    fade_animation: bool,
}

#[derive(Serialize)]
struct PopupOptions<'a> {
    content: &'a str,
}

/// A Leaflet object together with the Rust closure listening on it.
///
/// The listener is detached before the closure is dropped so Leaflet never
/// calls into freed memory.
struct Listened<T: AsRef<Layer>> {
    layer: T,
    event: &'static str,
    handler: Closure<dyn FnMut()>,
}

impl<T: AsRef<Layer>> Listened<T> {
    fn new(layer: T, event: &'static str, handler: Closure<dyn FnMut()>) -> Self {
        layer
            .as_ref()
            .on(event, handler.as_ref().unchecked_ref());
        Self {
            layer,
            event,
            handler,
        }
    }
}

impl<T: AsRef<Layer>> Drop for Listened<T> {
    fn drop(&mut self) {
        self.layer
            .as_ref()
            .off(self.event, self.handler.as_ref().unchecked_ref());
    }
}

pub struct LeafletSurface {
    map: Map,
    cursor: Rectangle,
    selection: Rectangle,
    imagery: BTreeMap<LayerId, Listened<TileLayer>>,
    popup: Option<Listened<Popup>>,
}

impl std::fmt::Debug for LeafletSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeafletSurface")
            .field("imagery_layers", &self.imagery.keys().collect::<Vec<_>>())
            .field("popup_open", &self.popup.is_some())
            .finish()
    }
}

impl LeafletSurface {
    /// Creates the map inside element `container_id` with the base layer and
    /// the cursor rectangle attached.
    pub fn new(container_id: &str, config: &ViewerConfig) -> Result<Self, JsValue> {
        let map = new_map(
            container_id,
            &to_js(&MapOptions {
                fade_animation: false,
            })?,
        );
        map.set_view(
            &latlng_to_js(config.initial_center),
            f64::from(config.initial_zoom),
        );
        map.double_click_zoom().disable();

        new_tile_layer(&config.base_layer_url, &to_js(&config.base_layer_options())?)
            .add_to(&map);

        let empty = bounds_to_js(LatLngBounds::point(LatLng::new(0.0, 0.0)));
        let cursor = new_rectangle(&empty, &to_js(&RectangleStyle::cursor())?);
        cursor.add_to(&map);
        let selection = new_rectangle(&empty, &to_js(&RectangleStyle::selection())?);

        Ok(Self {
            map,
            cursor,
            selection,
            imagery: BTreeMap::new(),
            popup: None,
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }
}

impl MapSurface for LeafletSurface {
    fn viewport(&self) -> LatLngBounds {
        let b = self.map.get_bounds();
        LatLngBounds::from_corners(
            LatLng::new(b.get_south(), b.get_west()),
            LatLng::new(b.get_north(), b.get_east()),
        )
    }

    fn add_imagery_layer(&mut self, id: LayerId, url_template: &str, options: &TileLayerOptions) {
        let options = match to_js(options) {
            Ok(o) => o,
            Err(err) => {
                error!(?err, %id, "tile layer options not serialisable");
                return;
            }
        };
        let layer = new_tile_layer(url_template, &options);
        let on_load = Closure::<dyn FnMut()>::new(move || {
            crate::dispatch(move |v| v.on_layer_loaded(id));
        });
        let listened = Listened::new(layer, "load", on_load);
        listened.layer.add_to(&self.map);
        self.imagery.insert(id, listened);
    }

    fn remove_imagery_layer(&mut self, id: LayerId) {
        if let Some(listened) = self.imagery.remove(&id) {
            self.map.remove_layer(&listened.layer);
        }
    }

    fn set_cursor_rect(&mut self, bounds: LatLngBounds) {
        self.cursor.set_bounds(&bounds_to_js(bounds));
    }

    fn show_selection(&mut self, bounds: LatLngBounds) {
        self.selection.set_bounds(&bounds_to_js(bounds));
        self.selection.add_to(&self.map);
    }

    fn hide_selection(&mut self) {
        self.map.remove_layer(&self.selection);
    }

    fn open_download_popup(&mut self, popup: PopupId, at: LatLng, link: &DownloadLink) {
        let anchor = link.anchor_html();
        let options = match to_js(&PopupOptions { content: &anchor }) {
            Ok(o) => o,
            Err(err) => {
                error!(?err, "popup options not serialisable");
                return;
            }
        };
        let js_popup = new_popup(&latlng_to_js(at), &options);
        let on_remove = Closure::<dyn FnMut()>::new(move || {
            crate::dispatch(move |v| v.on_popup_closed(popup));
        });
        let listened = Listened::new(js_popup, "remove", on_remove);
        // Opening closes any previous popup, which fires its `remove` while
        // its listener is still alive; only then is it replaced.
        listened.layer.open_on(&self.map);
        self.popup = Some(listened);
    }
}
