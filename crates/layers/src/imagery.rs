use std::collections::VecDeque;

use foundation::CaptureDate;

use crate::layer::{Layer, LayerId};

/// Lifecycle of one dated imagery layer.
///
/// `Loaded` means every tile in view has been fetched, not that it has been
/// painted; the widget reports the former.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageryLayer {
    id: LayerId,
    pub date: CaptureDate,
    pub url_template: String,
    pub state: LoadState,
}

impl Layer for ImageryLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}

/// URL template for the dated tile endpoint, e.g. `/tiles/{z}/{x}/{y}?date=2024-01-01`.
pub fn tile_url_template(tiles_path: &str, date: CaptureDate) -> String {
    format!(
        "{}/{{z}}/{{x}}/{{y}}?date={date}",
        tiles_path.trim_end_matches('/')
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerStackError {
    UnknownLayer(LayerId),
}

impl std::fmt::Display for LayerStackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerStackError::UnknownLayer(id) => {
                write!(f, "{id} is not in the imagery stack (already superseded?)")
            }
        }
    }
}

impl std::error::Error for LayerStackError {}

/// FIFO of imagery layers, oldest at the head.
///
/// New layers are appended while older ones stay on screen. Once a layer
/// finishes loading every layer in front of it is released, so the head is
/// always the oldest imagery still worth displaying.
#[derive(Debug, Default)]
pub struct ImageryStack {
    next_id: u64,
    layers: VecDeque<ImageryLayer>,
}

impl ImageryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn head(&self) -> Option<&ImageryLayer> {
        self.layers.front()
    }

    pub fn get(&self, id: LayerId) -> Option<&ImageryLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageryLayer> {
        self.layers.iter()
    }

    /// Appends a pending layer for `date` and returns it.
    pub fn push(&mut self, date: CaptureDate, url_template: String) -> &ImageryLayer {
        self.next_id += 1;
        self.layers.push_back(ImageryLayer {
            id: LayerId(self.next_id),
            date,
            url_template,
            state: LoadState::Pending,
        });
        &self.layers[self.layers.len() - 1]
    }

    /// Marks `id` loaded and pops every older layer.
    ///
    /// Returns the released layers oldest first; the caller detaches them from
    /// the display. Repeated calls for the same layer release nothing.
    pub fn mark_loaded(&mut self, id: LayerId) -> Result<Vec<ImageryLayer>, LayerStackError> {
        let pos = self
            .layers
            .iter()
            .position(|l| l.id == id)
            .ok_or(LayerStackError::UnknownLayer(id))?;

        self.layers[pos].state = LoadState::Loaded;
        Ok(self.layers.drain(..pos).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageryStack, LayerStackError, LoadState, tile_url_template};
    use crate::layer::{Layer, LayerId};
    use foundation::CaptureDate;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> CaptureDate {
        CaptureDate::parse(s).unwrap()
    }

    fn push(stack: &mut ImageryStack, s: &str) -> LayerId {
        let d = date(s);
        stack.push(d, tile_url_template("/tiles", d)).id()
    }

    #[test]
    fn url_template_encodes_date() {
        assert_eq!(
            tile_url_template("/tiles/", date("2024-01-01")),
            "/tiles/{z}/{x}/{y}?date=2024-01-01"
        );
    }

    #[test]
    fn new_layers_start_pending_at_the_tail() {
        let mut stack = ImageryStack::new();
        let a = push(&mut stack, "2024-01-01");
        let b = push(&mut stack, "2024-02-01");
        assert_ne!(a, b);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.head().map(|l| l.id()), Some(a));
        assert_eq!(stack.get(b).map(|l| l.state), Some(LoadState::Pending));
    }

    #[test]
    fn loaded_layer_becomes_head() {
        let mut stack = ImageryStack::new();
        let a = push(&mut stack, "2024-01-01");
        let b = push(&mut stack, "2024-02-01");
        let c = push(&mut stack, "2024-03-01");

        let released: Vec<LayerId> = stack
            .mark_loaded(c)
            .unwrap()
            .iter()
            .map(|l| l.id())
            .collect();
        assert_eq!(released, vec![a, b]);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.head().map(|l| l.id()), Some(c));
        assert_eq!(stack.head().map(|l| l.state), Some(LoadState::Loaded));
    }

    #[test]
    fn middle_layer_loading_keeps_newer_pending_layers() {
        let mut stack = ImageryStack::new();
        let a = push(&mut stack, "2024-01-01");
        let b = push(&mut stack, "2024-02-01");
        let c = push(&mut stack, "2024-03-01");

        let released = stack.mark_loaded(b).unwrap();
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].id(), a);
        let ids: Vec<LayerId> = stack.iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec![b, c]);
        assert_eq!(stack.get(c).map(|l| l.state), Some(LoadState::Pending));
    }

    #[test]
    fn repeated_load_signal_releases_nothing() {
        let mut stack = ImageryStack::new();
        push(&mut stack, "2024-01-01");
        let b = push(&mut stack, "2024-02-01");
        assert_eq!(stack.mark_loaded(b).unwrap().len(), 1);
        assert!(stack.mark_loaded(b).unwrap().is_empty());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn superseded_layer_is_unknown() {
        let mut stack = ImageryStack::new();
        let a = push(&mut stack, "2024-01-01");
        let b = push(&mut stack, "2024-02-01");
        stack.mark_loaded(b).unwrap();
        assert_eq!(stack.mark_loaded(a), Err(LayerStackError::UnknownLayer(a)));
        assert_eq!(stack.len(), 1);
    }
}
