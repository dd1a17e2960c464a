use std::collections::HashMap;

use parking_lot::Mutex;

use crate::application::services::{ActionKind, Banner, ControlState, ResultView, UiSurface};

#[derive(Default)]
struct Regions {
    views: HashMap<ActionKind, ResultView>,
    banner: Option<Banner>,
    banner_history: Vec<Banner>,
    controls: Vec<(ActionKind, ControlState, String)>,
    api_online: Option<bool>,
}

/// Surface that keeps everything it is asked to paint in memory.
///
/// Used by tests and as the backing store for headless front-ends that poll
/// for the current picture.
#[derive(Default)]
pub struct MemorySurface {
    regions: Mutex<Regions>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last view rendered for `kind`, if any.
    pub fn view(&self, kind: ActionKind) -> Option<ResultView> {
        self.regions.lock().views.get(&kind).cloned()
    }

    /// Banner currently displayed.
    pub fn banner(&self) -> Option<Banner> {
        self.regions.lock().banner.clone()
    }

    /// Every banner ever shown, oldest first.
    pub fn banner_history(&self) -> Vec<Banner> {
        self.regions.lock().banner_history.clone()
    }

    /// Control transitions reported for `kind`, oldest first.
    pub fn control_trace(&self, kind: ActionKind) -> Vec<ControlState> {
        self.regions
            .lock()
            .controls
            .iter()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, state, _)| *state)
            .collect()
    }

    /// Label currently shown on the `kind` control.
    pub fn control_label(&self, kind: ActionKind) -> Option<String> {
        self.regions
            .lock()
            .controls
            .iter()
            .rev()
            .find(|(k, _, _)| *k == kind)
            .map(|(_, _, label)| label.clone())
    }

    pub fn api_online(&self) -> Option<bool> {
        self.regions.lock().api_online
    }
}

impl UiSurface for MemorySurface {
    fn render(&self, kind: ActionKind, view: &ResultView) {
        self.regions.lock().views.insert(kind, view.clone());
    }

    fn show_banner(&self, banner: &Banner) {
        let mut regions = self.regions.lock();
        regions.banner = Some(banner.clone());
        regions.banner_history.push(banner.clone());
    }

    fn dismiss_banner(&self, id: u64) {
        let mut regions = self.regions.lock();
        if regions.banner.as_ref().is_some_and(|b| b.id == id) {
            regions.banner = None;
        }
    }

    fn set_control(&self, kind: ActionKind, state: ControlState, label: &str) {
        self.regions
            .lock()
            .controls
            .push((kind, state, label.to_string()));
    }

    fn set_api_status(&self, online: bool) {
        self.regions.lock().api_online = Some(online);
    }
}
