//! Service layer orchestrating actions, health probing and notifications.

mod action_service;
mod actions;
mod controls;
mod health_monitor;
mod notifier;
mod render;

pub use action_service::{ActionService, Dispatch};
pub use actions::{descriptor, ActionDescriptor, ActionInput, ActionKind};
pub use controls::{ControlBoard, ControlState, PendingControl};
pub use health_monitor::HealthMonitor;
pub use notifier::{Banner, BannerKind, Notifier, UiSurface};
pub use render::{
    AnswerView, EncodeView, ResultView, SearchItemView, SearchView, SimilarityView, TransformView,
    TriadRow, TriadView,
};
