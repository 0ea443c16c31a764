//! Messages exchanged between the UI loop, the App actor and the Network actor.
//!
//! UI -> App: [`UiEvent`]; App -> Network: [`NetworkCommand`];
//! Network -> App: [`NetworkResponse`]; App -> UI: [`RenderState`].

pub mod network;
pub mod render;
pub mod ui_events;

pub use network::{NetworkCommand, NetworkResponse};
pub use render::RenderState;
pub use ui_events::{InputMode, Panel, UiEvent};
