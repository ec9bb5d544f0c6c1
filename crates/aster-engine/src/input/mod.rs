//! Platform-agnostic pointer input.
//!
//! The overlay only needs pointer buttons, pointer position, the wheel, and
//! the modifier state (centered scaling is decided by a modifier key at
//! gesture start). Hosts translate window-system events into [`InputEvent`]s
//! (a `winit` translation lives in [`platform`]) and feed them to an
//! [`InputState`] once per event, reading per-frame transitions from an
//! [`InputFrame`].

mod frame;
mod state;
mod types;

pub mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent,
    Modifiers,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
};
