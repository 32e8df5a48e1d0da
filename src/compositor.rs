//! The boundary towards the compositor engine.
//!
//! The engine owns the protocol, the surfaces, rendering and the event loop. It calls into
//! [`Session`](crate::session::Session) with notifications and exposes the operations below in
//! return. Requests that change topology (`focus_space`, `focus_output`, `set_view_space`) are
//! answered by the engine with the matching notification once it has applied them.

use smithay::utils::{Logical, Physical, Rectangle, Size};

use crate::utils::spawning;
use crate::view::{OutputId, SpaceId, ViewId, ViewState};

/// Pixels read back from an output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixels {
    pub size: Size<i32, Physical>,
    /// RGBA, four bytes per pixel, rows ordered bottom to top.
    pub rgba: Vec<u8>,
}

pub trait Compositor {
    /// All outputs, in the engine's order.
    fn outputs(&self) -> Vec<OutputId>;

    /// Spaces of an output, in the engine's order.
    fn spaces(&self, output: OutputId) -> Vec<SpaceId>;

    fn space_output(&self, space: SpaceId) -> Option<OutputId>;

    /// Space currently shown on the output.
    fn active_space(&self, output: OutputId) -> Option<SpaceId>;

    fn focused_output(&self) -> Option<OutputId>;

    /// Active space of the focused output.
    fn focused_space(&self) -> Option<SpaceId> {
        self.focused_output()
            .and_then(|output| self.active_space(output))
    }

    fn resolution(&self, output: OutputId) -> Option<Size<i32, Logical>>;

    /// Appends a new space to the output.
    fn add_space(&mut self, output: OutputId) -> Option<SpaceId>;

    /// Shows the space on its output.
    fn focus_space(&mut self, space: SpaceId);

    fn focus_output(&mut self, output: OutputId);

    fn set_view_geometry(&mut self, view: ViewId, geometry: Rectangle<i32, Logical>);

    /// Sets or clears engine state bits. Never called with [`ViewState::MENU`].
    fn set_view_state(&mut self, view: ViewId, state: ViewState, enabled: bool);

    /// Moves the view to another space.
    fn set_view_space(&mut self, view: ViewId, space: SpaceId);

    /// Puts the view on top of its space's stacking order.
    fn bring_to_front(&mut self, view: ViewId);

    /// Gives keyboard focus to the view, or to nothing.
    fn focus_view(&mut self, view: Option<ViewId>);

    /// Asks the client to close the view.
    fn close_view(&mut self, view: ViewId);

    /// Stops the compositor.
    fn terminate(&mut self);

    /// Reads back the current contents of the output.
    fn output_pixels(&mut self, output: OutputId) -> Option<Pixels>;

    /// Starts a helper program without waiting for it.
    fn spawn(&mut self, command: &str) {
        if let Err(err) = spawning::spawn(command) {
            warn!("error spawning {command:?}: {err:?}");
        }
    }
}
