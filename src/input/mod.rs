//! Keyboard and pointer notifications.
//!
//! The return value of each handler tells the engine whether to pass the event on to the client:
//! `true` forwards it, `false` consumes it.

use smithay::backend::input::KeyState;
use smithay::input::keyboard::Keysym;
use smithay::utils::{Logical, Point};
use stackwm_config::Modifiers;

use crate::compositor::Compositor;
use crate::session::Session;
use crate::view::ViewId;

pub mod actions;
pub mod binds;

use self::binds::find_bind;

impl<C: Compositor> Session<C> {
    /// A key was pressed or released while `focused` had keyboard focus.
    ///
    /// Keys bound under the prefix are consumed on both press and release, and their action runs
    /// on press. Everything else goes to the client.
    pub fn keyboard_key(
        &mut self,
        focused: Option<ViewId>,
        time: u32,
        mods: Modifiers,
        key: u32,
        keysym: Keysym,
        state: KeyState,
    ) -> bool {
        let config = self.config();
        let Some(action) = find_bind(&config.binds, config.prefix, mods, keysym).map(|b| b.action)
        else {
            trace!("forwarding key {key} ({keysym:?}, {mods}) at {time}");
            return true;
        };

        if state == KeyState::Pressed {
            self.do_action(action, focused);
        }

        false
    }

    /// The pointer moved over `view`, or over no view at all. Focus follows the pointer.
    pub fn pointer_motion(
        &mut self,
        view: Option<ViewId>,
        _time: u32,
        _position: Point<f64, Logical>,
    ) -> bool {
        if let Some(view) = view {
            if self.active_view() != Some(view) {
                self.set_active(Some(view));
            }
        }

        true
    }
}
