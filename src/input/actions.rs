use stackwm_config::Action;

use crate::compositor::Compositor;
use crate::session::Session;
use crate::view::ViewId;

impl<C: Compositor> Session<C> {
    /// Runs a bound action. `focused` is the view that had keyboard focus when the key was hit.
    pub fn do_action(&mut self, action: Action, focused: Option<ViewId>) {
        let _span = tracy_client::span!("Session::do_action");
        debug!("running {action:?} (focused: {focused:?})");

        match action {
            Action::Quit => {
                info!("quitting");
                self.compositor_mut().terminate();
            }
            Action::CloseWindow => {
                if let Some(view) = focused {
                    self.compositor_mut().close_view(view);
                }
            }
            Action::SpawnTerminal => {
                let command = self.config().terminal();
                self.compositor_mut().spawn(&command);
            }
            Action::SpawnLauncher => {
                let command = self.config().spawn.launcher.clone();
                self.compositor_mut().spawn(&command);
            }
            Action::ToggleFullscreen => {
                if let Some(view) = focused {
                    self.toggle_fullscreen(view);
                }
            }
            Action::CycleViews => self.cycle(),
            Action::FocusSpace(index) => self.focus_space(index),
            Action::AdjustCut(delta) => self.adjust_cut(delta),
            Action::MoveViewToOutput(index) => {
                if let Some(view) = focused {
                    self.move_view_to_output(view, index);
                }
            }
            Action::MoveViewToSpace(index) => {
                if let Some(view) = focused {
                    self.move_view_to_space(view, index);
                }
            }
            Action::FocusOutputNext => self.focus_output_step(true),
            Action::FocusOutputPrevious => self.focus_output_step(false),
            Action::FocusViewLeft => {
                if let Some(view) = focused {
                    self.focus_view_step(view, true);
                }
            }
            Action::FocusViewRight => {
                if let Some(view) = focused {
                    self.focus_view_step(view, false);
                }
            }
            Action::Screenshot => self.screenshot(),
        }
    }
}
