//! Outputs, spaces and moving between them.
//!
//! Requests that change topology only ask the engine; the session reacts once the engine reports
//! back through `space_activated()`, `output_activated()` or `view_switched_space()`.

use smithay::utils::{Logical, Size};

use crate::compositor::Compositor;
use crate::view::{OutputId, SpaceId, View, ViewId};

use super::Session;

impl<C: Compositor> Session<C> {
    /// A new output appeared. Gives it its spaces.
    ///
    /// Returns `false` if the engine could not create them.
    pub fn output_created(&mut self, output: OutputId) -> bool {
        let count = self.config.layout.spaces_per_output;
        for _ in 0..count {
            if self.compositor.add_space(output).is_none() {
                warn!("error adding a space to {output}");
                return false;
            }
        }

        debug!("added {count} spaces to {output}");
        true
    }

    /// An output gained focus.
    pub fn output_activated(&mut self, output: OutputId) {
        match self.compositor.active_space(output) {
            Some(space) => self.focus_topmost(space),
            None => self.set_active(None),
        }
    }

    pub fn output_resolution_changed(&mut self, output: OutputId, resolution: Size<i32, Logical>) {
        debug!("{output} resolution changed to {}x{}", resolution.w, resolution.h);

        for space in self.compositor.spaces(output) {
            self.relayout(space);
        }
    }

    /// A space became visible on its output.
    pub fn space_activated(&mut self, space: SpaceId) {
        self.focus_topmost(space);
    }

    /// Shows the space at `index` on the focused output.
    pub fn focus_space(&mut self, index: usize) {
        let Some(output) = self.compositor.focused_output() else {
            return;
        };
        let Some(space) = self.compositor.spaces(output).get(index).copied() else {
            debug!("{output} has no space {index}");
            return;
        };

        self.compositor.focus_space(space);
    }

    /// Sends the view to the space at `index` on its own output.
    pub fn move_view_to_space(&mut self, id: ViewId, index: usize) {
        let Some(current) = self.views.get(&id).map(View::space) else {
            return;
        };
        let Some(output) = self.compositor.space_output(current) else {
            return;
        };
        let Some(space) = self.compositor.spaces(output).get(index).copied() else {
            debug!("{output} has no space {index}");
            return;
        };

        if space != current {
            self.compositor.set_view_space(id, space);
        }
    }

    /// Sends the view to the visible space of the output at `index` and focuses that output.
    pub fn move_view_to_output(&mut self, id: ViewId, index: usize) {
        let Some(current) = self.views.get(&id).map(View::space) else {
            return;
        };
        let Some(output) = self.compositor.outputs().get(index).copied() else {
            debug!("no output {index}");
            return;
        };
        let Some(space) = self.compositor.active_space(output) else {
            return;
        };

        if space != current {
            self.compositor.set_view_space(id, space);
        }
        self.compositor.focus_output(output);
    }

    /// Focuses the next or previous output, wrapping around.
    pub fn focus_output_step(&mut self, forward: bool) {
        let outputs = self.compositor.outputs();
        if outputs.len() < 2 {
            return;
        }
        let Some(idx) = self
            .compositor
            .focused_output()
            .and_then(|focused| outputs.iter().position(|&o| o == focused))
        else {
            return;
        };

        let len = outputs.len();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        self.compositor.focus_output(outputs[next]);
    }

    /// Focuses the view after (`left`) or before the given one in tiling order, wrapping around.
    pub fn focus_view_step(&mut self, id: ViewId, left: bool) {
        let Some(space) = self.views.get(&id).map(View::space) else {
            return;
        };
        let Some(list) = self.lists.get(&space) else {
            return;
        };

        let next = if left {
            list.tiling().next_wrapping(id)
        } else {
            list.tiling().prev_wrapping(id)
        };

        if let Some(next) = next {
            self.set_active(Some(next));
        }
    }
}
