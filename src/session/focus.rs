//! Keyboard focus and raising.

use crate::compositor::Compositor;
use crate::view::{SpaceId, View, ViewId, ViewState, ViewType};

use super::Session;

impl<C: Compositor> Session<C> {
    /// Makes `target` the active view, or clears focus with `None`.
    ///
    /// Refused while the menu is active. A view with children passes focus on to its topmost
    /// child, recursively. Activating a view raises it above its ancestors and their siblings,
    /// with the menu kept on top of everything.
    pub fn set_active(&mut self, target: Option<ViewId>) {
        if self.active == target {
            return;
        }

        if let Some(active) = self.active {
            if self.views.get(&active).is_some_and(View::is_menu) {
                trace!("menu is active, refusing to focus {target:?}");
                self.raise(active);
                return;
            }
        }

        let Some(mut id) = target else {
            self.compositor.focus_view(None);
            self.active = None;
            return;
        };

        if !self.views.contains_key(&id) {
            debug!("ignoring focus request for untracked {id}");
            return;
        }

        for _ in 0..self.views.len() {
            let Some(child) = self.topmost_child(id) else {
                break;
            };
            if self.active == Some(child) {
                return;
            }
            id = child;
        }

        let Some(view) = self.views.get(&id) else {
            return;
        };
        let space = view.space();
        let managed = view.is_managed();

        if view.is_managed_normal() {
            if let Some(fullscreen) = self.topmost_fullscreen(space) {
                self.raise(fullscreen);
            }
        }

        if let Some(previous) = self.active {
            if managed && self.view_output(previous) == self.view_output(id) {
                self.set_view_state(previous, ViewState::ACTIVATED, false);
            }
        }

        self.set_view_state(id, ViewState::ACTIVATED, true);
        self.raise_all(id);

        if let Some(menu) = self.menu {
            if menu != id && self.views.get(&menu).is_some_and(|m| m.space() == space) {
                self.raise(menu);
            }
        }

        trace!("focusing {id}");
        self.compositor.focus_view(Some(id));
        self.active = Some(id);
    }

    /// Whether a newly arrived view should take focus.
    ///
    /// Unmanaged views never do. Otherwise a view takes focus when nothing is focused, when it has
    /// no parent, or when its parent is the active view.
    pub(super) fn should_focus_on_create(&self, id: ViewId) -> bool {
        let Some(view) = self.views.get(&id) else {
            return false;
        };
        if view.kind().contains(ViewType::UNMANAGED) {
            return false;
        }

        self.active.is_none() || view.parent().is_none() || view.parent() == self.active
    }

    /// Focuses the topmost view of the space, or nothing if it has no views.
    pub(super) fn focus_topmost(&mut self, space: SpaceId) {
        let topmost = self.lists.get(&space).and_then(|list| list.topmost());
        self.set_active(topmost);
    }

    /// Raises the view above its ancestors, with the siblings of each step in between.
    ///
    /// For the chain `root, ..., parent, view` every element is raised in turn, each one right
    /// after its own siblings, which keep their relative order.
    pub(super) fn raise_all(&mut self, id: ViewId) {
        let mut chain: Vec<ViewId> = self.ancestors(id).collect();
        chain.reverse();
        chain.push(id);

        for step in chain {
            let Some(view) = self.views.get(&step) else {
                continue;
            };

            if let Some(parent) = view.parent() {
                let siblings: Vec<ViewId> = self
                    .lists
                    .get(&view.space())
                    .into_iter()
                    .flat_map(|list| list.stacking().iter())
                    .filter(|&other| {
                        other != step
                            && self.views.get(&other).and_then(View::parent) == Some(parent)
                    })
                    .collect();

                for sibling in siblings {
                    self.raise(sibling);
                }
            }

            self.raise(step);
        }
    }

    /// Topmost direct child of the view in its space.
    fn topmost_child(&self, id: ViewId) -> Option<ViewId> {
        let space = self.views.get(&id)?.space();
        self.lists
            .get(&space)?
            .stacking()
            .iter()
            .rev()
            .find(|other| self.views.get(other).and_then(View::parent) == Some(id))
    }

    fn topmost_fullscreen(&self, space: SpaceId) -> Option<ViewId> {
        self.lists
            .get(&space)?
            .stacking()
            .iter()
            .rev()
            .find(|other| self.views.get(other).is_some_and(View::is_fullscreen))
    }
}
