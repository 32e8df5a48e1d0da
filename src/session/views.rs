//! View lifecycle and client requests.

use smithay::utils::{Logical, Rectangle};

use crate::compositor::Compositor;
use crate::stacking::StackingList;
use crate::view::{SpaceId, View, ViewAttributes, ViewClass, ViewId, ViewState};

use super::Session;

impl<C: Compositor> Session<C> {
    /// A view was mapped on `space`.
    ///
    /// Returns `false` if the view is rejected: a second menu while one exists, or when there is
    /// no memory to track it. The engine does not show rejected views.
    pub fn view_created(&mut self, id: ViewId, space: SpaceId, attrs: ViewAttributes) -> bool {
        let _span = tracy_client::span!("Session::view_created");

        if self.views.contains_key(&id) {
            warn!("{id} was created twice");
            return true;
        }

        let is_menu = attrs.class.as_deref() == Some(self.config.menu_class.as_str());
        if is_menu {
            if let Some(menu) = self.menu {
                debug!("rejecting {id}, {menu} is already open");
                return false;
            }
        }

        let mut view = View::new(id, space, attrs);

        if let Some(parent) = view.parent() {
            if !self.views.get(&parent).is_some_and(|p| p.space() == space) {
                debug!("{id} has a parent {parent} outside {space}, ignoring it");
                view.set_parent(None);
            }
        }
        view.set_state(ViewState::MENU, is_menu);
        let parent = view.parent();

        if let Err(err) = self.views.try_reserve(1) {
            error!("error allocating record for {id}: {err}");
            return false;
        }
        if !self.insert_into_space(id, space) {
            return false;
        }
        self.views.insert(id, view);

        if is_menu {
            self.menu = Some(id);
        }

        if self.should_focus_on_create(id) {
            self.set_active(Some(id));
        }

        self.relayout(space);

        info!("new {id} on {space} (parent: {parent:?})");
        true
    }

    /// A view was unmapped. Its handle must not be used afterwards.
    ///
    /// If it had focus, focus goes to its parent, or else to the view right behind it.
    pub fn view_destroyed(&mut self, id: ViewId) {
        let _span = tracy_client::span!("Session::view_destroyed");

        let Some(view) = self.views.remove(&id) else {
            debug!("ignoring destruction of untracked {id}");
            return;
        };
        let space = view.space();

        let fallback = self.lists.get(&space).and_then(|list| {
            list.below(id)
                .or_else(|| list.stacking().iter().rev().find(|&other| other != id))
        });
        self.remove_from_space(id, space);

        if self.menu == Some(id) {
            self.menu = None;
        }

        self.orphan_children(id);

        if self.active == Some(id) {
            self.active = None;

            let parent = view.parent().filter(|parent| self.views.contains_key(parent));
            if let Some(next) = parent.or(fallback) {
                self.set_active(Some(next));
            }
        }

        self.relayout(space);

        info!("{id} destroyed");
    }

    /// The engine moved a view from one space to another.
    pub fn view_switched_space(&mut self, id: ViewId, from: SpaceId, to: SpaceId) {
        let _span = tracy_client::span!("Session::view_switched_space");

        let Some(view) = self.views.get_mut(&id) else {
            debug!("ignoring space switch of untracked {id}");
            return;
        };
        let old = view.space();
        if old != from {
            warn!("{id} switched from {from}, but it was on {old}");
        }
        if old == to {
            return;
        }
        view.set_space(to);

        self.remove_from_space(id, old);

        // Parents and children must share a space.
        let parent = self.views.get(&id).and_then(View::parent);
        if parent.is_some_and(|parent| self.views.get(&parent).map(View::space) != Some(to)) {
            if let Some(view) = self.views.get_mut(&id) {
                view.set_parent(None);
            }
        }
        for child in self.views.values_mut() {
            if child.parent() == Some(id) && child.space() != to {
                child.set_parent(None);
            }
        }
        self.relayout(old);

        if !self.insert_into_space(id, to) {
            self.forget(id);
            return;
        }

        if self.should_focus_on_create(id) {
            self.set_active(Some(id));
        }
        self.relayout(to);

        let same_output = self.compositor.space_output(old) == self.compositor.space_output(to);
        if same_output {
            self.focus_topmost(old);
        } else if let Some(topmost) = self.lists.get(&old).and_then(StackingList::topmost) {
            self.set_view_state(topmost, ViewState::ACTIVATED, true);
        }

        let visible = self
            .compositor
            .space_output(to)
            .and_then(|output| self.compositor.active_space(output))
            == Some(to);
        if visible {
            let inactive: Vec<ViewId> = self
                .lists
                .get(&to)
                .into_iter()
                .flat_map(|list| list.stacking().iter())
                .filter(|&other| Some(other) != self.active)
                .collect();
            for other in inactive {
                self.set_view_state(other, ViewState::ACTIVATED, false);
            }
        }

        debug!("{id} moved from {old} to {to}");
    }

    /// A client asked for new geometry.
    pub fn view_geometry_requested(&mut self, id: ViewId, geometry: Rectangle<i32, Logical>) {
        let Some((class, interactive)) = self
            .views
            .get(&id)
            .map(|view| (view.class(), view.is_interactive()))
        else {
            return;
        };

        match class {
            // Tiled views only move or resize when the user drags them.
            ViewClass::Tiled if !interactive => (),
            ViewClass::Tiled => {
                self.set_view_state(id, ViewState::MAXIMIZED, false);
                self.set_view_geometry(id, geometry);
            }
            ViewClass::Fullscreen | ViewClass::Splash => (),
            ViewClass::Parented => {
                if let Some(geometry) = self.constrain_to_parent(id, geometry.size) {
                    self.set_view_geometry(id, geometry);
                }
            }
            ViewClass::Floating | ViewClass::Menu => self.set_view_geometry(id, geometry),
        }
    }

    /// A client asked to set or clear state bits.
    pub fn view_state_requested(&mut self, id: ViewId, state: ViewState, enabled: bool) {
        let Some(space) = self.views.get(&id).map(View::space) else {
            return;
        };

        // Clients can't claim to be the menu.
        let state = state.engine_bits();
        self.set_view_state(id, state, enabled);
        trace!("{id} requested {state:?} = {enabled}");

        if (state.contains(ViewState::MAXIMIZED) && enabled) || state.contains(ViewState::FULLSCREEN)
        {
            self.relayout(space);
        }
    }

    /// Flips fullscreen on the view and relayouts its space.
    pub fn toggle_fullscreen(&mut self, id: ViewId) {
        let Some(view) = self.views.get(&id) else {
            return;
        };
        let space = view.space();
        let enabled = !view.is_fullscreen();

        self.set_view_state(id, ViewState::FULLSCREEN, enabled);
        self.relayout(space);
    }

    /// Rotates the tiled views of the focused space so the last one becomes the master.
    ///
    /// Non-tiled views are skipped over; with fewer than two tiled views nothing happens.
    pub fn cycle(&mut self) {
        let Some(space) = self.compositor.focused_space() else {
            return;
        };
        let views = &self.views;
        let Some(list) = self.lists.get_mut(&space) else {
            return;
        };

        let is_tiled = |id: ViewId| views.get(&id).is_some_and(View::is_tiled);
        let tiled = list.tiling().iter().filter(|&id| is_tiled(id)).count();
        if tiled < 2 {
            return;
        }

        for _ in 0..list.len() {
            match list.rotate() {
                Some(head) if is_tiled(head) => break,
                Some(_) => (),
                None => break,
            }
        }

        self.relayout(space);
    }

    /// Drops a view that can't be tracked any more without moving focus.
    fn forget(&mut self, id: ViewId) {
        error!("forgetting {id}");
        self.views.remove(&id);
        self.orphan_children(id);
        if self.menu == Some(id) {
            self.menu = None;
        }
        if self.active == Some(id) {
            self.active = None;
        }
    }

    /// Turns the children of a view into top-level views.
    fn orphan_children(&mut self, id: ViewId) {
        for child in self.views.values_mut() {
            if child.parent() == Some(id) {
                child.set_parent(None);
            }
        }
    }

    /// Adds the view to the list of its space, creating the list if needed.
    fn insert_into_space(&mut self, id: ViewId, space: SpaceId) -> bool {
        if !self.lists.contains_key(&space) {
            if let Err(err) = self.lists.try_reserve(1) {
                error!("error allocating view list for {space}: {err}");
                return false;
            }
        }

        self.lists.entry(space).or_default().push(id);
        true
    }

    /// Removes the view from the list of its space, dropping the list once it is empty.
    fn remove_from_space(&mut self, id: ViewId, space: SpaceId) {
        let Some(list) = self.lists.get_mut(&space) else {
            return;
        };
        list.remove(id);
        if list.is_empty() {
            self.lists.remove(&space);
        }
    }
}
