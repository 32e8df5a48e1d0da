//! The session context.
//!
//! A [`Session`] holds all mutable policy state: the view records, one [`StackingList`] per
//! space that has views, the active view and the tiling cut ratio. The compositor engine drives
//! it by calling one method per notification; each call runs to completion and writes its
//! results back through the [`Compositor`].
//!
//! Records are keyed by engine handles and never hold references to each other: parents and list
//! neighbors are stored as [`ViewId`]s and looked up in the arena on every use.

use std::collections::HashMap;

use smithay::utils::{Logical, Rectangle, Size};
use stackwm_config::Config;

use crate::cli::Cli;
use crate::compositor::Compositor;
use crate::layout;
use crate::stacking::StackingList;
use crate::view::{OutputId, SpaceId, View, ViewClass, ViewId, ViewState};

mod focus;
mod screenshot;
mod topology;
mod views;

pub struct Session<C: Compositor> {
    compositor: C,
    config: Config,
    /// Every view accepted through `view_created()`.
    views: HashMap<ViewId, View>,
    /// Views of each space. Spaces without views have no entry.
    lists: HashMap<SpaceId, StackingList>,
    /// The view holding keyboard focus, if any.
    active: Option<ViewId>,
    /// The view holding the menu-singleton marker, if any.
    menu: Option<ViewId>,
    /// Fraction of the output width given to the stack column.
    cut: f64,
}

impl<C: Compositor> Session<C> {
    pub fn new(compositor: C, config: Config) -> Self {
        let cut = layout::clamp_cut(config.layout.cut);
        info!("starting session with prefix {}", config.prefix);

        Self {
            compositor,
            config,
            views: HashMap::new(),
            lists: HashMap::new(),
            active: None,
            menu: None,
            cut,
        }
    }

    /// Sets up logging and creates a session configured from the command line.
    ///
    /// An adapter that installed its own subscriber keeps it.
    pub fn start(compositor: C, cli: &Cli) -> Self {
        if let Err(err) = crate::utils::init_logging() {
            debug!("keeping the existing subscriber: {err:?}");
        }

        Self::new(compositor, cli.config())
    }

    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut C {
        &mut self.compositor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(&id)
    }

    pub fn views(&self) -> impl Iterator<Item = &View> + '_ {
        self.views.values()
    }

    pub fn active_view(&self) -> Option<ViewId> {
        self.active
    }

    pub fn menu_view(&self) -> Option<ViewId> {
        self.menu
    }

    pub fn cut(&self) -> f64 {
        self.cut
    }

    /// The views of a space, or `None` for a space without views.
    pub fn stacking_list(&self, space: SpaceId) -> Option<&StackingList> {
        self.lists.get(&space)
    }

    /// Adds `delta` to the cut ratio and relayouts the focused space.
    pub fn adjust_cut(&mut self, delta: f64) {
        self.cut = layout::clamp_cut(self.cut + delta);
        debug!("cut ratio is now {:.2}", self.cut);

        if let Some(space) = self.compositor.focused_space() {
            self.relayout(space);
        }
    }

    /// Recomputes and writes back the geometry of every view in the space.
    ///
    /// Does nothing for a space without views or whose output resolution is unknown.
    pub fn relayout(&mut self, space: SpaceId) {
        let _span = tracy_client::span!("Session::relayout");

        let Some(list) = self.lists.get(&space) else {
            return;
        };
        let Some(resolution) = self
            .compositor
            .space_output(space)
            .and_then(|output| self.compositor.resolution(output))
        else {
            return;
        };

        let order: Vec<ViewId> = list.tiling().iter().collect();

        let tiled: Vec<ViewId> = order
            .iter()
            .copied()
            .filter(|id| self.views.get(id).is_some_and(View::is_tiled))
            .collect();
        let tiles = layout::tile(resolution, self.cut, tiled.len());

        let mut parented = Vec::new();
        for &id in &order {
            let Some((class, size)) = self
                .views
                .get(&id)
                .map(|view| (view.class(), view.geometry().size))
            else {
                continue;
            };

            match class {
                ViewClass::Fullscreen => self.set_view_geometry(id, layout::fullscreen(resolution)),
                ViewClass::Splash => self.set_view_geometry(id, layout::center(resolution, size)),
                ViewClass::Parented => parented.push((self.depth(id), id)),
                ViewClass::Tiled | ViewClass::Floating | ViewClass::Menu => (),
            }
        }

        for (id, geometry) in tiled.into_iter().zip(tiles) {
            self.set_view_state(id, ViewState::MAXIMIZED, true);
            self.set_view_geometry(id, geometry);
        }

        // Parents must be placed before their children.
        parented.sort_by_key(|&(depth, _)| depth);
        for (_, id) in parented {
            let Some(size) = self.views.get(&id).map(|view| view.geometry().size) else {
                continue;
            };
            if let Some(geometry) = self.constrain_to_parent(id, size) {
                self.set_view_geometry(id, geometry);
            }
        }
    }

    /// Geometry for a parented view that asks for `requested`.
    fn constrain_to_parent(
        &self,
        id: ViewId,
        requested: Size<i32, Logical>,
    ) -> Option<Rectangle<i32, Logical>> {
        let parent = self.views.get(&self.views.get(&id)?.parent()?)?;
        let root = self.views.get(&self.root_ancestor(parent.id()))?;
        Some(layout::constrain_to_parent(
            requested,
            root.geometry().size,
            parent.geometry(),
        ))
    }

    /// Topmost ancestor of the view, or the view itself.
    fn root_ancestor(&self, id: ViewId) -> ViewId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Parent, grandparent and so on.
    fn ancestors(&self, id: ViewId) -> impl Iterator<Item = ViewId> + '_ {
        let mut current = id;
        // Bounded by the arena size in case a client managed to create a cycle.
        let mut remaining = self.views.len();
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            current = self.views.get(&current)?.parent()?;
            Some(current)
        })
    }

    fn depth(&self, id: ViewId) -> usize {
        self.ancestors(id).count()
    }

    fn view_output(&self, id: ViewId) -> Option<OutputId> {
        let space = self.views.get(&id)?.space();
        self.compositor.space_output(space)
    }

    fn set_view_geometry(&mut self, id: ViewId, geometry: Rectangle<i32, Logical>) {
        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        view.set_geometry(geometry);
        self.compositor.set_view_geometry(id, geometry);
    }

    /// Updates the record and tells the engine about any change to bits it knows.
    fn set_view_state(&mut self, id: ViewId, state: ViewState, enabled: bool) {
        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        let old = view.state();
        if !view.set_state(state, enabled) {
            return;
        }

        let changed = (old ^ view.state()).engine_bits();
        if !changed.is_empty() {
            self.compositor.set_view_state(id, changed, enabled);
        }
    }

    /// Brings a single view to the front of its space.
    fn raise(&mut self, id: ViewId) {
        let Some(space) = self.views.get(&id).map(View::space) else {
            return;
        };
        if let Some(list) = self.lists.get_mut(&space) {
            if list.raise(id) {
                self.compositor.bring_to_front(id);
            }
        }
    }

    #[cfg(test)]
    pub fn verify_invariants(&self) {
        use std::collections::HashSet;

        assert!((0. ..=1.).contains(&self.cut), "cut out of range: {}", self.cut);

        let mut listed = HashSet::new();
        for (space, list) in &self.lists {
            assert!(!list.is_empty(), "empty list for {space} must be freed");
            list.verify_invariants();

            for id in list.stacking().iter() {
                let view = self.views.get(&id).unwrap_or_else(|| {
                    panic!("{id} in list of {space} has no record");
                });
                assert_eq!(view.space(), *space, "{id} listed in the wrong space");
                assert!(listed.insert(id), "{id} listed twice");
            }
        }

        for (id, view) in &self.views {
            assert_eq!(*id, view.id());
            assert!(listed.contains(id), "{id} is not in any list");
            assert_eq!(view.class(), view.compute_class(), "stale class for {id}");

            if let Some(parent) = view.parent() {
                let parent_view = self
                    .views
                    .get(&parent)
                    .unwrap_or_else(|| panic!("parent {parent} of {id} does not exist"));
                assert_eq!(parent_view.space(), view.space(), "{id} and its parent differ in space");
                assert!(
                    self.ancestors(*id).all(|a| a != *id),
                    "{id} is its own ancestor"
                );
            }
        }

        let menus: Vec<_> = self
            .views
            .values()
            .filter(|view| view.is_menu())
            .map(View::id)
            .collect();
        assert!(menus.len() <= 1, "more than one menu: {menus:?}");
        assert_eq!(menus.first().copied(), self.menu);

        if let Some(active) = self.active {
            assert!(self.views.contains_key(&active), "active {active} has no record");
        }
    }
}
