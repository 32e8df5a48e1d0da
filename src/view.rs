//! Per-view records.
//!
//! The engine owns the actual windows. A [`View`] is the snapshot stackwm keeps of one of them:
//! what it was told at creation, plus every geometry and state change it has since written back.

use std::fmt;

use bitflags::bitflags;
use smithay::utils::{Logical, Rectangle};

/// Opaque engine handle of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// Opaque engine handle of a space (virtual desktop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId(pub u64);

/// Opaque engine handle of an output (monitor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view {}", self.0)
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "space {}", self.0)
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "output {}", self.0)
    }
}

bitflags! {
    /// What kind of surface the client created. Fixed for the lifetime of the view.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ViewType : u32 {
        const OVERRIDE_REDIRECT = 1;
        /// Tooltips, DnD icons and the like.
        const UNMANAGED = 1 << 1;
        const SPLASH = 1 << 2;
        const MODAL = 1 << 3;
        const POPUP = 1 << 4;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ViewState : u32 {
        const MAXIMIZED = 1;
        const FULLSCREEN = 1 << 1;
        const RESIZING = 1 << 2;
        const MOVING = 1 << 3;
        const ACTIVATED = 1 << 4;
        /// The menu-singleton marker. Never sent to the engine.
        const MENU = 1 << 5;
    }
}

impl ViewState {
    /// Bits the engine knows about.
    pub fn engine_bits(self) -> Self {
        self - ViewState::MENU
    }
}

/// How a view is treated by layout and focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewClass {
    /// Placed by the master/stack layout.
    Tiled,
    /// Covers the whole output.
    Fullscreen,
    /// Centered at its own size.
    Splash,
    /// Sized relative to its root ancestor and centered on its parent.
    Parented,
    /// Left wherever the client puts it.
    Floating,
    /// The launcher menu; floating, and holds focus while it exists.
    Menu,
}

/// What the engine tells us about a view when it maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewAttributes {
    pub geometry: Rectangle<i32, Logical>,
    pub kind: ViewType,
    pub state: ViewState,
    pub parent: Option<ViewId>,
    pub class: Option<String>,
}

#[derive(Debug, Clone)]
pub struct View {
    id: ViewId,
    space: SpaceId,
    geometry: Rectangle<i32, Logical>,
    kind: ViewType,
    state: ViewState,
    parent: Option<ViewId>,
    app_class: Option<String>,
    /// Cached classification, kept in sync by every setter.
    class: ViewClass,
}

impl View {
    pub fn new(id: ViewId, space: SpaceId, attrs: ViewAttributes) -> Self {
        let mut view = Self {
            id,
            space,
            geometry: attrs.geometry,
            kind: attrs.kind,
            state: attrs.state,
            parent: attrs.parent,
            app_class: attrs.class,
            class: ViewClass::Floating,
        };
        view.reclassify();
        view
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn space(&self) -> SpaceId {
        self.space
    }

    pub fn geometry(&self) -> Rectangle<i32, Logical> {
        self.geometry
    }

    pub fn kind(&self) -> ViewType {
        self.kind
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    pub fn app_class(&self) -> Option<&str> {
        self.app_class.as_deref()
    }

    pub fn class(&self) -> ViewClass {
        self.class
    }

    pub fn is_tiled(&self) -> bool {
        self.class == ViewClass::Tiled
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.contains(ViewState::FULLSCREEN)
    }

    pub fn is_menu(&self) -> bool {
        self.state.contains(ViewState::MENU)
    }

    /// Not a tooltip, popup or splash screen.
    pub fn is_managed(&self) -> bool {
        !self
            .kind
            .intersects(ViewType::UNMANAGED | ViewType::POPUP | ViewType::SPLASH)
    }

    /// Positions itself, like an override-redirect X11 window.
    pub fn is_override_redirect(&self) -> bool {
        self.kind.contains(ViewType::OVERRIDE_REDIRECT) || self.is_menu()
    }

    /// Managed, and not positioning itself.
    pub fn is_managed_normal(&self) -> bool {
        self.is_managed() && !self.is_override_redirect()
    }

    /// In the middle of an interactive resize or move.
    pub fn is_interactive(&self) -> bool {
        self.state
            .intersects(ViewState::RESIZING | ViewState::MOVING)
    }

    pub(crate) fn set_space(&mut self, space: SpaceId) {
        self.space = space;
    }

    pub(crate) fn set_geometry(&mut self, geometry: Rectangle<i32, Logical>) {
        self.geometry = geometry;
    }

    /// Returns whether anything changed.
    pub(crate) fn set_state(&mut self, bits: ViewState, enabled: bool) -> bool {
        let old = self.state;
        self.state.set(bits, enabled);
        self.reclassify();
        old != self.state
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ViewId>) {
        self.parent = parent;
        self.reclassify();
    }

    fn reclassify(&mut self) {
        self.class = self.compute_class();
    }

    pub(crate) fn compute_class(&self) -> ViewClass {
        if self.is_fullscreen() {
            ViewClass::Fullscreen
        } else if self.kind.contains(ViewType::SPLASH) {
            ViewClass::Splash
        } else if self.is_menu() {
            ViewClass::Menu
        } else if self.parent.is_some() && self.is_managed_normal() {
            ViewClass::Parented
        } else if self.parent.is_none()
            && self.is_managed_normal()
            && !self.kind.contains(ViewType::MODAL)
        {
            ViewClass::Tiled
        } else {
            ViewClass::Floating
        }
    }
}
