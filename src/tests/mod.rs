use smithay::backend::input::KeyState;
use smithay::input::keyboard::Keysym;
use smithay::utils::{Logical, Point, Rectangle, Size};
use stackwm_config::{Config, Modifiers};

use crate::compositor::Compositor;
use crate::session::Session;
use crate::view::{OutputId, SpaceId, ViewAttributes, ViewId, ViewState, ViewType};

mod ops;

use self::headless::{Event, Headless};

fn rect(x: i32, y: i32, w: i32, h: i32) -> Rectangle<i32, Logical> {
    Rectangle::new(Point::from((x, y)), Size::from((w, h)))
}

fn session() -> Session<Headless> {
    session_with_outputs(&[(1920, 1080)])
}

fn session_with_outputs(resolutions: &[(i32, i32)]) -> Session<Headless> {
    let mut session = Session::new(Headless::default(), Config::default());
    for &(w, h) in resolutions {
        add_output(&mut session, w, h);
    }
    session
}

fn add_output(session: &mut Session<Headless>, w: i32, h: i32) -> OutputId {
    let output = session.compositor_mut().add_output(Size::from((w, h)));
    assert!(session.output_created(output));
    pump(session);
    output
}

/// Delivers the notifications the engine owes the session.
fn pump(session: &mut Session<Headless>) {
    while let Some(event) = session.compositor_mut().pending.pop_front() {
        match event {
            Event::SpaceActivated(space) => session.space_activated(space),
            Event::OutputActivated(output) => session.output_activated(output),
            Event::ViewSwitchedSpace { view, from, to } => {
                session.view_switched_space(view, from, to)
            }
        }
    }
}

fn focused_space(session: &Session<Headless>) -> SpaceId {
    session.compositor().focused_space().unwrap()
}

/// Nth space of the output, in engine order.
fn space(session: &Session<Headless>, output: OutputId, idx: usize) -> SpaceId {
    session.compositor().spaces(output)[idx]
}

fn output(session: &Session<Headless>, idx: usize) -> OutputId {
    session.compositor().outputs()[idx]
}

fn normal() -> ViewAttributes {
    ViewAttributes {
        geometry: rect(0, 0, 640, 480),
        ..Default::default()
    }
}

fn child_of(parent: u64) -> ViewAttributes {
    ViewAttributes {
        parent: Some(ViewId(parent)),
        ..normal()
    }
}

fn of_kind(kind: ViewType) -> ViewAttributes {
    ViewAttributes {
        kind,
        ..normal()
    }
}

fn menu() -> ViewAttributes {
    ViewAttributes {
        class: Some(String::from("bemenu")),
        ..normal()
    }
}

/// Maps a view on the focused space.
fn map(session: &mut Session<Headless>, id: u64, attrs: ViewAttributes) -> bool {
    let space = focused_space(session);
    map_on(session, id, space, attrs)
}

fn map_on(session: &mut Session<Headless>, id: u64, space: SpaceId, attrs: ViewAttributes) -> bool {
    let id = ViewId(id);
    session.compositor_mut().map_view(id, space, &attrs);
    let accepted = session.view_created(id, space, attrs);
    if !accepted {
        session.compositor_mut().unmap_view(id);
    }
    pump(session);
    accepted
}

fn unmap(session: &mut Session<Headless>, id: u64) {
    let id = ViewId(id);
    session.view_destroyed(id);
    session.compositor_mut().unmap_view(id);
    pump(session);
}

/// Presses and releases a key with the given modifiers, returning whether the press was
/// forwarded to the client.
fn key_with(session: &mut Session<Headless>, mods: Modifiers, raw: u32) -> bool {
    let keysym = Keysym::new(raw);
    let focused = session.compositor().focused_view;
    let forwarded = session.keyboard_key(focused, 0, mods, 0, keysym, KeyState::Pressed);
    pump(session);

    let focused = session.compositor().focused_view;
    let released = session.keyboard_key(focused, 1, mods, 0, keysym, KeyState::Released);
    pump(session);

    assert_eq!(forwarded, released, "press and release must be routed alike");
    forwarded
}

fn key(session: &mut Session<Headless>, raw: u32) -> bool {
    key_with(session, Modifiers::ALT, raw)
}

fn hover(session: &mut Session<Headless>, id: Option<u64>) {
    let forwarded = session.pointer_motion(id.map(ViewId), 0, Point::from((0., 0.)));
    assert!(forwarded);
    pump(session);
}

fn geometry(session: &Session<Headless>, id: u64) -> Rectangle<i32, Logical> {
    session.compositor().geometries[&ViewId(id)]
}

fn engine_state(session: &Session<Headless>, id: u64) -> ViewState {
    session.compositor().states[&ViewId(id)]
}

fn active(session: &Session<Headless>) -> Option<u64> {
    session.active_view().map(|id| id.0)
}

fn stacking(session: &Session<Headless>, space: SpaceId) -> Vec<u64> {
    session
        .stacking_list(space)
        .map(|list| list.stacking().iter().map(|id| id.0).collect())
        .unwrap_or_default()
}

fn tiling(session: &Session<Headless>, space: SpaceId) -> Vec<u64> {
    session
        .stacking_list(space)
        .map(|list| list.tiling().iter().map(|id| id.0).collect())
        .unwrap_or_default()
}

/// Checks that the engine saw exactly what the session believes it wrote.
#[track_caller]
fn verify_engine(session: &Session<Headless>) {
    let engine = session.compositor();
    for view in session.views() {
        let id = view.id();
        assert_eq!(engine.view_space(id), Some(view.space()), "space of {id}");
        assert_eq!(engine.geometries.get(&id), Some(&view.geometry()), "geometry of {id}");
        assert_eq!(
            engine.states.get(&id).copied(),
            Some(view.state().engine_bits()),
            "state of {id}"
        );
    }
    assert_eq!(engine.focused_view, session.active_view(), "keyboard focus");
}
