use proptest::prelude::*;
use proptest_derive::Arbitrary;
use smithay::input::keyboard::keysyms;

use super::*;

const KEYS: &[u32] = &[
    keysyms::KEY_q,
    keysyms::KEY_f,
    keysyms::KEY_Tab,
    keysyms::KEY_l,
    keysyms::KEY_h,
    keysyms::KEY_z,
    keysyms::KEY_x,
    keysyms::KEY_c,
    keysyms::KEY_o,
    keysyms::KEY_Left,
    keysyms::KEY_Right,
    keysyms::KEY_1,
    keysyms::KEY_2,
    keysyms::KEY_3,
    keysyms::KEY_0,
    keysyms::KEY_F1,
    keysyms::KEY_F2,
    keysyms::KEY_F3,
    keysyms::KEY_F10,
    keysyms::KEY_Return,
    keysyms::KEY_a,
];

fn arbitrary_key() -> impl Strategy<Value = u32> {
    proptest::sample::select(KEYS)
}

fn arbitrary_view_id() -> impl Strategy<Value = u64> {
    1..=8u64
}

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    AddOutput {
        #[proptest(strategy = "320..2000i32")]
        w: i32,
        #[proptest(strategy = "240..1200i32")]
        h: i32,
    },
    MapView {
        #[proptest(strategy = "arbitrary_view_id()")]
        id: u64,
        #[proptest(strategy = "proptest::option::of(arbitrary_view_id())")]
        parent: Option<u64>,
        #[proptest(strategy = "0..32u32")]
        kind: u32,
        menu: bool,
    },
    UnmapView(#[proptest(strategy = "arbitrary_view_id()")] u64),
    Hover(#[proptest(strategy = "proptest::option::of(arbitrary_view_id())")] Option<u64>),
    Key {
        #[proptest(strategy = "arbitrary_key()")]
        raw: u32,
        shift: bool,
    },
    RequestGeometry {
        #[proptest(strategy = "arbitrary_view_id()")]
        id: u64,
        #[proptest(strategy = "-100..2000i32")]
        x: i32,
        #[proptest(strategy = "-100..2000i32")]
        y: i32,
        #[proptest(strategy = "0..3000i32")]
        w: i32,
        #[proptest(strategy = "0..3000i32")]
        h: i32,
    },
    RequestState {
        #[proptest(strategy = "arbitrary_view_id()")]
        id: u64,
        #[proptest(strategy = "0..6u32")]
        bit: u32,
        enabled: bool,
    },
    ChangeResolution {
        #[proptest(strategy = "0..3usize")]
        output: usize,
        #[proptest(strategy = "320..2000i32")]
        w: i32,
        #[proptest(strategy = "240..1200i32")]
        h: i32,
    },
    MoveViewToSpace {
        #[proptest(strategy = "arbitrary_view_id()")]
        id: u64,
        #[proptest(strategy = "0..12usize")]
        index: usize,
    },
    MoveViewToOutput {
        #[proptest(strategy = "arbitrary_view_id()")]
        id: u64,
        #[proptest(strategy = "0..4usize")]
        index: usize,
    },
}

impl Op {
    fn apply(self, session: &mut Session<Headless>) {
        match self {
            Op::AddOutput { w, h } => {
                if session.compositor().outputs().len() < 3 {
                    add_output(session, w, h);
                }
            }
            Op::MapView {
                id,
                parent,
                kind,
                menu,
            } => {
                if session.view(ViewId(id)).is_some() {
                    return;
                }
                let Some(space) = session.compositor().focused_space() else {
                    return;
                };

                let attrs = ViewAttributes {
                    geometry: rect(0, 0, 640, 480),
                    kind: ViewType::from_bits_truncate(kind),
                    parent: parent.map(ViewId),
                    class: menu.then(|| String::from("bemenu")),
                    ..Default::default()
                };
                map_on(session, id, space, attrs);
            }
            Op::UnmapView(id) => {
                if session.view(ViewId(id)).is_some() {
                    unmap(session, id);
                }
            }
            Op::Hover(id) => hover(session, id),
            Op::Key { raw, shift } => {
                let mods = if shift {
                    Modifiers::ALT | Modifiers::SHIFT
                } else {
                    Modifiers::ALT
                };
                key_with(session, mods, raw);
            }
            Op::RequestGeometry { id, x, y, w, h } => {
                session.view_geometry_requested(ViewId(id), rect(x, y, w, h));
            }
            Op::RequestState { id, bit, enabled } => {
                let state = ViewState::from_bits_truncate(1 << bit);
                session.view_state_requested(ViewId(id), state, enabled);
            }
            Op::ChangeResolution { output, w, h } => {
                let Some(output) = session.compositor().outputs().get(output).copied() else {
                    return;
                };
                let resolution = Size::from((w, h));
                session.compositor_mut().set_resolution(output, resolution);
                session.output_resolution_changed(output, resolution);
            }
            Op::MoveViewToSpace { id, index } => {
                session.move_view_to_space(ViewId(id), index);
                pump(session);
            }
            Op::MoveViewToOutput { id, index } => {
                session.move_view_to_output(ViewId(id), index);
                pump(session);
            }
        }
    }
}

#[track_caller]
fn check_ops(ops: &[Op]) {
    let mut session = session();

    for op in ops {
        op.clone().apply(&mut session);
        session.verify_invariants();
        verify_engine(&session);
    }

    let spaces: Vec<SpaceId> = session
        .compositor()
        .outputs()
        .into_iter()
        .flat_map(|output| session.compositor().spaces(output))
        .collect();

    for &space in &spaces {
        session.relayout(space);
    }
    let before = session.compositor().geometries.clone();
    for &space in &spaces {
        session.relayout(space);
    }
    assert_eq!(session.compositor().geometries, before, "relayout must be idempotent");
}

#[test]
fn operations_dont_panic() {
    let every_op = [
        Op::AddOutput { w: 1280, h: 720 },
        Op::MapView {
            id: 1,
            parent: None,
            kind: 0,
            menu: false,
        },
        Op::MapView {
            id: 2,
            parent: Some(1),
            kind: 0,
            menu: false,
        },
        Op::MapView {
            id: 3,
            parent: None,
            kind: ViewType::UNMANAGED.bits(),
            menu: false,
        },
        Op::MapView {
            id: 4,
            parent: None,
            kind: 0,
            menu: true,
        },
        Op::MapView {
            id: 5,
            parent: Some(2),
            kind: ViewType::POPUP.bits(),
            menu: false,
        },
        Op::Hover(Some(1)),
        Op::Hover(None),
        Op::Key {
            raw: keysyms::KEY_Tab,
            shift: false,
        },
        Op::Key {
            raw: keysyms::KEY_q,
            shift: true,
        },
        Op::RequestGeometry {
            id: 2,
            x: 10,
            y: 10,
            w: 100,
            h: 100,
        },
        Op::RequestState {
            id: 1,
            bit: 1,
            enabled: true,
        },
        Op::ChangeResolution {
            output: 0,
            w: 800,
            h: 600,
        },
        Op::MoveViewToSpace { id: 1, index: 3 },
        Op::MoveViewToOutput { id: 2, index: 1 },
        Op::UnmapView(4),
        Op::UnmapView(1),
    ];

    for op in &every_op {
        check_ops(&[op.clone()]);
    }
    check_ops(&every_op);

    for key in KEYS {
        check_ops(&[
            Op::MapView {
                id: 1,
                parent: None,
                kind: 0,
                menu: false,
            },
            Op::MapView {
                id: 2,
                parent: Some(1),
                kind: 0,
                menu: false,
            },
            Op::MapView {
                id: 3,
                parent: None,
                kind: 0,
                menu: false,
            },
            Op::Key {
                raw: *key,
                shift: false,
            },
        ]);
    }
}

#[test]
fn menu_then_unmap_everything() {
    check_ops(&[
        Op::MapView {
            id: 1,
            parent: None,
            kind: 0,
            menu: true,
        },
        Op::MapView {
            id: 2,
            parent: Some(1),
            kind: 0,
            menu: false,
        },
        Op::Hover(Some(2)),
        Op::MapView {
            id: 3,
            parent: None,
            kind: 0,
            menu: true,
        },
        Op::UnmapView(1),
        Op::UnmapView(2),
    ]);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: if std::env::var_os("RUN_SLOW_TESTS").is_none() {
            64
        } else {
            ProptestConfig::default().cases * 10
        },
        ..ProptestConfig::default()
    })]

    #[test]
    fn random_operations_dont_panic(ops: Vec<Op>) {
        check_ops(&ops);
    }
}
