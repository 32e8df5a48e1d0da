use smithay::input::keyboard::{keysyms, Keysym};

/// Something the user can ask for with a key combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    CloseWindow,
    SpawnTerminal,
    SpawnLauncher,
    ToggleFullscreen,
    CycleViews,
    /// Focus the space at this index on the focused output.
    FocusSpace(usize),
    /// Add this amount to the tiling cut ratio.
    AdjustCut(f64),
    /// Move the focused view to the output at this index.
    MoveViewToOutput(usize),
    /// Move the focused view to the space at this index on its output.
    MoveViewToSpace(usize),
    FocusOutputNext,
    FocusOutputPrevious,
    FocusViewLeft,
    FocusViewRight,
    Screenshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bind {
    pub keysym: Keysym,
    pub action: Action,
}

/// The static binding table.
///
/// Every bind applies only while exactly the configured prefix modifiers are held.
#[derive(Debug, Clone, PartialEq)]
pub struct Binds(pub Vec<Bind>);

impl Binds {
    pub fn find(&self, keysym: Keysym) -> Option<&Bind> {
        self.0.iter().find(|bind| bind.keysym == keysym)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bind> {
        self.0.iter()
    }
}

fn bind(raw: u32, action: Action) -> Bind {
    Bind {
        keysym: Keysym::new(raw),
        action,
    }
}

impl Default for Binds {
    fn default() -> Self {
        use keysyms::*;

        let mut binds = vec![
            bind(KEY_Escape, Action::Quit),
            bind(KEY_q, Action::CloseWindow),
            bind(KEY_Return, Action::SpawnTerminal),
            bind(KEY_p, Action::SpawnLauncher),
            bind(KEY_f, Action::ToggleFullscreen),
            bind(KEY_Tab, Action::CycleViews),
            bind(KEY_l, Action::AdjustCut(CUT_STEP)),
            bind(KEY_h, Action::AdjustCut(-CUT_STEP)),
            bind(KEY_z, Action::MoveViewToOutput(0)),
            bind(KEY_x, Action::MoveViewToOutput(1)),
            bind(KEY_c, Action::MoveViewToOutput(2)),
            bind(KEY_o, Action::FocusOutputNext),
            bind(KEY_Left, Action::FocusViewLeft),
            bind(KEY_Right, Action::FocusViewRight),
            bind(KEY_Print, Action::Screenshot),
        ];

        // 1..9 are the first nine spaces, 0 is the tenth.
        for digit in 0..10 {
            let idx = if digit == 0 { 9 } else { digit as usize - 1 };
            binds.push(bind(KEY_0 + digit, Action::FocusSpace(idx)));
        }

        for n in 0..10 {
            binds.push(bind(KEY_F1 + n, Action::MoveViewToSpace(n as usize)));
        }

        Self(binds)
    }
}

/// Step of the grow/shrink cut ratio binds.
pub const CUT_STEP: f64 = 0.01;
