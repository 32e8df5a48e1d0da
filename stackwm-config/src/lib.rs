//! Static configuration for stackwm.
//!
//! There is no configuration file: the only knob exposed to the operator is the modifier prefix,
//! everything else is compiled in.

#[macro_use]
extern crate tracing;

mod binds;
mod modifiers;

pub use binds::{Action, Bind, Binds, CUT_STEP};
pub use modifiers::Modifiers;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Modifiers that must be held, exactly, for a bind to fire.
    pub prefix: Modifiers,
    pub binds: Binds,
    pub layout: Layout,
    pub spawn: Spawn,
    /// Application class of the launcher menu, of which only one instance may be mapped.
    pub menu_class: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Initial tiling cut ratio.
    pub cut: f64,
    /// Number of spaces requested from the engine for each new output.
    pub spaces_per_output: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spawn {
    /// Used when `$TERMINAL` is not set.
    pub terminal: String,
    pub launcher: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: Modifiers::default(),
            binds: Binds::default(),
            layout: Layout::default(),
            spawn: Spawn::default(),
            menu_class: String::from("bemenu"),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cut: 0.5,
            spaces_per_output: 9,
        }
    }
}

impl Default for Spawn {
    fn default() -> Self {
        Self {
            terminal: String::from("weston-terminal"),
            launcher: String::from("bemenu-run"),
        }
    }
}

impl Config {
    pub fn with_prefix(mut self, prefix: Modifiers) -> Self {
        self.prefix = prefix;
        self
    }

    /// Terminal to spawn, honoring `$TERMINAL`.
    pub fn terminal(&self) -> String {
        std::env::var("TERMINAL")
            .ok()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.spawn.terminal.clone())
    }
}
