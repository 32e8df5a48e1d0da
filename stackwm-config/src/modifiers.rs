use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use smithay::input::keyboard::ModifiersState;

bitflags! {
    /// Keyboard modifier mask, in the bit order the compositor engine reports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers : u8 {
        const SHIFT = 1;
        const CAPS = 1 << 1;
        const CTRL = 1 << 2;
        const ALT = 1 << 3;
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const LOGO = 1 << 6;
        const MOD5 = 1 << 7;
    }
}

/// Names accepted by `--prefix`, in the order they are documented.
const PREFIX_NAMES: [(&str, Modifiers); 8] = [
    ("shift", Modifiers::SHIFT),
    ("caps", Modifiers::CAPS),
    ("ctrl", Modifiers::CTRL),
    ("alt", Modifiers::ALT),
    ("logo", Modifiers::LOGO),
    ("mod2", Modifiers::MOD2),
    ("mod3", Modifiers::MOD3),
    ("mod5", Modifiers::MOD5),
];

impl Modifiers {
    /// Parses a comma-separated list of modifier names.
    ///
    /// Unknown names are skipped. If nothing valid remains, the prefix is Alt.
    pub fn from_prefix(s: &str) -> Self {
        let mut prefix = Modifiers::empty();

        for name in s.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            match PREFIX_NAMES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(name))
            {
                Some((_, bit)) => prefix |= *bit,
                None => warn!("ignoring unknown prefix modifier: {name}"),
            }
        }

        if prefix.is_empty() {
            Modifiers::ALT
        } else {
            prefix
        }
    }

    /// Converts the XKB modifier state into a mask.
    ///
    /// Num Lock maps to Mod2, ISO Level 5 Shift to Mod3 and ISO Level 3 Shift (AltGr) to Mod5,
    /// following the usual X11 modifier map.
    pub fn from_state(mods: ModifiersState) -> Self {
        let mut modifiers = Modifiers::empty();
        if mods.shift {
            modifiers |= Modifiers::SHIFT;
        }
        if mods.caps_lock {
            modifiers |= Modifiers::CAPS;
        }
        if mods.ctrl {
            modifiers |= Modifiers::CTRL;
        }
        if mods.alt {
            modifiers |= Modifiers::ALT;
        }
        if mods.num_lock {
            modifiers |= Modifiers::MOD2;
        }
        if mods.iso_level5_shift {
            modifiers |= Modifiers::MOD3;
        }
        if mods.logo {
            modifiers |= Modifiers::LOGO;
        }
        if mods.iso_level3_shift {
            modifiers |= Modifiers::MOD5;
        }
        modifiers
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers::ALT
    }
}

impl FromStr for Modifiers {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_prefix(s))
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, bit) in PREFIX_NAMES {
            if self.contains(bit) {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
