//! Key bind resolution.
//!
//! Free of session state so it can be tested on its own.

use smithay::input::keyboard::Keysym;
use stackwm_config::{Bind, Binds, Modifiers};

/// Finds the bind for a key press.
///
/// Binds only apply while exactly the prefix modifiers are held: extra modifiers, such as shift
/// on top of the prefix, leave the key to the client.
pub fn find_bind(binds: &Binds, prefix: Modifiers, mods: Modifiers, keysym: Keysym) -> Option<&Bind> {
    if mods != prefix {
        return None;
    }

    binds.find(keysym)
}
