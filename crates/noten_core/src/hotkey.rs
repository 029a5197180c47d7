//! Global hotkey string parsing (`Ctrl+Shift+K` style).
//!
//! Produces modifier flags and a Windows virtual-key code. Registration with
//! the OS is the host's concern.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys, bit-compatible with the Win32 `MOD_*` constants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HotkeyModifiers: u32 {
        const ALT = 0x1;
        const CONTROL = 0x2;
        const SHIFT = 0x4;
        const WINDOWS = 0x8;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyBinding {
    pub modifiers: HotkeyModifiers,
    pub virtual_key: u32,
}

impl Default for HotkeyBinding {
    /// Ctrl+Space.
    fn default() -> Self {
        Self {
            modifiers: HotkeyModifiers::CONTROL,
            virtual_key: 0x20,
        }
    }
}

const NAMED_KEYS: &[(&str, u32)] = &[
    ("Space", 0x20),
    ("Tab", 0x09),
    ("Enter", 0x0D),
    ("Escape", 0x1B),
    ("F1", 0x70),
    ("F2", 0x71),
    ("F3", 0x72),
    ("F4", 0x73),
    ("F5", 0x74),
    ("F6", 0x75),
    ("F7", 0x76),
    ("F8", 0x77),
    ("F9", 0x78),
    ("F10", 0x79),
    ("F11", 0x7A),
    ("F12", 0x7B),
];

/// Parses a `+`-separated shortcut.
///
/// Returns `None` for unknown tokens, or when no modifier or no key is given.
pub fn parse_hotkey(input: &str) -> Option<HotkeyBinding> {
    let mut modifiers = HotkeyModifiers::empty();
    let mut virtual_key = None;

    for token in input.split('+').map(str::trim).filter(|token| !token.is_empty()) {
        if let Some(modifier) = parse_modifier(token) {
            modifiers |= modifier;
            continue;
        }
        virtual_key = Some(parse_key(token)?);
    }

    if modifiers.is_empty() {
        return None;
    }
    Some(HotkeyBinding {
        modifiers,
        virtual_key: virtual_key?,
    })
}

fn parse_modifier(token: &str) -> Option<HotkeyModifiers> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(HotkeyModifiers::CONTROL),
        "alt" => Some(HotkeyModifiers::ALT),
        "shift" => Some(HotkeyModifiers::SHIFT),
        "win" | "windows" => Some(HotkeyModifiers::WINDOWS),
        _ => None,
    }
}

fn parse_key(token: &str) -> Option<u32> {
    let mut chars = token.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if ch.is_ascii_alphanumeric() {
            return Some(u32::from(ch.to_ascii_uppercase()));
        }
    }

    NAMED_KEYS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::{parse_hotkey, HotkeyBinding, HotkeyModifiers};

    #[test]
    fn parses_common_shortcuts() {
        assert_eq!(parse_hotkey("Ctrl+Space"), Some(HotkeyBinding::default()));

        let binding = parse_hotkey("Ctrl+Shift+k").expect("valid shortcut");
        assert_eq!(
            binding.modifiers,
            HotkeyModifiers::CONTROL | HotkeyModifiers::SHIFT
        );
        assert_eq!(binding.virtual_key, u32::from(b'K'));

        let binding = parse_hotkey(" alt + f2 ").expect("valid shortcut");
        assert_eq!(binding.modifiers, HotkeyModifiers::ALT);
        assert_eq!(binding.virtual_key, 0x71);
    }

    #[test]
    fn rejects_incomplete_or_unknown_shortcuts() {
        assert_eq!(parse_hotkey("Space"), None);
        assert_eq!(parse_hotkey("Ctrl+"), None);
        assert_eq!(parse_hotkey("Cmd+Space"), None);
        assert_eq!(parse_hotkey(""), None);
    }
}
