//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for app shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Theme toggle shortcut display
#[cfg(target_os = "macos")]
pub const THEME_SHORTCUT: &str = "Cmd+T";

#[cfg(not(target_os = "macos"))]
pub const THEME_SHORTCUT: &str = "Ctrl+T";

/// Form/list focus switch shortcut display (F2 works everywhere)
#[cfg(target_os = "macos")]
pub const FOCUS_SHORTCUT: &str = "Cmd+L/F2";

#[cfg(not(target_os = "macos"))]
pub const FOCUS_SHORTCUT: &str = "Ctrl+L/F2";
