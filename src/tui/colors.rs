//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Priority accents mirror the card badges of the web-style board.

/// Used for low priority cards
pub const LOW_BLUE: Color = Color::Rgb(96, 165, 250);
/// Used for medium priority cards
pub const MEDIUM_YELLOW: Color = Color::Rgb(250, 204, 21);
/// Used for high priority cards
pub const HIGH_ORANGE: Color = Color::Rgb(251, 146, 60);
/// Used for urgent cards
pub const URGENT_RED: Color = Color::Rgb(248, 113, 113);
/// Used for the column and card that currently have focus
pub const ACCENT_PURPLE: Color = Color::Rgb(167, 139, 250);
