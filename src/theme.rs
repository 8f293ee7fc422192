use ratatui::style::Color;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

// Color palette structure
#[allow(dead_code)]
#[derive(Clone)]
pub struct Base16Palette {
    pub base_00: Color, // Background
    pub base_01: Color, // Lighter background
    pub base_02: Color, // Selection background
    pub base_03: Color, // Comments, invisibles
    pub base_04: Color, // Dark foreground
    pub base_05: Color, // Default foreground
    pub base_06: Color, // Light foreground
    pub base_07: Color, // Light background
    pub base_08: Color, // Red
    pub base_09: Color, // Orange
    pub base_0a: Color, // Yellow
    pub base_0b: Color, // Green
    pub base_0c: Color, // Cyan
    pub base_0d: Color, // Blue
    pub base_0e: Color, // Purple
    pub base_0f: Color, // Brown
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ThemeId {
    OceanicNext = 0,
    CatppuccinMocha = 1,
}

impl ThemeId {
    pub fn name(&self) -> &'static str {
        match self {
            ThemeId::OceanicNext => "Oceanic Next",
            ThemeId::CatppuccinMocha => "Catppuccin Mocha",
        }
    }

    pub fn all() -> &'static [ThemeId] {
        &[ThemeId::OceanicNext, ThemeId::CatppuccinMocha]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }

    fn from_index(idx: usize) -> Self {
        match idx {
            1 => ThemeId::CatppuccinMocha,
            _ => ThemeId::OceanicNext,
        }
    }
}

static CURRENT_THEME_INDEX: AtomicUsize = AtomicUsize::new(0);

pub fn current_theme_id() -> ThemeId {
    ThemeId::from_index(CURRENT_THEME_INDEX.load(Ordering::Relaxed))
}

pub fn set_theme(theme: ThemeId) {
    CURRENT_THEME_INDEX.store(theme as usize, Ordering::Relaxed);
}

pub fn current_theme() -> &'static Base16Palette {
    match current_theme_id() {
        ThemeId::OceanicNext => &OCEANIC_NEXT_PALETTE,
        ThemeId::CatppuccinMocha => &CATPPUCCIN_MOCHA_PALETTE,
    }
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

static OCEANIC_NEXT_PALETTE: LazyLock<Base16Palette> = LazyLock::new(|| Base16Palette {
    base_00: rgb(0x1B2B34),
    base_01: rgb(0x343D46),
    base_02: rgb(0x4F5B66),
    base_03: rgb(0x65737E),
    base_04: rgb(0xA7ADBA),
    base_05: rgb(0xC0C5CE),
    base_06: rgb(0xCDD3DE),
    base_07: rgb(0xF0F4F8),
    base_08: rgb(0xEC5F67),
    base_09: rgb(0xF99157),
    base_0a: rgb(0xFAC863),
    base_0b: rgb(0x99C794),
    base_0c: rgb(0x5FB3B3),
    base_0d: rgb(0x6699CC),
    base_0e: rgb(0xC594C5),
    base_0f: rgb(0xAB7967),
});

static CATPPUCCIN_MOCHA_PALETTE: LazyLock<Base16Palette> = LazyLock::new(|| Base16Palette {
    base_00: rgb(0x1E1E2E), // base
    base_01: rgb(0x313244), // surface0
    base_02: rgb(0x45475A), // surface1
    base_03: rgb(0x6C7086), // overlay0
    base_04: rgb(0x7F849C), // overlay1
    base_05: rgb(0xA6ADC8), // subtext0
    base_06: rgb(0xCDD6F4), // text
    base_07: rgb(0xF5E0DC), // rosewater
    base_08: rgb(0xF38BA8), // red
    base_09: rgb(0xFAB387), // peach
    base_0a: rgb(0xF9E2AF), // yellow
    base_0b: rgb(0xA6E3A1), // green
    base_0c: rgb(0x94E2D5), // teal
    base_0d: rgb(0x89B4FA), // blue
    base_0e: rgb(0xCBA6F7), // mauve
    base_0f: rgb(0xEBA0AC), // maroon
});

impl Base16Palette {
    // text, border, background
    pub fn get_panel_colors(&self, is_focused: bool) -> (Color, Color, Color) {
        if is_focused {
            (self.base_07, self.base_04, self.base_00)
        } else {
            (self.base_03, self.base_03, self.base_00)
        }
    }

    // selection background, selection foreground
    pub fn get_selection_colors(&self, is_focused: bool) -> (Color, Color) {
        if is_focused {
            (self.base_02, self.base_06)
        } else {
            (self.base_01, self.base_04)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_lookup_by_name_ignores_case() {
        assert_eq!(
            ThemeId::from_name("catppuccin mocha"),
            Some(ThemeId::CatppuccinMocha)
        );
        assert_eq!(ThemeId::from_name("Solarized"), None);
    }

    #[test]
    fn rgb_splits_channels() {
        assert_eq!(rgb(0x1B2B34), Color::Rgb(0x1B, 0x2B, 0x34));
    }
}
