//! Colors, spacing and the widget themes derived from them.
//!
//! A [`Theme`] is built once in `main` and handed by reference to every view.

use ghtui::{ListTheme, PaneTheme, Rgb, Style, TextInputTheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub danger: Rgb,
    pub warning: Rgb,
    pub white: Rgb,
    pub success: Rgb,
    pub info: Rgb,
    pub gray: Rgb,
    pub accent: Rgb,
    /// Button label color.
    pub cream: Rgb,
    /// Background of buttons without focus.
    pub muted_button: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            danger: Rgb::from_hex(0xd88c9a),
            warning: Rgb::from_hex(0xf2d0a9),
            white: Rgb::from_hex(0xf1e3d3),
            success: Rgb::from_hex(0x99c1b9),
            info: Rgb::from_hex(0x8e7dbe),
            gray: Rgb::from_hex(0x505050),
            accent: Rgb::from_hex(0xee6ff8),
            cream: Rgb::from_hex(0xfffdf5),
            muted_button: Rgb::from_hex(0x827983),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

impl Padding {
    pub const fn uniform(cells: usize) -> Self {
        Self {
            top: cells,
            right: cells,
            bottom: cells,
            left: cells,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub palette: Palette,
    /// Space kept free around every screen.
    pub padding: Padding,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            padding: Padding::uniform(2),
        }
    }
}

impl Theme {
    pub fn danger(&self) -> Style {
        Style::new().fg(self.palette.danger)
    }

    pub fn spinner(&self) -> Style {
        Style::new().fg(self.palette.accent)
    }

    pub fn muted(&self) -> Style {
        Style::new().fg(self.palette.gray)
    }

    /// Repository name above the browser panes, same look as list titles.
    pub fn title(&self) -> Style {
        Style::new().fg(self.palette.white).bg(self.palette.success)
    }

    pub fn selected_item(&self) -> Style {
        Style::new().fg(self.palette.white).bg(self.palette.info)
    }

    pub fn pane(&self) -> PaneTheme {
        PaneTheme {
            active_border: Style::new().fg(self.palette.accent),
            inactive_border: Style::new().fg(self.palette.gray),
        }
    }

    pub fn list(&self) -> ListTheme {
        ListTheme {
            title: self.title(),
            item_title: Style::new().fg(self.palette.white),
            item_description: self.muted(),
            selected_title: Style::new().fg(self.palette.accent).bold(),
            selected_description: Style::new().fg(self.palette.accent),
            selected_marker: Style::new().fg(self.palette.accent),
            filter_prompt: Style::new().fg(self.palette.warning),
            muted: self.muted(),
        }
    }

    pub fn text_input(&self) -> TextInputTheme {
        TextInputTheme {
            prompt: Style::new(),
            focused_prompt: Style::new().fg(self.palette.accent),
            text: Style::new().fg(self.palette.white),
            placeholder: self.muted(),
            cursor: Style::new().fg(self.palette.gray).bg(self.palette.white),
        }
    }

    pub fn button(&self, focused: bool) -> Style {
        let background = if focused {
            self.palette.accent
        } else {
            self.palette.muted_button
        };
        Style::new().fg(self.palette.cream).bg(background)
    }
}
