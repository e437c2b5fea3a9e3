//! Paginated, filterable list of two-line items.

use crate::core::input_event::InputEvent;
use crate::core::keybindings::{Action, Keybindings};
use crate::core::style::Style;
use crate::core::text::utils::truncate_to_width;

/// Anything a [`SelectList`] can show.
pub trait ListItem {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    /// Text matched against the filter.
    fn filter_value(&self) -> &str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListTheme {
    pub title: Style,
    pub item_title: Style,
    pub item_description: Style,
    pub selected_title: Style,
    pub selected_description: Style,
    pub selected_marker: Style,
    pub filter_prompt: Style,
    pub muted: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    /// The user is typing a filter.
    Filtering,
    /// A filter is in effect and navigation is back to normal.
    Applied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// The event was not for the list.
    Ignored,
    Handled,
    /// `enter` on the item at this index of the unfiltered items.
    Chosen(usize),
}

/// Rows each item takes: title, description and a spacer.
const ITEM_ROWS: usize = 3;
/// Title row and the blank row after it.
const HEADER_ROWS: usize = 2;
/// Pagination row and help row.
const FOOTER_ROWS: usize = 2;

pub struct SelectList<I: ListItem> {
    title: String,
    items: Vec<I>,
    visible: Vec<usize>,
    cursor: usize,
    width: usize,
    height: usize,
    filter: String,
    filter_state: FilterState,
    show_help: bool,
}

impl<I: ListItem> SelectList<I> {
    pub fn new(title: impl Into<String>, items: Vec<I>, width: usize, height: usize) -> Self {
        let mut list = Self {
            title: title.into(),
            visible: Vec::new(),
            items,
            cursor: 0,
            width,
            height,
            filter: String::new(),
            filter_state: FilterState::Unfiltered,
            show_help: false,
        };
        list.refilter();
        list
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_items(&mut self, items: Vec<I>) {
        self.items = items;
        self.cursor = 0;
        self.refilter();
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cursor position within the visible (filtered) items.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Index into [`SelectList::items`] of the highlighted entry.
    pub fn selected_index(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    pub fn selected_item(&self) -> Option<&I> {
        self.selected_index().and_then(|idx| self.items.get(idx))
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.filter_state = if self.filter.is_empty() {
            FilterState::Unfiltered
        } else {
            FilterState::Applied
        };
        self.cursor = 0;
        self.refilter();
    }

    fn refilter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                needle.is_empty() || item.filter_value().to_lowercase().contains(&needle)
            })
            .map(|(idx, _)| idx)
            .collect();
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
    }

    pub fn per_page(&self) -> usize {
        let filter_row = usize::from(self.filter_state != FilterState::Unfiltered);
        let chrome = HEADER_ROWS + FOOTER_ROWS + filter_row;
        (self.height.saturating_sub(chrome) / ITEM_ROWS).max(1)
    }

    pub fn page(&self) -> usize {
        self.cursor / self.per_page()
    }

    pub fn total_pages(&self) -> usize {
        self.visible.len().div_ceil(self.per_page()).max(1)
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        self.cursor = (self.cursor + 1).min(self.visible.len().saturating_sub(1));
    }

    fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.per_page());
    }

    fn page_down(&mut self) {
        self.cursor = (self.cursor + self.per_page()).min(self.visible.len().saturating_sub(1));
    }

    pub fn handle_event(&mut self, event: &InputEvent, keys: &Keybindings) -> ListOutcome {
        if self.filter_state == FilterState::Filtering {
            return self.handle_filter_input(event, keys);
        }

        let key = match event {
            InputEvent::Key { key_id, .. } => key_id.as_str(),
            InputEvent::Text { text, .. } => text.as_str(),
            _ => return ListOutcome::Ignored,
        };

        if keys.matches(key, Action::Up) {
            self.cursor_up();
        } else if keys.matches(key, Action::Down) {
            self.cursor_down();
        } else if keys.matches(key, Action::PageUp) {
            self.page_up();
        } else if keys.matches(key, Action::PageDown) {
            self.page_down();
        } else if keys.matches(key, Action::Home) {
            self.cursor = 0;
        } else if keys.matches(key, Action::End) {
            self.cursor = self.visible.len().saturating_sub(1);
        } else if keys.matches(key, Action::ToggleHelp) {
            self.toggle_help();
        } else if keys.matches(key, Action::Filter) {
            self.filter_state = FilterState::Filtering;
        } else if keys.matches(key, Action::Back) && self.filter_state == FilterState::Applied {
            self.set_filter("");
        } else if keys.matches(key, Action::Select) {
            return match self.selected_index() {
                Some(idx) => ListOutcome::Chosen(idx),
                None => ListOutcome::Handled,
            };
        } else {
            return ListOutcome::Ignored;
        }
        ListOutcome::Handled
    }

    fn handle_filter_input(&mut self, event: &InputEvent, keys: &Keybindings) -> ListOutcome {
        match event {
            InputEvent::Text { text, .. } | InputEvent::Paste { text, .. } => {
                self.filter.extend(text.chars().filter(|ch| !ch.is_control()));
                self.cursor = 0;
                self.refilter();
            }
            InputEvent::Key { key_id, .. } => {
                if keys.matches(key_id, Action::Back) {
                    self.set_filter("");
                } else if keys.matches(key_id, Action::Select) {
                    let filter = std::mem::take(&mut self.filter);
                    self.set_filter(filter);
                } else if keys.matches(key_id, Action::DeleteBackward) {
                    self.filter.pop();
                    self.cursor = 0;
                    self.refilter();
                } else if keys.matches(key_id, Action::Up) {
                    self.cursor_up();
                } else if keys.matches(key_id, Action::Down) {
                    self.cursor_down();
                } else {
                    return ListOutcome::Ignored;
                }
            }
            _ => return ListOutcome::Ignored,
        }
        ListOutcome::Handled
    }

    pub fn render(&self, theme: &ListTheme, keys: &Keybindings) -> Vec<String> {
        let width = self.width;
        let mut lines = vec![theme.title.paint(&format!(" {} ", self.title)), String::new()];

        match self.filter_state {
            FilterState::Unfiltered => {}
            FilterState::Filtering => lines.push(format!(
                "{}{}",
                theme.filter_prompt.paint("Filter: "),
                self.filter
            )),
            FilterState::Applied => lines.push(theme.muted.paint(&format!(
                "“{}” {} {}",
                self.filter,
                self.visible.len(),
                if self.visible.len() == 1 { "item" } else { "items" }
            ))),
        }

        if self.visible.is_empty() {
            let message = if self.items.is_empty() {
                "No items."
            } else {
                "Nothing matched."
            };
            lines.push(theme.muted.paint(message));
        }

        let per_page = self.per_page();
        let start = self.page() * per_page;
        for (offset, idx) in self.visible.iter().skip(start).take(per_page).enumerate() {
            let item = &self.items[*idx];
            let selected = start + offset == self.cursor;
            let text_width = width.saturating_sub(2);
            let title = truncate_to_width(item.title(), text_width, "…", false);
            let description = truncate_to_width(item.description(), text_width, "…", false);
            if selected {
                let marker = theme.selected_marker.paint("│ ");
                lines.push(format!("{marker}{}", theme.selected_title.paint(&title)));
                lines.push(format!("{marker}{}", theme.selected_description.paint(&description)));
            } else {
                lines.push(format!("  {}", theme.item_title.paint(&title)));
                lines.push(format!("  {}", theme.item_description.paint(&description)));
            }
            lines.push(String::new());
        }

        let footer_start = self.height.saturating_sub(FOOTER_ROWS);
        while lines.len() < footer_start {
            lines.push(String::new());
        }
        let pages = self.total_pages();
        lines.push(if pages > 1 {
            theme.muted.paint(&format!("  {}/{}", self.page() + 1, pages))
        } else {
            String::new()
        });
        lines.push(theme.muted.paint(&self.help_line(keys)));
        lines
    }

    fn help_line(&self, keys: &Keybindings) -> String {
        let help = keys.label(Action::ToggleHelp);
        if !self.show_help {
            return format!("  {help} help • {} quit", keys.label(Action::Quit));
        }
        format!(
            "  ↑/{} up • ↓/{} down • {} filter • {} select • {} back • {help} close help",
            keys.keys(Action::Up).get(1).cloned().unwrap_or_default(),
            keys.keys(Action::Down).get(1).cloned().unwrap_or_default(),
            keys.label(Action::Filter),
            keys.label(Action::Select),
            keys.label(Action::Back),
        )
    }
}
