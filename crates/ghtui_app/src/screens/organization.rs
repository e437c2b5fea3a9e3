//! Form asking for an organization name, with OK and Cancel buttons.

use ghtui::{Action, InputEvent, Spinner, TextInput};

use crate::msg::{discard_stale, key_of, HostOutcome, Msg, RequestId, Response};
use crate::screens::Ctx;
use crate::theme::Theme;

pub const CHAR_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Ready,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptFocus {
    Input,
    Ok,
    Cancel,
}

impl PromptFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Input => Self::Ok,
            Self::Ok => Self::Cancel,
            Self::Cancel => Self::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Input => Self::Cancel,
            Self::Ok => Self::Input,
            Self::Cancel => Self::Ok,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    None,
    /// The organization exists.
    OrganizationSet { login: String, name: String },
    Done,
    Quit,
}

pub struct OrganizationPrompt {
    input: TextInput,
    focus: PromptFocus,
    state: PromptState,
    error: Option<String>,
    spinner: Spinner,
    pending: Option<RequestId>,
    done: bool,
    quit: bool,
}

impl OrganizationPrompt {
    pub fn new(theme: &Theme) -> Self {
        let mut input = TextInput::new()
            .with_placeholder("Enter your organization")
            .with_char_limit(CHAR_LIMIT);
        input.focus();
        Self {
            input,
            focus: PromptFocus::Input,
            state: PromptState::Ready,
            error: None,
            spinner: Spinner::new(theme.spinner()),
            pending: None,
            done: false,
            quit: false,
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn focus(&self) -> PromptFocus {
        self.focus
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_loading(&self) -> bool {
        self.state == PromptState::Submitting
    }

    pub fn update(&mut self, msg: &Msg, ctx: &mut Ctx<'_>) -> PromptOutcome {
        match msg {
            Msg::Tick => {
                if self.is_loading() {
                    self.spinner.tick();
                }
                PromptOutcome::None
            }
            Msg::Resize(_) => PromptOutcome::None,
            Msg::Response(response) => self.on_response(response),
            Msg::Input(event) => self.on_input(event, ctx),
        }
    }

    fn on_response(&mut self, response: &Response) -> PromptOutcome {
        match &response.outcome {
            HostOutcome::Organization(result) if self.pending == Some(response.request) => {
                self.pending = None;
                self.state = PromptState::Ready;
                match result {
                    Ok(organization) => PromptOutcome::OrganizationSet {
                        login: organization.login.clone(),
                        name: organization.display_name().to_string(),
                    },
                    Err(message) => {
                        self.error = Some(message.clone());
                        PromptOutcome::None
                    }
                }
            }
            _ => {
                discard_stale("organization prompt", response);
                PromptOutcome::None
            }
        }
    }

    fn on_input(&mut self, event: &InputEvent, ctx: &mut Ctx<'_>) -> PromptOutcome {
        let keys = ctx.keys;
        if let Some(key) = key_of(event) {
            if keys.matches(key, Action::Quit) {
                self.quit = true;
                return PromptOutcome::Quit;
            }
            if keys.matches(key, Action::Back) {
                self.done = true;
                return PromptOutcome::Done;
            }
        }
        if self.state == PromptState::Submitting {
            return PromptOutcome::None;
        }
        if self.focus == PromptFocus::Input && self.input.handle_event(event, keys) {
            return PromptOutcome::None;
        }

        let Some(key) = key_of(event) else {
            return PromptOutcome::None;
        };
        if keys.matches(key, Action::FocusNext) {
            self.set_focus(self.focus.next());
        } else if keys.matches(key, Action::FocusPrev) {
            self.set_focus(self.focus.prev());
        } else if keys.matches(key, Action::Select) {
            match self.focus {
                PromptFocus::Input | PromptFocus::Ok => self.submit(ctx),
                PromptFocus::Cancel => {
                    self.done = true;
                    return PromptOutcome::Done;
                }
            }
        }
        PromptOutcome::None
    }

    fn submit(&mut self, ctx: &mut Ctx<'_>) {
        let name = self.input.value().trim().to_string();
        self.input.set_value(name.clone());
        if name.is_empty() {
            self.error = Some("Enter an organization name.".to_string());
            return;
        }
        log::info!("looking up organization {name}");
        self.error = None;
        self.state = PromptState::Submitting;
        self.pending = Some(ctx.host.get_organization(&name));
    }

    fn set_focus(&mut self, focus: PromptFocus) {
        self.focus = focus;
        if focus == PromptFocus::Input {
            self.input.focus();
        } else {
            self.input.blur();
        }
    }

    pub fn view(&self, theme: &Theme, width: usize) -> Vec<String> {
        let mut lines = vec![
            "Enter your Organization".to_string(),
            String::new(),
            self.input.render(&theme.text_input(), width),
            String::new(),
        ];
        if self.state == PromptState::Submitting {
            lines.push(format!("{} Submitting...", self.spinner.view()));
        } else {
            lines.push(format!(
                "{} {}",
                button(theme, "OK", self.focus == PromptFocus::Ok, true),
                button(theme, "Cancel", self.focus == PromptFocus::Cancel, false),
            ));
        }
        if let Some(message) = &self.error {
            lines.push(String::new());
            lines.push(theme.danger().paint(message));
        }
        lines
    }
}

fn button(theme: &Theme, label: &str, focused: bool, default: bool) -> String {
    let style = theme.button(focused);
    let label_style = if default { style.underline() } else { style };
    format!(
        "{}{}{}",
        style.paint("  "),
        label_style.paint(label),
        style.paint("  ")
    )
}

#[cfg(test)]
mod tests {
    use super::PromptFocus;

    #[test]
    fn focus_cycles_through_three_controls_both_ways() {
        let start = PromptFocus::Input;
        assert_eq!(start.next(), PromptFocus::Ok);
        assert_eq!(start.next().next(), PromptFocus::Cancel);
        assert_eq!(start.next().next().next(), start);
        assert_eq!(start.prev(), PromptFocus::Cancel);
        assert_eq!(start.prev().prev().prev(), start);
    }
}
