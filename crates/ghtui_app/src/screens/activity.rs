//! Read-only list of a user's recent public events.

use chrono::{DateTime, Utc};
use ghtui::{sanitize_control, Keybindings, ListItem, SelectList, Spinner};
use github_api::Event;

use crate::msg::{discard_stale, HostOutcome, Msg, RequestId};
use crate::screens::Ctx;
use crate::theme::Theme;

pub const EVENTS_PER_PAGE: u32 = 20;

/// `2024-03-01T12:30:00Z` becomes `2024-03-01 12:30:00 UTC`; anything unparsable is kept.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => timestamp
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    title: String,
    description: String,
}

impl From<&Event> for EventItem {
    fn from(event: &Event) -> Self {
        Self {
            title: sanitize_control(&format!(
                "{} performed {} on {}",
                event.actor.login, event.kind, event.repo.name
            )),
            description: sanitize_control(&format!(
                "Performed at {}",
                format_timestamp(&event.created_at)
            )),
        }
    }
}

impl ListItem for EventItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn filter_value(&self) -> &str {
        &self.title
    }
}

pub struct ActivityScreen {
    login: String,
    list: SelectList<EventItem>,
    spinner: Spinner,
    pending: Option<RequestId>,
    error: Option<String>,
}

impl ActivityScreen {
    /// Requests the first page of events right away.
    pub fn new(login: &str, ctx: &mut Ctx<'_>) -> Self {
        let inner = ctx.inner_size();
        let id = ctx.host.list_user_events(login, 1, EVENTS_PER_PAGE);
        Self {
            login: login.to_string(),
            list: SelectList::new(
                format!("{login} Events"),
                Vec::new(),
                inner.width,
                inner.height,
            ),
            spinner: Spinner::new(ctx.theme.spinner()),
            pending: Some(id),
            error: None,
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn list(&self) -> &SelectList<EventItem> {
        &self.list
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn update(&mut self, msg: &Msg, ctx: &mut Ctx<'_>) {
        match msg {
            Msg::Tick => {
                if self.is_loading() {
                    self.spinner.tick();
                }
            }
            Msg::Resize(_) => {
                let inner = ctx.inner_size();
                self.list.set_size(inner.width, inner.height);
            }
            Msg::Response(response) => match &response.outcome {
                HostOutcome::Events(result) if self.pending == Some(response.request) => {
                    self.pending = None;
                    match result {
                        Ok(events) => {
                            self.list
                                .set_items(events.iter().map(EventItem::from).collect());
                        }
                        Err(message) => self.error = Some(message.clone()),
                    }
                }
                _ => discard_stale("activity", response),
            },
            Msg::Input(event) => {
                if !self.is_loading() && self.error.is_none() {
                    self.list.handle_event(event, ctx.keys);
                }
            }
        }
    }

    pub fn view(&self, theme: &Theme, keys: &Keybindings) -> Vec<String> {
        if self.is_loading() {
            return vec![format!("{} Loading events...", self.spinner.view())];
        }
        match &self.error {
            Some(message) => vec![theme.danger().paint(message)],
            None => self.list.render(&theme.list(), keys),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, EventItem};
    use ghtui::ListItem;
    use github_api::models::{Account, EventRepo};
    use github_api::Event;

    #[test]
    fn timestamps_are_shown_in_utc() {
        assert_eq!(
            format_timestamp("2024-03-01T12:30:05Z"),
            "2024-03-01 12:30:05 UTC"
        );
        assert_eq!(
            format_timestamp("2024-03-01T14:30:05+02:00"),
            "2024-03-01 12:30:05 UTC"
        );
    }

    #[test]
    fn unparsable_timestamps_are_kept_verbatim() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn event_items_describe_actor_kind_and_repo() {
        let event = Event {
            id: Some("1".to_string()),
            kind: "PushEvent".to_string(),
            actor: Account {
                login: "alice".to_string(),
            },
            repo: EventRepo {
                name: "alice/demo".to_string(),
            },
            created_at: "2024-03-01T12:30:05Z".to_string(),
        };
        let item = EventItem::from(&event);
        assert_eq!(item.title(), "alice performed PushEvent on alice/demo");
        assert_eq!(item.description(), "Performed at 2024-03-01 12:30:05 UTC");
    }
}
