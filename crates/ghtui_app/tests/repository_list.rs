mod support;

use ghtui::FilterState;
use ghtui_app::msg::{HostOutcome, Msg, ScreenSize};
use ghtui_app::screens::{ListState, Owner, RepositoryListScreen, REPOSITORIES_PER_PAGE};
use github_api::Repository;
use pretty_assertions::assert_eq;

use support::{key, plain_view, repository, respond, text, Harness, HostCall};

fn repositories() -> Vec<Repository> {
    vec![
        repository("alice", "alpha", Some("First project")),
        repository("alice", "beta", None),
        repository("alice", "gamma", Some("Third project")),
    ]
}

fn send(screen: &mut RepositoryListScreen, harness: &mut Harness, msg: Msg) {
    screen.update(&msg, &mut harness.ctx());
}

fn ready_screen(harness: &mut Harness) -> RepositoryListScreen {
    let mut screen = RepositoryListScreen::new(Owner::User("alice".into()), &harness.theme);
    screen.init(&mut harness.ctx());
    let id = harness.host.last_id();
    send(
        &mut screen,
        harness,
        respond(id, HostOutcome::Repositories(Ok(repositories()))),
    );
    screen
}

#[test]
fn init_requests_one_page_of_user_repositories() {
    let mut harness = Harness::default();
    let mut screen = RepositoryListScreen::new(Owner::User("alice".into()), &harness.theme);
    screen.init(&mut harness.ctx());

    assert_eq!(
        harness.host.calls(),
        vec![HostCall::ListUserRepositories(
            "alice".to_string(),
            1,
            REPOSITORIES_PER_PAGE
        )]
    );
    assert_eq!(screen.state(), &ListState::Loading);
    assert!(screen.is_loading());
    assert_eq!(
        plain_view(&screen.view(&harness.theme, &harness.keys)),
        vec!["⠋ Loading repositories...".to_string()]
    );
}

#[test]
fn organizations_use_the_organization_endpoint() {
    let mut harness = Harness::default();
    let mut screen =
        RepositoryListScreen::new(Owner::Organization("acme".into()), &harness.theme);
    screen.init(&mut harness.ctx());

    assert_eq!(
        harness.host.last_call(),
        Some(HostCall::ListOrganizationRepositories(
            "acme".to_string(),
            1,
            100
        ))
    );
    assert_eq!(screen.list().title(), "acme Repositories");
}

#[test]
fn loaded_repositories_render_with_fallback_descriptions() {
    let mut harness = Harness::default();
    let screen = ready_screen(&mut harness);

    assert_eq!(screen.state(), &ListState::Ready);
    assert!(!screen.is_loading());

    let view = plain_view(&screen.view(&harness.theme, &harness.keys));
    assert_eq!(view.len(), 36);
    assert_eq!(view[0], " alice Repositories");
    assert!(view.contains(&"│ alpha".to_string()));
    assert!(view.contains(&"│ First project".to_string()));
    assert!(view.contains(&"  beta".to_string()));
    assert!(view.contains(&"  The alice/beta repository.".to_string()));
}

#[test]
fn choosing_a_repository_opens_its_browser() {
    let mut harness = Harness::default();
    let mut screen = ready_screen(&mut harness);

    send(&mut screen, &mut harness, key("down"));
    send(&mut screen, &mut harness, key("enter"));

    assert_eq!(screen.state(), &ListState::RepositorySelected);
    let browser = screen.browser().expect("browser open");
    assert_eq!(browser.repository().full_name, "alice/beta");
    assert_eq!(
        harness.host.last_call(),
        Some(HostCall::ListDirectory {
            owner: "alice".to_string(),
            repo: "beta".to_string(),
            path: String::new(),
            git_ref: "main".to_string(),
        })
    );
    assert!(screen.is_loading());
}

#[test]
fn browser_done_returns_to_the_list() {
    let mut harness = Harness::default();
    let mut screen = ready_screen(&mut harness);
    send(&mut screen, &mut harness, key("enter"));

    send(&mut screen, &mut harness, key("escape"));

    assert_eq!(screen.state(), &ListState::Ready);
    assert!(screen.browser().is_none());
    assert_eq!(screen.list().cursor(), 0);
}

#[test]
fn events_go_to_the_open_browser() {
    let mut harness = Harness::default();
    let mut screen = ready_screen(&mut harness);
    send(&mut screen, &mut harness, key("enter"));
    let id = harness.host.last_id();

    send(
        &mut screen,
        &mut harness,
        respond(
            id,
            HostOutcome::Directory(Ok(vec![support::entry(
                "",
                "lib.rs",
                github_api::EntryKind::File,
            )])),
        ),
    );
    send(&mut screen, &mut harness, key("down"));

    let browser = screen.browser().expect("browser open");
    assert_eq!(browser.entries().len(), 1);
    assert_eq!(screen.list().cursor(), 0);
}

#[test]
fn filtered_selection_resolves_to_the_original_repository() {
    let mut harness = Harness::default();
    let mut screen = ready_screen(&mut harness);

    send(&mut screen, &mut harness, text("/"));
    assert_eq!(screen.list().filter_state(), FilterState::Filtering);
    send(&mut screen, &mut harness, text("GAM"));
    send(&mut screen, &mut harness, key("enter"));
    assert_eq!(screen.list().filter_state(), FilterState::Applied);
    assert_eq!(screen.list().visible_len(), 1);

    send(&mut screen, &mut harness, key("enter"));

    let browser = screen.browser().expect("browser open");
    assert_eq!(browser.repository().name, "gamma");
}

#[test]
fn help_toggles_with_capital_h() {
    let mut harness = Harness::default();
    let mut screen = ready_screen(&mut harness);
    assert!(!screen.list().show_help());

    send(&mut screen, &mut harness, text("H"));
    assert!(screen.list().show_help());
}

#[test]
fn listing_failure_renders_the_error() {
    let mut harness = Harness::default();
    let mut screen = RepositoryListScreen::new(Owner::User("alice".into()), &harness.theme);
    screen.init(&mut harness.ctx());
    let id = harness.host.last_id();

    send(
        &mut screen,
        &mut harness,
        respond(
            id,
            HostOutcome::Repositories(Err("GitHub rate limit reached: slow down".into())),
        ),
    );

    assert_eq!(
        screen.state(),
        &ListState::Error("GitHub rate limit reached: slow down".to_string())
    );
    assert_eq!(
        plain_view(&screen.view(&harness.theme, &harness.keys)),
        vec!["GitHub rate limit reached: slow down".to_string()]
    );
    send(&mut screen, &mut harness, key("enter"));
    assert!(screen.browser().is_none());
}

#[test]
fn resize_recomputes_list_dimensions_in_any_state() {
    let mut harness = Harness::default();
    let mut screen = RepositoryListScreen::new(Owner::User("alice".into()), &harness.theme);
    screen.init(&mut harness.ctx());
    assert_eq!(screen.list().size(), (96, 36));

    let size = ScreenSize::new(80, 30);
    harness.size = size;
    send(&mut screen, &mut harness, Msg::Resize(size));

    assert_eq!(screen.list().size(), (76, 26));
}
