use std::process::ExitCode;

use clap::Parser;
use ghtui::{EnvConfig, Keybindings, ProcessTerminal, SyntectHighlighter, TUI};
use ghtui_app::app::App;
use ghtui_app::cli::{Cli, Settings, StartupError};
use ghtui_app::host::GithubHost;
use ghtui_app::msg::Msg;
use ghtui_app::runtime::AppController;
use ghtui_app::theme::Theme;
use ghtui_app::tui::AppComponent;
use github_api::{GithubApiClient, GithubApiConfig};

fn main() -> ExitCode {
    let settings = match Cli::parse().into_settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(1);
        }
    };

    let env = EnvConfig::from_env();
    if let Err(err) = ghtui::logging::init(&env) {
        eprintln!("Could not open log file: {err}");
    }

    match run(settings, &env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("startup failed: {err}");
            eprintln!("Could not start ghtui: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(settings: Settings, env: &EnvConfig) -> Result<(), StartupError> {
    let config = GithubApiConfig::new(settings.token)
        .with_base_url(settings.api_url)
        .with_timeout(settings.timeout);
    let client = GithubApiClient::new(config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("ghtui-http")
        .enable_all()
        .build()?;

    let mut tui = TUI::new(ProcessTerminal::with_config(env));
    let handle = runtime.handle().clone();
    let login = settings.username;
    let controller = AppController::new_cyclic(tui.runtime_handle(), |sink| {
        App::new(
            login,
            Box::new(GithubHost::new(client, handle, sink)),
            Box::new(SyntectHighlighter::default()),
            Keybindings::default(),
            Theme::default(),
        )
    });
    tui.set_root(Box::new(AppComponent::new(controller.clone())));

    tui.start()?;
    log::info!("ghtui started");
    controller.enqueue(Msg::Tick);
    let ticker = controller.spawn_ticker()?;

    while !controller.should_exit() && !tui.is_stopped() {
        tui.run_blocking_once();
    }

    controller.shutdown();
    let stopped = tui.stop();
    let _ = ticker.join();
    runtime.shutdown_background();
    log::info!("ghtui stopped");
    stopped.map_err(StartupError::from)
}
