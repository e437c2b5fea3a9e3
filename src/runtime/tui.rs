//! Blocking TUI runtime.
//!
//! The runtime owns the terminal and one root component. Terminal input, resize signals and
//! commands dispatched from other threads are queued in [`RuntimeWake`]; the owning thread
//! drains them in `run_blocking_once` and renders at most once per wake-up.

use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use crate::core::component::Component;
use crate::core::input_event::{parse_input_events, InputEvent};
use crate::core::output::{OutputGate, TerminalCmd};
use crate::core::terminal::Terminal;
use crate::render::DiffRenderer;

const STOP_DRAIN_MAX_MS: u64 = 1000;
const STOP_DRAIN_IDLE_MS: u64 = 50;

/// Work a background thread can hand to the runtime thread.
pub enum Command {
    RequestRender,
    RequestStop,
    Custom(Box<dyn CustomCommand>),
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestRender => write!(f, "RequestRender"),
            Self::RequestStop => write!(f, "RequestStop"),
            Self::Custom(command) => write!(f, "Custom({})", command.name()),
        }
    }
}

/// A unit of application work executed on the runtime thread.
pub trait CustomCommand: Send {
    fn name(&self) -> &'static str;

    fn apply(self: Box<Self>, ctx: &mut CustomCommandCtx) -> Result<(), CustomCommandError>;
}

#[derive(Debug, Default)]
pub struct CustomCommandCtx {
    render_requested: bool,
    stop_requested: bool,
}

impl CustomCommandCtx {
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomCommandError {
    message: String,
}

impl CustomCommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CustomCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CustomCommandError {}

#[derive(Default)]
struct RuntimeWakeState {
    pending_inputs: Vec<String>,
    pending_resize: bool,
    pending_commands: VecDeque<Command>,
    render_requested: bool,
    stop_requested: bool,
}

impl RuntimeWakeState {
    fn has_work(&self) -> bool {
        !self.pending_inputs.is_empty()
            || self.pending_resize
            || !self.pending_commands.is_empty()
            || self.render_requested
    }
}

#[derive(Default)]
struct RuntimeWake {
    state: Mutex<RuntimeWakeState>,
    cvar: Condvar,
}

impl RuntimeWake {
    fn lock(&self) -> MutexGuard<'_, RuntimeWakeState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Blocks until there is work. Returns `false` once a stop was requested.
    fn wait_for_event(&self) -> bool {
        let mut state = self.lock();
        while !state.stop_requested && !state.has_work() {
            state = self
                .cvar
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        !state.stop_requested
    }

    fn enqueue_input(&self, data: String) {
        self.lock().pending_inputs.push(data);
        self.cvar.notify_one();
    }

    fn signal_resize(&self) {
        self.lock().pending_resize = true;
        self.cvar.notify_one();
    }

    fn dispatch(&self, command: Command) {
        let mut state = self.lock();
        match command {
            Command::RequestRender => state.render_requested = true,
            Command::RequestStop => state.stop_requested = true,
            Command::Custom(_) => state.pending_commands.push_back(command),
        }
        self.cvar.notify_all();
    }

    fn take_pending_resize(&self) -> bool {
        std::mem::take(&mut self.lock().pending_resize)
    }

    fn drain_inputs(&self) -> Vec<String> {
        std::mem::take(&mut self.lock().pending_inputs)
    }

    fn drain_commands(&self) -> Vec<Command> {
        self.lock().pending_commands.drain(..).collect()
    }

    fn take_render_requested(&self) -> bool {
        std::mem::take(&mut self.lock().render_requested)
    }

    fn request_render(&self) {
        self.dispatch(Command::RequestRender);
    }

    fn is_stop_requested(&self) -> bool {
        self.lock().stop_requested
    }

    fn reset_for_start(&self) {
        *self.lock() = RuntimeWakeState::default();
    }
}

/// Cloneable, `Send` handle for queuing [`Command`]s from any thread.
#[derive(Clone)]
pub struct RuntimeHandle {
    wake: Arc<RuntimeWake>,
}

impl RuntimeHandle {
    pub fn dispatch(&self, command: Command) {
        self.wake.dispatch(command);
    }

    pub fn request_render(&self) {
        self.wake.request_render();
    }
}

pub struct TuiRuntime<T: Terminal> {
    terminal: T,
    output: OutputGate,
    root: Box<dyn Component>,
    renderer: DiffRenderer,
    wake: Arc<RuntimeWake>,
    stopped: bool,
}

impl<T: Terminal> TuiRuntime<T> {
    /// Creates a stopped runtime with an empty root; install the real root with
    /// [`TuiRuntime::set_root`] before [`TuiRuntime::start`].
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            output: OutputGate::new(),
            root: Box::new(EmptyRoot),
            renderer: DiffRenderer::new(),
            wake: Arc::new(RuntimeWake::default()),
            stopped: true,
        }
    }

    pub fn set_root(&mut self, root: Box<dyn Component>) {
        self.root = root;
        self.renderer.request_full_redraw_next();
        self.wake.request_render();
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            wake: Arc::clone(&self.wake),
        }
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped || self.wake.is_stop_requested()
    }

    pub fn start(&mut self) -> io::Result<()> {
        self.output.clear();
        self.wake.reset_for_start();

        let wake_input = Arc::clone(&self.wake);
        let wake_resize = Arc::clone(&self.wake);
        self.terminal.start(
            Box::new(move |data| wake_input.enqueue_input(data)),
            Box::new(move || wake_resize.signal_resize()),
        )?;
        self.stopped = false;

        self.output.push(TerminalCmd::AltScreenEnable);
        self.output.push(TerminalCmd::HideCursor);
        self.output.push(TerminalCmd::BracketedPasteEnable);
        self.output.push(TerminalCmd::ClearScreen);
        self.flush_output();

        self.root.set_viewport_size(
            self.terminal.columns() as usize,
            self.terminal.rows() as usize,
        );
        self.renderer.request_full_redraw_next();
        self.wake.request_render();
        Ok(())
    }

    pub fn stop(&mut self) -> io::Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.wake.dispatch(Command::RequestStop);
        self.output.push(TerminalCmd::ResetStyle);
        self.output.push(TerminalCmd::ShowCursor);
        self.output.push(TerminalCmd::BracketedPasteDisable);
        self.output.push(TerminalCmd::AltScreenDisable);
        self.flush_output();
        self.terminal
            .drain_input(STOP_DRAIN_MAX_MS, STOP_DRAIN_IDLE_MS);
        let result = self.terminal.stop();
        self.stopped = true;
        result
    }

    /// Blocks until input, a resize, a command or a render request arrives, then handles all
    /// queued work and renders once.
    ///
    /// Callers loop on this; it returns immediately once the runtime is stopped.
    pub fn run_blocking_once(&mut self) {
        if self.stopped {
            return;
        }
        if !self.wake.wait_for_event() {
            return;
        }
        self.run_once();
    }

    /// Handles queued work without blocking.
    pub fn run_once(&mut self) {
        if self.stopped {
            return;
        }

        if self.wake.take_pending_resize() {
            let columns = self.terminal.columns();
            let rows = self.terminal.rows();
            self.root
                .set_viewport_size(columns as usize, rows as usize);
            self.root
                .handle_event(&InputEvent::Resize { columns, rows });
            self.renderer.request_full_redraw_next();
            self.wake.request_render();
        }

        for data in self.wake.drain_inputs() {
            self.handle_input(&data);
        }

        for command in self.wake.drain_commands() {
            self.apply_command(command);
        }

        self.render_if_needed();
    }

    pub fn handle_input(&mut self, data: &str) {
        let events = parse_input_events(data);
        if events.is_empty() {
            return;
        }
        for event in &events {
            self.root.handle_event(event);
        }
        self.wake.request_render();
    }

    fn apply_command(&mut self, command: Command) {
        let Command::Custom(command) = command else {
            return;
        };
        let name = command.name();
        let mut ctx = CustomCommandCtx::default();
        if let Err(err) = command.apply(&mut ctx) {
            log::warn!("command {name} failed: {err}");
        }
        if ctx.render_requested {
            self.wake.request_render();
        }
        if ctx.stop_requested {
            self.wake.dispatch(Command::RequestStop);
        }
    }

    pub fn render_if_needed(&mut self) {
        if self.wake.take_render_requested() {
            self.render_now();
        }
    }

    pub fn render_now(&mut self) {
        let width = self.terminal.columns() as usize;
        let height = self.terminal.rows() as usize;
        self.root.set_viewport_size(width, height);
        let lines = self.root.render(width);
        let cmds = self.renderer.render(&lines, width, height);
        self.output.extend(cmds);
        self.flush_output();
    }

    fn flush_output(&mut self) {
        self.output.flush(&mut self.terminal);
    }
}

struct EmptyRoot;

impl Component for EmptyRoot {
    fn render(&mut self, _width: usize) -> Vec<String> {
        Vec::new()
    }
}

impl<T: Terminal> Drop for TuiRuntime<T> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, CustomCommand, CustomCommandCtx, CustomCommandError, TuiRuntime};
    use crate::core::component::Component;
    use crate::core::input_event::InputEvent;
    use crate::core::terminal::Terminal;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[derive(Default)]
    struct TestTerminal {
        output: String,
        columns: u16,
        rows: u16,
    }

    impl Terminal for TestTerminal {
        fn start(
            &mut self,
            _on_input: Box<dyn FnMut(String) + Send>,
            _on_resize: Box<dyn FnMut() + Send>,
        ) -> std::io::Result<()> {
            Ok(())
        }
        fn stop(&mut self) -> std::io::Result<()> {
            Ok(())
        }
        fn drain_input(&mut self, _max_ms: u64, _idle_ms: u64) {}
        fn write(&mut self, data: &str) {
            self.output.push_str(data);
        }
        fn columns(&self) -> u16 {
            self.columns
        }
        fn rows(&self) -> u16 {
            self.rows
        }
    }

    #[derive(Default)]
    struct Trace {
        renders: usize,
        events: Vec<InputEvent>,
        viewport: Option<(usize, usize)>,
    }

    struct Recording(Arc<Mutex<Trace>>);

    impl Component for Recording {
        fn render(&mut self, _width: usize) -> Vec<String> {
            let mut trace = self.0.lock().unwrap();
            trace.renders += 1;
            vec![format!("frame {}", trace.renders)]
        }

        fn set_viewport_size(&mut self, cols: usize, rows: usize) {
            self.0.lock().unwrap().viewport = Some((cols, rows));
        }

        fn handle_event(&mut self, event: &InputEvent) {
            self.0.lock().unwrap().events.push(event.clone());
        }
    }

    fn runtime() -> (TuiRuntime<TestTerminal>, Arc<Mutex<Trace>>) {
        let trace = Arc::new(Mutex::new(Trace::default()));
        let terminal = TestTerminal {
            columns: 20,
            rows: 4,
            ..TestTerminal::default()
        };
        let mut runtime = TuiRuntime::new(terminal);
        runtime.set_root(Box::new(Recording(Arc::clone(&trace))));
        (runtime, trace)
    }

    #[test]
    fn start_enters_alt_screen_and_renders_first_frame() {
        let (mut runtime, trace) = runtime();
        runtime.start().expect("start");
        runtime.run_once();

        assert!(runtime.terminal().output.starts_with("\x1b[?1049h"));
        assert!(runtime.terminal().output.contains("frame 1"));
        assert_eq!(trace.lock().unwrap().viewport, Some((20, 4)));
    }

    #[test]
    fn input_is_parsed_and_triggers_one_render() {
        let (mut runtime, trace) = runtime();
        runtime.start().expect("start");
        runtime.run_once();

        runtime.handle_input("j\x1b[A");
        runtime.run_once();

        let trace = trace.lock().unwrap();
        assert_eq!(trace.renders, 2);
        assert_eq!(
            trace.events,
            vec![
                InputEvent::Text {
                    raw: "j".into(),
                    text: "j".into()
                },
                InputEvent::Key {
                    raw: "\x1b[A".into(),
                    key_id: "up".into()
                },
            ]
        );
    }

    struct Flag(Arc<Mutex<bool>>);

    impl CustomCommand for Flag {
        fn name(&self) -> &'static str {
            "flag"
        }

        fn apply(self: Box<Self>, ctx: &mut CustomCommandCtx) -> Result<(), CustomCommandError> {
            *self.0.lock().unwrap() = true;
            ctx.request_render();
            Ok(())
        }
    }

    #[test]
    fn custom_commands_from_other_threads_run_on_runtime_thread() {
        let (mut runtime, trace) = runtime();
        runtime.start().expect("start");
        runtime.run_once();

        let applied = Arc::new(Mutex::new(false));
        let handle = runtime.runtime_handle();
        let flag = Arc::clone(&applied);
        thread::spawn(move || handle.dispatch(Command::Custom(Box::new(Flag(flag)))))
            .join()
            .expect("dispatch thread");

        runtime.run_blocking_once();
        assert!(*applied.lock().unwrap());
        assert_eq!(trace.lock().unwrap().renders, 2);
    }

    #[test]
    fn stop_request_ends_blocking_loop_and_restores_screen() {
        let (mut runtime, _trace) = runtime();
        runtime.start().expect("start");
        runtime.runtime_handle().dispatch(Command::RequestStop);

        runtime.run_blocking_once();
        assert!(runtime.is_stopped());

        runtime.stop().expect("stop");
        assert!(runtime.terminal().output.ends_with("\x1b[?1049l"));
    }
}
