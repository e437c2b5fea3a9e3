use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ghtui::{
    Command, CustomCommand, CustomCommandCtx, CustomCommandError, RuntimeHandle,
    SPINNER_INTERVAL_MS,
};

use crate::app::App;
use crate::host::MessageSink;
use crate::msg::Msg;

/// Funnels messages from any thread into the app, on the runtime thread.
///
/// Producers call [`AppController::enqueue`]. The first message into an empty queue
/// dispatches a drain command; the runtime applies everything queued by then, in order, and
/// renders once.
pub struct AppController {
    app: Arc<Mutex<App>>,
    runtime_handle: RuntimeHandle,
    pending: Mutex<VecDeque<Msg>>,
    stopped: AtomicBool,
}

impl AppController {
    pub fn new(app: Arc<Mutex<App>>, runtime_handle: RuntimeHandle) -> Arc<Self> {
        Arc::new(Self::from_parts(app, runtime_handle))
    }

    /// Builds the controller and the app together, for apps whose host reports back through
    /// the controller itself.
    pub fn new_cyclic(
        runtime_handle: RuntimeHandle,
        build_app: impl FnOnce(MessageSink) -> App,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            let app = build_app(Self::sink(weak.clone()));
            Self::from_parts(Arc::new(Mutex::new(app)), runtime_handle)
        })
    }

    fn from_parts(app: Arc<Mutex<App>>, runtime_handle: RuntimeHandle) -> Self {
        Self {
            app,
            runtime_handle,
            pending: Mutex::new(VecDeque::new()),
            stopped: AtomicBool::new(false),
        }
    }

    /// A sink that forwards into the controller while it is alive and drops messages after.
    pub fn sink(controller: Weak<Self>) -> MessageSink {
        Arc::new(move |msg| {
            if let Some(controller) = controller.upgrade() {
                controller.enqueue(msg);
            }
        })
    }

    pub fn app(&self) -> &Arc<Mutex<App>> {
        &self.app
    }

    pub fn enqueue(self: &Arc<Self>, msg: Msg) {
        let should_drain = {
            let mut queue = lock_unpoisoned(&self.pending);
            let should_drain = queue.is_empty();
            queue.push_back(msg);
            should_drain
        };

        if should_drain {
            self.runtime_handle
                .dispatch(Command::Custom(Box::new(DrainMessagesCommand {
                    controller: Arc::clone(self),
                })));
        }
    }

    fn apply(&self, msg: Msg) {
        lock_unpoisoned(&self.app).update(msg);
    }

    fn drain_pending_messages(&self) -> usize {
        let mut drained = 0usize;

        loop {
            let msg = {
                let mut pending = lock_unpoisoned(&self.pending);
                pending.pop_front()
            };

            match msg {
                Some(msg) => {
                    self.apply(msg);
                    drained += 1;
                }
                None => break,
            }
        }

        drained
    }

    /// Drains queued messages and schedules a render.
    ///
    /// For harnesses that never run the runtime loop.
    pub fn flush_pending_messages(&self) -> usize {
        let drained = self.drain_pending_messages();
        if drained > 0 {
            self.runtime_handle.dispatch(Command::RequestRender);
        }
        drained
    }

    pub fn should_exit(&self) -> bool {
        lock_unpoisoned(&self.app).should_exit
    }

    pub fn request_stop(&self) {
        self.runtime_handle.dispatch(Command::RequestStop);
    }

    /// Stops the ticker thread.
    pub fn shutdown(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Enqueues a [`Msg::Tick`] every spinner interval while the app is loading.
    pub fn spawn_ticker(self: &Arc<Self>) -> std::io::Result<JoinHandle<()>> {
        let controller = Arc::clone(self);
        thread::Builder::new()
            .name("ghtui-ticker".to_string())
            .spawn(move || {
                let interval = Duration::from_millis(SPINNER_INTERVAL_MS);
                while !controller.stopped.load(Ordering::SeqCst) {
                    thread::sleep(interval);
                    let loading = lock_unpoisoned(&controller.app).is_loading();
                    if loading {
                        controller.enqueue(Msg::Tick);
                    }
                }
            })
    }
}

struct DrainMessagesCommand {
    controller: Arc<AppController>,
}

impl CustomCommand for DrainMessagesCommand {
    fn name(&self) -> &'static str {
        "drain_messages"
    }

    fn apply(self: Box<Self>, ctx: &mut CustomCommandCtx) -> Result<(), CustomCommandError> {
        let drained = self.controller.drain_pending_messages();
        if drained > 0 {
            ctx.request_render();
        }
        if self.controller.should_exit() {
            ctx.request_stop();
        }
        Ok(())
    }
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
