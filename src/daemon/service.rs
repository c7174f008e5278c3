//! The update cycle and the thread that drives it.
//!
//! One [`DisplayService`] owns every piece of carried state: the journal
//! cursor, the folded [`JournalState`], the cargo snapshot and the status
//! digest. [`DisplayService::spawn`] moves it onto a runner thread that ticks
//! at the refresh interval; a cycle always finishes before the next begins.

#![allow(missing_docs)]

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, bounded, select, tick};
use tracing::{debug, info, warn};

use crate::cargo::{CARGO_FILE, CargoSnapshot, NameLookupTable, read_cargo, update_snapshot};
use crate::core::config::Config;
use crate::core::errors::{EdxError, Result};
use crate::display::{DiffGate, Display, DisplayDevice, Published};
use crate::journal::{JournalState, JournalTailer, STATUS_FILE, StatusTailer, decode};
use crate::render::{PageKind, RenderContext, render_display};
use crate::sysinfo::SystemInfoService;

/// Startup settings for one service instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOptions {
    pub journal_folder: PathBuf,
    pub pages: Vec<PageKind>,
    pub splash_duration: Duration,
}

impl ServiceOptions {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            journal_folder: config.journal.folder_path(),
            pages: config.display.pages.clone(),
            splash_duration: config.display.splash_duration(),
        }
    }
}

/// What one cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// New journal lines read.
    pub lines: usize,
    /// Lines that decoded to a known event.
    pub events: usize,
    pub published: Published,
}

/// Collaborators shared with the outside world.
#[derive(Clone)]
pub struct ServiceDeps {
    pub names: Arc<NameLookupTable>,
    pub sysinfo: Arc<dyn SystemInfoService>,
    pub device: Arc<dyn DisplayDevice>,
}

pub struct DisplayService {
    options: ServiceOptions,
    deps: ServiceDeps,
    tailer: JournalTailer,
    status: StatusTailer,
    state: JournalState,
    cargo: Option<CargoSnapshot>,
    gate: Arc<DiffGate>,
    splash_until: Instant,
    cycles: u64,
}

impl DisplayService {
    pub fn new(options: ServiceOptions, deps: ServiceDeps) -> Result<Self> {
        let splash_until = Instant::now() + options.splash_duration;
        Ok(Self {
            options,
            deps,
            tailer: JournalTailer::new()?,
            status: StatusTailer::new(),
            state: JournalState::default(),
            cargo: None,
            gate: Arc::new(DiffGate::new()),
            splash_until,
            cycles: 0,
        })
    }

    #[must_use]
    pub const fn state(&self) -> &JournalState {
        &self.state
    }

    #[must_use]
    pub const fn cargo(&self) -> Option<&CargoSnapshot> {
        self.cargo.as_ref()
    }

    /// The buffer pair, shared with foreground readers.
    #[must_use]
    pub fn gate(&self) -> Arc<DiffGate> {
        Arc::clone(&self.gate)
    }

    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Tail, fold, consult status and cargo, render, and publish.
    ///
    /// Input problems never fail a cycle; only a device write can.
    pub fn run_cycle(&mut self) -> Result<CycleReport> {
        self.cycles += 1;
        let folder = &self.options.journal_folder;

        let lines = self.tailer.poll(folder);
        let mut events = 0;
        for line in &lines {
            if let Some(event) = decode(line) {
                self.state.apply(&event);
                events += 1;
            }
        }

        if let Some(destination) = self.status.poll(&folder.join(STATUS_FILE)) {
            debug!(name = %destination.name, body_id = destination.body_id, "destination changed");
            self.state.destination = destination;
        }
        update_snapshot(&mut self.cargo, read_cargo(&folder.join(CARGO_FILE)));
        self.state.show_splash = Instant::now() < self.splash_until;

        let display = self.render();
        let published = self.gate.publish(display, self.deps.device.as_ref())?;
        debug!(cycle = self.cycles, lines = lines.len(), events, ?published, "cycle complete");
        Ok(CycleReport {
            lines: lines.len(),
            events,
            published,
        })
    }

    /// Render every enabled page from the current state without publishing.
    #[must_use]
    pub fn render(&self) -> Display {
        let ctx = RenderContext {
            state: &self.state,
            cargo: self.cargo.as_ref(),
            names: &self.deps.names,
            sysinfo: self.deps.sysinfo.as_ref(),
        };
        render_display(&self.options.pages, &ctx)
    }

    /// Drop cached lookups and force the next publish to reach the device.
    pub fn refresh(&self) {
        self.deps.sysinfo.clear_cache();
        self.gate.invalidate();
        info!("lookup cache cleared, display will be rewritten");
    }

    fn cycle_logged(&mut self) {
        if let Err(err) = self.run_cycle() {
            warn!(error = %err, retryable = err.is_retryable(), "update cycle failed");
        }
    }

    /// Move the service onto a runner thread ticking every `interval`.
    ///
    /// The first cycle runs immediately.
    pub fn spawn(mut self, interval: Duration) -> Result<ServiceHandle> {
        let (control_tx, control_rx) = bounded::<Control>(4);
        let gate = self.gate();
        let join = thread::Builder::new()
            .name("edx52-cycle".to_string())
            .spawn(move || {
                self.cycle_logged();
                runner_main(&mut self, &control_rx, &tick(interval));
                self
            })
            .map_err(|source| EdxError::Runtime {
                details: format!("failed to spawn cycle thread: {source}"),
            })?;
        info!(interval_ms = interval.as_millis(), "display service started");
        Ok(ServiceHandle {
            control: control_tx,
            join: Some(join),
            gate,
        })
    }
}

enum Control {
    Refresh,
    Shutdown,
}

fn runner_main(service: &mut DisplayService, control: &Receiver<Control>, ticker: &Receiver<Instant>) {
    loop {
        select! {
            recv(control) -> msg => match msg {
                Ok(Control::Refresh) => {
                    service.refresh();
                    service.cycle_logged();
                }
                Ok(Control::Shutdown) | Err(_) => break,
            },
            recv(ticker) -> _ => service.cycle_logged(),
        }
    }
    debug!(cycles = service.cycles(), "cycle thread exiting");
}

/// Owner-side handle to a running service.
pub struct ServiceHandle {
    control: Sender<Control>,
    join: Option<thread::JoinHandle<DisplayService>>,
    gate: Arc<DiffGate>,
}

impl ServiceHandle {
    /// The running service's buffer pair.
    #[must_use]
    pub fn gate(&self) -> &DiffGate {
        &self.gate
    }

    /// Ask the runner to clear caches and rewrite the display.
    pub fn refresh(&self) {
        if self.control.try_send(Control::Refresh).is_err() {
            debug!("refresh already pending");
        }
    }

    /// Stop after the in-flight cycle and hand the service back.
    pub fn stop(mut self) -> Result<DisplayService> {
        let _ = self.control.send(Control::Shutdown);
        let join = self.join.take().ok_or_else(|| EdxError::Runtime {
            details: "cycle thread already joined".to_string(),
        })?;
        let service = join.join().map_err(|_| EdxError::Runtime {
            details: "cycle thread panicked".to_string(),
        })?;
        info!(cycles = service.cycles(), "display service stopped");
        Ok(service)
    }
}

impl Drop for ServiceHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            let _ = self.control.send(Control::Shutdown);
            let _ = join.join();
        }
    }
}
