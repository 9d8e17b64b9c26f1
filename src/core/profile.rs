//! Tick profiling
//!
//! `TickProfiler` is owned by whoever drives the simulation and handed to
//! `ChunkManager::update`/`step` by `&mut`. Nothing here is global: a disabled
//! profiler costs one branch per phase.

/// Wall-clock stopwatch (`Instant` natively, `Date.now()` under wasm).
#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    #[cfg(target_arch = "wasm32")]
    origin_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            PerfTimer { origin_ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            PerfTimer { origin: std::time::Instant::now() }
        }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() - self.origin_ms
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.origin.elapsed().as_secs_f64() * 1000.0
        }
    }
}

/// Tick phases, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickPhase {
    Scan,
    Apply,
    Rotate,
    Purge,
}

/// Counters the chunk manager maintains for every tick, profiled or not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickCounters {
    pub chunks_scanned: u32,
    pub cells_visited: u32,
    pub moves_queued: u32,
    pub moves_applied: u32,
    /// Moves that lost destination arbitration.
    pub moves_dropped: u32,
    /// Moves whose source was empty when applied.
    pub moves_skipped: u32,
    pub writes_applied: u32,
    pub chunks_created: u32,
    pub chunks_removed: u32,
    pub live_chunks: u32,
}

/// One tick's timings plus its counters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickStats {
    pub tick_ms: f64,
    pub scan_ms: f64,
    pub apply_ms: f64,
    pub rotate_ms: f64,
    pub purge_ms: f64,
    pub counters: TickCounters,
}

#[derive(Default)]
pub struct TickProfiler {
    enabled: bool,
    open: Option<PerfTimer>,
    current: TickStats,
    last: TickStats,
    ticks: u64,
}

impl TickProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled() -> Self {
        Self { enabled: true, ..Self::default() }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.open = None;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Open a tick. Pairs with `end_tick`.
    pub fn begin_tick(&mut self) {
        if !self.enabled {
            return;
        }
        debug_assert!(self.open.is_none(), "begin_tick called twice without end_tick");
        self.current = TickStats::default();
        self.open = Some(PerfTimer::start());
    }

    /// Run `f` and charge its wall time to `phase` when enabled.
    pub fn time<T>(&mut self, phase: TickPhase, f: impl FnOnce() -> T) -> T {
        if !self.enabled {
            return f();
        }
        let timer = PerfTimer::start();
        let out = f();
        let ms = timer.elapsed_ms();
        match phase {
            TickPhase::Scan => self.current.scan_ms += ms,
            TickPhase::Apply => self.current.apply_ms += ms,
            TickPhase::Rotate => self.current.rotate_ms += ms,
            TickPhase::Purge => self.current.purge_ms += ms,
        }
        out
    }

    /// Close the tick and publish it as `last()`.
    pub fn end_tick(&mut self, counters: TickCounters) {
        let Some(timer) = self.open.take() else {
            return;
        };
        self.current.tick_ms = timer.elapsed_ms();
        self.current.counters = counters;
        self.last = self.current;
        self.ticks += 1;
    }

    /// Stats of the most recently closed tick (zeros until one closes).
    pub fn last(&self) -> &TickStats {
        &self.last
    }

    pub fn ticks_recorded(&self) -> u64 {
        self.ticks
    }
}
