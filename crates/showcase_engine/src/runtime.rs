use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use showcase_core::{update, Effect, Msg, PageState, SimulatorId};
use showcase_logging::{showcase_debug, showcase_trace, showcase_warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::clipboard::Clipboard;

/// Executes core effects on the current tokio runtime.
///
/// Timer expirations come back as [`Msg`]s on the channel handed to [`EffectRunner::new`].
/// Must be used from within a tokio runtime.
pub struct EffectRunner {
    clipboard: Arc<dyn Clipboard>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    rng: Arc<Mutex<StdRng>>,
    dwell: Option<JoinHandle<()>>,
    tickers: HashMap<SimulatorId, JoinHandle<()>>,
}

impl EffectRunner {
    pub fn new(clipboard: Arc<dyn Clipboard>, msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self::with_rng(clipboard, msg_tx, StdRng::from_entropy())
    }

    /// Deterministic randomized increments.
    pub fn with_seed(
        clipboard: Arc<dyn Clipboard>,
        msg_tx: mpsc::UnboundedSender<Msg>,
        seed: u64,
    ) -> Self {
        Self::with_rng(clipboard, msg_tx, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        clipboard: Arc<dyn Clipboard>,
        msg_tx: mpsc::UnboundedSender<Msg>,
        rng: StdRng,
    ) -> Self {
        Self {
            clipboard,
            msg_tx,
            rng: Arc::new(Mutex::new(rng)),
            dwell: None,
            tickers: HashMap::new(),
        }
    }

    pub fn active_tickers(&self) -> usize {
        self.tickers.values().filter(|h| !h.is_finished()).count()
    }

    pub fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::WriteClipboard { text } => self.write_clipboard(text),
                Effect::ScheduleDwellExpiry {
                    key,
                    generation,
                    after,
                } => self.schedule_dwell(key, generation, after),
                Effect::CancelDwellExpiry => {
                    if let Some(handle) = self.dwell.take() {
                        handle.abort();
                    }
                }
                Effect::StartTicker {
                    id,
                    generation,
                    interval,
                } => self.start_ticker(id, generation, interval),
                Effect::StopTicker { id } => {
                    if let Some(handle) = self.tickers.remove(&id) {
                        showcase_debug!("StopTicker id={}", id);
                        handle.abort();
                    }
                }
            }
        }
    }

    // Fire-and-forget: the copied indicator is already showing and is never reverted.
    fn write_clipboard(&self, text: String) {
        let clipboard = self.clipboard.clone();
        tokio::spawn(async move {
            if let Err(err) = clipboard.write_text(&text).await {
                showcase_warn!("Clipboard write failed: {}", err);
            }
        });
    }

    fn schedule_dwell(&mut self, key: String, generation: u64, after: Duration) {
        if let Some(previous) = self.dwell.take() {
            previous.abort();
        }
        let tx = self.msg_tx.clone();
        self.dwell = Some(tokio::spawn(async move {
            time::sleep(after).await;
            let _ = tx.send(Msg::CopyDwellElapsed { key, generation });
        }));
    }

    fn start_ticker(&mut self, id: SimulatorId, generation: u64, period: Duration) {
        if let Some(previous) = self.tickers.remove(&id) {
            previous.abort();
        }
        showcase_debug!(
            "StartTicker id={} generation={} period_ms={}",
            id,
            generation,
            period.as_millis()
        );
        let tx = self.msg_tx.clone();
        let rng = self.rng.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let roll = next_roll(&rng);
                showcase_trace!("tick id={} roll={:.3}", id, roll);
                if tx
                    .send(Msg::SimulatorTicked {
                        id,
                        generation,
                        roll,
                    })
                    .is_err()
                {
                    break;
                }
            }
        });
        self.tickers.insert(id, handle);
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        if let Some(handle) = self.dwell.take() {
            handle.abort();
        }
        for (_, handle) in self.tickers.drain() {
            handle.abort();
        }
    }
}

/// Uniform in `(0, 1]`.
fn next_roll(rng: &Mutex<StdRng>) -> f64 {
    match rng.lock() {
        Ok(mut rng) => 1.0 - rng.gen::<f64>(),
        Err(_) => 1.0,
    }
}

/// A page's state wired to an [`EffectRunner`].
pub struct PageDriver {
    state: PageState,
    runner: EffectRunner,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
}

impl PageDriver {
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self::from_parts(EffectRunner::new(clipboard, msg_tx), msg_rx)
    }

    pub fn with_seed(clipboard: Arc<dyn Clipboard>, seed: u64) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self::from_parts(EffectRunner::with_seed(clipboard, msg_tx, seed), msg_rx)
    }

    fn from_parts(runner: EffectRunner, msg_rx: mpsc::UnboundedReceiver<Msg>) -> Self {
        Self {
            state: PageState::new(),
            runner,
            msg_rx,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PageState {
        &mut self.state
    }

    pub fn runner(&self) -> &EffectRunner {
        &self.runner
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = update(state, msg);
        self.state = next;
        self.runner.execute(effects);
    }

    /// Waits for the next timer message and applies it.
    ///
    /// Waits forever when nothing is scheduled; pair with a timeout if that can happen.
    pub async fn pump(&mut self) {
        // The runner owns a sender, so the channel never closes while `self` lives.
        if let Some(msg) = self.msg_rx.recv().await {
            self.dispatch(msg);
        }
    }

    /// Pumps until `done` holds for the state.
    pub async fn pump_until(&mut self, mut done: impl FnMut(&PageState) -> bool) {
        while !done(&self.state) {
            self.pump().await;
        }
    }

    /// Applies every message already queued without waiting. Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }
}
