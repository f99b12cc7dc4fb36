//! # Countdown Tasks
//!
//! Each mounted countdown block gets its own tokio task that ticks a
//! [`CountdownTimer`] once per period and publishes the state on a
//! [`watch`] channel. Tasks share nothing.
//!
//! A [`TimerHandle`] owns its task: dropping or cancelling the handle aborts
//! it, so a timer can never outlive the block it belongs to. A
//! [`TimerBoard`] keeps one handle per countdown block of a composition and
//! is the usual way to manage them.
//!
//! Both must be used from within a tokio runtime.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::debug;

use crate::content::BlockContent;
use crate::countdown::{CountdownState, CountdownTimer};
use crate::model::{BlockId, Composition};

pub struct TimerHandle {
    duration: String,
    state: watch::Receiver<CountdownState>,
    task: Option<JoinHandle<()>>,
}

/// Start ticking a timer for `duration` every `period`.
pub fn spawn_countdown(duration: &str, period: Duration) -> TimerHandle {
    let mut timer = CountdownTimer::new(duration);
    let (tx, rx) = watch::channel(timer.state());

    let task = if timer.state().is_finished() {
        None
    } else {
        debug!(duration, "spawning countdown task");
        Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                let state = timer.tick();
                if tx.send(state).is_err() || state.is_finished() {
                    break;
                }
            }
        }))
    };

    TimerHandle {
        duration: duration.to_string(),
        state: rx,
        task,
    }
}

impl TimerHandle {
    pub fn state(&self) -> CountdownState {
        *self.state.borrow()
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// A receiver that sees every state change.
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state.clone()
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            debug!(duration = %self.duration, "cancelling countdown task");
            task.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// One running timer per countdown block.
pub struct TimerBoard {
    period: Duration,
    handles: HashMap<BlockId, TimerHandle>,
}

impl TimerBoard {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handles: HashMap::new(),
        }
    }

    /// Match the running timers to the composition's countdown blocks.
    ///
    /// New blocks get a timer, removed blocks lose theirs, and a block whose
    /// duration changed is restarted.
    pub fn sync(&mut self, composition: &Composition) {
        let mut live: HashMap<BlockId, &str> = HashMap::new();
        for block in composition.blocks() {
            if let BlockContent::Countdown(settings) = &block.content {
                live.insert(block.id.clone(), settings.duration.as_str());
            }
        }

        self.handles.retain(|id, handle| {
            let keep = live.get(id).is_some_and(|d| *d == handle.duration());
            if !keep {
                handle.cancel();
            }
            keep
        });

        for (id, duration) in live {
            if !self.handles.contains_key(&id) {
                let handle = spawn_countdown(duration, self.period);
                self.handles.insert(id, handle);
            }
        }
    }

    pub fn state(&self, id: &BlockId) -> Option<CountdownState> {
        self.handles.get(id).map(TimerHandle::state)
    }

    pub fn states(&self) -> HashMap<BlockId, CountdownState> {
        self.handles
            .iter()
            .map(|(id, h)| (id.clone(), h.state()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Cancel every timer.
    pub fn teardown(&mut self) {
        for handle in self.handles.values_mut() {
            handle.cancel();
        }
        self.handles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{block, column};
    use crate::model::{BlockVariant, ColumnId, ColumnPosition};
    use tokio::time::sleep;

    const SECOND: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn ticks_down_to_finished() {
        let handle = spawn_countdown("00:00:05", SECOND);
        assert_eq!(handle.state(), CountdownState::Running(5));

        sleep(Duration::from_millis(2500)).await;
        assert_eq!(handle.state(), CountdownState::Running(3));

        let mut rx = handle.subscribe();
        rx.wait_for(|s| s.is_finished()).await.unwrap();
        assert_eq!(handle.state(), CountdownState::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_never_spawns() {
        let handle = spawn_countdown("00:00:00", SECOND);
        assert_eq!(handle.state(), CountdownState::Finished);
        assert!(!handle.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_freezes_the_state() {
        let mut handle = spawn_countdown("00:00:10", SECOND);
        sleep(Duration::from_millis(2500)).await;
        handle.cancel();
        sleep(Duration::from_secs(5)).await;
        assert_eq!(handle.state(), CountdownState::Running(8));
        assert!(!handle.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn timers_run_independently() {
        let a = spawn_countdown("00:00:02", SECOND);
        let b = spawn_countdown("00:01:00", SECOND);
        sleep(Duration::from_millis(3500)).await;
        assert_eq!(a.state(), CountdownState::Finished);
        assert_eq!(b.state(), CountdownState::Running(57));
    }

    fn page_with_countdown() -> (Composition, BlockId) {
        let col = ColumnId::new("top");
        let id = BlockId::new("countdown-1");
        let comp = column::add(&Composition::new("Promo"), col.clone(), ColumnPosition::Top);
        let comp = block::add(&comp, &col, id.clone(), BlockVariant::Countdown);
        (comp, id)
    }

    #[tokio::test(start_paused = true)]
    async fn board_follows_the_composition() {
        let (comp, id) = page_with_countdown();
        let mut board = TimerBoard::new(SECOND);
        board.sync(&comp);
        assert_eq!(board.state(&id), Some(CountdownState::Running(900)));

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(board.state(&id), Some(CountdownState::Running(899)));

        let emptied = block::delete(&comp, &ColumnId::new("top"), &id);
        board.sync(&emptied);
        assert!(board.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn board_restarts_on_duration_change() {
        let (comp, id) = page_with_countdown();
        let mut board = TimerBoard::new(SECOND);
        board.sync(&comp);
        sleep(Duration::from_millis(1500)).await;

        let edited = block::update(
            &comp,
            &ColumnId::new("top"),
            &id,
            &block::BlockUpdate::content(r#"{"duration":"00:00:30"}"#),
        );
        board.sync(&edited);
        assert_eq!(board.state(&id), Some(CountdownState::Running(30)));

        board.teardown();
        assert!(board.is_empty());
    }
}
