use anyhow::Result;
use glade_core::{Event, FrameIntent};

use crate::{FrameScheduler, SceneView, Session, TickOutcome};

/// Supplies one intent per tick.
pub trait IntentSource {
    /// Intent for the tick about to run, or `None` once input is exhausted.
    fn next_intent(&mut self, tick: u64) -> Option<FrameIntent>;
}

impl<I> IntentSource for I
where
    I: Iterator<Item = FrameIntent>,
{
    fn next_intent(&mut self, _tick: u64) -> Option<FrameIntent> {
        self.next()
    }
}

/// Consumes the scene after every tick.
pub trait Presenter {
    /// Presents the scene produced by a tick together with its events.
    ///
    /// # Errors
    ///
    /// Returns an error when the presenter cannot write its output; the loop
    /// stops and forwards it.
    fn present(&mut self, scene: &SceneView, events: &[Event]) -> Result<()>;
}

/// How a [`run`] loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// Whether a quit intent ended the loop.
    pub quit: bool,
}

/// Drives `session` until a quit intent, exhausted input or `max_ticks`.
///
/// # Errors
///
/// Returns the first presenter error.
pub fn run<S, P>(
    session: &mut Session,
    intents: &mut S,
    presenter: &mut P,
    scheduler: &mut FrameScheduler,
    max_ticks: Option<u64>,
) -> Result<RunSummary>
where
    S: IntentSource + ?Sized,
    P: Presenter + ?Sized,
{
    let mut ticks = 0_u64;
    loop {
        if max_ticks.is_some_and(|limit| ticks >= limit) {
            return Ok(RunSummary { ticks, quit: false });
        }

        let Some(intent) = intents.next_intent(ticks) else {
            return Ok(RunSummary { ticks, quit: false });
        };

        let outcome = session.tick(&intent);
        ticks += 1;
        presenter.present(&session.view(), session.events())?;

        if outcome == TickOutcome::Quit {
            log::info!("quit requested after {ticks} ticks");
            return Ok(RunSummary { ticks, quit: true });
        }

        scheduler.wait_for_next_frame();
    }
}
