//! Follow command controller
//!
//! The single caller of a spindle's follow strategy. Commands arrive on a
//! dedicated channel, results go back on another, and handshake timeouts
//! are escalated to the fault sink here, once per failed request.
//!
//! ```ignore
//! static COMMANDS: Channel<CriticalSectionRawMutex, FollowCommand, 4> = Channel::new();
//! static RESULTS: Channel<CriticalSectionRawMutex, SequenceResult, 4> = Channel::new();
//! static FAULTS: Signal<CriticalSectionRawMutex, FaultKind> = Signal::new();
//!
//! let mut controller = FollowController::new(spindle, &FAULTS);
//! controller.run(&COMMANDS.receiver(), &RESULTS.sender()).await;
//! ```

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Receiver, Sender};
use laserfollow_core::safety::FaultSink;
use laserfollow_core::state::{FollowCommand, SequenceResult};
use laserfollow_hal::DutyOutput;

use super::{FollowStrategy, Spindle};

/// Owns a spindle and escalates its follow failures
pub struct FollowController<O, F, S> {
    spindle: Spindle<O, F>,
    faults: S,
}

impl<O, F, S> FollowController<O, F, S>
where
    O: DutyOutput,
    F: FollowStrategy,
    S: FaultSink,
{
    pub fn new(spindle: Spindle<O, F>, faults: S) -> Self {
        Self { spindle, faults }
    }

    pub fn spindle(&self) -> &Spindle<O, F> {
        &self.spindle
    }

    /// Mutable access for speed changes between follow commands
    pub fn spindle_mut(&mut self) -> &mut Spindle<O, F> {
        &mut self.spindle
    }

    pub fn faults(&self) -> &S {
        &self.faults
    }

    /// Execute one command, raising a fault if it timed out
    pub async fn handle(&mut self, cmd: FollowCommand) -> SequenceResult {
        let result = self.spindle.execute(cmd).await;

        if let Err(error) = result {
            if let Some(kind) = error.fault_kind() {
                warn!("follow {} failed: {}, raising {}", cmd, error, kind);
                self.faults.raise_fault(kind);
            } else {
                debug!("follow {} not completed: {}", cmd, error);
            }
        }

        result
    }

    /// Handle a legacy dwell code, escalating faults like [`handle`](Self::handle)
    ///
    /// Codes 333 and 444 run a start or a stop and write success to
    /// `result`. Any other code, or any code on a spindle without a follow
    /// head, returns `false` with `result` untouched.
    pub async fn dispatch(&mut self, code: u32, result: &mut bool) -> bool {
        if !self.spindle.has_follow() {
            return false;
        }
        let Some(cmd) = FollowCommand::from_legacy_code(code) else {
            return false;
        };

        *result = self.handle(cmd).await.is_ok();
        true
    }

    /// Receive, execute and answer a single command
    pub async fn serve_one<M: RawMutex, const N: usize, const R: usize>(
        &mut self,
        commands: &Receiver<'_, M, FollowCommand, N>,
        results: &Sender<'_, M, SequenceResult, R>,
    ) -> SequenceResult {
        let cmd = commands.receive().await;
        let result = self.handle(cmd).await;
        results.send(result).await;
        result
    }

    /// Serve commands forever
    pub async fn run<M: RawMutex, const N: usize, const R: usize>(
        &mut self,
        commands: &Receiver<'_, M, FollowCommand, N>,
        results: &Sender<'_, M, SequenceResult, R>,
    ) {
        info!("follow controller started");
        loop {
            // Results are published on the channel
            let _ = self.serve_one(commands, results).await;
        }
    }
}
