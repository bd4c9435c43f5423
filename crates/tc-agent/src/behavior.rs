//! `AgentBehavior`: one locomotive's thread of control.

use std::sync::Arc;

use tc_core::{AgentId, CheckpointId, RunConfig, TrackDriver};
use tc_route::RouteModel;
use tc_segment::{Admission, SharedSegment};

use crate::{AgentError, AgentReport, AgentResult};

/// Outcome of handling one checkpoint.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Step {
    Continue,
    /// `total_laps` reached; the locomotive has been stopped.
    Finished,
}

/// Drives one agent around its loop.
///
/// For every checkpoint delivered by the driver, in order:
///
/// 1. **Lap end**: count the lap; stop if the run is over; every
///    `laps_before_inversion` laps stop, reverse, invert the route, restart.
/// 2. **Announce**: `SharedSegment::announce` with the current entry side.
/// 3. **Entry**: `SharedSegment::acquire` (may block), then throw the
///    route's switches.
/// 4. **Exit**: `SharedSegment::release`.
///
/// The lap end is handled first because after an inversion the announce
/// checkpoint of the new direction may be the lap end itself.
pub struct AgentBehavior<D: TrackDriver + ?Sized> {
    agent:   AgentId,
    route:   RouteModel,
    segment: Arc<SharedSegment>,
    driver:  Arc<D>,
    config:  RunConfig,

    laps_until_inversion: u32,
    report:               AgentReport,
}

impl<D: TrackDriver + ?Sized> AgentBehavior<D> {
    /// # Errors
    ///
    /// [`AgentError::NotAParty`] if `agent` does not share `segment`, or a
    /// configuration error from [`RunConfig::validate`].
    pub fn new(
        agent:   AgentId,
        route:   RouteModel,
        segment: Arc<SharedSegment>,
        driver:  Arc<D>,
        config:  RunConfig,
    ) -> AgentResult<Self> {
        config.validate()?;
        if !segment.parties().contains(&agent) {
            return Err(AgentError::NotAParty(agent));
        }
        Ok(Self {
            agent,
            route,
            segment,
            driver,
            laps_until_inversion: config.laps_before_inversion,
            config,
            report: AgentReport::new(agent),
        })
    }

    #[inline]
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn route(&self) -> &RouteModel {
        &self.route
    }

    pub fn report(&self) -> &AgentReport {
        &self.report
    }

    /// Start the locomotive and follow checkpoints until the run is over.
    ///
    /// # Errors
    ///
    /// Propagates the driver's error (usually its shutdown).  An agent that
    /// occupies the segment at that point releases it first so the other
    /// agent is not left parked forever.
    pub fn run(mut self) -> AgentResult<AgentReport> {
        log::info!("[START] {} thread started, heading {}", self.agent, self.route.direction());
        self.driver.resume(self.agent);

        loop {
            let checkpoint = match self.driver.next_checkpoint(self.agent) {
                Ok(checkpoint) => checkpoint,
                Err(e) => {
                    self.abandon();
                    log::warn!("[STOP] {} lost its track: {e}", self.agent);
                    return Err(e.into());
                }
            };
            log::trace!("{} reached {checkpoint}", self.agent);
            if self.step(checkpoint) == Step::Finished {
                break;
            }
        }

        log::info!("[STOP] {} finished: {}", self.agent, self.report);
        Ok(self.report)
    }

    /// Apply the protocol for a single reached checkpoint.
    pub fn step(&mut self, checkpoint: CheckpointId) -> Step {
        if checkpoint == self.route.lap_end() {
            self.report.laps += 1;
            if self.config.total_laps.is_some_and(|total| self.report.laps >= total) {
                self.driver.stop(self.agent);
                return Step::Finished;
            }
            self.laps_until_inversion -= 1;
            if self.laps_until_inversion == 0 {
                self.invert();
                self.laps_until_inversion = self.config.laps_before_inversion;
            }
        }

        let boundaries = self.route.boundaries();

        if checkpoint == boundaries.announce {
            self.segment.announce(self.agent, self.route.entry_side());
            self.report.announces += 1;
        }

        if checkpoint == boundaries.entry {
            let admission = self.segment.acquire(self.agent, &*self.driver);
            self.report.grants += 1;
            if admission == Admission::AfterWait {
                self.report.waits += 1;
            }
            for setting in self.route.switches() {
                log::debug!("{} sets {} {}", self.agent, setting.switch, setting.position);
                self.driver.set_switch(setting.switch, setting.position);
            }
        }

        if checkpoint == boundaries.exit {
            self.segment.release(self.agent);
        }

        Step::Continue
    }

    fn abandon(&self) {
        if self.segment.status().occupant == Some(self.agent) {
            self.segment.release(self.agent);
        }
    }

    /// Stop, reverse, flip the route, restart.
    fn invert(&mut self) {
        let direction = self.route.direction().opposite();
        self.driver.stop(self.agent);
        self.driver.set_direction(self.agent, direction);
        self.route.invert();
        self.driver.resume(self.agent);
        self.report.inversions += 1;
        log::info!("[INVERSE] {} now heading {direction}", self.agent);
    }
}
