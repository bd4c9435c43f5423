//! `Runner`: one OS thread per agent, joined at the end.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tc_agent::{AgentBehavior, AgentReport, AgentResult};
use tc_core::{AgentId, TrackDriver};
use tc_segment::SharedSegment;

use crate::{SimError, SimResult};

/// Two wired agents ready to run.  Built by [`RunBuilder`][crate::RunBuilder].
pub struct Runner<D: TrackDriver + 'static> {
    agents:  Vec<AgentBehavior<D>>,
    segment: Arc<SharedSegment>,
    driver:  Arc<D>,
}

impl<D: TrackDriver + 'static> Runner<D> {
    pub(crate) fn new(
        agents:  Vec<AgentBehavior<D>>,
        segment: Arc<SharedSegment>,
        driver:  Arc<D>,
    ) -> Self {
        Self { agents, segment, driver }
    }

    pub fn agents(&self) -> Vec<AgentId> {
        self.agents.iter().map(AgentBehavior::agent).collect()
    }

    pub fn driver(&self) -> &Arc<D> {
        &self.driver
    }

    pub fn segment(&self) -> &Arc<SharedSegment> {
        &self.segment
    }

    /// Run every agent on its own named thread until all of them return.
    ///
    /// Reports come back in ascending `AgentId` order.  If any agent fails,
    /// the remaining threads are still joined and the first failure is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`SimError::AgentPanicked`] for a thread that panicked (a contract
    ///   violation on the shared segment).
    /// - [`SimError::Agent`] for an agent whose loop returned an error.
    pub fn run(self) -> SimResult<Vec<AgentReport>> {
        let t0 = Instant::now();
        log::info!("starting {} agents", self.agents.len());

        let mut handles: Vec<(AgentId, JoinHandle<AgentResult<AgentReport>>)> =
            Vec::with_capacity(self.agents.len());
        for behavior in self.agents {
            let agent = behavior.agent();
            let handle = thread::Builder::new()
                .name(format!("loco-{}", agent.raw()))
                .spawn(move || behavior.run())?;
            handles.push((agent, handle));
        }

        let mut reports = Vec::with_capacity(handles.len());
        let mut failure = None;
        for (agent, handle) in handles {
            match handle.join() {
                Ok(Ok(report)) => reports.push(report),
                Ok(Err(e)) => {
                    log::error!("{agent} failed: {e}");
                    failure.get_or_insert(SimError::Agent(e));
                }
                Err(_) => {
                    log::error!("{agent} thread panicked");
                    failure.get_or_insert(SimError::AgentPanicked(agent));
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => {
                log::info!("run complete in {:.3} s", t0.elapsed().as_secs_f64());
                Ok(reports)
            }
        }
    }
}
