//! Fluent builder for constructing a [`Runner`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tc_agent::AgentBehavior;
use tc_core::{AgentId, CheckpointId, RunConfig, TrackDriver};
use tc_route::{RouteModel, load_layout_csv};
use tc_segment::SharedSegment;

use crate::{Runner, SimError, SimResult, SimulatedTrack};

/// Agents sharing one segment.
const PARTIES: usize = 2;

/// Fluent builder for [`Runner<D>`].
///
/// # Required inputs
///
/// - [`RunConfig`]: laps, timing, seed
/// - exactly two routes, via [`route`][Self::route], [`routes`][Self::routes]
///   or [`layout_csv`][Self::layout_csv]
///
/// Both routes must list the shared run in the same order, so that an
/// un-inverted route approaches from [`EntrySide::A`][tc_core::EntrySide::A]
/// on both.
///
/// # Example
///
/// ```rust,ignore
/// let runner = RunBuilder::new(config)
///     .layout_csv(Path::new("layout.csv"))?
///     .build()?;
/// let track = Arc::clone(runner.driver());
/// let reports = runner.run()?;
/// assert!(track.max_on_shared() <= 1);
/// ```
pub struct RunBuilder {
    config: RunConfig,
    routes: BTreeMap<AgentId, RouteModel>,
}

impl RunBuilder {
    pub fn new(config: RunConfig) -> Self {
        Self { config, routes: BTreeMap::new() }
    }

    /// Add (or replace) the route of `agent`.
    pub fn route(mut self, agent: AgentId, route: RouteModel) -> Self {
        self.routes.insert(agent, route);
        self
    }

    pub fn routes(mut self, routes: BTreeMap<AgentId, RouteModel>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Load routes from a layout CSV (see [`tc_route::loader`]).
    pub fn layout_csv(self, path: &Path) -> SimResult<Self> {
        let routes = load_layout_csv(path)?;
        Ok(self.routes(routes))
    }

    /// Build against a fresh [`SimulatedTrack`] laid out from the routes.
    pub fn build(self) -> SimResult<Runner<SimulatedTrack>> {
        let track = SimulatedTrack::new(self.routes.iter().map(|(&a, r)| (a, r)), &self.config);
        self.build_with_driver(Arc::new(track))
    }

    /// Build against any driver, e.g. real hardware.
    pub fn build_with_driver<D: TrackDriver + 'static>(self, driver: Arc<D>) -> SimResult<Runner<D>> {
        self.config.validate()?;

        // ── Validate the layout ───────────────────────────────────────────
        if self.routes.len() != PARTIES {
            return Err(SimError::AgentCountMismatch { expected: PARTIES, got: self.routes.len() });
        }
        let agents: Vec<AgentId> = self.routes.keys().copied().collect();
        let (first, second) = (agents[0], agents[1]);

        // Entry sides are only comparable when both routes cross the shared
        // run in the same declared order.
        let (ours, theirs) = (self.routes[&first].shared(), self.routes[&second].shared());
        if ours != theirs {
            return Err(SimError::Config(format!(
                "{first} and {second} disagree on the shared segment: {} vs {}",
                checkpoint_list(ours),
                checkpoint_list(theirs),
            )));
        }

        // ── Wire agents to one segment and one driver ─────────────────────
        let segment = Arc::new(SharedSegment::new(first, second)?);
        let agents = self
            .routes
            .into_iter()
            .map(|(agent, route)| {
                AgentBehavior::new(
                    agent,
                    route,
                    Arc::clone(&segment),
                    Arc::clone(&driver),
                    self.config.clone(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Runner::new(agents, segment, driver))
    }
}

fn checkpoint_list(run: &[CheckpointId]) -> String {
    let ids: Vec<String> = run.iter().map(|c| c.raw().to_string()).collect();
    format!("[{}]", ids.join(", "))
}
