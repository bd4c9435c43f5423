//! Unit tests for tc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, CheckpointId, SwitchId};

    #[test]
    fn raw_roundtrip() {
        assert_eq!(CheckpointId(31).raw(), 31);
        assert_eq!(AgentId::from(2u32), AgentId(2));
    }

    #[test]
    fn ordering() {
        assert!(CheckpointId(1) < CheckpointId(2));
        assert!(SwitchId(9) > SwitchId(3));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(CheckpointId(12).to_string(), "CheckpointId(12)");
    }
}

#[cfg(test)]
mod side {
    use crate::{Direction, EntrySide, SwitchPosition};

    #[test]
    fn entry_side_follows_inversion() {
        assert_eq!(EntrySide::for_inverted(false), EntrySide::A);
        assert_eq!(EntrySide::for_inverted(true), EntrySide::B);
    }

    #[test]
    fn direction_opposite_is_involution() {
        assert_eq!(Direction::Forward.opposite(), Direction::Reverse);
        assert_eq!(Direction::Forward.opposite().opposite(), Direction::Forward);
    }

    #[test]
    fn labels() {
        assert_eq!(EntrySide::B.to_string(), "B");
        assert_eq!(Direction::Reverse.to_string(), "reverse");
        assert_eq!(SwitchPosition::Diverted.to_string(), "diverted");
    }
}

#[cfg(test)]
mod config {
    use crate::RunConfig;

    #[test]
    fn default_inverts_every_two_laps() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.laps_before_inversion, 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_laps_before_inversion_rejected() {
        let cfg = RunConfig { laps_before_inversion: 0, ..RunConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_total_laps_rejected() {
        let cfg = RunConfig { total_laps: Some(0), ..RunConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod driver {
    use std::sync::Mutex;

    use crate::{
        AgentId, CheckpointId, Direction, SwitchId, SwitchPosition, TcError, TcResult,
        TrackDriver,
    };

    /// Replays a fixed checkpoint sequence, then reports shutdown.
    struct Script(Mutex<Vec<u32>>);

    impl TrackDriver for Script {
        fn next_checkpoint(&self, agent: AgentId) -> TcResult<CheckpointId> {
            let mut remaining = self.0.lock().unwrap();
            if remaining.is_empty() {
                return Err(TcError::DriverShutdown(agent));
            }
            Ok(CheckpointId(remaining.remove(0)))
        }
        fn stop(&self, _agent: AgentId) {}
        fn resume(&self, _agent: AgentId) {}
        fn set_direction(&self, _agent: AgentId, _direction: Direction) {}
        fn set_switch(&self, _switch: SwitchId, _position: SwitchPosition) {}
    }

    #[test]
    fn wait_for_checkpoint_skips_others() {
        let script = Script(Mutex::new(vec![1, 2, 3, 4]));
        script.wait_for_checkpoint(AgentId(0), CheckpointId(3)).unwrap();
        assert_eq!(script.next_checkpoint(AgentId(0)).unwrap(), CheckpointId(4));
    }

    #[test]
    fn wait_for_missing_checkpoint_surfaces_shutdown() {
        let script = Script(Mutex::new(vec![1, 2]));
        let err = script.wait_for_checkpoint(AgentId(1), CheckpointId(9)).unwrap_err();
        assert!(matches!(err, TcError::DriverShutdown(AgentId(1))));
    }
}
