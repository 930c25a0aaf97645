//! Last known actuator command, carried from step to step.

use crate::protocol::ActuatorCommand;

/// Holds the most recently decoded command. Starts at all zeros and only
/// changes when a frame decodes successfully.
#[derive(Debug, Clone, Default)]
pub struct ActuatorState {
    current: ActuatorCommand,
}

impl ActuatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all channels. Returns `true` if any channel changed.
    pub fn update(&mut self, cmd: ActuatorCommand) -> bool {
        let changed = self.current != cmd;
        self.current = cmd;
        changed
    }

    pub fn snapshot(&self) -> ActuatorCommand {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ACTUATOR_CHANNELS;

    #[test]
    fn starts_zeroed() {
        let state = ActuatorState::new();
        assert_eq!(state.snapshot(), ActuatorCommand::zero());
        assert_eq!(state.snapshot().values().len(), ACTUATOR_CHANNELS);
    }

    #[test]
    fn update_replaces_every_channel() {
        let mut state = ActuatorState::new();
        let mut raw = [0u16; ACTUATOR_CHANNELS];
        for (i, v) in raw.iter_mut().enumerate() {
            *v = 1000 + i as u16;
        }
        assert!(state.update(ActuatorCommand::from(raw)));
        assert_eq!(state.snapshot(), ActuatorCommand::from(raw));

        assert!(!state.update(ActuatorCommand::from(raw)));
    }
}
