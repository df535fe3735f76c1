use crate::{Effect, Msg, PageState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PageState, msg: Msg) -> (PageState, Vec<Effect>) {
    let effects = match msg {
        Msg::CopyClicked { key, text } => {
            state.mark_dirty();
            state.copy.copy(text, key)
        }
        Msg::CopyDwellElapsed { key, generation } => {
            if state.copy.expire(&key, generation) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SimulatorMounted { id, config } => {
            // Invalid configs never become simulator state.
            if !state.simulators.contains_key(&id)
                && state.simulator_entry(id, &config).is_some()
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StartClicked { id, config } => {
            if config.validate().is_err() {
                return (state, Vec::new());
            }
            let effects = match state.simulator_entry(id, &config) {
                Some(sim) => sim.start(id, config),
                None => Vec::new(),
            };
            if !effects.is_empty() {
                state.mark_dirty();
            }
            effects
        }
        Msg::ResetClicked { id } => match state.simulators.get_mut(&id) {
            Some(sim) => {
                let effects = sim.reset(id);
                state.mark_dirty();
                effects
            }
            None => Vec::new(),
        },
        Msg::SimulatorTicked {
            id,
            generation,
            roll,
        } => match state.simulators.get_mut(&id) {
            Some(sim) => {
                let (effects, changed) = sim.tick(id, generation, roll);
                if changed {
                    state.mark_dirty();
                }
                effects
            }
            // Unmounted simulators may still have one tick in flight.
            None => vec![Effect::StopTicker { id }],
        },
        Msg::SimulatorUnmounted { id } => match state.simulators.remove(&id) {
            Some(mut sim) => {
                state.mark_dirty();
                sim.halt(id)
            }
            None => Vec::new(),
        },
        Msg::PageUnmounted => {
            let mut effects = state.copy.clear();
            for (id, mut sim) in std::mem::take(&mut state.simulators) {
                effects.extend(sim.halt(id));
            }
            state.mark_dirty();
            effects
        }
    };

    (state, effects)
}
