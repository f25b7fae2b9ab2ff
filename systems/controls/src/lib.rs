#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player controls that translate sampled input into world commands.

use minotaur_core::{ActorKind, Command, FrameInput};

/// Pure system that throttles directional input behind a cooldown.
///
/// The cooldown is independent of the move animation: it re-arms whenever a
/// directional attempt is issued, whether or not the world accepts it.
#[derive(Debug)]
pub struct Controls {
    cooldown_ticks: u32,
    remaining: u32,
}

impl Controls {
    /// Creates controls that wait `cooldown_ticks` frames between attempts.
    #[must_use]
    pub const fn new(cooldown_ticks: u32) -> Self {
        Self {
            cooldown_ticks,
            remaining: 0,
        }
    }

    /// Frames left before the next directional attempt is issued.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Consumes one frame of input and emits the commands it warrants.
    pub fn handle(&mut self, input: &FrameInput, out: &mut Vec<Command>) {
        self.remaining = self.remaining.saturating_sub(1);

        if input.quit {
            out.push(Command::Quit);
            return;
        }
        if input.toggle_lantern {
            out.push(Command::ToggleLantern);
        }
        if self.remaining > 0 || input.held.is_empty() {
            return;
        }

        out.extend(input.held.in_priority_order().map(|direction| {
            Command::StepActor {
                actor: ActorKind::Player,
                direction,
            }
        }));
        self.remaining = self.cooldown_ticks;
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(minotaur_core::Rules::default().input_cooldown_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minotaur_core::{Direction, HeldDirections};

    fn holding(directions: &[Direction]) -> FrameInput {
        FrameInput {
            held: directions.iter().copied().collect(),
            ..FrameInput::default()
        }
    }

    fn steps(commands: &[Command]) -> Vec<Direction> {
        commands
            .iter()
            .filter_map(|command| match command {
                Command::StepActor {
                    actor: ActorKind::Player,
                    direction,
                } => Some(*direction),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn held_directions_are_attempted_in_priority_order() {
        let mut controls = Controls::new(15);
        let mut out = Vec::new();
        controls.handle(
            &holding(&[Direction::Left, Direction::Right, Direction::Up]),
            &mut out,
        );
        assert_eq!(
            steps(&out),
            vec![Direction::Up, Direction::Right, Direction::Left]
        );
    }

    #[test]
    fn cooldown_spaces_attempts_fifteen_frames_apart() {
        let mut controls = Controls::new(15);
        let input = holding(&[Direction::Down]);
        let mut attempt_frames = Vec::new();

        for frame in 0..40 {
            let mut out = Vec::new();
            controls.handle(&input, &mut out);
            if !out.is_empty() {
                attempt_frames.push(frame);
            }
        }

        assert_eq!(attempt_frames, vec![0, 15, 30]);
    }

    #[test]
    fn cooldown_elapses_without_input() {
        let mut controls = Controls::new(15);
        let mut out = Vec::new();
        controls.handle(&holding(&[Direction::Up]), &mut out);
        for _ in 0..14 {
            controls.handle(&FrameInput::default(), &mut out);
        }
        assert_eq!(controls.remaining(), 1);

        out.clear();
        controls.handle(&holding(&[Direction::Up]), &mut out);
        assert_eq!(steps(&out), vec![Direction::Up]);
    }

    #[test]
    fn quit_suppresses_everything_else() {
        let mut controls = Controls::default();
        let mut out = Vec::new();
        controls.handle(
            &FrameInput {
                held: HeldDirections::none().with(Direction::Down),
                toggle_lantern: true,
                quit: true,
            },
            &mut out,
        );
        assert_eq!(out, vec![Command::Quit]);
    }

    #[test]
    fn lantern_toggle_ignores_the_cooldown() {
        let mut controls = Controls::new(15);
        let mut out = Vec::new();
        controls.handle(&holding(&[Direction::Right]), &mut out);
        out.clear();

        controls.handle(
            &FrameInput {
                toggle_lantern: true,
                ..FrameInput::default()
            },
            &mut out,
        );
        assert_eq!(out, vec![Command::ToggleLantern]);
    }
}
