use minotaur_core::Cue;
use minotaur_rendering::CuePlayer;

/// Cue player that reports cues through the log instead of a sound device.
#[derive(Debug, Default)]
pub(crate) struct LoggingCuePlayer {
    played: u64,
}

impl LoggingCuePlayer {
    pub(crate) fn played(&self) -> u64 {
        self.played
    }
}

impl CuePlayer for LoggingCuePlayer {
    fn play(&mut self, cue: Cue) {
        self.played += 1;
        tracing::debug!(?cue, "cue");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_cue() {
        let mut player = LoggingCuePlayer::default();
        player.play(Cue::Pickup);
        player.play(Cue::Pickup);
        assert_eq!(player.played(), 2);
    }
}
