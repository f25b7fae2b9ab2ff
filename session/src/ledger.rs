//! Persistence hook invoked when the player survives.

/// Destination for the names of players who slew the Minotaur.
pub trait SurvivorLedger {
    /// Stores `name` as a survivor.
    ///
    /// # Errors
    ///
    /// Returns an error when the record cannot be persisted.
    fn record(&mut self, name: &str) -> anyhow::Result<()>;
}

impl SurvivorLedger for Vec<String> {
    fn record(&mut self, name: &str) -> anyhow::Result<()> {
        self.push(name.to_owned());
        Ok(())
    }
}
