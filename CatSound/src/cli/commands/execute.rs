//! Command execution implementations

use super::{Commands, batch, create, extract, inspect, list, load_config};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::List { source, names } => list::execute(source, *names),
            Commands::Inspect {
                source,
                wav,
                config,
            } => inspect::execute(source, *wav, &load_config(config.as_deref())?),
            Commands::Extract {
                source,
                destination,
                wav,
                config,
                quiet,
            } => extract::execute(
                source,
                destination,
                *wav,
                &load_config(config.as_deref())?,
                *quiet,
            ),
            Commands::Create {
                source,
                destination,
                names,
            } => create::execute(source, destination, *names),
            Commands::Batch {
                source,
                wav,
                config,
            } => batch::execute(source, *wav, &load_config(config.as_deref())?),
        }
    }
}
