//! Show or reset the processing state

use minutes_digest::config::Config;
use minutes_digest::output::{OperationResult, OutputMode, StateReport};
use minutes_digest::storage::StateStore;

/// Print the saved pointer, or delete it with `reset`
pub fn state(config: &Config, reset: bool, mode: OutputMode) -> anyhow::Result<()> {
    let store = StateStore::new(&config.output.state_file);
    let path = store.path().display().to_string();

    if reset {
        let removed = store.reset()?;
        let message = if removed {
            format!("Removed {path}; the next run bootstraps from the latest comment.")
        } else {
            format!("No state at {path}.")
        };
        OperationResult {
            success: true,
            message,
        }
        .render(mode);
        return Ok(());
    }

    StateReport {
        path,
        state: store.load()?,
    }
    .render(mode);
    Ok(())
}
