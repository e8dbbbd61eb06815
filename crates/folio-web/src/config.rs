//! Configuration that outlives a single mount.

use folio_engine::{ConfigError, Overrides, Widget};

/// Every override accepted so far, merged into one. A widget built through
/// [`StoredConfig::apply`] ends up configured the same as one that saw each
/// override live.
#[derive(Debug, Default)]
pub struct StoredConfig {
    overrides: Overrides,
}

impl StoredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a freshly constructed widget with the stored overrides.
    pub fn apply<W: Widget>(&self, widget: &mut W) -> Result<(), ConfigError> {
        if self.overrides.is_empty() {
            return Ok(());
        }
        widget.configure(&self.overrides.to_json())
    }

    /// Check `json` on `fresh`, a newly built widget, on top of what is already
    /// stored, and keep it only if the widget accepts it.
    pub fn accept<W: Widget>(&mut self, json: &str, mut fresh: W) -> Result<(), ConfigError> {
        let next = self.overrides.merged(json)?;
        self.apply(&mut fresh)?;
        fresh.configure(json)?;
        self.overrides = next;
        Ok(())
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }
}
