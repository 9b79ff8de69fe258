//! JSON persistence for [`StormConfig`].
//!
//! # Document format
//!
//! Every key is optional; missing keys take their defaults.
//!
//! ```json
//! {
//!   "field": {
//!     "reference_point": { "x": 0.0, "y": 64.0, "z": 0.0 },
//!     "inner_radius": 2000.0,
//!     "outer_radius": 3000.0,
//!     "drain_rate_per_second": 0.005,
//!     "vertical_gate": { "min_altitude": 62.0 }
//!   },
//!   "punishment": { "threshold": 0.0, "saturation_cost_per_second": 10.0 }
//! }
//! ```
//!
//! Loaded documents are always passed through [`StormConfig::validated`].

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::{ConfigWarning, FieldResult, StormConfig};

/// A validated document plus what was corrected while loading it.
#[derive(Clone, Debug)]
pub struct LoadedConfig {
    pub config:   StormConfig,
    pub warnings: Vec<ConfigWarning>,
    /// `true` if the file did not exist and defaults were written.
    pub created:  bool,
}

/// Load the document at `path`, writing the defaults there first if the
/// file does not exist.
pub fn load_or_create(path: &Path) -> FieldResult<LoadedConfig> {
    if path.exists() {
        return load(path);
    }
    let config = StormConfig::default();
    store(path, &config)?;
    info!(path = %path.display(), "wrote default storm config");
    Ok(LoadedConfig { config, warnings: Vec::new(), created: true })
}

/// Load and validate the document at `path`.
pub fn load(path: &Path) -> FieldResult<LoadedConfig> {
    let file = File::open(path)?;
    let loaded = load_reader(file)?;
    debug!(path = %path.display(), corrections = loaded.warnings.len(), "loaded storm config");
    Ok(loaded)
}

/// Like [`load`] but accepts any `Read` source.
pub fn load_reader<R: Read>(reader: R) -> FieldResult<LoadedConfig> {
    let raw: StormConfig = serde_json::from_reader(reader)?;
    let (config, warnings) = raw.validated();
    Ok(LoadedConfig { config, warnings, created: false })
}

/// Write `config` to `path` as pretty-printed JSON, creating parent
/// directories as needed.
pub fn store(path: &Path, config: &StormConfig) -> FieldResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, config)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
