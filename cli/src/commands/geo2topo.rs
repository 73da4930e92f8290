use anyhow::{Context, Result};
use topokit::{io, topology, Error, Objects};
use tracing::{info, warn};

use crate::files::{file_stem, read_json, split_spec, write_json};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::Geo2topoArgs) -> Result<()> {
    let mut objects = Objects::new();
    for spec in &args.inputs {
        let (name, file) = split_spec(spec, file_stem);
        let value = read_json(&file)?;
        let geojson = io::geojson::parse(&value).with_context(|| format!("read GeoJSON {}", file.display()))?;
        match objects.insert(name, geojson) {
            Ok(()) => {}
            Err(Error::DuplicateObjectName(name)) => {
                warn!(name = %name, file = %file.display(), "skipping duplicate object name")
            }
            Err(err) => return Err(err.into()),
        }
    }

    info!(objects = objects.len(), quantization = ?args.quantization, "building topology");
    let topology = topology(objects, args.quantization)?;
    info!(arcs = topology.arcs.len(), "built topology");

    write_json(&args.out, &io::topojson::to_value(&topology)?)
}
