use anyhow::{Context, Result};
use topokit::{io, quantize, QuantizeSpec};
use tracing::info;

use crate::files::{read_json, write_json};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::TopoquantizeArgs) -> Result<()> {
    let value = read_json(&args.input)?;
    let topology = io::topojson::parse(&value)
        .with_context(|| format!("read TopoJSON {}", args.input.display()))?;

    info!(quantization = args.quantization, arcs = topology.arcs.len(), "quantizing topology");
    let quantized = quantize(&topology, QuantizeSpec::Resolution(args.quantization))?;

    write_json(&args.out, &io::topojson::to_value(&quantized)?)
}
