use std::path::PathBuf;

/// Shared-arc topology tools
#[derive(clap::Parser, Debug)]
#[command(name = "topokit", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Convert GeoJSON files into one TopoJSON topology
    Geo2topo(Geo2topoArgs),

    /// Extract GeoJSON features from a TopoJSON topology
    Topo2geo(Topo2geoArgs),

    /// Quantize and delta-encode a TopoJSON topology
    Topoquantize(TopoquantizeArgs),
}

#[derive(clap::Args, Debug)]
pub struct Geo2topoArgs {
    /// Input GeoJSON files as [name=]file; the name defaults to the file stem, "-" reads stdin
    #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
    pub inputs: Vec<String>,

    /// Output topology file, "-" for stdout
    #[arg(short, long, default_value = "-", value_hint = clap::ValueHint::FilePath)]
    pub out: PathBuf,

    /// Pre-quantize onto a COUNT x COUNT grid and delta-encode arcs
    #[arg(short, long, value_name = "COUNT")]
    pub quantization: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct Topo2geoArgs {
    /// Objects to extract as [name=]file; the file defaults to name.json, "-" writes stdout
    #[arg(required_unless_present = "list", value_hint = clap::ValueHint::FilePath)]
    pub outputs: Vec<String>,

    /// Input topology file, "-" for stdin
    #[arg(short = 'i', long = "in", default_value = "-", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// List object names instead of extracting
    #[arg(short, long)]
    pub list: bool,
}

#[derive(clap::Args, Debug)]
pub struct TopoquantizeArgs {
    /// Input topology file, "-" for stdin
    #[arg(short = 'i', long = "in", default_value = "-", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output topology file, "-" for stdout
    #[arg(short, long, default_value = "-", value_hint = clap::ValueHint::FilePath)]
    pub out: PathBuf,

    /// Grid size; must be at least 2
    #[arg(short, long, value_name = "COUNT")]
    pub quantization: f64,
}
