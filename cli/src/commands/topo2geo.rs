use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use topokit::{feature_by_name, io};
use tracing::info;

use crate::files::{finalize_write, open_for_write, read_json, write_json};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::Topo2geoArgs) -> Result<()> {
    let value = read_json(&args.input)?;
    let topology = io::topojson::parse(&value)
        .with_context(|| format!("read TopoJSON {}", args.input.display()))?;

    if args.list {
        let mut out = open_for_write(Path::new("-"))?;
        for name in topology.objects.names() {
            writeln!(out, "{name}")?;
        }
        return finalize_write(out);
    }

    // Check every name before writing anything.
    let outputs: Vec<(&str, PathBuf)> = args.outputs.iter().map(|spec| match spec.split_once('=') {
        Some((name, file)) => (name, PathBuf::from(file)),
        None => (spec.as_str(), PathBuf::from(format!("{spec}.json"))),
    }).collect();
    if let Some((name, _)) = outputs.iter().find(|(name, _)| !topology.objects.contains(name)) {
        bail!("object {name:?} not found in {}", args.input.display());
    }

    for (name, file) in &outputs {
        let geojson = feature_by_name(&topology, name)?;
        info!(name, file = %file.display(), "writing object");
        write_json(file, &io::geojson::to_value(&geojson)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use serde_json::{json, Value};

    use super::*;
    use crate::cli::{Cli, Commands};

    fn topo2geo(argv: &[&str]) -> Result<()> {
        let cli = Cli::parse_from(["topokit", "topo2geo"].iter().chain(argv));
        let Commands::Topo2geo(args) = &cli.command else { unreachable!() };
        run(&cli, args)
    }

    fn topology(dir: &Path) -> PathBuf {
        let path = dir.join("topo.json");
        let doc = json!({
            "type": "Topology",
            "objects": {
                "line": {"type": "LineString", "arcs": [0], "properties": {"k": 1}},
                "both": {"type": "GeometryCollection", "geometries": [
                    {"type": "LineString", "arcs": [-1]},
                    {"type": "Point", "coordinates": [5, 5]}
                ]}
            },
            "arcs": [[[0, 0], [1, 0], [2, 0]]]
        });
        fs::write(&path, doc.to_string()).unwrap();
        path
    }

    fn read(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn writes_features() {
        let dir = tempfile::tempdir().unwrap();
        let input = topology(dir.path());
        let out = dir.path().join("line.geojson");
        let spec = format!("line={}", out.display());
        topo2geo(&["-i", input.to_str().unwrap(), &spec]).unwrap();
        assert_eq!(read(&out), json!({
            "type": "Feature",
            "properties": {"k": 1},
            "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 0], [2, 0]]}
        }));
    }

    #[test]
    fn collections_become_feature_collections() {
        let dir = tempfile::tempdir().unwrap();
        let input = topology(dir.path());
        let out = dir.path().join("both.json");
        let spec = format!("both={}", out.display());
        topo2geo(&["--in", input.to_str().unwrap(), &spec]).unwrap();
        let doc = read(&out);
        assert_eq!(doc["type"], json!("FeatureCollection"));
        assert_eq!(doc["features"][0]["geometry"]["coordinates"], json!([[2, 0], [1, 0], [0, 0]]));
        assert_eq!(doc["features"][1]["properties"], json!({}));
    }

    #[test]
    fn unknown_names_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = topology(dir.path());
        let out = dir.path().join("line.json");
        let spec = format!("line={}", out.display());
        let err = topo2geo(&["-i", input.to_str().unwrap(), &spec, "nope=x.json"]).unwrap_err();
        assert!(err.to_string().contains("\"nope\""));
        assert!(!out.exists());
    }

    #[test]
    fn list_needs_no_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = topology(dir.path());
        topo2geo(&["-l", "-i", input.to_str().unwrap()]).unwrap();
        assert!(Cli::try_parse_from(["topokit", "topo2geo", "-i", "t.json"]).is_err());
    }
}
