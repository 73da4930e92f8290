use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::NamedTempFile;

#[inline]
pub fn is_std(path: &Path) -> bool {
    path == Path::new("-")
}

/// Read a JSON document from a file, or stdin for "-".
pub fn read_json(path: &Path) -> Result<Value> {
    if is_std(path) {
        return serde_json::from_reader(io::stdin().lock()).context("parse JSON from stdin");
    }
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse JSON from {}", path.display()))
}

/// Write-then-rename target, or stdout for "-".
pub enum PendingWrite {
    Stdout(io::Stdout),
    File { target: PathBuf, tmp: BufWriter<NamedTempFile> },
}

pub fn open_for_write(target: &Path) -> Result<PendingWrite> {
    if is_std(target) {
        return Ok(PendingWrite::Stdout(io::stdout()));
    }
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    let tmp = NamedTempFile::new_in(parent).context("create temp file")?;
    Ok(PendingWrite::File { target: target.to_path_buf(), tmp: BufWriter::new(tmp) })
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            PendingWrite::Stdout(out) => out.write(buf),
            PendingWrite::File { tmp, .. } => tmp.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            PendingWrite::Stdout(out) => out.flush(),
            PendingWrite::File { tmp, .. } => tmp.flush(),
        }
    }
}

/// Flush and move the temp file into place.
pub fn finalize_write(pending: PendingWrite) -> Result<()> {
    match pending {
        PendingWrite::Stdout(mut out) => out.flush().context("flush stdout"),
        PendingWrite::File { target, tmp } => {
            let tmp = tmp.into_inner().map_err(|e| e.into_error()).context("flush temp file")?;
            tmp.as_file().sync_all().ok(); // best-effort fsync
            tmp.persist(&target).with_context(|| format!("rename to {}", target.display()))?;
            Ok(())
        }
    }
}

/// Write `value` as one line of compact JSON.
pub fn write_json(target: &Path, value: &Value) -> Result<()> {
    let mut out = open_for_write(target)?;
    serde_json::to_writer(&mut out, value).with_context(|| format!("write {}", target.display()))?;
    out.write_all(b"\n")?;
    finalize_write(out)
}

/// Split `name=file`; without "=" the name comes from `default_name`.
pub fn split_spec(spec: &str, default_name: impl FnOnce(&str) -> String) -> (String, PathBuf) {
    match spec.split_once('=') {
        Some((name, file)) => (name.to_owned(), PathBuf::from(file)),
        None => (default_name(spec), PathBuf::from(spec)),
    }
}

/// File name without directory or extension.
pub fn file_stem(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .map_or_else(|| file.to_owned(), |stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        write_json(&path, &serde_json::json!({"a": [1, 2]})).unwrap();
        assert_eq!(read_json(&path).unwrap(), serde_json::json!({"a": [1, 2]}));
        // Only the target remains; the temp file was renamed into place.
        assert_eq!(fs::read_dir(dir.path().join("nested")).unwrap().count(), 1);
    }

    #[test]
    fn missing_input_mentions_path() {
        let err = read_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }

    #[test]
    fn specs_split_on_equals() {
        assert_eq!(split_spec("roads=data/r.geojson", file_stem), ("roads".into(), "data/r.geojson".into()));
        assert_eq!(split_spec("data/rivers.geojson", file_stem), ("rivers".into(), "data/rivers.geojson".into()));
        assert_eq!(split_spec("-", file_stem), ("-".into(), "-".into()));
    }
}
