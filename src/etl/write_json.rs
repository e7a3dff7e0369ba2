use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::data::Record;
use crate::errors::Result;

const PARTIAL_SUFFIX: &str = ".partial";

fn partial_path(path: &Path) -> PathBuf {
    let mut partial = path.as_os_str().to_owned();
    partial.push(PARTIAL_SUFFIX);
    PathBuf::from(partial)
}

/// Writes `path` through a sibling `.partial` file that is renamed into place once
/// `write` succeeds. On failure the partial file is removed and `path` is left as it was.
pub fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(BufWriter<File>) -> Result<()>,
{
    let partial = partial_path(path);
    let written = File::create(&partial)
        .map_err(Into::into)
        .and_then(|file| write(BufWriter::new(file)));
    match written {
        Ok(()) => Ok(fs::rename(&partial, path)?),
        Err(err) => {
            let _ = fs::remove_file(&partial);
            Err(err)
        },
    }
}

/// Writes records as JSON, one document per line, the format `mongoimport` reads.
pub struct JsonLinesWriter<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonLinesWriter<W> {
    /// Pretty output spreads each document over several lines. Only whitespace differs.
    pub fn new(out: W, pretty: bool) -> Self {
        JsonLinesWriter {
            out,
            pretty,
        }
    }

    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, record)?;
        } else {
            serde_json::to_writer(&mut self.out, record)?;
        }
        self.out.write_all(b"\n")?;
        Ok(())
    }

    pub fn write_all(&mut self, records: &[Record]) -> Result<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
