use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::config::UserConfig;
use crate::data::{Element, Record};
use crate::errors::Result;
use crate::shape::{ShapeOptions, Shaper};

use super::parse_osm::read_osm_file;
use super::write_json::{replace_file, JsonLinesWriter};
use super::Etl;

pub const ETL_NAME: &str = "shape_osm";
pub const OUTPUT_EXTENSION: &str = "json";

/// Outcome of shaping a whole file.
#[derive(Debug, Default)]
pub struct ShapeReport {
    /// Shaped records, in document order.
    pub records: Vec<Record>,
    /// Elements that are neither nodes nor ways.
    pub skipped: usize,
    /// Elements that could not be shaped, see the error log for which ones.
    pub failed: usize,
}

/// Reads an .osm file, shapes its nodes and ways and writes them as JSON lines.
pub struct ShapeOsmEtl<'a> {
    config: &'a UserConfig,
    shaper: Shaper,
}

impl ShapeOsmEtl<'_> {
    pub fn new(config: &UserConfig) -> ShapeOsmEtl {
        ShapeOsmEtl {
            config,
            shaper: Shaper::new(ShapeOptions {
                skip_problem_keys: config.skip_problem_keys,
            }),
        }
    }

    /// `<input file name>.json`, e.g. `chicago.osm.json`.
    pub fn output_file_name(&self) -> Result<String> {
        let input_fname = Path::new(&self.config.data_path)
            .file_name()
            .ok_or("Could not get input file name")?;
        Ok(format!("{}.{}", input_fname.to_string_lossy(), OUTPUT_EXTENSION))
    }

    pub fn output_path(&self, dir: &Path) -> Result<PathBuf> {
        Ok(dir.join(self.output_file_name()?))
    }

    /// Shapes every element. A bad element is logged and counted, it never stops the batch.
    pub fn shape_all(&self, elements: &[Element]) -> ShapeReport {
        let mut report = ShapeReport::default();

        for element in tqdm::tqdm(elements.iter()) {
            match self.shaper.shape(element) {
                Ok(Some(record)) => report.records.push(record),
                Ok(None) => report.skipped += 1,
                Err(err) => {
                    let message = err.to_string();
                    error!(id = element.id().unwrap_or_default(), err = message.as_str(); "Could not shape element, skipping it");
                    report.failed += 1;
                },
            }
        }
        report
    }
}

impl Etl for ShapeOsmEtl<'_> {
    type Input = Vec<Element>;
    type Output = ShapeReport;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn is_cached(&self, dir: &Path) -> Result<bool> {
        Ok(self.output_path(dir)?.try_exists()?)
    }

    fn clean(&self, dir: &Path) -> Result<()> {
        if self.is_cached(dir)? {
            fs::remove_file(self.output_path(dir)?)?;
        }
        Ok(())
    }

    fn extract(&mut self, _dir: &Path) -> Result<Self::Input> {
        let elements = read_osm_file(Path::new(&self.config.data_path))?;
        info!(etl_name = ETL_NAME, elements = elements.len(); "Read elements");
        Ok(elements)
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Output> {
        let report = self.shape_all(&input);
        info!(
            etl_name = ETL_NAME,
            records = report.records.len(),
            skipped = report.skipped,
            failed = report.failed;
            "Shaped elements"
        );
        Ok(report)
    }

    fn load(&mut self, dir: &Path, output: &Self::Output) -> Result<()> {
        let pretty = self.config.pretty;
        replace_file(&self.output_path(dir)?, |out| {
            let mut writer = JsonLinesWriter::new(out, pretty);
            writer.write_all(&output.records)?;
            writer.finish()?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::data::RecordType;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6">
  <node id="2406124091" visible="true" version="2" changeset="17206049" timestamp="2013-08-03T16:43:42Z" user="linuxUser16" uid="1219059" lat="41.9757030" lon="-87.6921867">
    <tag k="amenity" v="restaurant"/>
    <tag k="phone" v="1 (773)-271-5176"/>
  </node>
  <node id="13" lat="somewhere" lon="-87.69"/>
  <way id="209809850" visible="true">
    <nd ref="2199822281"/>
    <nd ref="2199822390"/>
    <tag k="addr:postcode" v="60625-1234"/>
  </way>
  <relation id="1557627">
    <tag k="type" v="multipolygon"/>
  </relation>
</osm>
"#;

    fn setup(pretty: bool) -> (tempfile::TempDir, UserConfig) {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("chicago.osm");
        fs::write(&data_path, SAMPLE).unwrap();
        let config = UserConfig {
            data_path: data_path.to_string_lossy().into_owned(),
            dest_path: dir.path().to_string_lossy().into_owned(),
            pretty,
            skip_problem_keys: false,
        };
        (dir, config)
    }

    #[test]
    fn names_output_after_input() {
        let (dir, config) = setup(false);
        let etl = ShapeOsmEtl::new(&config);

        assert_eq!(etl.output_file_name().unwrap(), "chicago.osm.json");
        assert_eq!(etl.output_path(dir.path()).unwrap(), dir.path().join("chicago.osm.json"));
    }

    #[test]
    fn bad_elements_do_not_stop_the_batch() {
        let (dir, config) = setup(false);
        let mut etl = ShapeOsmEtl::new(&config);

        let report = etl.process(dir.path()).unwrap().unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.records[0].record_type, RecordType::Node);
        assert_eq!(report.records[0].field("phone"), Some("7732715176"));
        assert_eq!(report.records[1].record_type, RecordType::Way);
    }

    #[test]
    fn writes_records_as_json_lines() {
        let (dir, config) = setup(false);
        let mut etl = ShapeOsmEtl::new(&config);
        etl.process(dir.path()).unwrap();

        let text = fs::read_to_string(dir.path().join("chicago.osm.json")).unwrap();
        let lines: Vec<Value> = text.lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], "2406124091");
        assert_eq!(lines[0]["pos"][1], -87.6921867);
        assert_eq!(lines[1]["address"]["postcode"], "60625");
        assert_eq!(lines[1]["node_refs"], serde_json::json!(["2199822281", "2199822390"]));
    }

    #[test]
    fn cached_output_is_reused_until_cleaned() {
        let (dir, config) = setup(true);
        let mut etl = ShapeOsmEtl::new(&config);

        assert!(etl.process(dir.path()).unwrap().is_some());
        assert!(etl.is_cached(dir.path()).unwrap());
        assert!(etl.process(dir.path()).unwrap().is_none());

        etl.clean(dir.path()).unwrap();
        assert!(!etl.is_cached(dir.path()).unwrap());
        assert!(etl.process(dir.path()).unwrap().is_some());
    }

    #[test]
    fn failed_load_leaves_no_cached_output() {
        let (dir, config) = setup(false);
        let mut etl = ShapeOsmEtl::new(&config);
        // A directory where the partial output should go makes the write fail.
        fs::create_dir(dir.path().join("chicago.osm.json.partial")).unwrap();

        assert!(etl.process(dir.path()).is_err());
        assert!(!etl.is_cached(dir.path()).unwrap());
    }

    #[test]
    fn missing_input_fails_extraction() {
        let (dir, mut config) = setup(false);
        config.data_path = dir.path().join("missing.osm").to_string_lossy().into_owned();
        let mut etl = ShapeOsmEtl::new(&config);

        assert!(etl.process(dir.path()).is_err());
        assert!(!etl.is_cached(dir.path()).unwrap());
    }
}
