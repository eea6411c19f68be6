use crate::error::Result;
use crate::extractor::{display_value, run_timestamp, ExtractionSet, OutputManager, RecordKind};
use csv::Writer;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub sub_file: PathBuf,
    pub optgprs_file: PathBuf,
    pub sub_records: usize,
    pub optgprs_records: usize,
    pub segments_scanned: usize,
}

/// Writes one CSV per record kind for a bulk extraction.
pub struct BulkExporter {
    output: OutputManager,
    file_prefix: String,
    timestamp_format: String,
}

impl BulkExporter {
    pub fn new<S: Into<String>>(output: OutputManager, file_prefix: S) -> Self {
        Self {
            output,
            file_prefix: file_prefix.into(),
            timestamp_format: "%Y%m%d_%H%M%S".to_string(),
        }
    }

    pub fn with_timestamp_format<S: Into<String>>(mut self, format: S) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn export(&self, set: &ExtractionSet) -> Result<ExportSummary> {
        // Render both files before touching the disk.
        let sub_csv = render_csv(&set.sub)?;
        let optgprs_csv = render_csv(&set.optgprs)?;

        self.output.initialize()?;

        let timestamp = run_timestamp(&self.timestamp_format)?;
        let sub_file = self.output.unique_path(&format!(
            "{}_sub_{}.csv",
            self.file_prefix, timestamp
        ));
        let optgprs_file = self.output.unique_path(&format!(
            "{}_optgprs_{}.csv",
            self.file_prefix, timestamp
        ));

        self.output.write_all(&[
            (sub_file.clone(), sub_csv),
            (optgprs_file.clone(), optgprs_csv),
        ])?;

        Ok(ExportSummary {
            sub_file,
            optgprs_file,
            sub_records: set.sub.len(),
            optgprs_records: set.optgprs.len(),
            segments_scanned: set.segments_scanned,
        })
    }
}

pub fn csv_header<K: RecordKind>() -> Vec<&'static str> {
    std::iter::once("IMSI")
        .chain(K::FIELD_NAMES.iter().copied())
        .collect()
}

/// One header row plus one row per IMSI; absent fields are written as `N/A`.
pub fn render_csv<K: RecordKind>(records: &IndexMap<String, K>) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = Writer::from_writer(&mut buffer);
        writer.write_record(csv_header::<K>())?;

        for (imsi, data) in records {
            let row = std::iter::once(imsi.as_str())
                .chain(data.values().into_iter().map(display_value));
            writer.write_record(row)?;
        }

        writer.flush()?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{OptGprsData, RecordExtractor, SubData};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_headers() {
        assert_eq!(
            csv_header::<SubData>().join(","),
            "IMSI,GPRS_CNTXID,GPRS_APNTPLID,EPS_CNTXID,EPS_APNTPLID"
        );
        assert_eq!(
            csv_header::<OptGprsData>().join(","),
            "IMSI,APNTPLID,QOSTPLID,EPS_QOSTPLID,APN_TYPE"
        );
    }

    #[test]
    fn test_render_rows_with_sentinel() {
        let mut records = IndexMap::new();
        records.insert(
            "001".to_string(),
            SubData {
                gprs_cntxid: Some("5".to_string()),
                gprs_apntplid: Some("9".to_string()),
                ..SubData::default()
            },
        );

        let csv = String::from_utf8(render_csv(&records).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "001,5,9,N/A,N/A");
    }

    #[test]
    fn test_empty_dump_exports_header_only_files() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = BulkExporter::new(
            OutputManager::new(temp_dir.path().join("output")),
            "subscriber_data",
        );

        let set = RecordExtractor::new().unwrap().extract_all("", None);
        let summary = exporter.export(&set).unwrap();

        assert_eq!(summary.sub_records, 0);
        assert_eq!(summary.optgprs_records, 0);
        assert_eq!(
            fs::read_to_string(&summary.sub_file).unwrap().trim_end(),
            "IMSI,GPRS_CNTXID,GPRS_APNTPLID,EPS_CNTXID,EPS_APNTPLID"
        );
        assert_eq!(
            fs::read_to_string(&summary.optgprs_file).unwrap().trim_end(),
            "IMSI,APNTPLID,QOSTPLID,EPS_QOSTPLID,APN_TYPE"
        );
    }

    #[test]
    fn test_export_file_names() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = BulkExporter::new(OutputManager::new(temp_dir.path()), "hlr")
            .with_timestamp_format("fixed");

        let first = exporter.export(&ExtractionSet::new()).unwrap();
        assert_eq!(first.sub_file, temp_dir.path().join("hlr_sub_fixed.csv"));
        assert_eq!(first.optgprs_file, temp_dir.path().join("hlr_optgprs_fixed.csv"));

        let second = exporter.export(&ExtractionSet::new()).unwrap();
        assert_eq!(second.sub_file, temp_dir.path().join("hlr_sub_fixed_1.csv"));
    }

    #[test]
    fn test_kinds_export_independently() {
        let content = "%%LST OPTGPRS:IMSI=\"002\"\nAPNTPLID = 1\nAPN_TYPE = ims\n---    END";
        let temp_dir = TempDir::new().unwrap();
        let exporter = BulkExporter::new(OutputManager::new(temp_dir.path()), "run");

        let set = RecordExtractor::new().unwrap().extract_all(content, None);
        let summary = exporter.export(&set).unwrap();

        assert_eq!(summary.sub_records, 0);
        let optgprs = fs::read_to_string(&summary.optgprs_file).unwrap();
        assert!(optgprs.contains("002,1,N/A,N/A,ims"));
    }

    #[test]
    fn test_sub_record_without_sections_exports_sentinel_row() {
        let content = "%%LST SUB:IMSI=\"003\"\nRETCODE = 0\nCNTXID = 4\n---    END";
        let temp_dir = TempDir::new().unwrap();
        let exporter = BulkExporter::new(OutputManager::new(temp_dir.path()), "run");

        let set = RecordExtractor::new().unwrap().extract_all(content, None);
        let summary = exporter.export(&set).unwrap();

        assert_eq!(summary.sub_records, 1);
        let sub = fs::read_to_string(&summary.sub_file).unwrap();
        let lines: Vec<&str> = sub.lines().collect();
        assert_eq!(lines[1], "003,N/A,N/A,N/A,N/A");
    }
}
