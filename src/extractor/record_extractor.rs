use crate::error::Result;
use crate::extractor::records::{ExtractionSet, OptGprsData, RecordKind, SubData, SubscriberData};
use indexmap::IndexSet;
use regex::Regex;
use tracing::{debug, trace};

/// Literal line fragment closing every record in an `LST` dump.
pub const RECORD_TERMINATOR: &str = "---    END";

const GPRS_SECTION: &str = "\"GPRS Data\"";
const EPS_SECTION: &str = "\"EPS Data\"";

#[derive(Debug, Clone, Default)]
pub struct ScanProgress {
    pub segments_scanned: usize,
    pub total_segments: usize,
    pub sub_records: usize,
    pub optgprs_records: usize,
}

impl ScanProgress {
    pub fn new(total_segments: usize) -> Self {
        Self {
            total_segments,
            ..Self::default()
        }
    }
}

pub struct RecordExtractor {
    sub_header: Regex,
    optgprs_header: Regex,
    cntxid: Regex,
    apntplid: Regex,
    qostplid: Regex,
    eps_qostplid: Regex,
    apn_type: Regex,
}

impl RecordExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            sub_header: header_pattern(SubData::KEYWORD)?,
            optgprs_header: header_pattern(OptGprsData::KEYWORD)?,
            cntxid: numeric_field("CNTXID")?,
            apntplid: numeric_field("APNTPLID")?,
            qostplid: numeric_field("QOSTPLID")?,
            eps_qostplid: numeric_field("EPS_QOSTPLID")?,
            apn_type: Regex::new(r"\bAPN_TYPE\s*=\s*(\w+)")?,
        })
    }

    pub fn segments(content: &str) -> impl Iterator<Item = &str> {
        content.split(RECORD_TERMINATOR)
    }

    /// Collects the `SUB` and `OPTGPRS` data carried by every record whose
    /// header names `imsi`. The IMSI is compared as a plain string, so
    /// characters like `.` or `*` only match themselves.
    pub fn extract_subscriber(&self, content: &str, imsi: &str) -> SubscriberData {
        let mut data = SubscriberData::new(imsi);

        for segment in Self::segments(content) {
            if header_imsis(&self.sub_header, segment).any(|found| found == imsi) {
                let parsed = self.parse_sub(segment);
                match data.sub.as_mut() {
                    Some(existing) => existing.merge(parsed),
                    None => data.sub = Some(parsed),
                }
            }

            if header_imsis(&self.optgprs_header, segment).any(|found| found == imsi) {
                let parsed = self.parse_optgprs(segment);
                match data.optgprs.as_mut() {
                    Some(existing) => existing.merge(parsed),
                    None => data.optgprs = Some(parsed),
                }
            }
        }

        debug!(
            imsi,
            sub = data.sub.is_some(),
            optgprs = data.optgprs.is_some(),
            "extracted subscriber"
        );

        data
    }

    /// Extracts every subscriber in the dump.
    pub fn extract_all(
        &self,
        content: &str,
        progress_callback: Option<&dyn Fn(&ScanProgress)>,
    ) -> ExtractionSet {
        let segments: Vec<&str> = Self::segments(content).collect();
        let mut progress = ScanProgress::new(segments.len());
        let mut set = ExtractionSet::new();

        for segment in segments {
            for imsi in distinct(header_imsis(&self.sub_header, segment)) {
                trace!(imsi, "SUB record");
                set.record_sub(imsi, self.parse_sub(segment));
                progress.sub_records += 1;
            }

            for imsi in distinct(header_imsis(&self.optgprs_header, segment)) {
                trace!(imsi, "OPTGPRS record");
                set.record_optgprs(imsi, self.parse_optgprs(segment));
                progress.optgprs_records += 1;
            }

            progress.segments_scanned += 1;
            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        set.segments_scanned = progress.segments_scanned;
        debug!(
            segments = progress.segments_scanned,
            sub_records = progress.sub_records,
            optgprs_records = progress.optgprs_records,
            subscribers_sub = set.sub.len(),
            subscribers_optgprs = set.optgprs.len(),
            "bulk extraction finished"
        );

        set
    }

    fn parse_sub(&self, segment: &str) -> SubData {
        let mut data = SubData::default();

        if let Some(gprs) = section_span(segment, GPRS_SECTION) {
            data.gprs_cntxid = capture(&self.cntxid, gprs);
            data.gprs_apntplid = capture(&self.apntplid, gprs);
        }

        if let Some(eps) = section_span(segment, EPS_SECTION) {
            data.eps_cntxid = capture(&self.cntxid, eps);
            data.eps_apntplid = capture(&self.apntplid, eps);
        }

        data
    }

    fn parse_optgprs(&self, segment: &str) -> OptGprsData {
        OptGprsData {
            apntplid: capture(&self.apntplid, segment),
            qostplid: capture(&self.qostplid, segment),
            eps_qostplid: capture(&self.eps_qostplid, segment),
            apn_type: capture(&self.apn_type, segment),
        }
    }
}

fn header_pattern(keyword: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r#"%%LST {}:IMSI="([^"]+)""#,
        regex::escape(keyword)
    ))?)
}

// `\b` keeps QOSTPLID from matching the tail of EPS_QOSTPLID.
fn numeric_field(name: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"\b{}\s*=\s*(\d+)", regex::escape(name)))?)
}

fn header_imsis<'a>(header: &'a Regex, segment: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    header
        .captures_iter(segment)
        .filter_map(|caps| caps.get(1))
        .map(|imsi| imsi.as_str())
}

fn distinct<'a>(imsis: impl Iterator<Item = &'a str>) -> IndexSet<&'a str> {
    imsis.collect()
}

/// Text after `label` up to the next double quote or the end of the segment.
fn section_span<'a>(segment: &'a str, label: &str) -> Option<&'a str> {
    let start = segment.find(label)? + label.len();
    let rest = &segment[start..];
    let end = rest.find('"').unwrap_or(rest.len());
    Some(&rest[..end])
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().to_string())
}
