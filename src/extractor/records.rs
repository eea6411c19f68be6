//! Typed results for the two `LST` record kinds.
//!
//! Every field is an `Option<String>`: `None` means the field was never seen
//! for that subscriber. The `N/A` sentinel only appears when a value is
//! rendered, through [`display_value`].

use indexmap::IndexMap;
use serde::Serialize;

/// Placeholder printed for fields that were not found in the dump.
pub const NOT_AVAILABLE: &str = "N/A";

pub fn display_value(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

/// Shared shape of a per-kind result so exporters and the comparator can
/// treat `SUB` and `OPTGPRS` uniformly.
pub trait RecordKind: Default + Clone {
    /// Keyword used in the `%%LST <KEYWORD>:IMSI="..."` header.
    const KEYWORD: &'static str;

    /// Field names in export column order.
    const FIELD_NAMES: &'static [&'static str];

    /// Values in the same order as [`RecordKind::FIELD_NAMES`].
    fn values(&self) -> Vec<Option<&str>>;

    /// Folds a later record into this one. Fields found in `newer` win,
    /// fields absent from `newer` keep their current value.
    fn merge(&mut self, newer: Self);

    fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        Self::FIELD_NAMES
            .iter()
            .copied()
            .zip(self.values())
            .collect()
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .and_then(|(_, value)| value)
    }
}

fn newest(slot: &mut Option<String>, newer: Option<String>) {
    if newer.is_some() {
        *slot = newer;
    }
}

/// Context template fields from a `SUB` record, split by the `"GPRS Data"`
/// and `"EPS Data"` sub-sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubData {
    #[serde(rename = "GPRS_CNTXID")]
    pub gprs_cntxid: Option<String>,
    #[serde(rename = "GPRS_APNTPLID")]
    pub gprs_apntplid: Option<String>,
    #[serde(rename = "EPS_CNTXID")]
    pub eps_cntxid: Option<String>,
    #[serde(rename = "EPS_APNTPLID")]
    pub eps_apntplid: Option<String>,
}

impl RecordKind for SubData {
    const KEYWORD: &'static str = "SUB";
    const FIELD_NAMES: &'static [&'static str] =
        &["GPRS_CNTXID", "GPRS_APNTPLID", "EPS_CNTXID", "EPS_APNTPLID"];

    fn values(&self) -> Vec<Option<&str>> {
        vec![
            self.gprs_cntxid.as_deref(),
            self.gprs_apntplid.as_deref(),
            self.eps_cntxid.as_deref(),
            self.eps_apntplid.as_deref(),
        ]
    }

    fn merge(&mut self, newer: Self) {
        newest(&mut self.gprs_cntxid, newer.gprs_cntxid);
        newest(&mut self.gprs_apntplid, newer.gprs_apntplid);
        newest(&mut self.eps_cntxid, newer.eps_cntxid);
        newest(&mut self.eps_apntplid, newer.eps_apntplid);
    }
}

/// Flat option template fields from an `OPTGPRS` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptGprsData {
    #[serde(rename = "APNTPLID")]
    pub apntplid: Option<String>,
    #[serde(rename = "QOSTPLID")]
    pub qostplid: Option<String>,
    #[serde(rename = "EPS_QOSTPLID")]
    pub eps_qostplid: Option<String>,
    #[serde(rename = "APN_TYPE")]
    pub apn_type: Option<String>,
}

impl RecordKind for OptGprsData {
    const KEYWORD: &'static str = "OPTGPRS";
    const FIELD_NAMES: &'static [&'static str] =
        &["APNTPLID", "QOSTPLID", "EPS_QOSTPLID", "APN_TYPE"];

    fn values(&self) -> Vec<Option<&str>> {
        vec![
            self.apntplid.as_deref(),
            self.qostplid.as_deref(),
            self.eps_qostplid.as_deref(),
            self.apn_type.as_deref(),
        ]
    }

    fn merge(&mut self, newer: Self) {
        newest(&mut self.apntplid, newer.apntplid);
        newest(&mut self.qostplid, newer.qostplid);
        newest(&mut self.eps_qostplid, newer.eps_qostplid);
        newest(&mut self.apn_type, newer.apn_type);
    }
}

/// Everything found for one IMSI. A kind is `None` when no record of that
/// kind carried the IMSI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriberData {
    pub imsi: String,
    pub sub: Option<SubData>,
    pub optgprs: Option<OptGprsData>,
}

impl SubscriberData {
    pub fn new<S: Into<String>>(imsi: S) -> Self {
        Self {
            imsi: imsi.into(),
            sub: None,
            optgprs: None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.sub.is_some() || self.optgprs.is_some()
    }
}

/// Bulk extraction output, keyed by IMSI in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ExtractionSet {
    pub sub: IndexMap<String, SubData>,
    pub optgprs: IndexMap<String, OptGprsData>,
    pub segments_scanned: usize,
}

impl ExtractionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sub(&mut self, imsi: &str, data: SubData) {
        merge_into(&mut self.sub, imsi, data);
    }

    pub fn record_optgprs(&mut self, imsi: &str, data: OptGprsData) {
        merge_into(&mut self.optgprs, imsi, data);
    }

    pub fn subscriber(&self, imsi: &str) -> SubscriberData {
        SubscriberData {
            imsi: imsi.to_string(),
            sub: self.sub.get(imsi).cloned(),
            optgprs: self.optgprs.get(imsi).cloned(),
        }
    }
}

fn merge_into<K: RecordKind>(map: &mut IndexMap<String, K>, imsi: &str, data: K) {
    match map.get_mut(imsi) {
        Some(existing) => existing.merge(data),
        None => {
            map.insert(imsi.to_string(), data);
        }
    }
}
