use crate::error::Result;
use crate::extractor::{
    display_value, sanitize_file_component, OptGprsData, OutputManager, RecordKind, SubData,
    SubscriberData,
};
use serde::Serialize;
use std::path::PathBuf;

/// One field of one record kind, side by side for two subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldComparison {
    pub field: &'static str,
    pub first: Option<String>,
    pub second: Option<String>,
}

impl FieldComparison {
    pub fn is_same(&self) -> bool {
        self.first == self.second
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub first_imsi: String,
    pub second_imsi: String,
    pub sub: Vec<FieldComparison>,
    pub optgprs: Vec<FieldComparison>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    pub report_file: PathBuf,
    pub first_found: bool,
    pub second_found: bool,
    pub fields_compared: usize,
    pub differences: usize,
}

/// Fields carrying a value on either side, sorted by name. A sub-section
/// missing from both records contributes no lines.
pub fn compare_kind<K: RecordKind>(first: Option<&K>, second: Option<&K>) -> Vec<FieldComparison> {
    let value = |data: Option<&K>, field: &str| data.and_then(|d| d.get(field)).map(str::to_string);

    let mut fields: Vec<FieldComparison> = K::FIELD_NAMES
        .iter()
        .map(|&field| FieldComparison {
            field,
            first: value(first, field),
            second: value(second, field),
        })
        .filter(|field| field.first.is_some() || field.second.is_some())
        .collect();

    fields.sort_unstable_by_key(|field| field.field);
    fields
}

impl ComparisonReport {
    pub fn build(first: &SubscriberData, second: &SubscriberData) -> Self {
        Self {
            first_imsi: first.imsi.clone(),
            second_imsi: second.imsi.clone(),
            sub: compare_kind::<SubData>(first.sub.as_ref(), second.sub.as_ref()),
            optgprs: compare_kind::<OptGprsData>(first.optgprs.as_ref(), second.optgprs.as_ref()),
        }
    }

    pub fn fields_compared(&self) -> usize {
        self.sub.len() + self.optgprs.len()
    }

    pub fn differences(&self) -> usize {
        self.sub
            .iter()
            .chain(self.optgprs.iter())
            .filter(|field| !field.is_same())
            .count()
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            format!(
                "Comparison between IMSI {} and IMSI {}",
                self.first_imsi, self.second_imsi
            ),
            "=".repeat(50),
        ];

        self.render_section(&mut lines, SubData::KEYWORD, &self.sub);
        self.render_section(&mut lines, OptGprsData::KEYWORD, &self.optgprs);

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    fn render_section(&self, lines: &mut Vec<String>, keyword: &str, fields: &[FieldComparison]) {
        let title = format!("{} Data Comparison:", keyword);
        lines.push(String::new());
        lines.push(title.clone());
        lines.push("-".repeat(title.len()));

        if fields.is_empty() {
            lines.push(String::new());
            lines.push(format!("No {} records found for either IMSI", keyword));
            return;
        }

        for field in fields {
            lines.push(String::new());
            if field.is_same() {
                lines.push(format!(
                    "{}: {} (same for both)",
                    field.field,
                    display_value(field.first.as_deref())
                ));
            } else {
                lines.push(format!("{}:", field.field));
                lines.push(format!(
                    "  IMSI {}: {}",
                    self.first_imsi,
                    display_value(field.first.as_deref())
                ));
                lines.push(format!(
                    "  IMSI {}: {}",
                    self.second_imsi,
                    display_value(field.second.as_deref())
                ));
            }
        }
    }
}

/// Writes the diff report for two subscribers.
pub struct PairwiseComparator {
    output: OutputManager,
}

impl PairwiseComparator {
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }

    pub fn report_file_name(first_imsi: &str, second_imsi: &str) -> String {
        format!(
            "{}_{}_sub-list-comp.txt",
            sanitize_file_component(first_imsi),
            sanitize_file_component(second_imsi)
        )
    }

    pub fn compare(
        &self,
        first: &SubscriberData,
        second: &SubscriberData,
    ) -> Result<ComparisonSummary> {
        let report = ComparisonReport::build(first, second);
        let text = report.render();

        self.output.initialize()?;
        let report_file = self
            .output
            .get_output_directory()
            .join(Self::report_file_name(&first.imsi, &second.imsi));
        self.output
            .write_all(&[(report_file.clone(), text.into_bytes())])?;

        Ok(ComparisonSummary {
            report_file,
            first_found: first.is_found(),
            second_found: second.is_found(),
            fields_compared: report.fields_compared(),
            differences: report.differences(),
        })
    }
}
