//! CSV analysis and datamart wire models.
//!
//! The ETL and datamart endpoints analyze an uploaded CSV and return
//! per-column statistics; the helpers here pick out the suggested
//! candidates used to default the build selection.

use serde::{Deserialize, Serialize};

/// Per-column null/duplicate statistics from `/etl/analisis`.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CsvColumnAnalysis {
    pub name: String,
    pub null_count: u64,
    pub null_percent: f64,
    pub duplicate_count: u64,
    pub duplicate_percent: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CsvAnalysisResult {
    pub total_rows: u64,
    pub columns: Vec<CsvColumnAnalysis>,
}

impl CsvAnalysisResult {
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Dimension candidate from `/datamart/analisis`.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DimensionCandidate {
    pub name: String,
    pub distinct_count: u64,
    pub distinct_ratio: f64,
    #[serde(default)]
    pub sample_values: Vec<String>,
    pub suggested: bool,
}

/// Measure candidate from `/datamart/analisis`.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeasureCandidate {
    pub name: String,
    pub non_null_count: u64,
    pub numeric_ratio: f64,
    pub suggested: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DatamartAnalysisResult {
    pub total_rows: u64,
    pub dimension_candidates: Vec<DimensionCandidate>,
    pub measure_candidates: Vec<MeasureCandidate>,
}

/// Names of the dimensions the analysis marked as suggested.
pub fn suggested_dimensions(analysis: &DatamartAnalysisResult) -> Vec<String> {
    analysis
        .dimension_candidates
        .iter()
        .filter(|d| d.suggested)
        .map(|d| d.name.clone())
        .collect()
}

/// Names of the measures the analysis marked as suggested.
pub fn suggested_measures(analysis: &DatamartAnalysisResult) -> Vec<String> {
    analysis
        .measure_candidates
        .iter()
        .filter(|m| m.suggested)
        .map(|m| m.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> DatamartAnalysisResult {
        DatamartAnalysisResult {
            total_rows: 100,
            dimension_candidates: vec![
                DimensionCandidate {
                    name: "categoria".to_string(),
                    distinct_count: 8,
                    distinct_ratio: 0.08,
                    sample_values: vec!["Mundo".to_string()],
                    suggested: true,
                },
                DimensionCandidate {
                    name: "url".to_string(),
                    distinct_count: 100,
                    distinct_ratio: 1.0,
                    sample_values: vec![],
                    suggested: false,
                },
            ],
            measure_candidates: vec![
                MeasureCandidate {
                    name: "visitas".to_string(),
                    non_null_count: 100,
                    numeric_ratio: 1.0,
                    suggested: true,
                },
                MeasureCandidate {
                    name: "autor".to_string(),
                    non_null_count: 90,
                    numeric_ratio: 0.0,
                    suggested: false,
                },
            ],
        }
    }

    #[test]
    fn test_suggested_dimensions_and_measures() {
        let a = analysis();
        assert_eq!(suggested_dimensions(&a), vec!["categoria"]);
        assert_eq!(suggested_measures(&a), vec!["visitas"]);
    }

    #[test]
    fn test_csv_analysis_column_names() {
        let result = CsvAnalysisResult {
            total_rows: 10,
            columns: vec![
                CsvColumnAnalysis {
                    name: "url".to_string(),
                    null_count: 0,
                    null_percent: 0.0,
                    duplicate_count: 2,
                    duplicate_percent: 20.0,
                },
                CsvColumnAnalysis {
                    name: "titulo".to_string(),
                    null_count: 1,
                    null_percent: 10.0,
                    duplicate_count: 0,
                    duplicate_percent: 0.0,
                },
            ],
        };
        assert_eq!(result.column_names(), vec!["url", "titulo"]);
    }

    #[test]
    fn test_csv_analysis_deserializes_camel_case() {
        let json = r#"{
            "totalRows": 3,
            "columns": [
                {"name":"url","nullCount":0,"nullPercent":0.0,"duplicateCount":1,"duplicatePercent":33.3}
            ]
        }"#;
        let result: CsvAnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_rows, 3);
        assert_eq!(result.columns[0].duplicate_count, 1);
    }
}
