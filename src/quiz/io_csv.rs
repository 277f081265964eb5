// Primitives for reading CSV files.

use crate::quiz::{io_common::rows_to_responses, *};

pub fn read_csv_responses(path: &str, source: &ResponseSource) -> QuizResult<Vec<ParsedResponse>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1_usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv_responses: header: {:?}", header);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        rows.push(line.iter().map(|s| s.to_string()).collect());
    }
    info!("read_csv_responses: {} rows in {:?}", rows.len(), path);
    Ok(rows_to_responses(path, &header, rows, source.id_column(), 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_file(name: &str) -> String {
        let p: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "data", name]
            .iter()
            .collect();
        p.display().to_string()
    }

    #[test]
    fn classroom_csv() {
        let source = ResponseSource {
            provider: "csv".to_string(),
            file_path: "responses.csv".to_string(),
            id_column: Some("student".to_string()),
            excel_worksheet_name: None,
        };
        let res =
            read_csv_responses(&test_file("csv_classroom/responses.csv"), &source).unwrap();
        assert_eq!(res.len(), 3);
        assert_eq!(res[0].id, "ana");
        assert_eq!(res[0].answers.len(), 9);
        assert_eq!(res[1].answers[0], ("q1".to_string(), "D".to_string()));
    }

    #[test]
    fn missing_file() {
        let source = ResponseSource {
            provider: "csv".to_string(),
            file_path: "nothing.csv".to_string(),
            id_column: None,
            excel_worksheet_name: None,
        };
        assert!(matches!(
            read_csv_responses(&test_file("nothing.csv"), &source),
            Err(QuizError::CsvOpen { .. })
        ));
    }
}
