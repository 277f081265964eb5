use std::path::Path;

use crate::quiz::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

/// Parses a `question=letter` pair as given on the command line.
pub fn parse_answer_pair(pair: &str) -> QuizResult<(String, String)> {
    let (qid, letter) = pair.split_once('=').context(InvalidAnswersSnafu {
        message: format!("expected question=letter, got {:?}", pair),
    })?;
    let qid = qid.trim();
    ensure!(
        !qid.is_empty(),
        InvalidAnswersSnafu {
            message: format!("missing question id in {:?}", pair)
        }
    );
    Ok((qid.to_string(), letter.trim().to_string()))
}

/// Turns the rows of a table (csv or spreadsheet) into responses.
///
/// The header names the questions. The column called `id_column`, if present,
/// names each response. Blank cells are not recorded as answers.
/// `first_lineno` is the line number of the first row, for the default ids.
pub fn rows_to_responses(
    path: &str,
    header: &[String],
    rows: Vec<Vec<String>>,
    id_column: &str,
    first_lineno: usize,
) -> Vec<ParsedResponse> {
    let default_id = make_default_id(path);
    let id_idx_o = header.iter().position(|h| h == id_column);
    debug!(
        "rows_to_responses: header: {:?} id column: {:?}",
        header, id_idx_o
    );

    let mut res: Vec<ParsedResponse> = Vec::new();
    for (idx, row) in rows.into_iter().enumerate() {
        let lineno = first_lineno + idx;
        let id = match id_idx_o.and_then(|i| row.get(i)) {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => default_id(lineno),
        };
        let mut answers: Vec<(String, String)> = Vec::new();
        for (col_idx, cell) in row.iter().enumerate() {
            if Some(col_idx) == id_idx_o {
                continue;
            }
            let qid = match header.get(col_idx) {
                Some(h) if !h.trim().is_empty() => h.trim(),
                _ => {
                    debug!(
                        "rows_to_responses: line {}: skipping cell {:?} without header",
                        lineno, cell
                    );
                    continue;
                }
            };
            let letter = cell.trim();
            if !letter.is_empty() {
                answers.push((qid.to_string(), letter.to_string()));
            }
        }
        debug!("rows_to_responses: line {}: {} {:?}", lineno, id, answers);
        res.push(ParsedResponse { id, answers });
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ids() {
        assert_eq!(simplify_file_name("a/b/answers.csv"), "answers.csv");
        let f = make_default_id("a/b/answers.csv");
        assert_eq!(f(12), "answers.csv-00000012");
    }

    #[test]
    fn answer_pairs() {
        assert_eq!(
            parse_answer_pair(" q3 = B ").unwrap(),
            ("q3".to_string(), "B".to_string())
        );
        assert_eq!(
            parse_answer_pair("q3=").unwrap(),
            ("q3".to_string(), "".to_string())
        );
        assert!(parse_answer_pair("q3").is_err());
        assert!(parse_answer_pair("=A").is_err());
    }

    #[test]
    fn rows() {
        let header: Vec<String> = vec!["q1", "name", "q2", ""]
            .into_iter()
            .map(String::from)
            .collect();
        let rows = vec![
            vec!["A".to_string(), "ana".to_string(), " C ".to_string(), "x".to_string()],
            vec!["".to_string(), "".to_string(), "D".to_string()],
        ];
        let res = rows_to_responses("dir/answers.csv", &header, rows, "name", 2);
        assert_eq!(
            res,
            vec![
                ParsedResponse {
                    id: "ana".to_string(),
                    answers: vec![
                        ("q1".to_string(), "A".to_string()),
                        ("q2".to_string(), "C".to_string())
                    ],
                },
                ParsedResponse {
                    id: "answers.csv-00000003".to_string(),
                    answers: vec![("q2".to_string(), "D".to_string())],
                },
            ]
        );
    }
}
