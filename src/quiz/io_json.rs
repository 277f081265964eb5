// Answers stored in JSON.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::quiz::{io_common::make_default_id, *};

// The key that names a response when it is written as a plain map of answers.
const INLINE_ID_KEY: &str = "id";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonResponse {
    WithId {
        id: Option<String>,
        answers: BTreeMap<String, Option<String>>,
        #[serde(flatten)]
        others: BTreeMap<String, JSValue>,
    },
    Plain(BTreeMap<String, Option<String>>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonResponses {
    Many(Vec<JsonResponse>),
    One(JsonResponse),
}

pub fn read_json_responses(path: &str) -> QuizResult<Vec<ParsedResponse>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    parse_json_responses(&contents, path)
}

pub fn parse_json_responses(contents: &str, path: &str) -> QuizResult<Vec<ParsedResponse>> {
    let parsed: JsonResponses =
        serde_json::from_str(contents).context(ParsingJsonSnafu { path })?;
    let responses = match parsed {
        JsonResponses::Many(l) => l,
        JsonResponses::One(r) => vec![r],
    };
    let default_id = make_default_id(path);
    let res: Vec<ParsedResponse> = responses
        .into_iter()
        .enumerate()
        .map(|(idx, r)| to_parsed_response(r, || default_id(idx + 1)))
        .collect::<QuizResult<Vec<ParsedResponse>>>()?;
    debug!("parse_json_responses: {:?}", res);
    Ok(res)
}

fn to_parsed_response(
    r: JsonResponse,
    default_id: impl Fn() -> String,
) -> QuizResult<ParsedResponse> {
    let (id, mut answers) = match r {
        JsonResponse::WithId {
            id,
            answers,
            others,
        } => {
            // Answers go either under "answers" or at the top level, not both.
            ensure!(
                others.is_empty(),
                InvalidAnswersSnafu {
                    message: format!(
                        "unexpected keys {:?} next to \"answers\" in the response {:?}",
                        others.keys().collect::<Vec<&String>>(),
                        id.clone().unwrap_or_else(&default_id)
                    )
                }
            );
            (id, answers)
        }
        JsonResponse::Plain(answers) => (None, answers),
    };
    let inline_id = answers.remove(INLINE_ID_KEY).flatten();
    let id = id.or(inline_id).unwrap_or_else(default_id);
    Ok(ParsedResponse {
        id,
        answers: answers
            .into_iter()
            .filter_map(|(qid, letter)| letter.map(|l| (qid, l.trim().to_string())))
            .filter(|(_, l)| !l.is_empty())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_object() {
        let res = parse_json_responses(r#"{"q2": "B", "q1": "A", "q3": null}"#, "one.json")
            .unwrap();
        assert_eq!(
            res,
            vec![ParsedResponse {
                id: "one.json-00000001".to_string(),
                answers: vec![
                    ("q1".to_string(), "A".to_string()),
                    ("q2".to_string(), "B".to_string())
                ],
            }]
        );
    }

    #[test]
    fn list_of_responses() {
        let js = r#"[
            {"id": "ana", "answers": {"q1": "C"}},
            {"answers": {"q1": "D"}},
            {"id": "ben", "q1": "B"},
            {"q1": ""}
        ]"#;
        let res = parse_json_responses(js, "dir/many.json").unwrap();
        let ids: Vec<&str> = res.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["ana", "many.json-00000002", "ben", "many.json-00000004"]
        );
        assert_eq!(res[2].answers, vec![("q1".to_string(), "B".to_string())]);
        assert!(res[3].answers.is_empty());
    }

    #[test]
    fn numbers_are_rejected() {
        let res = parse_json_responses(r#"{"q1": 1}"#, "bad.json");
        assert!(matches!(res, Err(QuizError::ParsingJson { .. })));
        let msg = res.unwrap_err().to_string();
        assert!(msg.starts_with("Error parsing JSON in bad.json: "), "{}", msg);
    }

    #[test]
    fn answers_next_to_question_keys_are_rejected() {
        let res = parse_json_responses(
            r#"{"id": "x", "answers": {"q1": "A"}, "q2": "B"}"#,
            "mixed.json",
        );
        match res {
            Err(QuizError::InvalidAnswers { message }) => {
                assert!(message.contains("q2"), "{}", message);
                assert!(message.contains("\"x\""), "{}", message);
            }
            x => panic!("unexpected result {:?}", x),
        }
    }
}
