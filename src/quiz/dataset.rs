// The quiz content: questions, result copy and sharing metadata.

use crate::quiz::*;

use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub const NUM_QUESTIONS: usize = 9;
pub const NUM_OPTIONS: usize = 4;

static BUNDLED_QUIZ_JSON: &str = include_str!("../../data/quiz.en.json");
static BUNDLED_QUIZ: OnceCell<QuizData> = OnceCell::new();

static ACCENT_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("invalid regex"));

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<QuizOption>,
    #[serde(rename = "factBubble")]
    pub fact_bubble: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IllustrationVariant {
    Ballots,
    Stamp,
    Phone,
    Map,
    Shield,
    Poster,
    Clock,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuizResultCopy {
    #[serde(rename = "titleBn")]
    pub title_bn: String,
    #[serde(rename = "titleEnTag")]
    pub title_en_tag: String,
    pub roast1: String,
    pub roast2: String,
    pub tip: String,
    pub nudge: String,
    #[serde(rename = "shareCaptionTemplate")]
    pub share_caption_template: String,
    #[serde(rename = "accentColor")]
    pub accent_color: String,
    #[serde(rename = "illustrationVariant")]
    pub illustration_variant: IllustrationVariant,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuizMeta {
    pub title: String,
    pub subtitle: String,
    pub disclaimer: String,
    #[serde(rename = "shareHashtags")]
    pub share_hashtags: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuizData {
    pub meta: QuizMeta,
    pub questions: Vec<QuizQuestion>,
    pub results: BTreeMap<String, QuizResultCopy>,
}

impl QuizData {
    /// The ids of the questions, in the order of the quiz.
    pub fn question_ids(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.id.clone()).collect()
    }

    pub fn result_copy(&self, rt: ResultType) -> Option<&QuizResultCopy> {
        self.results.get(rt.as_str())
    }

    /// The text offered for sharing a result: the caption followed by the hashtags.
    pub fn share_caption(&self, rt: ResultType) -> Option<String> {
        self.result_copy(rt).map(|r| {
            format!(
                "{} {}",
                r.share_caption_template,
                self.meta.share_hashtags.join(" ")
            )
        })
    }
}

/// Parses and validates quiz content.
pub fn parse_quiz_data(contents: &str, path: &str) -> QuizResult<QuizData> {
    let quiz: QuizData = serde_json::from_str(contents).context(ParsingJsonSnafu { path })?;
    validate_quiz_data(&quiz)?;
    Ok(quiz)
}

pub fn read_quiz_data(path: &str) -> QuizResult<QuizData> {
    info!("read_quiz_data: reading quiz content from {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    parse_quiz_data(&contents, path)
}

/// The quiz content shipped with the program. Parsed once.
pub fn bundled_quiz() -> QuizResult<&'static QuizData> {
    BUNDLED_QUIZ.get_or_try_init(|| parse_quiz_data(BUNDLED_QUIZ_JSON, "<bundled quiz>"))
}

fn non_empty(value: &str, what: &str) -> QuizResult<()> {
    ensure!(
        !value.is_empty(),
        InvalidQuizSnafu {
            message: format!("{} must not be empty", what)
        }
    );
    Ok(())
}

pub fn validate_quiz_data(quiz: &QuizData) -> QuizResult<()> {
    non_empty(&quiz.meta.title, "meta.title")?;
    non_empty(&quiz.meta.subtitle, "meta.subtitle")?;
    non_empty(&quiz.meta.disclaimer, "meta.disclaimer")?;
    ensure!(
        !quiz.meta.share_hashtags.is_empty(),
        InvalidQuizSnafu {
            message: "meta.shareHashtags needs at least one hashtag"
        }
    );

    ensure!(
        quiz.questions.len() == NUM_QUESTIONS,
        InvalidQuizSnafu {
            message: format!(
                "expected {} questions, found {}",
                NUM_QUESTIONS,
                quiz.questions.len()
            )
        }
    );
    let mut seen_questions: HashSet<&str> = HashSet::new();
    for q in quiz.questions.iter() {
        validate_question(q)?;
        ensure!(
            seen_questions.insert(q.id.as_str()),
            InvalidQuizSnafu {
                message: format!("question {} appears more than once", q.id)
            }
        );
    }

    for rt in ResultType::ALL {
        let copy = quiz.result_copy(rt).context(InvalidQuizSnafu {
            message: format!("no result content for {}", rt),
        })?;
        validate_result_copy(rt, copy)?;
    }
    for label in unused_result_keys(quiz) {
        warn!(
            "validate_quiz_data: result content for {:?} does not match any result type",
            label
        );
    }
    debug!(
        "validate_quiz_data: {} questions, {} results",
        quiz.questions.len(),
        quiz.results.len()
    );
    Ok(())
}

/// Keys of `results` that no result type looks up. Lookups are exact, so
/// `processpro` is unused even though it parses as `ProcessPro`.
fn unused_result_keys(quiz: &QuizData) -> Vec<&str> {
    quiz.results
        .keys()
        .map(|k| k.as_str())
        .filter(|k| !ResultType::ALL.iter().any(|rt| rt.as_str() == *k))
        .collect()
}

fn validate_question(q: &QuizQuestion) -> QuizResult<()> {
    ensure!(
        q.id.chars().count() >= 2,
        InvalidQuizSnafu {
            message: format!("question id {:?} is too short", q.id)
        }
    );
    non_empty(&q.text, &format!("{}.text", q.id))?;
    non_empty(&q.fact_bubble, &format!("{}.factBubble", q.id))?;
    ensure!(
        q.options.len() == NUM_OPTIONS,
        InvalidQuizSnafu {
            message: format!(
                "question {} has {} options instead of {}",
                q.id,
                q.options.len(),
                NUM_OPTIONS
            )
        }
    );
    let mut seen_options: HashSet<AnswerOption> = HashSet::new();
    for o in q.options.iter() {
        let option = AnswerOption::parse(&o.id).context(InvalidQuizSnafu {
            message: format!("question {} has an invalid option id {:?}", q.id, o.id),
        })?;
        ensure!(
            seen_options.insert(option),
            InvalidQuizSnafu {
                message: format!("question {} repeats option {}", q.id, option)
            }
        );
        non_empty(&o.text, &format!("{}.{}.text", q.id, o.id))?;
    }
    Ok(())
}

fn validate_result_copy(rt: ResultType, r: &QuizResultCopy) -> QuizResult<()> {
    let fields = [
        (&r.title_bn, "titleBn"),
        (&r.title_en_tag, "titleEnTag"),
        (&r.roast1, "roast1"),
        (&r.roast2, "roast2"),
        (&r.tip, "tip"),
        (&r.nudge, "nudge"),
        (&r.share_caption_template, "shareCaptionTemplate"),
    ];
    for (value, name) in fields {
        non_empty(value, &format!("results.{}.{}", rt, name))?;
    }
    ensure!(
        ACCENT_COLOR.is_match(&r.accent_color),
        InvalidQuizSnafu {
            message: format!(
                "results.{}.accentColor {:?} is not a #RRGGBB color",
                rt, r.accent_color
            )
        }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled_copy() -> QuizData {
        bundled_quiz().unwrap().clone()
    }

    #[test]
    fn bundled_quiz_is_valid() {
        let quiz = bundled_quiz().unwrap();
        assert_eq!(quiz.questions.len(), NUM_QUESTIONS);
        assert_eq!(
            quiz.question_ids(),
            (1..=9).map(|i| format!("q{}", i)).collect::<Vec<String>>()
        );
        for rt in ResultType::ALL {
            assert!(quiz.result_copy(rt).is_some(), "{}", rt);
        }
    }

    #[test]
    fn share_caption_appends_hashtags() {
        let mut quiz = bundled_copy();
        quiz.meta.share_hashtags = vec!["#Vote".to_string(), "#Quiz".to_string()];
        if let Some(r) = quiz.results.get_mut("SealSniper") {
            r.share_caption_template = "I stamp with precision.".to_string();
        }
        assert_eq!(
            quiz.share_caption(ResultType::SealSniper),
            Some("I stamp with precision. #Vote #Quiz".to_string())
        );
    }

    #[test]
    fn wrong_number_of_questions() {
        let mut quiz = bundled_copy();
        quiz.questions.pop();
        assert!(matches!(
            validate_quiz_data(&quiz),
            Err(QuizError::InvalidQuiz { .. })
        ));
    }

    #[test]
    fn duplicated_question_ids() {
        let mut quiz = bundled_copy();
        quiz.questions[8].id = "q1".to_string();
        assert!(validate_quiz_data(&quiz).is_err());
    }

    #[test]
    fn invalid_options() {
        let mut quiz = bundled_copy();
        quiz.questions[2].options[3].id = "E".to_string();
        assert!(validate_quiz_data(&quiz).is_err());

        let mut quiz = bundled_copy();
        quiz.questions[2].options[3].id = "A".to_string();
        assert!(validate_quiz_data(&quiz).is_err());

        let mut quiz = bundled_copy();
        quiz.questions[0].options.pop();
        assert!(validate_quiz_data(&quiz).is_err());
    }

    #[test]
    fn missing_result_copy() {
        let mut quiz = bundled_copy();
        quiz.results.remove("PosterNostalgic2");
        assert!(validate_quiz_data(&quiz).is_err());
    }

    #[test]
    fn extra_result_copy_is_tolerated() {
        let mut quiz = bundled_copy();
        let extra = quiz.results["QueueZen"].clone();
        quiz.results.insert("PosterNostalgic".to_string(), extra);
        assert!(validate_quiz_data(&quiz).is_ok());
    }

    #[test]
    fn result_keys_match_exactly() {
        let mut quiz = bundled_copy();
        assert!(unused_result_keys(&quiz).is_empty());
        let extra = quiz.results["ProcessPro"].clone();
        quiz.results.insert("processpro".to_string(), extra.clone());
        quiz.results.insert("Voter".to_string(), extra);
        assert_eq!(unused_result_keys(&quiz), vec!["Voter", "processpro"]);
        assert!(validate_quiz_data(&quiz).is_ok());
    }

    #[test]
    fn accent_colors() {
        let mut quiz = bundled_copy();
        if let Some(r) = quiz.results.get_mut("QueueZen") {
            r.accent_color = "#12345".to_string();
        }
        assert!(validate_quiz_data(&quiz).is_err());

        let mut quiz = bundled_copy();
        if let Some(r) = quiz.results.get_mut("QueueZen") {
            r.accent_color = "#A0b1C2".to_string();
        }
        assert!(validate_quiz_data(&quiz).is_ok());
    }

    #[test]
    fn empty_fields_are_rejected() {
        let mut quiz = bundled_copy();
        quiz.questions[4].fact_bubble = String::new();
        assert!(validate_quiz_data(&quiz).is_err());

        let mut quiz = bundled_copy();
        quiz.meta.share_hashtags.clear();
        assert!(validate_quiz_data(&quiz).is_err());
    }

    #[test]
    fn unknown_illustration_is_a_parsing_error() {
        let js = serde_json::to_string(&bundled_copy())
            .unwrap()
            .replacen("\"stamp\"", "\"balloon\"", 1);
        let res = parse_quiz_data(&js, "test");
        assert!(matches!(res, Err(QuizError::ParsingJson { .. })));
        assert!(res.unwrap_err().to_string().contains("balloon"));
    }
}
