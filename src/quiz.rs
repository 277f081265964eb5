use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use voter_type::builder::Builder;
use voter_type::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::quiz::dataset::*;
use crate::quiz::run_config::*;

mod dataset;
mod io_common;
mod io_csv;
mod io_excel;
mod io_json;
mod run_config;

pub const DEFAULT_ID_COLUMN: &str = "id";
const DEFAULT_RUN_NAME: &str = "votertype";
const CLI_RESPONSE_ID: &str = "cli";
const STDOUT: &str = "stdout";

#[derive(Debug, Snafu)]
pub enum QuizError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON in {path}: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No data found in the Excel file {path}"))]
    EmptyExcel { path: String },
    #[snafu(display(
        "The Excel file {path} has several worksheets, pick one of {names:?} with --excel-worksheet-name"
    ))]
    AmbiguousExcelWorksheet { path: String, names: Vec<String> },
    #[snafu(display("Unexpected cell at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Unknown input provider {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Cannot guess the input type of {path}, use --input-type"))]
    UnknownInputType { path: String },
    #[snafu(display("Invalid quiz content: {message}"))]
    InvalidQuiz { message: String },
    #[snafu(display("Invalid answers: {message}"))]
    InvalidAnswers { message: String },
    #[snafu(display("No answers to score: use --answers, --input or --config"))]
    MissingInput {},
    #[snafu(display("Missing parent directory for {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("{source}"))]
    UnknownResult { source: UnknownResultType },
    #[snafu(display("Could not score the answers of {id}: {source}"))]
    Scoring { source: ScoringErrors, id: String },
    #[snafu(display("Difference detected between the computed summary and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type QuizResult<T> = Result<T, QuizError>;

/// One set of answers, as parsed by the readers.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedResponse {
    pub id: String,
    /// Pairs of (question id, letter), in the order they were read.
    pub answers: Vec<(String, String)>,
}

/// The options of a run, once the command line and the configuration file are
/// merged. Paths are resolved.
#[derive(Eq, PartialEq, Debug, Clone)]
struct RunSettings {
    name: String,
    quiz_path: Option<String>,
    cli_answers: Vec<String>,
    sources: Vec<(String, ResponseSource)>,
    out: Option<String>,
    reference: Option<String>,
}

fn resolve_path(root: &Path, p: &str) -> String {
    let pb: PathBuf = [root, Path::new(p)].iter().collect();
    pb.display().to_string()
}

fn resolve_settings(args: &Args) -> QuizResult<RunSettings> {
    let (config, root) = match args.config.as_deref() {
        Some(config_path) => {
            let config = read_run_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu { path: config_path })?
                .to_path_buf();
            (Some(config), root)
        }
        None => (None, PathBuf::new()),
    };

    let quiz_path = match (&args.quiz, &config) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(c)) => c.quiz_path.as_deref().map(|p| resolve_path(&root, p)),
        (None, None) => None,
    };

    let sources: Vec<(String, ResponseSource)> = if let Some(input) = &args.input {
        let provider = match (&args.input_type, InputType::guess_provider(input)) {
            (Some(t), _) => t.clone(),
            (None, Some(t)) => t.to_string(),
            (None, None) => return UnknownInputTypeSnafu { path: input }.fail(),
        };
        vec![(
            input.clone(),
            ResponseSource {
                provider,
                file_path: input.clone(),
                id_column: args.id_column.clone(),
                excel_worksheet_name: args.excel_worksheet_name.clone(),
            },
        )]
    } else if let Some(c) = &config {
        c.response_sources
            .iter()
            .map(|s| (resolve_path(&root, &s.file_path), s.clone()))
            .collect()
    } else {
        vec![]
    };

    let out = match (&args.out, &config) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(c)) => c
            .output_settings
            .output_path
            .as_deref()
            .map(|p| if p == STDOUT { p.to_string() } else { resolve_path(&root, p) }),
        (None, None) => None,
    };

    let name = config
        .as_ref()
        .and_then(|c| c.output_settings.run_name.clone())
        .unwrap_or_else(|| DEFAULT_RUN_NAME.to_string());

    Ok(RunSettings {
        name,
        quiz_path,
        cli_answers: args.answers.clone().unwrap_or_default(),
        sources,
        out,
        reference: args.reference.clone(),
    })
}

fn load_quiz(quiz_path: &Option<String>) -> QuizResult<QuizData> {
    match quiz_path {
        Some(p) => read_quiz_data(p),
        None => {
            debug!("load_quiz: using the bundled quiz");
            Ok(bundled_quiz()?.clone())
        }
    }
}

fn read_responses(path: &str, source: &ResponseSource) -> QuizResult<Vec<ParsedResponse>> {
    info!("Attempting to read answers from {:?}", path);
    match InputType::from_provider(&source.provider)? {
        InputType::Json => io_json::read_json_responses(path),
        InputType::Csv => io_csv::read_csv_responses(path, source),
        InputType::Xlsx => io_excel::read_excel_responses(path, source),
    }
}

fn collect_responses(settings: &RunSettings) -> QuizResult<Vec<ParsedResponse>> {
    let mut res: Vec<ParsedResponse> = Vec::new();
    if !settings.cli_answers.is_empty() {
        let answers = settings
            .cli_answers
            .iter()
            .map(|p| io_common::parse_answer_pair(p))
            .collect::<QuizResult<Vec<(String, String)>>>()?;
        res.push(ParsedResponse {
            id: CLI_RESPONSE_ID.to_string(),
            answers,
        });
    }
    for (path, source) in settings.sources.iter() {
        let mut file_data = read_responses(path, source)?;
        res.append(&mut file_data);
    }
    ensure!(!res.is_empty(), MissingInputSnafu {});
    Ok(res)
}

fn score_response(pr: &ParsedResponse, question_ids: &[String]) -> QuizResult<QuizOutcome> {
    let mut builder = Builder::new().required_questions(question_ids);
    builder.answer_all(pr.answers.iter().map(|(q, l)| (q.as_str(), l.as_str())));
    let outcome = builder.score().context(ScoringSnafu { id: &pr.id })?;
    info!(
        "{}: {} (total {})",
        pr.id,
        outcome.winner,
        outcome
            .breakdown
            .total
            .get(&outcome.winner)
            .cloned()
            .unwrap_or(0)
    );
    Ok(outcome)
}

fn tally_to_json(tally: &Tally) -> JSValue {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for (rt, count) in tally.iter() {
        m.insert(rt.as_str().to_string(), json!(count));
    }
    JSValue::Object(m)
}

fn outcome_to_json(id: &str, outcome: &QuizOutcome) -> JSValue {
    let ranking: Vec<&str> = outcome.ranking.iter().map(|rt| rt.as_str()).collect();
    json!({
        "id": id,
        "winner": outcome.winner.as_str(),
        "ranking": ranking,
        "scores": {
            "total": tally_to_json(&outcome.breakdown.total),
            "q5q6": tally_to_json(&outcome.breakdown.q5q6),
            "q4": tally_to_json(&outcome.breakdown.q4),
        }
    })
}

fn build_summary_js(run_name: &str, quiz: &QuizData, scored: &[(String, QuizOutcome)]) -> JSValue {
    let mut distribution: Tally = ResultType::ALL.iter().map(|rt| (*rt, 0)).collect();
    for (_, outcome) in scored.iter() {
        if let Some(c) = distribution.get_mut(&outcome.winner) {
            *c += 1;
        }
    }
    let results: Vec<JSValue> = scored
        .iter()
        .map(|(id, outcome)| outcome_to_json(id, outcome))
        .collect();
    json!({
        "config": {
            "run": run_name,
            "quiz": quiz.meta.title,
            "responses": scored.len(),
        },
        "results": results,
        "distribution": tally_to_json(&distribution),
    })
}

fn write_summary(out: &Option<String>, pretty_js: &str) -> QuizResult<()> {
    match out.as_deref() {
        None | Some(STDOUT) => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingFileSnafu { path })?;
        }
    }
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> QuizResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("check_reference: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(WritingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("The summary matches the reference {:?}", reference_path);
    Ok(())
}

fn format_result_card(quiz: &QuizData, rt: ResultType) -> String {
    let image = rt.image();
    let mut lines: Vec<String> = vec![format!("{} ({})", rt, rt.slug())];
    if let Some(copy) = quiz.result_copy(rt) {
        lines.push(format!("{} / {}", copy.title_bn, copy.title_en_tag));
        lines.push(copy.roast1.clone());
        lines.push(copy.roast2.clone());
        lines.push(format!("Tip: {}", copy.tip));
        lines.push(copy.nudge.clone());
        lines.push(format!("Accent color: {}", copy.accent_color));
        lines.push(format!(
            "Illustration: {:?}",
            copy.illustration_variant
        ));
    }
    if let Some(caption) = quiz.share_caption(rt) {
        lines.push(format!("Caption: {}", caption));
    }
    lines.push(format!(
        "Image: {} ({} / {})",
        image.src, image.alt_en, image.alt_bn
    ));
    lines.join("\n")
}

/// Runs the program: either prints a result card, or scores all the answers
/// and writes the summary.
pub fn run_quiz(args: &Args) -> QuizResult<()> {
    let settings = resolve_settings(args)?;
    info!("run_quiz: settings: {:?}", settings);

    let quiz = load_quiz(&settings.quiz_path)?;

    if let Some(label) = args.result.as_deref() {
        let rt = label
            .parse::<ResultType>()
            .context(UnknownResultSnafu {})?;
        println!("{}", format_result_card(&quiz, rt));
        return Ok(());
    }

    let question_ids = quiz.question_ids();
    let responses = collect_responses(&settings)?;
    info!("Scoring {} sets of answers", responses.len());

    let mut scored: Vec<(String, QuizOutcome)> = Vec::new();
    for pr in responses.iter() {
        let outcome = score_response(pr, &question_ids)?;
        scored.push((pr.id.clone(), outcome));
    }

    let summary_js = build_summary_js(&settings.name, &quiz, &scored);
    let pretty_js_stats =
        serde_json::to_string_pretty(&summary_js).context(WritingJsonSnafu {})?;
    write_summary(&settings.out, &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(reference_path) = settings.reference.as_deref() {
        check_reference(reference_path, &pretty_js_stats)?;
    }
    Ok(())
}
