mod config;
pub mod assets;
pub mod builder;
pub mod manual;

use log::{debug, info};

use std::{
    cmp::Ordering,
    ops::AddAssign,
};

pub use crate::config::*;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
struct ScoreCount(u64);

impl ScoreCount {
    const EMPTY: ScoreCount = ScoreCount(0);
}

impl std::iter::Sum for ScoreCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        ScoreCount(iter.map(|sc| sc.0).sum())
    }
}

impl AddAssign for ScoreCount {
    fn add_assign(&mut self, rhs: ScoreCount) {
        self.0 += rhs.0;
    }
}

// One counter per category, indexed by the position of the category.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct Accumulator([ScoreCount; NUM_RESULT_TYPES]);

impl Accumulator {
    const EMPTY: Accumulator = Accumulator([ScoreCount::EMPTY; NUM_RESULT_TYPES]);

    fn credit(&mut self, rt: ResultType, weight: ScoreCount) {
        self.0[rt.position()] += weight;
    }

    fn get(&self, rt: ResultType) -> ScoreCount {
        self.0[rt.position()]
    }

    fn to_tally(self) -> Tally {
        ResultType::ALL
            .iter()
            .map(|rt| (*rt, self.get(*rt).0))
            .collect()
    }
}

// The three axes are fed by the same credit events but are kept separately.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct Accumulators {
    total: Accumulator,
    q5q6: Accumulator,
    q4: Accumulator,
}

// ******** Scoring tables *********

/// Questions that do not weigh 1.
const QUESTION_WEIGHTS: [(&str, u64); 3] = [("q4", 2), ("q5", 2), ("q6", 2)];

const DEFAULT_WEIGHT: u64 = 1;

/// Questions feeding the first tie-break axis.
const Q5Q6_QUESTIONS: [&str; 2] = ["q5", "q6"];

/// Question feeding the second tie-break axis.
const Q4_QUESTION: &str = "q4";

/// The weight applied to every credit granted by the given question.
pub fn question_weight(question_id: &str) -> u64 {
    QUESTION_WEIGHTS
        .iter()
        .find(|(qid, _)| *qid == question_id)
        .map(|(_, w)| *w)
        .unwrap_or(DEFAULT_WEIGHT)
}

/// The categories credited by choosing `option` for `question_id`.
///
/// Unknown questions credit nothing.
pub fn credited_categories(question_id: &str, option: AnswerOption) -> &'static [ResultType] {
    use AnswerOption::*;
    use ResultType::*;
    match (question_id, option) {
        ("q1", A) => &[ProcessPro],
        ("q1", B) => &[InfoDetective],
        ("q1", C) => &[LastMinuteSprinter, ConfusionCute],
        ("q1", D) => &[ConfusionCute],

        ("q2", A) => &[ProcessPro, PhoneFreeHero],
        ("q2", B) => &[InfoDetective],
        ("q2", C) => &[QueueZen, PosterNostalgic2],
        ("q2", D) => &[ConfusionCute, LastMinuteSprinter],

        ("q3", A) => &[ProcessPro, QueueZen],
        ("q3", B) => &[QueueZen],
        ("q3", C) => &[LastMinuteSprinter],
        ("q3", D) => &[ConfusionCute],

        ("q4", A) => &[ProcessPro, PhoneFreeHero],
        ("q4", B) => &[ConfusionCute],
        ("q4", C) => &[LastMinuteSprinter],
        ("q4", D) => &[ConfusionCute],

        ("q5", A) => &[ProcessPro],
        ("q5", B) => &[QueueZen],
        ("q5", C) => &[ConfusionCute],
        ("q5", D) => &[LastMinuteSprinter, ConfusionCute],

        ("q6", A) => &[SealSniper, ProcessPro],
        ("q6", B) => &[SealSniper, QueueZen],
        ("q6", C) => &[ProcessPro],
        ("q6", D) => &[LastMinuteSprinter, QueueZen],

        ("q7", A) => &[ProcessPro, SealSniper],
        ("q7", B) => &[ConfusionCute],
        ("q7", C) => &[ConfusionCute, PosterNostalgic2],
        ("q7", D) => &[LastMinuteSprinter],

        ("q8", A) => &[QueueZen, ProcessPro],
        ("q8", B) => &[PosterNostalgic2],
        ("q8", C) => &[InfoDetective],
        ("q8", D) => &[ProcessPro, InfoDetective],

        ("q9", A) => &[ProcessPro, QueueZen],
        ("q9", B) => &[LastMinuteSprinter, ConfusionCute],
        ("q9", C) => &[InfoDetective],
        ("q9", D) => &[PhoneFreeHero, QueueZen],

        _ => &[],
    }
}

/// Scores a set of answers and picks the winning category.
///
/// Arguments:
/// * `answers` the letter chosen for each question. Unknown questions and
/// letters are accepted and earn nothing.
/// * `required_questions` if provided, every one of these questions must have
/// an answer, otherwise the scoring fails with `ScoringErrors::IncompleteAnswers`.
///
/// The winner is the category with the highest total. Ties are broken by the
/// credits from q5 and q6, then by the credits from q4, then by the order of
/// `ResultType::ALL`. There is always exactly one winner.
pub fn score_quiz(
    answers: &Answers,
    required_questions: Option<&[String]>,
) -> Result<QuizOutcome, ScoringErrors> {
    debug!(
        "score_quiz: {:?} answers, required questions: {:?}",
        answers.len(),
        required_questions
    );

    if let Some(required) = required_questions {
        let missing = find_missing_answers(answers, required);
        if !missing.is_empty() {
            info!("score_quiz: missing answers for {:?}", missing);
            return Err(ScoringErrors::IncompleteAnswers(missing));
        }
    }

    let acc = accumulate(answers);
    let ranking = rank_categories(&acc);
    // ResultType::ALL is never empty.
    let winner = ranking[0];
    debug!(
        "score_quiz: winner: {:?} total: {:?} ranking: {:?}",
        winner,
        acc.total.get(winner),
        ranking
    );

    Ok(QuizOutcome {
        winner,
        ranking,
        breakdown: ScoreBreakdown {
            total: acc.total.to_tally(),
            q5q6: acc.q5q6.to_tally(),
            q4: acc.q4.to_tally(),
        },
    })
}

// Returned in the order of the required questions.
fn find_missing_answers(answers: &Answers, required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|qid| !answers.is_answered(qid))
        .cloned()
        .collect()
}

fn accumulate(answers: &Answers) -> Accumulators {
    let mut acc = Accumulators {
        total: Accumulator::EMPTY,
        q5q6: Accumulator::EMPTY,
        q4: Accumulator::EMPTY,
    };
    for (qid, letter) in answers.iter() {
        let targets: &[ResultType] = match AnswerOption::parse(letter) {
            Some(option) => credited_categories(qid, option),
            None => &[],
        };
        if targets.is_empty() {
            debug!("accumulate: {}={:?} credits nothing", qid, letter);
            continue;
        }
        let weight = ScoreCount(question_weight(qid));
        let on_q5q6 = Q5Q6_QUESTIONS.contains(&qid);
        let on_q4 = qid == Q4_QUESTION;
        for rt in targets {
            acc.total.credit(*rt, weight);
            if on_q5q6 {
                acc.q5q6.credit(*rt, weight);
            }
            if on_q4 {
                acc.q4.credit(*rt, weight);
            }
        }
        debug!(
            "accumulate: {}={} credits {:?} with weight {}",
            qid, letter, targets, weight.0
        );
    }
    acc
}

// Higher total first, then higher q5q6, then higher q4, then enumeration order.
fn compare_categories(a: ResultType, b: ResultType, acc: &Accumulators) -> Ordering {
    acc.total
        .get(b)
        .cmp(&acc.total.get(a))
        .then_with(|| acc.q5q6.get(b).cmp(&acc.q5q6.get(a)))
        .then_with(|| acc.q4.get(b).cmp(&acc.q4.get(a)))
        .then_with(|| a.position().cmp(&b.position()))
}

fn rank_categories(acc: &Accumulators) -> Vec<ResultType> {
    let mut sorted = ResultType::ALL.to_vec();
    sorted.sort_by(|a, b| compare_categories(*a, *b, acc));
    sorted
}
