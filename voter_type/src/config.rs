// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The outcomes of the quiz.
///
/// The order of declaration is significant: it is the last tie-break
/// between two categories with identical scores, the first one listed wins.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum ResultType {
    ProcessPro,
    QueueZen,
    ConfusionCute,
    SealSniper,
    PhoneFreeHero,
    InfoDetective,
    PosterNostalgic2,
    LastMinuteSprinter,
}

pub const NUM_RESULT_TYPES: usize = 8;

impl ResultType {
    /// All the categories, in tie-break order.
    pub const ALL: [ResultType; NUM_RESULT_TYPES] = [
        ResultType::ProcessPro,
        ResultType::QueueZen,
        ResultType::ConfusionCute,
        ResultType::SealSniper,
        ResultType::PhoneFreeHero,
        ResultType::InfoDetective,
        ResultType::PosterNostalgic2,
        ResultType::LastMinuteSprinter,
    ];

    /// The exact label of the category, as used for asset and copy lookups.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::ProcessPro => "ProcessPro",
            ResultType::QueueZen => "QueueZen",
            ResultType::ConfusionCute => "ConfusionCute",
            ResultType::SealSniper => "SealSniper",
            ResultType::PhoneFreeHero => "PhoneFreeHero",
            ResultType::InfoDetective => "InfoDetective",
            ResultType::PosterNostalgic2 => "PosterNostalgic2",
            ResultType::LastMinuteSprinter => "LastMinuteSprinter",
        }
    }

    /// Position in the enumeration. Lower positions win ties.
    pub fn position(&self) -> usize {
        *self as usize
    }

    /// Lower-case form of the label, suitable for a URL path segment.
    pub fn slug(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }

    /// Resolves a label or a slug. The match ignores case and surrounding
    /// whitespace.
    pub fn from_label(label: &str) -> Option<ResultType> {
        let normalized = label.trim();
        ResultType::ALL
            .iter()
            .find(|rt| rt.as_str().eq_ignore_ascii_case(normalized))
            .copied()
    }
}

impl Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name any result type.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct UnknownResultType(pub String);

impl Error for UnknownResultType {}

impl Display for UnknownResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown result type {:?}", self.0)
    }
}

impl FromStr for ResultType {
    type Err = UnknownResultType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResultType::from_label(s).ok_or_else(|| UnknownResultType(s.to_string()))
    }
}

/// One of the four options of a question.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum AnswerOption {
    A,
    B,
    C,
    D,
}

impl AnswerOption {
    pub const ALL: [AnswerOption; 4] = [
        AnswerOption::A,
        AnswerOption::B,
        AnswerOption::C,
        AnswerOption::D,
    ];

    /// Strict parsing: only the exact upper-case letters are recognized.
    pub fn parse(letter: &str) -> Option<AnswerOption> {
        match letter {
            "A" => Some(AnswerOption::A),
            "B" => Some(AnswerOption::B),
            "C" => Some(AnswerOption::C),
            "D" => Some(AnswerOption::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerOption::A => "A",
            AnswerOption::B => "B",
            AnswerOption::C => "C",
            AnswerOption::D => "D",
        }
    }
}

impl Display for AnswerOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of answers: at most one letter per question id.
///
/// Letters are kept as written by the caller. Values that are not one of
/// `A`, `B`, `C`, `D` are accepted here and simply earn nothing when scored.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Answers {
    choices: BTreeMap<String, String>,
}

impl Answers {
    pub fn new() -> Answers {
        Answers::default()
    }

    /// Records the letter for a question, returning the previous one if the
    /// question was already answered.
    pub fn insert(&mut self, question_id: &str, letter: &str) -> Option<String> {
        self.choices
            .insert(question_id.to_string(), letter.to_string())
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.choices.get(question_id).map(|s| s.as_str())
    }

    /// A question counts as answered if it has a non-empty letter.
    pub fn is_answered(&self, question_id: &str) -> bool {
        matches!(self.get(question_id), Some(l) if !l.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.choices.iter().map(|(q, l)| (q.as_str(), l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl<Q: Into<String>, L: Into<String>> FromIterator<(Q, L)> for Answers {
    fn from_iter<I: IntoIterator<Item = (Q, L)>>(iter: I) -> Self {
        Answers {
            choices: iter
                .into_iter()
                .map(|(q, l)| (q.into(), l.into()))
                .collect(),
        }
    }
}

// ******** Output data structures *********

/// A score per category. Always contains every category, iterated in
/// enumeration order.
pub type Tally = BTreeMap<ResultType, u64>;

/// The three accumulators built while scoring.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoreBreakdown {
    /// Weighted credits over all the questions.
    pub total: Tally,
    /// Weighted credits from q5 and q6 only. First tie-break axis.
    pub q5q6: Tally,
    /// Weighted credits from q4 only. Second tie-break axis.
    pub q4: Tally,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuizOutcome {
    pub winner: ResultType,
    /// Every category, from the winner down to the last one.
    pub ranking: Vec<ResultType>,
    pub breakdown: ScoreBreakdown,
}

/// Errors that prevent the scoring from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringErrors {
    /// Some required questions have no answer. Contains their ids, in the
    /// order they were required.
    IncompleteAnswers(Vec<String>),
}

impl Error for ScoringErrors {}

impl Display for ScoringErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringErrors::IncompleteAnswers(missing) => write!(
                f,
                "Incomplete answers provided to score_quiz: missing {}",
                missing.join(", ")
            ),
        }
    }
}
