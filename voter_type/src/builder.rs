pub use crate::config::*;

/// A builder for collecting answers before scoring them.
///
/// ```
/// pub use voter_type::builder::Builder;
/// # use voter_type::{ResultType, ScoringErrors};
///
/// let questions: Vec<String> = (1..=9).map(|i| format!("q{}", i)).collect();
/// let mut builder = Builder::new().required_questions(&questions);
///
/// for q in questions.iter() {
///     builder.answer(q, "A");
/// }
///
/// let outcome = builder.score()?;
/// assert_eq!(outcome.winner, ResultType::ProcessPro);
///
/// # Ok::<(), ScoringErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _required: Option<Vec<String>>,
    pub(crate) _answers: Answers,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Every question listed here must be answered when calling `score`.
    pub fn required_questions(self, question_ids: &[String]) -> Builder {
        Builder {
            _required: Some(question_ids.to_vec()),
            _answers: self._answers,
        }
    }

    /// Records an answer. Answering the same question again replaces the
    /// previous letter.
    pub fn answer(&mut self, question_id: &str, letter: &str) {
        if let Some(previous) = self._answers.insert(question_id, letter) {
            log::debug!(
                "Builder::answer: {} changed from {:?} to {:?}",
                question_id,
                previous,
                letter
            );
        }
    }

    /// Records every pair of `(question id, letter)`.
    pub fn answer_all<'a, I>(&mut self, answers: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (qid, letter) in answers {
            self.answer(qid, letter);
        }
    }

    pub fn answers(&self) -> &Answers {
        &self._answers
    }

    pub fn score(&self) -> Result<QuizOutcome, ScoringErrors> {
        crate::score_quiz(&self._answers, self._required.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_answers_replace_earlier_ones() {
        let mut builder = Builder::new();
        builder.answer("q5", "A");
        builder.answer("q5", "C");
        assert_eq!(builder.answers().get("q5"), Some("C"));
        assert_eq!(builder.answers().len(), 1);
        let outcome = builder.score().unwrap();
        assert_eq!(outcome.winner, ResultType::ConfusionCute);
    }

    #[test]
    fn required_questions_are_checked() {
        let required = vec!["q1".to_string(), "q2".to_string()];
        let mut builder = Builder::new().required_questions(&required);
        builder.answer_all(vec![("q1", "B")]);
        assert_eq!(
            builder.score(),
            Err(ScoringErrors::IncompleteAnswers(vec!["q2".to_string()]))
        );
        builder.answer("q2", "B");
        let outcome = builder.score().unwrap();
        assert_eq!(outcome.winner, ResultType::InfoDetective);
        assert_eq!(outcome.breakdown.total[&ResultType::InfoDetective], 2);
    }
}
