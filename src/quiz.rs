use crate::models::{CategoryFilter, Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Browsing,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassTier {
    Perfect,
    Good,
    KeepPracticing,
}

impl PassTier {
    /// Bands are checked from the top, so a perfect score is never reported as `Good`.
    pub fn for_score(correct: usize, total: usize) -> Self {
        if correct == total {
            PassTier::Perfect
        } else if correct * 10 >= total * 7 {
            PassTier::Good
        } else {
            PassTier::KeepPracticing
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PassTier::Perfect => "Perfect score! Excellent work!",
            PassTier::Good => "Good performance! Keep studying!",
            PassTier::KeepPracticing => "Keep practicing, you'll get there!",
        }
    }
}

/// `round(100 * correct / total)` with half-up rounding, in integer arithmetic.
pub fn score_percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    ((200 * correct + total) / (2 * total)) as u32
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    pub filter: CategoryFilter,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub selected: Option<String>,
    pub correct_count: usize,
    pub finished: bool,
}

impl QuizSession {
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_revealed(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Fraction of the session reached, counting the current question.
    pub fn progress_ratio(&self) -> f64 {
        (self.current_index + 1) as f64 / self.questions.len() as f64
    }

    pub fn percentage(&self) -> u32 {
        score_percentage(self.correct_count, self.total())
    }

    pub fn tier(&self) -> PassTier {
        PassTier::for_score(self.correct_count, self.total())
    }
}

/// Single-player exam flow over a fixed question bank.
#[derive(Debug)]
pub struct QuizEngine {
    bank: Vec<Question>,
    active_filter: Option<CategoryFilter>,
    session: Option<QuizSession>,
}

impl QuizEngine {
    pub fn new(bank: Vec<Question>) -> Self {
        Self {
            bank,
            active_filter: None,
            session: None,
        }
    }

    pub fn bank(&self) -> &[Question] {
        &self.bank
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> QuizPhase {
        match &self.session {
            None => QuizPhase::Browsing,
            Some(s) if s.finished => QuizPhase::Finished,
            Some(_) => QuizPhase::InProgress,
        }
    }

    /// Questions matching `filter`, in bank order.
    pub fn filtered(&self, filter: &CategoryFilter) -> Vec<&Question> {
        self.bank.iter().filter(|q| filter.matches(q)).collect()
    }

    pub fn can_start(&self, filter: &CategoryFilter) -> bool {
        self.bank.iter().any(|q| filter.matches(q))
    }

    /// Begins a fresh session. Returns `false` without touching state when
    /// nothing matches the filter.
    pub fn start(&mut self, filter: CategoryFilter) -> bool {
        let questions: Vec<Question> = self
            .bank
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect();

        if questions.is_empty() {
            crate::logger::log(&format!(
                "Refusing to start quiz: no questions for {:?}",
                filter.label()
            ));
            return false;
        }

        crate::logger::log(&format!(
            "Starting quiz '{}' with {} questions",
            filter.label(),
            questions.len()
        ));

        self.active_filter = Some(filter.clone());
        self.session = Some(QuizSession {
            filter,
            questions,
            current_index: 0,
            selected: None,
            correct_count: 0,
            finished: false,
        });
        true
    }

    /// Records the first selection for the current question and returns its
    /// explanation. Later calls for the same question are ignored.
    pub fn answer(&mut self, option: &str) -> Option<&str> {
        let session = self.session.as_mut()?;
        if session.finished || session.selected.is_some() {
            return None;
        }

        session.selected = Some(option.to_string());
        if session.current_question().is_correct(option) {
            session.correct_count += 1;
        }

        Some(session.current_question().explanation.as_str())
    }

    pub fn answer_index(&mut self, index: usize) -> Option<&str> {
        let option = self
            .session
            .as_ref()?
            .current_question()
            .options
            .get(index)?
            .clone();
        self.answer(&option)
    }

    /// Moves to the next question, or finishes at the last one. Only a
    /// revealed question can be advanced past.
    pub fn advance(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.finished || session.selected.is_none() {
            return;
        }

        if session.is_last_question() {
            session.finished = true;
            crate::logger::log(&format!(
                "Quiz finished: {}/{}",
                session.correct_count,
                session.total()
            ));
        } else {
            session.current_index += 1;
            session.selected = None;
        }
    }

    pub fn restart(&mut self) -> bool {
        match self.active_filter.clone() {
            Some(filter) => self.start(filter),
            None => false,
        }
    }

    pub fn back_to_browse(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::builtin_questions;

    fn engine() -> QuizEngine {
        QuizEngine::new(builtin_questions())
    }

    fn wrong_option(question: &Question) -> String {
        question
            .options
            .iter()
            .find(|o| **o != question.answer)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_starts_in_browsing() {
        let engine = engine();
        assert_eq!(engine.phase(), QuizPhase::Browsing);
        assert!(engine.session().is_none());
    }

    #[test]
    fn test_start_filters_and_preserves_order() {
        let mut engine = engine();
        assert!(engine.start(CategoryFilter::Category("Law of Tort".to_string())));

        let session = engine.session().unwrap();
        let ids: Vec<u32> = session.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.selected, None);
        assert_eq!(session.correct_count, 0);
        assert_eq!(engine.phase(), QuizPhase::InProgress);
    }

    #[test]
    fn test_start_with_empty_filter_is_noop() {
        let mut engine = engine();
        let filter = CategoryFilter::Category("Jurisprudence".to_string());
        assert!(!engine.can_start(&filter));
        assert!(!engine.start(filter));
        assert_eq!(engine.phase(), QuizPhase::Browsing);
    }

    #[test]
    fn test_empty_filter_does_not_clobber_running_session() {
        let mut engine = engine();
        engine.start(CategoryFilter::All);
        engine.answer_index(0);
        assert!(!engine.start(CategoryFilter::Category("Family Law".to_string())));
        assert_eq!(engine.session().unwrap().total(), 5);
        assert!(engine.session().unwrap().is_revealed());
    }

    #[test]
    fn test_answer_scores_correct_option_and_returns_explanation() {
        let mut engine = engine();
        engine.start(CategoryFilter::All);

        let explanation = engine.answer("Section 36").map(str::to_string);
        assert!(explanation.unwrap().starts_with("Section 36 CFRN 1999"));

        let session = engine.session().unwrap();
        assert_eq!(session.correct_count, 1);
        assert_eq!(session.selected.as_deref(), Some("Section 36"));
        assert!(session.is_revealed());
    }

    #[test]
    fn test_answer_is_idempotent() {
        let mut engine = engine();
        engine.start(CategoryFilter::All);

        engine.answer("Section 33");
        assert!(engine.answer("Section 36").is_none());
        assert!(engine.answer("Section 33").is_none());

        let session = engine.session().unwrap();
        assert_eq!(session.selected.as_deref(), Some("Section 33"));
        assert_eq!(session.correct_count, 0);
    }

    #[test]
    fn test_answer_without_session_is_noop() {
        let mut engine = engine();
        assert!(engine.answer("Section 36").is_none());
        assert!(engine.answer_index(0).is_none());
    }

    #[test]
    fn test_answer_index_out_of_range_is_noop() {
        let mut engine = engine();
        engine.start(CategoryFilter::All);
        assert!(engine.answer_index(9).is_none());
        assert!(!engine.session().unwrap().is_revealed());
    }

    #[test]
    fn test_advance_requires_reveal() {
        let mut engine = engine();
        engine.start(CategoryFilter::All);
        engine.advance();
        assert_eq!(engine.session().unwrap().current_index, 0);
    }

    #[test]
    fn test_advance_clears_selection() {
        let mut engine = engine();
        engine.start(CategoryFilter::All);
        engine.answer_index(0);
        engine.advance();

        let session = engine.session().unwrap();
        assert_eq!(session.current_index, 1);
        assert!(session.selected.is_none());
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_n_advances_finish_a_session_of_n() {
        let filters = [
            CategoryFilter::All,
            CategoryFilter::Category("Law of Tort".to_string()),
            CategoryFilter::Category("Land Law".to_string()),
        ];

        for filter in filters {
            let mut engine = engine();
            engine.start(filter.clone());
            let n = engine.session().unwrap().total();

            for step in 0..n {
                assert_eq!(engine.phase(), QuizPhase::InProgress, "step {}", step);
                engine.answer_index(0);
                engine.advance();
            }
            assert_eq!(engine.phase(), QuizPhase::Finished, "{:?}", filter);
        }
    }

    #[test]
    fn test_finished_session_ignores_answer_and_advance() {
        let mut engine = engine();
        engine.start(CategoryFilter::Category("Land Law".to_string()));
        engine.answer("Governor of the State");
        engine.advance();
        assert_eq!(engine.phase(), QuizPhase::Finished);

        engine.advance();
        assert!(engine.answer("Governor of the State").is_none());
        let session = engine.session().unwrap();
        assert_eq!(session.correct_count, 1);
        assert_eq!(session.current_index, 0);
    }

    #[test]
    fn test_restart_resets_with_previous_filter() {
        let mut engine = engine();
        engine.start(CategoryFilter::Category("Law of Tort".to_string()));
        engine.answer("The neighbour principle in negligence");
        engine.advance();
        engine.answer("Strict liability");
        engine.advance();
        assert_eq!(engine.phase(), QuizPhase::Finished);

        assert!(engine.restart());
        let session = engine.session().unwrap();
        assert_eq!(engine.phase(), QuizPhase::InProgress);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.correct_count, 0);
        assert_eq!(session.total(), 2);
        assert_eq!(
            session.filter,
            CategoryFilter::Category("Law of Tort".to_string())
        );
    }

    #[test]
    fn test_restart_before_any_start_is_noop() {
        let mut engine = engine();
        assert!(!engine.restart());
        assert_eq!(engine.phase(), QuizPhase::Browsing);
    }

    #[test]
    fn test_back_to_browse_from_any_phase() {
        let mut engine = engine();
        engine.start(CategoryFilter::All);
        engine.back_to_browse();
        assert_eq!(engine.phase(), QuizPhase::Browsing);

        engine.start(CategoryFilter::Category("Land Law".to_string()));
        engine.answer_index(0);
        engine.advance();
        assert_eq!(engine.phase(), QuizPhase::Finished);
        engine.back_to_browse();
        assert_eq!(engine.phase(), QuizPhase::Browsing);

        // restart still remembers the last filter
        assert!(engine.restart());
        assert_eq!(engine.session().unwrap().total(), 1);
    }

    #[test]
    fn test_four_of_five_scenario() {
        let mut engine = engine();
        engine.start(CategoryFilter::All);

        // miss the third question, get every other one right
        for i in 0..5 {
            let question = engine.session().unwrap().current_question().clone();
            if i == 2 {
                engine.answer(&wrong_option(&question));
            } else {
                engine.answer(&question.answer);
            }
            engine.advance();
        }

        let session = engine.session().unwrap();
        assert_eq!(engine.phase(), QuizPhase::Finished);
        assert_eq!(
            format!("{}/{}", session.correct_count, session.total()),
            "4/5"
        );
        assert_eq!(session.percentage(), 80);
        assert_eq!(session.tier(), PassTier::Good);
    }

    #[test]
    fn test_score_percentage_rounding() {
        assert_eq!(score_percentage(0, 5), 0);
        assert_eq!(score_percentage(4, 5), 80);
        assert_eq!(score_percentage(1, 3), 33);
        assert_eq!(score_percentage(2, 3), 67);
        assert_eq!(score_percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(score_percentage(3, 3), 100);
        assert_eq!(score_percentage(0, 0), 0);
    }

    #[test]
    fn test_score_percentage_is_bounded_and_monotonic() {
        for total in 1..=40 {
            let mut previous = 0;
            for correct in 0..=total {
                let pct = score_percentage(correct, total);
                assert!(pct <= 100);
                assert!(pct >= previous);
                previous = pct;
            }
        }
    }

    #[test]
    fn test_pass_tier_bands() {
        assert_eq!(PassTier::for_score(5, 5), PassTier::Perfect);
        assert_eq!(PassTier::for_score(4, 5), PassTier::Good);
        assert_eq!(PassTier::for_score(7, 10), PassTier::Good);
        assert_eq!(PassTier::for_score(6, 10), PassTier::KeepPracticing);
        assert_eq!(PassTier::for_score(0, 1), PassTier::KeepPracticing);
        // 1 question, answered right: perfect wins over good
        assert_eq!(PassTier::for_score(1, 1), PassTier::Perfect);
    }

    #[test]
    fn test_progress_ratio() {
        let mut engine = engine();
        engine.start(CategoryFilter::All);
        assert!((engine.session().unwrap().progress_ratio() - 0.2).abs() < f64::EPSILON);
        engine.answer_index(0);
        engine.advance();
        assert!((engine.session().unwrap().progress_ratio() - 0.4).abs() < f64::EPSILON);
    }
}
