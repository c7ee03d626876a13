//! Course progress tracker
//!
//! Tracks which lessons have been opened, derives unit locks and overall
//! progress from that set, and runs the final quiz. Nothing is persisted:
//! a tracker starts empty unless seeded with completed lesson ids.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{UpscaleError, UpscaleResult};
use crate::models::{Curriculum, Lesson, LessonId, QuizQuestion, Unit};

/// Rounded percentage, treating an empty denominator as complete
fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done as f64 / total as f64) * 100.0).round() as u8
}

/// Achievement badges shown next to the progress ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    FirstSteps,
    HalfwayHero,
    CourseMaster,
}

impl Badge {
    pub const ALL: [Badge; 3] = [Self::FirstSteps, Self::HalfwayHero, Self::CourseMaster];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstSteps => "First Steps",
            Self::HalfwayHero => "Halfway Hero",
            Self::CourseMaster => "Course Master",
        }
    }
}

/// Result of opening a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonToggle {
    /// The lesson is now the active one
    Opened {
        /// Whether this open added it to the completed set
        newly_completed: bool,
    },
    /// The lesson was already active and has been collapsed
    Collapsed,
}

/// Completion state over a shared curriculum
#[derive(Debug, Clone)]
pub struct CourseProgress {
    curriculum: Arc<Curriculum>,
    completed: BTreeSet<LessonId>,
    expanded_unit: Option<u32>,
    active_lesson: Option<LessonId>,
}

impl CourseProgress {
    pub fn new(curriculum: Arc<Curriculum>) -> Self {
        Self {
            curriculum,
            completed: BTreeSet::new(),
            expanded_unit: None,
            active_lesson: None,
        }
    }

    /// Start from lessons completed earlier; every id must exist
    pub fn with_completed<I, S>(curriculum: Arc<Curriculum>, completed: I) -> UpscaleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut progress = Self::new(curriculum);
        for id in completed {
            let id = LessonId::new(id.as_ref().trim());
            if progress.curriculum.find_lesson(&id).is_none() {
                return Err(UpscaleError::lesson_not_found(id.as_str()));
            }
            progress.completed.insert(id);
        }
        Ok(progress)
    }

    pub fn curriculum(&self) -> &Arc<Curriculum> {
        &self.curriculum
    }

    pub fn completed(&self) -> &BTreeSet<LessonId> {
        &self.completed
    }

    pub fn is_completed(&self, id: &LessonId) -> bool {
        self.completed.contains(id)
    }

    pub fn expanded_unit(&self) -> Option<u32> {
        self.expanded_unit
    }

    pub fn active_lesson(&self) -> Option<&Lesson> {
        self.active_lesson
            .as_ref()
            .and_then(|id| self.curriculum.find_lesson(id))
            .map(|(_, lesson)| lesson)
    }

    pub fn unit_progress(&self, unit: &Unit) -> u8 {
        let done = unit
            .lessons
            .iter()
            .filter(|l| self.completed.contains(&l.id))
            .count();
        percent(done, unit.lessons.len())
    }

    /// A unit is locked when the one before it is not fully complete
    pub fn is_unit_locked(&self, index: usize) -> bool {
        if index == 0 {
            return false;
        }
        match self.curriculum.units.get(index - 1) {
            Some(previous) => self.unit_progress(previous) < 100,
            None => true,
        }
    }

    pub fn total_lessons(&self) -> usize {
        self.curriculum.total_lessons()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn overall_progress(&self) -> u8 {
        percent(self.completed_count(), self.total_lessons())
    }

    /// Encouragement shown under the progress ring
    pub fn progress_level(&self) -> &'static str {
        match self.overall_progress() {
            100 => "Course Complete!",
            75..=99 => "Almost There!",
            50..=74 => "Halfway!",
            25..=49 => "Making Progress!",
            _ => "Just Getting Started!",
        }
    }

    /// The final quiz opens once every lesson of every unit is complete
    pub fn is_quiz_unlocked(&self) -> bool {
        self.curriculum
            .lesson_ids()
            .all(|id| self.completed.contains(id))
    }

    pub fn badges(&self) -> Vec<Badge> {
        let progress = self.overall_progress();
        Badge::ALL
            .into_iter()
            .filter(|badge| match badge {
                Badge::FirstSteps => self.completed_count() >= 5,
                Badge::HalfwayHero => progress >= 50,
                Badge::CourseMaster => progress == 100,
            })
            .collect()
    }

    /// Expand a unit, or collapse it when it is already expanded
    pub fn toggle_unit(&mut self, unit_id: u32) -> UpscaleResult<Option<u32>> {
        let index = self
            .curriculum
            .unit_index(unit_id)
            .ok_or_else(|| UpscaleError::unit_not_found(unit_id.to_string()))?;

        if self.is_unit_locked(index) {
            return Err(UpscaleError::Locked(format!(
                "Finish '{}' first",
                self.curriculum.units[index - 1].title
            )));
        }

        self.expanded_unit = if self.expanded_unit == Some(unit_id) {
            None
        } else {
            Some(unit_id)
        };
        Ok(self.expanded_unit)
    }

    /// Open a lesson, marking it complete; opening the active lesson collapses it
    pub fn open_lesson(&mut self, id: &LessonId) -> UpscaleResult<LessonToggle> {
        let (unit_index, _) = self
            .curriculum
            .find_lesson(id)
            .ok_or_else(|| UpscaleError::lesson_not_found(id.as_str()))?;

        if self.is_unit_locked(unit_index) {
            return Err(UpscaleError::Locked(format!(
                "'{}' is in a locked unit",
                id
            )));
        }

        if self.active_lesson.as_ref() == Some(id) {
            self.active_lesson = None;
            return Ok(LessonToggle::Collapsed);
        }

        self.active_lesson = Some(id.clone());
        let newly_completed = self.completed.insert(id.clone());
        Ok(LessonToggle::Opened { newly_completed })
    }

    /// First unlocked unit with an unfinished lesson, else the first unit
    pub fn resume_unit(&self) -> Option<&Unit> {
        let units = &self.curriculum.units;
        units
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.is_unit_locked(*index))
            .find(|(_, unit)| unit.lessons.iter().any(|l| !self.completed.contains(&l.id)))
            .map(|(_, unit)| unit)
            .or_else(|| units.first())
    }

    /// Expand the resume unit and return its id
    pub fn resume(&mut self) -> Option<u32> {
        let unit_id = self.resume_unit().map(|u| u.id)?;
        self.expanded_unit = Some(unit_id);
        Some(unit_id)
    }
}

/// Quiz lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuizState {
    NotStarted,
    InProgress {
        index: usize,
        score: usize,
        selected: Option<usize>,
    },
    Finished {
        score: usize,
    },
}

/// The final quiz state machine
#[derive(Debug, Clone)]
pub struct Quiz {
    curriculum: Arc<Curriculum>,
    state: QuizState,
}

impl Quiz {
    pub fn new(curriculum: Arc<Curriculum>) -> Self {
        Self {
            curriculum,
            state: QuizState::NotStarted,
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.curriculum.quiz
    }

    pub fn question_count(&self) -> usize {
        self.curriculum.quiz.len()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            QuizState::InProgress { index, .. } => self.curriculum.quiz.get(index),
            _ => None,
        }
    }

    /// Begin the quiz; requires the course to be complete
    pub fn start(&mut self, progress: &CourseProgress) -> UpscaleResult<()> {
        if !progress.is_quiz_unlocked() {
            return Err(UpscaleError::Locked(
                "Complete every lesson to unlock the final quiz".into(),
            ));
        }
        if self.question_count() == 0 {
            return Err(UpscaleError::Quiz("This course has no quiz".into()));
        }
        if matches!(self.state, QuizState::NotStarted) {
            self.state = QuizState::InProgress {
                index: 0,
                score: 0,
                selected: None,
            };
        }
        Ok(())
    }

    /// Select (or change) the answer to the current question
    pub fn select(&mut self, option: usize) -> UpscaleResult<()> {
        let QuizState::InProgress { index, score, .. } = self.state else {
            return Err(UpscaleError::Quiz("The quiz is not in progress".into()));
        };
        let options = self.curriculum.quiz.get(index).map_or(0, |q| q.options.len());
        if option >= options {
            return Err(UpscaleError::Quiz(format!(
                "Answer {} is out of range (1-{})",
                option + 1,
                options
            )));
        }
        self.state = QuizState::InProgress {
            index,
            score,
            selected: Some(option),
        };
        Ok(())
    }

    /// Score the selected answer and move on; past the last question the quiz finishes
    pub fn advance(&mut self) -> UpscaleResult<QuizState> {
        let QuizState::InProgress {
            index,
            score,
            selected,
        } = self.state
        else {
            return Err(UpscaleError::Quiz("The quiz is not in progress".into()));
        };
        let Some(selected) = selected else {
            return Err(UpscaleError::Quiz("Select an answer first".into()));
        };

        let correct = self
            .curriculum
            .quiz
            .get(index)
            .is_some_and(|q| q.correct == selected);
        let score = if correct { score + 1 } else { score };

        self.state = if index + 1 < self.question_count() {
            QuizState::InProgress {
                index: index + 1,
                score,
                selected: None,
            }
        } else {
            QuizState::Finished { score }
        };
        Ok(self.state)
    }

    pub fn restart(&mut self) {
        self.state = QuizState::NotStarted;
    }

    pub fn final_score(&self) -> Option<usize> {
        match self.state {
            QuizState::Finished { score } => Some(score),
            _ => None,
        }
    }

    /// 1 when finished with at least 70% correct, else 0
    pub fn quizzes_passed(&self) -> usize {
        match self.final_score() {
            Some(score) if score as f64 >= self.question_count() as f64 * 0.7 => 1,
            _ => 0,
        }
    }

    pub fn result_message(&self) -> Option<&'static str> {
        let score = self.final_score()?;
        Some(score_message(score, self.question_count()))
    }
}

/// Feedback line for a final score
pub fn score_message(score: usize, total: usize) -> &'static str {
    let ratio = if total == 0 {
        1.0
    } else {
        score as f64 / total as f64
    };
    if score == total {
        "Perfect score! You're a stock market expert!"
    } else if ratio >= 0.7 {
        "Great job! You have a solid understanding!"
    } else if ratio >= 0.5 {
        "Good effort! Keep learning and you'll master it!"
    } else {
        "Keep studying! Review the concepts above and try again."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::curriculum::builtin_curriculum;
    use crate::models::{LessonKind, Unit};

    fn lesson(id: &str) -> Lesson {
        Lesson {
            id: LessonId::new(id),
            title: id.into(),
            duration: "1 min".into(),
            kind: LessonKind::Article,
            content: String::new(),
        }
    }

    fn two_by_two() -> Arc<Curriculum> {
        Arc::new(Curriculum {
            units: vec![
                Unit {
                    id: 1,
                    title: "First".into(),
                    description: String::new(),
                    lessons: vec![lesson("a"), lesson("b")],
                },
                Unit {
                    id: 2,
                    title: "Second".into(),
                    description: String::new(),
                    lessons: vec![lesson("c"), lesson("d")],
                },
            ],
            quiz: vec![
                QuizQuestion {
                    question: "q1".into(),
                    options: vec!["x".into(), "y".into()],
                    correct: 1,
                },
                QuizQuestion {
                    question: "q2".into(),
                    options: vec!["x".into(), "y".into(), "z".into()],
                    correct: 0,
                },
            ],
        })
    }

    fn finished_course(curriculum: &Arc<Curriculum>) -> CourseProgress {
        let ids: Vec<String> = curriculum.lesson_ids().map(|id| id.to_string()).collect();
        CourseProgress::with_completed(curriculum.clone(), ids).unwrap()
    }

    #[test]
    fn test_unit_unlocks_after_previous_complete() {
        let mut progress = CourseProgress::new(two_by_two());
        assert!(!progress.is_unit_locked(0));
        assert!(progress.is_unit_locked(1));

        progress.open_lesson(&"a".into()).unwrap();
        assert!(progress.is_unit_locked(1));

        progress.open_lesson(&"b".into()).unwrap();
        let first = progress.curriculum().units[0].clone();
        assert_eq!(progress.unit_progress(&first), 100);
        assert!(!progress.is_unit_locked(1));
    }

    #[test]
    fn test_open_is_idempotent_and_toggles() {
        let mut progress = CourseProgress::new(two_by_two());
        let a = LessonId::new("a");

        assert_eq!(
            progress.open_lesson(&a).unwrap(),
            LessonToggle::Opened { newly_completed: true }
        );
        assert_eq!(progress.active_lesson().unwrap().id, a);
        assert_eq!(progress.open_lesson(&a).unwrap(), LessonToggle::Collapsed);
        assert!(progress.active_lesson().is_none());
        assert_eq!(
            progress.open_lesson(&a).unwrap(),
            LessonToggle::Opened { newly_completed: false }
        );
        assert_eq!(progress.completed_count(), 1);
    }

    #[test]
    fn test_locked_lessons_and_units_refuse() {
        let mut progress = CourseProgress::new(two_by_two());
        assert!(matches!(
            progress.open_lesson(&"c".into()),
            Err(UpscaleError::Locked(_))
        ));
        assert!(matches!(progress.toggle_unit(2), Err(UpscaleError::Locked(_))));
        assert!(progress.toggle_unit(9).unwrap_err().is_not_found());
        assert!(progress.open_lesson(&"zz".into()).unwrap_err().is_not_found());
        assert_eq!(progress.completed_count(), 0);
    }

    #[test]
    fn test_toggle_unit_expands_one_at_a_time() {
        let mut progress = CourseProgress::new(two_by_two());
        assert_eq!(progress.toggle_unit(1).unwrap(), Some(1));
        assert_eq!(progress.toggle_unit(1).unwrap(), None);
    }

    #[test]
    fn test_overall_progress_rounds() {
        let progress =
            CourseProgress::with_completed(Arc::new(builtin_curriculum().unwrap()), ["intro-stock-market"])
                .unwrap();
        // 1 of 16 lessons
        assert_eq!(progress.overall_progress(), 6);
        assert_eq!(progress.progress_level(), "Just Getting Started!");
        assert!(!progress.is_quiz_unlocked());
    }

    #[test]
    fn test_with_completed_rejects_unknown_ids() {
        let err = CourseProgress::with_completed(two_by_two(), ["a", "nope"]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_empty_unit_counts_as_complete() {
        let mut curriculum = (*two_by_two()).clone();
        curriculum.units.insert(
            0,
            Unit {
                id: 0,
                title: "Empty".into(),
                description: String::new(),
                lessons: Vec::new(),
            },
        );
        let progress = CourseProgress::new(Arc::new(curriculum));
        assert!(!progress.is_unit_locked(1));
        assert!(progress.is_unit_locked(2));
    }

    #[test]
    fn test_resume_and_badges() {
        let curriculum = two_by_two();
        let mut progress = CourseProgress::with_completed(curriculum.clone(), ["a", "b"]).unwrap();
        assert_eq!(progress.resume(), Some(2));
        assert_eq!(progress.expanded_unit(), Some(2));
        assert_eq!(progress.badges(), vec![Badge::HalfwayHero]);

        let done = finished_course(&curriculum);
        assert_eq!(done.resume_unit().unwrap().id, 1);
        assert_eq!(done.badges(), vec![Badge::HalfwayHero, Badge::CourseMaster]);
        assert!(done.is_quiz_unlocked());
    }

    #[test]
    fn test_quiz_requires_unlock() {
        let curriculum = two_by_two();
        let mut quiz = Quiz::new(curriculum.clone());
        let progress = CourseProgress::new(curriculum);
        assert!(matches!(quiz.start(&progress), Err(UpscaleError::Locked(_))));
        assert_eq!(quiz.state(), QuizState::NotStarted);
    }

    #[test]
    fn test_quiz_scoring() {
        let curriculum = two_by_two();
        let progress = finished_course(&curriculum);
        let mut quiz = Quiz::new(curriculum);
        quiz.start(&progress).unwrap();

        assert!(matches!(quiz.advance(), Err(UpscaleError::Quiz(_))));
        assert!(quiz.select(5).is_err());

        quiz.select(0).unwrap();
        quiz.select(1).unwrap();
        assert_eq!(
            quiz.advance().unwrap(),
            QuizState::InProgress { index: 1, score: 1, selected: None }
        );

        quiz.select(2).unwrap();
        assert_eq!(quiz.advance().unwrap(), QuizState::Finished { score: 1 });
        assert_eq!(quiz.final_score(), Some(1));
        assert_eq!(quiz.quizzes_passed(), 0);
        assert_eq!(
            quiz.result_message(),
            Some("Good effort! Keep learning and you'll master it!")
        );

        quiz.restart();
        assert_eq!(quiz.state(), QuizState::NotStarted);
        assert_eq!(quiz.final_score(), None);
    }

    #[test]
    fn test_score_messages() {
        assert_eq!(score_message(8, 8), "Perfect score! You're a stock market expert!");
        assert_eq!(score_message(6, 8), "Great job! You have a solid understanding!");
        assert_eq!(score_message(4, 8), "Good effort! Keep learning and you'll master it!");
        assert_eq!(
            score_message(3, 8),
            "Keep studying! Review the concepts above and try again."
        );
    }
}
