//! Course curriculum model
//!
//! A curriculum is an ordered list of units, each an ordered list of lessons,
//! plus the final quiz. It is read-only reference data: progress lives in
//! `services::course`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::UpscaleError;

/// Identifier of a lesson, unique across the whole curriculum
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(String);

impl LessonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LessonId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// How a lesson is delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LessonKind {
    Video { url: String },
    Article,
}

impl LessonKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Video { .. } => "Video",
            Self::Article => "Article",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    /// Display label such as "8 min"
    pub duration: String,
    #[serde(flatten)]
    pub kind: LessonKind,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl Unit {
    pub fn contains(&self, lesson: &LessonId) -> bool {
        self.lessons.iter().any(|l| &l.id == lesson)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the right answer
    pub correct: usize,
}

/// The full course: units in unlock order plus the final quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    pub units: Vec<Unit>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

impl Curriculum {
    /// Check the invariants the progress tracker relies on
    pub fn validate(&self) -> Result<(), UpscaleError> {
        if self.units.is_empty() {
            return Err(UpscaleError::Validation(
                "Curriculum must contain at least one unit".into(),
            ));
        }

        let mut unit_ids = HashSet::new();
        let mut lesson_ids = HashSet::new();
        for unit in &self.units {
            if !unit_ids.insert(unit.id) {
                return Err(UpscaleError::Validation(format!(
                    "Duplicate unit id: {}",
                    unit.id
                )));
            }
            for lesson in &unit.lessons {
                if lesson.id.as_str().trim().is_empty() {
                    return Err(UpscaleError::Validation(format!(
                        "Lesson with empty id in unit '{}'",
                        unit.title
                    )));
                }
                if !lesson_ids.insert(lesson.id.clone()) {
                    return Err(UpscaleError::Validation(format!(
                        "Duplicate lesson id: {}",
                        lesson.id
                    )));
                }
            }
        }

        for (n, question) in self.quiz.iter().enumerate() {
            if question.correct >= question.options.len() {
                return Err(UpscaleError::Validation(format!(
                    "Quiz question {} has correct index {} but only {} options",
                    n + 1,
                    question.correct,
                    question.options.len()
                )));
            }
        }

        Ok(())
    }

    pub fn total_lessons(&self) -> usize {
        self.units.iter().map(|u| u.lessons.len()).sum()
    }

    /// Every lesson id in course order
    pub fn lesson_ids(&self) -> impl Iterator<Item = &LessonId> {
        self.units
            .iter()
            .flat_map(|u| u.lessons.iter().map(|l| &l.id))
    }

    /// Find a lesson and the index of the unit holding it
    pub fn find_lesson(&self, id: &LessonId) -> Option<(usize, &Lesson)> {
        self.units.iter().enumerate().find_map(|(index, unit)| {
            unit.lessons
                .iter()
                .find(|l| &l.id == id)
                .map(|lesson| (index, lesson))
        })
    }

    pub fn unit_index(&self, unit_id: u32) -> Option<usize> {
        self.units.iter().position(|u| u.id == unit_id)
    }
}

/// Static summary shown in the course details dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetails {
    pub units: usize,
    pub lessons: usize,
    pub difficulty: &'static str,
    pub pace: &'static str,
}

impl CourseDetails {
    pub fn for_curriculum(curriculum: &Curriculum) -> Self {
        Self {
            units: curriculum.units.len(),
            lessons: curriculum.total_lessons(),
            difficulty: "Beginner → Intermediate",
            pace: "20–30 min/day",
        }
    }
}

/// A row of the course leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub name: &'static str,
    pub points: u32,
    /// Consecutive study days
    pub streak: u32,
}

pub const LEADERBOARD: [LeaderboardEntry; 5] = [
    LeaderboardEntry { name: "A. Morgan", points: 1280, streak: 12 },
    LeaderboardEntry { name: "J. Patel", points: 1215, streak: 9 },
    LeaderboardEntry { name: "E. Carter", points: 1180, streak: 5 },
    LeaderboardEntry { name: "S. Nguyen", points: 1105, streak: 7 },
    LeaderboardEntry { name: "R. Kim", points: 995, streak: 3 },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: &str) -> Lesson {
        Lesson {
            id: LessonId::new(id),
            title: id.to_uppercase(),
            duration: "5 min".into(),
            kind: LessonKind::Article,
            content: String::new(),
        }
    }

    fn sample() -> Curriculum {
        Curriculum {
            units: vec![
                Unit {
                    id: 1,
                    title: "One".into(),
                    description: String::new(),
                    lessons: vec![lesson("a"), lesson("b")],
                },
                Unit {
                    id: 2,
                    title: "Two".into(),
                    description: String::new(),
                    lessons: vec![lesson("c")],
                },
            ],
            quiz: vec![QuizQuestion {
                question: "?".into(),
                options: vec!["x".into(), "y".into()],
                correct: 1,
            }],
        }
    }

    #[test]
    fn test_lookup() {
        let c = sample();
        assert_eq!(c.total_lessons(), 3);
        let (unit, found) = c.find_lesson(&"c".into()).unwrap();
        assert_eq!(unit, 1);
        assert_eq!(found.title, "C");
        assert!(c.find_lesson(&"z".into()).is_none());
        assert_eq!(c.unit_index(2), Some(1));
    }

    #[test]
    fn test_validate_rejects_duplicate_lesson() {
        let mut c = sample();
        c.units[1].lessons.push(lesson("a"));
        assert!(c.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_validate_rejects_bad_quiz_answer() {
        let mut c = sample();
        c.quiz[0].correct = 2;
        assert!(c.validate().unwrap_err().is_validation());
        c.quiz[0].correct = 1;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_lesson_kind_yaml() {
        let yaml = r#"
id: intro
title: Intro
duration: 5 min
type: video
url: https://example.com/v
content: Basics
"#;
        let parsed: Lesson = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed.kind,
            LessonKind::Video {
                url: "https://example.com/v".into()
            }
        );
    }
}
