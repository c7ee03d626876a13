//! Learning center display formatting

use crate::models::{CourseDetails, Lesson, LessonKind, Unit, LEADERBOARD};
use crate::services::CourseProgress;

use super::text::{format_progress_bar, wrap};

/// Format the unit list with lock state and per-lesson completion marks
pub fn format_units(progress: &CourseProgress) -> String {
    let mut output = String::new();

    for (index, unit) in progress.curriculum().units.iter().enumerate() {
        let locked = progress.is_unit_locked(index);
        let percent = progress.unit_progress(unit);
        output.push_str(&format!(
            "Unit {}: {}  [{}] {:>3}%{}\n",
            unit.id,
            unit.title,
            format_progress_bar(percent, 10),
            percent,
            if locked { "  (locked)" } else { "" }
        ));
        if !unit.description.is_empty() {
            output.push_str(&format!("  {}\n", unit.description));
        }
        for lesson in &unit.lessons {
            let mark = if progress.is_completed(&lesson.id) {
                "✓"
            } else if locked {
                "🔒"
            } else {
                "○"
            };
            output.push_str(&format!(
                "  {} {:<32} {:<7} {:>7}  {}\n",
                mark,
                lesson.title,
                lesson.kind.label(),
                lesson.duration,
                lesson.id
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Final quiz: {}\n",
        if progress.is_quiz_unlocked() {
            "unlocked"
        } else {
            "locked until every lesson is complete"
        }
    ));
    output
}

/// Format one lesson's content
pub fn format_lesson(unit: &Unit, lesson: &Lesson) -> String {
    let mut output = format!(
        "{}\nUnit {}: {}  ·  {}  ·  {}\n\n",
        lesson.title,
        unit.id,
        unit.title,
        lesson.kind.label(),
        lesson.duration
    );
    if let LessonKind::Video { url } = &lesson.kind {
        output.push_str(&format!("Video: {}\n\n", url));
    }
    for line in wrap(&lesson.content, 78) {
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Format the overall progress summary
pub fn format_progress(progress: &CourseProgress, quizzes_passed: usize) -> String {
    let percent = progress.overall_progress();
    let mut output = format!(
        "{}  [{}] {}%\n",
        progress.progress_level(),
        format_progress_bar(percent, 20),
        percent
    );
    output.push_str(&format!(
        "Lessons completed: {}/{}\n",
        progress.completed_count(),
        progress.total_lessons()
    ));
    output.push_str(&format!("Quizzes passed:    {}\n", quizzes_passed));

    let badges = progress.badges();
    if badges.is_empty() {
        output.push_str("Badges:            none yet\n");
    } else {
        let labels: Vec<&str> = badges.iter().map(|b| b.label()).collect();
        output.push_str(&format!("Badges:            {}\n", labels.join(", ")));
    }

    if let Some(unit) = progress.resume_unit() {
        output.push_str(&format!("Continue with:     Unit {}: {}\n", unit.id, unit.title));
    }
    output
}

pub fn format_course_details(details: &CourseDetails) -> String {
    format!(
        "Units:      {}\nLessons:    {}\nDifficulty: {}\nPace:       {}\n",
        details.units, details.lessons, details.difficulty, details.pace
    )
}

pub fn format_leaderboard() -> String {
    let mut output = format!("{:<4} {:<12} {:>7} {:>7}\n", "#", "Name", "Points", "Streak");
    for (rank, entry) in LEADERBOARD.iter().enumerate() {
        output.push_str(&format!(
            "{:<4} {:<12} {:>7} {:>6}d\n",
            rank + 1,
            entry.name,
            entry.points,
            entry.streak
        ));
    }
    output
}
