//! Learning center CLI commands
//!
//! Progress is not stored between runs; pass the lessons finished so far
//! with `--completed id1,id2,...`.

use clap::Subcommand;

use crate::activity::ActivityKind;
use crate::display::{
    format_course_details, format_leaderboard, format_lesson, format_progress, format_units,
};
use crate::error::{UpscaleError, UpscaleResult};
use crate::models::{CourseDetails, LessonId};
use crate::services::course::LessonToggle;
use crate::services::{CourseProgress, Quiz, QuizState};

use super::{prompt_line, split_ids, CliContext};

/// Learning center subcommands
#[derive(Subcommand, Debug)]
pub enum LearnCommands {
    /// List units and lessons with lock state
    Units {
        /// Lesson ids already completed (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        completed: Vec<String>,
    },

    /// Read a lesson
    Show {
        /// Lesson id (see `learn units`)
        lesson: String,

        /// Lesson ids already completed (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        completed: Vec<String>,
    },

    /// Show overall progress, badges and where to continue
    Progress {
        /// Lesson ids already completed (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        completed: Vec<String>,
    },

    /// Take the final quiz on stdin
    Quiz {
        /// Lesson ids already completed (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        completed: Vec<String>,

        /// Treat every lesson as completed
        #[arg(long)]
        all: bool,
    },

    /// Course summary
    Details,

    /// Top learners
    Leaderboard,
}

fn progress_from(ctx: &CliContext, completed: &[String]) -> UpscaleResult<CourseProgress> {
    CourseProgress::with_completed(ctx.curriculum.clone(), split_ids(completed))
}

/// Handle a learn command
pub fn handle_learn_command(ctx: &CliContext, cmd: LearnCommands) -> UpscaleResult<()> {
    match cmd {
        LearnCommands::Units { completed } => {
            let progress = progress_from(ctx, &completed)?;
            print!("{}", format_units(&progress));
            Ok(())
        }

        LearnCommands::Show { lesson, completed } => {
            let mut progress = progress_from(ctx, &completed)?;
            let id = LessonId::new(lesson.trim());
            let toggle = progress.open_lesson(&id)?;

            let (unit_index, lesson) = ctx
                .curriculum
                .find_lesson(&id)
                .ok_or_else(|| UpscaleError::lesson_not_found(id.as_str()))?;
            let unit = &ctx.curriculum.units[unit_index];
            print!("{}", format_lesson(unit, lesson));

            if toggle == (LessonToggle::Opened { newly_completed: true }) {
                ctx.log
                    .record(ActivityKind::LessonCompleted, id.as_str(), None);
            }
            println!();
            println!(
                "Progress: {}/{} lessons ({}%)",
                progress.completed_count(),
                progress.total_lessons(),
                progress.overall_progress()
            );
            Ok(())
        }

        LearnCommands::Progress { completed } => {
            let progress = progress_from(ctx, &completed)?;
            print!("{}", format_progress(&progress, 0));
            Ok(())
        }

        LearnCommands::Quiz { completed, all } => {
            let progress = if all {
                let ids: Vec<String> = ctx
                    .curriculum
                    .lesson_ids()
                    .map(|id| id.to_string())
                    .collect();
                CourseProgress::with_completed(ctx.curriculum.clone(), ids)?
            } else {
                progress_from(ctx, &completed)?
            };
            run_quiz(ctx, &progress)
        }

        LearnCommands::Details => {
            print!(
                "{}",
                format_course_details(&CourseDetails::for_curriculum(&ctx.curriculum))
            );
            Ok(())
        }

        LearnCommands::Leaderboard => {
            print!("{}", format_leaderboard());
            Ok(())
        }
    }
}

fn run_quiz(ctx: &CliContext, progress: &CourseProgress) -> UpscaleResult<()> {
    let mut quiz = Quiz::new(ctx.curriculum.clone());
    quiz.start(progress)?;

    while let QuizState::InProgress { index, .. } = quiz.state() {
        let Some(question) = quiz.current_question() else {
            break;
        };
        println!();
        println!(
            "Question {} of {}: {}",
            index + 1,
            quiz.question_count(),
            question.question
        );
        for (n, option) in question.options.iter().enumerate() {
            println!("  {}) {}", n + 1, option);
        }
        let options = question.options.len();

        loop {
            let answer = prompt_line(&format!("Answer (1-{}): ", options))?;
            match answer.parse::<usize>() {
                Ok(n) if n >= 1 => match quiz.select(n - 1) {
                    Ok(()) => break,
                    Err(e) => println!("{}", e),
                },
                // an empty line means stdin ran out
                _ if answer.is_empty() => {
                    return Err(UpscaleError::Quiz("Quiz abandoned".into()));
                }
                _ => println!("Please enter a number between 1 and {}.", options),
            }
        }
        quiz.advance()?;
    }

    let score = quiz.final_score().unwrap_or(0);
    println!();
    println!("Score: {}/{}", score, quiz.question_count());
    if let Some(message) = quiz.result_message() {
        println!("{}", message);
    }
    println!("Quizzes passed: {}", quiz.quizzes_passed());

    ctx.log.record(
        ActivityKind::QuizFinished,
        "final-quiz",
        Some(format!("{}/{}", score, quiz.question_count())),
    );
    Ok(())
}
