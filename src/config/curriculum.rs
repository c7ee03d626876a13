//! Course curriculum loading
//!
//! The built-in course ships inside the binary. A `curriculum.yaml` in the
//! data directory replaces it wholesale. Either way the result is validated
//! once and shared read-only.

use std::sync::Arc;

use super::paths::UpscalePaths;
use crate::error::UpscaleError;
use crate::models::course::Curriculum;

const BUILTIN_CURRICULUM: &str = include_str!("../../assets/curriculum.yaml");

/// Parse and validate curriculum YAML
pub fn parse_curriculum(yaml: &str) -> Result<Curriculum, UpscaleError> {
    let curriculum: Curriculum = serde_yaml::from_str(yaml)
        .map_err(|e| UpscaleError::Config(format!("Failed to parse curriculum: {}", e)))?;
    curriculum.validate()?;
    Ok(curriculum)
}

/// The curriculum compiled into the binary
pub fn builtin_curriculum() -> Result<Curriculum, UpscaleError> {
    parse_curriculum(BUILTIN_CURRICULUM)
}

/// Load the override from the data directory if present, else the built-in course
pub fn load_curriculum(paths: &UpscalePaths) -> Result<Arc<Curriculum>, UpscaleError> {
    let override_path = paths.curriculum_file();

    let curriculum = if override_path.exists() {
        let contents = std::fs::read_to_string(&override_path).map_err(|e| {
            UpscaleError::Io(format!("Failed to read curriculum file: {}", e))
        })?;
        parse_curriculum(&contents)?
    } else {
        builtin_curriculum()?
    };

    Ok(Arc::new(curriculum))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_curriculum_shape() {
        let c = builtin_curriculum().unwrap();
        let sizes: Vec<usize> = c.units.iter().map(|u| u.lessons.len()).collect();
        assert_eq!(sizes, vec![5, 4, 4, 3]);
        assert_eq!(c.total_lessons(), 16);
        assert_eq!(c.quiz.len(), 8);
        assert_eq!(c.units[3].title, "Risk Management");

        let answers: Vec<usize> = c.quiz.iter().map(|q| q.correct).collect();
        assert_eq!(answers, vec![1, 1, 1, 0, 1, 1, 1, 2]);
    }

    #[test]
    fn test_override_replaces_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let paths = UpscalePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.curriculum_file(),
            r#"
units:
  - id: 7
    title: Only Unit
    lessons:
      - id: solo
        title: Solo
        duration: 1 min
        type: article
"#,
        )
        .unwrap();

        let c = load_curriculum(&paths).unwrap();
        assert_eq!(c.units.len(), 1);
        assert!(c.quiz.is_empty());
    }

    #[test]
    fn test_invalid_override_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let paths = UpscalePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.curriculum_file(), "units: []").unwrap();

        assert!(load_curriculum(&paths).unwrap_err().is_validation());
    }

    #[test]
    fn test_missing_override_uses_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let paths = UpscalePaths::with_base_dir(temp_dir.path().to_path_buf());
        assert_eq!(load_curriculum(&paths).unwrap().units.len(), 4);
    }
}
