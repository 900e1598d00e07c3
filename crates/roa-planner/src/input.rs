//! Loading requirement records, sub-plan records and configuration files

use roa_core::{ConfigError, PlannerConfig, RequirementRecord, SubPlanRecord};
use std::path::{Path, PathBuf};

/// Input loading errors
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not the expected JSON shape
    #[error("failed to parse {path}: {source}")]
    Json {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// Configuration file is invalid
    #[error("invalid configuration in {path}: {source}")]
    Config {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: ConfigError,
    },
}

fn read(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    serde_json::from_str(&read(path)?).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a JSON array of requirement records
///
/// # Errors
/// [`InputError::Io`] or [`InputError::Json`].
pub fn load_records(path: &Path) -> Result<Vec<RequirementRecord>, InputError> {
    let records: Vec<RequirementRecord> = parse_json(path)?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded requirement records");
    Ok(records)
}

/// Read a JSON array of sub-plan records
///
/// # Errors
/// [`InputError::Io`] or [`InputError::Json`].
pub fn load_sub_plans(path: &Path) -> Result<Vec<SubPlanRecord>, InputError> {
    let sub_plans: Vec<SubPlanRecord> = parse_json(path)?;
    tracing::debug!(path = %path.display(), sub_plans = sub_plans.len(), "loaded sub-plan records");
    Ok(sub_plans)
}

/// Read and validate a TOML planner configuration
///
/// # Errors
/// [`InputError::Io`] or [`InputError::Config`].
pub fn load_config(path: &Path) -> Result<PlannerConfig, InputError> {
    PlannerConfig::from_toml_str(&read(path)?).map_err(|source| InputError::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_records_with_missing_fields() {
        let file = file_with(
            r#"[
                {"code": "R1", "value": 7, "cost": 4, "returnRate": 0.05, "risk": 1.2,
                 "timeRemaining": 3, "dependencies": ["R2"]},
                {"code": "R2", "value": 3}
            ]"#,
        );

        let records = load_records(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].dependencies, vec!["R2".to_string()]);
        assert_eq!(records[1].cost, None);
    }

    #[test]
    fn loads_sub_plans() {
        let file = file_with(
            r#"[{"planIndex": "greedy1", "requirements": ["R1"], "completed": true, "masterPlanId": "m1"}]"#,
        );
        let subs = load_sub_plans(file.path()).unwrap();
        assert_eq!(
            subs,
            vec![SubPlanRecord::new("greedy1", vec!["R1".into()])
                .completed()
                .with_master_plan("m1")]
        );
    }

    #[test]
    fn loads_partial_config() {
        let file = file_with("budget = 20.0\n\n[urgency]\ngreedy_min_score = 0.5\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.budget, 20.0);
        assert_eq!(config.urgency.greedy_min_score, 0.5);
        assert_eq!(config.cost_scale, 1);
    }

    #[test]
    fn rejects_invalid_config() {
        let file = file_with("budget = -1.0\n");
        assert!(matches!(
            load_config(file.path()),
            Err(InputError::Config {
                source: ConfigError::InvalidBudget(_),
                ..
            })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_records(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let file = file_with("{not json");
        assert!(matches!(load_records(file.path()), Err(InputError::Json { .. })));
    }
}
