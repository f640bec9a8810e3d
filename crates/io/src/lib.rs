#![forbid(unsafe_code)]

use anyhow::{anyhow, Context, Result};
use optreport_core::math::Scalar;
use optreport_core::problem::BoxQp;
use optreport_core::stats::ExecutionStats;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JsonProblem {
    BoxQp { problem: BoxQp<Scalar> },
}

impl JsonProblem {
    pub fn into_box_qp(self) -> BoxQp<Scalar> {
        match self {
            JsonProblem::BoxQp { problem } => problem,
        }
    }
}

pub fn read_json_problem<P: AsRef<Path>>(path: P) -> Result<JsonProblem> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .with_context(|| format!("failed to read {:?}", path))?;

    match serde_json::from_str::<JsonProblem>(&contents) {
        Ok(problem) => Ok(problem),
        Err(parse_err) => {
            let looks_like_stats = serde_json::from_str::<serde_json::Value>(&contents)
                .map(|value| value.get("reliable").is_some() && value.get("status").is_some())
                .unwrap_or(false);
            if looks_like_stats {
                Err(anyhow!(
                    "JSON file contains execution stats, but a problem (with a 'kind' field) was expected."
                ))
            } else {
                Err(parse_err).context("failed to parse JSON problem")
            }
        }
    }
}

pub fn write_json_problem<P: AsRef<Path>>(path: P, problem: &JsonProblem) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("failed to create {:?}", path.as_ref()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, problem).context("failed to serialise problem")?;
    Ok(())
}

/// Writes `stats` as pretty JSON. Non-finite numbers (for instance the
/// defaults of unpublished fields) are written as `null`.
pub fn write_stats<P, T, S, V>(path: P, stats: &ExecutionStats<T, S, V>) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
    S: Serialize,
    V: Serialize,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent directory {:?}", parent))?;
        }
    }

    let file = File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, stats).context("failed to serialise stats")?;
    writer
        .flush()
        .with_context(|| format!("failed to write stats into {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use optreport_core::status::Status;

    #[test]
    fn reads_problem_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qp.json");
        fs::write(
            &path,
            r#"{"kind":"box_qp","problem":{"hessian":[1.0],"linear":[-1.0]}}"#,
        )
        .unwrap();
        let problem = read_json_problem(&path).unwrap().into_box_qp();
        assert_eq!(problem.nvars(), 1);
        assert!(problem.bounds.is_none());
        assert!(problem.x0.is_none());
    }

    #[test]
    fn stats_file_is_not_a_problem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("stats.json");
        let mut stats = ExecutionStats::<Scalar>::new(Status::FirstOrder, Default::default()).unwrap();
        stats.set_iter(2);
        write_stats(&path, &stats).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["status"], "first_order");
        assert!(written["objective"].is_null());

        let err = read_json_problem(&path).unwrap_err();
        assert!(err.to_string().contains("execution stats"));
    }

    #[test]
    fn problem_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qp.json");
        let problem = JsonProblem::BoxQp {
            problem: BoxQp {
                hessian: vec![2.0, 0.0, 0.0, 2.0],
                linear: vec![1.0, -1.0],
                bounds: None,
                x0: Some(vec![0.5, 0.5]),
            },
        };
        write_json_problem(&path, &problem).unwrap();
        let back = read_json_problem(&path).unwrap().into_box_qp();
        assert_eq!(back.x0, Some(vec![0.5, 0.5]));
    }
}
