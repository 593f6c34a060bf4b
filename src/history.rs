//! Progress tracking - persist scores to .learnbox-history.json

use crate::PerformanceReport;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Component, Path};

pub const HISTORY_FILENAME: &str = ".learnbox-history.json";
const MAX_RUNS: usize = 50;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct HistoryFile {
    pub runs: Vec<HistoryRun>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRun {
    pub timestamp: String,
    pub files: HashMap<String, SubmissionScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionScore {
    pub score: u8,
    /// Topic accuracy at the time of the run
    #[serde(default)]
    pub topics: BTreeMap<String, f64>,
}

/// Load history from a directory (or create empty)
pub fn load_history(dir: &Path) -> HistoryFile {
    let path = dir.join(HISTORY_FILENAME);
    if let Ok(content) = fs::read_to_string(&path) {
        if let Ok(history) = serde_json::from_str::<HistoryFile>(&content) {
            return history;
        }
    }
    HistoryFile::default()
}

/// Save history to a directory
pub fn save_history(dir: &Path, history: &HistoryFile) -> std::io::Result<()> {
    let path = dir.join(HISTORY_FILENAME);
    let content = serde_json::to_string_pretty(history).unwrap_or_else(|_| "{}".to_string());
    fs::write(path, content)
}

/// History key for a report: its source path relative to `base` (the
/// analyzed directory), so the same file matches however it was named on
/// the command line.
fn report_key(report: &PerformanceReport, base: &Path) -> Option<String> {
    let source = report.source.as_ref()?;
    let relative = match (fs::canonicalize(source), fs::canonicalize(base)) {
        (Ok(source), Ok(base)) => {
            let rel = source.strip_prefix(&base).map(Path::to_path_buf);
            rel.unwrap_or(source)
        }
        _ => source.clone(),
    };
    let key = relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    Some(key)
}

/// Get the previous entry for a submission from the latest run
pub fn previous_entry<'a>(
    history: &'a HistoryFile,
    report: &PerformanceReport,
    base: &Path,
) -> Option<&'a SubmissionScore> {
    let run = history.runs.last()?;
    run.files.get(&report_key(report, base)?)
}

/// Build a new run from reports and append it to history. Reports without
/// a source file are skipped.
pub fn append_run(history: &mut HistoryFile, reports: &[PerformanceReport], base: &Path) {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let mut files = HashMap::new();
    for report in reports {
        let Some(key) = report_key(report, base) else {
            continue;
        };
        let topics = report
            .topics
            .iter()
            .map(|t| (t.topic.clone(), t.accuracy))
            .collect();
        files.insert(
            key,
            SubmissionScore {
                score: report.score.value,
                topics,
            },
        );
    }
    history.runs.push(HistoryRun { timestamp, files });
    if history.runs.len() > MAX_RUNS {
        history.runs.drain(0..history.runs.len() - MAX_RUNS);
    }
}

/// Format delta for console: "[was 82, down 4]" or "[was 82, up 2]" or ""
pub fn format_delta(previous: Option<u8>, current: u8) -> String {
    let Some(prev) = previous else {
        return String::new();
    };
    if prev == current {
        return format!(" [unchanged at {}]", current);
    }
    let diff = current as i16 - prev as i16;
    if diff > 0 {
        format!(" [was {}, up {}]", prev, diff)
    } else {
        format!(" [was {}, down {}]", prev, -diff)
    }
}

/// Topic accuracy changes since the previous entry, largest swing first
pub fn topic_deltas(previous: &SubmissionScore, report: &PerformanceReport) -> Vec<(String, f64)> {
    let mut deltas: Vec<(String, f64)> = report
        .topics
        .iter()
        .filter_map(|t| {
            let before = previous.topics.get(&t.topic)?;
            let diff = ((t.accuracy - before) * 10.0).round() / 10.0;
            (diff != 0.0).then(|| (t.topic.clone(), diff))
        })
        .collect();
    deltas.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()).then_with(|| a.0.cmp(&b.0)));
    deltas
}
