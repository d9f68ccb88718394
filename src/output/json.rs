use crate::checker::ProgressReport;
use crate::error::Result;
use crate::state::SiteState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Combined document written by the `check` command. `generated_at` is the
/// wall-clock time the report was produced.
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedReport {
    pub progress: ProgressReport,
    pub state: SiteState,
    pub generated_at: DateTime<Utc>,
}

pub fn save_site_state(path: &Path, state: &SiteState) -> Result<()> {
    write_pretty(path, state)
}

pub fn save_progress_report(
    path: &Path,
    progress: &ProgressReport,
    state: &SiteState,
) -> Result<()> {
    let document = SavedReport {
        progress: progress.clone(),
        state: state.clone(),
        generated_at: Utc::now(),
    };
    write_pretty(path, &document)
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::check_all_phases;
    use crate::config::schema::ChecksConfig;
    use crate::state::SourceReport;

    #[test]
    fn saved_report_round_trips() {
        let state = SiteState::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            SourceReport::default(),
        );
        let progress = check_all_phases(&state, &ChecksConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress_report.json");
        save_progress_report(&path, &progress, &state).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: SavedReport = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.progress, progress);
        assert_eq!(loaded.state.stats.total_pages, 0);
    }

    #[test]
    fn site_state_file_is_valid_json() {
        let state = SiteState::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            SourceReport::default(),
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site_state.json");
        save_site_state(&path, &state).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: SiteState = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.stats.total_products, 0);
    }
}
