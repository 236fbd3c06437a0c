use crate::domain::model::{AnalysisResult, AnalysisSummary, Page};
use crate::domain::ports::AnalysisStore;
use crate::utils::error::{Result, ScoringError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores each analysis as `<root>/<user>/<id>.json`.
#[derive(Debug, Clone)]
pub struct FileAnalysisStore {
    base_path: PathBuf,
}

impl FileAnalysisStore {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn user_dir(&self, user_id: &str) -> Result<PathBuf> {
        let safe = !user_id.is_empty()
            && user_id != "."
            && user_id != ".."
            && user_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'));
        if !safe {
            return Err(ScoringError::Unauthorized {
                message: format!("user id '{}' cannot be used as a storage key", user_id),
            });
        }
        Ok(self.base_path.join(user_id))
    }

    fn load_all(&self, user_id: &str) -> Result<Vec<AnalysisResult>> {
        let dir = self.user_dir(user_id)?;
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut results = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let data = fs::read(&path)?;
            match serde_json::from_slice::<AnalysisResult>(&data) {
                Ok(result) => results.push(result),
                Err(e) => tracing::warn!("Skipping unreadable analysis {}: {}", path.display(), e),
            }
        }
        Ok(results)
    }
}

impl AnalysisStore for FileAnalysisStore {
    async fn save(&self, user_id: &str, result: &AnalysisResult) -> Result<()> {
        let dir = self.user_dir(user_id)?;
        fs::create_dir_all(&dir)?;

        let full_path = dir.join(format!("{}.json", result.id));
        let tmp_path = dir.join(format!(".{}.json.tmp", result.id));
        let data = serde_json::to_vec_pretty(result)?;

        // Readers only ever see a complete document.
        fs::write(&tmp_path, data)?;
        if let Err(e) = fs::rename(&tmp_path, &full_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!("Wrote analysis to {}", full_path.display());
        Ok(())
    }

    async fn list(&self, user_id: &str, page: usize, limit: usize) -> Result<Page<AnalysisSummary>> {
        let mut summaries: Vec<AnalysisSummary> = self
            .load_all(user_id)?
            .iter()
            .map(AnalysisResult::summary)
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(Page::from_ordered(summaries, page, limit))
    }

    async fn find(&self, user_id: &str, id: Uuid) -> Result<Option<AnalysisResult>> {
        let full_path = self.user_dir(user_id)?.join(format!("{}.json", id));
        let data = match fs::read(&full_path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }
}
