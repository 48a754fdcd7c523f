//! Local append-only interest log (JSON array)

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use routeassist_domain::model::{InterestRecord, InterestSubmission};
use routeassist_domain::repository::InterestSink;
use routeassist_types::Result;

/// Entries are only ever appended; the file is rewritten in full each time
pub struct FileInterestLog {
    path: PathBuf,
}

impl FileInterestLog {
    /// Log backed by `<store_dir>/interest_log.json`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        Ok(Self {
            path: store_dir.join("interest_log.json"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn submissions(&self) -> Result<Vec<InterestSubmission>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl InterestSink for FileInterestLog {
    fn describe(&self) -> String {
        format!("local log {}", self.path.display())
    }

    fn append(&self, submission: &InterestSubmission) -> Result<()> {
        let mut entries = self.submissions()?;
        entries.push(submission.clone());
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &entries)?;
        tracing::info!(
            driver_id = %submission.driver_id,
            route_code = %submission.route_code,
            total = entries.len(),
            "interest appended to local log"
        );
        Ok(())
    }

    fn read_back(&self) -> Result<Option<Vec<InterestRecord>>> {
        let records = self.submissions()?.iter().map(InterestRecord::from).collect();
        Ok(Some(records))
    }
}
