use super::domain::ReportModel;
use super::report::RenderedReport;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_FILE: &str = "report.html";
pub const IMAGE_FILE: &str = "summary.png";
pub const RECORDS_FILE: &str = "records.csv";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("unable to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to write transaction records: {0}")]
    Csv(#[from] csv::Error),
    #[error("report payload could not be serialized: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Files produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArtifacts {
    pub dir: PathBuf,
    pub report: PathBuf,
    pub image: Option<PathBuf>,
    pub records: PathBuf,
}

/// Writes each run into its own timestamped directory below `root`.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn run_dir(&self, generated_at: NaiveDateTime) -> PathBuf {
        self.root
            .join(format!("realestate_{}", generated_at.format("%Y%m%d_%H%M%S")))
    }

    pub fn write(
        &self,
        model: &ReportModel,
        report: &RenderedReport,
        image: Option<&[u8]>,
    ) -> Result<RunArtifacts, ArtifactError> {
        let dir = self.run_dir(model.generated_at);
        fs::create_dir_all(&dir).map_err(|source| ArtifactError::Io {
            path: dir.clone(),
            source,
        })?;

        let report_path = dir.join(REPORT_FILE);
        write_file(&report_path, report.document.as_bytes())?;

        let image_path = match image {
            Some(bytes) => {
                let path = dir.join(IMAGE_FILE);
                write_file(&path, bytes)?;
                Some(path)
            }
            None => None,
        };

        let records_path = dir.join(RECORDS_FILE);
        write_records(&records_path, model)?;

        info!(dir = %dir.display(), records = model.total_records(), "artifacts written");
        Ok(RunArtifacts {
            dir,
            report: report_path,
            image: image_path,
            records: records_path,
        })
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ArtifactError> {
    fs::write(path, bytes).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Full normalized dataset, one row per record in category order.
fn write_records(path: &Path, model: &ReportModel) -> Result<(), ArtifactError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in model.all_records() {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}
