use serde::{Deserialize, Serialize};

/// Column header shared by every export format.
pub const HEADER: [&str; 5] = ["file", "package", "branch", "repository", "architecture"];

/// Number of result-table cells that map onto a [`FileRecord`].
pub const MAPPED_COLUMNS: usize = HEADER.len();

/// One row of the contents result table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "file")]
    pub path: String,
    #[serde(rename = "package")]
    pub package_name: String,
    pub branch: String,
    pub repository: String,
    pub architecture: String,
}

/// Records in document row order.
pub type RecordSet = Vec<FileRecord>;

impl FileRecord {
    pub fn new(
        path: impl Into<String>,
        package_name: impl Into<String>,
        branch: impl Into<String>,
        repository: impl Into<String>,
        architecture: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            package_name: package_name.into(),
            branch: branch.into(),
            repository: repository.into(),
            architecture: architecture.into(),
        }
    }

    /// Positional mapping from result-table cells to fields. Cells past
    /// [`MAPPED_COLUMNS`] are ignored; missing cells leave the field empty.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let cell = |idx: usize| {
            cells
                .get(idx)
                .map(|value| value.as_ref().to_string())
                .unwrap_or_default()
        };
        Self {
            path: cell(0),
            package_name: cell(1),
            branch: cell(2),
            repository: cell(3),
            architecture: cell(4),
        }
    }

    /// Field values in [`HEADER`] order.
    pub fn values(&self) -> [&str; MAPPED_COLUMNS] {
        [
            &self.path,
            &self.package_name,
            &self.branch,
            &self.repository,
            &self.architecture,
        ]
    }
}
