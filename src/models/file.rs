use std::path::PathBuf;

#[derive(Clone)]
pub struct FileCollectInput {
    pub folder: PathBuf,
}

#[derive(Debug)]
pub struct FileCollectOutput {
    pub files: Vec<PathBuf>,
    pub skipped_dirs: usize,
}
