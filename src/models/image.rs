#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PngOptions {
    pub interlaced: bool,
}
