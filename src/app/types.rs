/// Which view of the note is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Plain-text editing surface with the highlight overlay
    #[default]
    Edit,
    /// Rendered markdown preview with inline markers
    Preview,
}

impl ViewMode {
    pub fn is_preview(self) -> bool {
        self == ViewMode::Preview
    }
}
