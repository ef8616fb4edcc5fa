//! Small shared types for the application state

/// Which pane owns key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Case list panel
    Cases,
    /// Timeline viewport
    #[default]
    Timeline,
}

/// Request to the background signal loader
#[derive(Debug, Clone)]
pub(crate) struct DetailRequest {
    pub(crate) case_id: String,
    pub(crate) year: i32,
}

/// Loaded signal lines for one year group
#[derive(Debug, Clone)]
pub(crate) struct DetailResponse {
    pub(crate) case_id: String,
    pub(crate) year: i32,
    pub(crate) lines: Vec<String>,
}
