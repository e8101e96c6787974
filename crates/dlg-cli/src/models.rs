#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditorAction {
    NotHandled,
    Continue,
    Quit,
}

pub(crate) struct EditorContext<'a> {
    /// Default target of export and import.
    pub(crate) file: &'a str,
}
