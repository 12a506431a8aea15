use serde::Serialize;

/// What the page shows around a submission: the busy flag, the
/// success modal and the message inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiFeedbackState {
    pub is_submitting: bool,
    pub show_success_modal: bool,
    pub is_confirmed: bool,
    pub success_message: String,
}

impl UiFeedbackState {
    pub fn close_modal(&mut self) {
        self.show_success_modal = false;
    }
}
