//! State of the demo page around the form.

use crate::form::FormData;
use crate::session::FormOutcome;
use chrono::{DateTime, Local};

/// Which trigger opened a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The bound controller.
    Controller,
    /// The single-instance service.
    Service,
}

impl Origin {
    /// Heading of the result panel for this origin.
    #[must_use]
    pub const fn result_title(self) -> &'static str {
        match self {
            Self::Controller => "Controller result",
            Self::Service => "Service result",
        }
    }
}

/// Last outcome received from one trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPanel {
    /// Submitted data; `None` after a cancel.
    pub data: Option<FormData>,
    /// When the last outcome arrived.
    pub updated_at: Option<DateTime<Local>>,
}

impl ResultPanel {
    /// Record an outcome. A cancel clears the panel.
    pub fn record(&mut self, outcome: FormOutcome, at: DateTime<Local>) {
        self.data = outcome.into_data();
        self.updated_at = Some(at);
    }
}

/// Everything the page shows besides the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    /// Result of the last controller session.
    pub controller_result: ResultPanel,
    /// Result of the last service session.
    pub service_result: ResultPanel,
    /// Vertical scroll of the results area.
    pub scroll: u16,
    /// One-line status message.
    pub status: Option<String>,
}

impl PageState {
    /// Result panel for `origin`.
    #[must_use]
    pub const fn result(&self, origin: Origin) -> &ResultPanel {
        match origin {
            Origin::Controller => &self.controller_result,
            Origin::Service => &self.service_result,
        }
    }

    /// Mutable result panel for `origin`.
    pub const fn result_mut(&mut self, origin: Origin) -> &mut ResultPanel {
        match origin {
            Origin::Controller => &mut self.controller_result,
            Origin::Service => &mut self.service_result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Experience;

    #[test]
    fn test_cancel_clears_previous_result() {
        let mut panel = ResultPanel::default();
        let data = FormData {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            experience: Experience::EightPlus,
            message: String::new(),
        };

        panel.record(FormOutcome::Submitted(data.clone()), Local::now());
        assert_eq!(panel.data, Some(data));

        panel.record(FormOutcome::Cancelled, Local::now());
        assert_eq!(panel.data, None);
        assert!(panel.updated_at.is_some());
    }

    #[test]
    fn test_result_by_origin() {
        let mut page = PageState::default();
        page.result_mut(Origin::Service).updated_at = Some(Local::now());
        assert!(page.result(Origin::Service).updated_at.is_some());
        assert!(page.result(Origin::Controller).updated_at.is_none());
    }
}
