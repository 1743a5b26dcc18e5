// SPDX-License-Identifier: GPL-3.0-only

//! UI Navigation handlers
//!
//! Handles context pages, the notice queue and external links.

use crate::app::state::{AppModel, ContextPage, Message};
use crate::errors::Notice;
use cosmic::Task;
use tracing::{error, info, warn};

impl AppModel {
    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(url = %url, error = %err, "Failed to open URL");
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    /// Queue a notice behind any that are already showing
    pub(crate) fn push_notice(&mut self, notice: Notice) {
        warn!(notice = %notice, pending = self.notices.len(), "Notice raised");
        self.notices.push_back(notice);
    }

    pub(crate) fn handle_dismiss_notice(&mut self) -> Task<cosmic::Action<Message>> {
        if let Some(notice) = self.notices.pop_front() {
            info!(notice = %notice, remaining = self.notices.len(), "Notice dismissed");
        }
        Task::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_dismissed_oldest_first() {
        let mut app = AppModel::detached();
        app.push_notice(Notice::MissingPhoto);
        app.push_notice(Notice::MissingTitle);
        assert_eq!(app.notices.front(), Some(&Notice::MissingPhoto));

        let _ = app.update(Message::DismissNotice);
        assert_eq!(app.notices.front(), Some(&Notice::MissingTitle));

        let _ = app.update(Message::DismissNotice);
        assert!(app.notices.is_empty());

        // Dismissing with nothing queued is a no-op
        let _ = app.update(Message::DismissNotice);
        assert!(app.notices.is_empty());
    }

    #[test]
    fn test_toggle_context_page() {
        let mut app = AppModel::detached();
        app.core.window.show_context = false;

        let _ = app.update(Message::ToggleContextPage(ContextPage::Settings));
        assert_eq!(app.context_page, ContextPage::Settings);
        assert!(app.core.window.show_context);

        let _ = app.update(Message::ToggleContextPage(ContextPage::Settings));
        assert!(!app.core.window.show_context);
    }
}
