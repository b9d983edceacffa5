//! Main application state and event loop.
//!
//! Follows The Elm Architecture: `update` folds events and API messages into
//! state, `view` renders it. The form controller is the model; the widgets
//! only mirror it.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, Frame, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::error::Result;
use crate::events::{Event, EventHandler};
use crate::form::{FormController, FormField};
use crate::tasks::{ApiMessage, TaskSpawner};
use crate::ui::{NotificationManager, RefundFormAction, RefundFormView, ResultDialog};

/// The main application struct that holds all state.
pub struct App {
    controller: FormController,
    form_view: RefundFormView,
    result_dialog: ResultDialog,
    notifications: NotificationManager,
    spawner: TaskSpawner,
    should_quit: bool,
}

impl App {
    /// Create the application. Submissions go through `spawner`; toasts last
    /// `notification_duration`.
    pub fn new(spawner: TaskSpawner, notification_duration: Duration) -> Self {
        debug!("Creating new application instance");
        Self {
            controller: FormController::new(),
            form_view: RefundFormView::new(),
            result_dialog: ResultDialog::default(),
            notifications: NotificationManager::with_duration(notification_duration),
            spawner,
            should_quit: false,
        }
    }

    /// The form controller.
    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// The toast queue.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Whether the application should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply a terminal event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(width, height) => debug!(width, height, "Terminal resized"),
            Event::Tick => self.notifications.tick(),
        }
    }

    /// Apply the result of a background task.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::RefundSubmitted(outcome) => {
                self.controller
                    .finish_submit(outcome, &mut self.notifications);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        if self.controller.is_dialog_open() {
            if self.result_dialog.handle_input(key) {
                self.dismiss_result();
            }
            return;
        }

        match self.form_view.handle_input(&mut self.controller, key) {
            Some(RefundFormAction::Submit) => self.submit(),
            Some(RefundFormAction::MissingFields(fields)) => {
                self.notifications
                    .error(format!("Please fill in: {}", field_labels(&fields)));
            }
            Some(RefundFormAction::Quit) => {
                info!("Quit requested");
                self.should_quit = true;
            }
            None => {}
        }
    }

    fn submit(&mut self) {
        if let Some(payload) = self.controller.begin_submit() {
            self.spawner.spawn_submit(payload);
        }
    }

    /// Close the result dialog and start a fresh form.
    fn dismiss_result(&mut self) {
        self.controller.reset();
        self.form_view.sync_from(self.controller.draft());
        self.form_view.focus_first();
    }

    /// Render the application UI.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        self.form_view.render(frame, area, &self.controller);
        self.notifications.render(frame, area);
        self.result_dialog
            .render(frame, area, self.controller.is_dialog_open());
    }

    /// Run the event loop until the user quits.
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &EventHandler,
        messages: &mut UnboundedReceiver<ApiMessage>,
    ) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.view(frame))?;

            while let Ok(message) = messages.try_recv() {
                self.handle_api_message(message);
            }

            let event = events.next()?;
            self.update(event);
        }
        Ok(())
    }
}

fn field_labels(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}
