//! Mentor availability editor.

use chrono::NaiveDate;
use tracing::{info, warn};

use super::{Feedback, Mount, PageContext, PageLifetime, Route, Transition};
use crate::domain::{
    AuthSession, AvailabilityEditor, AvailabilitySlot, ClockTime, DateWindow, Error, SlotField,
    time_options,
};

/// SetAvailability page controller.
pub struct SetAvailabilityPage {
    ctx: PageContext,
    lifetime: PageLifetime,
    session: AuthSession,
    editor: AvailabilityEditor,
    feedback: Option<Feedback>,
    saving: bool,
}

impl SetAvailabilityPage {
    /// Mount the editor, redirecting to Login when signed out.
    pub fn mount(ctx: PageContext) -> Mount<Self> {
        let Some(session) = ctx.signed_in() else {
            return Mount::Redirect(Route::Login);
        };
        Mount::Ready(Self {
            ctx,
            lifetime: PageLifetime::new(),
            session,
            editor: AvailabilityEditor::default(),
            feedback: None,
            saving: false,
        })
    }

    /// Load stored slots. A failed fetch starts from an empty list.
    pub async fn load(&mut self) -> Transition {
        let gateway = self.ctx.ports.availability.clone();
        let email = self.session.user.email.clone();
        let Some(result) = self.lifetime.settle(gateway.get_availability(&email)).await else {
            return Transition::Stay;
        };
        match result {
            Ok(slots) => self.editor.replace(slots),
            Err(error) if error.is_unauthorized() => {
                return self.ctx.absorb(error, &mut self.feedback);
            }
            Err(error) => warn!(%error, "stored availability unavailable; starting empty"),
        }
        Transition::Stay
    }

    pub fn slots(&self) -> &[AvailabilitySlot] {
        self.editor.slots()
    }

    fn today(&self) -> NaiveDate {
        self.ctx.clock.local().date_naive()
    }

    /// Dates the picker offers.
    pub fn date_window(&self) -> DateWindow {
        DateWindow::starting(self.today())
    }

    /// Hourly time choices.
    pub fn time_options(&self) -> Vec<ClockTime> {
        time_options()
    }

    /// Append a slot for today, 09:00 to 10:00.
    pub fn add_slot(&mut self) {
        let today = self.today();
        self.editor.add_slot(today);
    }

    pub fn remove_slot(&mut self, index: usize) {
        if let Err(error) = self.editor.remove_slot(index) {
            self.feedback = Some(Feedback::Error(error.message().to_owned()));
        }
    }

    /// Edit one field of a slot. Dates outside the picker window are refused.
    pub fn update_slot(&mut self, index: usize, field: SlotField) {
        let result = match field {
            SlotField::Date(date) if !self.date_window().contains(date) => Err(Error::validation(
                "Please choose a date within the next three months",
            )),
            _ => self.editor.update_slot(index, field),
        };
        self.feedback = result
            .err()
            .map(|error| Feedback::Error(error.message().to_owned()));
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Replace the stored availability with the edited list, sorted by date.
    pub async fn save(&mut self) -> Transition {
        let slots = self.editor.sorted_for_save();
        self.saving = true;
        let gateway = self.ctx.ports.availability.clone();
        let email = self.session.user.email.clone();
        let Some(result) = self
            .lifetime
            .settle(gateway.set_availability(&email, &slots))
            .await
        else {
            return Transition::Stay;
        };
        self.saving = false;
        match result {
            Ok(()) => {
                info!(slots = slots.len(), "availability saved");
                self.editor.replace(slots);
                self.feedback = Some(Feedback::Success(
                    "Availability updated successfully!".to_owned(),
                ));
                Transition::Navigate(Route::Dashboard)
            }
            Err(error) => self.ctx.absorb(error, &mut self.feedback),
        }
    }

    pub fn unmount(&self) {
        self.lifetime.unmount();
    }
}
