//! Session request form state for a chosen mentor.
//!
//! Holds the mentee's subject, note, and slot choice, derives the date and
//! time options from the mentor's availability, and decides whether the form
//! may be submitted and with which payload.

use chrono::NaiveDate;

use super::availability::{DateOption, available_dates, slots_on};
use super::{
    AvailabilitySlot, DEFERRED_SCHEDULING_NOTE, Email, Error, NewSessionRequest,
    ScheduledSessionRequest, SessionRequestSubmission, TimeRange, User,
};

/// Transient selection state of a request form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequestForm {
    mentor: User,
    slots: Vec<AvailabilitySlot>,
    subject: Option<String>,
    message: String,
    date: Option<NaiveDate>,
    time: Option<TimeRange>,
}

impl SessionRequestForm {
    /// Open a form for `mentor` with their published `slots`.
    ///
    /// The subject defaults to `hint` when the mentor teaches it, otherwise
    /// to the mentor's first subject.
    pub fn open(mentor: User, slots: Vec<AvailabilitySlot>, hint: Option<&str>) -> Self {
        let subject = hint
            .filter(|wanted| mentor.teaches(wanted))
            .map(str::to_owned)
            .or_else(|| mentor.subjects.first().cloned());
        Self {
            mentor,
            slots,
            subject,
            message: String::new(),
            date: None,
            time: None,
        }
    }

    /// Mentor being requested.
    pub fn mentor(&self) -> &User {
        &self.mentor
    }

    /// Mentor's published slots.
    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.slots
    }

    /// Whether the mentor published any availability.
    pub fn has_availability(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Chosen subject.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Note to the mentor.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Chosen date.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Chosen time window.
    pub fn time(&self) -> Option<TimeRange> {
        self.time
    }

    /// Choose one of the mentor's subjects; an empty string clears the
    /// choice.
    pub fn select_subject(&mut self, subject: &str) -> Result<(), Error> {
        let trimmed = subject.trim();
        if trimmed.is_empty() {
            self.subject = None;
            return Ok(());
        }
        if !self.mentor.teaches(trimmed) {
            return Err(Error::validation("The mentor does not teach that subject"));
        }
        self.subject = Some(trimmed.to_owned());
        Ok(())
    }

    /// Replace the note.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Distinct dates offered by the mentor, ascending.
    pub fn date_options(&self) -> Vec<DateOption> {
        available_dates(&self.slots)
    }

    /// Windows offered on the chosen date, in the mentor's order.
    pub fn time_options(&self) -> Vec<TimeRange> {
        self.date
            .map(|date| {
                slots_on(&self.slots, date)
                    .iter()
                    .map(AvailabilitySlot::time_range)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Choose a date; any previously chosen time is cleared.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), Error> {
        if !self.slots.iter().any(|slot| slot.date == date) {
            return Err(Error::validation("The mentor is not available on that date"));
        }
        self.date = Some(date);
        self.time = None;
        Ok(())
    }

    /// Choose a time window offered on the chosen date.
    pub fn select_time(&mut self, time: TimeRange) -> Result<(), Error> {
        if self.date.is_none() {
            return Err(Error::validation("Please select a date first"));
        }
        if !self.time_options().contains(&time) {
            return Err(Error::validation("The mentor is not available at that time"));
        }
        self.time = Some(time);
        Ok(())
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.subject.is_some() && (!self.has_availability() || (self.date.is_some() && self.time.is_some()))
    }

    /// Build the payload for `mentee`, or explain why the form is incomplete.
    ///
    /// Mentors with availability require a date and time; mentors without
    /// any get an unscheduled request carrying [`DEFERRED_SCHEDULING_NOTE`].
    pub fn submission(&self, mentee: &Email) -> Result<SessionRequestSubmission, Error> {
        let subject = self
            .subject
            .clone()
            .ok_or_else(|| Error::validation("Please select a subject"))?;
        let note = self.message.trim();

        if !self.has_availability() {
            let message = if note.is_empty() {
                DEFERRED_SCHEDULING_NOTE.to_owned()
            } else {
                format!("{note}\n\n{DEFERRED_SCHEDULING_NOTE}")
            };
            return Ok(SessionRequestSubmission::Unscheduled(NewSessionRequest {
                mentor_email: self.mentor.email.clone(),
                mentee_email: mentee.clone(),
                subject,
                message: Some(message),
            }));
        }

        let (Some(scheduled_date), Some(scheduled_time)) = (self.date, self.time) else {
            return Err(Error::validation("Please select a date and time"));
        };
        Ok(SessionRequestSubmission::Scheduled(ScheduledSessionRequest {
            mentor_email: self.mentor.email.clone(),
            mentee_email: mentee.clone(),
            subject,
            message: (!note.is_empty()).then(|| note.to_owned()),
            scheduled_date,
            scheduled_time,
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ErrorCode, Role};
    use rstest::{fixture, rstest};

    fn date(raw: &str) -> NaiveDate {
        raw.parse().expect("fixture date")
    }

    fn range(raw: &str) -> TimeRange {
        raw.parse().expect("fixture range")
    }

    fn slot(d: &str, start: &str, end: &str) -> AvailabilitySlot {
        AvailabilitySlot::new(
            date(d),
            start.parse().expect("start"),
            end.parse().expect("end"),
        )
    }

    #[fixture]
    fn mentor() -> User {
        User {
            id: None,
            email: Email::new("mentor@example.org").expect("email"),
            name: "Maya".to_owned(),
            role: Role::Mentor,
            grade: "12th".to_owned(),
            school: String::new(),
            zip_code: String::new(),
            subjects: vec!["Algebra".to_owned(), "Geometry".to_owned()],
            profile_picture_url: None,
        }
    }

    #[fixture]
    fn mentee() -> Email {
        Email::new("mentee@example.org").expect("email")
    }

    #[fixture]
    fn slots() -> Vec<AvailabilitySlot> {
        vec![
            slot("2025-06-01", "09:00", "10:00"),
            slot("2025-06-03", "14:00", "15:00"),
        ]
    }

    #[rstest]
    fn defaults_to_first_subject(mentor: User, slots: Vec<AvailabilitySlot>) {
        let form = SessionRequestForm::open(mentor, slots, None);
        assert_eq!(form.subject(), Some("Algebra"));
    }

    #[rstest]
    #[case(Some("Geometry"), Some("Geometry"))]
    #[case(Some("Chemistry"), Some("Algebra"))]
    fn honours_landing_hint_when_taught(
        mentor: User,
        #[case] hint: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let form = SessionRequestForm::open(mentor, Vec::new(), hint);
        assert_eq!(form.subject(), expected);
    }

    #[rstest]
    fn selecting_a_date_offers_matching_times(mentor: User, slots: Vec<AvailabilitySlot>) {
        let mut form = SessionRequestForm::open(mentor, slots, None);
        assert!(form.time_options().is_empty());
        form.select_date(date("2025-06-01")).expect("offered date");
        assert_eq!(form.time_options(), [range("09:00-10:00")]);
    }

    #[rstest]
    fn changing_date_clears_time(mentor: User, slots: Vec<AvailabilitySlot>) {
        let mut form = SessionRequestForm::open(mentor, slots, None);
        form.select_date(date("2025-06-01")).expect("offered date");
        form.select_time(range("09:00-10:00")).expect("offered time");
        form.select_date(date("2025-06-03")).expect("offered date");
        assert!(form.time().is_none());
        assert!(!form.can_submit());
    }

    #[rstest]
    fn rejects_times_not_offered_on_date(mentor: User, slots: Vec<AvailabilitySlot>) {
        let mut form = SessionRequestForm::open(mentor, slots, None);
        form.select_date(date("2025-06-01")).expect("offered date");
        assert!(form.select_time(range("14:00-15:00")).is_err());
        assert!(form.select_date(date("2025-06-02")).is_err());
    }

    #[rstest]
    fn only_the_mentors_subjects_can_be_chosen(mentor: User) {
        let mut form = SessionRequestForm::open(mentor, Vec::new(), None);

        let err = form.select_subject("Chemistry").expect_err("not taught");
        assert_eq!(err.code(), ErrorCode::Validation);
        assert_eq!(form.subject(), Some("Algebra"));

        form.select_subject(" Geometry ").expect("taught subject");
        assert_eq!(form.subject(), Some("Geometry"));
    }

    #[rstest]
    fn empty_subject_blocks_submission(mentor: User, mentee: Email) {
        let mut form = SessionRequestForm::open(mentor, Vec::new(), None);
        form.select_subject("").expect("clearing is always allowed");
        assert!(!form.can_submit());
        let err = form.submission(&mentee).expect_err("no subject");
        assert_eq!(err.message(), "Please select a subject");
    }

    #[rstest]
    fn availability_requires_date_and_time(mentor: User, mentee: Email, slots: Vec<AvailabilitySlot>) {
        let form = SessionRequestForm::open(mentor, slots, None);
        assert!(!form.can_submit());
        let err = form.submission(&mentee).expect_err("no slot chosen");
        assert_eq!(err.message(), "Please select a date and time");
    }

    #[rstest]
    fn scheduled_submission_matches_example(mentor: User, mentee: Email, slots: Vec<AvailabilitySlot>) {
        let mut form = SessionRequestForm::open(mentor, slots, None);
        form.select_date(date("2025-06-01")).expect("offered date");
        form.select_time(range("09:00-10:00")).expect("offered time");
        assert!(form.can_submit());

        let Ok(SessionRequestSubmission::Scheduled(payload)) = form.submission(&mentee) else {
            panic!("expected a scheduled submission");
        };
        assert_eq!(payload.subject, "Algebra");
        assert_eq!(payload.scheduled_date, date("2025-06-01"));
        assert_eq!(payload.scheduled_time.to_string(), "09:00-10:00");
        assert_eq!(payload.mentee_email, mentee);
        assert!(payload.message.is_none());
    }

    #[rstest]
    fn no_availability_submits_unscheduled_with_note(mentor: User, mentee: Email) {
        let mut form = SessionRequestForm::open(mentor, Vec::new(), None);
        form.set_message("Help with quadratics");
        assert!(form.can_submit());

        let Ok(SessionRequestSubmission::Unscheduled(payload)) = form.submission(&mentee) else {
            panic!("expected an unscheduled submission");
        };
        let message = payload.message.expect("note present");
        assert!(message.starts_with("Help with quadratics"));
        assert!(message.ends_with(DEFERRED_SCHEDULING_NOTE));
    }
}
