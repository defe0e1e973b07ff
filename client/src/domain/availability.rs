//! Mentor availability: slots, date derivation, and the slot editor.
//!
//! A mentor's availability is a flat list of `(date, start, end)` slots that
//! the backend stores wholesale. Mentees pick from it by date first and then
//! by time; mentors edit it locally and save the full list back.

use std::collections::BTreeSet;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::time::short_date_label;
use super::{ClockTime, Error, TimeRange};

/// A mentor-declared open window on a specific date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// Calendar date.
    pub date: NaiveDate,
    /// Window start.
    pub start_time: ClockTime,
    /// Window end.
    pub end_time: ClockTime,
}

impl AvailabilitySlot {
    /// Build a slot.
    pub fn new(date: NaiveDate, start_time: ClockTime, end_time: ClockTime) -> Self {
        Self {
            date,
            start_time,
            end_time,
        }
    }

    /// The slot's window as the `HH:MM-HH:MM` choice a mentee submits.
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

/// A selectable date together with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateOption {
    /// Calendar date.
    pub date: NaiveDate,
    /// Label such as `Sun, Jun 1, 2025`.
    pub label: String,
}

/// Distinct dates present in `slots`, ascending.
///
/// # Examples
/// ```
/// use studierbridge_client::domain::{available_dates, AvailabilitySlot};
///
/// let slot = |d: &str, s: &str, e: &str| AvailabilitySlot::new(
///     d.parse().unwrap(), s.parse().unwrap(), e.parse().unwrap());
/// let slots = [
///     slot("2025-06-03", "14:00", "15:00"),
///     slot("2025-06-01", "09:00", "10:00"),
///     slot("2025-06-03", "16:00", "17:00"),
/// ];
/// let dates: Vec<_> = available_dates(&slots).into_iter().map(|o| o.date.to_string()).collect();
/// assert_eq!(dates, ["2025-06-01", "2025-06-03"]);
/// ```
pub fn available_dates(slots: &[AvailabilitySlot]) -> Vec<DateOption> {
    slots
        .iter()
        .map(|slot| slot.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|date| DateOption {
            date,
            label: short_date_label(date),
        })
        .collect()
}

/// Slots on `date`, in their original order.
pub fn slots_on(slots: &[AvailabilitySlot], date: NaiveDate) -> Vec<AvailabilitySlot> {
    slots.iter().filter(|slot| slot.date == date).copied().collect()
}

/// Start-of-hour choices offered by the availability editor.
pub fn time_options() -> Vec<ClockTime> {
    (8..=21).filter_map(|hour| ClockTime::new(hour, 0)).collect()
}

/// Dates a mentor may pick: today through three months ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Earliest selectable date.
    pub min: NaiveDate,
    /// Latest selectable date.
    pub max: NaiveDate,
}

impl DateWindow {
    /// Window starting at `today`.
    pub fn starting(today: NaiveDate) -> Self {
        let max = today.checked_add_months(Months::new(3)).unwrap_or(today);
        Self { min: today, max }
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.min..=self.max).contains(&date)
    }
}

/// One editable field of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotField {
    /// Replace the date.
    Date(NaiveDate),
    /// Replace the start time.
    Start(ClockTime),
    /// Replace the end time.
    End(ClockTime),
}

/// Locally ordered list of slots being edited by a mentor.
///
/// No overlap or ordering validation happens here; the list is sorted by
/// date only when it is prepared for saving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityEditor {
    slots: Vec<AvailabilitySlot>,
}

impl AvailabilityEditor {
    /// Start editing from the stored slots.
    pub fn new(slots: Vec<AvailabilitySlot>) -> Self {
        Self { slots }
    }

    /// Slots in editing order.
    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.slots
    }

    /// Append a default slot (`today`, 09:00–10:00).
    pub fn add_slot(&mut self, today: NaiveDate) {
        let (Some(start), Some(end)) = (ClockTime::new(9, 0), ClockTime::new(10, 0)) else {
            return;
        };
        self.slots.push(AvailabilitySlot::new(today, start, end));
    }

    /// Remove the slot at `index`.
    pub fn remove_slot(&mut self, index: usize) -> Result<AvailabilitySlot, Error> {
        if index >= self.slots.len() {
            return Err(Self::missing(index));
        }
        Ok(self.slots.remove(index))
    }

    /// Edit one field of the slot at `index` in place.
    pub fn update_slot(&mut self, index: usize, field: SlotField) -> Result<(), Error> {
        let slot = self.slots.get_mut(index).ok_or_else(|| Self::missing(index))?;
        match field {
            SlotField::Date(date) => slot.date = date,
            SlotField::Start(start) => slot.start_time = start,
            SlotField::End(end) => slot.end_time = end,
        }
        Ok(())
    }

    /// Replace the whole list.
    pub fn replace(&mut self, slots: Vec<AvailabilitySlot>) {
        self.slots = slots;
    }

    /// The list to send on save: stable-sorted by date ascending.
    pub fn sorted_for_save(&self) -> Vec<AvailabilitySlot> {
        let mut sorted = self.slots.clone();
        sorted.sort_by_key(|slot| slot.date);
        sorted
    }

    fn missing(index: usize) -> Error {
        Error::validation(format!("No time slot at position {}", index + 1))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    fn date(raw: &str) -> NaiveDate {
        raw.parse().expect("fixture date")
    }

    fn slot(d: &str, start: &str, end: &str) -> AvailabilitySlot {
        AvailabilitySlot::new(
            date(d),
            start.parse().expect("fixture start"),
            end.parse().expect("fixture end"),
        )
    }

    #[fixture]
    fn mixed_slots() -> Vec<AvailabilitySlot> {
        vec![
            slot("2025-06-03", "14:00", "15:00"),
            slot("2025-06-01", "09:00", "10:00"),
            slot("2025-06-03", "10:00", "11:00"),
            slot("2025-05-30", "08:00", "09:00"),
            slot("2025-06-01", "12:00", "13:00"),
        ]
    }

    #[rstest]
    fn distinct_dates_are_sorted_without_duplicates(mixed_slots: Vec<AvailabilitySlot>) {
        let dates: Vec<NaiveDate> = available_dates(&mixed_slots)
            .into_iter()
            .map(|option| option.date)
            .collect();
        assert_eq!(
            dates,
            vec![date("2025-05-30"), date("2025-06-01"), date("2025-06-03")]
        );
    }

    #[rstest]
    fn date_options_carry_labels(mixed_slots: Vec<AvailabilitySlot>) {
        let options = available_dates(&mixed_slots);
        let first = options.first().expect("at least one date");
        assert_eq!(first.label, "Fri, May 30, 2025");
    }

    #[rstest]
    fn filtering_by_date_preserves_order(mixed_slots: Vec<AvailabilitySlot>) {
        let on_third = slots_on(&mixed_slots, date("2025-06-03"));
        let ranges: Vec<String> = on_third.iter().map(|s| s.time_range().to_string()).collect();
        assert_eq!(ranges, ["14:00-15:00", "10:00-11:00"]);
        assert!(on_third.iter().all(|s| s.date == date("2025-06-03")));
    }

    #[rstest]
    fn empty_slot_list_has_no_dates() {
        assert!(available_dates(&[]).is_empty());
        assert!(slots_on(&[], date("2025-06-01")).is_empty());
    }

    #[rstest]
    fn time_options_span_working_hours() {
        let options = time_options();
        assert_eq!(options.len(), 14);
        assert_eq!(options.first().map(ToString::to_string).as_deref(), Some("08:00"));
        assert_eq!(options.last().map(ToString::to_string).as_deref(), Some("21:00"));
    }

    #[rstest]
    fn date_window_spans_three_months() {
        let window = DateWindow::starting(date("2025-11-30"));
        assert_eq!(window.max, date("2026-02-28"));
        assert!(window.contains(date("2025-12-25")));
        assert!(!window.contains(date("2025-11-29")));
    }

    #[rstest]
    fn editor_adds_default_slot_for_today() {
        let mut editor = AvailabilityEditor::default();
        editor.add_slot(date("2025-06-01"));
        assert_eq!(editor.slots(), [slot("2025-06-01", "09:00", "10:00")]);
    }

    #[rstest]
    fn editor_edits_in_place(mixed_slots: Vec<AvailabilitySlot>) {
        let mut editor = AvailabilityEditor::new(mixed_slots);
        editor
            .update_slot(0, SlotField::End("16:00".parse().expect("time")))
            .expect("slot exists");
        editor
            .update_slot(0, SlotField::Date(date("2025-06-04")))
            .expect("slot exists");
        assert_eq!(editor.slots().first(), Some(&slot("2025-06-04", "14:00", "16:00")));
    }

    #[rstest]
    fn editor_reports_missing_positions(mixed_slots: Vec<AvailabilitySlot>) {
        let mut editor = AvailabilityEditor::new(mixed_slots);
        let err = editor.remove_slot(9).expect_err("out of range");
        assert_eq!(err.message(), "No time slot at position 10");
        assert_eq!(editor.slots().len(), 5);
    }

    #[rstest]
    fn save_order_is_stable_by_date(mixed_slots: Vec<AvailabilitySlot>) {
        let editor = AvailabilityEditor::new(mixed_slots);
        let sorted = editor.sorted_for_save();
        let rendered: Vec<String> = sorted
            .iter()
            .map(|s| format!("{} {}", s.date, s.time_range()))
            .collect();
        assert_eq!(
            rendered,
            [
                "2025-05-30 08:00-09:00",
                "2025-06-01 09:00-10:00",
                "2025-06-01 12:00-13:00",
                "2025-06-03 14:00-15:00",
                "2025-06-03 10:00-11:00",
            ]
        );
    }
}
