//! Subject lists: the profile picker and the landing-page catalogue.

use super::{Error, Role};

/// Subjects a user can attach to their profile.
pub const PROFILE_SUBJECTS: [&str; 12] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "English",
    "History",
    "Geography",
    "Computer Science",
    "Economics",
    "Psychology",
    "Art",
    "Music",
];

/// Browsable categories on the landing page.
pub const SUBJECT_CATEGORIES: [(&str, &[&str]); 8] = [
    (
        "Mathematics",
        &["Algebra 1", "Algebra 2", "Geometry", "Trigonometry", "Calculus", "Statistics"],
    ),
    (
        "Science",
        &["Biology", "Chemistry", "Physics", "Earth Science", "Environmental Science"],
    ),
    (
        "English",
        &["Literature", "Writing", "Grammar", "Reading Comprehension", "Essay Writing"],
    ),
    (
        "History",
        &["World History", "US History", "European History", "Ancient Civilizations"],
    ),
    (
        "Coding",
        &["Python", "JavaScript", "Java", "HTML/CSS", "Web Development", "Game Development"],
    ),
    ("Foreign Languages", &["Spanish", "French", "German", "Mandarin", "Latin"]),
    ("Arts", &["Music", "Drawing", "Painting", "Photography", "Digital Art"]),
    ("Test Prep", &["SAT", "ACT", "AP Exams", "College Prep"]),
];

/// A subject matched by a landing-page search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectMatch {
    /// Category the subject belongs to.
    pub category: &'static str,
    /// Subject name.
    pub subject: &'static str,
}

/// Case-insensitive substring search across every catalogue category.
///
/// A blank query matches nothing.
pub fn search_catalogue(query: &str) -> Vec<SubjectMatch> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    SUBJECT_CATEGORIES
        .iter()
        .flat_map(|&(category, subjects)| {
            subjects
                .iter()
                .map(move |&subject| SubjectMatch { category, subject })
        })
        .filter(|found| found.subject.to_lowercase().contains(&needle))
        .collect()
}

/// Subjects of a catalogue category.
pub fn category_subjects(category: &str) -> Option<&'static [&'static str]> {
    SUBJECT_CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, subjects)| *subjects)
}

/// A user's in-progress subject selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectSelection {
    selected: Vec<String>,
}

impl SubjectSelection {
    /// Start from the subjects already on the profile.
    pub fn new(selected: Vec<String>) -> Self {
        Self { selected }
    }

    /// Selected subjects in selection order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Whether `subject` is selected.
    pub fn contains(&self, subject: &str) -> bool {
        self.selected.iter().any(|s| s == subject)
    }

    /// Add `subject` if absent, remove it if present.
    pub fn toggle(&mut self, subject: &str) {
        if self.contains(subject) {
            self.selected.retain(|s| s != subject);
        } else {
            self.selected.push(subject.to_owned());
        }
    }

    /// The selection to save; at least one subject is required.
    pub fn validated(&self) -> Result<Vec<String>, Error> {
        if self.selected.is_empty() {
            return Err(Error::validation("Please select at least one subject"));
        }
        Ok(self.selected.clone())
    }

    /// Picker prompt for the viewer's role.
    pub const fn prompt(role: Role) -> &'static str {
        match role {
            Role::Mentor | Role::Both => "Select subjects you can teach:",
            Role::Mentee => "Select subjects you want to learn:",
        }
    }
}
