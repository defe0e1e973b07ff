//! Public landing page: subject catalogue, search, and rotating tagline.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use super::{PageLifetime, Route, Transition};
use crate::domain::{SUBJECT_CATEGORIES, SubjectMatch, category_subjects, search_catalogue};

/// Taglines cycled through in the hero banner.
pub const HERO_TAGLINES: [&str; 4] = [
    "Empower. Learn. Connect.",
    "Where Students Lift Each Other Up.",
    "Peer-to-Peer Learning Made Easy.",
    "Academic Help from Students Like You.",
];

/// Delay between tagline changes.
pub const HERO_ROTATION: Duration = Duration::from_secs(3);

/// Landing page controller.
#[derive(Debug, Default)]
pub struct LandingPage {
    lifetime: PageLifetime,
    expanded: Option<&'static str>,
    query: String,
}

impl LandingPage {
    /// Mount the landing page; it needs no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Category names with their subjects.
    pub fn categories(&self) -> &'static [(&'static str, &'static [&'static str])] {
        &SUBJECT_CATEGORIES
    }

    /// Expand `category`, or collapse it when already expanded.
    /// Unknown names are ignored.
    pub fn toggle_category(&mut self, category: &str) {
        let Some((name, _)) = SUBJECT_CATEGORIES.iter().find(|(name, _)| *name == category) else {
            return;
        };
        self.expanded = match self.expanded {
            Some(open) if open == *name => None,
            _ => Some(*name),
        };
    }

    /// The expanded category and its subjects.
    pub fn expanded(&self) -> Option<(&'static str, &'static [&'static str])> {
        let name = self.expanded?;
        category_subjects(name).map(|subjects| (name, subjects))
    }

    /// Replace the search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Subjects matching the current query.
    pub fn search_results(&self) -> Vec<SubjectMatch> {
        search_catalogue(&self.query)
    }

    /// Browse mentors for `subject`.
    pub fn choose_subject(&self, subject: &str) -> Transition {
        Transition::FindMentorFor(subject.to_owned())
    }

    /// Navigate to one of the header or call-to-action targets.
    pub fn go(&self, route: Route) -> Transition {
        Transition::Navigate(route)
    }

    /// Start cycling the tagline; the receiver holds the current index.
    ///
    /// The task stops when the page unmounts or is dropped.
    pub fn rotate_taglines(&self) -> watch::Receiver<usize> {
        let (publish, current) = watch::channel(0_usize);
        let token = self.lifetime.token();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(
                tokio::time::Instant::now() + HERO_ROTATION,
                HERO_ROTATION,
            );
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        publish.send_modify(|index| *index = (*index + 1) % HERO_TAGLINES.len());
                    }
                }
            }
        });
        current
    }

    /// Tagline shown for `index`.
    pub fn tagline(index: usize) -> &'static str {
        HERO_TAGLINES[index % HERO_TAGLINES.len()]
    }

    /// Tear the page down.
    pub fn unmount(&self) {
        self.lifetime.unmount();
    }
}

impl Drop for LandingPage {
    fn drop(&mut self) {
        self.lifetime.unmount();
    }
}
