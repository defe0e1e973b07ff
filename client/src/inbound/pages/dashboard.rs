//! Signed-in home page: role-gated quick actions and the unread badge.
//!
//! While mounted the dashboard polls the notification counter on a fixed
//! interval. The poller runs on its own task and publishes through watch
//! channels. It stops when the page unmounts or is dropped, and when the
//! backend rejects the session it logs out and publishes the move to Login.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{Mount, PageContext, PageLifetime, Route, Transition};
use crate::domain::{AuthSession, Role, User};

/// Default delay between unread-count refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Shortcut offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    FindMentor,
    FindMentees,
    SetAvailability,
    MySessions,
    UpdateSubjects,
    UpdateProfile,
    Notifications,
}

impl QuickAction {
    /// Button text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FindMentor => "Find a Mentor",
            Self::FindMentees => "Find Mentees",
            Self::SetAvailability => "Set Availability",
            Self::MySessions => "My Sessions",
            Self::UpdateSubjects => "Update Subjects",
            Self::UpdateProfile => "Update Profile",
            Self::Notifications => "Notifications",
        }
    }

    /// Page the action opens.
    pub const fn route(self) -> Route {
        match self {
            Self::FindMentor => Route::FindMentor,
            Self::FindMentees => Route::FindMentee,
            Self::SetAvailability => Route::SetAvailability,
            Self::MySessions => Route::MySessions,
            Self::UpdateSubjects => Route::SubjectSelection,
            Self::UpdateProfile => Route::UpdateProfile,
            Self::Notifications => Route::Notifications,
        }
    }

    /// Actions available to `role`, in display order.
    pub fn for_role(role: Role) -> Vec<Self> {
        let mut actions = Vec::with_capacity(7);
        if role.can_browse_mentors() {
            actions.push(Self::FindMentor);
        }
        if role.can_browse_mentees() {
            actions.push(Self::FindMentees);
        }
        if role.can_set_availability() {
            actions.push(Self::SetAvailability);
        }
        actions.extend([
            Self::MySessions,
            Self::UpdateSubjects,
            Self::UpdateProfile,
            Self::Notifications,
        ]);
        actions
    }
}

/// Dashboard page controller.
pub struct DashboardPage {
    ctx: PageContext,
    lifetime: PageLifetime,
    session: AuthSession,
    unread: watch::Receiver<u32>,
    transition: watch::Receiver<Transition>,
    publish: Option<PollerOutputs>,
    poller: Option<JoinHandle<()>>,
}

/// Channels the poller writes to.
struct PollerOutputs {
    unread: watch::Sender<u32>,
    transition: watch::Sender<Transition>,
}

impl DashboardPage {
    /// Mount the dashboard, redirecting to Login when signed out.
    pub fn mount(ctx: PageContext) -> Mount<Self> {
        let Some(session) = ctx.signed_in() else {
            return Mount::Redirect(Route::Login);
        };
        let (unread_tx, unread) = watch::channel(0);
        let (transition_tx, transition) = watch::channel(Transition::Stay);
        Mount::Ready(Self {
            ctx,
            lifetime: PageLifetime::new(),
            session,
            unread,
            transition,
            publish: Some(PollerOutputs {
                unread: unread_tx,
                transition: transition_tx,
            }),
            poller: None,
        })
    }

    pub fn user(&self) -> &User {
        &self.session.user
    }

    /// Quick actions for the signed-in user's role.
    pub fn quick_actions(&self) -> Vec<QuickAction> {
        QuickAction::for_role(self.session.user.role)
    }

    /// Open the page behind `action`.
    pub fn open(&self, action: QuickAction) -> Transition {
        Transition::Navigate(action.route())
    }

    /// Latest unread count.
    pub fn unread_count(&self) -> u32 {
        *self.unread.borrow()
    }

    /// Subscribe to unread count changes.
    pub fn unread_updates(&self) -> watch::Receiver<u32> {
        self.unread.clone()
    }

    /// Navigation requested by the poller; `Stay` until the session is
    /// rejected.
    pub fn transition(&self) -> Transition {
        self.transition.borrow().clone()
    }

    /// Subscribe to navigation requested by the poller.
    pub fn transition_updates(&self) -> watch::Receiver<Transition> {
        self.transition.clone()
    }

    /// Start the unread-count poller. Calling it again has no effect.
    ///
    /// The first refresh happens immediately, then once per `period`.
    pub fn start_polling(&mut self, period: Duration) {
        let Some(publish) = self.publish.take() else {
            return;
        };
        let poller = UnreadPoller {
            ctx: self.ctx.clone(),
            session: self.session.clone(),
            period,
            publish,
            token: self.lifetime.token(),
        };
        self.poller = Some(tokio::spawn(poller.run()));
    }

    /// Clear the session and go to Login.
    pub fn logout(&self) -> Transition {
        self.lifetime.unmount();
        self.ctx.logout()
    }

    /// Tear the page down and wait for the poller to exit.
    pub async fn unmount(&mut self) {
        self.lifetime.unmount();
        let Some(poller) = self.poller.take() else {
            return;
        };
        if let Err(error) = poller.await {
            warn!(%error, "unread poller ended abnormally");
        }
    }
}

impl Drop for DashboardPage {
    fn drop(&mut self) {
        self.lifetime.unmount();
    }
}

struct UnreadPoller {
    ctx: PageContext,
    session: AuthSession,
    period: Duration,
    publish: PollerOutputs,
    token: CancellationToken,
}

impl UnreadPoller {
    async fn run(self) {
        let notifications = self.ctx.ports.notifications.clone();
        let email = &self.session.user.email;
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                () = self.token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            let result = notifications.fetch_notifications(email).await;
            if self.token.is_cancelled() {
                break;
            }
            match result {
                Ok(feed) => {
                    self.publish.unread.send_replace(feed.unread_count);
                }
                Err(error) if error.is_unauthorized() => {
                    warn!(%error, "backend rejected the session; logging out");
                    self.publish.transition.send_replace(self.ctx.logout());
                    break;
                }
                Err(error) => warn!(%error, "unread count refresh failed"),
            }
        }
        debug!("unread poller stopped");
    }
}
