//! Whole-UI show/hide with a two-phase, timed hide.

use std::time::{Duration, Instant};

use tracing::{debug, info};

pub const HIDE_TRANSITION_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    FadeIn,
    FadeOut,
}

impl Transition {
    pub fn class_name(&self) -> &'static str {
        match self {
            Transition::FadeIn => "fade-in",
            Transition::FadeOut => "fade-out",
        }
    }
}

/// What the root surface has to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootEffect {
    /// Make the surface rendered and play the entrance transition.
    Show,
    /// Play the exit transition; the surface stays rendered.
    FadeOut,
    /// Stop rendering the surface.
    Remove,
}

impl RootEffect {
    pub fn transition(&self) -> Option<Transition> {
        match self {
            RootEffect::Show => Some(Transition::FadeIn),
            RootEffect::FadeOut => Some(Transition::FadeOut),
            RootEffect::Remove => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    Hidden,
    Visible,
    Hiding { remove_at: Instant },
}

#[derive(Debug)]
pub struct VisibilityController {
    state: VisibilityState,
    hide_delay: Duration,
    cancel_hide_on_show: bool,
    /// A removal that outlived the `Hiding` state because a show arrived first.
    orphaned_remove_at: Option<Instant>,
    show_at: Option<Instant>,
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new(HIDE_TRANSITION_DELAY, false)
    }
}

impl VisibilityController {
    pub fn new(hide_delay: Duration, cancel_hide_on_show: bool) -> Self {
        Self {
            state: VisibilityState::Hidden,
            hide_delay,
            cancel_hide_on_show,
            orphaned_remove_at: None,
            show_at: None,
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.state, VisibilityState::Hidden)
    }

    pub fn show(&mut self) -> RootEffect {
        if let VisibilityState::Hiding { remove_at } = self.state {
            if self.cancel_hide_on_show {
                debug!("show cancelled pending hide");
            } else {
                // The scheduled removal still fires and hides the surface again.
                self.orphaned_remove_at = Some(remove_at);
            }
        }
        self.state = VisibilityState::Visible;
        info!("election ui shown");
        RootEffect::Show
    }

    pub fn hide(&mut self, now: Instant) -> RootEffect {
        match self.state {
            VisibilityState::Visible => {
                let remove_at = self
                    .orphaned_remove_at
                    .take()
                    .unwrap_or(now + self.hide_delay);
                self.state = VisibilityState::Hiding { remove_at };
                info!("election ui hiding");
            }
            VisibilityState::Hiding { .. } | VisibilityState::Hidden => {
                debug!("hide while not visible; re-applying exit transition");
            }
        }
        RootEffect::FadeOut
    }

    /// Schedules a show for later; used by standalone start-up.
    pub fn schedule_show(&mut self, at: Instant) {
        self.show_at = Some(at);
    }

    /// Fires every transition whose deadline is at or before `now`, in deadline order.
    pub fn tick(&mut self, now: Instant) -> Vec<RootEffect> {
        let mut effects = Vec::new();
        loop {
            let remove_at = match self.state {
                VisibilityState::Hiding { remove_at } => Some(remove_at),
                _ => self.orphaned_remove_at,
            }
            .filter(|at| *at <= now);
            let show_at = self.show_at.filter(|at| *at <= now);

            match (remove_at, show_at) {
                (Some(remove), Some(show)) if show < remove => {
                    self.show_at = None;
                    effects.push(self.show());
                }
                (Some(_), _) => {
                    self.orphaned_remove_at = None;
                    self.state = VisibilityState::Hidden;
                    info!("election ui hidden");
                    effects.push(RootEffect::Remove);
                }
                (None, Some(_)) => {
                    self.show_at = None;
                    effects.push(self.show());
                }
                (None, None) => return effects,
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        let remove_at = match self.state {
            VisibilityState::Hiding { remove_at } => Some(remove_at),
            _ => self.orphaned_remove_at,
        };
        match (remove_at, self.show_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
#[path = "tests/visibility_tests.rs"]
mod tests;
