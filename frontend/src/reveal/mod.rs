//! Scroll-triggered reveal: flips a `visible` flag when an element enters the
//! viewport. The state machine lives here, `driver` carries out its commands
//! and [`use_reveal`] wires that to an `IntersectionObserver` and `gloo-timers`.

mod driver;
mod hook;

pub use hook::use_reveal;

use log::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// CSS margin applied to the viewport box.
    pub root_margin: String,
    /// Stay visible after the first entry and stop observing.
    pub trigger_once: bool,
    pub delay_ms: u32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            trigger_once: true,
            delay_ms: 0,
        }
    }
}

impl RevealOptions {
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn replay(mut self) -> Self {
        self.trigger_once = false;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    Unobserved,
    Idle,
    /// Waiting on the delay timer with the given ticket.
    Pending(u32),
    Visible,
    /// Visible for good; the observer has been let go.
    Settled,
}

/// Side effects the driver has to carry out after feeding the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealCommand {
    /// Start the delay timer, replacing any running one.
    ArmTimer { ticket: u32, delay_ms: u32 },
    CancelTimer,
    Disconnect,
}

#[derive(Debug)]
pub struct RevealMachine {
    threshold: f64,
    trigger_once: bool,
    delay_ms: u32,
    phase: RevealPhase,
    next_ticket: u32,
}

impl RevealMachine {
    pub fn new(options: &RevealOptions) -> Self {
        Self {
            threshold: options.threshold,
            trigger_once: options.trigger_once,
            delay_ms: options.delay_ms,
            phase: RevealPhase::Unobserved,
            next_ticket: 0,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.phase, RevealPhase::Visible | RevealPhase::Settled)
    }

    #[cfg(test)]
    fn has_triggered_once(&self) -> bool {
        self.phase == RevealPhase::Settled
    }

    pub fn attach(&mut self) {
        if self.phase == RevealPhase::Unobserved {
            self.phase = RevealPhase::Idle;
        }
    }

    fn qualifies(&self, is_intersecting: bool, ratio: f64) -> bool {
        is_intersecting && ratio >= self.threshold
    }

    /// Feeds one intersection report for the element.
    pub fn report(&mut self, is_intersecting: bool, ratio: f64) -> Vec<RevealCommand> {
        let entering = self.qualifies(is_intersecting, ratio);
        match (self.phase, entering) {
            (RevealPhase::Unobserved | RevealPhase::Settled, _) => Vec::new(),
            (RevealPhase::Idle, true) if self.delay_ms > 0 => {
                self.next_ticket = self.next_ticket.wrapping_add(1);
                self.phase = RevealPhase::Pending(self.next_ticket);
                vec![RevealCommand::ArmTimer {
                    ticket: self.next_ticket,
                    delay_ms: self.delay_ms,
                }]
            }
            (RevealPhase::Idle, true) => self.become_visible(),
            (RevealPhase::Pending(_), false) => {
                self.phase = RevealPhase::Idle;
                vec![RevealCommand::CancelTimer]
            }
            (RevealPhase::Visible, false) => {
                self.phase = RevealPhase::Idle;
                Vec::new()
            }
            (RevealPhase::Idle, false)
            | (RevealPhase::Pending(_), true)
            | (RevealPhase::Visible, true) => Vec::new(),
        }
    }

    /// The delay timer for `ticket` has fired.
    pub fn timer_elapsed(&mut self, ticket: u32) -> Vec<RevealCommand> {
        match self.phase {
            RevealPhase::Pending(current) if current == ticket => self.become_visible(),
            _ => {
                debug!("Ignoring stale reveal timer {}", ticket);
                Vec::new()
            }
        }
    }

    pub fn detach(&mut self) -> Vec<RevealCommand> {
        let mut commands = Vec::new();
        if matches!(self.phase, RevealPhase::Pending(_)) {
            commands.push(RevealCommand::CancelTimer);
        }
        if self.phase != RevealPhase::Settled {
            commands.push(RevealCommand::Disconnect);
        }
        self.phase = RevealPhase::Unobserved;
        commands
    }

    fn become_visible(&mut self) -> Vec<RevealCommand> {
        if self.trigger_once {
            self.phase = RevealPhase::Settled;
            vec![RevealCommand::Disconnect]
        } else {
            self.phase = RevealPhase::Visible;
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(options: RevealOptions) -> RevealMachine {
        let mut machine = RevealMachine::new(&options);
        machine.attach();
        machine
    }

    #[test]
    fn starts_idle_after_attach() {
        let mut m = RevealMachine::new(&RevealOptions::default());
        assert_eq!(m.phase(), RevealPhase::Unobserved);
        assert!(m.report(true, 1.0).is_empty());
        m.attach();
        assert_eq!(m.phase(), RevealPhase::Idle);
        assert!(!m.is_visible());
    }

    #[test]
    fn ratio_below_threshold_is_not_an_entry() {
        let mut m = machine(RevealOptions::default().replay().threshold(0.5));
        m.report(true, 0.3);
        assert!(!m.is_visible());
        m.report(true, 0.5);
        assert!(m.is_visible());
    }

    #[test]
    fn trigger_once_stays_visible_and_disconnects() {
        let mut m = machine(RevealOptions::default());

        assert_eq!(m.report(true, 0.4), vec![RevealCommand::Disconnect]);
        assert!(m.is_visible());
        assert!(m.has_triggered_once());

        for (hit, ratio) in [(false, 0.0), (true, 1.0), (false, 0.0)] {
            assert!(m.report(hit, ratio).is_empty());
            assert!(m.is_visible());
        }
    }

    #[test]
    fn replay_flips_on_every_crossing() {
        let mut m = machine(RevealOptions::default().replay());
        let mut seen = Vec::new();
        for (hit, ratio) in [(true, 0.2), (false, 0.0), (true, 0.9), (false, 0.05)] {
            assert!(m.report(hit, ratio).is_empty());
            seen.push(m.is_visible());
        }
        assert_eq!(seen, vec![true, false, true, false]);
    }

    #[test]
    fn delayed_entry_waits_for_timer() {
        let mut m = machine(RevealOptions::default().delay(300));

        let commands = m.report(true, 1.0);
        assert_eq!(
            commands,
            vec![RevealCommand::ArmTimer {
                ticket: 1,
                delay_ms: 300
            }]
        );
        assert!(!m.is_visible());

        assert_eq!(m.timer_elapsed(1), vec![RevealCommand::Disconnect]);
        assert!(m.is_visible());
    }

    #[test]
    fn exit_before_delay_cancels_activation() {
        let mut m = machine(RevealOptions::default().delay(300));
        m.report(true, 1.0);

        // Exit at ~150ms, before the timer.
        assert_eq!(m.report(false, 0.0), vec![RevealCommand::CancelTimer]);
        assert_eq!(m.phase(), RevealPhase::Idle);

        // A late firing of the cancelled timer must not activate.
        assert!(m.timer_elapsed(1).is_empty());
        assert!(!m.is_visible());
    }

    #[test]
    fn re_entry_arms_a_fresh_ticket() {
        let mut m = machine(RevealOptions::default().delay(200).replay());
        m.report(true, 1.0);
        m.report(false, 0.0);
        let commands = m.report(true, 1.0);

        assert_eq!(
            commands,
            vec![RevealCommand::ArmTimer {
                ticket: 2,
                delay_ms: 200
            }]
        );
        assert!(m.timer_elapsed(1).is_empty());
        assert!(m.timer_elapsed(2).is_empty());
        assert!(m.is_visible());
    }

    #[test]
    fn detach_releases_timer_and_observer() {
        let mut m = machine(RevealOptions::default().delay(300));
        m.report(true, 1.0);

        assert_eq!(
            m.detach(),
            vec![RevealCommand::CancelTimer, RevealCommand::Disconnect]
        );
        assert_eq!(m.phase(), RevealPhase::Unobserved);
        assert!(m.timer_elapsed(1).is_empty());
    }

    #[test]
    fn settled_detach_has_nothing_left_to_release() {
        let mut m = machine(RevealOptions::default());
        m.report(true, 1.0);
        assert!(m.detach().is_empty());
    }
}
