use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use super::{RevealCommand, RevealMachine, RevealOptions};

/// Everything the reveal driver needs from the page it runs in.
pub trait RevealHost {
    type Target;
    type Observer: RevealObserver + 'static;
    /// Dropping a timer cancels it.
    type Timer: 'static;

    fn observer_supported(&self) -> bool;
    /// `None` when the observer could not be created.
    fn observe(
        &self,
        target: &Self::Target,
        options: &RevealOptions,
        on_report: Box<dyn Fn(bool, f64)>,
    ) -> Option<Self::Observer>;
    fn arm_timer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Timer;
}

pub trait RevealObserver {
    fn disconnect(&self);
}

/// Owns everything one observed element holds on to. Dropping the last
/// strong handle drops the pending timer and the observer with it.
pub struct Driver<H: RevealHost> {
    host: H,
    machine: RefCell<RevealMachine>,
    timer: RefCell<Option<H::Timer>>,
    observer: RefCell<Option<H::Observer>>,
    set_visible: Box<dyn Fn(bool)>,
}

impl<H: RevealHost + 'static> Driver<H> {
    fn report(self: &Rc<Self>, is_intersecting: bool, ratio: f64) {
        let commands = self.machine.borrow_mut().report(is_intersecting, ratio);
        self.run(commands);
        self.publish();
    }

    fn run(self: &Rc<Self>, commands: Vec<RevealCommand>) {
        for command in commands {
            match command {
                RevealCommand::ArmTimer { ticket, delay_ms } => {
                    let driver = Rc::downgrade(self);
                    let timer = self.host.arm_timer(
                        delay_ms,
                        Box::new(move || {
                            if let Some(driver) = driver.upgrade() {
                                let commands = driver.machine.borrow_mut().timer_elapsed(ticket);
                                driver.run(commands);
                                driver.publish();
                            }
                        }),
                    );
                    // Replacing the slot cancels whatever was armed before.
                    let previous = self.timer.borrow_mut().replace(timer);
                    drop(previous);
                }
                RevealCommand::CancelTimer => {
                    let cancelled = self.timer.borrow_mut().take();
                    drop(cancelled);
                }
                RevealCommand::Disconnect => {
                    // The observer stays in its slot: this can run from inside its own callback.
                    if let Some(observer) = self.observer.borrow().as_ref() {
                        observer.disconnect();
                    }
                }
            }
        }
    }

    fn publish(&self) {
        let visible = {
            let machine = self.machine.borrow();
            debug!("Reveal phase {:?}", machine.phase());
            machine.is_visible()
        };
        (self.set_visible)(visible);
    }

    /// Cancels a pending delay and stops observing.
    pub fn detach(self: &Rc<Self>) {
        let commands = self.machine.borrow_mut().detach();
        self.run(commands);
    }
}

/// Starts observing `target`.
///
/// Returns `None` when there is nothing to keep alive: no target, no
/// observer support (content is shown straight away), or a trigger-once
/// element that has already been shown.
pub fn attach<H: RevealHost + 'static>(
    host: H,
    target: Option<&H::Target>,
    options: &RevealOptions,
    already_visible: bool,
    set_visible: impl Fn(bool) + 'static,
) -> Option<Rc<Driver<H>>> {
    let Some(target) = target else {
        debug!("Reveal target is not mounted, nothing to observe");
        return None;
    };

    if options.trigger_once && already_visible {
        debug!("Reveal already settled, not observing again");
        return None;
    }

    if !host.observer_supported() {
        debug!("IntersectionObserver unavailable, showing content immediately");
        set_visible(true);
        return None;
    }

    let driver = Rc::new(Driver {
        host,
        machine: RefCell::new(RevealMachine::new(options)),
        timer: RefCell::new(None),
        observer: RefCell::new(None),
        set_visible: Box::new(set_visible),
    });
    driver.machine.borrow_mut().attach();

    let weak = Rc::downgrade(&driver);
    let observer = driver.host.observe(
        target,
        options,
        Box::new(move |is_intersecting, ratio| {
            if let Some(driver) = weak.upgrade() {
                driver.report(is_intersecting, ratio);
            }
        }),
    );

    match observer {
        Some(observer) => {
            *driver.observer.borrow_mut() = Some(observer);
            Some(driver)
        }
        None => {
            warn!("Could not observe reveal target, showing content immediately");
            (driver.set_visible)(true);
            None
        }
    }
}
