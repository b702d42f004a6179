//! # Button-Triggered Print Loop
//!
//! Polls the button line and runs one print cycle per physical press:
//!
//! 1. **Idle**: read the button every poll interval until it reads pressed (active-low).
//! 2. **Printing**: run the press action (compose + dispatch) synchronously.
//! 3. Wait for the release, polling at the same interval, then sleep a settle delay
//!    before returning to Idle so contact bounce cannot retrigger.
//!
//! A failing press action is logged and the loop goes back to Idle. Only a failure
//! to read the button itself ends the loop.

use crate::config::GpioConfig;
use crate::error::Result;
use log::{error, info};
use std::convert::Infallible;
use std::thread;
use std::time::Duration;

/// Trait for input pin interface
pub trait InputPin {
    fn is_high(&self) -> Result<bool>;
}

/// Blocking delay used between polls
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps the calling thread
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Result of one press/print/release cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    Printed,
    Failed,
}

pub struct ButtonLoop<B, S> {
    button: B,
    sleeper: S,
    poll_interval: Duration,
    settle_delay: Duration,
}

impl<B: InputPin, S: Sleeper> ButtonLoop<B, S> {
    pub fn new(button: B, sleeper: S, gpio: &GpioConfig) -> Self {
        Self {
            button,
            sleeper,
            poll_interval: gpio.poll_interval,
            settle_delay: gpio.settle_delay,
        }
    }

    /// Active-low: a raw value of 0 means the button is held down
    fn is_pressed(&self) -> Result<bool> {
        Ok(!self.button.is_high()?)
    }

    /// Block in Idle until the button reads pressed.
    pub fn wait_for_press(&mut self) -> Result<()> {
        while !self.is_pressed()? {
            self.sleeper.sleep(self.poll_interval);
        }
        Ok(())
    }

    /// Block until the button reads released, then let the contacts settle.
    pub fn wait_for_release(&mut self) -> Result<()> {
        while self.is_pressed()? {
            self.sleeper.sleep(self.poll_interval);
        }
        self.sleeper.sleep(self.settle_delay);
        Ok(())
    }

    /// Run a single Idle -> Printing -> Idle cycle.
    pub fn run_cycle<F>(&mut self, mut on_press: F) -> Result<CycleOutcome>
    where
        F: FnMut() -> Result<()>,
    {
        self.wait_for_press()?;
        info!("🔘 Button pressed, printing label");

        let outcome = match on_press() {
            Ok(()) => CycleOutcome::Printed,
            Err(e) => {
                error!("❌ Label cycle failed: {}", e);
                CycleOutcome::Failed
            }
        };

        self.wait_for_release()?;
        info!("✅ Button released, waiting for next press");
        Ok(outcome)
    }

    /// Run cycles forever. Returns only when the button line cannot be read.
    pub fn run<F>(&mut self, mut on_press: F) -> Result<Infallible>
    where
        F: FnMut() -> Result<()>,
    {
        loop {
            self.run_cycle(&mut on_press)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabelError;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    const POLL: Duration = Duration::from_millis(50);
    const SETTLE: Duration = Duration::from_millis(200);

    /// Replays raw line levels, one per read, then reports a read failure
    struct ScriptedButton {
        levels: RefCell<VecDeque<bool>>,
    }

    impl ScriptedButton {
        fn new(levels: &[u8]) -> Self {
            Self {
                levels: RefCell::new(levels.iter().map(|&l| l != 0).collect()),
            }
        }
    }

    impl InputPin for ScriptedButton {
        fn is_high(&self) -> Result<bool> {
            self.levels
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| LabelError::LineReadFailed("script exhausted".into()))
        }
    }

    #[derive(Default)]
    struct RecordingSleeper {
        sleeps: Vec<Duration>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&mut self, duration: Duration) {
            self.sleeps.push(duration);
        }
    }

    fn scripted_loop(levels: &[u8]) -> ButtonLoop<ScriptedButton, RecordingSleeper> {
        ButtonLoop::new(
            ScriptedButton::new(levels),
            RecordingSleeper::default(),
            &GpioConfig::default(),
        )
    }

    fn count_prints(levels: &[u8]) -> usize {
        let mut button_loop = scripted_loop(levels);
        let mut prints = 0;
        let result = button_loop.run(|| {
            prints += 1;
            Ok(())
        });
        assert!(matches!(result, Err(LabelError::LineReadFailed(_))));
        prints
    }

    #[test]
    fn test_single_cycle_sleep_pattern() {
        let mut button_loop = scripted_loop(&[1, 1, 0, 0, 1]);
        let outcome = button_loop.run_cycle(|| Ok(())).unwrap();

        assert_eq!(outcome, CycleOutcome::Printed);
        // two idle polls, one poll while held, then the settle delay
        assert_eq!(button_loop.sleeper.sleeps, vec![POLL, POLL, POLL, SETTLE]);
    }

    #[test]
    fn test_held_press_prints_once() {
        for held_polls in 1..=20 {
            let mut levels = vec![1, 1, 1];
            levels.extend(std::iter::repeat(0).take(held_polls));
            levels.extend([1, 1, 1]);
            assert_eq!(count_prints(&levels), 1, "held for {} polls", held_polls);
        }
    }

    #[test]
    fn test_separate_presses_print_separately() {
        assert_eq!(count_prints(&[1, 0, 1, 1, 0, 0, 1, 0, 1]), 3);
    }

    #[test]
    fn test_no_press_never_prints() {
        assert_eq!(count_prints(&[1; 50]), 0);
    }

    #[test]
    fn test_failed_cycle_returns_to_idle() {
        let mut button_loop = scripted_loop(&[0, 1, 0, 1]);
        let mut attempts = 0;

        let first = button_loop
            .run_cycle(|| {
                attempts += 1;
                Err(LabelError::FileWriteFailed("disk full".into()))
            })
            .unwrap();
        assert_eq!(first, CycleOutcome::Failed);

        let second = button_loop
            .run_cycle(|| {
                attempts += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(second, CycleOutcome::Printed);
        assert_eq!(attempts, 2);
    }

    #[test]
    fn test_release_waited_out_even_after_failure() {
        let mut button_loop = scripted_loop(&[0, 0, 0, 1]);
        let outcome = button_loop
            .run_cycle(|| Err(LabelError::PrintCommandFailed("lp exited with 1".into())))
            .unwrap();
        assert_eq!(outcome, CycleOutcome::Failed);
        assert_eq!(button_loop.sleeper.sleeps.last(), Some(&SETTLE));
    }

    #[test]
    fn test_read_failure_is_fatal() {
        let mut button_loop = scripted_loop(&[]);
        let result = button_loop.run_cycle(|| Ok(()));
        assert!(matches!(result, Err(LabelError::LineReadFailed(_))));
    }

    /// Button whose level is a function of simulated time
    struct SimulatedButton {
        clock: Rc<Cell<Duration>>,
        press: (Duration, Duration),
        bounce_until: Duration,
        end: Duration,
    }

    impl InputPin for SimulatedButton {
        fn is_high(&self) -> Result<bool> {
            let now = self.clock.get();
            if now >= self.end {
                return Err(LabelError::LineReadFailed("simulation over".into()));
            }
            let (down, up) = self.press;
            let held = now >= down && now < up;
            // contacts chatter for a while after release
            let bouncing = now >= up && now < self.bounce_until && (now.as_millis() / 7) % 2 == 0;
            Ok(!(held || bouncing))
        }
    }

    /// Advances the shared clock by the requested delay plus a varying jitter
    struct JitterSleeper {
        clock: Rc<Cell<Duration>>,
        step: u64,
    }

    impl Sleeper for JitterSleeper {
        fn sleep(&mut self, duration: Duration) {
            self.step += 1;
            let jitter = Duration::from_millis((self.step * 13) % 25);
            self.clock.set(self.clock.get() + duration + jitter);
        }
    }

    #[test]
    fn test_bouncy_press_with_jitter_prints_once() {
        for start_ms in [0u64, 17, 49, 120, 333] {
            for held_ms in [30u64, 60, 140, 800] {
                let clock = Rc::new(Cell::new(Duration::ZERO));
                let down = Duration::from_millis(start_ms + 100);
                let up = down + Duration::from_millis(held_ms);
                let button = SimulatedButton {
                    clock: clock.clone(),
                    press: (down, up),
                    bounce_until: up + Duration::from_millis(150),
                    end: up + Duration::from_secs(3),
                };
                let sleeper = JitterSleeper {
                    clock: clock.clone(),
                    step: start_ms,
                };
                let mut button_loop = ButtonLoop::new(button, sleeper, &GpioConfig::default());

                let print_clock = clock.clone();
                let mut prints = 0;
                let result = button_loop.run(|| {
                    prints += 1;
                    // printing takes a while
                    print_clock.set(print_clock.get() + Duration::from_millis(20));
                    Ok(())
                });

                assert!(result.is_err());
                // A press shorter than one poll can slip between reads entirely
                assert!(
                    prints <= 1,
                    "start {}ms held {}ms printed {} times",
                    start_ms,
                    held_ms,
                    prints
                );
                if held_ms >= 75 {
                    assert_eq!(prints, 1, "start {}ms held {}ms", start_ms, held_ms);
                }
            }
        }
    }
}
