use crate::animation::SpinInFlight;
use crate::config::Config;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use spindle::protocol::Snapshot;
use spindle::{
    ClearPolicy, Label, OptionList, Spin, Wheel, WheelError, generate_spin, pointer_index,
    segments,
};
use std::time::{Duration, Instant};

/// A spin that was accepted and is now animating.
#[derive(Debug, Clone, Copy)]
pub struct SpinStarted {
    pub serial: u64,
    pub spin: Spin,
    pub duration: Duration,
}

/// The one wheel the daemon serves, plus everything around it that is not the
/// wheel's own state: the spin in flight, the last winner and the random source.
pub struct Session {
    wheel: Wheel,
    config: Config,
    rng: SmallRng,
    in_flight: Option<SpinInFlight>,
    last_winner: Option<Label>,
    next_serial: u64,
    /// Config that arrived mid-spin, applied once the spin is committed.
    deferred: Option<Config>,
}

impl Session {
    pub fn new(config: Config) -> Result<Self, WheelError> {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    pub fn with_rng(config: Config, rng: SmallRng) -> Result<Self, WheelError> {
        let options = config.default_options()?;
        Ok(Self {
            wheel: Wheel::new(options, config.list),
            config,
            rng,
            in_flight: None,
            last_winner: None,
            next_serial: 0,
            deferred: None,
        })
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_spinning(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_winner(&self) -> Option<&Label> {
        self.last_winner.as_ref()
    }

    fn ensure_idle(&self) -> Result<(), WheelError> {
        if self.is_spinning() {
            return Err(WheelError::SpinInProgress);
        }
        Ok(())
    }

    /// Runs `mutate` with the label under the pointer kept in place.
    fn preserving<F>(&mut self, mutate: F) -> Result<(), WheelError>
    where
        F: FnOnce(&mut Wheel) -> Result<(), WheelError>,
    {
        self.ensure_idle()?;

        let current = self.wheel.winner(&self.config.spin).ok().cloned();
        if let Some(label) = current {
            self.wheel.request_preserve(label);
        }

        if let Err(e) = mutate(&mut self.wheel) {
            self.wheel.abandon_preserve();
            return Err(e);
        }

        if let Some(rotation) = self.wheel.reconcile_if_pending(&self.config.spin) {
            log::debug!("Realigned wheel to {:.3}°", rotation);
        }
        Ok(())
    }

    pub fn add(&mut self, text: &str) -> Result<(), WheelError> {
        self.preserving(|wheel| {
            wheel
                .add_option(text)
                .map(|label| log::debug!("Added '{}'", label))
        })
    }

    pub fn remove(&mut self, label: &str) -> Result<(), WheelError> {
        self.preserving(|wheel| {
            wheel
                .remove_option(label)
                .map(|removed| log::debug!("Removed '{}'", removed))
        })
    }

    pub fn edit(&mut self, label: &str, text: &str) -> Result<(), WheelError> {
        self.preserving(|wheel| {
            wheel
                .edit_option(label, text)
                .map(|edited| log::debug!("Renamed '{}' to '{}'", label, edited))
        })
    }

    pub fn clear(&mut self) -> Result<(), WheelError> {
        self.ensure_idle()?;
        let options = match self.config.list.clear {
            ClearPolicy::Empty => OptionList::new(),
            ClearPolicy::Defaults => self.config.default_options()?,
        };
        self.start_over(options);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), WheelError> {
        self.ensure_idle()?;
        let options = self.config.default_options()?;
        self.start_over(options);
        self.last_winner = None;
        Ok(())
    }

    fn start_over(&mut self, options: OptionList) {
        self.wheel.abandon_preserve();
        self.wheel.replace(options);
        self.wheel.set_rotation(0.0);
    }

    pub fn spin(&mut self, now: Instant) -> Result<SpinStarted, WheelError> {
        self.ensure_idle()?;

        let from = self.wheel.rotation();
        let spin = generate_spin(
            self.wheel.options(),
            from,
            &self.config.spin,
            self.wheel.limits().min_options,
            &mut self.rng,
        )?;
        self.wheel.set_rotation(spin.rotation);

        self.next_serial += 1;
        let duration = self.config.animation.duration();
        self.in_flight = Some(SpinInFlight {
            serial: self.next_serial,
            from,
            to: spin.rotation,
            started: now,
            duration,
        });
        log::debug!(
            "Spin {} towards segment {} ({} turns, {:.3}°)",
            self.next_serial,
            spin.segment_index,
            spin.turns,
            spin.rotation
        );

        Ok(SpinStarted {
            serial: self.next_serial,
            spin,
            duration,
        })
    }

    /// Commits the spin once its animation is over and returns the winner.
    pub fn finish_spin(&mut self, serial: u64) -> Result<Label, WheelError> {
        if self.in_flight.as_ref().map(|f| f.serial) != Some(serial) {
            return Err(WheelError::InvalidState("no such spin in flight"));
        }
        self.in_flight = None;

        let winner = self.wheel.winner(&self.config.spin)?.clone();
        self.last_winner = Some(winner.clone());
        if let Some(config) = self.deferred.take() {
            self.apply(config);
        }
        Ok(winner)
    }

    /// A spin in flight finishes under the config it started with; the new one is
    /// applied when it is committed.
    pub fn reload(&mut self, config: Config) {
        if self.is_spinning() {
            log::debug!("Spin in flight, deferring config reload");
            self.deferred = Some(config);
        } else {
            self.apply(config);
        }
    }

    fn apply(&mut self, config: Config) {
        self.wheel.set_limits(config.list);
        self.config = config;
    }

    pub fn snapshot(&self, now: Instant) -> Snapshot {
        let rotation = self.in_flight.as_ref().map_or(self.wheel.rotation(), |f| {
            f.rotation_at(now, self.config.animation.easing)
        });
        let options = self.wheel.options();
        let pointer_angle = self.config.spin.pointer_angle;

        Snapshot {
            segments: segments(options),
            rotation,
            pointer_angle,
            pointed: pointer_index(options.len(), rotation, pointer_angle)
                .and_then(|i| options.get(i))
                .cloned(),
            spinning: self.is_spinning(),
            can_spin: !self.is_spinning() && self.wheel.can_spin(),
            last_winner: self.last_winner.clone(),
        }
    }
}
