use crate::config::{ListConfig, SpinConfig};
use crate::error::WheelError;
use crate::options::{Label, OptionList};
use crate::realign::reconcile;
use crate::resolve::{pointer_index, resolve_winner};

/// The mutable wheel: its options, its cumulative rotation and at most one label
/// waiting to be kept under the pointer across the next list change.
///
/// Keeping a label in place is a two-step protocol driven by the caller:
/// [`Wheel::request_preserve`], then one mutation, then [`Wheel::reconcile_if_pending`].
/// A caller that abandons the mutation must call [`Wheel::abandon_preserve`].
#[derive(Debug, Clone)]
pub struct Wheel {
    options: OptionList,
    rotation: f64,
    pending: Option<Label>,
    limits: ListConfig,
}

impl Wheel {
    pub fn new(options: OptionList, limits: ListConfig) -> Self {
        Self {
            options,
            rotation: 0.0,
            pending: None,
            limits,
        }
    }

    pub fn options(&self) -> &OptionList {
        &self.options
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn limits(&self) -> &ListConfig {
        &self.limits
    }

    pub fn pending(&self) -> Option<&Label> {
        self.pending.as_ref()
    }

    /// New limits only apply to later mutations; the current list is kept as is.
    pub fn set_limits(&mut self, limits: ListConfig) {
        self.limits = limits;
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub fn winner(&self, config: &SpinConfig) -> Result<&Label, WheelError> {
        resolve_winner(&self.options, self.rotation, config)
    }

    pub fn pointer_index(&self, config: &SpinConfig) -> Option<usize> {
        pointer_index(self.options.len(), self.rotation, config.pointer_angle)
    }

    pub fn can_spin(&self) -> bool {
        !self.options.is_empty() && self.options.len() >= self.limits.min_options
    }

    /// Replaces any earlier request.
    pub fn request_preserve(&mut self, label: Label) {
        self.pending = Some(label);
    }

    pub fn abandon_preserve(&mut self) {
        self.pending = None;
    }

    /// Consumes the pending label, whether or not it survived the mutation, and
    /// returns the new rotation when one was applied.
    pub fn reconcile_if_pending(&mut self, config: &SpinConfig) -> Option<f64> {
        let label = self.pending.take()?;
        if !self.options.contains(&label) {
            return None;
        }
        self.rotation = reconcile(&self.options, self.rotation, &label, config);
        Some(self.rotation)
    }

    pub fn add_option(&mut self, text: &str) -> Result<&Label, WheelError> {
        self.options.add(text, &self.limits)
    }

    pub fn remove_option(&mut self, label: &str) -> Result<Label, WheelError> {
        self.options.remove(label, &self.limits)
    }

    pub fn edit_option(&mut self, label: &str, text: &str) -> Result<&Label, WheelError> {
        self.options.edit(label, text, &self.limits)
    }

    pub fn clear(&mut self) {
        self.options.clear();
    }

    pub fn replace(&mut self, options: OptionList) {
        self.options = options;
    }
}
