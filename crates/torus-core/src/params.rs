//! User-tunable parameters and their single downstream binding.
//!
//! Each parameter is owned by the [`ParameterStore`] and bound to exactly one
//! consumer: colour channels feed the shader uniforms, bloom fields feed the
//! post-processing pass. The store itself never clamps; range enforcement is
//! the settings panel's job.

use crate::constants::*;
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamName {
    Red,
    Green,
    Blue,
    Threshold,
    Strength,
    Radius,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BloomField {
    Threshold,
    Strength,
    Radius,
}

/// Where a parameter change lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamBinding {
    Uniform(ColorChannel),
    Bloom(BloomField),
}

impl ParamName {
    pub const ALL: [ParamName; 6] = [
        ParamName::Red,
        ParamName::Green,
        ParamName::Blue,
        ParamName::Threshold,
        ParamName::Strength,
        ParamName::Radius,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ParamName::Red => "red",
            ParamName::Green => "green",
            ParamName::Blue => "blue",
            ParamName::Threshold => "threshold",
            ParamName::Strength => "strength",
            ParamName::Radius => "radius",
        }
    }

    pub fn from_key(key: &str) -> Option<ParamName> {
        ParamName::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Panel folder the parameter is shown under.
    pub fn folder(self) -> &'static str {
        match self.binding() {
            ParamBinding::Uniform(_) => "Colors",
            ParamBinding::Bloom(_) => "Bloom",
        }
    }

    /// Inclusive range declared to the settings panel.
    pub fn range(self) -> (f32, f32) {
        match self {
            ParamName::Strength => (0.0, BLOOM_STRENGTH_MAX),
            _ => (0.0, 1.0),
        }
    }

    pub fn binding(self) -> ParamBinding {
        match self {
            ParamName::Red => ParamBinding::Uniform(ColorChannel::Red),
            ParamName::Green => ParamBinding::Uniform(ColorChannel::Green),
            ParamName::Blue => ParamBinding::Uniform(ColorChannel::Blue),
            ParamName::Threshold => ParamBinding::Bloom(BloomField::Threshold),
            ParamName::Strength => ParamBinding::Bloom(BloomField::Strength),
            ParamName::Radius => ParamBinding::Bloom(BloomField::Radius),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub threshold: f32,
    pub strength: f32,
    pub radius: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            red: DEFAULT_RED,
            green: DEFAULT_GREEN,
            blue: DEFAULT_BLUE,
            threshold: DEFAULT_BLOOM_THRESHOLD,
            strength: DEFAULT_BLOOM_STRENGTH,
            radius: DEFAULT_BLOOM_RADIUS,
        }
    }
}

impl Params {
    pub fn get(&self, name: ParamName) -> f32 {
        match name {
            ParamName::Red => self.red,
            ParamName::Green => self.green,
            ParamName::Blue => self.blue,
            ParamName::Threshold => self.threshold,
            ParamName::Strength => self.strength,
            ParamName::Radius => self.radius,
        }
    }

    fn slot(&mut self, name: ParamName) -> &mut f32 {
        match name {
            ParamName::Red => &mut self.red,
            ParamName::Green => &mut self.green,
            ParamName::Blue => &mut self.blue,
            ParamName::Threshold => &mut self.threshold,
            ParamName::Strength => &mut self.strength,
            ParamName::Radius => &mut self.radius,
        }
    }
}

/// Post-processing settings consumed by the bloom pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomSettings {
    pub threshold: f32,
    pub strength: f32,
    pub radius: f32,
}

impl BloomSettings {
    pub fn from_params(p: &Params) -> Self {
        Self {
            threshold: p.threshold,
            strength: p.strength,
            radius: p.radius,
        }
    }

    pub fn set(&mut self, field: BloomField, value: f32) {
        match field {
            BloomField::Threshold => self.threshold = value,
            BloomField::Strength => self.strength = value,
            BloomField::Radius => self.radius = value,
        }
    }
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self::from_params(&Params::default())
    }
}

/// A change already written to the store, to be applied to its binding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamChange {
    pub name: ParamName,
    pub value: f32,
}

impl ParamChange {
    pub fn binding(&self) -> ParamBinding {
        self.name.binding()
    }
}

type Observer = Box<dyn FnMut(f32)>;

#[derive(Default)]
pub struct ParameterStore {
    values: Params,
    observers: FnvHashMap<ParamName, Observer>,
}

impl ParameterStore {
    pub fn new(values: Params) -> Self {
        Self {
            values,
            observers: FnvHashMap::default(),
        }
    }

    pub fn get(&self, name: ParamName) -> f32 {
        self.values.get(name)
    }

    pub fn values(&self) -> &Params {
        &self.values
    }

    /// Store `value` as-is and notify the observer for `name`, if any.
    pub fn set(&mut self, name: ParamName, value: f32) -> ParamChange {
        *self.values.slot(name) = value;
        if let Some(observer) = self.observers.get_mut(&name) {
            observer(value);
        }
        log::debug!("[params] {}={:.3}", name.key(), value);
        ParamChange { name, value }
    }

    /// Register the observer for `name`, replacing any previous one.
    pub fn on_change(&mut self, name: ParamName, handler: impl FnMut(f32) + 'static) {
        self.observers.insert(name, Box::new(handler));
    }
}
