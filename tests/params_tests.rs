// Host-side tests for the parameter store and its bindings.

use std::cell::RefCell;
use std::rc::Rc;
use torus_core::*;

#[test]
fn defaults_match_panel_defaults() {
    let store = ParameterStore::new(Params::default());
    assert_eq!(store.get(ParamName::Red), 1.0);
    assert_eq!(store.get(ParamName::Green), 1.0);
    assert_eq!(store.get(ParamName::Blue), 1.0);
    assert_eq!(store.get(ParamName::Threshold), 0.5);
    assert_eq!(store.get(ParamName::Strength), 0.4);
    assert_eq!(store.get(ParamName::Radius), 0.8);
}

#[test]
fn every_param_has_one_binding_and_a_folder() {
    for name in ParamName::ALL {
        match name.binding() {
            ParamBinding::Uniform(_) => assert_eq!(name.folder(), "Colors"),
            ParamBinding::Bloom(_) => assert_eq!(name.folder(), "Bloom"),
        }
        assert_eq!(ParamName::from_key(name.key()), Some(name));
    }
    assert_eq!(ParamName::from_key("alpha"), None);
}

#[test]
fn strength_range_is_wider() {
    assert_eq!(ParamName::Strength.range(), (0.0, 3.0));
    for name in ParamName::ALL {
        if name != ParamName::Strength {
            assert_eq!(name.range(), (0.0, 1.0));
        }
    }
}

#[test]
fn set_notifies_observer_synchronously() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut store = ParameterStore::new(Params::default());
    let sink = seen.clone();
    store.on_change(ParamName::Green, move |v| sink.borrow_mut().push(v));

    let change = store.set(ParamName::Green, 0.3);
    assert_eq!(*seen.borrow(), vec![0.3]);
    assert_eq!(change.binding(), ParamBinding::Uniform(ColorChannel::Green));
    assert_eq!(store.get(ParamName::Green), 0.3);

    // other params do not reach this observer
    store.set(ParamName::Blue, 0.1);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn registering_again_replaces_the_observer() {
    let first = Rc::new(RefCell::new(0));
    let second = Rc::new(RefCell::new(0));
    let mut store = ParameterStore::new(Params::default());
    let f = first.clone();
    store.on_change(ParamName::Radius, move |_| *f.borrow_mut() += 1);
    let s = second.clone();
    store.on_change(ParamName::Radius, move |_| *s.borrow_mut() += 1);

    store.set(ParamName::Radius, 0.2);
    assert_eq!(*first.borrow(), 0);
    assert_eq!(*second.borrow(), 1);
}

#[test]
fn values_pass_through_unclamped() {
    let mut store = ParameterStore::new(Params::default());
    store.set(ParamName::Strength, 7.5);
    store.set(ParamName::Red, -1.0);
    assert_eq!(store.get(ParamName::Strength), 7.5);
    assert_eq!(store.values().red, -1.0);
}

#[test]
fn bloom_settings_follow_their_fields() {
    let mut bloom = BloomSettings::default();
    assert_eq!(bloom, BloomSettings::from_params(&Params::default()));
    bloom.set(BloomField::Strength, 2.0);
    bloom.set(BloomField::Threshold, 0.1);
    assert_eq!(bloom.strength, 2.0);
    assert_eq!(bloom.threshold, 0.1);
    assert_eq!(bloom.radius, 0.8);
}
