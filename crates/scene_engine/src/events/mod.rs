//! Event mediator
//!
//! Decouples GUI or window input from the systems that mutate scene
//! state. Every event name maps to at most one subscriber and one
//! actuator; `notify` makes a single synchronous call
//! `subscriber.accept(actuator, event)` and never queues or fans out.
//! Names with no route are dropped silently. An actuator without a
//! handler for the subscriber is treated by the same [`DispatchPolicy`]
//! as a traversal.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::config::DispatchPolicy;
use crate::ecs::system::System;
use crate::error::{SceneError, SceneResult};
use crate::foundation::math::{Mat4, Vec4};

/// Event payload
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EventValue {
    /// No payload
    #[default]
    None,
    /// Toggle state
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Scalar value
    Float(f32),
    /// Free text
    Text(String),
    /// RGBA color or 4-vector
    Vec4(Vec4),
    /// Matrix, e.g. a view matrix
    Matrix(Mat4),
}

/// Named event with a mutable payload
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Routing key
    pub name: String,
    /// Numeric tag
    pub id: u32,
    /// Payload, overwritten on each dispatch
    pub value: EventValue,
}

impl Event {
    /// Event without payload
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
            value: EventValue::None,
        }
    }

    /// Set the payload (builder pattern)
    pub fn with_value(mut self, value: EventValue) -> Self {
        self.value = value;
        self
    }
}

/// Receiver side of an event route
pub trait Subscriber {
    /// Subscriber name, used in logs
    fn name(&self) -> &str;

    /// Let `actuator` apply `event` to this subscriber
    fn accept(&mut self, actuator: &mut dyn System, event: &Event) -> SceneResult<()>;
}

/// Shared handle to a subscriber
pub type SubscriberRef = Rc<RefCell<dyn Subscriber>>;

/// Shared handle to an actuator system
pub type ActuatorRef = Rc<RefCell<dyn System>>;

/// Name-keyed event, subscriber, actuator and publisher tables
#[derive(Default)]
pub struct EventManager {
    events: HashMap<String, Event>,
    subscribers: HashMap<String, SubscriberRef>,
    actuators: HashMap<String, ActuatorRef>,
    publishers: HashMap<String, String>,
    dispatch_policy: DispatchPolicy,
    warned: HashSet<&'static str>,
}

impl EventManager {
    /// Empty event manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty event manager with the given unsupported dispatch policy
    pub fn with_dispatch_policy(policy: DispatchPolicy) -> Self {
        Self {
            dispatch_policy: policy,
            ..Self::default()
        }
    }

    /// Handling of actuators without a handler for their subscriber
    pub fn dispatch_policy(&self) -> DispatchPolicy {
        self.dispatch_policy
    }

    /// Change the unsupported dispatch policy
    pub fn set_dispatch_policy(&mut self, policy: DispatchPolicy) {
        self.dispatch_policy = policy;
    }

    /// Start a validated route table
    pub fn builder() -> EventManagerBuilder {
        EventManagerBuilder::default()
    }

    /// Add an event to the event table
    pub fn register_event(&mut self, event: Event) -> SceneResult<()> {
        if self.events.contains_key(&event.name) {
            return Err(SceneError::DuplicateEvent(event.name));
        }
        log::debug!("Registered event '{}' ({})", event.name, event.id);
        self.events.insert(event.name.clone(), event);
        Ok(())
    }

    /// Route `name` to `subscriber`, replacing any previous subscriber
    pub fn subscribe(&mut self, name: impl Into<String>, subscriber: SubscriberRef) {
        let name = name.into();
        if self.subscribers.insert(name.clone(), subscriber).is_some() {
            log::debug!("Subscriber for event '{}' replaced", name);
        }
    }

    /// Remove the subscriber of `name`
    pub fn unsubscribe(&mut self, name: &str) -> Option<SubscriberRef> {
        self.subscribers.remove(name)
    }

    /// Route `name` to `actuator`, replacing any previous actuator
    pub fn actuate(&mut self, name: impl Into<String>, actuator: ActuatorRef) {
        let name = name.into();
        if self.actuators.insert(name.clone(), actuator).is_some() {
            log::debug!("Actuator for event '{}' replaced", name);
        }
    }

    /// Remove the actuator of `name`
    pub fn unactuate(&mut self, name: &str) -> Option<ActuatorRef> {
        self.actuators.remove(name)
    }

    /// Record `publisher` as the source of `name`
    pub fn publish(&mut self, name: impl Into<String>, publisher: impl Into<String>) {
        let name = name.into();
        let publisher = publisher.into();
        if let Some(previous) = self.publishers.insert(name.clone(), publisher) {
            log::debug!("Publisher '{}' of event '{}' replaced", previous, name);
        }
    }

    /// Forget the publisher of `name`
    pub fn unpublish(&mut self, name: &str) -> Option<String> {
        self.publishers.remove(name)
    }

    /// Deliver `event` to its subscriber through its actuator.
    ///
    /// Returns `Ok(false)` without touching any state when the name has no
    /// subscriber or no actuator, or when the actuator has no handler and
    /// the dispatch policy skips it. On delivery the stored event's payload
    /// is overwritten with `event.value`.
    pub fn notify(&mut self, sender: &str, event: &Event) -> SceneResult<bool> {
        let (Some(subscriber), Some(actuator)) = (
            self.subscribers.get(&event.name),
            self.actuators.get(&event.name),
        ) else {
            log::trace!("Event '{}' from '{}' has no route", event.name, sender);
            return Ok(false);
        };

        let mut subscriber = subscriber
            .try_borrow_mut()
            .map_err(|_| SceneError::DispatchBusy(event.name.clone()))?;
        let mut actuator = actuator
            .try_borrow_mut()
            .map_err(|_| SceneError::DispatchBusy(event.name.clone()))?;

        log::trace!(
            "Event '{}' from '{}' -> {} via {}",
            event.name,
            sender,
            subscriber.name(),
            actuator.name()
        );
        let result = subscriber.accept(&mut *actuator, event);
        if !self.dispatch_policy.apply(actuator.name(), result, &mut self.warned)? {
            return Ok(false);
        }

        if let Some(stored) = self.events.get_mut(&event.name) {
            stored.value = event.value.clone();
        }
        Ok(true)
    }

    /// Registered event by name
    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.get(name)
    }

    /// Event table
    pub fn events(&self) -> &HashMap<String, Event> {
        &self.events
    }

    /// Subscriber table
    pub fn subscribers(&self) -> &HashMap<String, SubscriberRef> {
        &self.subscribers
    }

    /// Actuator table
    pub fn actuators(&self) -> &HashMap<String, ActuatorRef> {
        &self.actuators
    }

    /// Publisher table
    pub fn publishers(&self) -> &HashMap<String, String> {
        &self.publishers
    }

    /// Whether `name` has both a subscriber and an actuator
    pub fn is_routed(&self, name: &str) -> bool {
        self.subscribers.contains_key(name) && self.actuators.contains_key(name)
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .field("subscribers", &self.subscribers.keys().collect::<Vec<_>>())
            .field("actuators", &self.actuators.keys().collect::<Vec<_>>())
            .field("publishers", &self.publishers)
            .field("dispatch_policy", &self.dispatch_policy)
            .finish()
    }
}

/// Builder validating routes against the event table
#[derive(Default)]
pub struct EventManagerBuilder {
    events: Vec<Event>,
    routes: Vec<(String, SubscriberRef, ActuatorRef)>,
    publishers: Vec<(String, String)>,
    dispatch_policy: DispatchPolicy,
}

impl EventManagerBuilder {
    /// Set the unsupported dispatch policy
    pub fn dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.dispatch_policy = policy;
        self
    }

    /// Add an event
    pub fn event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Route an event name to a subscriber and actuator
    pub fn route(mut self, name: impl Into<String>, subscriber: SubscriberRef, actuator: ActuatorRef) -> Self {
        self.routes.push((name.into(), subscriber, actuator));
        self
    }

    /// Record the publisher of an event name
    pub fn publisher(mut self, name: impl Into<String>, publisher: impl Into<String>) -> Self {
        self.publishers.push((name.into(), publisher.into()));
        self
    }

    /// Build the manager; every route and publisher must name a registered event
    pub fn build(self) -> SceneResult<EventManager> {
        let mut manager = EventManager::with_dispatch_policy(self.dispatch_policy);
        for event in self.events {
            manager.register_event(event)?;
        }
        for (name, subscriber, actuator) in self.routes {
            if !manager.events.contains_key(&name) {
                return Err(SceneError::EventNotRegistered(name));
            }
            manager.subscribe(name.clone(), subscriber);
            manager.actuate(name, actuator);
        }
        for (name, publisher) in self.publishers {
            if !manager.events.contains_key(&name) {
                return Err(SceneError::EventNotRegistered(name));
            }
            manager.publish(name, publisher);
        }
        Ok(manager)
    }
}
