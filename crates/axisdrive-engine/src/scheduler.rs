//! Fixed-tick scheduler.
//!
//! One step runs every component's `before_tick` (apply torque), advances the
//! physics world once, then runs every `after_tick` (read joint state). Torque
//! applied on tick N therefore shapes the integration that tick N+1 observes.
//! Components run in registration order.

use crate::context::SimulationContext;
use crate::joint::JointWorld;
use std::collections::BTreeMap;
use std::fmt;

/// Handle returned by [`TickScheduler::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

/// Something driven once per simulation tick.
pub trait TickComponent<W: JointWorld + ?Sized> {
    /// Runs before the world advances. Apply torque here.
    fn before_tick(&mut self, ctx: &SimulationContext, world: &mut W);

    /// Runs after the world advanced. Read joint state here.
    fn after_tick(&mut self, ctx: &SimulationContext, world: &W);
}

/// Registry of tick components over one world.
#[derive(Debug)]
pub struct TickScheduler<C> {
    components: BTreeMap<ComponentId, C>,
    next_id: u64,
}

impl<C> TickScheduler<C> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            components: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Add a component; it runs from the next step on.
    pub fn register(&mut self, component: C) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        self.components.insert(id, component);
        id
    }

    /// Remove a component, returning it.
    pub fn unregister(&mut self, id: ComponentId) -> Option<C> {
        self.components.remove(&id)
    }

    /// Look up a component.
    pub fn get(&self, id: ComponentId) -> Option<&C> {
        self.components.get(&id)
    }

    /// Look up a component mutably.
    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut C> {
        self.components.get_mut(&id)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no components are registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Run one tick. Returns `false` without touching anything while paused.
    pub fn step<W>(&mut self, ctx: &mut SimulationContext, world: &mut W) -> bool
    where
        W: JointWorld + ?Sized,
        C: TickComponent<W>,
    {
        if ctx.is_paused() {
            return false;
        }

        for component in self.components.values_mut() {
            component.before_tick(ctx, world);
        }
        world.advance(ctx.step_time());
        for component in self.components.values_mut() {
            component.after_tick(ctx, world);
        }

        ctx.advance();
        true
    }

    /// Run up to `ticks` steps, returning how many ran.
    pub fn run<W>(&mut self, ctx: &mut SimulationContext, world: &mut W, ticks: u64) -> u64
    where
        W: JointWorld + ?Sized,
        C: TickComponent<W>,
    {
        let mut ran = 0;
        for _ in 0..ticks {
            if !self.step(ctx, world) {
                break;
            }
            ran += 1;
        }
        ran
    }
}

impl<C> Default for TickScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}
