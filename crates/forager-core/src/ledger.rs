//! Search state and its per-step transitions.
//!
//! One step of an economy runs in a fixed order:
//!
//! 1. **Buy** -- optionally pay for one producer ([`Ledger::buy`]).
//! 2. **Collect** -- every active producer yields ([`Ledger::collect`]).
//! 3. **Finalize** -- the unit bought in step 1 joins the fleet
//!    ([`Ledger::finalize_build`]).
//! 4. **Advance** -- the minute counter moves on ([`Ledger::advance_minute`]).
//!
//! A unit bought in a step therefore never yields in that same step.

use std::fmt;

use crate::catalog::Catalog;
use crate::counter::Counter;
use crate::event::TradeEvent;
use crate::id::*;

/// A branchable snapshot of one economy: minute, stock, and owned producers.
#[derive(Debug, Clone)]
pub struct Ledger {
    minute: u32,
    horizon: u32,
    target: ResourceId,
    stock: Counter<ResourceId>,
    owned: Counter<ProducerId>,
    pending_build: Option<ProducerId>,
    parent: Option<LedgerId>,
    events: Vec<TradeEvent>,
    record_events: bool,
}

impl Ledger {
    /// The starting ledger: one `starter` unit, no resources, minute 1.
    pub fn root(catalog: &Catalog, starter: ProducerId, target: ResourceId, horizon: u32) -> Self {
        let mut owned = catalog.empty_fleet();
        owned.set(starter, 1);
        Self {
            minute: 1,
            horizon,
            target,
            stock: catalog.empty_stock(),
            owned,
            pending_build: None,
            parent: None,
            events: Vec::new(),
            record_events: false,
        }
    }

    /// Record narration events on this ledger and every branch of it.
    pub fn with_events(mut self, record: bool) -> Self {
        self.record_events = record;
        self
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn target(&self) -> ResourceId {
        self.target
    }

    pub fn stock(&self) -> &Counter<ResourceId> {
        &self.stock
    }

    pub fn owned(&self) -> &Counter<ProducerId> {
        &self.owned
    }

    pub fn pending_build(&self) -> Option<ProducerId> {
        self.pending_build
    }

    pub fn parent(&self) -> Option<LedgerId> {
        self.parent
    }

    /// Narration of the step that produced this ledger.
    pub fn events(&self) -> &[TradeEvent] {
        &self.events
    }

    /// Amount of the target resource banked so far.
    pub fn target_stock(&self) -> u32 {
        self.stock.get(self.target)
    }

    /// Steps still able to take a purchase that pays off: `horizon - minute`.
    pub fn minutes_remaining(&self) -> u32 {
        self.horizon.saturating_sub(self.minute)
    }

    /// Copy this ledger for a new branch. Stock and fleet are independent of
    /// the original; narration starts empty.
    pub fn branch(&self, parent: Option<LedgerId>) -> Ledger {
        Ledger {
            minute: self.minute,
            horizon: self.horizon,
            target: self.target,
            stock: self.stock.clone(),
            owned: self.owned.clone(),
            pending_build: self.pending_build,
            parent,
            events: Vec::new(),
            record_events: self.record_events,
        }
    }

    /// Every owned producer yields `count × output` into stock.
    pub fn collect(&mut self, catalog: &Catalog) {
        let Ledger {
            stock,
            owned,
            events,
            record_events,
            ..
        } = self;
        for (producer, count) in owned.iter_nonzero() {
            let Some(def) = catalog.producer(producer) else {
                continue;
            };
            stock.add_scaled(&def.output, count);
            if *record_events {
                let mut gained = catalog.empty_stock();
                gained.add_scaled(&def.output, count);
                events.push(TradeEvent::Collected {
                    producer,
                    count,
                    gained,
                    stock: stock.clone(),
                });
            }
        }
    }

    /// Pay for `producer` and hold it as the pending build. Does nothing and
    /// returns `false` if the price is not covered.
    pub fn buy(&mut self, catalog: &Catalog, producer: ProducerId) -> bool {
        if catalog.deduct(producer, &mut self.stock).is_err() {
            return false;
        }
        self.pending_build = Some(producer);
        if self.record_events {
            if let Some(def) = catalog.producer(producer) {
                self.events.push(TradeEvent::Spent {
                    producer,
                    price: def.price.clone(),
                });
            }
        }
        true
    }

    /// Move the pending build, if any, into the fleet.
    pub fn finalize_build(&mut self) {
        if let Some(producer) = self.pending_build.take() {
            self.owned.add(producer, 1);
            if self.record_events {
                self.events.push(TradeEvent::Built {
                    producer,
                    owned: self.owned.get(producer),
                });
            }
        }
    }

    pub fn advance_minute(&mut self) -> &mut Self {
        self.minute += 1;
        self
    }

    /// Past the horizon: nothing else can change.
    pub fn is_done(&self) -> bool {
        self.minute > self.horizon
    }

    /// On the final production step. A unit bought now would never yield.
    pub fn is_last_step(&self) -> bool {
        self.minute == self.horizon
    }

    /// Strictly more of the target resource than `other`. Ties are not better.
    pub fn is_better_than(&self, other: &Ledger) -> bool {
        self.target_stock() > other.target_stock()
    }

    /// Memoization key: minute, then every resource amount, then every
    /// producer count, each in id order.
    pub fn state_key(&self) -> StateKey {
        let mut cells = Vec::with_capacity(1 + self.stock.len() + self.owned.len());
        cells.push(self.minute);
        cells.extend_from_slice(self.stock.cells());
        cells.extend_from_slice(self.owned.cells());
        StateKey(cells.into_boxed_slice())
    }
}

/// Fixed-width identity of a ledger's future.
///
/// Every field is one `u32` cell and the number of cells is fixed by the
/// catalog, so two keys from the same catalog are equal exactly when their
/// minute, stock, and fleet are equal. Parent links, pending builds, and
/// narration are left out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(Box<[u32]>);

impl StateKey {
    /// Width of one field in the textual rendering.
    pub const FIELD_WIDTH: usize = 10;

    pub fn cells(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for StateKey {
    /// Each cell zero-padded to [`StateKey::FIELD_WIDTH`] digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.0.iter() {
            write!(f, "{cell:0width$}", width = Self::FIELD_WIDTH)?;
        }
        Ok(())
    }
}
