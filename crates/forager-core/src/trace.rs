//! Winning-path reconstruction.
//!
//! Expanded ledgers are frozen into a [`TraceArena`] and their children point
//! back at them by [`LedgerId`]. Walking those links from a terminal ledger
//! yields the per-minute narration of the path that reached it.

use std::fmt::Write as _;

use slotmap::SlotMap;

use crate::catalog::Catalog;
use crate::event::TradeEvent;
use crate::id::LedgerId;
use crate::ledger::Ledger;

/// What an expanded ledger contributes to a trace.
#[derive(Debug, Clone)]
pub struct TraceFrame {
    /// Minute the events happened in, or `None` for the root.
    pub minute: Option<u32>,
    pub parent: Option<LedgerId>,
    pub events: Vec<TradeEvent>,
}

impl TraceFrame {
    fn of(ledger: &Ledger) -> Self {
        // Children are advanced right after their step, so their events belong
        // to the previous minute. The root has no step behind it.
        let minute = ledger.parent().map(|_| ledger.minute().saturating_sub(1));
        Self {
            minute,
            parent: ledger.parent(),
            events: ledger.events().to_vec(),
        }
    }
}

/// Append-only store of expanded ledgers for one search run.
#[derive(Debug, Default)]
pub struct TraceArena {
    frames: SlotMap<LedgerId, TraceFrame>,
}

impl TraceArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze `ledger` and return the id its children should point at.
    pub fn record(&mut self, ledger: &Ledger) -> LedgerId {
        self.frames.insert(TraceFrame::of(ledger))
    }

    pub fn get(&self, id: LedgerId) -> Option<&TraceFrame> {
        self.frames.get(id)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Root-to-leaf narration of the path that reached `leaf`.
    pub fn trace_for(&self, leaf: &Ledger) -> Trace {
        let mut steps = Vec::new();
        let leaf_frame = TraceFrame::of(leaf);
        let mut next = leaf_frame.parent;
        if let Some(minute) = leaf_frame.minute {
            steps.push(TraceStep {
                minute,
                events: leaf_frame.events,
            });
        }
        while let Some(id) = next {
            let Some(frame) = self.frames.get(id) else {
                break;
            };
            if let Some(minute) = frame.minute {
                steps.push(TraceStep {
                    minute,
                    events: frame.events.clone(),
                });
            }
            next = frame.parent;
        }
        steps.reverse();
        Trace { steps }
    }
}

/// One minute of narration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub minute: u32,
    pub events: Vec<TradeEvent>,
}

/// The narration of a winning path, oldest minute first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    pub steps: Vec<TraceStep>,
}

impl Trace {
    /// Render as `== Minute N ==` blocks, one event per line.
    pub fn render(&self, catalog: &Catalog) -> String {
        let mut out = String::new();
        for step in &self.steps {
            let _ = writeln!(out, "== Minute {} ==", step.minute);
            for event in &step.events {
                let _ = writeln!(out, "{}", event.describe(catalog));
            }
            out.push('\n');
        }
        out
    }

    /// Producers bought along the path, in purchase order.
    pub fn purchases(&self) -> Vec<(u32, crate::id::ProducerId)> {
        self.steps
            .iter()
            .flat_map(|step| {
                step.events.iter().filter_map(move |event| match event {
                    TradeEvent::Spent { producer, .. } => Some((step.minute, *producer)),
                    _ => None,
                })
            })
            .collect()
    }
}
