//! The interface through which the viewer reads signal data.

use crate::waveform::sample::{Sample, SignalData};
use std::collections::HashMap;

/// A parsed trace: signal names plus per-signal width and change history.
///
/// Implementations are immutable once built and shared between the load worker
/// and the render loop.
pub trait TraceSource: Send + Sync {
    /// Every signal name, in the order the trace declares them.
    fn signal_names(&self) -> Vec<String>;

    /// Width and samples for `name`, or `None` if the trace has no such signal.
    fn signal(&self, name: &str) -> Option<SignalData>;

    /// Time of the last value change anywhere in the trace.
    fn end_time(&self) -> u64 {
        self.signal_names()
            .iter()
            .filter_map(|name| self.signal(name).and_then(|data| data.last_time()))
            .max()
            .unwrap_or(0)
    }
}

/// Trace held entirely in memory, built signal by signal.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrace {
    order: Vec<String>,
    signals: HashMap<String, SignalData>,
}

impl InMemoryTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a signal; samples are sorted by time, keeping the order of equal times.
    pub fn with_signal(mut self, name: impl Into<String>, width: u32, samples: Vec<Sample>) -> Self {
        self.insert(name, SignalData::new(width, samples));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, mut data: SignalData) {
        let name = name.into();
        data.samples.sort_by_key(|sample| sample.time);
        if self.signals.insert(name.clone(), data).is_none() {
            self.order.push(name);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl TraceSource for InMemoryTrace {
    fn signal_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn signal(&self, name: &str) -> Option<SignalData> {
        self.signals.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_order_and_sorts_samples() {
        let trace = InMemoryTrace::new()
            .with_signal("top.z", 1, vec![Sample::new(9, "1"), Sample::new(2, "0")])
            .with_signal("top.a", 2, vec![]);

        assert_eq!(trace.signal_names(), vec!["top.z", "top.a"]);
        let z = trace.signal("top.z").unwrap();
        assert_eq!(z.samples[0].time, 2);
        assert_eq!(trace.end_time(), 9);
        assert!(trace.signal("top.missing").is_none());
    }

    #[test]
    fn reinserting_replaces_without_duplicating() {
        let mut trace = InMemoryTrace::new();
        trace.insert("clk", SignalData::new(1, vec![Sample::new(0, "0")]));
        trace.insert("clk", SignalData::new(1, vec![Sample::new(0, "1")]));
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.signal("clk").unwrap().samples[0].value, "1");
    }

    #[test]
    fn zero_width_is_raised_to_one() {
        let trace = InMemoryTrace::new().with_signal("w", 0, vec![]);
        assert_eq!(trace.signal("w").unwrap().width, 1);
        assert_eq!(trace.end_time(), 0);
    }
}
