//! Value Change Dump loading on top of the `vcd` crate.
//!
//! The whole dump is read eagerly into per-signal sample lists. Names are the
//! dotted scope path plus the variable reference and its bit index, e.g.
//! `top.cpu.data[7:0]`. Timestamps are converted from the header timescale to
//! picoseconds; dumps without a timescale are taken as 1ps per tick.

use crate::error::{Result, WaveError};
use crate::trace::source::TraceSource;
use crate::trace::validation::validate_trace_path;
use crate::waveform::sample::{Sample, SignalData, HIGH_Z, UNKNOWN};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use vcd::{Command, IdCode, Parser, ReferenceIndex, ScopeItem, TimescaleUnit, Value, Var};

const FS_PER_PS: u128 = 1_000;

/// A fully loaded VCD trace.
#[derive(Debug, Clone)]
pub struct VcdTrace {
    names: Vec<String>,
    signals: HashMap<String, SignalData>,
    end_time: u64,
}

impl VcdTrace {
    /// Validate `path` and parse the dump it points to.
    pub fn load(path: &Path) -> Result<Self> {
        validate_trace_path(path)?;
        let file = File::open(path)
            .map_err(|e| WaveError::file_error(format!("Cannot open {}", path.display()), e))?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Parse a dump from any buffered reader; `path` is used for messages only.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut parser = Parser::new(reader);
        let header = parser.parse_header().map_err(|e| parse_error(path, e))?;

        let fs_per_tick = header
            .timescale
            .map_or(FS_PER_PS, |(count, unit)| u128::from(count) * fs_per_unit(unit));

        let mut collector = Collector::default();
        let mut scopes = Vec::new();
        collector.declare(&header.items, &mut scopes);

        let mut time = 0u64;
        for command in parser {
            match command.map_err(|e| parse_error(path, e))? {
                Command::Timestamp(tick) => time = ticks_to_ps(tick, fs_per_tick),
                Command::ChangeScalar(code, value) => {
                    collector.record(code, time, value_char(value).to_string());
                }
                Command::ChangeVector(code, vector) => {
                    let bits: String = vector.iter().map(value_char).collect();
                    collector.record_vector(code, time, &bits);
                }
                _ => {}
            }
        }

        let trace = collector.finish();
        log::info!(
            "loaded {} signals from {} (end time {}ps)",
            trace.names.len(),
            path.display(),
            trace.end_time
        );
        Ok(trace)
    }

}

impl TraceSource for VcdTrace {
    fn signal_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn signal(&self, name: &str) -> Option<SignalData> {
        self.signals.get(name).cloned()
    }

    fn end_time(&self) -> u64 {
        self.end_time
    }
}

/// Accumulates declarations and value changes while the dump is read.
#[derive(Default)]
struct Collector {
    names: Vec<String>,
    data: Vec<SignalData>,
    by_code: HashMap<IdCode, Vec<usize>>,
}

impl Collector {
    fn declare(&mut self, items: &[ScopeItem], scopes: &mut Vec<String>) {
        for item in items {
            match item {
                ScopeItem::Scope(scope) => {
                    scopes.push(scope.identifier.clone());
                    self.declare(&scope.items, scopes);
                    scopes.pop();
                }
                ScopeItem::Var(var) => self.declare_var(var, scopes),
                _ => {}
            }
        }
    }

    fn declare_var(&mut self, var: &Var, scopes: &[String]) {
        let mut name = scopes.join(".");
        if !name.is_empty() {
            name.push('.');
        }
        name.push_str(&var.reference);
        if let Some(index) = &var.index {
            name.push_str(&format_index(index));
        }

        if self.names.contains(&name) {
            log::warn!("duplicate signal declaration {name}, keeping the first");
            return;
        }

        let slot = self.names.len();
        self.names.push(name);
        self.data.push(SignalData::new(var.size, Vec::new()));
        self.by_code.entry(var.code).or_default().push(slot);
    }

    fn record(&mut self, code: IdCode, time: u64, value: String) {
        if let Some(slots) = self.by_code.get(&code) {
            for &slot in slots {
                self.data[slot].samples.push(Sample::new(time, value.clone()));
            }
        }
    }

    fn record_vector(&mut self, code: IdCode, time: u64, bits: &str) {
        if let Some(slots) = self.by_code.get(&code) {
            for &slot in slots {
                let width = self.data[slot].width as usize;
                let token = normalize_vector(bits, width);
                self.data[slot].samples.push(Sample::new(time, token));
            }
        }
    }

    fn finish(self) -> VcdTrace {
        let end_time = self
            .data
            .iter()
            .filter_map(SignalData::last_time)
            .max()
            .unwrap_or(0);
        let signals = self.names.iter().cloned().zip(self.data).collect();
        VcdTrace {
            names: self.names,
            signals,
            end_time,
        }
    }
}

/// Extend a vector value to `width` digits and collapse uniform `x`/`z`.
///
/// Per VCD rules a short value is left-extended with `0` when its leftmost digit
/// is `0` or `1`, and with that digit when it is `x` or `z`.
pub fn normalize_vector(bits: &str, width: usize) -> String {
    let mut token = String::with_capacity(width.max(bits.len()));
    if bits.len() < width {
        let fill = match bits.chars().next() {
            Some(c @ ('x' | 'z')) => c,
            _ => '0',
        };
        token.extend(std::iter::repeat(fill).take(width - bits.len()));
    }
    token.push_str(bits);

    if token.chars().all(|c| c == 'x') {
        return UNKNOWN.to_string();
    }
    if token.chars().all(|c| c == 'z') {
        return HIGH_Z.to_string();
    }
    token
}

fn value_char(value: Value) -> char {
    match value {
        Value::V0 => '0',
        Value::V1 => '1',
        Value::Z => 'z',
        _ => 'x',
    }
}

fn format_index(index: &ReferenceIndex) -> String {
    match index {
        ReferenceIndex::BitSelect(bit) => format!("[{bit}]"),
        ReferenceIndex::Range(msb, lsb) => format!("[{msb}:{lsb}]"),
    }
}

fn fs_per_unit(unit: TimescaleUnit) -> u128 {
    match unit {
        TimescaleUnit::S => 1_000_000_000_000_000,
        TimescaleUnit::MS => 1_000_000_000_000,
        TimescaleUnit::US => 1_000_000_000,
        TimescaleUnit::NS => 1_000_000,
        TimescaleUnit::PS => 1_000,
        TimescaleUnit::FS => 1,
    }
}

fn ticks_to_ps(tick: u64, fs_per_tick: u128) -> u64 {
    let ps = u128::from(tick) * fs_per_tick / FS_PER_PS;
    u64::try_from(ps).unwrap_or(u64::MAX)
}

fn parse_error(path: &Path, err: std::io::Error) -> WaveError {
    match err.kind() {
        std::io::ErrorKind::InvalidData | std::io::ErrorKind::UnexpectedEof => {
            WaveError::trace_parse(path, err.to_string())
        }
        _ => WaveError::file_error(format!("Failed reading {}", path.display()), err),
    }
}
