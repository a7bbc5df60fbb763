//! Sample sequences and step-function evaluation.
//!
//! A signal is stored as the sparse list of instants at which its value changed.
//! Evaluating it at an arbitrary time is a zero-order hold: the value of the last
//! sample at or before that time. Both queries here binary-search the sorted
//! sample list and return exactly what a front-to-back scan would.

/// Token reported for any time before a signal's first sample.
pub const UNKNOWN: &str = "x";

/// Token for a high-impedance value.
pub const HIGH_Z: &str = "z";

/// A single value change: at `time` the signal took `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub time: u64,
    pub value: String,
}

impl Sample {
    pub fn new(time: u64, value: impl Into<String>) -> Self {
        Self {
            time,
            value: value.into(),
        }
    }
}

/// Width and change history of one signal, as delivered by a trace source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalData {
    pub width: u32,
    pub samples: Vec<Sample>,
}

impl SignalData {
    pub fn new(width: u32, samples: Vec<Sample>) -> Self {
        Self {
            width: width.max(1),
            samples,
        }
    }

    /// Time of the last recorded change, if any.
    pub fn last_time(&self) -> Option<u64> {
        self.samples.last().map(|sample| sample.time)
    }
}

/// Value of the last sample with `time <= t`, or [`UNKNOWN`] if there is none.
pub fn value_at(samples: &[Sample], t: u64) -> &str {
    let idx = samples.partition_point(|sample| sample.time <= t);
    match idx {
        0 => UNKNOWN,
        _ => &samples[idx - 1].value,
    }
}

/// Smallest sample time strictly greater than `t`, or `fallback` when the
/// sequence has no later change.
pub fn next_change_at(samples: &[Sample], t: u64, fallback: u64) -> u64 {
    let idx = samples.partition_point(|sample| sample.time <= t);
    samples.get(idx).map_or(fallback, |sample| sample.time)
}

/// True when the token is made only of `0`/`1` digits.
pub fn is_binary(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b == b'0' || b == b'1')
}

/// Uppercase hexadecimal of a pure-binary token, or `None` for anything else.
///
/// Conversion is nibble-wise so arbitrarily wide buses never overflow.
pub fn decode_hex(token: &str) -> Option<String> {
    if !is_binary(token) {
        return None;
    }

    let bits = token.as_bytes();
    let lead = (4 - bits.len() % 4) % 4;
    let mut hex = String::with_capacity(bits.len() / 4 + 1);
    let mut nibble = 0u8;
    for (i, bit) in std::iter::repeat(b'0').take(lead).chain(bits.iter().copied()).enumerate() {
        nibble = (nibble << 1) | (bit - b'0');
        if i % 4 == 3 {
            if !(hex.is_empty() && nibble == 0) {
                hex.push(char::from_digit(u32::from(nibble), 16)?.to_ascii_uppercase());
            }
            nibble = 0;
        }
    }

    if hex.is_empty() {
        hex.push('0');
    }
    Some(hex)
}

/// Label drawn inside a bus field: hex for binary tokens, the uppercased token
/// otherwise. Symbolic tokens are never run through numeric conversion.
pub fn bus_label(token: &str) -> String {
    decode_hex(token).unwrap_or_else(|| token.to_uppercase())
}

/// Text shown in the values pane: hex for binary tokens, the token as-is otherwise.
pub fn display_value(token: &str) -> String {
    decode_hex(token).unwrap_or_else(|| token.to_string())
}
