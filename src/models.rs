use serde::Deserialize;

pub mod accounts;
pub mod feedback;
pub mod withdrawals;

/// Amount field as clients actually send it: a JSON number or a numeric
/// string. `as_f64` yields `None` for anything that does not resolve to a
/// finite number.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(value) if value.is_finite() => Some(*value),
            LooseNumber::Number(_) => None,
            LooseNumber::Text(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }
}
