// src/weights/stream_weights.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const MIN_STREAM_WEIGHT: u8 = 1;
pub const MAX_STREAM_WEIGHT: u8 = 5;
pub const DEFAULT_STREAM_WEIGHT: u8 = 3;

/// Job streams offered by the recruitment portal.
pub const KNOWN_STREAMS: [&str; 25] = [
    "Internal Audit",
    "Logistic / Supply Chain / Asset / GA",
    "Corporate Communications/Digital Public Relations/Media Relations",
    "Performance Management",
    "Operasi / Produksi / Proyek",
    "Bisnis Niaga / Pemasaran",
    "Layanan",
    "Treasury",
    "SDM / HC",
    "Aktuaria",
    "Corporate Secretary",
    "Keuangan",
    "Risiko Bisnis / Enterprise Risk",
    "Developer Information Technology",
    "Strategic Planning",
    "Pengembangan Usaha / R&D",
    "Fleet Management",
    "Pengembangan Usaha / R & D",
    "Engineering & Maintenance",
    "Capital Market Investment Banking",
    "Risk Management",
    "Legal & Compliance",
    "Digitalisasi & IT",
    "Analyst Research",
    "Sistem Management & Safety",
];

/// Stream name to weight in `[1, 5]`. Streams not in the map weigh 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamWeights(BTreeMap<String, u8>);

impl StreamWeights {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every known stream at the default weight.
    pub fn defaults() -> Self {
        Self(
            KNOWN_STREAMS
                .iter()
                .map(|s| (s.to_string(), DEFAULT_STREAM_WEIGHT))
                .collect(),
        )
    }

    pub fn get(&self, stream: &str) -> u8 {
        self.0.get(stream).copied().unwrap_or(0)
    }

    /// Set a weight, clamped into range. Returns the stored value.
    pub fn set(&mut self, stream: &str, weight: i64) -> u8 {
        let clamped = weight.clamp(MIN_STREAM_WEIGHT as i64, MAX_STREAM_WEIGHT as i64) as u8;
        self.0.insert(stream.to_string(), clamped);
        clamped
    }

    /// Read a `{stream: weight}` JSON object. Entries that are not integral numbers are skipped.
    pub fn from_json_object(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut weights = Self::empty();
        for (stream, raw) in object {
            let weight = match raw {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            };
            if let Some(weight) = weight {
                weights.set(stream, weight);
            }
        }
        Some(weights)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_known_streams() {
        let weights = StreamWeights::defaults();
        assert_eq!(weights.len(), KNOWN_STREAMS.len());
        assert_eq!(weights.get("Treasury"), DEFAULT_STREAM_WEIGHT);
        assert_eq!(weights.get("Astronaut"), 0);
    }

    #[test]
    fn test_set_clamps() {
        let mut weights = StreamWeights::empty();
        assert_eq!(weights.set("Treasury", 9), 5);
        assert_eq!(weights.set("Layanan", -2), 1);
        assert_eq!(weights.get("Treasury"), 5);
    }

    #[test]
    fn test_from_json_object_skips_garbage() {
        let weights = StreamWeights::from_json_object(&serde_json::json!({
            "Developer Information Technology": 5,
            "Analyst Research": "4",
            "Treasury": 2.0,
            "Layanan": "high",
            "Keuangan": null
        }))
        .unwrap();

        assert_eq!(weights.len(), 3);
        assert_eq!(weights.get("Analyst Research"), 4);
        assert_eq!(weights.get("Treasury"), 2);
        assert_eq!(weights.get("Layanan"), 0);

        assert!(StreamWeights::from_json_object(&serde_json::json!([1, 2])).is_none());
    }
}
