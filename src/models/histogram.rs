// Response-time histogram schemas; active-trace counts are keyed by their slots.

use serde::{Deserialize, Serialize};

/// Latency slot of a histogram schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotType {
    Fast,
    Normal,
    Slow,
    VerySlow,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramSlot {
    /// Upper bound of the slot in milliseconds; 0 for the open-ended slots.
    pub slot_time: i32,
    pub slot_type: SlotType,
    pub slot_name: &'static str,
}

impl HistogramSlot {
    const fn new(slot_time: i32, slot_type: SlotType, slot_name: &'static str) -> Self {
        Self {
            slot_time,
            slot_type,
            slot_name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramSchema {
    pub type_code: i32,
    pub fast: HistogramSlot,
    pub normal: HistogramSlot,
    pub slow: HistogramSlot,
    pub very_slow: HistogramSlot,
    pub error: HistogramSlot,
}

impl HistogramSchema {
    pub const FAST: HistogramSchema = HistogramSchema {
        type_code: 1,
        fast: HistogramSlot::new(100, SlotType::Fast, "100ms"),
        normal: HistogramSlot::new(300, SlotType::Normal, "300ms"),
        slow: HistogramSlot::new(500, SlotType::Slow, "500ms"),
        very_slow: HistogramSlot::new(0, SlotType::VerySlow, "Slow"),
        error: HistogramSlot::new(-1, SlotType::Error, "Error"),
    };

    pub const NORMAL: HistogramSchema = HistogramSchema {
        type_code: 2,
        fast: HistogramSlot::new(1000, SlotType::Fast, "1s"),
        normal: HistogramSlot::new(3000, SlotType::Normal, "3s"),
        slow: HistogramSlot::new(5000, SlotType::Slow, "5s"),
        very_slow: HistogramSlot::new(0, SlotType::VerySlow, "Slow"),
        error: HistogramSlot::new(-1, SlotType::Error, "Error"),
    };

    pub fn slot(&self, slot_type: SlotType) -> &HistogramSlot {
        match slot_type {
            SlotType::Fast => &self.fast,
            SlotType::Normal => &self.normal,
            SlotType::Slow => &self.slow,
            SlotType::VerySlow => &self.very_slow,
            SlotType::Error => &self.error,
        }
    }
}

/// Which stock schema an agent reported; serialized as its type code name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistogramSchemaType {
    Fast,
    Normal,
}

impl HistogramSchemaType {
    pub fn schema(self) -> &'static HistogramSchema {
        match self {
            HistogramSchemaType::Fast => &HistogramSchema::FAST,
            HistogramSchemaType::Normal => &HistogramSchema::NORMAL,
        }
    }

    /// Looks up a schema by the numeric code agents send.
    pub fn from_type_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(HistogramSchemaType::Fast),
            2 => Some(HistogramSchemaType::Normal),
            _ => None,
        }
    }
}
