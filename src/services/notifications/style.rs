//! Priority-dependent presentation shared by all channels.

use crate::models::Priority;

pub const URGENT_COLOR: u32 = 0xFF0000;
pub const HIGH_COLOR: u32 = 0xFF8C00;
pub const MEDIUM_COLOR: u32 = 0xFFD700;
pub const LOW_COLOR: u32 = 0x3498DB;

/// Embed color and title emoji for a priority
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriorityStyle {
    pub color: u32,
    pub emoji: &'static str,
}

impl PriorityStyle {
    pub fn for_priority(priority: Priority) -> Self {
        match priority {
            Priority::Urgent => Self {
                color: URGENT_COLOR,
                emoji: "🚨",
            },
            Priority::High => Self {
                color: HIGH_COLOR,
                emoji: "⚠️",
            },
            Priority::Medium => Self {
                color: MEDIUM_COLOR,
                emoji: "ℹ️",
            },
            Priority::Low => Self {
                color: LOW_COLOR,
                emoji: "📝",
            },
        }
    }
}

impl Default for PriorityStyle {
    fn default() -> Self {
        Self::for_priority(Priority::default())
    }
}
