use urania_midi::{ControlChange, CC_VALUE_MAX};

use super::bearing::bearing;
use super::body::encode_body_state;
use super::{CC_CENTURY, CC_DAY, CC_INITIAL_BASE, CC_MONTH, CC_YEAR_IN_CENTURY, HEADER_CHANNEL};
use crate::bodies::Body;
use crate::chart::{ComputedChart, Initials, Instant};
use crate::layout::ScreenPositionProvider;

/// Identity header streamed at the start of every frame. Built once per run
/// from the configuration; it only changes when the configuration does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    initials: Initials,
    day: u8,
    month: u8,
    century: u8,
    year_in_century: u8,
}

impl FrameHeader {
    pub fn new(initials: Initials, instant: &Instant) -> Self {
        Self {
            initials,
            day: instant.day as u8,
            month: instant.month as u8,
            century: (instant.year / 100) as u8,
            year_in_century: (instant.year % 100) as u8,
        }
    }

    /// Initials character codes on 19..21, date on 22..25. The editable
    /// character range tops out one past the CC value space, so codes are
    /// capped on the wire.
    pub fn encode(&self) -> Vec<ControlChange> {
        let mut messages = Vec::with_capacity(7);
        for (slot, code) in self.initials.codes().iter().enumerate() {
            messages.push(ControlChange::new(
                HEADER_CHANNEL,
                CC_INITIAL_BASE + slot as u8,
                (*code).min(CC_VALUE_MAX),
            ));
        }
        messages.push(ControlChange::new(HEADER_CHANNEL, CC_DAY, self.day));
        messages.push(ControlChange::new(HEADER_CHANNEL, CC_MONTH, self.month));
        messages.push(ControlChange::new(HEADER_CHANNEL, CC_CENTURY, self.century));
        messages.push(ControlChange::new(
            HEADER_CHANNEL,
            CC_YEAR_IN_CENTURY,
            self.year_in_century,
        ));
        messages
    }
}

/// Encode one complete frame: the header, then every tracked body in stable
/// order. A body without a screen position is skipped for this tick; the
/// rest of the frame proceeds. Output is deterministic for a given snapshot.
pub fn encode_frame(
    chart: &ComputedChart,
    provider: &dyn ScreenPositionProvider,
    header: &FrameHeader,
) -> Vec<ControlChange> {
    let mut messages = header.encode();
    let origin = provider.origin();

    for body in Body::ALL {
        let Some(state) = chart.bodies.get(&body) else {
            log::debug!("{} missing from chart snapshot, skipping", body);
            continue;
        };
        let Some(position) = provider.position(body) else {
            log::debug!("{} has no screen position yet, skipping", body);
            continue;
        };
        let b = bearing(position, origin);
        messages.extend(encode_body_state(body, state, b, &chart.aspects));
    }

    messages
}
