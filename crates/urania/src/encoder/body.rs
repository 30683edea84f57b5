use urania_midi::ControlChange;

use super::relations::encode_relations;
use super::{
    body_channel, CC_ALT_ABOVE, CC_ALT_BELOW, CC_BEARING_A, CC_BEARING_B, CC_BEARING_C, CC_HOUSE,
    CC_SIGN, UNASSIGNED,
};
use crate::aspects::Aspect;
use crate::bodies::Body;
use crate::chart::BodyState;

/// Encode one body's full state onto its channel: bearing thirds on 1..3,
/// signed altitude on 4/5, house on 6, sign on 7, aspect slots on 8..17.
///
/// A raw 1..360 bearing does not fit one 0..127 controller, so it is split
/// into three near-equal parts; the receiver reconstructs it as the sum.
pub fn encode_body_state(
    body: Body,
    state: &BodyState,
    bearing: u16,
    aspects: &[Aspect],
) -> Vec<ControlChange> {
    let channel = body_channel(body);
    let mut messages = Vec::with_capacity(17);

    let third = (bearing / 3) as u8;
    let remainder = (bearing % 3) as u8;
    messages.push(ControlChange::new(channel, CC_BEARING_A, third));
    messages.push(ControlChange::new(channel, CC_BEARING_B, third));
    messages.push(ControlChange::new(channel, CC_BEARING_C, third + remainder));

    // Two controllers simulate one signed value: magnitude goes to 4 when
    // below the horizon, to 5 when above. Altitude is bounded to +-90 by
    // definition, so the magnitude always fits.
    let altitude = state.altitude.floor() as i16;
    if altitude < 0 {
        messages.push(ControlChange::new(channel, CC_ALT_BELOW, altitude.unsigned_abs() as u8));
        messages.push(ControlChange::new(channel, CC_ALT_ABOVE, 0));
    } else {
        messages.push(ControlChange::new(channel, CC_ALT_BELOW, 0));
        messages.push(ControlChange::new(channel, CC_ALT_ABOVE, altitude as u8));
    }

    messages.push(ControlChange::new(
        channel,
        CC_HOUSE,
        state.house.unwrap_or(UNASSIGNED),
    ));
    messages.push(ControlChange::new(
        channel,
        CC_SIGN,
        state.sign.map(|s| s.index() + 1).unwrap_or(UNASSIGNED),
    ));

    messages.extend(encode_relations(body, aspects));
    messages
}
