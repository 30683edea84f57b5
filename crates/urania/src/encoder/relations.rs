//! Aspect slots: controllers 8..17 on each body's channel, one per peer.
//!
//! The controller has no persistent "no value" state, so every tick must
//! either re-assert or explicitly clear every slot: the previous tick's
//! values live only on the hardware.

use urania_midi::ControlChange;

use super::{body_channel, CC_ASPECT_BASE};
use crate::aspects::{Aspect, AspectPoint};
use crate::bodies::Body;

/// Encode one body's relationship slots for a tick: a value for every peer
/// it currently aspects, a clear for every peer it does not. Entries whose
/// peer is not a tracked body (cusp aspects) are skipped.
pub fn encode_relations(body: Body, aspects: &[Aspect]) -> Vec<ControlChange> {
    let channel = body_channel(body);
    let mut linked = [false; Body::ALL.len()];
    let mut messages = Vec::new();

    for aspect in aspects {
        let Some(AspectPoint::Body(peer)) = aspect.peer_of(body) else {
            continue;
        };
        linked[peer.index() as usize] = true;
        messages.push(ControlChange::new(
            channel,
            CC_ASPECT_BASE + peer.index(),
            aspect.kind.index() + 1,
        ));
    }

    for peer in Body::ALL {
        if peer == body || linked[peer.index() as usize] {
            continue;
        }
        messages.push(ControlChange::new(channel, CC_ASPECT_BASE + peer.index(), 0));
    }

    messages
}
