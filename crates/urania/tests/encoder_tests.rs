use std::collections::BTreeMap;

use urania::aspects::{Aspect, AspectPoint};
use urania::bodies::{AspectKind, Body, Sign};
use urania::chart::{BodyState, ComputedChart, Initials, Instant};
use urania::encoder::{
    self, encode_body_state, encode_frame, encode_relations, FrameHeader,
};
use urania::layout::{ScreenPoint, ScreenPositionProvider};
use urania_midi::ControlChange;

struct FixedProvider {
    origin: ScreenPoint,
    positions: BTreeMap<Body, ScreenPoint>,
}

impl FixedProvider {
    fn on_wheel(bodies: &[Body]) -> Self {
        let origin = ScreenPoint { x: 300.0, y: 300.0 };
        let mut positions = BTreeMap::new();
        for (i, &body) in bodies.iter().enumerate() {
            let rad = (30.0 + 30.0 * i as f64).to_radians();
            positions.insert(
                body,
                ScreenPoint {
                    x: origin.x + 150.0 * rad.cos(),
                    y: origin.y - 150.0 * rad.sin(),
                },
            );
        }
        Self { origin, positions }
    }
}

impl ScreenPositionProvider for FixedProvider {
    fn origin(&self) -> ScreenPoint {
        self.origin
    }

    fn position(&self, body: Body) -> Option<ScreenPoint> {
        self.positions.get(&body).copied()
    }
}

fn state(longitude: f64, altitude: f64) -> BodyState {
    BodyState {
        longitude,
        altitude,
        sign: Some(Sign::from_longitude(longitude)),
        house: Some(0),
    }
}

fn chart_with(aspects: Vec<Aspect>) -> ComputedChart {
    let mut bodies = BTreeMap::new();
    for (i, body) in Body::ALL.into_iter().enumerate() {
        bodies.insert(body, state(30.0 + 30.0 * i as f64, 10.0 - i as f64));
    }
    ComputedChart {
        bodies,
        aspects,
        cusps: None,
    }
}

fn value_of(messages: &[ControlChange], channel: u8, controller: u8) -> u8 {
    messages
        .iter()
        .find(|m| m.channel == channel && m.controller == controller)
        .map(|m| m.value)
        .unwrap_or_else(|| panic!("no message on channel {} controller {}", channel, controller))
}

#[test]
fn test_bearing_thirds_reconstruct_for_all_bearings() {
    let body = Body::Sun;
    let channel = encoder::body_channel(body);
    for bearing in 1..=360u16 {
        let messages = encode_body_state(body, &state(0.0, 0.0), bearing, &[]);
        let a = value_of(&messages, channel, encoder::CC_BEARING_A) as u16;
        let b = value_of(&messages, channel, encoder::CC_BEARING_B) as u16;
        let c = value_of(&messages, channel, encoder::CC_BEARING_C) as u16;
        assert_eq!(a, bearing / 3);
        assert_eq!(b, a);
        assert_eq!(c, a + bearing % 3);
        assert_eq!(a + b + c, bearing);
        assert_eq!(2 * a + c, bearing);
        assert!(a <= 127 && c <= 127);
    }
}

#[test]
fn test_altitude_split_is_exclusive() {
    let channel = encoder::body_channel(Body::Moon);

    let below = encode_body_state(Body::Moon, &state(0.0, -12.0), 90, &[]);
    assert_eq!(value_of(&below, channel, encoder::CC_ALT_BELOW), 12);
    assert_eq!(value_of(&below, channel, encoder::CC_ALT_ABOVE), 0);

    let above = encode_body_state(Body::Moon, &state(0.0, 7.0), 90, &[]);
    assert_eq!(value_of(&above, channel, encoder::CC_ALT_BELOW), 0);
    assert_eq!(value_of(&above, channel, encoder::CC_ALT_ABOVE), 7);

    let horizon = encode_body_state(Body::Moon, &state(0.0, 0.0), 90, &[]);
    assert_eq!(value_of(&horizon, channel, encoder::CC_ALT_BELOW), 0);
    assert_eq!(value_of(&horizon, channel, encoder::CC_ALT_ABOVE), 0);
}

#[test]
fn test_unassigned_house_and_sign_use_sentinel() {
    let channel = encoder::body_channel(Body::Saturn);
    let bare = BodyState {
        longitude: 100.0,
        altitude: 0.0,
        sign: None,
        house: None,
    };
    let messages = encode_body_state(Body::Saturn, &bare, 45, &[]);
    assert_eq!(value_of(&messages, channel, encoder::CC_HOUSE), encoder::UNASSIGNED);
    assert_eq!(value_of(&messages, channel, encoder::CC_SIGN), encoder::UNASSIGNED);
}

#[test]
fn test_sign_is_one_based_and_house_zero_based() {
    let channel = encoder::body_channel(Body::Venus);
    let placed = BodyState {
        longitude: 0.0,
        altitude: 0.0,
        sign: Some(Sign::Aries),
        house: Some(0),
    };
    let messages = encode_body_state(Body::Venus, &placed, 45, &[]);
    assert_eq!(value_of(&messages, channel, encoder::CC_HOUSE), 0);
    assert_eq!(value_of(&messages, channel, encoder::CC_SIGN), 1);
}

#[test]
fn test_no_aspects_emits_nine_clears() {
    let messages = encode_relations(Body::Sun, &[]);
    assert_eq!(messages.len(), 9);
    for msg in &messages {
        assert_eq!(msg.channel, encoder::body_channel(Body::Sun));
        assert_eq!(msg.value, 0);
        assert!(msg.controller >= encoder::CC_ASPECT_BASE);
        assert!(msg.controller < encoder::CC_ASPECT_BASE + 10);
        // The body's own slot is never addressed.
        assert_ne!(
            msg.controller,
            encoder::CC_ASPECT_BASE + Body::Sun.index()
        );
    }
}

#[test]
fn test_trine_encodes_peer_slot_and_kind() {
    let aspects = vec![Aspect {
        a: AspectPoint::Body(Body::Sun),
        b: AspectPoint::Body(Body::Mars),
        kind: AspectKind::Trine,
        orb: 1.2,
    }];

    let messages = encode_relations(Body::Sun, &aspects);
    let slot = encoder::CC_ASPECT_BASE + Body::Mars.index();
    assert_eq!(
        value_of(&messages, encoder::body_channel(Body::Sun), slot),
        AspectKind::Trine.index() + 1
    );
    // Mars is linked, the other eight peers are cleared.
    assert_eq!(messages.iter().filter(|m| m.value == 0).count(), 8);

    // The same aspect seen from the other end addresses the sun's slot.
    let from_mars = encode_relations(Body::Mars, &aspects);
    let sun_slot = encoder::CC_ASPECT_BASE + Body::Sun.index();
    assert_eq!(
        value_of(&from_mars, encoder::body_channel(Body::Mars), sun_slot),
        AspectKind::Trine.index() + 1
    );
}

#[test]
fn test_cusp_aspects_do_not_reach_relation_slots() {
    let aspects = vec![Aspect {
        a: AspectPoint::Body(Body::Sun),
        b: AspectPoint::Cusp(3),
        kind: AspectKind::Square,
        orb: 0.4,
    }];
    let messages = encode_relations(Body::Sun, &aspects);
    // The cusp entry is filtered; every peer slot reads as a clear.
    assert_eq!(messages.len(), 9);
    assert!(messages.iter().all(|m| m.value == 0));
}

#[test]
fn test_header_encodes_identity_and_date() {
    let instant = Instant::new(1990, 5, 14, 12, 0, 0.0, 0.0).unwrap();
    let header = FrameHeader::new(Initials::default(), &instant);
    let messages = header.encode();

    assert_eq!(value_of(&messages, encoder::HEADER_CHANNEL, encoder::CC_DAY), 14);
    assert_eq!(value_of(&messages, encoder::HEADER_CHANNEL, encoder::CC_MONTH), 5);
    assert_eq!(value_of(&messages, encoder::HEADER_CHANNEL, encoder::CC_CENTURY), 19);
    assert_eq!(
        value_of(&messages, encoder::HEADER_CHANNEL, encoder::CC_YEAR_IN_CENTURY),
        90
    );
    for slot in 0..3u8 {
        assert_eq!(
            value_of(
                &messages,
                encoder::HEADER_CHANNEL,
                encoder::CC_INITIAL_BASE + slot
            ),
            45
        );
    }
}

#[test]
fn test_frame_is_idempotent() {
    let chart = chart_with(vec![Aspect {
        a: AspectPoint::Body(Body::Moon),
        b: AspectPoint::Body(Body::Jupiter),
        kind: AspectKind::Sextile,
        orb: 2.0,
    }]);
    let provider = FixedProvider::on_wheel(&Body::ALL);
    let instant = Instant::new(1990, 5, 14, 12, 0, 0.0, 0.0).unwrap();
    let header = FrameHeader::new(Initials::default(), &instant);

    let first = encode_frame(&chart, &provider, &header);
    let second = encode_frame(&chart, &provider, &header);
    assert_eq!(first, second);
    // Header plus ten bodies at sixteen messages each.
    assert_eq!(first.len(), 7 + 10 * 16);
}

#[test]
fn test_unpositioned_body_is_skipped_without_aborting_the_frame() {
    let chart = chart_with(vec![]);
    // Pluto never got rendered.
    let provider = FixedProvider::on_wheel(&Body::ALL[..9]);
    let instant = Instant::new(1990, 5, 14, 12, 0, 0.0, 0.0).unwrap();
    let header = FrameHeader::new(Initials::default(), &instant);

    let frame = encode_frame(&chart, &provider, &header);
    let pluto_channel = encoder::body_channel(Body::Pluto);
    assert!(frame.iter().all(|m| m.channel != pluto_channel));
    assert_eq!(frame.len(), 7 + 9 * 16);
}

#[test]
fn test_frame_emits_bodies_in_stable_order() {
    let chart = chart_with(vec![]);
    let provider = FixedProvider::on_wheel(&Body::ALL);
    let instant = Instant::new(1990, 5, 14, 12, 0, 0.0, 0.0).unwrap();
    let header = FrameHeader::new(Initials::default(), &instant);

    let frame = encode_frame(&chart, &provider, &header);
    let body_channels: Vec<u8> = frame
        .iter()
        .filter(|m| m.channel != encoder::HEADER_CHANNEL)
        .map(|m| m.channel)
        .collect();
    let mut sorted = body_channels.clone();
    sorted.sort();
    assert_eq!(body_channels, sorted);
}
