//! End-to-end protocol coverage: randomized encode/decode round trips and
//! a full decode-apply-render pass the way a client frame would run it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use stormring_netcode::{
    EntityStore, FullObjectUpdate, GasState, GasUpdate, KillFeedMessage, Packet,
    PartialObjectUpdate, StyledName, UpdatePacket, WeaponUsed,
};
use stormring_shared::constants::{MAP_SIZE, POSITION_BITS, TICK_INTERVAL_MS};
use stormring_shared::events::EntityEvent;
use stormring_shared::math::Vec2;
use stormring_shared::object_types::{ObjectCategory, ObjectTypeRegistry};
use stormring_shared::LOOT_DEFINITIONS;

fn position_step() -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let steps = ((1u32 << POSITION_BITS) - 1) as f32;
    MAP_SIZE / steps
}

fn random_name(rng: &mut StdRng) -> StyledName {
    let names = ["Vex", "Rook", "Mara", "Juniper", "Halcyon"];
    StyledName::new(names[rng.gen_range(0..names.len())], rng.gen_range(0..0x0100_0000))
}

#[test]
fn randomized_kill_feed_roundtrips() {
    let registry = ObjectTypeRegistry::new();
    let mut rng = StdRng::seed_from_u64(0x5708);

    for _ in 0..200 {
        let message = if rng.gen_bool(0.5) {
            #[allow(clippy::cast_possible_truncation)]
            let weapon_id = rng.gen_range(0..LOOT_DEFINITIONS.len()) as u16;
            let weapon_type = registry.from_parts(ObjectCategory::Loot, weapon_id).unwrap();
            let killer = rng
                .gen_bool(0.5)
                .then(|| (random_name(&mut rng), rng.gen::<u16>()));
            let weapon = rng.gen_bool(0.7).then(|| WeaponUsed {
                weapon_type,
                kill_count: rng.gen_bool(0.5).then(|| rng.gen::<u8>()),
            });
            KillFeedMessage::Kill {
                killed: random_name(&mut rng),
                killed_id: rng.gen(),
                killer,
                weapon,
                killed_by_environment: rng.gen_bool(0.3),
            }
        } else {
            KillFeedMessage::Join { player: random_name(&mut rng), joined: rng.gen_bool(0.5) }
        };

        let packet = Packet::KillFeed(message);
        let decoded = Packet::deserialize(&packet.serialize(), &registry).unwrap();
        assert_eq!(decoded, packet);
    }
}

#[test]
fn randomized_update_roundtrips_within_precision() {
    let registry = ObjectTypeRegistry::new();
    let mut rng = StdRng::seed_from_u64(0x5709);
    let step = position_step();

    for _ in 0..100 {
        #[allow(clippy::cast_possible_truncation)]
        let type_id = rng.gen_range(0..LOOT_DEFINITIONS.len()) as u16;
        let object_type = registry.from_parts(ObjectCategory::Loot, type_id).unwrap();
        let packet = Packet::Update(UpdatePacket {
            gas: None,
            full_updates: vec![FullObjectUpdate {
                object_id: rng.gen(),
                object_type,
                count: rng.gen_range(0..=511),
                is_new: rng.gen_bool(0.5),
            }],
            partial_updates: vec![PartialObjectUpdate {
                object_id: rng.gen(),
                position: Vec2::new(rng.gen_range(0.0..MAP_SIZE), rng.gen_range(0.0..MAP_SIZE)),
            }],
        });

        let decoded = Packet::deserialize(&packet.serialize(), &registry).unwrap();
        let (Packet::Update(sent), Packet::Update(received)) = (&packet, &decoded) else {
            panic!("expected update packets");
        };
        assert_eq!(sent.full_updates, received.full_updates);
        for (a, b) in sent.partial_updates.iter().zip(&received.partial_updates) {
            assert_eq!(a.object_id, b.object_id);
            assert!((a.position.x - b.position.x).abs() <= step);
            assert!((a.position.y - b.position.y).abs() <= step);
        }
    }
}

#[test]
fn decode_apply_render_frame() {
    let registry = ObjectTypeRegistry::new();
    let loot_type = registry.from_id_string("medikit").unwrap();

    // Tick 1: the server creates a loot pickup and starts the gas.
    let tick1 = Packet::Update(UpdatePacket {
        gas: Some(GasUpdate {
            state: GasState::Advancing,
            position: Vec2::new(512.0, 512.0),
            radius: 1024.0,
            new_position: Vec2::new(512.0, 512.0),
            new_radius: 512.0,
        }),
        full_updates: vec![FullObjectUpdate {
            object_id: 3,
            object_type: loot_type,
            count: 1,
            is_new: true,
        }],
        partial_updates: Vec::new(),
    });

    // Tick 2: the pickup drifts and the ring closes further.
    let tick2 = Packet::Update(UpdatePacket {
        gas: Some(GasUpdate {
            state: GasState::Advancing,
            position: Vec2::new(512.0, 512.0),
            radius: 896.0,
            new_position: Vec2::new(512.0, 512.0),
            new_radius: 512.0,
        }),
        full_updates: Vec::new(),
        partial_updates: vec![PartialObjectUpdate {
            object_id: 3,
            position: Vec2::new(300.0, 300.0),
        }],
    });

    let mut store = EntityStore::new();
    let mut now_ms = 0.0;
    for packet in [tick1, tick2] {
        let decoded = Packet::deserialize(&packet.serialize(), &registry).unwrap();
        let Packet::Update(update) = decoded else { panic!("expected update packet") };
        let events = store.apply_update(&update, now_ms);
        assert!(!events.is_empty());
        if now_ms == 0.0 {
            assert!(matches!(
                events[0],
                EntityEvent::Created { id: 3, is_new: true, .. }
            ));
        }
        now_ms += TICK_INTERVAL_MS;
    }

    // Mid-tick frame: the ring radius is halfway between the last two
    // authoritative samples.
    let (_, radius) = store.gas().render(TICK_INTERVAL_MS * 1.5);
    assert!((radius - 960.0).abs() < 0.5);

    let entity = store.get(3).unwrap();
    assert!(entity.created());
    assert!((entity.position.x - 300.0).abs() < position_step());

    // Disposal releases the entry animation with nothing dangling.
    assert_eq!(store.remove(3), Some(EntityEvent::Destroyed { id: 3 }));
}
