use dungeoncrawl::game::treasure::{
    create_by_rarity, roll_for_difficulty, treasure_chance, Rarity, TreasureType,
};
use dungeoncrawl::game::{GameError, RngDice};

fn drop_rate(level: u32, samples: u32) -> f64 {
    let mut dice = RngDice::seeded(99);
    let drops = (0..samples)
        .filter(|_| roll_for_difficulty(&mut dice, level).is_some())
        .count();
    drops as f64 / samples as f64
}

#[test]
fn observed_drop_rate_tracks_chance() {
    for level in [0, 2, 10] {
        let expected = treasure_chance(level) as f64 / 100.0;
        let seen = drop_rate(level, 20_000);
        assert!(
            (seen - expected).abs() < 0.03,
            "level {}: expected ~{}, saw {}",
            level,
            expected,
            seen
        );
    }
}

#[test]
fn tier_names_map_to_their_pools() {
    let mut dice = RngDice::seeded(3);
    for rarity in Rarity::ALL {
        let names: Vec<&str> = rarity.pool().iter().map(|t| t.name).collect();
        for _ in 0..50 {
            let t = create_by_rarity(&mut dice, rarity.as_str()).unwrap();
            assert!(names.contains(&t.name.as_str()), "{} not in {}", t.name, rarity);
            assert!(!t.description.is_empty());
            assert!(t.kind.flavor_lines().contains(&t.description.as_str()));
        }
    }
    assert!(matches!(
        create_by_rarity(&mut dice, "mythic"),
        Err(GameError::InvalidInput(_))
    ));
}

#[test]
fn every_tier_offers_a_potion_or_weapon() {
    for rarity in Rarity::ALL {
        assert!(rarity
            .pool()
            .iter()
            .any(|t| matches!(t.kind, TreasureType::HealthPotion | TreasureType::Weapon)));
    }
}
