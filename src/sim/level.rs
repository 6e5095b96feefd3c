//! Procedural level generation
//!
//! A level is a row of fixed-width sections. Each section gets its own ground,
//! platforms, coins and enemies; difficulty grows with the section index.
//! Generation only reads the rng, so a section never depends on a later one.

use serde::{Deserialize, Serialize};

use super::rng::LevelRng;
use crate::consts::{ENEMY_BODY_HEIGHT, ENEMY_PATROL_RANGE, GROUND_TOP};

/// Gap start, relative to the section origin
pub const GAP_START_MIN: f32 = 600.0;
pub const GAP_START_MAX: f32 = 1000.0;
/// Gap width
pub const GAP_WIDTH_MIN: f32 = 256.0;
pub const GAP_WIDTH_MAX: f32 = 384.0;

/// Platform layout
pub const PLATFORM_FIRST_OFFSET: f32 = 200.0;
pub const PLATFORM_SPACING: f32 = 400.0;
pub const PLATFORM_JITTER: f32 = 200.0;
pub const PLATFORM_Y_MIN: f32 = 550.0;
pub const PLATFORM_Y_MAX: f32 = 800.0;

/// Coins sit above each platform at these x offsets
pub const PLATFORM_COIN_OFFSETS: [f32; 3] = [-50.0, 0.0, 50.0];
pub const PLATFORM_COIN_LIFT: f32 = 50.0;

/// Enemies per section are capped here
pub const MAX_ENEMIES_PER_SECTION: u32 = 3;

/// Horizontal margin kept free at both section edges for loose coins/enemies
const EDGE_MARGIN: f32 = 200.0;

/// A contiguous run of solid ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundSpan {
    pub x: f32,
    pub width: f32,
}

impl GroundSpan {
    #[inline]
    pub fn end(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoinSpec {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub x: f32,
    pub y: f32,
}

impl EnemySpec {
    /// Horizontal range walked by the enemy's patrol
    pub fn patrol_range(&self) -> (f32, f32) {
        (self.x, self.x + ENEMY_PATROL_RANGE)
    }
}

/// One horizontal slice of generated level content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub index: u32,
    pub origin_x: f32,
    pub width: f32,
    pub ground_spans: Vec<GroundSpan>,
    pub platforms: Vec<PlatformSpec>,
    pub coins: Vec<CoinSpec>,
    pub enemies: Vec<EnemySpec>,
}

impl Section {
    /// Whether the ground of this section has a hole in it
    pub fn has_gap(&self) -> bool {
        self.ground_spans.len() > 1 || self.ground_covered() < self.width
    }

    /// Total width covered by ground spans
    pub fn ground_covered(&self) -> f32 {
        self.ground_spans.iter().map(|s| s.width).sum()
    }
}

/// Number of enemies placed in a section, non-decreasing in `index`
pub fn enemy_count(index: u32) -> u32 {
    if index == 0 {
        0
    } else {
        (1 + index / 2).min(MAX_ENEMIES_PER_SECTION)
    }
}

/// Whether a section gets a ground gap
pub fn section_has_gap(index: u32) -> bool {
    index > 1 && index.is_multiple_of(2)
}

/// Generate a whole level, section by section in ascending order
pub fn generate(level_width: f32, section_width: f32, rng: &mut LevelRng) -> Vec<Section> {
    if level_width <= 0.0 || section_width <= 0.0 {
        log::debug!(
            "Empty level requested (width={}, section={})",
            level_width,
            section_width
        );
        return Vec::new();
    }

    let count = (level_width / section_width).ceil() as u32;
    let mut sections = Vec::with_capacity(count as usize);

    for index in 0..count {
        let origin_x = index as f32 * section_width;
        let width = section_width.min(level_width - origin_x);
        sections.push(generate_section(index, origin_x, width, rng));
    }

    let enemies: usize = sections.iter().map(|s| s.enemies.len()).sum();
    let coins: usize = sections.iter().map(|s| s.coins.len()).sum();
    log::info!(
        "Level generated: seed={}, width={}, sections={}, coins={}, enemies={}",
        rng.seed(),
        level_width,
        sections.len(),
        coins,
        enemies
    );

    sections
}

/// Generate a single section starting at `origin_x`
pub fn generate_section(index: u32, origin_x: f32, width: f32, rng: &mut LevelRng) -> Section {
    let ground_spans = generate_ground(index, origin_x, width, rng);
    let platforms = generate_platforms(index, origin_x, rng);

    let mut coins = Vec::with_capacity(platforms.len() * PLATFORM_COIN_OFFSETS.len() + 4);
    for platform in &platforms {
        for dx in PLATFORM_COIN_OFFSETS {
            coins.push(CoinSpec {
                x: platform.x + dx,
                y: platform.y - PLATFORM_COIN_LIFT,
            });
        }
    }

    // Loose coins floating just above the ground
    let loose = 2 + rng.range_u32(0, 3);
    for _ in 0..loose {
        coins.push(CoinSpec {
            x: origin_x + rng.range_f32(EDGE_MARGIN / 2.0, width - EDGE_MARGIN / 2.0),
            y: GROUND_TOP - rng.range_f32(60.0, 140.0),
        });
    }

    // Enemies walk on the ground; gaps are not avoided (they ignore gravity).
    // The whole patrol must stay inside the section, even a truncated one.
    let last_start = origin_x + width - ENEMY_PATROL_RANGE;
    let enemies = if last_start < origin_x {
        log::debug!("Section {}: {}px too narrow for a patrol, no enemies", index, width);
        Vec::new()
    } else {
        (0..enemy_count(index))
            .map(|_| {
                let min_x = origin_x + EDGE_MARGIN;
                let max_x = last_start - EDGE_MARGIN;
                EnemySpec {
                    x: rng.range_f32(min_x, max_x).clamp(origin_x, last_start),
                    y: GROUND_TOP - ENEMY_BODY_HEIGHT / 2.0,
                }
            })
            .collect()
    };

    let section = Section {
        index,
        origin_x,
        width,
        ground_spans,
        platforms,
        coins,
        enemies,
    };

    log::debug!(
        "Section {}: x={}, spans={}, platforms={}, coins={}, enemies={}",
        index,
        origin_x,
        section.ground_spans.len(),
        section.platforms.len(),
        section.coins.len(),
        section.enemies.len()
    );

    section
}

fn generate_ground(index: u32, origin_x: f32, width: f32, rng: &mut LevelRng) -> Vec<GroundSpan> {
    let full = GroundSpan { x: origin_x, width };

    if !section_has_gap(index) {
        return vec![full];
    }

    let gap_start = rng.range_f32(GAP_START_MIN, GAP_START_MAX);
    let gap_width = rng.range_f32(GAP_WIDTH_MIN, GAP_WIDTH_MAX);

    // Gap does not fit inside a truncated section: keep the ground whole
    if gap_start >= width {
        log::debug!("Section {}: gap at {} past width {}, no gap", index, gap_start, width);
        return vec![full];
    }

    let pre = GroundSpan {
        x: origin_x,
        width: gap_start,
    };
    let remainder = width - gap_start - gap_width;
    if remainder <= 0.0 {
        return vec![pre];
    }

    vec![
        pre,
        GroundSpan {
            x: origin_x + gap_start + gap_width,
            width: remainder,
        },
    ]
}

fn generate_platforms(index: u32, origin_x: f32, rng: &mut LevelRng) -> Vec<PlatformSpec> {
    let count = if index == 0 { 1 } else { 2 + rng.range_u32(0, 2) };

    (0..count)
        .map(|p| PlatformSpec {
            x: origin_x
                + PLATFORM_FIRST_OFFSET
                + p as f32 * PLATFORM_SPACING
                + rng.range_f32(0.0, PLATFORM_JITTER),
            y: rng.range_f32(PLATFORM_Y_MIN, PLATFORM_Y_MAX),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_level_shape() {
        let mut rng = LevelRng::new(1);
        let sections = generate(12800.0, 1600.0, &mut rng);

        assert_eq!(sections.len(), 8);
        assert_eq!(sections[0].enemies.len(), 0);
        assert_eq!(sections[0].platforms.len(), 1);
        assert!(sections[2].has_gap());
    }

    #[test]
    fn test_first_section_is_safe() {
        let mut rng = LevelRng::new(42);
        let sections = generate(6400.0, 1600.0, &mut rng);
        let first = &sections[0];

        assert_eq!(first.ground_spans, vec![GroundSpan { x: 0.0, width: 1600.0 }]);
        assert!(first.enemies.is_empty());
    }

    #[test]
    fn test_gaps_only_on_even_sections_after_first_two() {
        let mut rng = LevelRng::new(3);
        let sections = generate(16000.0, 1600.0, &mut rng);
        for section in &sections {
            assert_eq!(
                section.has_gap(),
                section_has_gap(section.index),
                "section {}",
                section.index
            );
        }
        assert!(!sections[1].has_gap());
    }

    #[test]
    fn test_gap_dimensions() {
        let mut rng = LevelRng::new(11);
        let section = generate_section(4, 6400.0, 1600.0, &mut rng);
        assert_eq!(section.ground_spans.len(), 2);

        let pre = section.ground_spans[0];
        let post = section.ground_spans[1];
        let gap_start = pre.end() - section.origin_x;
        let gap_width = post.x - pre.end();
        assert!((GAP_START_MIN..GAP_START_MAX).contains(&gap_start));
        assert!((GAP_WIDTH_MIN..GAP_WIDTH_MAX).contains(&gap_width));
        assert!((post.end() - (section.origin_x + section.width)).abs() < 0.01);
    }

    #[test]
    fn test_narrow_section_keeps_pre_gap_only() {
        // Gap starts at >= 600 and is >= 256 wide, so an 850px section has no post-gap ground
        let mut rng = LevelRng::new(5);
        let section = generate_section(2, 0.0, 850.0, &mut rng);
        assert!(!section.ground_spans.is_empty());
        for span in &section.ground_spans {
            assert!(span.width > 0.0);
            assert!(span.end() <= 850.0 + 0.01);
        }
    }

    #[test]
    fn test_tiny_section_falls_back_to_full_span() {
        let mut rng = LevelRng::new(5);
        let section = generate_section(2, 0.0, 500.0, &mut rng);
        assert_eq!(section.ground_spans, vec![GroundSpan { x: 0.0, width: 500.0 }]);
    }

    #[test]
    fn test_platform_coins_hover_above_platforms() {
        let mut rng = LevelRng::new(9);
        let section = generate_section(3, 4800.0, 1600.0, &mut rng);
        for (i, platform) in section.platforms.iter().enumerate() {
            for (j, dx) in PLATFORM_COIN_OFFSETS.iter().enumerate() {
                let coin = section.coins[i * 3 + j];
                assert_eq!(coin.x, platform.x + dx);
                assert_eq!(coin.y, platform.y - PLATFORM_COIN_LIFT);
            }
        }
        let loose = section.coins.len() - section.platforms.len() * 3;
        assert!((2..=4).contains(&loose));
    }

    #[test]
    fn test_enemy_count_curve() {
        let counts: Vec<u32> = (0..10).map(enemy_count).collect();
        assert_eq!(counts, vec![0, 1, 2, 2, 3, 3, 3, 3, 3, 3]);
    }

    #[test]
    fn test_truncated_last_section() {
        let mut rng = LevelRng::new(2);
        let sections = generate(4000.0, 1600.0, &mut rng);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[2].width, 800.0);
    }

    #[test]
    fn test_narrow_last_section_keeps_patrols_inside() {
        let mut rng = LevelRng::new(8);
        let section = generate_section(5, 12400.0, 400.0, &mut rng);
        assert_eq!(section.enemies.len(), enemy_count(5) as usize);
        for enemy in &section.enemies {
            let (lo, hi) = enemy.patrol_range();
            assert!(lo >= 12400.0);
            assert!(hi <= 12800.0 + 0.01);
        }

        // Narrower than a single patrol
        let sliver = generate_section(5, 12700.0, 100.0, &mut rng);
        assert!(sliver.enemies.is_empty());
    }

    #[test]
    fn test_degenerate_inputs_yield_empty_level() {
        let mut rng = LevelRng::new(2);
        assert!(generate(0.0, 1600.0, &mut rng).is_empty());
        assert!(generate(12800.0, 0.0, &mut rng).is_empty());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(12800.0, 1600.0, &mut LevelRng::new(77));
        let b = generate(12800.0, 1600.0, &mut LevelRng::new(77));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_ground_spans_valid(seed in any::<u64>(), sections in 1u32..20) {
            let section_width = 1600.0;
            let level = generate(sections as f32 * section_width, section_width, &mut LevelRng::new(seed));

            for section in &level {
                let base = section.origin_x;
                let mut prev_end = base;
                for span in &section.ground_spans {
                    prop_assert!(span.width > 0.0);
                    prop_assert!(span.x >= prev_end - 0.01);
                    prop_assert!(span.x >= base - 0.01);
                    prop_assert!(span.end() <= base + section_width + 0.01);
                    prev_end = span.end();
                }
                prop_assert!((1..=2).contains(&section.ground_spans.len()));
            }

            prop_assert_eq!(level[0].ground_spans.len(), 1);
            prop_assert!(level[0].enemies.is_empty());
        }

        #[test]
        fn prop_enemies_non_decreasing_and_capped(seed in any::<u64>()) {
            let level = generate(32000.0, 1600.0, &mut LevelRng::new(seed));
            let mut prev = 0;
            for section in &level {
                let n = section.enemies.len();
                prop_assert!(n >= prev);
                prop_assert!(n <= MAX_ENEMIES_PER_SECTION as usize);
                for enemy in &section.enemies {
                    let (lo, hi) = enemy.patrol_range();
                    prop_assert!(lo >= section.origin_x);
                    prop_assert!(hi <= section.origin_x + section.width);
                }
                prev = n;
            }
        }

        #[test]
        fn prop_patrols_end_inside_level(seed in any::<u64>(), extra in 1.0f32..1600.0) {
            let level_width = 6400.0 + extra;
            let level = generate(level_width, 1600.0, &mut LevelRng::new(seed));
            for enemy in level.iter().flat_map(|s| s.enemies.iter()) {
                let (_, hi) = enemy.patrol_range();
                prop_assert!(hi <= level_width + 0.01);
            }
        }

        #[test]
        fn prop_platforms_ordered_and_in_band(seed in any::<u64>()) {
            let level = generate(12800.0, 1600.0, &mut LevelRng::new(seed));
            for section in level.iter().skip(1) {
                prop_assert!((2..=3).contains(&section.platforms.len()));
                for pair in section.platforms.windows(2) {
                    prop_assert!(pair[0].x < pair[1].x);
                }
                for platform in &section.platforms {
                    prop_assert!((PLATFORM_Y_MIN..PLATFORM_Y_MAX).contains(&platform.y));
                }
            }
        }
    }
}
