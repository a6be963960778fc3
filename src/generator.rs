//! Builds the synthetic `titles` and `credits` tables.
//!
//! Every sampling routine takes the random source explicitly, so a seeded
//! `StdRng` reproduces a run exactly while the server path uses OS entropy.
use crate::error::ConfigurationError;
use crate::models::{Credit, Title};
use crate::pools::ValuePools;
use chrono::{DateTime, Datelike, Duration, Utc};
use fake::faker::lorem::en::{Sentences, Words};
use fake::faker::name::en::{FirstName, Name};
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use tracing::info;
use uuid::Uuid;

pub const TITLE_COUNT: usize = 100;
pub const CREDITS_PER_TITLE: usize = 5;
pub const RELEASE_WINDOW_YEARS: i64 = 50;
pub const RUNTIME_RANGE: RangeInclusive<u16> = 60..=180;
pub const SEASONS_RANGE: RangeInclusive<u8> = 1..=8;
pub const MAX_GENRES: usize = 3;

/// Both tables of one generation run. Credits are grouped per title, in title order.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub titles: Vec<Title>,
    pub credits: Vec<Credit>,
}

impl Datasets {
    pub fn into_parts(self) -> (Vec<Title>, Vec<Credit>) {
        (self.titles, self.credits)
    }
}

#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    pools: ValuePools,
    now: Option<DateTime<Utc>>,
}

impl DatasetGenerator {
    pub fn new(pools: ValuePools) -> Self {
        Self { pools, now: None }
    }

    /// Pins the generation time used for release years.
    pub fn with_clock(pools: ValuePools, now: DateTime<Utc>) -> Self {
        Self {
            pools,
            now: Some(now),
        }
    }

    /// Generator over the built-in pools with the live clock.
    pub fn standard() -> Result<Self, ConfigurationError> {
        Ok(Self::new(ValuePools::standard()?))
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Datasets {
        let now = self.now.unwrap_or_else(Utc::now);
        let titles: Vec<Title> = (0..TITLE_COUNT)
            .map(|_| self.title_at(rng, now))
            .collect();
        let mut credits = Vec::with_capacity(titles.len() * CREDITS_PER_TITLE);
        for title in &titles {
            for _ in 0..CREDITS_PER_TITLE {
                credits.push(self.generate_credit(rng, title.id));
            }
        }
        info!(
            "Generated {} titles and {} credits",
            titles.len(),
            credits.len()
        );
        Datasets { titles, credits }
    }

    pub fn generate_title<R: Rng + ?Sized>(&self, rng: &mut R) -> Title {
        self.title_at(rng, self.now.unwrap_or_else(Utc::now))
    }

    pub fn generate_credit<R: Rng + ?Sized>(&self, rng: &mut R, title_id: Uuid) -> Credit {
        Credit {
            id: random_uuid(rng),
            title_id,
            real_name: Name().fake_with_rng(rng),
            character_name: FirstName().fake_with_rng(rng),
            role: pick(self.pools.roles(), rng),
        }
    }

    fn title_at<R: Rng + ?Sized>(&self, rng: &mut R, now: DateTime<Utc>) -> Title {
        let words: Vec<String> = Words(3..4).fake_with_rng(rng);
        let sentences: Vec<String> = Sentences(2..3).fake_with_rng(rng);
        Title {
            id: random_uuid(rng),
            title: words.join(" "),
            description: sentences.join(" "),
            release_year: release_year(rng, now),
            age_certification: pick(self.pools.certifications(), rng),
            runtime: rng.random_range(RUNTIME_RANGE),
            genres: pick_genres(self.pools.genres(), rng),
            production_country: pick(self.pools.countries(), rng),
            seasons: if rng.random_bool(0.5) {
                Some(rng.random_range(SEASONS_RANGE))
            } else {
                None
            },
        }
    }
}

/// One run over the built-in pools with an OS-seeded random source.
pub fn generate_datasets() -> Result<Datasets, ConfigurationError> {
    let generator = DatasetGenerator::standard()?;
    let mut rng = StdRng::from_os_rng();
    Ok(generator.generate(&mut rng))
}

fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes[..]);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

// Pools are validated non-empty when `ValuePools` is built.
fn pick<R: Rng + ?Sized>(pool: &[String], rng: &mut R) -> String {
    pool[rng.random_range(0..pool.len())].clone()
}

fn pick_genres<R: Rng + ?Sized>(pool: &[String], rng: &mut R) -> Vec<String> {
    let count = rng.random_range(1..=MAX_GENRES.min(pool.len()));
    pool.choose_multiple(rng, count).cloned().collect()
}

fn release_year<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> i32 {
    let window = Duration::days(365 * RELEASE_WINDOW_YEARS).num_seconds();
    let back = rng.random_range(0..=window);
    (now - Duration::seconds(back)).year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::{HashMap, HashSet};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn seeded_generator() -> DatasetGenerator {
        DatasetGenerator::with_clock(ValuePools::standard().unwrap(), fixed_now())
    }

    #[test]
    fn generates_fixed_table_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = seeded_generator().generate(&mut rng);
        assert_eq!(data.titles.len(), TITLE_COUNT);
        assert_eq!(data.credits.len(), TITLE_COUNT * CREDITS_PER_TITLE);
    }

    #[test]
    fn credits_follow_title_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let data = seeded_generator().generate(&mut rng);
        for (i, chunk) in data.credits.chunks(CREDITS_PER_TITLE).enumerate() {
            assert!(chunk.iter().all(|c| c.title_id == data.titles[i].id));
        }
        let mut per_title: HashMap<Uuid, usize> = HashMap::new();
        for credit in &data.credits {
            *per_title.entry(credit.title_id).or_default() += 1;
        }
        assert!(per_title.values().all(|&n| n == CREDITS_PER_TITLE));
    }

    #[test]
    fn title_fields_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let generator = seeded_generator();
        for _ in 0..500 {
            let title = generator.generate_title(&mut rng);
            assert!(RUNTIME_RANGE.contains(&title.runtime));
            assert!((1974..=2024).contains(&title.release_year));
            assert!(!title.title.is_empty());
            assert_eq!(title.title.split(' ').count(), 3);
            assert!(!title.description.is_empty());
            if let Some(s) = title.seasons {
                assert!(SEASONS_RANGE.contains(&s));
            }
            let unique: HashSet<_> = title.genres.iter().collect();
            assert_eq!(unique.len(), title.genres.len());
            assert!((1..=MAX_GENRES).contains(&title.genres.len()));
        }
    }

    #[test]
    fn seasons_absent_about_half_the_time() {
        let mut rng = StdRng::seed_from_u64(5);
        let generator = seeded_generator();
        let total = 2000;
        let absent = (0..total)
            .filter(|_| generator.generate_title(&mut rng).seasons.is_none())
            .count();
        let rate = absent as f64 / total as f64;
        assert!((0.4..=0.6).contains(&rate), "absent rate {}", rate);
    }

    #[test]
    fn single_genre_pool_yields_one_genre() {
        let pools = ValuePools::new(vec!["PG"], vec!["US"], vec!["drama"], vec!["ACTOR"]).unwrap();
        let generator = DatasetGenerator::with_clock(pools, fixed_now());
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let title = generator.generate_title(&mut rng);
            assert_eq!(title.genres, vec!["drama".to_string()]);
            assert_eq!(title.age_certification, "PG");
            assert_eq!(title.production_country, "US");
        }
    }

    #[test]
    fn same_seed_reproduces_run() {
        let generator = seeded_generator();
        let a = generator.generate(&mut StdRng::seed_from_u64(42));
        let b = generator.generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a.titles, b.titles);
        assert_eq!(a.credits, b.credits);
    }

    #[test]
    fn uuids_carry_v4_layout() {
        let mut rng = StdRng::seed_from_u64(1);
        let id = random_uuid(&mut rng);
        assert_eq!(id.get_version_num(), 4);
    }
}
