//! Synthetic vehicle listings for demos and tests.
//!
//! Prices follow a simple multiplicative model (brand base price, yearly
//! depreciation, power, fuel and transmission premiums, ±10% noise) so a
//! trained forest has real signal to find. A small share of numeric cells is
//! left `null` to exercise imputation.

use super::{columns, Record};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};

/// (brand, base price in lakhs, model names)
const BRANDS: [(&str, f64, [&str; 3]); 8] = [
    ("Maruti", 6.0, ["Swift VDI", "Alto 800 LXI", "Ertiga ZDI"]),
    ("Hyundai", 7.5, ["i20 Asta", "Creta 1.6 SX", "Verna CRDi"]),
    ("Honda", 9.0, ["City i-VTEC", "Amaze S", "Jazz V"]),
    ("Toyota", 14.0, ["Innova Crysta", "Corolla Altis", "Fortuner 2.8"]),
    ("Mahindra", 11.0, ["XUV500 W8", "Scorpio S10", "Thar CRDe"]),
    ("Tata", 6.5, ["Nexon XZ", "Tiago XT", "Harrier XZ"]),
    ("BMW", 45.0, ["3 Series 320d", "X1 sDrive20d", "5 Series 520d"]),
    ("Audi", 42.0, ["A4 2.0 TDI", "Q3 35 TDI", "A6 45 TFSI"]),
];

const LOCATIONS: [&str; 8] = [
    "Mumbai",
    "Pune",
    "Chennai",
    "Coimbatore",
    "Hyderabad",
    "Delhi",
    "Kochi",
    "Bangalore",
];

/// (fuel, price multiplier)
const FUELS: [(&str, f64); 4] = [
    ("Petrol", 1.0),
    ("Diesel", 1.12),
    ("CNG", 0.85),
    ("Electric", 1.3),
];

const OWNERS: [&str; 4] = ["First", "Second", "Third", "Fourth & Above"];

const SEATS: [u32; 4] = [4, 5, 7, 8];

/// Share of numeric cells left empty.
const MISSING_RATE: f64 = 0.03;

/// Seeded generator of plausible vehicle listings.
pub struct SyntheticGenerator {
    rng: ChaCha8Rng,
    reference_year: i32,
}

impl SyntheticGenerator {
    /// Create a generator; the same seed and reference year always produce the same records.
    pub fn new(seed: u64, reference_year: i32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            reference_year,
        }
    }

    /// Generate `count` records.
    pub fn generate(&mut self, count: usize) -> Vec<Record> {
        (0..count).map(|_| self.record()).collect()
    }

    fn record(&mut self) -> Record {
        let (brand, base_price, models) = BRANDS[self.rng.gen_range(0..BRANDS.len())];
        let model = models[self.rng.gen_range(0..models.len())];
        let location = *LOCATIONS.choose(&mut self.rng).unwrap_or(&LOCATIONS[0]);
        let (fuel, fuel_factor) = FUELS[self.rng.gen_range(0..FUELS.len())];
        let automatic = self.rng.gen_bool(0.3);
        let owner_idx = self.pick_owner();

        let age = self.rng.gen_range(0..=15);
        let year = self.reference_year - age;
        let kilometers = (age.max(1) as f64 * self.rng.gen_range(6_000.0..14_000.0)).round();
        let engine = (self.rng.gen_range(800.0..3_000.0_f64) / 10.0).round() * 10.0;
        let power = (engine * self.rng.gen_range(0.05..0.085) * 10.0).round() / 10.0;
        let mileage = (self.rng.gen_range(10.0..28.0_f64) * 10.0).round() / 10.0;
        let seats = SEATS[self.rng.gen_range(0..SEATS.len())];

        let depreciation = 0.88_f64.powi(age);
        let power_factor = 1.0 + power / 300.0;
        let transmission_factor = if automatic { 1.15 } else { 1.0 };
        let owner_factor = 1.0 - 0.06 * owner_idx as f64;
        let noise = self.rng.gen_range(0.9..1.1);
        let price = base_price
            * depreciation
            * power_factor
            * fuel_factor
            * transmission_factor
            * owner_factor
            * noise;
        let price = (price.max(0.5) * 100.0).round() / 100.0;

        let mut record = Record::new();
        record.insert(columns::NAME.into(), json!(format!("{} {}", brand, model)));
        record.insert(columns::LOCATION.into(), json!(location));
        record.insert(columns::YEAR.into(), json!(year));
        record.insert(columns::KILOMETERS_DRIVEN.into(), self.maybe_missing(kilometers));
        record.insert(columns::FUEL_TYPE.into(), json!(fuel));
        record.insert(
            columns::TRANSMISSION.into(),
            json!(if automatic { "Automatic" } else { "Manual" }),
        );
        record.insert(columns::OWNER_TYPE.into(), json!(OWNERS[owner_idx]));
        record.insert(columns::MILEAGE.into(), self.maybe_missing(mileage));
        record.insert(columns::ENGINE.into(), self.maybe_missing(engine));
        record.insert(columns::POWER.into(), self.maybe_missing(power));
        record.insert(columns::SEATS.into(), self.maybe_missing(seats as f64));
        record.insert(columns::PRICE.into(), json!(price));
        record
    }

    // Most listings are first-owner.
    fn pick_owner(&mut self) -> usize {
        let roll: f64 = self.rng.gen();
        match roll {
            r if r < 0.7 => 0,
            r if r < 0.9 => 1,
            r if r < 0.97 => 2,
            _ => 3,
        }
    }

    fn maybe_missing(&mut self, value: f64) -> Value {
        if self.rng.gen_bool(MISSING_RATE) {
            Value::Null
        } else {
            json!(value)
        }
    }
}
