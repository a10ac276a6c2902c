#![allow(dead_code)] // not every test binary uses every helper

use aptscore::{Entity, Factor, ScoreSet, Weight, WeightSet};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Builder for Entity to keep test setup short.
pub struct EntityBuilder {
    entity: Entity,
}

impl EntityBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            entity: Entity::new(id, id, "seoul"),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.entity.name = name.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.entity.location = location.to_string();
        self
    }

    pub fn score(mut self, factor: Factor, value: f64) -> Self {
        self.entity = self.entity.with_score(factor, value);
        self
    }

    /// Every factor at `value`.
    pub fn uniform(mut self, value: f64) -> Self {
        self.entity = self
            .entity
            .with_scores(ScoreSet::from_reals(Factor::ALL.map(|f| (f, value))));
        self
    }

    pub fn build(self) -> Entity {
        self.entity
    }
}

/// Equal weights over `factors`; exact when 1000 divides evenly.
pub fn equal_weights(factors: &[Factor]) -> WeightSet {
    let share = 1.0 / factors.len() as f64;
    WeightSet::from_reals(factors.iter().map(|f| (*f, share)))
}

/// As close to uniform over all fourteen factors as validation allows:
/// 1000 / 14 is not whole and 71 × 14 = 994 falls outside the ±1 band, so
/// six factors carry 72 and eight carry 71 (total 1000).
pub fn uniform_weights() -> WeightSet {
    let mut w = WeightSet::new();
    for (i, factor) in Factor::ALL.iter().enumerate() {
        w.set(*factor, Weight::from_raw(if i < 6 { 72 } else { 71 }));
    }
    w
}

pub const SAMPLE_CSV: &str = "\
id,name,location,school_district,apartment_size,maintenance_fee,transportation_access,crime_rate
a1,Alpha,gangnam,90,80,70,90,85
a2,Beta,mapo,60,70,80,50,75
a3,Gamma,gangnam,75,75,75,80,80
";

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).expect("Failed to create test file");
    file.write_all(content.as_bytes())
        .expect("Failed to write test file");
    path
}
