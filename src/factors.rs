//! The fourteen scoring dimensions and their internal/external classification.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString, IntoStaticStr};

pub const FACTOR_COUNT: usize = Factor::COUNT;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    EnumCountMacro,
    IntoStaticStr,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    FloorLevel,
    DistanceToStation,
    ElevatorPresence,
    ConstructionYear,
    ConstructionCompany,
    ApartmentSize,
    NearbyAmenities,
    TransportationAccess,
    SchoolDistrict,
    CrimeRate,
    GreenSpaceRatio,
    Parking,
    MaintenanceFee,
    HeatingSystem,
}

impl Factor {
    pub const ALL: [Factor; FACTOR_COUNT] = [
        Self::FloorLevel,
        Self::DistanceToStation,
        Self::ElevatorPresence,
        Self::ConstructionYear,
        Self::ConstructionCompany,
        Self::ApartmentSize,
        Self::NearbyAmenities,
        Self::TransportationAccess,
        Self::SchoolDistrict,
        Self::CrimeRate,
        Self::GreenSpaceRatio,
        Self::Parking,
        Self::MaintenanceFee,
        Self::HeatingSystem,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Identifier used in weight files, CSV headers and error fields.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Accepts either the identifier (`school_district`) or the display name
    /// (`School District`, case-insensitive).
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        name.parse::<Self>()
            .ok()
            .or_else(|| Self::iter().find(|f| f.display_name().eq_ignore_ascii_case(name)))
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::FloorLevel => "Floor Level",
            Self::DistanceToStation => "Distance to Station",
            Self::ElevatorPresence => "Elevator Presence",
            Self::ConstructionYear => "Construction Year",
            Self::ConstructionCompany => "Construction Company",
            Self::ApartmentSize => "Apartment Size",
            Self::NearbyAmenities => "Nearby Amenities",
            Self::TransportationAccess => "Transportation Access",
            Self::SchoolDistrict => "School District",
            Self::CrimeRate => "Crime Rate",
            Self::GreenSpaceRatio => "Green Space Ratio",
            Self::Parking => "Parking",
            Self::MaintenanceFee => "Maintenance Fee",
            Self::HeatingSystem => "Heating System",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::FloorLevel => "Floor of the unit; floors near the middle of the building score highest",
            Self::DistanceToStation => "Distance to the nearest station; closer scores higher",
            Self::ElevatorPresence => "Whether the building has an elevator",
            Self::ConstructionYear => "Year of construction; newer buildings score higher",
            Self::ConstructionCompany => "Reputation of the builder",
            Self::ApartmentSize => "Floor area relative to a comfortable size",
            Self::NearbyAmenities => "Shops and services within walking distance",
            Self::TransportationAccess => "Access to public transport",
            Self::SchoolDistrict => "Quality of the local school district",
            Self::CrimeRate => "Local crime rate; lower scores higher",
            Self::GreenSpaceRatio => "Share of parks and green space nearby",
            Self::Parking => "Availability of parking spaces",
            Self::MaintenanceFee => "Monthly maintenance fee; reasonable fees score higher",
            Self::HeatingSystem => "Efficiency of the heating system",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    /// Properties of the building itself.
    Internal,
    /// Properties of the surroundings.
    External,
}

/// One value per [`Factor`], stored in factor order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorTable<T>([T; FACTOR_COUNT]);

impl<T> FactorTable<T> {
    pub fn from_fn(mut f: impl FnMut(Factor) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Factor::ALL[i])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, &T)> + '_ {
        Factor::iter().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.0.iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(Factor, &T) -> U) -> FactorTable<U> {
        FactorTable::from_fn(|factor| f(factor, &self.0[factor.index()]))
    }
}

impl<T: Copy> FactorTable<T> {
    pub fn get(&self, factor: Factor) -> T {
        self.0[factor.index()]
    }
}

impl<T: Default> Default for FactorTable<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<Factor> for FactorTable<T> {
    type Output = T;

    fn index(&self, factor: Factor) -> &T {
        &self.0[factor.index()]
    }
}

impl<T> IndexMut<Factor> for FactorTable<T> {
    fn index_mut(&mut self, factor: Factor) -> &mut T {
        &mut self.0[factor.index()]
    }
}

impl<T: Default> FromIterator<(Factor, T)> for FactorTable<T> {
    fn from_iter<I: IntoIterator<Item = (Factor, T)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (factor, value) in iter {
            table[factor] = value;
        }
        table
    }
}

// Tables travel as `{ "factor_name": value }` maps; absent keys take the default.
impl<T: Serialize> Serialize for FactorTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FACTOR_COUNT))?;
        for (factor, value) in self.iter() {
            map.serialize_entry(&factor, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for FactorTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<Factor, T>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

/// Which factors count as internal and which as external.
///
/// An immutable value: reclassifying a factor yields a new classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorClassification(FactorTable<FactorKind>);

impl Default for FactorClassification {
    fn default() -> Self {
        Self(FactorTable::from_fn(|factor| match factor {
            Factor::DistanceToStation
            | Factor::NearbyAmenities
            | Factor::TransportationAccess
            | Factor::SchoolDistrict
            | Factor::CrimeRate
            | Factor::GreenSpaceRatio => FactorKind::External,
            _ => FactorKind::Internal,
        }))
    }
}

impl FactorClassification {
    pub fn kind(&self, factor: Factor) -> FactorKind {
        self.0.get(factor)
    }

    #[must_use]
    pub fn with_kind(&self, factor: Factor, kind: FactorKind) -> Self {
        let mut table = self.0;
        table[factor] = kind;
        Self(table)
    }

    pub fn factors_of(&self, kind: FactorKind) -> Vec<Factor> {
        self.0
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(factor, _)| factor)
            .collect()
    }
}
