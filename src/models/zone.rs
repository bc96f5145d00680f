use serde::{
    de::{self, Deserializer},
    ser::{SerializeMap, Serializer},
    Deserialize, Serialize,
};
use std::{collections::BTreeMap, fmt::Display, ops::Index, str::FromStr};

/// One of the eight product-management philosophy zones.
///
/// The declaration order is the canonical total order used for every
/// tie-break in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneId {
    Velocity,
    Perfection,
    Discovery,
    Data,
    Intuition,
    Alignment,
    Chaos,
    Focus,
}

/// Zone used when a profile carries no signal at all.
pub const DEFAULT_ZONE: ZoneId = ZoneId::Velocity;

impl ZoneId {
    pub const COUNT: usize = 8;

    pub const ALL: [ZoneId; Self::COUNT] = [
        ZoneId::Velocity,
        ZoneId::Perfection,
        ZoneId::Discovery,
        ZoneId::Data,
        ZoneId::Intuition,
        ZoneId::Alignment,
        ZoneId::Chaos,
        ZoneId::Focus,
    ];

    /// Position in the canonical zone order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneId::Velocity => "velocity",
            ZoneId::Perfection => "perfection",
            ZoneId::Discovery => "discovery",
            ZoneId::Data => "data",
            ZoneId::Intuition => "intuition",
            ZoneId::Alignment => "alignment",
            ZoneId::Chaos => "chaos",
            ZoneId::Focus => "focus",
        }
    }

    /// Human-facing label. Differs from the id for some zones.
    pub fn display_name(self) -> &'static str {
        match self {
            ZoneId::Velocity => "Velocity",
            ZoneId::Perfection => "Craft",
            ZoneId::Discovery => "Discovery",
            ZoneId::Data => "Data",
            ZoneId::Intuition => "Intuition",
            ZoneId::Alignment => "Alignment",
            ZoneId::Chaos => "Adaptability",
            ZoneId::Focus => "Focus",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            ZoneId::Velocity => "Ship it, learn, ship again",
            ZoneId::Perfection => "Quality is the strategy",
            ZoneId::Discovery => "Fall in love with the problem",
            ZoneId::Data => "In metrics we trust",
            ZoneId::Intuition => "Taste over telemetry",
            ZoneId::Alignment => "Bring everyone along",
            ZoneId::Chaos => "Thrive in the unknown",
            ZoneId::Focus => "Say no to almost everything",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ZoneId::Velocity => {
                "You bias toward action. Small bets shipped quickly beat long planning cycles, \
                 and the market is the best reviewer."
            }
            ZoneId::Perfection => {
                "You hold a high bar for craft. Fewer, better releases build trust that \
                 rushed launches spend."
            }
            ZoneId::Discovery => {
                "You start from customer problems. Interviews, prototypes and evidence of \
                 pain come before roadmaps."
            }
            ZoneId::Data => {
                "You steer by measurement. Experiments, funnels and clear success metrics \
                 settle debates."
            }
            ZoneId::Intuition => {
                "You trust product sense. Conviction and taste lead where data cannot yet \
                 reach."
            }
            ZoneId::Alignment => {
                "You win through people. Shared context, stakeholder buy-in and clear \
                 narratives make teams move together."
            }
            ZoneId::Chaos => {
                "You adapt fast. Ambiguity and shifting priorities are terrain to navigate, \
                 not problems to eliminate."
            }
            ZoneId::Focus => {
                "You concentrate effort. A short list of priorities, defended hard, beats a \
                 long list done halfway."
            }
        }
    }
}

impl Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ZoneId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoneId::ALL
            .into_iter()
            .find(|zone| zone.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown zone: {}", s))
    }
}

/// Dense map with exactly one value per zone.
///
/// Serialized as a JSON object keyed by zone id. Keys missing from the input
/// take `T::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoneMap<T>([T; ZoneId::COUNT]);

impl<T: Copy> ZoneMap<T> {
    pub fn filled(value: T) -> Self {
        Self([value; ZoneId::COUNT])
    }

    pub fn get(&self, zone: ZoneId) -> T {
        self.0[zone.index()]
    }

    pub fn set(&mut self, zone: ZoneId, value: T) {
        self.0[zone.index()] = value;
    }

    /// Iterates entries in canonical zone order
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, T)> + '_ {
        ZoneId::ALL
            .into_iter()
            .map(move |zone| (zone, self.get(zone)))
    }

    pub fn map<U>(&self, f: impl Fn(T) -> U) -> ZoneMap<U> {
        ZoneMap(self.0.map(f))
    }
}

impl<T> Index<ZoneId> for ZoneMap<T> {
    type Output = T;

    fn index(&self, zone: ZoneId) -> &T {
        &self.0[zone.index()]
    }
}

impl<T: Copy + Default> FromIterator<(ZoneId, T)> for ZoneMap<T> {
    fn from_iter<I: IntoIterator<Item = (ZoneId, T)>>(iter: I) -> Self {
        let mut map = ZoneMap::filled(T::default());
        for (zone, value) in iter {
            map.set(zone, value);
        }
        map
    }
}

impl<T: Copy + Serialize> Serialize for ZoneMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ZoneId::COUNT))?;
        for (zone, value) in self.iter() {
            map.serialize_entry(zone.as_str(), &value)?;
        }
        map.end()
    }
}

impl<'de, T> Deserialize<'de> for ZoneMap<T>
where
    T: Copy + Default + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, T>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, value)| {
                key.parse::<ZoneId>()
                    .map(|zone| (zone, value))
                    .map_err(de::Error::custom)
            })
            .collect()
    }
}

impl ZoneMap<f64> {
    /// True when no zone carries a positive weight
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|weight| *weight <= 0.0)
    }
}

/// Public description of one zone, as served by `GET /zones`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInfo {
    pub id: ZoneId,
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
}

impl From<ZoneId> for ZoneInfo {
    fn from(zone: ZoneId) -> Self {
        Self {
            id: zone,
            name: zone.display_name(),
            tagline: zone.tagline(),
            description: zone.description(),
        }
    }
}

/// The full zone taxonomy in canonical order
pub fn zone_taxonomy() -> Vec<ZoneInfo> {
    ZoneId::ALL.into_iter().map(ZoneInfo::from).collect()
}
