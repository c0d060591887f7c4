//! Vehicle name canonicalization.
//!
//! Journal events report ships by internal identifiers ("empire_eagle",
//! "Type9_Military"); the table below maps them to player-facing names.

/// Name used when no vehicle was reported
pub const UNKNOWN_VEHICLE: &str = "Unknown";

// Keys are lowercase.
const CANONICAL_VEHICLE_NAMES: &[(&str, &str)] = &[
    ("adder", "adder"),
    ("anaconda", "anaconda"),
    ("asp", "asp explorer"),
    ("asp_scout", "asp scout"),
    ("belugaliner", "beluga liner"),
    ("cobramkiii", "cobra mk. iii"),
    ("cobramkiv", "cobra mk. iv"),
    ("cutter", "imperial cutter"),
    ("diamondback", "diamondback scout"),
    ("diamondbackxl", "diamondback explorer"),
    ("dolphin", "dolphin"),
    ("eagle", "eagle"),
    ("empire_courier", "imperial courier"),
    ("empire_eagle", "imperial eagle"),
    ("empire_trader", "imperial clipper"),
    ("federation_corvette", "federal corvette"),
    ("federation_dropship", "federal dropship"),
    ("federation_dropship_mkii", "federal assault ship"),
    ("federation_gunship", "federal gunship"),
    ("ferdelance", "fer-de-lance"),
    ("hauler", "hauler"),
    ("independant_trader", "keelback"),
    ("krait_light", "krait phantom"),
    ("krait_mkii", "krait mk. ii"),
    ("mamba", "mamba"),
    ("orca", "orca"),
    ("python", "python"),
    ("sidewinder", "sidewinder"),
    ("testbuggy", "srv"),
    ("type6", "type-6 transporter"),
    ("type7", "type-7 transporter"),
    ("type9", "type-9 heavy"),
    ("type9_military", "type-10 defender"),
    ("typex", "alliance chieftain"),
    ("typex_2", "alliance crusader"),
    ("typex_3", "alliance challenger"),
    ("viper", "viper mk. iii"),
    ("viper_mkiv", "viper mk. iv"),
    ("vulture", "vulture"),
];

/// Canonical name for a raw vehicle identifier.
///
/// Absent names become [`UNKNOWN_VEHICLE`]; known identifiers map through the
/// table case-insensitively; anything else is lowercased.
pub fn canonicalize(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN_VEHICLE.to_string();
    };

    let lowered = raw.to_lowercase();
    CANONICAL_VEHICLE_NAMES
        .iter()
        .find(|(key, _)| *key == lowered)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or(lowered)
}
