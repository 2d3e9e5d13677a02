//! Transportation modes an edge may permit.
//!
//! [`TransportMode`] names a single mode; [`TransportModes`] is the additive
//! set stored on every edge.  Sets only ever grow during assembly.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::CoreError;

/// A category of vehicle or traveller.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum TransportMode {
    /// Private motor vehicle.
    Car,
    /// Bicycle.
    Bike,
    /// On foot.
    Walk,
    /// Scheduled road-bound public transport (bus, trolleybus…).
    Transit,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Car,
        TransportMode::Bike,
        TransportMode::Walk,
        TransportMode::Transit,
    ];

    /// Label used in configuration documents and edge attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car     => "car",
            TransportMode::Bike    => "bike",
            TransportMode::Walk    => "walk",
            TransportMode::Transit => "transit",
        }
    }

    /// The single-bit set containing only this mode.
    #[inline]
    pub fn flag(self) -> TransportModes {
        match self {
            TransportMode::Car     => TransportModes::CAR,
            TransportMode::Bike    => TransportModes::BIKE,
            TransportMode::Walk    => TransportModes::WALK,
            TransportMode::Transit => TransportModes::TRANSIT,
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car"                => Ok(TransportMode::Car),
            "bike" | "bicycle"   => Ok(TransportMode::Bike),
            "walk" | "foot"      => Ok(TransportMode::Walk),
            "transit" | "bus"    => Ok(TransportMode::Transit),
            _ => Err(CoreError::UnknownTransportMode(s.to_string())),
        }
    }
}

bitflags! {
    /// Set of [`TransportMode`]s allowed on an edge.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TransportModes: u8 {
        const CAR     = 1 << 0;
        const BIKE    = 1 << 1;
        const WALK    = 1 << 2;
        const TRANSIT = 1 << 3;
    }
}

impl TransportModes {
    /// Iterate the contained modes in declaration order.
    pub fn modes(self) -> impl Iterator<Item = TransportMode> {
        TransportMode::ALL
            .into_iter()
            .filter(move |m| self.contains(m.flag()))
    }

    #[inline]
    pub fn allows(self, mode: TransportMode) -> bool {
        self.contains(mode.flag())
    }
}

impl From<TransportMode> for TransportModes {
    fn from(mode: TransportMode) -> Self {
        mode.flag()
    }
}

impl FromIterator<TransportMode> for TransportModes {
    fn from_iter<I: IntoIterator<Item = TransportMode>>(iter: I) -> Self {
        iter.into_iter()
            .fold(TransportModes::empty(), |set, m| set | m.flag())
    }
}

impl fmt::Display for TransportModes {
    /// Comma-joined labels, e.g. `car,walk`.  The empty set prints nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mode) in self.modes().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(mode.as_str())?;
        }
        Ok(())
    }
}
