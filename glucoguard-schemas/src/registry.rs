//! The closed catalog of record kinds and the default registry built from it

use glucoguard_core::{Constructor, Datum, Registry};

use crate::{basal, bolus, device_event, glucose, pump_settings, wizard};

/// Every record kind this crate ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatumKind {
    BasalScheduled,
    BasalTemp,
    BasalSuspend,
    BolusNormal,
    BolusSquare,
    BolusDualSquare,
    Cbg,
    Smbg,
    DeviceEventAlarm,
    DeviceEventCalibration,
    PumpSettings,
    Wizard,
}

fn construct<T: Datum + Default + 'static>() -> Box<dyn Datum> {
    Box::<T>::default()
}

impl DatumKind {
    pub const ALL: [DatumKind; 12] = [
        DatumKind::BasalScheduled,
        DatumKind::BasalTemp,
        DatumKind::BasalSuspend,
        DatumKind::BolusNormal,
        DatumKind::BolusSquare,
        DatumKind::BolusDualSquare,
        DatumKind::Cbg,
        DatumKind::Smbg,
        DatumKind::DeviceEventAlarm,
        DatumKind::DeviceEventCalibration,
        DatumKind::PumpSettings,
        DatumKind::Wizard,
    ];

    pub const fn datum_type(&self) -> &'static str {
        match self {
            Self::BasalScheduled | Self::BasalTemp | Self::BasalSuspend => basal::TYPE,
            Self::BolusNormal | Self::BolusSquare | Self::BolusDualSquare => bolus::TYPE,
            Self::Cbg => glucose::TYPE_CBG,
            Self::Smbg => glucose::TYPE_SMBG,
            Self::DeviceEventAlarm | Self::DeviceEventCalibration => device_event::TYPE,
            Self::PumpSettings => pump_settings::TYPE,
            Self::Wizard => wizard::TYPE,
        }
    }

    pub const fn sub_type(&self) -> Option<&'static str> {
        match self {
            Self::BasalScheduled => Some(basal::SUB_TYPE_SCHEDULED),
            Self::BasalTemp => Some(basal::SUB_TYPE_TEMP),
            Self::BasalSuspend => Some(basal::SUB_TYPE_SUSPEND),
            Self::BolusNormal => Some(bolus::SUB_TYPE_NORMAL),
            Self::BolusSquare => Some(bolus::SUB_TYPE_SQUARE),
            Self::BolusDualSquare => Some(bolus::SUB_TYPE_DUAL_SQUARE),
            Self::DeviceEventAlarm => Some(device_event::SUB_TYPE_ALARM),
            Self::DeviceEventCalibration => Some(device_event::SUB_TYPE_CALIBRATION),
            Self::Cbg | Self::Smbg | Self::PumpSettings | Self::Wizard => None,
        }
    }

    pub fn constructor(&self) -> Constructor {
        match self {
            Self::BasalScheduled => construct::<basal::Scheduled>,
            Self::BasalTemp => construct::<basal::Temp>,
            Self::BasalSuspend => construct::<basal::Suspend>,
            Self::BolusNormal => construct::<bolus::Normal>,
            Self::BolusSquare => construct::<bolus::Square>,
            Self::BolusDualSquare => construct::<bolus::DualSquare>,
            Self::Cbg => construct::<glucose::Cbg>,
            Self::Smbg => construct::<glucose::Smbg>,
            Self::DeviceEventAlarm => construct::<device_event::Alarm>,
            Self::DeviceEventCalibration => construct::<device_event::Calibration>,
            Self::PumpSettings => construct::<pump_settings::PumpSettings>,
            Self::Wizard => construct::<wizard::Wizard>,
        }
    }
}

/// Registry holding every [`DatumKind`]
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    for kind in DatumKind::ALL {
        if let Err(_e) = registry.register(kind.datum_type(), kind.sub_type(), kind.constructor()) {
            log_warn!("skipping {:?}: {}", kind, _e);
        }
    }
    registry
}

lazy_static::lazy_static! {
    /// Shared, immutable registry with every default record kind
    pub static ref GLOBAL_REGISTRY: Registry = default_registry();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_kind_is_registered() {
        let registry = default_registry();
        assert_eq!(registry.len(), DatumKind::ALL.len());
        for kind in DatumKind::ALL {
            assert!(registry.contains(kind.datum_type(), kind.sub_type()), "{:?}", kind);
        }
    }

    #[test]
    fn discriminator_pairs_are_unique() {
        let pairs: HashSet<_> = DatumKind::ALL
            .iter()
            .map(|kind| (kind.datum_type(), kind.sub_type()))
            .collect();
        assert_eq!(pairs.len(), DatumKind::ALL.len());
    }

    #[test]
    fn constructors_match_their_kind() {
        for kind in DatumKind::ALL {
            let datum = (kind.constructor())();
            assert_eq!(datum.datum_type(), kind.datum_type());
            assert_eq!(datum.sub_type(), kind.sub_type());
        }
    }

    #[test]
    fn global_registry_is_populated() {
        assert!(!GLOBAL_REGISTRY.is_empty());
        assert!(GLOBAL_REGISTRY.contains("bolus", Some("dual/square")));
    }
}
