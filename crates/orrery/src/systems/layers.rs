use crate::catalog::belts::BeltKind;

/// A group of scene objects the user can show or hide together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerId {
    Orbits,
    Moons,
    PlanetLabels,
    MoonLabels,
    Belt(BeltKind),
    /// Every belt at once.
    AllBelts,
    RealAsteroids,
    Comets,
}

impl LayerId {
    /// Bridge code: 0-3 orbits, moons, planet labels, moon labels; 4-10 one
    /// belt each in `BeltKind::ALL` order; 11 all belts; 12 real asteroids; 13 comets.
    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            0 => LayerId::Orbits,
            1 => LayerId::Moons,
            2 => LayerId::PlanetLabels,
            3 => LayerId::MoonLabels,
            4..=10 => LayerId::Belt(BeltKind::ALL[(code - 4) as usize]),
            11 => LayerId::AllBelts,
            12 => LayerId::RealAsteroids,
            13 => LayerId::Comets,
            _ => return None,
        })
    }
}

/// Visibility flags; everything starts visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerVisibility {
    orbits: bool,
    moons: bool,
    planet_labels: bool,
    moon_labels: bool,
    belts: [bool; 7],
    real_asteroids: bool,
    comets: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            orbits: true,
            moons: true,
            planet_labels: true,
            moon_labels: true,
            belts: [true; 7],
            real_asteroids: true,
            comets: true,
        }
    }
}

impl LayerVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, layer: LayerId) -> bool {
        match layer {
            LayerId::Orbits => self.orbits,
            LayerId::Moons => self.moons,
            LayerId::PlanetLabels => self.planet_labels,
            LayerId::MoonLabels => self.moon_labels,
            LayerId::Belt(kind) => self.belts[kind.index()],
            LayerId::AllBelts => self.belts.iter().all(|v| *v),
            LayerId::RealAsteroids => self.real_asteroids,
            LayerId::Comets => self.comets,
        }
    }

    /// Flip a layer and return its new state. `AllBelts` shows every belt
    /// if any is hidden, otherwise hides them all.
    pub fn toggle(&mut self, layer: LayerId) -> bool {
        let flag = match layer {
            LayerId::Orbits => &mut self.orbits,
            LayerId::Moons => &mut self.moons,
            LayerId::PlanetLabels => &mut self.planet_labels,
            LayerId::MoonLabels => &mut self.moon_labels,
            LayerId::Belt(kind) => &mut self.belts[kind.index()],
            LayerId::AllBelts => {
                let show = !self.belts.iter().all(|v| *v);
                self.belts = [show; 7];
                return show;
            }
            LayerId::RealAsteroids => &mut self.real_asteroids,
            LayerId::Comets => &mut self.comets,
        };
        *flag = !*flag;
        *flag
    }

    /// Bit per flag for the frame header: orbits, moons, planet labels,
    /// moon labels, then one bit per belt in `BeltKind::ALL` order, real
    /// asteroids, comets.
    pub fn bits(&self) -> u32 {
        let mut bits = 0u32;
        let flags = [self.orbits, self.moons, self.planet_labels, self.moon_labels];
        for (i, on) in flags.iter().chain(self.belts.iter()).enumerate() {
            if *on {
                bits |= 1 << i;
            }
        }
        if self.real_asteroids {
            bits |= 1 << 11;
        }
        if self.comets {
            bits |= 1 << 12;
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_one_layer() {
        let mut layers = LayerVisibility::new();
        assert!(!layers.toggle(LayerId::Orbits));
        assert!(!layers.is_visible(LayerId::Orbits));
        assert!(layers.is_visible(LayerId::Moons));
        assert!(layers.toggle(LayerId::Orbits));
    }

    #[test]
    fn all_belts_shows_when_any_hidden() {
        let mut layers = LayerVisibility::new();
        layers.toggle(LayerId::Belt(BeltKind::Kuiper));
        assert!(!layers.is_visible(LayerId::AllBelts));

        assert!(layers.toggle(LayerId::AllBelts));
        assert!(BeltKind::ALL.iter().all(|k| layers.is_visible(LayerId::Belt(*k))));

        assert!(!layers.toggle(LayerId::AllBelts));
        assert!(BeltKind::ALL.iter().all(|k| !layers.is_visible(LayerId::Belt(*k))));
    }

    #[test]
    fn bits_track_flags() {
        let mut layers = LayerVisibility::new();
        assert_eq!(layers.bits(), (1 << 13) - 1);
        layers.toggle(LayerId::Comets);
        layers.toggle(LayerId::Moons);
        assert_eq!(layers.bits() & (1 << 12), 0);
        assert_eq!(layers.bits() & (1 << 1), 0);
    }
}
