/// Static catalog of the Sun's major bodies and their moons.
///
/// Distances and sizes are scene units, not physical values; speeds are
/// radians per animation step at multiplier 1.
use crate::api::types::BodyKind;

/// Linear RGB, 0..1.
pub type Rgb = [f32; 3];

/// How a body's surface is shaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Path of an image under the renderer's texture root.
    Texture(&'static str),
    Color(Rgb),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonDescriptor {
    pub name: &'static str,
    pub size: f32,
    /// Offset from the parent's centre.
    pub dist: f32,
    pub speed: f64,
    pub initial_angle: f64,
    pub color: Rgb,
    pub info: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    pub name: &'static str,
    pub kind: BodyKind,
    pub size: f32,
    /// Orbit radius around the Sun.
    pub dist: f32,
    /// Angular rate; negative is retrograde.
    pub speed: f64,
    pub initial_angle: f64,
    pub roughness: f32,
    pub metalness: f32,
    pub surface: Surface,
    pub has_rings: bool,
    pub discovery_year: &'static str,
    pub info: &'static str,
    pub moons: &'static [MoonDescriptor],
}

impl CelestialBody {
    const fn new(name: &'static str, kind: BodyKind, size: f32, dist: f32, speed: f64) -> Self {
        Self {
            name,
            kind,
            size,
            dist,
            speed,
            initial_angle: 0.0,
            roughness: 1.0,
            metalness: 0.05,
            surface: Surface::Color([0.6, 0.6, 0.6]),
            has_rings: false,
            discovery_year: "",
            info: "",
            moons: &[],
        }
    }

    const fn angle(mut self, initial_angle: f64) -> Self {
        self.initial_angle = initial_angle;
        self
    }

    const fn surface(mut self, surface: Surface, roughness: f32, metalness: f32) -> Self {
        self.surface = surface;
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }

    const fn rings(mut self) -> Self {
        self.has_rings = true;
        self
    }

    const fn about(mut self, discovery_year: &'static str, info: &'static str) -> Self {
        self.discovery_year = discovery_year;
        self.info = info;
        self
    }

    const fn moons(mut self, moons: &'static [MoonDescriptor]) -> Self {
        self.moons = moons;
        self
    }
}

const fn moon(
    name: &'static str,
    size: f32,
    dist: f32,
    speed: f64,
    initial_angle: f64,
    color: Rgb,
    info: &'static str,
) -> MoonDescriptor {
    MoonDescriptor { name, size, dist, speed, initial_angle, color, info }
}

use BodyKind::{Asteroid, Dwarf, Planet, Tno};
use Surface::{Color, Texture};

const EARTH_MOONS: &[MoonDescriptor] = &[
    moon("Moon", 0.27, 2.5, 0.037, 1.2, [0.53, 0.53, 0.53], "Earth's only natural satellite, formed 4.5 billion years ago."),
];

const MARS_MOONS: &[MoonDescriptor] = &[
    moon("Phobos", 0.05, 1.5, 0.32, 0.5, [0.4, 0.26, 0.13], "Larger moon of Mars, circling it three times a day."),
    moon("Deimos", 0.03, 2.2, 0.08, 2.1, [0.4, 0.26, 0.13], "Smaller outer moon of Mars with a 30 hour orbit."),
];

const JUPITER_MOONS: &[MoonDescriptor] = &[
    moon("Io", 0.15, 3.5, 0.56, 0.8, [1.0, 1.0, 0.6], "The most volcanically active body in the solar system."),
    moon("Europa", 0.13, 4.2, 0.28, 1.5, [0.53, 0.81, 0.92], "Ice shell over a subsurface ocean."),
    moon("Ganymede", 0.22, 5.1, 0.14, 3.2, [0.55, 0.49, 0.42], "Largest moon in the solar system, with its own magnetic field."),
    moon("Callisto", 0.20, 6.0, 0.06, 4.9, [0.41, 0.41, 0.41], "The most heavily cratered body known."),
    moon("Amalthea", 0.08, 2.8, 2.0, 5.2, [0.6, 0.4, 0.2], "Irregular inner moon, fifth largest of Jupiter."),
    moon("Himalia", 0.05, 7.5, 0.013, 2.1, [0.5, 0.5, 0.5], "Largest irregular moon of Jupiter."),
    moon("Lysithea", 0.02, 8.2, 0.010, 4.7, [0.4, 0.4, 0.4], "Small irregular moon of the prograde group."),
    moon("Elara", 0.03, 8.0, 0.011, 1.8, [0.45, 0.45, 0.45], "Irregular moon discovered in 1905."),
];

const SATURN_MOONS: &[MoonDescriptor] = &[
    moon("Mimas", 0.06, 2.8, 1.05, 0.9, [0.7, 0.7, 0.7], "Marked by the giant Herschel crater."),
    moon("Enceladus", 0.08, 3.2, 0.73, 4.1, [0.94, 0.97, 1.0], "Ice geysers vent from its south pole."),
    moon("Tethys", 0.09, 3.7, 0.52, 2.7, [0.8, 0.8, 0.85], "Cratered icy moon with the Odysseus basin."),
    moon("Dione", 0.09, 4.1, 0.37, 5.5, [0.75, 0.75, 0.8], "Ice cliffs streak its trailing hemisphere."),
    moon("Rhea", 0.12, 4.8, 0.22, 1.3, [0.7, 0.7, 0.75], "Second largest moon of Saturn, with a tenuous oxygen exosphere."),
    moon("Titan", 0.21, 5.5, 0.063, 2.3, [1.0, 0.65, 0.0], "Thick atmosphere and lakes of liquid methane."),
    moon("Hyperion", 0.04, 6.2, 0.048, 3.8, [0.6, 0.5, 0.4], "Tumbles chaotically; sponge-like surface."),
    moon("Iapetus", 0.11, 7.0, 0.014, 0.5, [0.3, 0.3, 0.3], "Two-toned, with a dark leading hemisphere."),
    moon("Phoebe", 0.03, 8.5, 0.006, 4.9, [0.25, 0.25, 0.25], "Retrograde irregular moon, likely a captured asteroid."),
];

const URANUS_MOONS: &[MoonDescriptor] = &[
    moon("Ariel", 0.08, 2.2, 0.39, 2.1, [0.6, 0.6, 0.65], "Youngest surface of the Uranian moons, cut by fault valleys."),
    moon("Umbriel", 0.08, 2.5, 0.23, 4.8, [0.4, 0.4, 0.45], "Darkest of the major Uranian moons."),
    moon("Titania", 0.11, 3.0, 0.12, 1.7, [0.55, 0.55, 0.6], "Largest moon of Uranus, with deep canyons."),
    moon("Oberon", 0.10, 3.4, 0.075, 5.3, [0.5, 0.5, 0.55], "Outermost major moon; old, cratered surface."),
    moon("Miranda", 0.06, 1.8, 0.67, 3.7, [0.53, 0.53, 0.53], "Patchwork terrain of extreme geological features."),
    moon("Puck", 0.03, 1.5, 1.18, 0.8, [0.45, 0.45, 0.5], "Small irregular moon found by Voyager 2."),
];

const NEPTUNE_MOONS: &[MoonDescriptor] = &[
    moon("Triton", 0.11, 3.0, 0.17, 0.9, [0.53, 0.81, 0.92], "Retrograde orbit and nitrogen geysers."),
    moon("Nereid", 0.02, 4.8, 0.003, 3.2, [0.5, 0.5, 0.5], "Highly eccentric orbit; likely a captured Kuiper Belt object."),
    moon("Proteus", 0.03, 2.2, 0.89, 5.7, [0.4, 0.4, 0.4], "Largest irregularly shaped moon of Neptune."),
    moon("Larissa", 0.015, 1.8, 1.81, 2.4, [0.35, 0.35, 0.35], "Small inner moon found by Voyager 2."),
];

const PLUTO_MOONS: &[MoonDescriptor] = &[
    moon("Charon", 0.2, 1.8, 0.16, 1.8, [0.5, 0.5, 0.5], "Largest moon relative to its parent. Tidally locked to Pluto."),
];

const ERIS_MOONS: &[MoonDescriptor] = &[
    moon("Dysnomia", 0.04, 2.0, 0.067, 4.5, [0.6, 0.6, 0.6], "Only known moon of Eris."),
];

const MAKEMAKE_MOONS: &[MoonDescriptor] = &[
    moon("MK 2", 0.02, 1.5, 0.083, 0.7, [0.4, 0.4, 0.4], "Small, dark moon of Makemake."),
];

const HAUMEA_MOONS: &[MoonDescriptor] = &[
    moon("Hi'iaka", 0.05, 2.2, 0.02, 2.9, [0.87, 0.87, 0.87], "Larger moon of Haumea."),
    moon("Namaka", 0.03, 1.8, 0.056, 5.1, [0.8, 0.8, 0.8], "Smaller, inner moon of Haumea."),
];

const QUAOAR_MOONS: &[MoonDescriptor] = &[
    moon("Weywot", 0.02, 1.6, 0.083, 1.3, [0.33, 0.33, 0.33], "Moon of Quaoar."),
];

const ORCUS_MOONS: &[MoonDescriptor] = &[
    moon("Vanth", 0.06, 1.9, 0.1, 4.8, [0.27, 0.27, 0.27], "Large moon of Orcus."),
];

const GONGGONG_MOONS: &[MoonDescriptor] = &[
    moon("Xiangliu", 0.03, 1.7, 0.1, 3.8, [0.4, 0.4, 0.4], "Moon of Gonggong."),
];

const SALACIA_MOONS: &[MoonDescriptor] = &[
    moon("Actaea", 0.04, 1.4, 0.09, 1.9, [0.5, 0.5, 0.55], "Moon of Salacia, found in 2006."),
];

const OR10_MOONS: &[MoonDescriptor] = &[
    moon("S/2016 (225088) 1", 0.025, 1.6, 0.08, 5.1, [0.4, 0.4, 0.4], "Small moon of 2007 OR10."),
];

/// Bodies in catalog order. Body ids index into this table.
pub const CATALOG: &[CelestialBody] = &[
    CelestialBody::new("Mercury", Planet, 0.5, 8.0, 0.0041)
        .angle(2.1)
        .surface(Texture("mercury.jpg"), 1.0, 0.02)
        .about("Ancient", "Closest planet to the Sun. Surface temperatures swing from -173°C to 427°C. No atmosphere and no moons."),
    CelestialBody::new("Venus", Planet, 0.9, 11.0, 0.0016)
        .angle(4.8)
        .surface(Texture("venus.jpg"), 0.6, 0.05)
        .about("Ancient", "Hottest planet, with surface temperatures near 462°C under a thick carbon dioxide atmosphere."),
    CelestialBody::new("Earth", Planet, 1.0, 15.0, 0.001)
        .angle(3.45)
        .surface(Texture("earth.jpg"), 0.5, 0.01)
        .about("N/A", "The only known planet with life. Water covers 71% of the surface. One natural satellite.")
        .moons(EARTH_MOONS),
    CelestialBody::new("Mars", Planet, 0.8, 19.0, 0.00053)
        .angle(0.9)
        .surface(Texture("mars.jpg"), 0.75, 0.02)
        .about("Ancient", "The Red Planet. Home of Olympus Mons and Valles Marineris.")
        .moons(MARS_MOONS),
    CelestialBody::new("Vesta", Asteroid, 0.15, 20.5, 0.00029)
        .angle(5.2)
        .surface(Color([0.8, 0.8, 0.8]), 1.0, 0.1)
        .about("1807", "Second-largest asteroid with a differentiated interior and basaltic crust. Visited by Dawn."),
    CelestialBody::new("Pallas", Asteroid, 0.12, 21.2, 0.00022)
        .angle(1.8)
        .surface(Color([0.67, 0.67, 0.67]), 1.0, 0.05)
        .about("1802", "Third-largest asteroid on a steeply inclined orbit. Possibly a protoplanet."),
    CelestialBody::new("Jupiter", Planet, 2.0, 25.0, 0.000084)
        .angle(2.7)
        .surface(Texture("jupiter.jpg"), 0.9, 0.0)
        .about("Ancient", "Largest planet. The Great Red Spot is a storm wider than Earth. 95 known moons.")
        .moons(JUPITER_MOONS),
    CelestialBody::new("Saturn", Planet, 1.7, 31.0, 0.000034)
        .angle(5.8)
        .surface(Texture("saturn.jpg"), 0.9, 0.0)
        .rings()
        .about("Ancient", "Known for its ring system. Less dense than water. 146 known moons.")
        .moons(SATURN_MOONS),
    CelestialBody::new("Uranus", Planet, 1.2, 37.0, 0.000012)
        .angle(1.2)
        .surface(Texture("uranus.jpg"), 0.85, 0.0)
        .about("1781", "Ice giant rolling on its side at 98° axial tilt. Faint rings and 28 known moons.")
        .moons(URANUS_MOONS),
    CelestialBody::new("Neptune", Planet, 1.1, 42.0, 0.0000061)
        .angle(6.1)
        .surface(Texture("neptune.jpg"), 0.85, 0.0)
        .about("1846", "Windiest planet, with gusts up to 2,100 km/h. Methane gives its deep blue.")
        .moons(NEPTUNE_MOONS),
    CelestialBody::new("Ceres", Dwarf, 0.3, 22.0, 0.00022)
        .surface(Color([0.6, 0.6, 0.6]), 1.0, 0.0)
        .about("1801", "Largest object in the asteroid belt, rich in water ice. Visited by Dawn."),
    CelestialBody::new("Pluto", Dwarf, 0.4, 48.0, 0.000004)
        .angle(5.3)
        .surface(Color([0.82, 0.71, 0.55]), 1.0, 0.0)
        .about("1930", "Former ninth planet with heart-shaped nitrogen plains. Binary system with Charon.")
        .moons(PLUTO_MOONS),
    CelestialBody::new("Eris", Dwarf, 0.35, 52.0, 0.0000018)
        .angle(2.7)
        .surface(Color([0.9, 0.9, 0.98]), 1.0, 0.0)
        .about("2005", "Most massive dwarf planet. Its discovery led to Pluto's reclassification.")
        .moons(ERIS_MOONS),
    CelestialBody::new("Makemake", Dwarf, 0.25, 50.0, 0.0000032)
        .angle(1.9)
        .surface(Color([0.55, 0.27, 0.07]), 1.0, 0.0)
        .about("2005", "Third-largest dwarf planet, reddened by organic compounds.")
        .moons(MAKEMAKE_MOONS),
    CelestialBody::new("Haumea", Dwarf, 0.28, 51.0, 0.0000035)
        .angle(4.2)
        .surface(Color([1.0, 1.0, 1.0]), 0.8, 0.1)
        .about("2004", "Elongated dwarf planet spinning every 4 hours, with a ring and crystalline ice surface.")
        .moons(HAUMEA_MOONS),
    CelestialBody::new("Sedna", Dwarf, 0.2, 65.0, 0.00000009)
        .angle(0.1)
        .surface(Color([0.55, 0.0, 0.0]), 1.0, 0.0)
        .about("2003", "Extremely distant object taking about 11,400 years per orbit."),
    CelestialBody::new("Quaoar", Dwarf, 0.18, 54.0, 0.0000035)
        .angle(3.1)
        .surface(Color([0.4, 0.26, 0.13]), 1.0, 0.0)
        .about("2002", "Classical Kuiper Belt object with a ring system.")
        .moons(QUAOAR_MOONS),
    CelestialBody::new("Orcus", Dwarf, 0.16, 49.0, 0.000004)
        .angle(5.7)
        .surface(Color([0.18, 0.31, 0.31]), 1.0, 0.0)
        .about("2004", "Plutino in 2:3 resonance with Neptune, sometimes called the anti-Pluto.")
        .moons(ORCUS_MOONS),
    CelestialBody::new("Gonggong", Dwarf, 0.19, 56.0, 0.0000018)
        .angle(2.4)
        .surface(Color([0.5, 0.0, 0.13]), 1.0, 0.0)
        .about("2007", "Red scattered-disk object with a slow 22 hour rotation.")
        .moons(GONGGONG_MOONS),
    CelestialBody::new("Varuna", Tno, 0.12, 53.0, 0.0000027)
        .angle(4.7)
        .surface(Color([0.41, 0.41, 0.41]), 1.0, 0.0)
        .about("2000", "Large classical Kuiper Belt object, elongated by rapid rotation."),
    CelestialBody::new("Ixion", Tno, 0.11, 49.5, 0.000004)
        .angle(0.8)
        .surface(Color([0.55, 0.27, 0.07]), 1.0, 0.0)
        .about("2001", "Plutino with a very red surface."),
    CelestialBody::new("Salacia", Tno, 0.13, 50.3, 0.0000035)
        .angle(2.9)
        .surface(Color([0.6, 0.6, 0.65]), 1.0, 0.0)
        .about("2004", "Large trans-Neptunian object with one known moon.")
        .moons(SALACIA_MOONS),
    CelestialBody::new("2007 OR10", Dwarf, 0.16, 55.2, 0.0000019)
        .angle(3.7)
        .surface(Color([0.45, 0.15, 0.10]), 1.0, 0.0)
        .about("2007", "One of the largest known dwarf planets, deep red in color.")
        .moons(OR10_MOONS),
];
