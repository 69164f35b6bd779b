/// One of the 8 wedges of the compass rose, 45° wide, half-open on the end
/// boundary.
#[derive(Debug)]
pub struct CompassSector {
    pub name: &'static str,
    pub icon: &'static str,
    pub start: f64,
    pub end: f64,
}

impl CompassSector {
    fn contains(&self, degree: f64) -> bool {
        if self.start > self.end {
            // The wedge straddling 0° (north).
            degree >= self.start || degree < self.end
        } else {
            degree >= self.start && degree < self.end
        }
    }
}

/// The rose, clockwise from north. Icons point where the flow is heading,
/// so a northerly (0°) renders as ⬇️.
pub static SECTORS: [CompassSector; 8] = [
    CompassSector { name: "Norte", icon: "⬇️", start: 337.5, end: 22.5 },
    CompassSector { name: "Nordeste", icon: "↙️", start: 22.5, end: 67.5 },
    CompassSector { name: "Leste", icon: "⬅️", start: 67.5, end: 112.5 },
    CompassSector { name: "Sudeste", icon: "↖️", start: 112.5, end: 157.5 },
    CompassSector { name: "Sul", icon: "⬆️", start: 157.5, end: 202.5 },
    CompassSector { name: "Sudoeste", icon: "↗️", start: 202.5, end: 247.5 },
    CompassSector { name: "Oeste", icon: "➡️", start: 247.5, end: 292.5 },
    CompassSector { name: "Noroeste", icon: "↘️", start: 292.5, end: 337.5 },
];

/// Map a wave/wind direction in degrees to its sector. Any finite input is
/// accepted; the value is first folded into [0, 360).
pub fn resolve(degree: f64) -> &'static CompassSector {
    let folded = ((degree % 360.0) + 360.0) % 360.0;
    // The table partitions [0, 360), so the lookup cannot miss.
    SECTORS
        .iter()
        .find(|sector| sector.contains(folded))
        .unwrap_or(&SECTORS[0])
}
