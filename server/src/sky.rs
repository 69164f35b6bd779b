use std::ops::Range;

use serde::Serialize;

/// Icon and label for one classified sky state.
#[derive(Debug, Serialize)]
pub struct SkyCondition {
    pub icon: &'static str,
    pub label: &'static str,
}

struct ConditionSet {
    rainy: SkyCondition,
    cloudy: SkyCondition,
    sunny: SkyCondition,
}

static DAY: ConditionSet = ConditionSet {
    rainy: SkyCondition { icon: "🌧️", label: "Chuva" },
    cloudy: SkyCondition { icon: "⛅", label: "Parcialmente Nublado" },
    sunny: SkyCondition { icon: "☀️", label: "Sol" },
};

static NIGHT: ConditionSet = ConditionSet {
    rainy: SkyCondition { icon: "🌧️", label: "Chuva" },
    cloudy: SkyCondition { icon: "☁️", label: "Parcialmente Nublado" },
    sunny: SkyCondition { icon: "🌙", label: "Sol" },
};

/// Placeholder for hours with no forecast document. Classification itself
/// never yields it; the no-data payload borrows its icon.
pub static NO_FORECAST: SkyCondition = SkyCondition { icon: "❓", label: "Sem Previsão" };

/// Daytime window, in UTC hours.
const DAY_HOURS: Range<u32> = 6..18;

/// Derive the sky condition for one hourly record. Cloud cover above 10%
/// counts as cloudy; any precipitation at all counts as rain.
pub fn classify(cloud_cover_pct: f64, precipitation: f64, hour_utc: u32) -> &'static SkyCondition {
    let set = if DAY_HOURS.contains(&hour_utc) { &DAY } else { &NIGHT };
    let cloudy = cloud_cover_pct > 10.0;
    let precipitating = precipitation > 0.0;

    match (cloudy, precipitating) {
        (_, true) => &set.rainy,
        (true, false) => &set.cloudy,
        (false, false) => &set.sunny,
    }
}
