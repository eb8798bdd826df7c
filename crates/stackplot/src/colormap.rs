//! Named colormaps for data series.

use std::str::FromStr;

use log::warn;

use stackplot_core::color::Color;

/// A continuous colormap sampled on `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Rainbow,
    Viridis,
    Jet,
    Gray,
    Coolwarm,
    Plasma,
}

impl FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rainbow" => Ok(Self::Rainbow),
            "viridis" => Ok(Self::Viridis),
            "jet" => Ok(Self::Jet),
            "gray" | "grey" => Ok(Self::Gray),
            "coolwarm" => Ok(Self::Coolwarm),
            "plasma" => Ok(Self::Plasma),
            _ => Err(format!("unknown colormap `{s}`")),
        }
    }
}

type Stop = (f64, [f64; 3]);

const VIRIDIS: &[Stop] = &[
    (0.0, [0.267004, 0.004874, 0.329415]),
    (0.25, [0.229739, 0.322361, 0.545706]),
    (0.5, [0.127568, 0.566949, 0.550556]),
    (0.75, [0.369214, 0.788888, 0.382914]),
    (1.0, [0.993248, 0.906157, 0.143936]),
];

const PLASMA: &[Stop] = &[
    (0.0, [0.050383, 0.029803, 0.527975]),
    (0.25, [0.494877, 0.011990, 0.657865]),
    (0.5, [0.798216, 0.280197, 0.469538]),
    (0.75, [0.973416, 0.585761, 0.251540]),
    (1.0, [0.940015, 0.975158, 0.131326]),
];

const JET: &[Stop] = &[
    (0.0, [0.0, 0.0, 0.5]),
    (0.125, [0.0, 0.0, 1.0]),
    (0.375, [0.0, 1.0, 1.0]),
    (0.625, [1.0, 1.0, 0.0]),
    (0.875, [1.0, 0.0, 0.0]),
    (1.0, [0.5, 0.0, 0.0]),
];

const COOLWARM: &[Stop] = &[
    (0.0, [0.2298, 0.2987, 0.7537]),
    (0.25, [0.5543, 0.6901, 0.9955]),
    (0.5, [0.8654, 0.8654, 0.8654]),
    (0.75, [0.9567, 0.5980, 0.4773]),
    (1.0, [0.7057, 0.0156, 0.1502]),
];

impl Colormap {
    /// Color at position `t`, clamped to `[0, 1]`.
    pub fn sample(self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let [r, g, b] = match self {
            Self::Rainbow => {
                let angle = std::f64::consts::PI * t;
                [
                    (2.0 * t - 0.5).abs(),
                    angle.sin(),
                    (angle / 2.0).cos(),
                ]
            }
            Self::Gray => [t, t, t],
            Self::Viridis => interpolate(VIRIDIS, t),
            Self::Jet => interpolate(JET, t),
            Self::Coolwarm => interpolate(COOLWARM, t),
            Self::Plasma => interpolate(PLASMA, t),
        };
        Color::from_rgb(r, g, b)
    }
}

/// Piecewise-linear interpolation between sorted stops.
fn interpolate(stops: &[Stop], t: f64) -> [f64; 3] {
    let upper = stops
        .iter()
        .position(|(at, _)| *at >= t)
        .unwrap_or(stops.len() - 1);
    if upper == 0 {
        return stops[0].1;
    }
    let (t0, c0) = stops[upper - 1];
    let (t1, c1) = stops[upper];
    let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
    [
        c0[0] + (c1[0] - c0[0]) * f,
        c0[1] + (c1[1] - c0[1]) * f,
        c0[2] + (c1[2] - c0[2]) * f,
    ]
}

/// Base colors for `count` data series.
///
/// Series `i` takes the colormap at `i / max(1, count - 1)`. Without a
/// colormap, or with an unknown name, every series uses the default color.
pub fn series_colors(name: Option<&str>, count: usize) -> Vec<Color> {
    let colormap = name.and_then(|name| {
        name.parse::<Colormap>()
            .inspect_err(|err| warn!(err:%; "Falling back to default series color"))
            .ok()
    });
    let denominator = count.saturating_sub(1).max(1) as f64;
    (0..count)
        .map(|i| match colormap {
            Some(colormap) => colormap.sample(i as f64 / denominator),
            None => Color::default(),
        })
        .collect()
}
