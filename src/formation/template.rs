//! Parametric stage layouts for any number of dancers.
//!
//! Each template maps a dancer count `n` to exactly `n` positions inside
//! `[0, 100]²`. All templates are pure except [`LayoutTemplate::Cluster`],
//! which draws from the random source handed to [`layout_with_rng`].

use std::f32::consts::{FRAC_PI_2, TAU};
use std::str::FromStr;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::on_stage_grid;

const STAGE_CENTER: Vec2 = Vec2::new(50.0, 50.0);

/// Left/right edge used by the horizontal templates.
const WING_MIN: f32 = 10.0;
const WING_MAX: f32 = 90.0;

/// Apex of the V, at back-center.
const V_APEX: Vec2 = Vec2::new(50.0, 20.0);

/// Triangle rows run from the front point (downstage) to the back.
const TRIANGLE_FRONT: f32 = 80.0;
const TRIANGLE_DEPTH: f32 = 60.0;
const TRIANGLE_MAX_SPACING: f32 = 15.0;

const DIAMOND_MAX_STEP: f32 = 12.0;
const DIAMOND_MAX_RADIUS: f32 = 45.0;
/// Vertical compression so diamonds read correctly on a wide stage.
const DIAMOND_ASPECT: f32 = 0.7;

const DIAGONAL_START: f32 = 15.0;
const DIAGONAL_END: f32 = 85.0;

const STAGGER_FRONT: f32 = 60.0;
const STAGGER_BACK: f32 = 40.0;

const CIRCLE_RADIUS_X: f32 = 35.0;
const CIRCLE_RADIUS_Y: f32 = 25.0;

const CLUSTER_MIN: f32 = 35.0;
const CLUSTER_MAX: f32 = 65.0;

/// A named stage layout generator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutTemplate {
    /// Single horizontal line at mid-stage.
    Line,
    /// Two arms diverging downstage from a back-center apex.
    VShape,
    /// Rows of 1, 2, 3, … with the point downstage.
    Triangle,
    /// Concentric diamond rings around center.
    Diamond,
    /// Upstage-left to downstage-right.
    Diagonal,
    /// Horizontal line alternating front and back.
    Staggered,
    /// Ellipse around center.
    Circle,
    /// Random positions in a central region.
    Cluster,
}

impl LayoutTemplate {
    /// Every template, in menu order.
    pub const ALL: [LayoutTemplate; 8] = [
        Self::Line,
        Self::VShape,
        Self::Triangle,
        Self::Diamond,
        Self::Diagonal,
        Self::Staggered,
        Self::Circle,
        Self::Cluster,
    ];

    /// Serialized name of the template.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::VShape => "v-shape",
            Self::Triangle => "triangle",
            Self::Diamond => "diamond",
            Self::Diagonal => "diagonal",
            Self::Staggered => "staggered",
            Self::Circle => "circle",
            Self::Cluster => "cluster",
        }
    }
}

impl FromStr for LayoutTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown layout template '{s}'"))
    }
}

/// Layout for `n` dancers, using thread-local randomness for
/// [`LayoutTemplate::Cluster`].
#[must_use]
pub fn layout(template: LayoutTemplate, n: usize) -> Vec<Vec2> {
    layout_with_rng(template, n, &mut rand::rng())
}

/// Layout for `n` dancers drawing any randomness from `rng`.
///
/// Points are rounded onto the storage grid. Pass a seeded generator to get
/// repeatable cluster layouts.
pub fn layout_with_rng<R: Rng + ?Sized>(
    template: LayoutTemplate,
    n: usize,
    rng: &mut R,
) -> Vec<Vec2> {
    let points = match template {
        LayoutTemplate::Line => line(n),
        LayoutTemplate::VShape => v_shape(n),
        LayoutTemplate::Triangle => triangle(n),
        LayoutTemplate::Diamond => diamond(n),
        LayoutTemplate::Diagonal => diagonal(n),
        LayoutTemplate::Staggered => staggered(n),
        LayoutTemplate::Circle => circle(n),
        LayoutTemplate::Cluster => cluster(n, rng),
    };
    points
        .into_iter()
        .map(|p| on_stage_grid(p.clamp(Vec2::ZERO, Vec2::splat(100.0))))
        .collect()
}

/// Evenly spread index `i` of `n` over `[lo, hi]`; a lone point sits in the
/// middle.
fn spread(i: usize, n: usize, lo: f32, hi: f32) -> f32 {
    if n <= 1 {
        (lo + hi) / 2.0
    } else {
        lo + (hi - lo) * i as f32 / (n - 1) as f32
    }
}

fn line(n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| Vec2::new(spread(i, n, WING_MIN, WING_MAX), STAGE_CENTER.y))
        .collect()
}

fn v_shape(n: usize) -> Vec<Vec2> {
    let pairs = n / 2;
    let (dx, dy) = if pairs == 0 {
        (0.0, 0.0)
    } else {
        let p = pairs as f32;
        ((40.0 / p).min(10.0), (60.0 / p).min(10.0))
    };

    let mut out = Vec::with_capacity(n);
    if n % 2 == 1 {
        out.push(V_APEX);
    }
    for k in 1..=pairs {
        let k = k as f32;
        let y = V_APEX.y + k * dy;
        out.push(Vec2::new(V_APEX.x - k * dx, y));
        out.push(Vec2::new(V_APEX.x + k * dx, y));
    }
    out
}

fn triangle(n: usize) -> Vec<Vec2> {
    let mut rows = 0;
    while rows * (rows + 1) / 2 < n {
        rows += 1;
    }
    let (row_gap, spacing) = if rows > 1 {
        let gaps = (rows - 1) as f32;
        (
            TRIANGLE_DEPTH / gaps,
            ((WING_MAX - WING_MIN) / gaps).min(TRIANGLE_MAX_SPACING),
        )
    } else {
        (0.0, 0.0)
    };
    let front = if rows > 1 {
        TRIANGLE_FRONT
    } else {
        STAGE_CENTER.y
    };

    let mut out = Vec::with_capacity(n);
    let mut remaining = n;
    for row in 0..rows {
        let count = (row + 1).min(remaining);
        let half_width = (count as f32 - 1.0) / 2.0;
        let y = front - row as f32 * row_gap;
        for j in 0..count {
            let x = STAGE_CENTER.x + (j as f32 - half_width) * spacing;
            out.push(Vec2::new(x, y));
        }
        remaining -= count;
    }
    out
}

fn diamond(n: usize) -> Vec<Vec2> {
    if n == 0 {
        return Vec::new();
    }
    // Layers 0..=L hold 1 + 2L(L+1) points.
    let mut max_layer = 0;
    while 1 + 2 * max_layer * (max_layer + 1) < n {
        max_layer += 1;
    }
    let step = if max_layer == 0 {
        0.0
    } else {
        (DIAMOND_MAX_RADIUS / max_layer as f32).min(DIAMOND_MAX_STEP)
    };

    let mut out = Vec::with_capacity(n);
    out.push(STAGE_CENTER);
    'layers: for layer in 1..=max_layer {
        let radius = layer as f32 * step;
        let corners = [
            Vec2::new(radius, 0.0),
            Vec2::new(0.0, radius),
            Vec2::new(-radius, 0.0),
            Vec2::new(0.0, -radius),
        ];
        for j in 0..4 * layer {
            if out.len() == n {
                break 'layers;
            }
            let side = j / layer;
            let t = (j % layer) as f32 / layer as f32;
            let offset = corners[side].lerp(corners[(side + 1) % 4], t);
            out.push(Vec2::new(
                STAGE_CENTER.x + offset.x,
                STAGE_CENTER.y + offset.y * DIAMOND_ASPECT,
            ));
        }
    }
    out
}

fn diagonal(n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| Vec2::splat(spread(i, n, DIAGONAL_START, DIAGONAL_END)))
        .collect()
}

fn staggered(n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let y = if i % 2 == 0 { STAGGER_BACK } else { STAGGER_FRONT };
            Vec2::new(spread(i, n, WING_MIN, WING_MAX), y)
        })
        .collect()
}

fn circle(n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let angle = TAU * i as f32 / n as f32 - FRAC_PI_2;
            Vec2::new(
                STAGE_CENTER.x + CIRCLE_RADIUS_X * angle.cos(),
                STAGE_CENTER.y + CIRCLE_RADIUS_Y * angle.sin(),
            )
        })
        .collect()
}

fn cluster<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Vec2> {
    (0..n)
        .map(|_| {
            Vec2::new(
                rng.random_range(CLUSTER_MIN..=CLUSTER_MAX),
                rng.random_range(CLUSTER_MIN..=CLUSTER_MAX),
            )
        })
        .collect()
}
