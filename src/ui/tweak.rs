use std::fmt;

/// Value type of a registered variable, with the editing hints the UI needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweakKind {
    Color3,
    Float { min: f32, max: f32, step: f32 },
    /// Unit direction. `flip_z` shows the z axis pointing away from the viewer.
    Dir3 { flip_z: bool },
    Point3 { flip_z: bool },
    Attenuation,
}

impl TweakKind {
    /// Intensity sliders shared by every light kind.
    pub const INTENSITY: TweakKind = TweakKind::Float {
        min: 0.0,
        max: 1.0,
        step: 0.005,
    };
}

impl TweakKind {
    /// Only float variables can be nudged from the keyboard.
    pub fn is_editable(&self) -> bool {
        matches!(self, TweakKind::Float { .. })
    }
}

impl fmt::Display for TweakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TweakKind::Color3 => write!(f, "color3"),
            TweakKind::Float { min, max, step } => {
                write!(f, "float min={min} max={max} step={step}")
            }
            TweakKind::Dir3 { flip_z } => {
                write!(f, "dir3{}", if *flip_z { " axisz=-z" } else { "" })
            }
            TweakKind::Point3 { flip_z } => {
                write!(f, "point3{}", if *flip_z { " axisz=-z" } else { "" })
            }
            TweakKind::Attenuation => write!(f, "attenuation"),
        }
    }
}

/// Anything that accepts "editable variable" registrations keyed by a
/// path-like name such as `Sun.Ambient Intensity`.
pub trait TweakRegistry {
    fn add_var(&mut self, name: String, kind: TweakKind);
}

#[derive(Clone, Debug, PartialEq)]
pub struct TweakVar {
    pub name: String,
    pub kind: TweakKind,
}

/// A float edit produced by [`TweakBar::nudge`]. `apply` clamps to the range.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatNudge {
    pub name: String,
    pub delta: f32,
    pub min: f32,
    pub max: f32,
}

impl FloatNudge {
    pub fn apply(&self, value: &mut f32) {
        *value = (*value + self.delta).clamp(self.min, self.max);
    }
}

/// In-order registry of tweakable variables with a keyboard selection cursor.
pub struct TweakBar {
    title: String,
    vars: Vec<TweakVar>,
    selected: usize,
}

impl TweakBar {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            vars: Vec::new(),
            selected: 0,
        }
    }

    pub fn vars(&self) -> &[TweakVar] {
        &self.vars
    }

    pub fn selected(&self) -> Option<&TweakVar> {
        self.vars.get(self.selected)
    }

    /// Move the cursor to the next variable, wrapping at the end.
    pub fn select_next(&mut self) -> Option<&TweakVar> {
        if self.vars.is_empty() {
            return None;
        }
        self.selected = (self.selected + 1) % self.vars.len();
        self.selected()
    }

    /// `steps` increments of the selected variable, if it is a float.
    pub fn nudge(&self, steps: f32) -> Option<FloatNudge> {
        match self.selected()? {
            TweakVar {
                name,
                kind: TweakKind::Float { min, max, step },
            } => Some(FloatNudge {
                name: name.clone(),
                delta: steps * step,
                min: *min,
                max: *max,
            }),
            _ => None,
        }
    }

    pub fn log_layout(&self) {
        log::info!("tweak bar '{}': {} variables", self.title, self.vars.len());
        for var in self.vars() {
            log::debug!("  {} [{}]", var.name, var.kind);
        }
    }
}

impl TweakRegistry for TweakBar {
    fn add_var(&mut self, name: String, kind: TweakKind) {
        self.vars.push(TweakVar { name, kind });
    }
}
