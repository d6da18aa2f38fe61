//! LED pattern engine.
//!
//! Turns a `(colour, pattern)` request into the RGB value for the current
//! instant. The presenter calls `tick()` once per scheduler tick with the
//! elapsed time; the engine owns the pattern phase and restarts it whenever
//! the requested pattern changes, so every blink begins in its lit half.
//!
//! | Pattern | Output                                      |
//! |---------|---------------------------------------------|
//! | Solid   | Constant colour                             |
//! | Blink   | Colour for `half_period`, then black, repeat |
//! | Off     | Black                                       |

use crate::colour::{BLACK, Rgb};

/// Pattern identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternId {
    Solid,
    /// Square wave, toggling every `half_period_ms`.
    Blink { half_period_ms: u32 },
    Off,
}

/// A pattern request with colour and type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRequest {
    pub colour: Rgb,
    pub pattern: PatternId,
}

impl PatternRequest {
    pub const fn solid(colour: Rgb) -> Self {
        Self {
            colour,
            pattern: PatternId::Solid,
        }
    }

    pub const fn blink(colour: Rgb, half_period_ms: u32) -> Self {
        Self {
            colour,
            pattern: PatternId::Blink { half_period_ms },
        }
    }

    pub const fn off() -> Self {
        Self {
            colour: BLACK,
            pattern: PatternId::Off,
        }
    }
}

/// LED pattern engine. Stack-allocated, no heap.
pub struct LedPatternEngine {
    phase_ms: u32,
    active: Option<PatternRequest>,
}

impl Default for LedPatternEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LedPatternEngine {
    pub const fn new() -> Self {
        Self {
            phase_ms: 0,
            active: None,
        }
    }

    /// Advance the phase by `delta_ms` and render `request`.
    ///
    /// The phase restarts at zero when the pattern kind changes or a blink
    /// changes colour. A solid colour may change freely without a restart.
    pub fn tick(&mut self, request: PatternRequest, delta_ms: u32) -> Rgb {
        self.phase_ms = self.phase_ms.wrapping_add(delta_ms);

        let restart = match self.active {
            Some(prev) => {
                prev.pattern != request.pattern
                    || (matches!(request.pattern, PatternId::Blink { .. })
                        && prev.colour != request.colour)
            }
            None => true,
        };
        if restart {
            self.phase_ms = 0;
        }
        self.active = Some(request);

        self.generate(request)
    }

    pub fn phase_ms(&self) -> u32 {
        self.phase_ms
    }

    fn generate(&self, request: PatternRequest) -> Rgb {
        match request.pattern {
            PatternId::Solid => request.colour,
            PatternId::Off => BLACK,
            PatternId::Blink { half_period_ms } => {
                let half = half_period_ms.max(1);
                let lit = (self.phase_ms / half) % 2 == 0;
                if lit { request.colour } else { BLACK }
            }
        }
    }
}
