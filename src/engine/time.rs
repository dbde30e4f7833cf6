use std::time::Instant;

pub struct FrameTimer {
    last: Instant,
    pub dt: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt: 0.0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
    }
}

const FPS_SAMPLES: usize = 60;

/// Rolling average of the last `FPS_SAMPLES` frame times.
pub struct FpsCounter {
    ring: [f32; FPS_SAMPLES],
    index: usize,
    count: usize,
    since_report: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            ring: [0.0; FPS_SAMPLES],
            index: 0,
            count: 0,
            since_report: 0.0,
        }
    }

    /// Push a frame delta into the rolling buffer. Call every frame.
    pub fn update(&mut self, dt: f32) {
        self.ring[self.index] = dt;
        self.index = (self.index + 1) % FPS_SAMPLES;
        if self.count < FPS_SAMPLES {
            self.count += 1;
        }
        self.since_report += dt;
    }

    pub fn fps(&self) -> f32 {
        let sum: f32 = self.ring[..self.count].iter().sum();
        if sum <= 0.0 {
            0.0
        } else {
            self.count as f32 / sum
        }
    }

    /// Returns the current FPS once every `interval` seconds.
    pub fn report(&mut self, interval: f32) -> Option<f32> {
        if self.since_report < interval {
            return None;
        }
        self.since_report = 0.0;
        Some(self.fps())
    }
}
