use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;
const MAX_ACCUMULATOR: f64 = 0.25;

/// Fixed-rate frame stepping for the host loop.
///
/// Each redraw calls `begin_frame()`, then drains `should_step()`. Every step
/// is one logical frame of `fixed_dt = 1 / fps` seconds: input is sampled and
/// scenes are updated once per step.
pub struct FrameClock {
    pub fixed_dt: f64,
    accumulator: f64,
    pub total_time: f64,
    pub step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    pub real_dt: f64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let fixed_dt = 1.0 / f64::from(fps.max(1));
        Self {
            fixed_dt,
            accumulator: 0.0,
            total_time: 0.0,
            step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
            fps_samples: [fixed_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / fixed_dt,
            smoothed_frame_time_ms: fixed_dt * 1000.0,
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(real_dt);
    }

    /// Feeds an explicit wall-clock delta.
    pub fn advance(&mut self, real_dt: f64) {
        self.real_dt = real_dt.max(0.0);

        // Spiral-of-death cap
        if self.real_dt > MAX_ACCUMULATOR {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                self.real_dt * 1000.0,
                MAX_ACCUMULATOR * 1000.0
            );
            self.real_dt = MAX_ACCUMULATOR;
        }

        self.accumulator += self.real_dt;
        self.steps_this_frame = 0;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_step(&mut self) -> bool {
        // Tolerance keeps exact multiples of fixed_dt from losing a step to
        // float rounding.
        if self.accumulator + 1e-9 >= self.fixed_dt {
            self.accumulator = (self.accumulator - self.fixed_dt).max(0.0);
            self.total_time += self.fixed_dt;
            self.step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }
}
