use rand::Rng;

/// The weather state of a world, following the vanilla timer ranges.
pub struct Weather {
    pub raining: bool,
    pub thundering: bool,
    /// Ticks until the rain state flips.
    pub rain_time: i32,
    /// Ticks until the thunder state flips.
    pub thunder_time: i32,
}

impl Default for Weather {
    fn default() -> Self {
        Self::new()
    }
}

impl Weather {
    #[must_use]
    pub fn new() -> Self {
        let mut rng = rand::rng();
        Self {
            raining: false,
            thundering: false,
            rain_time: rng.random_range(12_000..180_000),
            thunder_time: rng.random_range(12_000..180_000),
        }
    }

    /// Counts the timers down and flips the weather once they run out.
    pub fn tick(&mut self) {
        let mut rng = rand::rng();

        self.rain_time -= 1;
        if self.rain_time <= 0 {
            self.raining = !self.raining;
            self.rain_time = if self.raining {
                rng.random_range(12_000..24_000)
            } else {
                rng.random_range(12_000..180_000)
            };
        }

        self.thunder_time -= 1;
        if self.thunder_time <= 0 {
            self.thundering = !self.thundering;
            self.thunder_time = if self.thundering {
                rng.random_range(3_600..15_600)
            } else {
                rng.random_range(12_000..180_000)
            };
        }
    }

    /// Stops active rain and thunder and rolls fresh clear-weather delays.
    pub fn reset_weather_cycle(&mut self) {
        let mut rng = rand::rng();
        self.raining = false;
        self.thundering = false;
        self.rain_time = rng.random_range(12_000..180_000);
        self.thunder_time = rng.random_range(12_000..180_000);
    }
}

#[cfg(test)]
mod test {
    use super::Weather;

    #[test]
    fn expired_timers_flip_the_weather() {
        let mut weather = Weather::new();
        weather.rain_time = 1;
        weather.thunder_time = 1;

        weather.tick();
        assert!(weather.raining);
        assert!(weather.thundering);
        assert!(weather.rain_time > 0);
        assert!(weather.thunder_time > 0);

        weather.rain_time = 1;
        weather.tick();
        assert!(!weather.raining);
    }

    #[test]
    fn reset_clears_active_weather() {
        let mut weather = Weather::new();
        weather.raining = true;
        weather.thundering = true;

        weather.reset_weather_cycle();
        assert!(!weather.raining);
        assert!(!weather.thundering);
        assert!(weather.rain_time >= 12_000);
    }
}
