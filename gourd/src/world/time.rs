/// The time state of a world.
///
/// `time_of_day` stays within one day (0..24000, with 0 at sunrise) while
/// `world_age` counts every tick since the world was created.
pub struct LevelTime {
    pub world_age: i64,
    pub time_of_day: i64,
}

/// Ticks in one in-game day.
pub const DAY_LENGTH: i64 = 24_000;

impl Default for LevelTime {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelTime {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            world_age: 0,
            time_of_day: 0,
        }
    }

    pub fn tick(&mut self, daylight_cycle: bool) {
        self.world_age += 1;
        if daylight_cycle {
            self.time_of_day = (self.time_of_day + 1) % DAY_LENGTH;
        }
    }

    pub fn set_time(&mut self, time_of_day: i64) {
        self.time_of_day = time_of_day.rem_euclid(DAY_LENGTH);
    }
}
