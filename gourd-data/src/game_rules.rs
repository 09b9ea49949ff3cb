/// The game rules the server core consults, with vanilla defaults.
#[derive(Clone, Debug)]
pub struct GameRules {
    /// Percentage of players that must sleep to skip the night.
    pub players_sleeping_percentage: i32,
    pub do_daylight_cycle: bool,
    pub do_weather_cycle: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            players_sleeping_percentage: 100,
            do_daylight_cycle: true,
            do_weather_cycle: true,
        }
    }
}
