//! Simulation constants and tuning parameters.
//!
//! All speeds and durations are in fixed per-tick units at a nominal 60 Hz;
//! the simulation is not delta-time scaled.

/// Nominal tick rate (Hz). Informational only; nothing scales by wall clock.
pub const TICK_RATE: u32 = 60;

// --- Playfield ---

/// Playfield width in pixels.
pub const FIELD_WIDTH: f64 = 960.0;

/// Playfield height in pixels.
pub const FIELD_HEIGHT: f64 = 640.0;

/// Height of the ground band at the bottom of the field.
pub const GROUND_HEIGHT: f64 = 60.0;

/// Y coordinate of the ground line (impact altitude).
pub const GROUND_Y: f64 = FIELD_HEIGHT - GROUND_HEIGHT;

// --- Fixed installations ---

/// City slot positions (x). Six slots, three each side of the center battery.
pub const CITY_POSITIONS: [f64; 6] = [120.0, 200.0, 280.0, 600.0, 680.0, 760.0];

/// Horizontal radius within which a ground impact damages a city.
pub const CITY_HIT_RADIUS: f64 = 40.0;

/// Battery positions (x) along the ground line.
pub const BATTERY_POSITIONS: [f64; 3] = [40.0, FIELD_WIDTH / 2.0, FIELD_WIDTH - 40.0];

/// Horizontal radius within which a ground impact empties a battery.
pub const BATTERY_HIT_RADIUS: f64 = 30.0;

/// Interceptors launch from this many pixels above the battery base.
pub const MUZZLE_OFFSET: f64 = 18.0;

/// Starting ammo per battery before upgrades.
pub const BASE_AMMO: u32 = 10;

/// Ticks a battery stays offline after an EMP ground strike.
pub const EMP_DISABLE_TICKS: u32 = 300;

// --- Projectiles & explosions ---

/// Base interceptor speed (pixels per tick) before upgrades.
pub const BASE_INTERCEPTOR_SPEED: f64 = 6.0;

/// Base explosion radius before upgrades.
pub const BASE_EXPLOSION_RADIUS: f64 = 50.0;

/// Explosion radius growth per tick.
pub const EXPLOSION_GROW_RATE: f64 = 1.5;

/// Explosion radius decay per tick once fully grown.
pub const EXPLOSION_SHRINK_RATE: f64 = 0.6;

/// Threat progress advances by `speed / PROGRESS_SCALE` per tick.
pub const PROGRESS_SCALE: f64 = 500.0;

/// Speed multiplier applied to frozen threats.
pub const FROZEN_SPEED_FACTOR: f64 = 0.3;

// --- Combat tuning ---

/// Base score for destroying a threat with an explosion.
pub const KILL_SCORE: f64 = 10.0;

/// Base score for destroying a threat with the laser.
pub const LASER_KILL_SCORE: f64 = 25.0;

/// Score/credits for shattering an asteroid.
pub const ASTEROID_SCORE: f64 = 50.0;

/// Ticks the combo window stays open after a kill.
pub const COMBO_WINDOW: u32 = 90;

/// Combo multiplier cap.
pub const COMBO_MULTIPLIER_CAP: u32 = 10;

/// Per-surviving-city bonus awarded on level completion.
pub const CITY_BONUS: f64 = 100.0;

// --- Special weapons ---

/// Laser beam lifetime in ticks.
pub const LASER_LIFE: u32 = 30;

/// Half-width of the laser kill corridor against threats.
pub const LASER_HIT_WIDTH: f64 = 20.0;

/// Half-width of the laser corridor against the boss.
pub const LASER_BOSS_WIDTH: f64 = 40.0;

/// Boss damage per laser beam per tick.
pub const LASER_BOSS_DAMAGE: i32 = 3;

/// Mine lifetime in ticks.
pub const MINE_LIFE: u32 = 600;

/// Mines arm once this many ticks of life have elapsed.
pub const MINE_ARM_DELAY: u32 = 30;

/// Interceptors fired per swarm discharge.
pub const SWARM_COUNT: u32 = 8;

// --- Bosses ---

/// A boss spawns on every level divisible by this.
pub const BOSS_LEVEL_INTERVAL: u32 = 5;

/// Asteroids closer to the ground than this block level completion.
pub const ASTEROID_DANGER_BAND: f64 = 100.0;

// --- Lifecycle timers ---

/// Ticks between level completion and the next transition.
pub const LEVEL_TRANSITION_TICKS: u32 = 120;

/// Duration of the zone intro screen.
pub const ZONE_INTRO_TICKS: u32 = 240;

/// Ticks before the first threat of a level spawns.
pub const FIRST_SPAWN_DELAY: f64 = 60.0;
