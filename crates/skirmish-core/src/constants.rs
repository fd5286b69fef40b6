//! Simulation constants and tuning parameters.

// --- Teams and scoring ---

/// Number of teams in a match.
pub const TEAM_COUNT: usize = 2;

/// First team to reach this many kill points wins the match.
pub const WIN_SCORE: u32 = 3;

// --- Tank perception ---

/// Radius around the turret probe point within which an enemy is spotted.
pub const ENEMY_SPOT_RANGE: f32 = 25.0;

/// How far ahead of the turret the probe point is cast.
pub const TURRET_PROBE_LENGTH: f32 = 30.0;

// --- Tank movement ---

/// Distance at which a tank counts as having reached its movement target.
pub const ARRIVE_RADIUS: f32 = 2.0;

/// Half-extent of the square in which patrol waypoints are picked.
pub const PATROL_AREA_HALF: f32 = 30.0;

/// Half-extent of the square in which evade targets are picked.
pub const EVADE_AREA_HALF: f32 = 40.0;

// --- Tank combat ---

/// Delay between acquiring an aim solution and firing.
pub const AIM_DELAY_SECS: f32 = 1.0;

/// Shell count restored by collecting an ammo box (also the initial load).
pub const AMMO_CAPACITY: u32 = 10;

/// Search radius for ammo boxes in the find-ammo state.
pub const AMMO_SEARCH_RADIUS: f32 = 20.0;

/// How long a tank holds the help state before giving up.
pub const HELP_DURATION_SECS: f32 = 3.0;

/// Scan radius for targets while helping.
pub const HELP_SCAN_RADIUS: f32 = 20.0;

// --- Tank death ---

/// Duration of the death teardown animation before the wreck is removed.
pub const DEATH_DURATION_SECS: f32 = 2.0;

/// Turret lift rate during the death animation (units/sec).
pub const DEATH_TURRET_LIFT_RATE: f32 = 2.0;

/// Turret spin rate during the death animation (radians/sec).
pub const DEATH_TURRET_SPIN_RATE: f32 = 100.0;

/// Hull spin rate during the death animation (radians/sec).
pub const DEATH_HULL_SPIN_RATE: f32 = 50.0;

// --- Shells ---

/// Shell flight speed (units/sec).
pub const SHELL_SPEED: f32 = 10.0;

/// Shell lifetime before a miss self-destructs.
pub const SHELL_LIFETIME_SECS: f32 = 3.0;

/// A shell within this distance of an enemy tank registers a hit.
pub const SHELL_HIT_RADIUS: f32 = 5.0;

/// Height above the ground at which shells are spawned.
pub const SHELL_MUZZLE_HEIGHT: f32 = 1.8;

/// Template type used when tanks fire.
pub const SHELL_TEMPLATE_TYPE: &str = "Shell Type 1";

// --- Ammo boxes ---

/// Height at which a falling ammo box comes to rest.
pub const AMMO_GROUND_HEIGHT: f32 = 2.0;

/// Height at which spawned ammo boxes start falling.
pub const AMMO_DROP_HEIGHT: f32 = 30.0;

/// Half-extent of the square in which ammo boxes are dropped.
pub const AMMO_DROP_AREA_HALF: f32 = 30.0;

/// Shortest interval between ammo box drops (seconds).
pub const AMMO_SPAWN_MIN_SECS: f32 = 20.0;

/// Longest interval between ammo box drops (seconds).
pub const AMMO_SPAWN_MAX_SECS: f32 = 30.0;

/// Template type used for timed ammo drops.
pub const AMMO_TEMPLATE_TYPE: &str = "Ammo Type 1";

// --- Chase camera ---

/// How far behind the hull the chase camera sits.
pub const CHASE_CAM_DISTANCE: f32 = 15.0;

/// How far above the hull the chase camera sits.
pub const CHASE_CAM_HEIGHT: f32 = 3.0;
