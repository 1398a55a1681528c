/// ─── Cinder Protocol Constants ──────────────────────────────────────────────
///
/// The difficulty schedule: one block every ten minutes, recalculated over
/// two-week windows. These hold on every Cinder network; per-network values
/// (magic bytes, genesis, checkpoints) live in `cinder-params`.

// ── Difficulty retargeting ───────────────────────────────────────────────────

/// Expected wall-clock seconds for one full retarget window: two weeks.
pub const TARGET_TIMESPAN: u32 = 14 * 24 * 60 * 60;

/// Expected seconds between blocks.
pub const TARGET_SPACING: u32 = 10 * 60;

/// Blocks between mandatory difficulty recalculations.
pub const INTERVAL: u32 = TARGET_TIMESPAN / TARGET_SPACING;
