//! Shared constants for the theme controller and clock fragment.

// ── Storage ─────────────────────────────────────────────────────

/// `localStorage` key holding the persisted theme preference.
pub const STORAGE_KEY: &str = "theme-preference";

// ── DOM contract ────────────────────────────────────────────────

/// `name` shared by the three theme radio inputs.
pub const THEME_INPUT_NAME: &str = "theme";

/// Presentation attribute set on `<body>` for styling hooks.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Element id that receives the clock text.
pub const CLOCK_ELEMENT_ID: &str = "clock";

/// Optional inline JSON block carrying config overrides.
pub const CONFIG_ELEMENT_ID: &str = "theme-config";

/// Class applied to announcer nodes so they stay off-screen.
pub const VISUALLY_HIDDEN_CLASS: &str = "visually-hidden";

// ── Host signals ────────────────────────────────────────────────

/// Media query reporting the system dark color scheme.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

// ── Timing ──────────────────────────────────────────────────────

/// How long an announcer node stays attached, in milliseconds.
pub const ANNOUNCE_DELAY_MS: u32 = 1_000;

// ── Clock ───────────────────────────────────────────────────────

/// IANA time zone the clock is shown in.
pub const CLOCK_TIME_ZONE: &str = "America/Denver";
