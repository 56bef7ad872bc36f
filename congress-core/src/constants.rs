//! Upstream protocol constants and defaults.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// PROPUBLICA API
// ═══════════════════════════════════════════════════════════════════════════════

/// Default base URL of the ProPublica Congress API.
pub const DEFAULT_API_BASE: &str = "https://api.propublica.org/congress/v1";

/// Header carrying the ProPublica API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Value of the envelope `status` field on a successful response.
pub const EXPECTED_STATUS: &str = "OK";

/// Per-call upstream timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHING
// ═══════════════════════════════════════════════════════════════════════════════

/// Default time-to-live applied to every cached upstream response.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

// ═══════════════════════════════════════════════════════════════════════════════
// JSON:API
// ═══════════════════════════════════════════════════════════════════════════════

/// Media type of JSON:API documents served to the client.
pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";
